use std::fmt;

/// Everything that can go wrong inside the simulation.
///
/// None of these are recoverable mid-game: the host is expected to report
/// them and stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A structural rule was broken (empty snake, bad configuration, ...).
    InvariantViolation(String),
    /// A grid query or update landed outside the board.
    OutOfBounds { x: i32, y: i32, rows: usize, cols: usize },
    /// Fruit placement found no cell satisfying its rules.
    NoFreeCell,
}

impl GameError {
    pub(crate) fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvariantViolation(msg) => write!(f, "invariant violation: {}", msg),
            Self::OutOfBounds { x, y, rows, cols } => {
                write!(f, "cell ({}, {}) is outside the {}x{} grid", x, y, rows, cols)
            }
            Self::NoFreeCell => write!(f, "no free cell left for fruit"),
        }
    }
}

impl std::error::Error for GameError {}

pub type Result<T> = std::result::Result<T, GameError>;
