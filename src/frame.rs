//! Per-frame classification and the session status machine.

use crate::config::HitBox;
use crate::error::Result;
use crate::grid::{Grid, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Paused,
    Running,
    GameOver,
}

impl Status {
    /// Enter/pause key. GameOver only leaves through a reset.
    pub fn toggled(self) -> Status {
        match self {
            Status::Paused => Status::Running,
            Status::Running => Status::Paused,
            Status::GameOver => Status::GameOver,
        }
    }
}

/// What a single frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Plain move.
    Moved,
    /// The head reached the fruit at this position.
    AteFruit(Position),
    /// Wall or self hit; the game is over.
    Collision,
}

/// Classify the board around a freshly moved head.
///
/// Walls inside the hit box and snake body on the head's own cell are
/// checked before fruit, so fruit can never be eaten through a wall.
pub fn classify(grid: &Grid, head: Position, hit_box: HitBox) -> Result<FrameOutcome> {
    let here = grid.query(head)?;
    if here.wall || here.body {
        return Ok(FrameOutcome::Collision);
    }

    let mut fruit = None;
    for pos in hit_box.cells(head) {
        if !grid.contains(pos) {
            continue;
        }
        let cell = grid.query(pos)?;
        if cell.wall {
            return Ok(FrameOutcome::Collision);
        }
        if cell.fruit && fruit.is_none() {
            fruit = Some(pos);
        }
    }
    Ok(match fruit {
        Some(pos) => FrameOutcome::AteFruit(pos),
        None => FrameOutcome::Moved,
    })
}
