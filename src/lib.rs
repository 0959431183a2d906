//! Simulation core for a grid snake game.
//!
//! Everything here is plain data driven by [`GameSession::advance_frame`];
//! drawing, timers and input belong to the host.

pub mod config;
pub mod energy;
pub mod error;
pub mod frame;
pub mod fruit;
pub mod geometry;
pub mod grid;
pub mod session;
pub mod snake;

pub use config::{EnergyConfig, FruitRules, GameConfig, HitBox};
pub use energy::Energy;
pub use error::{GameError, Result};
pub use frame::{FrameOutcome, Status};
pub use geometry::{BoardLayout, CellRect};
pub use grid::{Cell, Flag, Grid, Position};
pub use session::{Cadence, GameSession};
pub use snake::{Direction, Segment, Snake};
