use std::time::Duration;

use log::{debug, info};
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::config::GameConfig;
use crate::energy::Energy;
use crate::error::{GameError, Result};
use crate::frame::{classify, FrameOutcome, Status};
use crate::fruit::place_fruit;
use crate::grid::{Flag, Grid, Position};
use crate::snake::{Direction, Snake};

/// Which tick source the host should be running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    Normal,
    Boost,
}

/// One game: board, snake, fruit, score and status.
///
/// The host calls [`GameSession::advance_frame`] on every tick of the
/// current [`Cadence`] and reads state back for drawing afterwards.
pub struct GameSession<R = ThreadRng> {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    fruit: Position,
    score: u32,
    status: Status,
    energy: Energy,
    boosting: bool,
    frame: u64,
    rng: R,
}

impl GameSession<ThreadRng> {
    pub fn new(config: GameConfig) -> Result<Self> {
        GameSession::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameSession<R> {
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self> {
        config.validate()?;
        let mut grid = Grid::new(config.rows, config.cols)?;
        let start = config.start_position();
        let snake = Snake::spawn(&mut grid, start, config.direction)?;
        let fruit = place_fruit(
            &mut grid,
            start,
            config.fruit,
            config.hit_box.radius,
            &mut rng,
        )?;
        info!(
            "new session on a {}x{} board, head at ({}, {}), fruit at ({}, {})",
            config.rows, config.cols, start.x, start.y, fruit.x, fruit.y
        );
        Ok(GameSession {
            energy: Energy::new(config.energy),
            config,
            grid,
            snake,
            fruit,
            score: 0,
            status: Status::Paused,
            boosting: false,
            frame: 0,
            rng,
        })
    }

    /// Run one frame: move, classify, then score/grow/respawn fruit or end
    /// the game.
    ///
    /// Outside [`Status::Running`] this does nothing and returns `Ok(None)`.
    pub fn advance_frame(&mut self) -> Result<Option<FrameOutcome>> {
        if self.status != Status::Running {
            return Ok(None);
        }
        self.frame += 1;
        self.tick_energy();

        let head = self.snake.step(&mut self.grid)?;
        let outcome = classify(&self.grid, head, self.config.hit_box)?;
        debug!(
            "frame {}: head ({}, {}) -> {:?}",
            self.frame, head.x, head.y, outcome
        );

        match outcome {
            FrameOutcome::Collision => {
                self.status = Status::GameOver;
                self.boosting = false;
                info!("game over at ({}, {}) with score {}", head.x, head.y, self.score);
            }
            FrameOutcome::AteFruit(at) => {
                self.grid.set_flag(at, Flag::Fruit, false)?;
                self.score += self.config.score_increment;
                self.snake.extend(&mut self.grid)?;
                self.fruit = place_fruit(
                    &mut self.grid,
                    head,
                    self.config.fruit,
                    self.config.hit_box.radius,
                    &mut self.rng,
                )?;
                info!(
                    "ate fruit at ({}, {}): score {}, length {}, next fruit ({}, {})",
                    at.x,
                    at.y,
                    self.score,
                    self.snake.len(),
                    self.fruit.x,
                    self.fruit.y
                );
            }
            FrameOutcome::Moved => {}
        }
        Ok(Some(outcome))
    }

    fn tick_energy(&mut self) {
        if self.boosting {
            if !self.energy.drain() {
                self.boosting = false;
                info!("boost exhausted");
            }
        } else {
            self.energy.regenerate();
        }
    }

    /// Paused <-> Running. No effect after game over.
    pub fn toggle_pause(&mut self) -> Status {
        self.status = self.status.toggled();
        info!("status now {:?}", self.status);
        self.status
    }

    /// Queue a direction for the next frame. Ignored unless running.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.status != Status::Running {
            return;
        }
        debug!("direction {:?}", direction);
        self.snake.set_direction(direction);
    }

    /// Ask for boost on or off. Returns whether boost is now engaged; it
    /// refuses while the meter is locked out or the game isn't running.
    pub fn set_boost(&mut self, on: bool) -> bool {
        self.boosting = on && self.status == Status::Running && self.energy.can_boost();
        self.boosting
    }

    pub fn cadence(&self) -> Cadence {
        if self.boosting {
            Cadence::Boost
        } else {
            Cadence::Normal
        }
    }

    pub fn tick_interval(&self) -> Duration {
        match self.cadence() {
            Cadence::Normal => self.config.tick,
            Cadence::Boost => self.config.boost_tick,
        }
    }

    /// Throw the current game away and start over, paused.
    pub fn reset(&mut self) -> Result<()> {
        self.grid.reset();
        let start = self.config.start_position();
        self.snake = Snake::spawn(&mut self.grid, start, self.config.direction)?;
        self.fruit = place_fruit(
            &mut self.grid,
            start,
            self.config.fruit,
            self.config.hit_box.radius,
            &mut self.rng,
        )?;
        self.score = 0;
        self.status = Status::Paused;
        self.energy.refill();
        self.boosting = false;
        self.frame = 0;
        info!("session reset");
        Ok(())
    }

    /// Move the fruit to a chosen interior cell.
    pub fn place_fruit_at(&mut self, pos: Position) -> Result<()> {
        if self.grid.query(pos)?.wall {
            return Err(GameError::invariant(format!(
                "fruit cannot go on the wall at ({}, {})",
                pos.x, pos.y
            )));
        }
        self.grid.set_flag(self.fruit, Flag::Fruit, false)?;
        self.grid.set_flag(pos, Flag::Fruit, true)?;
        self.fruit = pos;
        Ok(())
    }
}

impl<R> GameSession<R> {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn fruit(&self) -> Position {
        self.fruit
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn energy(&self) -> &Energy {
        &self.energy
    }

    pub fn is_boosting(&self) -> bool {
        self.boosting
    }
}
