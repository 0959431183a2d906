//! Tunables for a session. Defaults match the classic 60x60 board.

use std::time::Duration;

use crate::error::{GameError, Result};
use crate::grid::Position;
use crate::snake::Direction;

pub const GRID_ROWS: usize = 60;
pub const GRID_COLS: usize = 60;
pub const SCORE_INCREMENT: u32 = 10;
pub const TICK: Duration = Duration::from_millis(100);
pub const BOOST_TICK: Duration = Duration::from_millis(50);

/// How forgiving the wall and fruit checks around the head are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitBox {
    /// 0 means the head's own cell only.
    pub radius: u8,
    /// Leave the four corners out of the scanned square.
    pub skip_corners: bool,
}

impl HitBox {
    pub const EXACT: HitBox = HitBox {
        radius: 0,
        skip_corners: false,
    };

    /// Cells covered by the hit box when the head is at `center`.
    pub fn cells(self, center: Position) -> impl Iterator<Item = Position> {
        let r = i32::from(self.radius);
        let skip = self.skip_corners && r > 0;
        (-r..=r)
            .flat_map(move |dx| (-r..=r).map(move |dy| (dx, dy)))
            .filter(move |&(dx, dy)| !(skip && dx.abs() == r && dy.abs() == r))
            .map(move |(dx, dy)| Position::new(center.x + dx, center.y + dy))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FruitRules {
    /// Fruit never lands within this Chebyshev distance of the head.
    pub exclusion_radius: u8,
    /// Extra cells kept clear inside the wall ring.
    pub margin: u8,
}

impl Default for FruitRules {
    fn default() -> Self {
        FruitRules {
            exclusion_radius: 2,
            margin: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyConfig {
    pub max: u32,
    /// Lost per boosted frame.
    pub drain: u32,
    /// Gained per normal frame.
    pub regen: u32,
    /// Once drained to zero, boost stays locked until the meter climbs back
    /// to this level.
    pub reengage_threshold: u32,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        EnergyConfig {
            max: 100,
            drain: 2,
            regen: 1,
            reengage_threshold: 25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    /// Head position at session start. `None` means the board centre.
    pub start: Option<Position>,
    pub direction: Direction,
    pub score_increment: u32,
    pub tick: Duration,
    pub boost_tick: Duration,
    pub fruit: FruitRules,
    pub hit_box: HitBox,
    pub energy: EnergyConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            start: None,
            direction: Direction::Up,
            score_increment: SCORE_INCREMENT,
            tick: TICK,
            boost_tick: BOOST_TICK,
            fruit: FruitRules::default(),
            hit_box: HitBox::EXACT,
            energy: EnergyConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn with_size(rows: usize, cols: usize) -> Self {
        GameConfig {
            rows,
            cols,
            ..GameConfig::default()
        }
    }

    pub fn start_position(&self) -> Position {
        self.start
            .unwrap_or(Position::new((self.rows / 2) as i32, (self.cols / 2) as i32))
    }

    /// Is there any cell fruit may use, given the margin, the hit-box inset
    /// and the exclusion radius around `start`?
    fn has_fruit_room(&self, start: Position) -> bool {
        let lo = 1 + i32::from(self.fruit.margin.max(self.hit_box.radius));
        let hi_x = self.rows as i32 - lo - 1;
        let hi_y = self.cols as i32 - lo - 1;
        if lo > hi_x || lo > hi_y {
            return false;
        }
        let reach_x = (start.x - lo).abs().max((hi_x - start.x).abs());
        let reach_y = (start.y - lo).abs().max((hi_y - start.y).abs());
        reach_x.max(reach_y) > i32::from(self.fruit.exclusion_radius)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows < 3 || self.cols < 3 {
            return Err(GameError::invariant(format!(
                "grid must be at least 3x3, got {}x{}",
                self.rows, self.cols
            )));
        }
        let start = self.start_position();
        let inside = start.x >= 1
            && start.y >= 1
            && (start.x as usize) < self.rows - 1
            && (start.y as usize) < self.cols - 1;
        if !inside {
            return Err(GameError::invariant(format!(
                "start position ({}, {}) is not inside the walls",
                start.x, start.y
            )));
        }
        if !self.has_fruit_room(start) {
            return Err(GameError::invariant(format!(
                "no cell on a {}x{} board can hold fruit {} cells away from ({}, {})",
                self.rows, self.cols, self.fruit.exclusion_radius, start.x, start.y
            )));
        }
        if self.tick.is_zero() || self.boost_tick.is_zero() {
            return Err(GameError::invariant("tick intervals must be non-zero"));
        }
        let e = &self.energy;
        if e.max == 0 || e.drain == 0 || e.reengage_threshold > e.max {
            return Err(GameError::invariant(format!(
                "unusable energy settings: {:?}",
                e
            )));
        }
        Ok(())
    }
}
