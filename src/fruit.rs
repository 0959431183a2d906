use log::warn;
use rand::seq::IteratorRandom;
use rand::Rng;

use crate::config::FruitRules;
use crate::error::{GameError, Result};
use crate::grid::{Flag, Grid, Position};

/// Random draws before giving up on rejection sampling and scanning the
/// whole board instead.
const SAMPLE_ATTEMPTS: usize = 256;

/// Pick a cell for the next fruit and mark it on the grid.
///
/// Candidates lie inside the wall ring, `inset` cells further in, away from
/// every snake segment and more than `rules.exclusion_radius` cells from
/// `head`.
pub fn place_fruit<R: Rng>(
    grid: &mut Grid,
    head: Position,
    rules: FruitRules,
    inset: u8,
    rng: &mut R,
) -> Result<Position> {
    let pos = pick(grid, head, rules, inset, rng).ok_or(GameError::NoFreeCell)?;
    grid.set_flag(pos, Flag::Fruit, true)?;
    Ok(pos)
}

fn pick<R: Rng>(
    grid: &Grid,
    head: Position,
    rules: FruitRules,
    inset: u8,
    rng: &mut R,
) -> Option<Position> {
    let lo = 1 + i32::from(rules.margin.max(inset));
    let hi_x = grid.rows() as i32 - lo;
    let hi_y = grid.cols() as i32 - lo;
    if lo >= hi_x || lo >= hi_y {
        return None;
    }

    let sampled = (0..SAMPLE_ATTEMPTS)
        .map(|_| Position::new(rng.gen_range(lo..hi_x), rng.gen_range(lo..hi_y)))
        .find(|&p| accepts(grid, head, rules, p));
    if sampled.is_some() {
        return sampled;
    }

    warn!(
        "no fruit cell after {} samples, scanning the board",
        SAMPLE_ATTEMPTS
    );
    (lo..hi_x)
        .flat_map(|x| (lo..hi_y).map(move |y| Position::new(x, y)))
        .filter(|&p| accepts(grid, head, rules, p))
        .choose(rng)
}

fn accepts(grid: &Grid, head: Position, rules: FruitRules, pos: Position) -> bool {
    if pos.chebyshev(head) <= i32::from(rules.exclusion_radius) {
        return false;
    }
    match grid.query(pos) {
        Ok(cell) => !cell.wall && !cell.is_snake() && !cell.fruit,
        Err(_) => false,
    }
}
