use crate::error::{GameError, Result};
use crate::grid::{Flag, Grid, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step for this direction. Up decreases `y`.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn apply(self, pos: Position) -> Position {
        let (dx, dy) = self.offset();
        Position::new(pos.x + dx, pos.y + dy)
    }
}

/// One link of the snake. `prev` is where it stood one tick ago.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub pos: Position,
    pub prev: Position,
}

/// The snake, head first. Segment `i` follows segment `i - 1`.
#[derive(Debug, Clone)]
pub struct Snake {
    segments: Vec<Segment>,
    direction: Direction,
}

impl Snake {
    pub fn new(start: Position, direction: Direction) -> Self {
        Snake {
            segments: vec![Segment {
                pos: start,
                prev: start,
            }],
            direction,
        }
    }

    /// Create the snake and mark its head on the grid.
    pub fn spawn(grid: &mut Grid, start: Position, direction: Direction) -> Result<Self> {
        grid.set_flag(start, Flag::Head, true)?;
        Ok(Snake::new(start, direction))
    }

    pub fn head(&self) -> Result<&Segment> {
        self.segments
            .first()
            .ok_or_else(|| GameError::invariant("snake has no head segment"))
    }

    pub fn tail(&self) -> Result<&Segment> {
        self.segments
            .last()
            .ok_or_else(|| GameError::invariant("snake has no tail segment"))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Takes effect on the next [`Snake::step`]. Reversing is allowed; it
    /// runs the head into its own neck.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Advance one cell, updating head and body flags on `grid`.
    ///
    /// The head moves by the current direction without any clamping, then
    /// each body segment steps into the cell its predecessor held before this
    /// tick. Returns the new head position.
    pub fn step(&mut self, grid: &mut Grid) -> Result<Position> {
        let direction = self.direction;
        let head = self
            .segments
            .first_mut()
            .ok_or_else(|| GameError::invariant("cannot move a snake with no head"))?;
        head.prev = head.pos;
        grid.set_flag(head.pos, Flag::Head, false)?;
        head.pos = direction.apply(head.pos);
        grid.set_flag(head.pos, Flag::Head, true)?;
        let new_head = head.pos;

        // Clear every old body cell before marking any new one: a freshly
        // grown tail can share a cell with the segment moving into it.
        for i in 1..self.segments.len() {
            let lead = self.segments[i - 1].prev;
            let seg = &mut self.segments[i];
            seg.prev = seg.pos;
            grid.set_flag(seg.pos, Flag::Body, false)?;
            seg.pos = lead;
        }
        for seg in &self.segments[1..] {
            grid.set_flag(seg.pos, Flag::Body, true)?;
        }
        Ok(new_head)
    }

    /// Grow by one segment out of the tail's previous cell.
    pub fn extend(&mut self, grid: &mut Grid) -> Result<()> {
        let at = self.tail()?.prev;
        grid.set_flag(at, Flag::Body, true)?;
        self.segments.push(Segment { pos: at, prev: at });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Grid {
        Grid::new(20, 20).unwrap()
    }

    #[test]
    fn head_moves_by_direction() {
        let mut grid = board();
        let start = Position::new(10, 10);
        let mut snake = Snake::spawn(&mut grid, start, Direction::Up).unwrap();

        assert_eq!(snake.step(&mut grid).unwrap(), Position::new(10, 9));
        snake.set_direction(Direction::Left);
        assert_eq!(snake.step(&mut grid).unwrap(), Position::new(9, 9));
        snake.set_direction(Direction::Down);
        assert_eq!(snake.step(&mut grid).unwrap(), Position::new(9, 10));
        snake.set_direction(Direction::Right);
        assert_eq!(snake.step(&mut grid).unwrap(), Position::new(10, 10));

        assert!(grid.query(Position::new(10, 10)).unwrap().head);
        assert!(!grid.query(Position::new(9, 10)).unwrap().head);
        assert_eq!(snake.head().unwrap().prev, Position::new(9, 10));
    }

    #[test]
    fn extend_grows_from_tail_prev() {
        let mut grid = board();
        let mut snake = Snake::spawn(&mut grid, Position::new(10, 10), Direction::Right).unwrap();
        snake.step(&mut grid).unwrap();
        let old_prev = snake.tail().unwrap().prev;

        snake.extend(&mut grid).unwrap();

        assert_eq!(snake.len(), 2);
        assert_eq!(snake.tail().unwrap().pos, old_prev);
        assert_eq!(snake.tail().unwrap().prev, old_prev);
        assert!(grid.query(old_prev).unwrap().body);
    }

    #[test]
    fn body_follows_the_leader() {
        let mut grid = board();
        let mut snake = Snake::spawn(&mut grid, Position::new(10, 10), Direction::Right).unwrap();
        for _ in 0..3 {
            snake.step(&mut grid).unwrap();
            snake.extend(&mut grid).unwrap();
        }
        let turns = [Direction::Up, Direction::Up, Direction::Left, Direction::Down];
        for dir in turns {
            let before: Vec<Position> = snake.segments().iter().map(|s| s.pos).collect();
            snake.set_direction(dir);
            snake.step(&mut grid).unwrap();
            for i in 1..snake.len() {
                assert_eq!(snake.segments()[i].pos, before[i - 1]);
            }
        }
        let body_cells = grid.cells().filter(|(_, c)| c.body).count();
        assert_eq!(body_cells, snake.len() - 1);
    }

    #[test]
    fn tail_grown_under_the_head_keeps_body_flags_in_sync() {
        let mut grid = board();
        let mut snake = Snake::spawn(&mut grid, Position::new(5, 5), Direction::Right).unwrap();
        for _ in 0..3 {
            snake.step(&mut grid).unwrap();
            snake.extend(&mut grid).unwrap();
        }
        // Curl into a 2x2 loop so the head lands on the cell the tail left.
        for dir in [Direction::Up, Direction::Left, Direction::Down] {
            snake.set_direction(dir);
            snake.step(&mut grid).unwrap();
        }
        assert_eq!(snake.head().unwrap().pos, Position::new(7, 5));
        assert_eq!(snake.tail().unwrap().prev, Position::new(7, 5));

        snake.extend(&mut grid).unwrap();
        snake.set_direction(Direction::Left);
        snake.step(&mut grid).unwrap();

        assert_eq!(snake.segments()[1].pos, Position::new(7, 5));
        for seg in &snake.segments()[1..] {
            assert!(grid.query(seg.pos).unwrap().body, "no body flag at {:?}", seg.pos);
        }
        let body_cells = grid.cells().filter(|(_, c)| c.body).count();
        assert_eq!(body_cells, snake.len() - 1);
    }

    #[test]
    fn stepping_off_the_board_is_out_of_bounds() {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut snake = Snake::spawn(&mut grid, Position::new(1, 0), Direction::Up).unwrap();
        assert!(matches!(
            snake.step(&mut grid),
            Err(GameError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn empty_snake_is_an_invariant_violation() {
        let mut grid = board();
        let mut snake = Snake::new(Position::new(5, 5), Direction::Up);
        snake.segments.clear();
        assert!(matches!(
            snake.step(&mut grid),
            Err(GameError::InvariantViolation(_))
        ));
        assert!(snake.extend(&mut grid).is_err());
        assert!(snake.head().is_err());
    }
}
