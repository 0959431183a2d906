use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use snekgrid::{
    Direction, FrameOutcome, FruitRules, GameConfig, GameSession, Grid, Position, Status,
};

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

fn positions(session: &GameSession<StdRng>) -> Vec<Position> {
    session.snake().segments().iter().map(|s| s.pos).collect()
}

/// A running 20x20 session whose snake has been fed up to `len` segments.
fn grown(seed: u64, len: usize) -> GameSession<StdRng> {
    let mut session =
        GameSession::with_rng(GameConfig::with_size(20, 20), StdRng::seed_from_u64(seed)).unwrap();
    session.toggle_pause();
    while session.snake().len() < len {
        let head = session.snake().head().unwrap().pos;
        session.place_fruit_at(Direction::Up.apply(head)).unwrap();
        let outcome = session.advance_frame().unwrap();
        assert!(matches!(outcome, Some(FrameOutcome::AteFruit(_))));
    }
    session
}

#[test]
fn body_follows_the_leader_on_random_walks() {
    for seed in 0..20 {
        let mut session = grown(seed, 5);
        let mut rng = StdRng::seed_from_u64(seed + 1000);
        while session.status() == Status::Running {
            let before = positions(&session);
            session.set_direction(DIRECTIONS[rng.gen_range(0..4)]);
            let outcome = session.advance_frame().unwrap().unwrap();
            let after = positions(&session);
            let offset = usize::from(matches!(outcome, FrameOutcome::AteFruit(_)));
            assert_eq!(after.len(), before.len() + offset);
            for i in 1..before.len() {
                assert_eq!(after[i], before[i - 1], "seed {} segment {}", seed, i);
            }
        }
    }
}

#[test]
fn fresh_grid_has_walls_exactly_on_the_ring() {
    for (rows, cols) in [(60, 60), (10, 10), (3, 7)] {
        let grid = Grid::new(rows, cols).unwrap();
        for x in 0..rows as i32 {
            for y in 0..cols as i32 {
                let ring = x == 0 || x == rows as i32 - 1 || y == 0 || y == cols as i32 - 1;
                assert_eq!(grid.query(Position::new(x, y)).unwrap().wall, ring);
            }
        }
    }
}

#[test]
fn fruit_respects_walls_and_exclusion_radius() {
    let config = GameConfig {
        fruit: FruitRules {
            exclusion_radius: 4,
            margin: 1,
        },
        ..GameConfig::with_size(16, 16)
    };
    let mut session = GameSession::with_rng(config, StdRng::seed_from_u64(9)).unwrap();
    for _ in 0..300 {
        let fruit = session.fruit();
        let head = session.snake().head().unwrap().pos;
        assert!(!session.grid().query(fruit).unwrap().wall);
        assert!(fruit.chebyshev(head) > 4);
        assert!((2..14).contains(&fruit.x) && (2..14).contains(&fruit.y));
        session.reset().unwrap();
    }
}

#[test]
fn score_only_moves_up_by_the_increment() {
    let config = GameConfig {
        score_increment: 7,
        fruit: FruitRules {
            exclusion_radius: 1,
            margin: 0,
        },
        ..GameConfig::with_size(8, 8)
    };
    let mut rng = StdRng::seed_from_u64(77);
    let mut meals = 0;
    for seed in 0..50 {
        let mut session =
            GameSession::with_rng(config.clone(), StdRng::seed_from_u64(seed)).unwrap();
        session.toggle_pause();
        session.place_fruit_at(Position::new(4, 3)).unwrap();
        session.advance_frame().unwrap();
        meals += 1;
        assert_eq!(session.score(), 7);
        while session.status() == Status::Running {
            let score = session.score();
            session.set_direction(DIRECTIONS[rng.gen_range(0..4)]);
            match session.advance_frame().unwrap() {
                Some(FrameOutcome::AteFruit(_)) => {
                    meals += 1;
                    assert_eq!(session.score(), score + 7);
                }
                _ => assert_eq!(session.score(), score),
            }
        }
    }
    assert!(meals >= 50);
}

#[test]
fn eating_adds_one_segment_at_the_tail_prev() {
    let mut session = grown(3, 2);
    let len = session.snake().len();
    let head = session.snake().head().unwrap().pos;
    session.place_fruit_at(Direction::Up.apply(head)).unwrap();

    session.advance_frame().unwrap();

    assert_eq!(session.snake().len(), len + 1);
    let old_tail = session.snake().segments()[len - 1];
    let new_tail = session.snake().tail().unwrap();
    assert_eq!(new_tail.pos, old_tail.prev);
    assert_eq!(new_tail.prev, old_tail.prev);
    assert!(session.grid().query(new_tail.pos).unwrap().body);
}

#[test]
fn game_over_freezes_the_session() {
    let mut session = grown(5, 4);
    session.set_direction(Direction::Left);
    while session.status() == Status::Running {
        session.advance_frame().unwrap();
    }
    let snapshot = (
        session.score(),
        session.snake().segments().to_vec(),
        session.grid().cells().collect::<Vec<_>>(),
        session.fruit(),
    );

    for _ in 0..5 {
        assert_eq!(session.advance_frame().unwrap(), None);
        assert_eq!(session.toggle_pause(), Status::GameOver);
        session.set_direction(Direction::Right);
        assert!(!session.set_boost(true));
    }

    assert_eq!(session.score(), snapshot.0);
    assert_eq!(session.snake().segments(), &snapshot.1[..]);
    assert_eq!(session.grid().cells().collect::<Vec<_>>(), snapshot.2);
    assert_eq!(session.fruit(), snapshot.3);

    session.reset().unwrap();
    assert_eq!(session.status(), Status::Paused);
    assert_eq!(session.score(), 0);
}
