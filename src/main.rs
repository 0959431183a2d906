mod game;

use std::fs::File;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::{Config, LevelFilter, WriteLogger};
use snekgrid::{config, BoardLayout, FruitRules, GameConfig, GameSession, HitBox};

/// Terminal cells per grid cell when no board size is given.
const CELL_WIDTH: u16 = 2;
const CELL_HEIGHT: u16 = 1;

/// Snake on a walled grid, with a boost meter.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Grid cells along the horizontal axis, walls included.
    #[arg(long, default_value_t = config::GRID_ROWS)]
    rows: usize,
    /// Grid cells along the vertical axis, walls included.
    #[arg(long, default_value_t = config::GRID_COLS)]
    cols: usize,
    /// Board size in terminal characters as WIDTHxHEIGHT. Must divide evenly
    /// into the grid.
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    board: Option<BoardSize>,
    /// Milliseconds per frame at normal speed.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..=10_000))]
    tick_ms: u64,
    /// Milliseconds per frame while boosting.
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..=10_000))]
    boost_tick_ms: u64,
    /// Points per fruit.
    #[arg(long, default_value_t = config::SCORE_INCREMENT)]
    score_increment: u32,
    /// Fruit never spawns within this many cells of the head.
    #[arg(long, default_value_t = 2)]
    fruit_exclusion: u8,
    /// Extra cells kept free of fruit inside the walls.
    #[arg(long, default_value_t = 0)]
    fruit_margin: u8,
    /// Radius of the wall/fruit hit box around the head. 0 is exact.
    #[arg(long, default_value_t = 0)]
    hit_radius: u8,
    /// Leave the corners out of the hit box.
    #[arg(long)]
    hit_skip_corners: bool,
    /// Seed for fruit placement.
    #[arg(long)]
    seed: Option<u64>,
    /// Log file, truncated on start.
    #[arg(long, default_value = "snekgrid.log")]
    log_file: PathBuf,
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Debug, Clone, Copy)]
struct BoardSize {
    width: u16,
    height: u16,
}

impl FromStr for BoardSize {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (width, height) = value
            .split_once(['x', 'X'])
            .ok_or_else(|| "expected format WIDTHxHEIGHT".to_string())?;
        let width = width
            .trim()
            .parse::<u16>()
            .map_err(|error| format!("invalid width: {}", error))?;
        let height = height
            .trim()
            .parse::<u16>()
            .map_err(|error| format!("invalid height: {}", error))?;
        Ok(BoardSize { width, height })
    }
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            score_increment: self.score_increment,
            tick: Duration::from_millis(self.tick_ms),
            boost_tick: Duration::from_millis(self.boost_tick_ms),
            fruit: FruitRules {
                exclusion_radius: self.fruit_exclusion,
                margin: self.fruit_margin,
            },
            hit_box: HitBox {
                radius: self.hit_radius,
                skip_corners: self.hit_skip_corners,
            },
            ..GameConfig::with_size(self.rows, self.cols)
        }
    }

    fn layout(&self) -> snekgrid::Result<BoardLayout> {
        match self.board {
            Some(size) => BoardLayout::new(size.width, size.height, self.rows, self.cols),
            None => BoardLayout::with_cell_size(CELL_WIDTH, CELL_HEIGHT, self.rows, self.cols),
        }
    }
}

fn play(cli: &Cli) -> anyhow::Result<u32> {
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let session = GameSession::with_rng(cli.game_config(), rng)?;
    let layout = cli.layout()?;

    let _terminal = game::TerminalGuard::enter()?;
    let mut game = game::Game::new(session, layout);
    game.run()?;
    Ok(game.score())
}

/// Log an unrecoverable error and end the process.
fn report_fatal(err: anyhow::Error) -> ! {
    error!("fatal: {:#}", err);
    eprintln!("snekgrid: {:#}", err);
    std::process::exit(1)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    WriteLogger::init(cli.log_level, Config::default(), File::create(&cli.log_file)?)?;
    info!("Starting snekgrid");

    match play(&cli) {
        Ok(score) => {
            info!("exiting with score {}", score);
            println!("Game Over! Final score: {}", score);
            Ok(())
        }
        Err(err) => report_fatal(err),
    }
}
