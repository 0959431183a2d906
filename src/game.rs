use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info, warn};
use rand::Rng;
use snekgrid::{BoardLayout, Cell, Direction, FrameOutcome, GameSession, Status};
use std::io::{stdout, Stdout, Write};
use std::time::{Duration, Instant};

/// Lines above the board for score, status and the energy meter.
const HEADER: u16 = 2;
const ENERGY_BAR: usize = 20;
const INPUT_POLL: Duration = Duration::from_millis(10);

fn glyph(cell: Cell) -> char {
    if cell.wall {
        '#'
    } else if cell.head {
        'O'
    } else if cell.body {
        'o'
    } else if cell.fruit {
        '*'
    } else {
        ' '
    }
}

/// Raw mode and the alternate screen, undone on drop.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Hide)?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = execute!(stdout(), Show, LeaveAlternateScreen) {
            error!("failed to leave alternate screen: {}", err);
        }
        if let Err(err) = terminal::disable_raw_mode() {
            error!("failed to disable raw mode: {}", err);
        }
    }
}

/// Terminal host for a [`GameSession`]: owns the tick timer, turns keys into
/// session calls and redraws after each completed frame.
pub struct Game<R> {
    session: GameSession<R>,
    layout: BoardLayout,
    last_update: Instant,
    dirty: bool,
    quit: bool,
}

impl<R: Rng> Game<R> {
    pub fn new(session: GameSession<R>, layout: BoardLayout) -> Self {
        Game {
            session,
            layout,
            last_update: Instant::now(),
            dirty: true,
            quit: false,
        }
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        if key.kind == KeyEventKind::Release {
            return Ok(());
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                self.session.set_direction(Direction::Up)
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                self.session.set_direction(Direction::Down)
            }
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.session.set_direction(Direction::Left)
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                self.session.set_direction(Direction::Right)
            }
            KeyCode::Enter | KeyCode::Char('p') => {
                self.session.toggle_pause();
                self.last_update = Instant::now();
            }
            KeyCode::Char(' ') => {
                let wanted = !self.session.is_boosting();
                if wanted && !self.session.set_boost(true) {
                    info!("boost unavailable at energy {}", self.session.energy().level());
                } else if !wanted {
                    self.session.set_boost(false);
                }
            }
            KeyCode::Char('r') => self.session.reset()?,
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => return Ok(()),
        }
        self.dirty = true;
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.layout = self.layout.centred(width, height, HEADER);
        if !self.layout.fits(width, height) {
            warn!(
                "terminal {}x{} is smaller than the {}x{} board",
                width, height, self.layout.width, self.layout.height
            );
        }
        self.dirty = true;
    }

    /// Advance once the current cadence's interval has passed.
    fn tick(&mut self) -> anyhow::Result<()> {
        if self.session.status() != Status::Running {
            return Ok(());
        }
        if self.last_update.elapsed() < self.session.tick_interval() {
            return Ok(());
        }
        self.last_update = Instant::now();
        if let Some(outcome) = self.session.advance_frame()? {
            if outcome == FrameOutcome::Collision {
                info!("final score {}", self.session.score());
            }
            self.dirty = true;
        }
        Ok(())
    }

    fn status_line(&self) -> String {
        let status = match self.session.status() {
            Status::Paused => "PAUSED - Enter to play",
            Status::Running if self.session.is_boosting() => "BOOST",
            Status::Running => "",
            Status::GameOver => "GAME OVER - r to restart",
        };
        let energy = self.session.energy();
        let filled = (energy.ratio() * ENERGY_BAR as f32).round() as usize;
        format!(
            "Score: {:<6} Energy [{}{}] {:>3}  {}",
            self.session.score(),
            "=".repeat(filled),
            " ".repeat(ENERGY_BAR - filled.min(ENERGY_BAR)),
            energy.level(),
            status
        )
    }

    fn draw(&mut self, out: &mut Stdout) -> std::io::Result<()> {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0), Print(self.status_line()))?;
        queue!(
            out,
            MoveTo(0, 1),
            Print("Arrows/WASD move, Enter pause, Space boost, r reset, q quit")
        )?;

        for (pos, cell) in self.session.grid().cells() {
            let rect = self.layout.cell_rect(pos);
            let ch = glyph(cell);
            let run: String = std::iter::repeat(ch).take(usize::from(rect.width)).collect();
            for line in 0..rect.height {
                queue!(out, MoveTo(rect.left, rect.top + line), Print(&run))?;
            }
        }

        out.flush()?;
        self.dirty = false;
        Ok(())
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut out = stdout();
        let (width, height) = terminal::size()?;
        self.resize(width, height);

        while !self.quit {
            if self.dirty {
                self.draw(&mut out)?;
            }

            if event::poll(INPUT_POLL)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key)?,
                    Event::Resize(width, height) => self.resize(width, height),
                    _ => {}
                }
            }

            self.tick()?;
        }
        Ok(())
    }
}
