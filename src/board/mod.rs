//! The live café board.
//!
//! The board is the terminal version of the page: a happy-hour countdown and a
//! hero carousel, each mounted as a section that owns one scheduler timer. The
//! run loop lives here and is the only place that reads the clock, waits,
//! fires timers and handles keys, all on the main thread.
//!
//! On a terminal the board keeps one live status line at the bottom and
//! logs state changes (promotion opening or closing, slide changes) above it.
//! Without a terminal it only logs the changes, plus the countdown once per
//! hour of remaining time.

mod input;
mod sections;

pub use input::{BoardCommand, command_for_key};
pub use sections::{HeroSection, PromoSection};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use crossterm::{
    cursor::MoveToColumn,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::Write;
use std::time::Duration;

use crate::common::constants::BOARD_POLL_SLICE_MS;
use crate::config::Config;
use crate::io::signals::{SignalState, log_signal_message};
use crate::scheduler::Scheduler;
use crate::state::DisplayState;
use crate::time::source;

/// Why the run loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A signal or Ctrl+C on the terminal
    Signal,
    /// The viewer pressed a quit key
    Quit,
    /// Simulated time reached its end
    SimulationEnded,
}

/// The mounted page.
pub struct Board {
    scheduler: Scheduler,
    promo: PromoSection,
    hero: HeroSection,
    live_line: bool,
    /// (is_active, hours) of the last countdown logged without a terminal
    last_logged: Option<(bool, u64)>,
}

impl Board {
    /// Mount both sections at the active time source's current time.
    pub fn mount(config: &Config, scheduler: &Scheduler) -> Result<Self> {
        Self::mount_at(config, scheduler, source::now())
    }

    /// Mount both sections with their timers starting at `start`.
    pub fn mount_at(config: &Config, scheduler: &Scheduler, start: DateTime<Local>) -> Result<Self> {
        let window = config
            .promotion_window()
            .context("invalid promotion window")?;
        let slides = config.slide_set().context("invalid hero slides")?;

        let promo = PromoSection::mount(scheduler, window, start, config.countdown_tick());
        let hero = HeroSection::mount(scheduler, slides, start, config.autoplay_interval());

        Ok(Self {
            scheduler: scheduler.clone(),
            promo,
            hero,
            live_line: false,
            last_logged: None,
        })
    }

    pub fn promo(&self) -> &PromoSection {
        &self.promo
    }

    pub fn hero(&self) -> &HeroSection {
        &self.hero
    }

    /// Fire every timer due at `now`. Returns how many fired.
    pub fn tick(&self, now: DateTime<Local>) -> usize {
        self.scheduler.run_pending(now)
    }

    /// What the board shows, stamped with `now`.
    pub fn snapshot(&self, now: DateTime<Local>) -> DisplayState {
        DisplayState::new(
            now,
            self.promo.window(),
            self.promo.status(),
            &self.hero.carousel(),
        )
    }

    /// Apply a viewer command. Returns `false` when the board should stop.
    pub fn apply(&self, command: BoardCommand) -> bool {
        match command {
            BoardCommand::Next => self.hero.next(),
            BoardCommand::Previous => self.hero.previous(),
            BoardCommand::GoTo(index) => {
                if let Err(e) = self.hero.go_to(index) {
                    log_debug!("Ignoring key: {}", e);
                }
            }
            BoardCommand::Quit => return false,
        }
        true
    }

    /// Run until a signal, a quit key, or the end of a simulation.
    pub fn run(&mut self, signals: &SignalState, interactive: bool) -> Result<StopReason> {
        let slice = Duration::from_millis(BOARD_POLL_SLICE_MS);

        log_block_start!("Board mounted");
        self.log_snapshot(&self.snapshot(source::now()));
        if interactive {
            log_indented!("Keys: ←/→ or h/l to navigate, 1-9 to jump, q to quit");
        }
        self.render(interactive, source::now())?;

        let reason = loop {
            if let Some(message) = signals.poll() {
                self.clear_live_line()?;
                log_signal_message(&message);
                break StopReason::Signal;
            }
            if !signals.is_running() {
                break StopReason::Signal;
            }
            let now = source::now();
            let due = self
                .scheduler
                .time_until_next(now)
                .is_some_and(|until| until.is_zero());
            if due {
                // Callbacks may log, so the live line has to go first
                self.clear_live_line()?;
                self.tick(now);
                self.render(interactive, now)?;
            }

            // Checked after ticking so timers due exactly at the end still fire
            if source::simulation_ended() {
                self.clear_live_line()?;
                log_block_start!("Simulation reached its end time");
                break StopReason::SimulationEnded;
            }

            // Real waits are sliced so signals and keys are noticed promptly
            let until_next = self.scheduler.time_until_next(source::now());
            let wait = if source::is_simulated() {
                until_next.unwrap_or(slice)
            } else {
                until_next.map_or(slice, |until| until.min(slice))
            };

            if !interactive {
                source::sleep(wait);
                continue;
            }

            // Simulated waits are shorter than real ones, so sleep on the
            // simulated clock and only peek at the keyboard
            let command = if source::is_simulated() {
                source::sleep(wait);
                input::poll_command(Duration::ZERO)?
            } else {
                input::poll_command(wait)?
            };

            if let Some(command) = command {
                self.clear_live_line()?;
                if !self.apply(command) {
                    break StopReason::Quit;
                }
                self.render(interactive, source::now())?;
            }
        };

        self.clear_live_line()?;
        Ok(reason)
    }

    fn render(&mut self, interactive: bool, now: DateTime<Local>) -> Result<()> {
        let state = self.snapshot(now);
        if interactive {
            return self.draw_live_line(&state);
        }

        let key = (state.promo.is_active, state.promo.remaining.hours);
        if self.last_logged != Some(key) {
            self.last_logged = Some(key);
            log_decorated!("{}", state.promo_line());
        }
        Ok(())
    }

    fn log_snapshot(&self, state: &DisplayState) {
        log_indented!("Happy hour: {} daily", state.window);
        log_indented!("{}", state.promo_line());
        log_indented!("{}", state.slide_line());
    }

    fn draw_live_line(&mut self, state: &DisplayState) -> Result<()> {
        let line = format!("┃ {}  ┃ {}", state.promo_line(), state.slide_line());
        let mut stdout = std::io::stdout();
        queue!(
            stdout,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(line)
        )
        .context("failed to draw status line")?;
        stdout.flush().context("failed to flush status line")?;
        self.live_line = true;
        Ok(())
    }

    fn clear_live_line(&mut self) -> Result<()> {
        if !self.live_line {
            return Ok(());
        }
        let mut stdout = std::io::stdout();
        queue!(stdout, MoveToColumn(0), Clear(ClearType::CurrentLine))
            .context("failed to clear status line")?;
        stdout.flush().context("failed to flush status line")?;
        self.live_line = false;
        Ok(())
    }

    /// Unmount both sections, cancelling their timers.
    pub fn unmount(self) {
        let Self { promo, hero, .. } = self;
        drop(hero);
        drop(promo);
        log_debug!("Board unmounted, {} timers left", self.scheduler.len());
    }
}
