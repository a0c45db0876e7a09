//! Application coordinator that manages the lifecycle of the live board.
//!
//! This module handles resource acquisition and orchestration:
//! - Terminal setup with RAII guards
//! - Configuration loading
//! - Signal handler setup
//! - Mounting the board on a fresh scheduler and running it
//!
//! The `HappyHour` struct uses a builder pattern to support different startup contexts:
//! - Normal startup: `HappyHour::new(debug_enabled).run()`
//! - Simulation mode: `HappyHour::new(debug_enabled).without_headers().run()`

use anyhow::{Context, Result};

use crate::{
    board::{Board, StopReason},
    common::utils::TerminalGuard,
    config::{self, Config},
    io::signals::setup_signal_handler,
    scheduler::Scheduler,
};

/// Builder for configuring and running the happyhour board.
///
/// # Examples
///
/// ```no_run
/// use happyhour::HappyHour;
///
/// # fn main() -> anyhow::Result<()> {
/// // Normal startup
/// HappyHour::new(false).run()?;
///
/// // Simulation mode: the simulate command has already printed the header
/// HappyHour::new(false).without_headers().run()?;
/// # Ok(())
/// # }
/// ```
pub struct HappyHour {
    debug_enabled: bool,
    show_headers: bool,
}

impl HappyHour {
    /// Create a new runner with defaults matching normal run
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            show_headers: true,
        }
    }

    /// Skip header display (for simulation, which prints its own)
    pub fn without_headers(mut self) -> Self {
        self.show_headers = false;
        self
    }

    /// Load the configuration, mount the board and run it until it stops.
    ///
    /// Every exit path drops the board before the terminal guard, so timers
    /// are cancelled and the terminal is restored whatever stopped the run.
    pub fn run(self) -> Result<StopReason> {
        if self.show_headers {
            log_version!();
        }
        if self.debug_enabled {
            log_pipe!();
            log_debug!("Debug mode enabled - showing timer and slide details");
        }

        let config = Config::load().context("Configuration failed")?;
        let config_path = config::get_config_path().ok();
        config.log_config(config_path.as_deref());

        let signal_state = setup_signal_handler()?;

        // Try to set up raw mode for key navigation
        // This will gracefully handle cases where no terminal is available (e.g., systemd service)
        let terminal = TerminalGuard::new().context("failed to initialize terminal features")?;

        let scheduler = Scheduler::new();
        let mut board = Board::mount(&config, &scheduler)?;
        let reason = board.run(&signal_state, terminal.is_interactive());
        board.unmount();
        drop(terminal);

        let reason = reason?;
        match reason {
            StopReason::Quit | StopReason::Signal => log_block_start!("Shutting down happyhour..."),
            StopReason::SimulationEnded => log_block_start!("Simulation complete"),
        }
        log_end!();

        Ok(reason)
    }
}
