//! Implementation of the `simulate` command.
//!
//! Installs a simulated time source so the board runs through hours of
//! promotion countdown and autoplay in seconds. The board itself is unchanged:
//! it reads the same global clock and sleeps through the same time source.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::sync::Arc;

use crate::common::constants::MAXIMUM_SIMULATION_MULTIPLIER;
use crate::common::logger::{Log, LoggerGuard};
use crate::common::utils::format_duration;
use crate::time::source::{self, SimulatedTimeSource};

/// Guards that need to stay alive for the duration of the simulation.
pub struct SimulationGuards {
    logger_guard: Option<LoggerGuard>,
    log_file: Option<String>,
}

impl SimulationGuards {
    /// Finish the simulation, flushing the log file if one is in use.
    pub fn complete_simulation(mut self) {
        if let Some(guard) = self.logger_guard.take() {
            // Dropping the guard joins the writer thread, so the file is complete
            drop(guard);
            if let Some(path) = &self.log_file {
                println!("┣ Simulation complete, output written to {path}");
                println!("╹");
            }
        }
    }
}

/// Validated simulation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationPlan {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    /// `0.0` fast-forwards
    pub multiplier: f64,
}

impl SimulationPlan {
    pub fn parse(start: &str, end: &str, multiplier: f64) -> Result<Self> {
        let start = source::parse_datetime(start).context("Invalid start time")?;
        let end = source::parse_datetime(end).context("Invalid end time")?;

        if end <= start {
            anyhow::bail!("End time must be after start time");
        }
        if !(0.0..=MAXIMUM_SIMULATION_MULTIPLIER).contains(&multiplier) {
            anyhow::bail!(
                "Multiplier must be between 0 and {MAXIMUM_SIMULATION_MULTIPLIER} (0 fast-forwards)"
            );
        }

        Ok(Self {
            start,
            end,
            multiplier,
        })
    }

    pub fn is_fast_forward(&self) -> bool {
        self.multiplier == 0.0
    }

    pub fn simulated_seconds(&self) -> u64 {
        (self.end - self.start).num_seconds().max(0) as u64
    }
}

/// Set up simulated time for the board.
///
/// With `log_to_file` the board's output goes to a timestamped log file and
/// only the header stays on the terminal.
pub fn handle_simulate_command(
    start: &str,
    end: &str,
    multiplier: f64,
    log_to_file: bool,
) -> Result<SimulationGuards> {
    let plan = SimulationPlan::parse(start, end, multiplier)?;

    log_version!();
    log_block_start!("Simulation mode");
    log_simulation_details(&plan);

    let mut guards = SimulationGuards {
        logger_guard: None,
        log_file: None,
    };

    if log_to_file {
        let log_filename = format!(
            "happyhour-simulation-{}.log",
            Local::now().format("%Y%m%d-%H%M%S")
        );
        log_block_start!("Logging simulation output to: {}", log_filename);

        guards.logger_guard = Some(Log::start_file_logging(log_filename.clone())?);
        guards.log_file = Some(log_filename);
    }

    source::init_time_source(Arc::new(SimulatedTimeSource::new(
        plan.start,
        plan.end,
        plan.multiplier,
    )));

    if log_to_file {
        // Repeat the header in the file, now with simulated timestamps
        log_version!();
        log_block_start!("Simulation mode");
        log_simulation_details(&plan);
    }
    log_debug!("Simulated time source initialized");

    Ok(guards)
}

fn log_simulation_details(plan: &SimulationPlan) {
    log_indented!("Start: {}", plan.start.format("%Y-%m-%d %H:%M:%S"));
    log_indented!("End:   {}", plan.end.format("%Y-%m-%d %H:%M:%S"));
    log_indented!("Span:  {}", format_duration(plan.simulated_seconds()));

    if plan.is_fast_forward() {
        log_indented!("Speed: fast-forward");
    } else {
        let real_seconds = plan.simulated_seconds() as f64 / plan.multiplier;
        log_indented!(
            "Speed: {}x (about {:.1}s real time)",
            plan.multiplier,
            real_seconds
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_parses_valid_range() {
        let plan = SimulationPlan::parse("2025-06-01 15:00:00", "2025-06-01 20:00:00", 3600.0)
            .unwrap();
        assert_eq!(plan.simulated_seconds(), 5 * 3600);
        assert!(!plan.is_fast_forward());
    }

    #[test]
    fn test_plan_rejects_inverted_range() {
        let err = SimulationPlan::parse("2025-06-01 20:00:00", "2025-06-01 15:00:00", 60.0)
            .unwrap_err();
        assert!(err.to_string().contains("after start"));
        assert!(
            SimulationPlan::parse("2025-06-01 15:00:00", "2025-06-01 15:00:00", 60.0).is_err()
        );
    }

    #[test]
    fn test_plan_rejects_bad_input() {
        assert!(SimulationPlan::parse("yesterday", "2025-06-01 15:00:00", 60.0).is_err());
        assert!(
            SimulationPlan::parse("2025-06-01 15:00:00", "2025-06-01 16:00:00", -2.0).is_err()
        );
        assert!(
            SimulationPlan::parse("2025-06-01 15:00:00", "2025-06-01 16:00:00", f64::NAN)
                .is_err()
        );
    }

    #[test]
    fn test_plan_rejects_runaway_multiplier() {
        let start = "2025-06-01 15:00:00";
        let end = "2025-06-01 20:00:00";
        assert!(SimulationPlan::parse(start, end, 1e15).is_err());
        assert!(SimulationPlan::parse(start, end, f64::INFINITY).is_err());
        assert!(SimulationPlan::parse(start, end, MAXIMUM_SIMULATION_MULTIPLIER).is_ok());
    }

    #[test]
    fn test_zero_multiplier_fast_forwards() {
        let plan =
            SimulationPlan::parse("2025-06-01 15:00:00", "2025-06-01 16:00:00", 0.0).unwrap();
        assert!(plan.is_fast_forward());
    }
}
