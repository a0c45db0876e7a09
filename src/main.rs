//! Main application entry point and high-level flow coordination.
//!
//! Parses the command line, applies the global options (debug output, custom
//! configuration directory) and dispatches to the live board, the simulation
//! or a one-shot command. Errors from any of them are reported in the box
//! style and turn into a non-zero exit code.

use anyhow::Result;

use happyhour::args::{self, CliAction, ParsedArgs};
use happyhour::common::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use happyhour::common::logger::Log;
use happyhour::{HappyHour, commands, config, log_error_exit, time};

fn main() {
    let parsed_args = ParsedArgs::from_env();

    let code = match run(parsed_args.action) {
        Ok(code) => code,
        Err(e) => {
            log_error_exit!("{}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  caused by: {cause}");
            }
            EXIT_FAILURE
        }
    };

    std::process::exit(code);
}

fn apply_global_options(debug_enabled: bool, config_dir: Option<String>) -> Result<()> {
    Log::set_debug(debug_enabled);
    config::set_config_dir(config_dir)
}

fn run(action: CliAction) -> Result<i32> {
    match action {
        CliAction::Run {
            debug_enabled,
            config_dir,
        } => {
            apply_global_options(debug_enabled, config_dir)?;
            HappyHour::new(debug_enabled).run()?;
        }
        CliAction::StatusCommand {
            debug_enabled,
            config_dir,
            json,
        } => {
            apply_global_options(debug_enabled, config_dir)?;
            commands::status::handle_status_command(json)?;
        }
        CliAction::SlidesCommand {
            debug_enabled,
            config_dir,
        } => {
            apply_global_options(debug_enabled, config_dir)?;
            commands::slides::handle_slides_command()?;
        }
        CliAction::Simulate {
            debug_enabled,
            config_dir,
            start_time,
            end_time,
            multiplier,
            log_to_file,
        } => {
            apply_global_options(debug_enabled, config_dir)?;
            let guards = time::simulate::handle_simulate_command(
                &start_time,
                &end_time,
                multiplier,
                log_to_file,
            )?;
            HappyHour::new(debug_enabled).without_headers().run()?;
            guards.complete_simulation();
        }
        CliAction::HelpCommand { command } => {
            commands::help::run_help_command(command.as_deref())?;
        }
        CliAction::ShowHelp => args::display_help(),
        CliAction::ShowVersion => args::display_version_info(),
        CliAction::ShowHelpDueToError => {
            args::display_help();
            return Ok(EXIT_FAILURE);
        }
    }

    Ok(EXIT_SUCCESS)
}
