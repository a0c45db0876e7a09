//! Help command implementation for happyhour.
//!
//! This module provides a dispatcher for the help command that shows
//! command-specific help or general help based on the arguments provided.

use anyhow::Result;

/// Run the help command (dispatcher)
///
/// # Arguments
/// * `command` - Optional command name to get help for (None = general help)
pub fn run_help_command(command: Option<&str>) -> Result<()> {
    match command {
        None => display_general_help(),
        Some("help" | "h") => display_help_help(),
        Some("status" | "st") => display_status_help(),
        Some("slides" | "sl") => super::slides::display_help(),
        Some("simulate" | "S") => display_simulate_help(),
        Some(unknown) => {
            log_warning_standalone!("Unknown command: {}", unknown);
            display_general_help();
        }
    }
    Ok(())
}

/// Display general help focused on commands (for the help command)
fn display_general_help() {
    log_version!();
    log_block_start!("Available Commands:");
    log_indented!("(none)                  Run the live board");
    log_indented!("status, st [--json]     Show the happy hour countdown once");
    log_indented!("slides, sl              List the hero slides");
    log_indented!("simulate, S <start> <end> [multiplier]");
    log_indented!("                        Run the board with simulated time");
    log_indented!("help, h [COMMAND]       Show detailed help for a command");
    log_pipe!();
    log_info!("Use 'happyhour help <command>' to see detailed help for a specific command.");
    log_indented!("Use 'happyhour --help' to see all options and general usage.");
    log_end!();
}

/// Display help for the help command itself
fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: happyhour help [COMMAND]");
    log_block_start!("Arguments:");
    log_indented!("COMMAND  Optional command to get help for");
    log_indented!("         If omitted, shows general help");
    log_block_start!("Examples:");
    log_indented!("happyhour help");
    log_indented!("happyhour help simulate");
    log_end!();
}

fn display_status_help() {
    log_version!();
    log_block_start!("status - Show the happy hour countdown once");
    log_block_start!("Usage: happyhour status [--json]");
    log_block_start!("Options:");
    log_indented!("-j, --json  Print the board state as JSON");
    log_block_start!("Description:");
    log_indented!("Evaluates the promotion window at the current time and prints");
    log_indented!("whether happy hour is on and how long until it starts or ends.");
    log_block_start!("Examples:");
    log_indented!("happyhour status");
    log_indented!("happyhour status --json | jq .promo.remaining");
    log_end!();
}

fn display_simulate_help() {
    log_version!();
    log_block_start!("simulate - Run the board with simulated time");
    log_block_start!("Usage: happyhour simulate <start> <end> [multiplier] [--log]");
    log_block_start!("Arguments:");
    log_indented!("start       Simulation start, \"YYYY-MM-DD HH:MM:SS\"");
    log_indented!("end         Simulation end, same format, after start");
    log_indented!("multiplier  Simulated seconds per real second (default 3600, max 1000000)");
    log_indented!("            0 fast-forwards through every wait");
    log_block_start!("Options:");
    log_indented!("--log       Write board output to a timestamped log file");
    log_block_start!("Examples:");
    log_indented!("happyhour simulate \"2025-06-01 15:30:00\" \"2025-06-01 19:30:00\"");
    log_indented!("happyhour simulate \"2025-06-01 00:00:00\" \"2025-06-02 00:00:00\" 0 --log");
    log_end!();
}
