//! Command-line argument parsing and processing.
//!
//! Arguments are split into global options (`--config`, `--debug`, help and
//! version flags), command-specific flags (`--json`, `--log`) and positional
//! words. The first positional word selects the command; the rest are its
//! arguments. Anything that does not fit produces `ShowHelpDueToError` after
//! a warning naming the problem.

use crate::common::constants::{DEFAULT_SIMULATION_MULTIPLIER, MAXIMUM_SIMULATION_MULTIPLIER};

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the live board
    Run {
        debug_enabled: bool,
        config_dir: Option<String>,
    },
    /// Evaluate the promotion window once and print it
    StatusCommand {
        debug_enabled: bool,
        config_dir: Option<String>,
        json: bool,
    },
    /// List the configured hero slides
    SlidesCommand {
        debug_enabled: bool,
        config_dir: Option<String>,
    },
    /// Run the board against simulated time
    Simulate {
        debug_enabled: bool,
        config_dir: Option<String>,
        start_time: String,
        end_time: String,
        multiplier: f64,
        log_to_file: bool,
    },
    /// Detailed help for one command, or the command overview
    HelpCommand { command: Option<String> },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

fn usage_error(message: &str) -> ParsedArgs {
    log_warning_standalone!("{}", message);
    ParsedArgs {
        action: CliAction::ShowHelpDueToError,
    }
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// `args` includes the program name, as returned by `std::env::args()`.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        // Help and version take precedence over everything else
        if args_vec
            .iter()
            .any(|arg| arg == "--version" || arg == "-V" || arg == "-v")
        {
            return ParsedArgs {
                action: CliAction::ShowVersion,
            };
        }
        if args_vec.iter().any(|arg| arg == "--help" || arg == "-h") {
            return ParsedArgs {
                action: CliAction::ShowHelp,
            };
        }

        let mut debug_enabled = false;
        let mut config_dir: Option<String> = None;
        let mut json = false;
        let mut log_to_file = false;
        let mut positionals: Vec<&str> = Vec::new();

        let mut idx = 0;
        while idx < args_vec.len() {
            let arg = args_vec[idx].as_str();
            match arg {
                "--debug" | "-d" => debug_enabled = true,
                "--config" | "-c" => {
                    let Some(dir) = args_vec.get(idx + 1) else {
                        return usage_error("--config requires a directory argument");
                    };
                    config_dir = Some(dir.clone());
                    idx += 1;
                }
                "--json" | "-j" => json = true,
                "--log" => log_to_file = true,
                _ if arg.starts_with('-') && arg.len() > 1 => {
                    return usage_error(&format!("Unknown option: {arg}"));
                }
                _ => positionals.push(arg),
            }
            idx += 1;
        }

        let (command, command_args) = match positionals.split_first() {
            Some((command, rest)) => (Some(*command), rest),
            None => (None, &[][..]),
        };

        let is_status = matches!(command, Some("status" | "st"));
        let is_simulate = matches!(command, Some("simulate" | "S"));
        if json && !is_status {
            return usage_error("--json is only valid with the status command");
        }
        if log_to_file && !is_simulate {
            return usage_error("--log is only valid with the simulate command");
        }

        let action = match command {
            None => CliAction::Run {
                debug_enabled,
                config_dir,
            },
            Some("status" | "st") => {
                if !command_args.is_empty() {
                    return usage_error("status takes no arguments");
                }
                CliAction::StatusCommand {
                    debug_enabled,
                    config_dir,
                    json,
                }
            }
            Some("slides" | "sl") => {
                if !command_args.is_empty() {
                    return usage_error("slides takes no arguments");
                }
                CliAction::SlidesCommand {
                    debug_enabled,
                    config_dir,
                }
            }
            Some("simulate" | "S") => {
                let (start_time, end_time, multiplier) = match command_args {
                    [start, end] => (*start, *end, DEFAULT_SIMULATION_MULTIPLIER),
                    [start, end, multiplier] => match multiplier.parse::<f64>() {
                        Ok(value) if (0.0..=MAXIMUM_SIMULATION_MULTIPLIER).contains(&value) => {
                            (*start, *end, value)
                        }
                        _ => {
                            return usage_error(&format!(
                                "Invalid multiplier '{multiplier}': use a number up to {MAXIMUM_SIMULATION_MULTIPLIER}, or 0 to fast-forward"
                            ));
                        }
                    },
                    _ => {
                        return usage_error(
                            "Usage: happyhour simulate <start> <end> [multiplier] [--log]",
                        );
                    }
                };
                CliAction::Simulate {
                    debug_enabled,
                    config_dir,
                    start_time: start_time.to_string(),
                    end_time: end_time.to_string(),
                    multiplier,
                    log_to_file,
                }
            }
            Some("help" | "h") => {
                if command_args.len() > 1 {
                    return usage_error("help takes at most one command name");
                }
                CliAction::HelpCommand {
                    command: command_args.first().map(|s| s.to_string()),
                }
            }
            Some(unknown) => return usage_error(&format!("Unknown command: {unknown}")),
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    log_decorated!("{}", env!("CARGO_PKG_DESCRIPTION"));
    log_end!();
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("happyhour [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("(none)                 Run the live board");
    log_indented!("status, st [--json]    Show the happy hour countdown once");
    log_indented!("slides, sl             List the hero slides");
    log_indented!("simulate, S <start> <end> [multiplier] [--log]");
    log_indented!("                       Run the board with simulated time");
    log_indented!("help, h [COMMAND]      Show detailed help for a command");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(args: &[&str]) -> CliAction {
        let mut full = vec!["happyhour"];
        full.extend_from_slice(args);
        ParsedArgs::parse(full).action
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(
            action(&[]),
            CliAction::Run {
                debug_enabled: false,
                config_dir: None,
            }
        );
    }

    #[test]
    fn test_parse_debug_and_config() {
        assert_eq!(
            action(&["-d", "--config", "/tmp/hh"]),
            CliAction::Run {
                debug_enabled: true,
                config_dir: Some("/tmp/hh".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_missing_config_dir() {
        assert_eq!(action(&["--config"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_parse_help_and_version_flags() {
        assert_eq!(action(&["--help"]), CliAction::ShowHelp);
        assert_eq!(action(&["-h"]), CliAction::ShowHelp);
        assert_eq!(action(&["--version"]), CliAction::ShowVersion);
        assert_eq!(action(&["-V"]), CliAction::ShowVersion);
        // Help takes precedence over commands
        assert_eq!(action(&["status", "--help"]), CliAction::ShowHelp);
    }

    #[test]
    fn test_parse_status_command() {
        assert_eq!(
            action(&["status"]),
            CliAction::StatusCommand {
                debug_enabled: false,
                config_dir: None,
                json: false,
            }
        );
        assert_eq!(
            action(&["st", "--json", "-c", "conf"]),
            CliAction::StatusCommand {
                debug_enabled: false,
                config_dir: Some("conf".to_string()),
                json: true,
            }
        );
        assert_eq!(action(&["status", "now"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_parse_slides_command() {
        assert_eq!(
            action(&["sl", "--debug"]),
            CliAction::SlidesCommand {
                debug_enabled: true,
                config_dir: None,
            }
        );
    }

    #[test]
    fn test_parse_simulate_command() {
        assert_eq!(
            action(&["simulate", "2025-06-01 15:00:00", "2025-06-01 20:00:00"]),
            CliAction::Simulate {
                debug_enabled: false,
                config_dir: None,
                start_time: "2025-06-01 15:00:00".to_string(),
                end_time: "2025-06-01 20:00:00".to_string(),
                multiplier: DEFAULT_SIMULATION_MULTIPLIER,
                log_to_file: false,
            }
        );
        assert_eq!(
            action(&["S", "2025-06-01 15:00:00", "2025-06-01 20:00:00", "0", "--log"]),
            CliAction::Simulate {
                debug_enabled: false,
                config_dir: None,
                start_time: "2025-06-01 15:00:00".to_string(),
                end_time: "2025-06-01 20:00:00".to_string(),
                multiplier: 0.0,
                log_to_file: true,
            }
        );
    }

    #[test]
    fn test_parse_simulate_errors() {
        assert_eq!(
            action(&["simulate", "2025-06-01 15:00:00"]),
            CliAction::ShowHelpDueToError
        );
        assert_eq!(
            action(&["simulate", "a", "b", "fast"]),
            CliAction::ShowHelpDueToError
        );
        assert_eq!(
            action(&["simulate", "2025-06-01 15:00:00", "2025-06-01 20:00:00", "1e300"]),
            CliAction::ShowHelpDueToError
        );
        assert_eq!(
            action(&["simulate", "2025-06-01 15:00:00", "2025-06-01 20:00:00", "inf"]),
            CliAction::ShowHelpDueToError
        );
    }

    #[test]
    fn test_parse_help_command() {
        assert_eq!(action(&["help"]), CliAction::HelpCommand { command: None });
        assert_eq!(
            action(&["h", "simulate"]),
            CliAction::HelpCommand {
                command: Some("simulate".to_string())
            }
        );
    }

    #[test]
    fn test_command_specific_flags_are_checked() {
        assert_eq!(action(&["--json"]), CliAction::ShowHelpDueToError);
        assert_eq!(action(&["status", "--log"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_parse_unknown_input() {
        assert_eq!(action(&["--unknown"]), CliAction::ShowHelpDueToError);
        assert_eq!(action(&["reload"]), CliAction::ShowHelpDueToError);
    }
}
