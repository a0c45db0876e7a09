//! Structured logging system with visual formatting.
//!
//! This module provides the box-drawing output style used by every part of
//! happyhour: the live board, the one-shot commands and error reporting. All
//! macros route through [`write_output`], which either prints to stdout or,
//! while a [`LoggerGuard`] is alive, forwards ANSI-stripped lines to a log
//! file written by a dedicated thread.
//!
//! Logging can be switched off at runtime (quiet JSON output, tests), and
//! debug lines only appear once debug output has been enabled.

use std::fmt;
use std::io::Write;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Sender, channel};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

// Channel for routing output to file when --log is active
static LOG_CHANNEL: OnceLock<Option<Sender<LogMessage>>> = OnceLock::new();

enum LogMessage {
    Formatted(String),
    Shutdown,
}

/// Main logging interface providing structured output formatting.
///
/// ## Logging Conventions
///
/// - **`log_block_start!`**: starts a new conceptual block (a section mounted,
///   the promotion opening, a slide change). Prints `┃` then `┣ message`.
/// - **`log_decorated!`**: a line inside the current block, `┣ message`.
/// - **`log_indented!`**: nested detail under a block, `┃   message`.
/// - **`log_pipe!`**: an empty `┃` spacer, used before a standalone
///   `log_info!`/`log_warning!`.
/// - **`log_version!`**: the `┏ happyhour vX.Y.Z ━━╸` header, once per run.
/// - **`log_end!`**: the final `╹` marker.
/// - **`log_info!`, `log_warning!`, `log_debug!`**:
///   semantic lines with a coloured `[LEVEL]` tag.
/// - **`log_error_exit!`**: the closing `┗[ERROR]` line when a run fails.
pub struct Log;

impl Log {
    /// Enable or disable logging temporarily.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Check if logging is currently enabled.
    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Enable or disable `log_debug!` output.
    pub fn set_debug(enabled: bool) {
        DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_debug() -> bool {
        DEBUG_ENABLED.load(Ordering::SeqCst)
    }

    /// Start file logging to the specified path.
    ///
    /// Output is written by a background thread until the returned guard is
    /// dropped. Can only be started once per process.
    pub fn start_file_logging(file_path: String) -> anyhow::Result<LoggerGuard> {
        let (tx, rx) = channel();

        LOG_CHANNEL
            .set(Some(tx.clone()))
            .map_err(|_| anyhow::anyhow!("Logger channel already initialized"))?;

        let handle = std::thread::spawn(move || {
            let mut file = std::fs::File::create(&file_path)?;

            loop {
                match rx.recv() {
                    Ok(LogMessage::Formatted(text)) => {
                        file.write_all(text.as_bytes())?;
                    }
                    Ok(LogMessage::Shutdown) | Err(_) => {
                        file.flush()?;
                        break;
                    }
                }
            }

            Ok::<(), anyhow::Error>(())
        });

        Ok(LoggerGuard {
            tx,
            handle: Some(handle),
        })
    }

    /// Timestamp prefix shown while running against simulated time.
    ///
    /// Returns `[HH:MM:SS] ` of the simulated clock, or an empty string when the
    /// real clock is in use.
    pub fn get_timestamp_prefix() -> String {
        // Check this without initializing the time source
        if crate::time::source::is_initialized() && crate::time::source::is_simulated() {
            format!("[{}] ", crate::time::source::now().format("%H:%M:%S"))
        } else {
            String::new()
        }
    }
}

/// Guard for file logging that ensures clean shutdown.
pub struct LoggerGuard {
    tx: Sender<LogMessage>,
    handle: Option<std::thread::JoinHandle<anyhow::Result<()>>>,
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        let _ = self.tx.send(LogMessage::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Remove `ESC [ ... m` colour sequences.
pub(crate) fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == 'm' {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Route a fully formatted line to the active sink.
pub fn write_output(text: &str) {
    if let Some(Some(tx)) = LOG_CHANNEL.get() {
        let _ = tx.send(LogMessage::Formatted(strip_ansi_codes(text)));
    } else if crossterm::terminal::is_raw_mode_enabled().unwrap_or(false) {
        // Raw mode turns off output processing, so `\n` no longer returns the carriage
        print!("{}", text.replace('\n', "\r\n"));
        let _ = std::io::stdout().flush();
    } else {
        print!("{text}");
        let _ = std::io::stdout().flush();
    }
}

/// Shared backend for the logging macros.
///
/// `lead` is printed once before the line (used for the spacer pipe of block
/// starts), `decoration` sits between the timestamp and the message.
#[doc(hidden)]
pub fn emit(lead: bool, decoration: &str, message: fmt::Arguments<'_>) {
    if !Log::is_enabled() {
        return;
    }
    let prefix = Log::get_timestamp_prefix();
    let formatted = if lead {
        format!("{prefix}┃\n{prefix}{decoration}{message}\n")
    } else {
        format!("{prefix}{decoration}{message}\n")
    };
    write_output(&formatted);
}

// # Logging Macros

/// Log a decorated message, typically as part of an existing block.
#[macro_export]
macro_rules! log_decorated {
    ($($arg:tt)*) => {
        $crate::common::logger::emit(false, "┣ ", format_args!($($arg)*))
    };
}

/// Log an indented message for sub-items or details within a block.
#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)*) => {
        $crate::common::logger::emit(false, "┃   ", format_args!($($arg)*))
    };
}

/// Log a visual pipe separator for vertical spacing.
#[macro_export]
macro_rules! log_pipe {
    () => {
        $crate::common::logger::emit(false, "┃", format_args!(""))
    };
}

/// Log a block start message, initiating a new conceptual block of information.
#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)*) => {
        $crate::common::logger::emit(true, "┣ ", format_args!($($arg)*))
    };
}

/// Log the application version header.
#[macro_export]
macro_rules! log_version {
    () => {
        $crate::common::logger::emit(
            false,
            "┏ ",
            format_args!("happyhour v{} ━━╸", env!("CARGO_PKG_VERSION")),
        )
    };
}

/// Log the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {
        $crate::common::logger::emit(false, "╹", format_args!(""))
    };
}

/// Log a warning message with pipe prefix and yellow-colored text.
#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        $crate::common::logger::emit(false, "┣[\x1b[33mWARNING\x1b[0m] ", format_args!($($arg)*))
    };
}

/// Log a warning without the pipe prefix, for output outside a block.
#[macro_export]
macro_rules! log_warning_standalone {
    ($($arg:tt)*) => {
        $crate::common::logger::emit(false, "[\x1b[33mWARNING\x1b[0m] ", format_args!($($arg)*))
    };
}

/// Log an error that terminates the current flow, closing the block with `┗`.
#[macro_export]
macro_rules! log_error_exit {
    ($($arg:tt)*) => {
        $crate::common::logger::emit(true, "┗[\x1b[31mERROR\x1b[0m] ", format_args!($($arg)*))
    };
}

/// Log an informational message with pipe prefix and green-colored text.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::common::logger::emit(false, "┣[\x1b[32mINFO\x1b[0m] ", format_args!($($arg)*))
    };
}

/// Log a debug message. Silent unless debug output is enabled.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if $crate::common::logger::Log::is_debug() {
            $crate::common::logger::emit(false, "┣[\x1b[32mDEBUG\x1b[0m] ", format_args!($($arg)*))
        }
    };
}
