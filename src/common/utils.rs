//! Shared helpers: terminal management and human-readable durations.

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::io::IsTerminal;
use std::path::Path;

/// RAII guard for the interactive board's terminal state.
///
/// Enables raw mode (so single key presses reach the board) and hides the
/// cursor. Both are restored on drop, including on early returns and errors.
/// Keys are read from stdin and the live line goes to stdout, so unless both
/// are terminals (piped output, systemd) the guard is inert.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn new() -> Result<Self> {
        if !wants_raw_mode(std::io::stdin().is_terminal(), std::io::stdout().is_terminal()) {
            return Ok(Self { active: false });
        }

        enable_raw_mode().context("failed to enable raw terminal mode")?;
        execute!(std::io::stdout(), cursor::Hide).context("failed to hide cursor")?;
        Ok(Self { active: true })
    }

    /// Whether key events can be read from the terminal.
    pub fn is_interactive(&self) -> bool {
        self.active
    }
}

fn wants_raw_mode(stdin_is_terminal: bool, stdout_is_terminal: bool) -> bool {
    stdin_is_terminal && stdout_is_terminal
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active {
            let _ = execute!(std::io::stdout(), cursor::Show);
            let _ = disable_raw_mode();
        }
    }
}

/// Format a duration in seconds as a compact `1h5m` / `12m` / `40s` string.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    match (hours, minutes) {
        (0, 0) => format!("{seconds}s"),
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h{m}m"),
    }
}

/// Replace the home directory prefix with `~` for display.
pub fn private_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        return format!("~/{}", stripped.display());
    }
    path.display().to_string()
}
