//! Command-line command handlers for happyhour.
//!
//! One-shot commands that read the configuration, print something and exit.
//! Each command is implemented in its own submodule.

pub mod help;
pub mod slides;
pub mod status;

use anyhow::Result;

use crate::config::Config;

/// Load the configuration for a one-shot command.
///
/// Uses the same lookup as the board, including creation of the default file.
pub(crate) fn load_config() -> Result<Config> {
    Config::load()
}
