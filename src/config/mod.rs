//! Configuration system for happyhour.
//!
//! Settings live in `happyhour.toml`, searched in:
//! 1. the directory given with `--config <dir>`, or
//! 2. `$XDG_CONFIG_HOME/happyhour/happyhour.toml`.
//!
//! A commented default file is written on first run.
//!
//! ```toml
//! #[Promotion window]
//! promo_start_hour = 16       # Hour happy hour opens (0-22)
//! promo_end_hour = 19         # Hour happy hour closes (1-23)
//!
//! #[Timers]
//! countdown_tick_ms = 1000    # Countdown refresh interval (100-60000)ms
//! autoplay_interval_ms = 6000 # Hero carousel autoplay interval (1000-600000)ms
//!
//! [[slides]]
//! image = "hero-cafe.jpg"
//! title = "Cafe Chapter One"
//! subtitle = "..."
//! description = "..."
//! ```
//!
//! Every field is optional. Missing fields fall back to the defaults in
//! `common::constants` and the built-in café slides. Values are validated
//! when loaded; an invalid file is an error naming the offending field.

pub mod builder;
pub mod loading;
pub mod validation;


use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::carousel::{Slide, SlideSet};
use crate::common::constants::*;
use crate::common::utils::private_path;
use crate::promo::PromotionWindow;

// Re-export public API
pub use builder::{create_default_config, default_slides};
pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};

/// Configuration structure for happyhour settings.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Hour the daily promotion opens (inclusive)
    pub promo_start_hour: Option<u32>,
    /// Hour the daily promotion closes (exclusive)
    pub promo_end_hour: Option<u32>,
    /// Countdown refresh interval in milliseconds
    pub countdown_tick_ms: Option<u64>,
    /// Hero autoplay interval in milliseconds
    pub autoplay_interval_ms: Option<u64>,
    /// Hero slides, in display order
    pub slides: Option<Vec<Slide>>,
}

impl Config {
    /// Load configuration using the module's load function
    pub fn load() -> Result<Self> {
        load()
    }

    /// Load from path using the module's load_from_path function
    pub fn load_from_path(path: &Path) -> Result<Self> {
        load_from_path(path)
    }

    /// Get configuration path using the module's get_config_path function
    pub fn get_config_path() -> Result<PathBuf> {
        get_config_path()
    }

    /// The configured promotion window.
    pub fn promotion_window(&self) -> Result<PromotionWindow> {
        PromotionWindow::new(
            self.promo_start_hour.unwrap_or(DEFAULT_PROMO_START_HOUR),
            self.promo_end_hour.unwrap_or(DEFAULT_PROMO_END_HOUR),
        )
    }

    pub fn countdown_tick(&self) -> Duration {
        Duration::from_millis(self.countdown_tick_ms.unwrap_or(DEFAULT_COUNTDOWN_TICK_MS))
    }

    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(
            self.autoplay_interval_ms
                .unwrap_or(DEFAULT_AUTOPLAY_INTERVAL_MS),
        )
    }

    /// The configured slides, or the built-in set when none are configured.
    pub fn slide_set(&self) -> Result<SlideSet> {
        match &self.slides {
            Some(slides) => SlideSet::new(slides.clone()),
            None => SlideSet::new(default_slides()),
        }
    }

    /// Log the effective configuration.
    pub fn log_config(&self, path: Option<&Path>) {
        match path {
            Some(path) => log_block_start!("Loaded configuration from {}", private_path(path)),
            None => log_block_start!("Using built-in configuration"),
        }

        match self.promotion_window() {
            Ok(window) => log_indented!("Happy hour: {} daily", window),
            Err(e) => log_indented!("Happy hour: invalid ({e})"),
        }
        log_indented!("Countdown tick: {}ms", self.countdown_tick().as_millis());
        log_indented!("Autoplay interval: {}ms", self.autoplay_interval().as_millis());

        let slide_count = self.slides.as_ref().map_or(default_slides().len(), Vec::len);
        let source = if self.slides.is_some() { "configured" } else { "built-in" };
        log_indented!("Hero slides: {} ({})", slide_count, source);
    }
}
