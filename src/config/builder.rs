//! Default configuration file creation.
//!
//! Writes a commented `happyhour.toml` using the same aligned
//! `key = value   # comment` layout for every setting, followed by the
//! built-in hero slides as `[[slides]]` tables.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::carousel::Slide;
use crate::common::constants::*;

/// The café's built-in hero slides.
pub fn default_slides() -> Vec<Slide> {
    vec![
        Slide::new(
            "hero-cafe.jpg",
            "Cafe Chapter One",
            "Est. 2024 • Artisan Coffee",
            "Where every cup tells a story. Experience artisan coffee crafted with passion in a warm, welcoming atmosphere.",
        ),
        Slide::new(
            "hero-slide-2.jpg",
            "Premium Ambiance",
            "Comfort Meets Style",
            "Relax in our beautifully designed space, perfect for work, meetings, or quality time with loved ones.",
        ),
        Slide::new(
            "hero-slide-3.jpg",
            "Crafted with Love",
            "Expert Baristas",
            "Our skilled baristas pour passion into every cup, creating the perfect blend of art and flavor.",
        ),
    ]
}

#[derive(Serialize)]
struct SlidesTable<'a> {
    slides: &'a [Slide],
}

/// Create a default config file at `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let settings = ConfigBuilder::new()
        .add_section("Promotion window")
        .add_setting(
            "promo_start_hour",
            &DEFAULT_PROMO_START_HOUR.to_string(),
            &format!("Hour happy hour opens (0-{})", HOURS_PER_DAY - 2),
        )
        .add_setting(
            "promo_end_hour",
            &DEFAULT_PROMO_END_HOUR.to_string(),
            &format!("Hour happy hour closes (1-{})", HOURS_PER_DAY - 1),
        )
        .add_section("Timers")
        .add_setting(
            "countdown_tick_ms",
            &DEFAULT_COUNTDOWN_TICK_MS.to_string(),
            &format!(
                "Countdown refresh interval ({MINIMUM_COUNTDOWN_TICK_MS}-{MAXIMUM_COUNTDOWN_TICK_MS})ms"
            ),
        )
        .add_setting(
            "autoplay_interval_ms",
            &DEFAULT_AUTOPLAY_INTERVAL_MS.to_string(),
            &format!(
                "Hero carousel autoplay interval ({MINIMUM_AUTOPLAY_INTERVAL_MS}-{MAXIMUM_AUTOPLAY_INTERVAL_MS})ms"
            ),
        )
        .build();

    let slides = default_slides();
    let slides_toml = toml::to_string(&SlidesTable { slides: &slides })
        .context("Failed to serialize default slides")?;

    let content = format!("{settings}\n\n#[Hero slides]\n{slides_toml}");

    fs::write(path, content)
        .with_context(|| format!("Failed to write default config to {}", path.display()))?;

    Ok(())
}

struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry::Section(format!("#[{title}]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    /// Render with every comment aligned one space past the longest setting.
    fn build(self) -> String {
        let max_width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                ConfigEntry::Setting { line, .. } => Some(line.len()),
                ConfigEntry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut result = Vec::new();
        for entry in self.entries {
            match entry {
                ConfigEntry::Section(title) => {
                    if !result.is_empty() {
                        result.push(String::new());
                    }
                    result.push(title);
                }
                ConfigEntry::Setting { line, comment } => {
                    let padding = " ".repeat(max_width - line.len());
                    result.push(format!("{line}{padding}{comment}"));
                }
            }
        }

        result.join("\n")
    }
}
