//! Configuration validation functionality.
//!
//! Rejects values the board cannot run with (inverted promotion windows,
//! timer intervals outside their limits, empty slide lists) and warns about
//! ones it can run with but probably should not.

use anyhow::Result;

use super::Config;
use crate::common::constants::*;

/// Validate a loaded configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    let start = config.promo_start_hour.unwrap_or(DEFAULT_PROMO_START_HOUR);
    let end = config.promo_end_hour.unwrap_or(DEFAULT_PROMO_END_HOUR);

    if start >= HOURS_PER_DAY {
        anyhow::bail!(
            "promo_start_hour ({}) must be between 0 and {}",
            start,
            HOURS_PER_DAY - 2
        );
    }
    if end >= HOURS_PER_DAY {
        anyhow::bail!(
            "promo_end_hour ({}) must be between 1 and {}",
            end,
            HOURS_PER_DAY - 1
        );
    }
    if start >= end {
        anyhow::bail!(
            "promo_start_hour ({}) must be earlier than promo_end_hour ({})",
            start,
            end
        );
    }

    if let Some(tick) = config.countdown_tick_ms
        && !(MINIMUM_COUNTDOWN_TICK_MS..=MAXIMUM_COUNTDOWN_TICK_MS).contains(&tick)
    {
        anyhow::bail!(
            "countdown_tick_ms ({} ms) must be between {} and {} milliseconds",
            tick,
            MINIMUM_COUNTDOWN_TICK_MS,
            MAXIMUM_COUNTDOWN_TICK_MS
        );
    }

    if let Some(interval) = config.autoplay_interval_ms
        && !(MINIMUM_AUTOPLAY_INTERVAL_MS..=MAXIMUM_AUTOPLAY_INTERVAL_MS).contains(&interval)
    {
        anyhow::bail!(
            "autoplay_interval_ms ({} ms) must be between {} and {} milliseconds",
            interval,
            MINIMUM_AUTOPLAY_INTERVAL_MS,
            MAXIMUM_AUTOPLAY_INTERVAL_MS
        );
    }

    if let Some(slides) = &config.slides {
        if slides.is_empty() {
            anyhow::bail!("slides must contain at least one slide (remove the key for defaults)");
        }
        for (index, slide) in slides.iter().enumerate() {
            if slide.title.trim().is_empty() {
                anyhow::bail!("slide {} has an empty title", index + 1);
            }
        }
    }

    log_validation_warnings(config);

    Ok(())
}

fn log_validation_warnings(config: &Config) {
    let tick = config.countdown_tick_ms.unwrap_or(DEFAULT_COUNTDOWN_TICK_MS);
    if tick > DEFAULT_COUNTDOWN_TICK_MS {
        log_pipe!();
        log_warning!(
            "countdown_tick_ms is {}ms; the countdown will skip seconds between refreshes",
            tick
        );
    }

    if let Some(slides) = &config.slides {
        for (index, slide) in slides.iter().enumerate() {
            if slide.image.trim().is_empty() {
                log_pipe!();
                log_warning!("slide {} ('{}') has no image", index + 1, slide.title);
            }
        }
    }
}
