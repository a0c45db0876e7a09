//! Status command - evaluate the promotion window once.
//!
//! Prints whether happy hour is on right now and the countdown to the next
//! boundary, in the same terms the live board uses. The hero section is shown
//! as it is on a freshly mounted board (first slide, idle).

use anyhow::{Context, Result};

use crate::carousel::Carousel;
use crate::common::constants::PROMO_OFFER;
use crate::common::logger::Log;
use crate::common::utils::format_duration;
use crate::state::DisplayState;
use crate::time::source;

/// Handle the status command.
///
/// # Arguments
/// * `json` - Print the `DisplayState` as pretty JSON instead of text
pub fn handle_status_command(json: bool) -> Result<()> {
    // Keep stdout clean for JSON consumers
    if json {
        Log::set_enabled(false);
    }
    let config = super::load_config();
    if json {
        Log::set_enabled(true);
    }
    let config = config?;

    let window = config.promotion_window()?;
    let carousel = Carousel::new(config.slide_set()?);
    let state = DisplayState::capture(source::now(), window, &carousel);

    output_status(&state, json)
}

/// Output the DisplayState in the requested format.
fn output_status(state: &DisplayState, json: bool) -> Result<()> {
    if json {
        let text =
            serde_json::to_string_pretty(state).context("failed to serialize display state")?;
        println!("{text}");
    } else {
        display_human_readable(state);
    }
    Ok(())
}

/// Display DisplayState in human-readable format.
fn display_human_readable(state: &DisplayState) {
    println!("    Happy hour: {} daily, {}", state.window, PROMO_OFFER);
    println!("        Status: {}", state.promo.display_name());
    println!(
        "     Countdown: {} ({})",
        state.promo.countdown_line(),
        format_duration(state.promo.remaining.total_seconds())
    );
    println!(
        " Next boundary: {}",
        state.promo.next_boundary.format("%Y-%m-%d %H:%M")
    );
    println!(
        "    Hero slide: {}/{} {}",
        state.slide.index + 1,
        state.slide.total,
        state.slide.title
    );
}
