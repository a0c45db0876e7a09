//! Application-wide defaults, validation limits and exit codes.

// # Promotion window

/// Hour the daily promotion opens (inclusive).
pub const DEFAULT_PROMO_START_HOUR: u32 = 16;
/// Hour the daily promotion closes (exclusive).
pub const DEFAULT_PROMO_END_HOUR: u32 = 19;

pub const HOURS_PER_DAY: u32 = 24;
/// What happy hour offers.
pub const PROMO_OFFER: &str = "30% off everything";

// # Timers

/// Countdown refresh interval in milliseconds.
pub const DEFAULT_COUNTDOWN_TICK_MS: u64 = 1000;
pub const MINIMUM_COUNTDOWN_TICK_MS: u64 = 100;
pub const MAXIMUM_COUNTDOWN_TICK_MS: u64 = 60_000;

/// Hero carousel autoplay interval in milliseconds.
pub const DEFAULT_AUTOPLAY_INTERVAL_MS: u64 = 6000;
pub const MINIMUM_AUTOPLAY_INTERVAL_MS: u64 = 1000;
pub const MAXIMUM_AUTOPLAY_INTERVAL_MS: u64 = 600_000;

/// Longest single wait of the board loop, so shutdown and key presses stay responsive.
pub const BOARD_POLL_SLICE_MS: u64 = 100;

// # Simulation

/// Default acceleration: one simulated hour per real second.
pub const DEFAULT_SIMULATION_MULTIPLIER: f64 = 3600.0;
/// Fastest linear acceleration: about eleven simulated days per real second.
pub const MAXIMUM_SIMULATION_MULTIPLIER: f64 = 1_000_000.0;

// # Files

pub const CONFIG_DIR_NAME: &str = "happyhour";
pub const CONFIG_FILE_NAME: &str = "happyhour.toml";

// # Exit codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

#[cfg(test)]
pub mod test_constants {
    pub const TEST_OPEN_HOUR: u32 = 16;
    pub const TEST_CLOSE_HOUR: u32 = 19;
    pub const TEST_WINDOW_SECS: u64 = 3 * 3600;
}
