//! Recurring daily promotion window and its countdown.
//!
//! The café runs a happy hour every day between two whole hours. Given the
//! current wall-clock time this module answers two questions: is the window
//! open right now, and how long until the next boundary (closing time while
//! open, opening time while closed, tomorrow's opening after today's close).
//!
//! Evaluation is a pure function of `now`. The board re-evaluates on every
//! countdown tick instead of counting down a stored value, so a delayed or
//! skipped tick shows the correct time on the next one.

mod countdown;

pub use countdown::Remaining;

use anyhow::Result;
use chrono::{DateTime, Duration as ChronoDuration, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::constants::{DEFAULT_PROMO_END_HOUR, DEFAULT_PROMO_START_HOUR, HOURS_PER_DAY};

/// A daily `[start_hour, end_hour)` window on the 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PromotionWindow {
    start_hour: u32,
    end_hour: u32,
}

/// Result of evaluating a window at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoStatus {
    pub is_active: bool,
    pub remaining: Remaining,
    /// Local wall-clock time of the boundary the countdown targets
    pub next_boundary: NaiveDateTime,
}

impl PromotionWindow {
    /// Create a window, rejecting hours outside `[0, 24)` and empty or
    /// inverted intervals.
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self> {
        if start_hour >= HOURS_PER_DAY || end_hour >= HOURS_PER_DAY {
            anyhow::bail!(
                "promotion hours must be between 0 and {} (got {start_hour}-{end_hour})",
                HOURS_PER_DAY - 1
            );
        }
        if start_hour >= end_hour {
            anyhow::bail!(
                "promotion must start before it ends (got {start_hour}:00-{end_hour}:00)"
            );
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    /// Length of the window in whole hours.
    pub fn length_hours(&self) -> u32 {
        self.end_hour - self.start_hour
    }

    /// Start inclusive, end exclusive.
    pub fn is_active_at_hour(&self, hour: u32) -> bool {
        (self.start_hour..self.end_hour).contains(&hour)
    }

    /// Evaluate the window at `now`.
    ///
    /// Boundaries are wall-clock times in `now`'s timezone. If a boundary falls
    /// into a DST gap the countdown uses the wall-clock difference instead.
    pub fn evaluate<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> PromoStatus {
        let hour = now.hour();
        let local_now = now.naive_local();
        let midnight = local_now.date().and_time(NaiveTime::MIN);

        // Offset of the target boundary from today's midnight, in hours
        let boundary_offset = if hour >= self.end_hour {
            HOURS_PER_DAY + self.start_hour
        } else if hour >= self.start_hour {
            self.end_hour
        } else {
            self.start_hour
        };

        let next_boundary = midnight
            .checked_add_signed(ChronoDuration::hours(i64::from(boundary_offset)))
            .unwrap_or(local_now);

        let until_boundary = match now.timezone().from_local_datetime(&next_boundary).earliest() {
            Some(boundary) => boundary.signed_duration_since(now),
            None => next_boundary - local_now,
        };

        PromoStatus {
            is_active: self.is_active_at_hour(hour),
            remaining: Remaining::from_seconds(until_boundary.num_seconds().max(0) as u64),
            next_boundary,
        }
    }
}

impl Default for PromotionWindow {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_PROMO_START_HOUR,
            end_hour: DEFAULT_PROMO_END_HOUR,
        }
    }
}

impl fmt::Display for PromotionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00-{:02}:00", self.start_hour, self.end_hour)
    }
}

impl PromoStatus {
    pub fn display_name(&self) -> &'static str {
        if self.is_active {
            "Happy hour"
        } else {
            "Closed"
        }
    }

    /// What happens at `next_boundary`.
    pub fn next_event(&self) -> &'static str {
        if self.is_active { "ends" } else { "starts" }
    }

    /// `Happy hour starts in 07:00:00` or `Happy hour ends in 01:30:00`.
    pub fn countdown_line(&self) -> String {
        format!("Happy hour {} in {}", self.next_event(), self.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::constants::test_constants::*;
    use chrono::{FixedOffset, NaiveDate};

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<FixedOffset> {
        let naive = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap();
        FixedOffset::east_opt(0)
            .unwrap()
            .from_local_datetime(&naive)
            .unwrap()
    }

    fn window() -> PromotionWindow {
        PromotionWindow::new(TEST_OPEN_HOUR, TEST_CLOSE_HOUR).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_bounds() {
        assert!(PromotionWindow::new(19, 16).is_err());
        assert!(PromotionWindow::new(16, 16).is_err());
        assert!(PromotionWindow::new(16, 24).is_err());
        assert!(PromotionWindow::new(24, 25).is_err());
        assert!(PromotionWindow::new(0, 23).is_ok());
    }

    #[test]
    fn test_default_is_afternoon_happy_hour() {
        assert_eq!(PromotionWindow::default(), window());
        assert_eq!(window().to_string(), "16:00-19:00");
        assert_eq!(window().length_hours(), 3);
    }

    #[test]
    fn test_opening_instant_is_active() {
        let status = window().evaluate(&at(16, 0, 0));
        assert!(status.is_active);
        assert_eq!(status.remaining, Remaining::from_seconds(TEST_WINDOW_SECS));
        assert_eq!(status.next_event(), "ends");
    }

    #[test]
    fn test_closing_instant_targets_tomorrow() {
        let status = window().evaluate(&at(19, 0, 0));
        assert!(!status.is_active);
        assert_eq!(
            status.remaining,
            Remaining {
                hours: 21,
                minutes: 0,
                seconds: 0
            }
        );
        assert_eq!(
            status.next_boundary,
            NaiveDate::from_ymd_opt(2025, 6, 2)
                .unwrap()
                .and_hms_opt(16, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_one_second_before_opening() {
        let status = window().evaluate(&at(15, 59, 59));
        assert!(!status.is_active);
        assert_eq!(
            status.remaining,
            Remaining {
                hours: 0,
                minutes: 0,
                seconds: 1
            }
        );
    }

    #[test]
    fn test_morning_targets_today_opening() {
        let status = window().evaluate(&at(9, 30, 0));
        assert!(!status.is_active);
        assert_eq!(status.remaining.to_string(), "06:30:00");
        assert_eq!(status.display_name(), "Closed");
    }

    #[test]
    fn test_sub_second_part_is_floored() {
        let now = at(18, 59, 58) + ChronoDuration::milliseconds(999);
        let status = window().evaluate(&now);
        assert!(status.is_active);
        assert_eq!(status.remaining.total_seconds(), 1);
    }

    #[test]
    fn test_midnight_and_last_second_of_day() {
        assert_eq!(window().evaluate(&at(0, 0, 0)).remaining.hours, 16);
        let late = window().evaluate(&at(23, 59, 59));
        assert_eq!(late.remaining.total_seconds(), 16 * 3600 + 1);
    }

    #[test]
    fn test_is_active_at_hour() {
        for hour in 0..24 {
            assert_eq!(
                window().is_active_at_hour(hour),
                (16..19).contains(&hour),
                "hour {hour}"
            );
        }
    }

    #[test]
    fn test_countdown_line_names_the_next_event() {
        let closed = window().evaluate(&at(9, 0, 0));
        assert_eq!(closed.countdown_line(), "Happy hour starts in 07:00:00");
        let open = window().evaluate(&at(17, 30, 0));
        assert_eq!(open.countdown_line(), "Happy hour ends in 01:30:00");
    }

    mod dst {
        use super::*;
        use chrono_tz::America::New_York;

        fn new_york(day: u32, hour: u32, minute: u32, first: bool) -> DateTime<chrono_tz::Tz> {
            let month = if day == 9 { 3 } else { 11 };
            let naive = NaiveDate::from_ymd_opt(2025, month, day)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap();
            let mapped = New_York.from_local_datetime(&naive);
            let chosen = if first { mapped.earliest() } else { mapped.latest() };
            chosen.unwrap()
        }

        #[test]
        fn test_boundary_in_spring_gap_uses_wall_clock_difference() {
            // 2025-03-09 02:00 does not exist in New York
            let status = PromotionWindow::new(2, 5)
                .unwrap()
                .evaluate(&new_york(9, 1, 30, true));
            assert!(!status.is_active);
            assert_eq!(status.remaining.to_string(), "00:30:00");
            assert_eq!(
                status.next_boundary,
                NaiveDate::from_ymd_opt(2025, 3, 9)
                    .unwrap()
                    .and_hms_opt(2, 0, 0)
                    .unwrap()
            );
        }

        #[test]
        fn test_boundary_after_spring_gap_counts_elapsed_time() {
            // 01:30 EST to 03:00 EDT is thirty real minutes
            let status = PromotionWindow::new(3, 5)
                .unwrap()
                .evaluate(&new_york(9, 1, 30, true));
            assert_eq!(status.remaining.to_string(), "00:30:00");
        }

        #[test]
        fn test_ambiguous_boundary_takes_earliest_mapping() {
            // 01:00 happens twice on 2025-11-02; the EDT one comes first
            let status = PromotionWindow::new(1, 5)
                .unwrap()
                .evaluate(&new_york(2, 0, 30, true));
            assert!(!status.is_active);
            assert_eq!(status.remaining.to_string(), "00:30:00");
        }

        #[test]
        fn test_boundary_after_fall_back_counts_repeated_hour() {
            // 00:30 EDT to 02:00 EST is two and a half real hours
            let status = PromotionWindow::new(2, 5)
                .unwrap()
                .evaluate(&new_york(2, 0, 30, true));
            assert_eq!(status.remaining.to_string(), "02:30:00");

            // During the repeated hour, the second 01:30 is thirty minutes out
            let status = PromotionWindow::new(0, 2)
                .unwrap()
                .evaluate(&new_york(2, 1, 30, false));
            assert!(status.is_active);
            assert_eq!(status.remaining.to_string(), "00:30:00");
        }
    }
}
