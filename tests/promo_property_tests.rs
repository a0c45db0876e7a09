use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use happyhour::promo::PromotionWindow;
use proptest::prelude::*;

const DAY_SECS: u64 = 24 * 3600;

/// Generate valid (start, end) hour pairs
fn window_strategy() -> impl Strategy<Value = (u32, u32)> {
    (0u32..23).prop_flat_map(|start| (Just(start), (start + 1)..24))
}

/// Generate a second of the day
fn second_of_day_strategy() -> impl Strategy<Value = u32> {
    0u32..(DAY_SECS as u32)
}

/// A fixed-offset instant on an ordinary day, free of DST effects
fn instant(offset_hours: i32, second_of_day: u32) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(offset_hours * 3600).unwrap();
    let naive = NaiveDate::from_ymd_opt(2025, 3, 12)
        .unwrap()
        .and_hms_opt(second_of_day / 3600, (second_of_day / 60) % 60, second_of_day % 60)
        .unwrap();
    offset.from_local_datetime(&naive).unwrap()
}

/// Seconds until the next boundary, computed directly from the definition
fn expected_remaining(start: u32, end: u32, second_of_day: u32) -> u64 {
    let now = u64::from(second_of_day);
    let (start, end) = (u64::from(start) * 3600, u64::from(end) * 3600);
    if now < start {
        start - now
    } else if now < end {
        end - now
    } else {
        DAY_SECS - now + start
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        ..ProptestConfig::default()
    })]

    /// Active exactly while start <= hour < end
    #[test]
    fn test_active_matches_hour_range(
        (start, end) in window_strategy(),
        second in second_of_day_strategy(),
    ) {
        let window = PromotionWindow::new(start, end).unwrap();
        let status = window.evaluate(&instant(0, second));
        let hour = second / 3600;
        prop_assert_eq!(status.is_active, start <= hour && hour < end);
        prop_assert_eq!(status.is_active, window.is_active_at_hour(hour));
    }

    /// The countdown always targets the next boundary and never exceeds a day
    #[test]
    fn test_remaining_matches_next_boundary(
        (start, end) in window_strategy(),
        second in second_of_day_strategy(),
        offset in -12i32..=14,
    ) {
        let window = PromotionWindow::new(start, end).unwrap();
        let status = window.evaluate(&instant(offset, second));
        let remaining = status.remaining.total_seconds();

        prop_assert_eq!(remaining, expected_remaining(start, end, second));
        prop_assert!(remaining > 0);
        prop_assert!(remaining <= DAY_SECS);
        prop_assert!(status.remaining.minutes < 60 && status.remaining.seconds < 60);
    }

    /// One second later the countdown is one second shorter, unless a boundary was crossed
    #[test]
    fn test_countdown_decreases_by_one_second(
        (start, end) in window_strategy(),
        second in 0u32..(DAY_SECS as u32 - 1),
    ) {
        let window = PromotionWindow::new(start, end).unwrap();
        let now = instant(0, second);
        let before = window.evaluate(&now);
        let after = window.evaluate(&(now + Duration::seconds(1)));

        if before.is_active == after.is_active {
            prop_assert_eq!(
                before.remaining.total_seconds() - 1,
                after.remaining.total_seconds()
            );
        } else {
            prop_assert_eq!(before.remaining.total_seconds(), 1);
        }
    }

    /// Sub-second parts are floored, never rounded up
    #[test]
    fn test_remaining_is_floored(
        (start, end) in window_strategy(),
        second in second_of_day_strategy(),
        millis in 1i64..1000,
    ) {
        let window = PromotionWindow::new(start, end).unwrap();
        let whole = window.evaluate(&instant(0, second));
        let fractional = window.evaluate(&(instant(0, second) + Duration::milliseconds(millis)));

        if whole.is_active == fractional.is_active {
            prop_assert_eq!(
                fractional.remaining.total_seconds(),
                whole.remaining.total_seconds() - 1
            );
        }
    }

    /// Inverted, empty and out-of-range windows are rejected
    #[test]
    fn test_invalid_windows_rejected(start in 0u32..40, end in 0u32..40) {
        let valid = start < end && end < 24;
        prop_assert_eq!(PromotionWindow::new(start, end).is_ok(), valid);
    }
}

#[test]
fn test_evaluation_is_timezone_relative() {
    // The same instant is 15:30 in UTC and 17:30 two hours east
    let utc = Utc.with_ymd_and_hms(2025, 3, 12, 15, 30, 0).unwrap();
    let east = utc.with_timezone(&FixedOffset::east_opt(2 * 3600).unwrap());
    let window = PromotionWindow::default();

    let closed = window.evaluate(&utc);
    assert!(!closed.is_active);
    assert_eq!(closed.remaining.to_string(), "00:30:00");

    let open = window.evaluate(&east);
    assert!(open.is_active);
    assert_eq!(open.remaining.to_string(), "01:30:00");
}
