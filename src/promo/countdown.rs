use serde::{Deserialize, Serialize};
use std::fmt;

/// Whole hours, minutes and seconds left until a window boundary.
///
/// Always built from a fresh `boundary - now` difference. There is no
/// decrement operation, so a late tick cannot make it drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Remaining {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Remaining {
    pub fn from_seconds(total: u64) -> Self {
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_seconds_decomposes() {
        assert_eq!(
            Remaining::from_seconds(3 * 3600 + 4 * 60 + 5),
            Remaining {
                hours: 3,
                minutes: 4,
                seconds: 5
            }
        );
        assert_eq!(Remaining::from_seconds(59).seconds, 59);
        assert_eq!(Remaining::from_seconds(60).minutes, 1);
        assert_eq!(Remaining::from_seconds(0).total_seconds(), 0);
    }

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(Remaining::from_seconds(1).to_string(), "00:00:01");
        assert_eq!(Remaining::from_seconds(21 * 3600).to_string(), "21:00:00");
    }
}
