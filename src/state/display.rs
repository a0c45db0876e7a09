//! Snapshot of what the board currently shows.
//!
//! `DisplayState` bundles the promo evaluation and the hero position at one
//! instant. It is what `status --json` prints and what the board renders from,
//! so both read the same values.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::carousel::{Carousel, Direction};
use crate::promo::{PromoStatus, PromotionWindow};

/// Hero carousel position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideState {
    /// Zero-based index of the slide showing
    pub index: usize,
    pub total: usize,
    pub title: String,
    pub direction: Direction,
}

/// Everything the board shows at `taken_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayState {
    pub taken_at: DateTime<Local>,
    pub window: PromotionWindow,
    pub promo: PromoStatus,
    pub slide: SlideState,
}

impl SlideState {
    pub fn from_carousel(carousel: &Carousel) -> Self {
        Self {
            index: carousel.current(),
            total: carousel.len(),
            title: carousel.current_slide().title.clone(),
            direction: carousel.direction(),
        }
    }
}

impl DisplayState {
    pub fn new(
        taken_at: DateTime<Local>,
        window: PromotionWindow,
        promo: PromoStatus,
        carousel: &Carousel,
    ) -> Self {
        Self {
            taken_at,
            window,
            promo,
            slide: SlideState::from_carousel(carousel),
        }
    }

    /// Evaluate `window` at `now` and capture `carousel` as it stands.
    pub fn capture(now: DateTime<Local>, window: PromotionWindow, carousel: &Carousel) -> Self {
        Self::new(now, window, window.evaluate(&now), carousel)
    }

    /// One-line promo rendering: `Happy hour ends in 01:23:45`.
    pub fn promo_line(&self) -> String {
        self.promo.countdown_line()
    }

    /// One-line hero rendering: `→ [2/3] Premium Ambiance`.
    pub fn slide_line(&self) -> String {
        format!(
            "{} [{}/{}] {}",
            self.slide.direction.arrow(),
            self.slide.index + 1,
            self.slide.total,
            self.slide.title
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::{Slide, SlideSet};
    use crate::time::source::parse_datetime;

    fn carousel() -> Carousel {
        Carousel::new(
            SlideSet::new(vec![
                Slide::new("a.jpg", "First", "", ""),
                Slide::new("b.jpg", "Second", "", ""),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_capture_evaluates_window() {
        let now = parse_datetime("2025-06-01 17:30:00").unwrap();
        let state = DisplayState::capture(now, PromotionWindow::default(), &carousel());

        assert!(state.promo.is_active);
        assert_eq!(state.promo_line(), "Happy hour ends in 01:30:00");
        assert_eq!(state.slide.index, 0);
        assert_eq!(state.slide.total, 2);
    }

    #[test]
    fn test_slide_line_tracks_direction() {
        let now = parse_datetime("2025-06-01 09:00:00").unwrap();
        let mut carousel = carousel();
        carousel.next();
        let state = DisplayState::capture(now, PromotionWindow::default(), &carousel);

        assert_eq!(state.slide.direction, Direction::Forward);
        assert!(state.slide_line().ends_with("[2/2] Second"));
        assert_eq!(state.promo_line(), "Happy hour starts in 07:00:00");
    }

    #[test]
    fn test_serializes_to_json() {
        let now = parse_datetime("2025-06-01 16:00:00").unwrap();
        let state = DisplayState::capture(now, PromotionWindow::default(), &carousel());
        let json: serde_json::Value = serde_json::to_value(&state).unwrap();

        assert_eq!(json["promo"]["is_active"], true);
        assert_eq!(json["promo"]["remaining"]["hours"], 3);
        assert_eq!(json["window"]["start_hour"], 16);
        assert_eq!(json["slide"]["direction"], "idle");
        assert_eq!(json["slide"]["title"], "First");
    }
}
