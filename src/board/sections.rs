//! The two live sections of the board.
//!
//! Each section owns exactly one [`TimerHandle`]. The handle lives as long as
//! the section, so dropping a section (or the whole board) is what unmounts it:
//! its callback is unregistered and can never run against torn-down state.

use anyhow::Result;
use chrono::{DateTime, Local};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::carousel::{Carousel, SlideSet};
use crate::common::constants::PROMO_OFFER;
use crate::promo::{PromoStatus, PromotionWindow};
use crate::scheduler::{Scheduler, TimerHandle};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Happy-hour countdown.
///
/// Every tick re-evaluates the window at the tick instant, so the countdown
/// never drifts and a late tick simply shows the correct value.
pub struct PromoSection {
    window: PromotionWindow,
    status: Arc<Mutex<PromoStatus>>,
    _countdown: TimerHandle,
}

impl PromoSection {
    pub fn mount(
        scheduler: &Scheduler,
        window: PromotionWindow,
        start: DateTime<Local>,
        tick: Duration,
    ) -> Self {
        let status = Arc::new(Mutex::new(window.evaluate(&start)));

        let shared = Arc::clone(&status);
        let countdown = scheduler.every_from("promo-countdown", start, tick, move |now| {
            let next = window.evaluate(&now);
            let previous = std::mem::replace(&mut *lock(&shared), next);
            if previous.is_active != next.is_active {
                log_promo_change(&window, &next);
            }
        });

        Self {
            window,
            status,
            _countdown: countdown,
        }
    }

    pub fn window(&self) -> PromotionWindow {
        self.window
    }

    /// Status as of the last tick (or mount).
    pub fn status(&self) -> PromoStatus {
        *lock(&self.status)
    }
}

fn log_promo_change(window: &PromotionWindow, status: &PromoStatus) {
    if status.is_active {
        log_block_start!("Happy hour is open ({}): {}", window, PROMO_OFFER);
        log_indented!("Closes in {}", status.remaining);
    } else {
        log_block_start!("Happy hour is over");
        log_indented!("Opens again in {}", status.remaining);
    }
}

/// Hero carousel with autoplay.
///
/// Autoplay advances unconditionally on its own schedule. Manual navigation
/// changes the slide but leaves the autoplay timer alone.
pub struct HeroSection {
    carousel: Arc<Mutex<Carousel>>,
    _autoplay: TimerHandle,
}

impl HeroSection {
    pub fn mount(
        scheduler: &Scheduler,
        slides: SlideSet,
        start: DateTime<Local>,
        interval: Duration,
    ) -> Self {
        let carousel = Arc::new(Mutex::new(Carousel::new(slides)));

        let shared = Arc::clone(&carousel);
        let autoplay = scheduler.every_from("hero-autoplay", start, interval, move |_| {
            let mut carousel = lock(&shared);
            carousel.next();
            log_slide_change(&carousel);
        });

        Self {
            carousel,
            _autoplay: autoplay,
        }
    }

    pub fn next(&self) {
        let mut carousel = lock(&self.carousel);
        carousel.next();
        log_slide_change(&carousel);
    }

    pub fn previous(&self) {
        let mut carousel = lock(&self.carousel);
        carousel.previous();
        log_slide_change(&carousel);
    }

    pub fn go_to(&self, index: usize) -> Result<()> {
        let mut carousel = lock(&self.carousel);
        carousel.go_to(index)?;
        log_slide_change(&carousel);
        Ok(())
    }

    pub fn current(&self) -> usize {
        lock(&self.carousel).current()
    }

    /// Copy of the carousel as it stands.
    pub fn carousel(&self) -> Carousel {
        lock(&self.carousel).clone()
    }
}

fn log_slide_change(carousel: &Carousel) {
    let slide = carousel.current_slide();
    log_decorated!(
        "{} Slide {}/{}: {}",
        carousel.direction().arrow(),
        carousel.current() + 1,
        carousel.len(),
        slide.title
    );
    log_debug!("Showing {} ({})", slide.image, slide.subtitle);
}
