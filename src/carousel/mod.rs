//! Hero carousel: a fixed slide list and the rotation state machine over it.
//!
//! The carousel only knows its slides, which one is showing and which way it
//! last moved. Autoplay lives outside (the hero section registers a scheduler
//! timer that calls [`Carousel::next`]), so manual navigation and autoplay go
//! through exactly the same transitions.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One hero slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Image reference (asset path or URL)
    #[serde(default)]
    pub image: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
}

impl Slide {
    pub fn new(image: &str, title: &str, subtitle: &str, description: &str) -> Self {
        Self {
            image: image.to_string(),
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            description: description.to_string(),
        }
    }
}

/// Non-empty ordered slide list, fixed once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideSet {
    slides: Vec<Slide>,
}

impl SlideSet {
    pub fn new(slides: Vec<Slide>) -> Result<Self> {
        if slides.is_empty() {
            anyhow::bail!("a carousel needs at least one slide");
        }
        Ok(Self { slides })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    // Never empty, kept for clippy's len_without_is_empty
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slide> {
        self.slides.iter()
    }
}

/// Which way the carousel last moved. Only used to pick a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Backward = -1,
    Idle = 0,
    Forward = 1,
}

impl Direction {
    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Backward => "◀",
            Direction::Idle => "•",
            Direction::Forward => "▶",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Backward => "backward",
            Direction::Idle => "idle",
            Direction::Forward => "forward",
        };
        f.write_str(name)
    }
}

/// Rotation state over a [`SlideSet`].
///
/// `current` is always a valid index; every transition wraps modulo the
/// slide count.
#[derive(Debug, Clone)]
pub struct Carousel {
    slides: SlideSet,
    current: usize,
    direction: Direction,
}

impl Carousel {
    pub fn new(slides: SlideSet) -> Self {
        Self {
            slides,
            current: 0,
            direction: Direction::Idle,
        }
    }

    pub fn next(&mut self) {
        self.current = (self.current + 1) % self.slides.len();
        self.direction = Direction::Forward;
    }

    pub fn previous(&mut self) {
        let len = self.slides.len();
        self.current = (self.current + len - 1) % len;
        self.direction = Direction::Backward;
    }

    /// Jump to `index`.
    ///
    /// Direction is forward when moving to a higher index and backward
    /// otherwise, including a jump to the slide already showing.
    pub fn go_to(&mut self, index: usize) -> Result<()> {
        if index >= self.slides.len() {
            anyhow::bail!(
                "slide {} does not exist (carousel has {} slides)",
                index + 1,
                self.slides.len()
            );
        }
        self.direction = if index > self.current {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.current = index;
        Ok(())
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_slide(&self) -> &Slide {
        &self.slides.slides[self.current]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &SlideSet {
        &self.slides
    }
}
