//! Runtime state shared between the board and the one-shot commands.

pub mod display;

pub use display::{DisplayState, SlideState};
