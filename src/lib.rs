//! # Happyhour Library
//!
//! Internal library for the happyhour binary: a terminal café board showing a
//! daily happy-hour countdown and a rotating hero carousel.
//!
//! This library exists to enable testing of the internals and provide clean
//! separation between CLI dispatch (main.rs) and application logic.
//!
//! ## Architecture
//!
//! - **Entry Point**: `HappyHour` builder with resource management
//! - **Domain**: `promo` (promotion window and countdown), `carousel` (slide rotation)
//! - **Timers**: `scheduler` with RAII cancellation handles, driven by `time::source`
//! - **Board**: `board` mounts the promo and hero sections and runs the loop
//! - **Configuration**: `config` module for TOML-based settings
//! - **Commands**: `commands` module for CLI subcommands (status, slides, help)
//! - **Infrastructure**: signal handling, logging, terminal utilities

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod common;

// Public API modules
pub mod args;
pub mod board;
pub mod carousel;
pub mod commands;
pub mod config;
pub mod io;
pub mod promo;
pub mod scheduler;
pub mod state;
pub mod time;

mod happyhour;

// Re-export for binary
pub use board::{Board, StopReason};
pub use happyhour::HappyHour;
