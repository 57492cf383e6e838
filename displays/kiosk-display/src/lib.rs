//! Character display abstraction for the kiosk
//!
//! This crate provides:
//! - `CharacterDisplay` trait for the physical two-line LCD
//! - `DisplaySink`, which applies queued `DisplayCommand`s to a display
//! - `Screen`, an in-memory LCD model used by the console board and tests
//!
//! # Architecture
//!
//! The display task is the only owner of the LCD. Every other part of the
//! controller expresses display intent as `DisplayCommand`s on a queue and
//! the sink applies them one at a time, in the order they were queued.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod backend;
pub mod screen;
pub mod sink;

// Re-export key types
pub use backend::{CharacterDisplay, DisplayError};
pub use screen::Screen;
pub use sink::DisplaySink;
