//! Hardware driver implementations
//!
//! This crate turns raw input lines from a board support crate into the
//! symbolic events the kiosk core consumes:
//!
//! - Keypad matrix encoder plus the two dedicated function buttons

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod keypad;

pub use keypad::Keypad;
