//! Kiosk controller message vocabulary
//!
//! This crate defines the small messages that flow between the kiosk
//! tasks:
//!
//! - [`KeyCode`] / [`KeyEvent`]: what the keypad hands to the controller
//! - [`DisplayCommand`]: what the controller hands to the display task
//!
//! # Key codes
//!
//! ```text
//! ┌────────┬─────────────────────────────────────────────┐
//! │ 0-9    │ digit keys (4-bit matrix)                   │
//! │ 10     │ Confirm '#' (4-bit matrix)                  │
//! │ 11     │ Clear '*' (4-bit matrix)                    │
//! │ 12     │ Identification button (dedicated line)      │
//! │ 13     │ Settings button (dedicated line)            │
//! │ 14-15  │ unassigned, a protocol error for consumers  │
//! └────────┴─────────────────────────────────────────────┘
//! ```
//!
//! The display is a 2x16 character LCD; every text command is truncated
//! to the visible columns before it is queued.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod display;
pub mod keys;

pub use display::{line, DisplayCommand, LineText, LCD_COLS, LCD_ROWS};
pub use keys::{KeyCode, KeyEvent};
