//! Kiosk Hardware Abstraction Layer
//!
//! This crate defines the input-line traits the keypad decoder is written
//! against. Board crates implement them for real GPIO or, for bench use,
//! for emulated lines.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  kiosk-drivers (keypad decoder)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  kiosk-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  kiosk-hal-   │
//!             │   console     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - level read of a digital input
//! - [`gpio::EdgeInput`] - latched falling-edge detection

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;

pub use gpio::{EdgeInput, InputPin};
