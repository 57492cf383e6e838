//! Board-agnostic core logic for the kiosk controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware or network implementations:
//!
//! - Mode state machine (amount entry, identification, settings, error)
//! - Amount entry rules
//! - Identification session filtering and status lifecycle
//! - Screen layouts as display command sequences
//! - The mode controller that ties them together
//! - Collaborator traits the controller drives (display queue, artifact
//!   rendering, render push, identification provider, timers)
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod amount;
pub mod config;
pub mod controller;
pub mod error;
pub mod ident;
pub mod screens;
pub mod state;
pub mod traits;
