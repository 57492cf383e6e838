//! Mode state machine
//!
//! Defines the top-level operating modes of the kiosk.
//! The machine is explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::ModeEvent;
pub use machine::Mode;
