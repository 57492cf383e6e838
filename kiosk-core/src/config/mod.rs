//! Configuration types
//!
//! Board-agnostic configuration structures, deserialised from TOML by the
//! firmware when the `serde` feature is enabled.

pub mod types;

pub use types::*;
