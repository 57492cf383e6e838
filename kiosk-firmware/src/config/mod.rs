//! Configuration loading and parsing
//!
//! Loads configuration from a TOML file, falling back to the copy of
//! kiosk.toml embedded at build time.

pub mod loader;

pub use loader::{load, parse, ConfigError, FirmwareConfig, SimulatedOutcome, SimulationConfig};
