//! Configuration file loader

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use kiosk_core::config::KioskConfig;

/// Built-in configuration (kiosk.toml at build time)
pub const EMBEDDED_CONFIG: &str = include_str!("../../kiosk.toml");

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// How the built-in identification service ends each session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulatedOutcome {
    #[default]
    Complete,
    Failed,
    /// No terminal status; the session deadline ends it
    Silent,
}

/// Built-in identification service behaviour
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub outcome: SimulatedOutcome,
    /// Identity text delivered on completion
    pub name: String,
    /// Delay between status callbacks
    pub step_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            outcome: SimulatedOutcome::Complete,
            name: "Jane Doe\nCustomer".to_string(),
            step_ms: 1500,
        }
    }
}

/// Everything the firmware reads from kiosk.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FirmwareConfig {
    #[serde(flatten)]
    pub kiosk: KioskConfig,
    pub simulation: SimulationConfig,
}

/// Parse and validate configuration text
pub fn parse(text: &str) -> Result<FirmwareConfig, ConfigError> {
    let config: FirmwareConfig = toml::from_str(text)?;
    config
        .kiosk
        .validate()
        .map_err(|e| ConfigError::Invalid(e.as_str()))?;
    if config.simulation.step_ms == 0 {
        return Err(ConfigError::Invalid("simulation.step_ms must not be 0"));
    }
    Ok(config)
}

/// Load configuration from `path`
///
/// A missing file is not an error: the embedded configuration is used
/// instead. A file that exists but cannot be read or parsed is.
pub fn load(path: &Path) -> Result<FirmwareConfig, ConfigError> {
    let config = match fs::read_to_string(path) {
        Ok(text) => {
            info!(path = %path.display(), "loading configuration");
            parse(&text)?
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "config file not found, using built-in configuration");
            parse(EMBEDDED_CONFIG)?
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    log_config_summary(&config);
    Ok(config)
}

fn log_config_summary(config: &FirmwareConfig) {
    let kiosk = &config.kiosk;
    info!(
        phone = %kiosk.payment.phone,
        remote = %format_args!("{}:{}", kiosk.remote_display.host, kiosk.remote_display.port),
        canvas = %format_args!("{}x{}", kiosk.remote_display.width, kiosk.remote_display.height),
        ident_timeout_s = kiosk.identification.timeout_secs,
        simulated_outcome = ?config.simulation.outcome,
        "configuration loaded"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_is_valid() {
        let config = parse(EMBEDDED_CONFIG).unwrap();
        assert_eq!(config.kiosk, KioskConfig::default());
        assert_eq!(config.simulation, SimulationConfig::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse(
            r#"
            [remote_display]
            host = "10.0.0.5"

            [simulation]
            outcome = "silent"
            "#,
        )
        .unwrap();
        assert_eq!(config.kiosk.remote_display.host.as_str(), "10.0.0.5");
        assert_eq!(config.kiosk.remote_display.port, 7760);
        assert_eq!(config.kiosk.payment.phone.as_str(), "9008095");
        assert_eq!(config.simulation.outcome, SimulatedOutcome::Silent);
    }

    #[test]
    fn test_empty_config() {
        let config = parse("").unwrap();
        assert_eq!(config.kiosk, KioskConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = parse("[remote_display]\nport = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = parse("[simulation]\noutcome = \"maybe\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = parse("[payment\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_uses_embedded() {
        let config = load(Path::new("/nonexistent/kiosk.toml")).unwrap();
        assert_eq!(config.kiosk.remote_display.width, 400);
    }
}
