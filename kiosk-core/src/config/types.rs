//! Configuration type definitions
//!
//! Every field has a default so that a partial (or missing) config file
//! still yields a usable kiosk.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::controller::{ControllerSettings, MAX_ADDR_LEN};
use crate::error::bounded;

/// Maximum merchant phone number length
pub const MAX_PHONE_LEN: usize = 16;

/// Maximum payment message length in bytes
pub const MAX_MESSAGE_LEN: usize = 64;

/// Maximum mask length
pub const MAX_MASK_LEN: usize = 8;

/// Maximum host name length
pub const MAX_HOST_LEN: usize = 64;

/// Largest canvas edge accepted for the remote display
pub const MAX_CANVAS_EDGE: u16 = 2048;

/// Payment request content
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PaymentConfig {
    /// Merchant phone number
    pub phone: String<MAX_PHONE_LEN>,
    /// Message attached to every payment
    pub message: String<MAX_MESSAGE_LEN>,
    /// Which payment fields the payer may edit
    pub mask: String<MAX_MASK_LEN>,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            phone: bounded("9008095"),
            message: bounded("Röda korset"),
            mask: bounded("4"),
        }
    }
}

/// Remote e-ink display service
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RemoteDisplayConfig {
    pub host: String<MAX_HOST_LEN>,
    pub port: u16,
    /// Canvas width in pixels
    pub width: u16,
    /// Canvas height in pixels
    pub height: u16,
    /// Request timeout
    pub timeout_ms: u32,
}

impl Default for RemoteDisplayConfig {
    fn default() -> Self {
        Self {
            host: bounded("192.168.1.186"),
            port: 7760,
            width: 400,
            height: 300,
            timeout_ms: 15_000,
        }
    }
}

/// Identification service
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IdentificationConfig {
    /// Address registered with the service for callbacks
    pub end_user_addr: String<MAX_ADDR_LEN>,
    /// Session deadline in seconds
    pub timeout_secs: u32,
}

impl Default for IdentificationConfig {
    fn default() -> Self {
        Self {
            end_user_addr: bounded("127.0.0.1"),
            timeout_secs: 180,
        }
    }
}

/// Keypad sampling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KeypadConfig {
    /// Interval between line samples
    pub poll_interval_ms: u32,
    /// Matrix edges within this window after a key are ignored
    pub debounce_ms: u32,
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1,
            debounce_ms: 2,
        }
    }
}

/// Complete kiosk configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KioskConfig {
    pub payment: PaymentConfig,
    pub remote_display: RemoteDisplayConfig,
    pub identification: IdentificationConfig,
    pub keypad: KeypadConfig,
}

/// Configuration rejected by [`KioskConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyPhone,
    EmptyHost,
    ZeroPort,
    /// Width or height is zero or larger than [`MAX_CANVAS_EDGE`]
    CanvasSize,
    /// The scan code does not fit beside its left margin
    CanvasTooNarrow,
    ZeroTimeout,
    ZeroPollInterval,
}

impl ValidationError {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationError::EmptyPhone => "payment.phone must not be empty",
            ValidationError::EmptyHost => "remote_display.host must not be empty",
            ValidationError::ZeroPort => "remote_display.port must not be 0",
            ValidationError::CanvasSize => "remote_display width/height out of range",
            ValidationError::CanvasTooNarrow => "remote_display.width too small for the QR code",
            ValidationError::ZeroTimeout => "timeouts must be greater than 0",
            ValidationError::ZeroPollInterval => "keypad.poll_interval_ms must not be 0",
        }
    }
}

/// Left margin of the scan code on the remote canvas
pub const QR_LEFT_MARGIN: u16 = 50;

impl KioskConfig {
    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.payment.phone.is_empty() {
            return Err(ValidationError::EmptyPhone);
        }

        let remote = &self.remote_display;
        if remote.host.is_empty() {
            return Err(ValidationError::EmptyHost);
        }
        if remote.port == 0 {
            return Err(ValidationError::ZeroPort);
        }
        let edge_ok = |v: u16| v > 0 && v <= MAX_CANVAS_EDGE;
        if !edge_ok(remote.width) || !edge_ok(remote.height) {
            return Err(ValidationError::CanvasSize);
        }
        if remote.width <= QR_LEFT_MARGIN {
            return Err(ValidationError::CanvasTooNarrow);
        }
        if remote.timeout_ms == 0 || self.identification.timeout_secs == 0 {
            return Err(ValidationError::ZeroTimeout);
        }
        if self.keypad.poll_interval_ms == 0 {
            return Err(ValidationError::ZeroPollInterval);
        }
        Ok(())
    }

    /// Settings handed to the mode controller
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            end_user_addr: self.identification.end_user_addr.clone(),
            identification_timeout_ms: self.identification.timeout_secs.saturating_mul(1000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = KioskConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.payment.message.as_str(), "Röda korset");
        assert_eq!(config.remote_display.port, 7760);
        assert_eq!((config.remote_display.width, config.remote_display.height), (400, 300));
    }

    #[test]
    fn test_controller_settings() {
        let mut config = KioskConfig::default();
        config.identification.timeout_secs = 90;
        let settings = config.controller_settings();
        assert_eq!(settings.identification_timeout_ms, 90_000);
        assert_eq!(settings.end_user_addr.as_str(), "127.0.0.1");
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = KioskConfig::default();
        config.remote_display.port = 0;
        assert_eq!(config.validate(), Err(ValidationError::ZeroPort));

        let mut config = KioskConfig::default();
        config.remote_display.width = 40;
        assert_eq!(config.validate(), Err(ValidationError::CanvasTooNarrow));

        let mut config = KioskConfig::default();
        config.remote_display.height = 0;
        assert_eq!(config.validate(), Err(ValidationError::CanvasSize));

        let mut config = KioskConfig::default();
        config.payment.phone.clear();
        assert_eq!(config.validate(), Err(ValidationError::EmptyPhone));

        let mut config = KioskConfig::default();
        config.keypad.poll_interval_ms = 0;
        assert_eq!(config.validate(), Err(ValidationError::ZeroPollInterval));
    }
}
