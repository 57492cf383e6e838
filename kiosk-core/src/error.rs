//! Error information shown in error mode
//!
//! Every unrecoverable condition in the controller is captured into a
//! single [`ErrorInfo`]: a numbered code, a message for the log, and the
//! short label shown on the LCD.

use core::fmt::{self, Write};

use heapless::String;
use kiosk_protocol::LineText;

/// Maximum log message length in bytes
pub const MAX_LOG_LEN: usize = 192;

/// Log message text
pub type LogText = String<MAX_LOG_LEN>;

/// Error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Payment QR artifact could not be generated
    PaymentArtifact,
    /// Push to the remote display failed
    RenderPush,
    /// Identification QR artifact could not be fetched or generated
    IdentificationArtifact,
    /// Key code outside the assigned range
    UnknownKey,
    /// Identification status out of lifecycle order
    UnexpectedStatus,
}

impl ErrorCode {
    /// Numeric code shown to the operator
    pub fn number(self) -> u8 {
        match self {
            ErrorCode::PaymentArtifact => 1,
            ErrorCode::RenderPush => 2,
            ErrorCode::IdentificationArtifact => 3,
            ErrorCode::UnknownKey => 4,
            ErrorCode::UnexpectedStatus => 5,
        }
    }

    /// Protocol errors indicate a misbehaving peer rather than a failed
    /// operation
    pub fn is_protocol_error(self) -> bool {
        matches!(self, ErrorCode::UnknownKey | ErrorCode::UnexpectedStatus)
    }
}

/// Captured error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub code: ErrorCode,
    pub log_message: LogText,
    pub display_message: LineText,
}

impl ErrorInfo {
    /// Build an error; the display label is "Error <n>"
    ///
    /// The log message is truncated if it does not fit.
    pub fn new(code: ErrorCode, log: fmt::Arguments<'_>) -> Self {
        let mut log_message = LogText::new();
        let _ = Truncating(&mut log_message).write_fmt(log);

        let mut display_message = LineText::new();
        let _ = write!(display_message, "Error {}", code.number());

        Self {
            code,
            log_message,
            display_message,
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.number(), self.log_message)
    }
}

/// Writer that keeps as much text as fits and drops the rest
pub struct Truncating<'a, const N: usize>(pub &'a mut String<N>);

impl<const N: usize> Write for Truncating<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            if self.0.push(ch).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Copy `text` into a bounded string, truncating at a character boundary
pub fn bounded<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    let _ = Truncating(&mut out).write_str(text);
    out
}
