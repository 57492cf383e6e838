//! Identification session tracking
//!
//! The external identification service reports progress through
//! callbacks that carry a request id, a status tag and a detail string.
//! This module turns those into typed [`Status`] values and keeps a
//! [`Session`] that only lets through events for its own request, in
//! lifecycle order.

pub mod session;
pub mod status;

pub use session::{Accept, Session};
pub use status::{FailureKind, Status, StatusEvent, StatusKind, EXPIRED_TRANSACTION};

use heapless::String;

/// Maximum request id length
pub const MAX_REQUEST_ID_LEN: usize = 64;

/// Maximum callback detail length
pub const MAX_DETAIL_LEN: usize = 128;

/// Maximum scan artifact payload length
pub const MAX_PAYLOAD_LEN: usize = 256;

/// Opaque request identifier issued by the provider
pub type RequestId = String<MAX_REQUEST_ID_LEN>;

/// Status detail text
pub type Detail = String<MAX_DETAIL_LEN>;

/// Scan artifact payload text
pub type Payload = String<MAX_PAYLOAD_LEN>;
