//! Identification provider boundary

use crate::ident::{Payload, RequestId};

/// Provider errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderError {
    /// Service could not be reached
    Unreachable,
    /// Service refused the request
    Rejected,
    /// No session exists for the request id
    UnknownRequest,
}

impl ProviderError {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderError::Unreachable => "service unreachable",
            ProviderError::Rejected => "request rejected",
            ProviderError::UnknownRequest => "unknown request",
        }
    }
}

/// Requirement flags for a new session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Requirements {
    /// The session must be started with the provider's token
    pub token_start_required: bool,
}

/// External identification service
///
/// Status updates are not returned here; they arrive asynchronously as
/// identification inputs to the controller.
pub trait IdentificationProvider {
    /// Start a session, registering `end_user_addr` for callbacks
    fn open_session(
        &mut self,
        end_user_addr: &str,
        requirements: Requirements,
    ) -> Result<RequestId, ProviderError>;

    /// Fetch the payload to encode in the scan artifact
    fn artifact_payload(&mut self, request_id: &str) -> Result<Payload, ProviderError>;

    /// Release the session
    fn close_session(&mut self, request_id: &str);
}
