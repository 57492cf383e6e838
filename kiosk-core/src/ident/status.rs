//! Identification status values and their lifecycle

use super::{Detail, RequestId};
use crate::error::bounded;

/// Failure detail reported when the user never finished in time
pub const EXPIRED_TRANSACTION: &str = "expiredTransaction";

/// Status reported for a request
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// Request accepted; the scan artifact can be fetched
    Sent,
    /// Waiting for the user to open their identification app
    Pending,
    /// User has to confirm in their app
    UserActionRequired,
    /// Terminal failure with the provider's reason
    Failed(Detail),
    /// Terminal success with the verified identity text
    Complete(Detail),
}

/// Status without its payload, used for lifecycle checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Sent,
    Pending,
    UserActionRequired,
    Failed,
    Complete,
}

impl StatusKind {
    /// Whether no further status may follow
    pub fn is_terminal(self) -> bool {
        matches!(self, StatusKind::Failed | StatusKind::Complete)
    }

    /// Check a lifecycle step; `None` is the state before any status
    pub fn can_follow(from: Option<StatusKind>, to: StatusKind) -> bool {
        use StatusKind::*;

        match (from, to) {
            (None, Sent) | (None, Failed) => true,
            (Some(Sent), Pending | UserActionRequired | Failed) => true,
            (Some(Pending), UserActionRequired | Failed | Complete) => true,
            (Some(UserActionRequired), Failed | Complete) => true,
            _ => false,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StatusKind::Sent => "sent",
            StatusKind::Pending => "pending",
            StatusKind::UserActionRequired => "user-action-required",
            StatusKind::Failed => "failed",
            StatusKind::Complete => "complete",
        }
    }
}

/// Which failure message to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    Aborted,
}

impl Status {
    /// Map a provider callback tag to a status
    ///
    /// Returns `None` for tags this controller does not know.
    pub fn from_callback(tag: &str, detail: &str) -> Option<Self> {
        let status = match tag {
            "sent" => Status::Sent,
            "outstandingTransaction" | "started" => Status::Pending,
            "userSign" => Status::UserActionRequired,
            "failed" => Status::Failed(bounded(detail)),
            "complete" => Status::Complete(bounded(detail)),
            _ => return None,
        };
        Some(status)
    }

    pub fn kind(&self) -> StatusKind {
        match self {
            Status::Sent => StatusKind::Sent,
            Status::Pending => StatusKind::Pending,
            Status::UserActionRequired => StatusKind::UserActionRequired,
            Status::Failed(_) => StatusKind::Failed,
            Status::Complete(_) => StatusKind::Complete,
        }
    }

    /// Failure class for a `Failed` status
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Status::Failed(detail) if detail.as_str() == EXPIRED_TRANSACTION => {
                Some(FailureKind::Timeout)
            }
            Status::Failed(_) => Some(FailureKind::Aborted),
            _ => None,
        }
    }

    /// Failure caused by the session deadline
    pub fn expired() -> Self {
        Status::Failed(bounded(EXPIRED_TRANSACTION))
    }
}

/// A status addressed to one request
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEvent {
    pub request_id: RequestId,
    pub status: Status,
}

impl StatusEvent {
    pub fn new(request_id: &str, status: Status) -> Self {
        Self {
            request_id: bounded(request_id),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_tags() {
        assert_eq!(Status::from_callback("sent", ""), Some(Status::Sent));
        assert_eq!(
            Status::from_callback("outstandingTransaction", ""),
            Some(Status::Pending)
        );
        assert_eq!(Status::from_callback("started", ""), Some(Status::Pending));
        assert_eq!(
            Status::from_callback("userSign", ""),
            Some(Status::UserActionRequired)
        );
        assert_eq!(
            Status::from_callback("complete", "Jane Doe\nCustomer")
                .map(|s| s.kind()),
            Some(StatusKind::Complete)
        );
        assert_eq!(Status::from_callback("bogus", ""), None);
    }

    #[test]
    fn test_failure_kinds() {
        assert_eq!(Status::expired().failure_kind(), Some(FailureKind::Timeout));
        let aborted = Status::from_callback("failed", "userCancel").unwrap();
        assert_eq!(aborted.failure_kind(), Some(FailureKind::Aborted));
        assert_eq!(Status::Sent.failure_kind(), None);
    }

    #[test]
    fn test_lifecycle() {
        use StatusKind::*;

        assert!(StatusKind::can_follow(None, Sent));
        assert!(StatusKind::can_follow(None, Failed));
        assert!(!StatusKind::can_follow(None, Complete));
        assert!(!StatusKind::can_follow(None, Pending));

        assert!(StatusKind::can_follow(Some(Sent), UserActionRequired));
        assert!(!StatusKind::can_follow(Some(Sent), Complete));
        assert!(StatusKind::can_follow(Some(Pending), Complete));
        assert!(!StatusKind::can_follow(Some(UserActionRequired), Pending));

        for to in [Sent, Pending, UserActionRequired, Failed, Complete] {
            assert!(!StatusKind::can_follow(Some(Failed), to));
            assert!(!StatusKind::can_follow(Some(Complete), to));
        }
    }
}
