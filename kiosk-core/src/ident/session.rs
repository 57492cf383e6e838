//! One live identification request

use super::status::{Status, StatusEvent, StatusKind};
use super::RequestId;
use crate::error::bounded;

/// Verdict on an incoming status event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accept {
    /// Event belongs to another request; dropped
    Foreign,
    /// Same non-terminal status again; nothing to do
    Repeat,
    /// Lifecycle moved forward
    Advanced(Status),
    /// Out-of-order status for this request
    Illegal {
        from: Option<StatusKind>,
        to: StatusKind,
    },
}

/// Session scoped to the request id it was opened with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    request_id: RequestId,
    status: Option<StatusKind>,
}

impl Session {
    pub fn new(request_id: &str) -> Self {
        Self {
            request_id: bounded(request_id),
            status: None,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Filter and order an event
    pub fn accept(&mut self, event: StatusEvent) -> Accept {
        if event.request_id != self.request_id {
            return Accept::Foreign;
        }

        let to = event.status.kind();
        if self.status == Some(to) && !to.is_terminal() {
            return Accept::Repeat;
        }
        if !StatusKind::can_follow(self.status, to) {
            return Accept::Illegal {
                from: self.status,
                to,
            };
        }

        self.status = Some(to);
        Accept::Advanced(event.status)
    }
}
