//! Identification service adapter
//!
//! Status callbacks arrive on foreign threads with the provider's raw tag
//! names. [`publish`] maps them onto [`StatusEvent`]s and hands them to the
//! controller task through [`IDENT_EVENTS`].
//!
//! [`SimulatedProvider`] stands in for the vendor SDK. It walks every
//! session through the usual status sequence on a worker thread.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use kiosk_core::error::bounded;
use kiosk_core::ident::{Payload, RequestId, Status, StatusEvent};
use kiosk_core::traits::{IdentificationProvider, ProviderError, Requirements};

use crate::channels::{post_blocking, IDENT_EVENTS};
use crate::config::{SimulatedOutcome, SimulationConfig};

/// Callback sink shared with session threads
pub type Publisher = Arc<dyn Fn(&str, &str, &str) + Send + Sync>;

/// Map a raw callback onto a status event
pub fn status_event(request_id: &str, tag: &str, detail: &str) -> Option<StatusEvent> {
    match Status::from_callback(tag, detail) {
        Some(status) => Some(StatusEvent::new(request_id, status)),
        None => {
            warn!(request_id, tag, "ignoring unknown identification status");
            None
        }
    }
}

/// Forward a provider callback to the controller task
///
/// Sleeps on the calling thread while the event queue is full.
pub fn publish(request_id: &str, tag: &str, detail: &str) {
    if let Some(event) = status_event(request_id, tag, detail) {
        debug!(request_id, tag, "identification callback");
        post_blocking(&IDENT_EVENTS, event);
    }
}

/// Callback tags for one simulated session, in order
fn script(config: &SimulationConfig) -> Vec<(&'static str, String)> {
    let mut steps = vec![
        ("sent", String::new()),
        ("started", String::new()),
        ("userSign", String::new()),
    ];
    match config.outcome {
        SimulatedOutcome::Complete => steps.push(("complete", config.name.clone())),
        SimulatedOutcome::Failed => steps.push(("failed", "userCancel".to_string())),
        SimulatedOutcome::Silent => {}
    }
    steps
}

/// In-process identification service
pub struct SimulatedProvider {
    config: SimulationConfig,
    publisher: Publisher,
    next_id: u32,
    sessions: HashMap<String, Arc<AtomicBool>>,
}

impl SimulatedProvider {
    pub fn new(config: SimulationConfig, publisher: Publisher) -> Self {
        Self {
            config,
            publisher,
            next_id: 1,
            sessions: HashMap::new(),
        }
    }

    /// Provider that reports to the controller task
    pub fn with_channel(config: SimulationConfig) -> Self {
        Self::new(config, Arc::new(publish))
    }

    /// Number of sessions not yet closed
    pub fn open_sessions(&self) -> usize {
        self.sessions.len()
    }
}

impl IdentificationProvider for SimulatedProvider {
    fn open_session(
        &mut self,
        end_user_addr: &str,
        requirements: Requirements,
    ) -> Result<RequestId, ProviderError> {
        let n = self.next_id;
        self.next_id += 1;
        let request_id: RequestId = bounded(&format!("sim-{}", n));

        let closed = Arc::new(AtomicBool::new(false));
        let steps = script(&self.config);
        let step = Duration::from_millis(self.config.step_ms);
        let publisher = self.publisher.clone();
        let id = request_id.clone();
        let flag = closed.clone();

        thread::Builder::new()
            .name(format!("ident-{}", n))
            .spawn(move || {
                for (tag, detail) in steps {
                    thread::sleep(step);
                    if flag.load(Ordering::Acquire) {
                        return;
                    }
                    publisher(&id, tag, &detail);
                }
            })
            .map_err(|e| {
                warn!(error = %e, "failed to start identification session");
                ProviderError::Unreachable
            })?;

        info!(
            request_id = %request_id,
            end_user_addr,
            token_start = requirements.token_start_required,
            "identification session opened"
        );
        self.sessions.insert(request_id.to_string(), closed);
        Ok(request_id)
    }

    fn artifact_payload(&mut self, request_id: &str) -> Result<Payload, ProviderError> {
        if !self.sessions.contains_key(request_id) {
            return Err(ProviderError::UnknownRequest);
        }
        Ok(bounded(&format!("bankid:///?autostarttoken={}", request_id)))
    }

    fn close_session(&mut self, request_id: &str) {
        match self.sessions.remove(request_id) {
            Some(closed) => {
                closed.store(true, Ordering::Release);
                info!(request_id, "identification session closed");
            }
            None => warn!(request_id, "close for unknown identification session"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::sync::Mutex;

    fn recording() -> (Publisher, mpsc::Receiver<(String, String, String)>) {
        let (tx, rx) = mpsc::channel();
        let tx = Mutex::new(tx);
        let publisher: Publisher = Arc::new(move |id: &str, tag: &str, detail: &str| {
            let _ = tx
                .lock()
                .unwrap()
                .send((id.to_string(), tag.to_string(), detail.to_string()));
        });
        (publisher, rx)
    }

    fn fast(outcome: SimulatedOutcome) -> SimulationConfig {
        SimulationConfig {
            outcome,
            step_ms: 5,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_unknown_tag_dropped() {
        assert!(status_event("sim-1", "collectPending", "").is_none());
        let event = status_event("sim-1", "userSign", "").unwrap();
        assert_eq!(event.status, Status::UserActionRequired);
        assert_eq!(event.request_id.as_str(), "sim-1");
    }

    #[test]
    fn test_complete_session_sequence() {
        let (publisher, rx) = recording();
        let mut provider = SimulatedProvider::new(fast(SimulatedOutcome::Complete), publisher);
        let id = provider
            .open_session("127.0.0.1", Requirements::default())
            .unwrap();
        assert_eq!(id.as_str(), "sim-1");

        let tags: Vec<_> = rx.iter().take(4).collect();
        assert_eq!(
            tags.iter().map(|t| t.1.as_str()).collect::<Vec<_>>(),
            ["sent", "started", "userSign", "complete"]
        );
        assert!(tags.iter().all(|t| t.0 == "sim-1"));
        assert_eq!(tags[3].2, "Jane Doe\nCustomer");
    }

    #[test]
    fn test_failed_and_silent_outcomes() {
        assert_eq!(script(&fast(SimulatedOutcome::Failed)).last().unwrap().0, "failed");
        assert_eq!(script(&fast(SimulatedOutcome::Silent)).len(), 3);
    }

    #[test]
    fn test_closed_session_stops_callbacks() {
        let (publisher, rx) = recording();
        let mut config = fast(SimulatedOutcome::Complete);
        config.step_ms = 50;
        let mut provider = SimulatedProvider::new(config, publisher);
        let id = provider
            .open_session("127.0.0.1", Requirements::default())
            .unwrap();
        provider.close_session(&id);
        assert_eq!(provider.open_sessions(), 0);

        assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());
    }

    #[test]
    fn test_payload_requires_open_session() {
        let (publisher, _rx) = recording();
        let mut provider = SimulatedProvider::new(fast(SimulatedOutcome::Silent), publisher);
        assert_eq!(
            provider.artifact_payload("sim-9"),
            Err(ProviderError::UnknownRequest)
        );

        let id = provider
            .open_session("127.0.0.1", Requirements::default())
            .unwrap();
        let payload = provider.artifact_payload(&id).unwrap();
        assert!(payload.ends_with("sim-1"));
    }
}
