//! Controller collaborators for the board
//!
//! [`KioskBoardIo`] is what the controller task hands to
//! [`Controller::handle`](kiosk_core::controller::Controller::handle).
//! Display commands are buffered here and drained into the display
//! channel by the task after each input, since the controller itself
//! cannot await.

use std::collections::VecDeque;

use embassy_time::{Duration, Instant};
use tracing::{debug, warn};

use kiosk_core::ident::{Payload, RequestId};
use kiosk_core::traits::{
    ArtifactRenderer, DisplayQueue, IdentificationProvider, ProviderError, RenderError,
    RenderPush, Requirements, TimerKind, Timers,
};
use kiosk_protocol::DisplayCommand;

use crate::artifact::{ArtifactError, PngImage, QrRenderer};
use crate::ident::SimulatedProvider;
use crate::remote::RemoteDisplay;

/// Board IO with the built-in identification service
pub type BoardIo = KioskBoardIo<SimulatedProvider>;

const TIMER_KINDS: [TimerKind; 2] = [TimerKind::Notice, TimerKind::IdentificationDeadline];

fn slot(kind: TimerKind) -> usize {
    match kind {
        TimerKind::Notice => 0,
        TimerKind::IdentificationDeadline => 1,
    }
}

impl From<ArtifactError> for RenderError {
    fn from(e: ArtifactError) -> Self {
        match e {
            ArtifactError::Encode(_) => RenderError::Encode,
            ArtifactError::Png(_) => RenderError::Image,
        }
    }
}

pub struct KioskBoardIo<P> {
    renderer: QrRenderer,
    remote: RemoteDisplay,
    provider: P,
    pending: VecDeque<DisplayCommand>,
    deadlines: [Option<Instant>; 2],
}

impl<P: IdentificationProvider> KioskBoardIo<P> {
    pub fn new(renderer: QrRenderer, remote: RemoteDisplay, provider: P) -> Self {
        Self {
            renderer,
            remote,
            provider,
            pending: VecDeque::new(),
            deadlines: [None; 2],
        }
    }

    /// Take the next buffered display command
    pub fn next_command(&mut self) -> Option<DisplayCommand> {
        self.pending.pop_front()
    }

    /// Earliest armed timer
    pub fn next_deadline(&self) -> Option<(TimerKind, Instant)> {
        TIMER_KINDS
            .iter()
            .filter_map(|&kind| self.deadlines[slot(kind)].map(|at| (kind, at)))
            .min_by_key(|&(_, at)| at)
    }

    /// Disarm and return a timer that is due at `now`
    pub fn take_expired(&mut self, now: Instant) -> Option<TimerKind> {
        let (kind, at) = self.next_deadline()?;
        if at > now {
            return None;
        }
        self.deadlines[slot(kind)] = None;
        Some(kind)
    }
}

impl<P> DisplayQueue for KioskBoardIo<P> {
    fn enqueue(&mut self, cmd: DisplayCommand) {
        self.pending.push_back(cmd);
    }
}

impl<P> ArtifactRenderer for KioskBoardIo<P> {
    type Artifact = PngImage;

    fn render_payment(&mut self, amount: u16) -> Result<PngImage, RenderError> {
        self.renderer.render_payment(amount).map_err(|e| {
            warn!(amount, error = %e, "payment artifact failed");
            e.into()
        })
    }

    fn render_identification(&mut self, payload: &str) -> Result<PngImage, RenderError> {
        self.renderer.render(payload).map_err(|e| {
            warn!(error = %e, "identification artifact failed");
            e.into()
        })
    }
}

impl<P> RenderPush for KioskBoardIo<P> {
    fn push(&mut self, artifact: PngImage) -> Result<(), RenderError> {
        self.remote.spawn_push(artifact).map_err(|e| {
            warn!(error = %e, "could not start render push");
            RenderError::Transport
        })
    }
}

impl<P: IdentificationProvider> IdentificationProvider for KioskBoardIo<P> {
    fn open_session(
        &mut self,
        end_user_addr: &str,
        requirements: Requirements,
    ) -> Result<RequestId, ProviderError> {
        self.provider.open_session(end_user_addr, requirements)
    }

    fn artifact_payload(&mut self, request_id: &str) -> Result<Payload, ProviderError> {
        self.provider.artifact_payload(request_id)
    }

    fn close_session(&mut self, request_id: &str) {
        self.provider.close_session(request_id)
    }
}

impl<P> Timers for KioskBoardIo<P> {
    fn start_timer(&mut self, kind: TimerKind, duration_ms: u32) {
        debug!(?kind, duration_ms, "timer armed");
        self.deadlines[slot(kind)] = Some(Instant::now() + Duration::from_millis(duration_ms as u64));
    }

    fn cancel_timer(&mut self, kind: TimerKind) {
        self.deadlines[slot(kind)] = None;
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use kiosk_core::config::KioskConfig;

    /// Provider double that refuses every session
    pub(crate) struct Offline;

    impl IdentificationProvider for Offline {
        fn open_session(&mut self, _: &str, _: Requirements) -> Result<RequestId, ProviderError> {
            Err(ProviderError::Unreachable)
        }

        fn artifact_payload(&mut self, _: &str) -> Result<Payload, ProviderError> {
            Err(ProviderError::UnknownRequest)
        }

        fn close_session(&mut self, _: &str) {}
    }

    pub(crate) fn io() -> KioskBoardIo<Offline> {
        let config = KioskConfig::default();
        KioskBoardIo::new(
            QrRenderer::new(&config.payment, &config.remote_display),
            RemoteDisplay::new(&config.remote_display),
            Offline,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::testing::io;
    use super::*;

    #[test]
    fn test_commands_drain_in_order() {
        let mut io = io();
        io.enqueue_all([DisplayCommand::Clear, DisplayCommand::ShowCursor]);
        io.enqueue(DisplayCommand::MoveLeft(1));
        assert_eq!(io.next_command(), Some(DisplayCommand::Clear));
        assert_eq!(io.next_command(), Some(DisplayCommand::ShowCursor));
        assert_eq!(io.next_command(), Some(DisplayCommand::MoveLeft(1)));
        assert_eq!(io.next_command(), None);
    }

    #[test]
    fn test_earliest_timer_first() {
        let mut io = io();
        assert_eq!(io.next_deadline(), None);

        io.start_timer(TimerKind::IdentificationDeadline, 180_000);
        io.start_timer(TimerKind::Notice, 2000);
        let (kind, at) = io.next_deadline().unwrap();
        assert_eq!(kind, TimerKind::Notice);

        assert_eq!(io.take_expired(at - Duration::from_millis(1)), None);
        assert_eq!(io.take_expired(at), Some(TimerKind::Notice));
        assert_eq!(
            io.next_deadline().map(|(k, _)| k),
            Some(TimerKind::IdentificationDeadline)
        );
    }

    #[test]
    fn test_cancelled_timer_never_expires() {
        let mut io = io();
        io.start_timer(TimerKind::Notice, 0);
        io.cancel_timer(TimerKind::Notice);
        assert_eq!(io.take_expired(Instant::now() + Duration::from_secs(10)), None);
    }

    #[test]
    fn test_rearming_restarts_timer() {
        let mut io = io();
        io.start_timer(TimerKind::Notice, 10);
        let first = io.next_deadline().unwrap().1;
        io.start_timer(TimerKind::Notice, 60_000);
        assert!(io.next_deadline().unwrap().1 > first);
    }

    #[test]
    fn test_render_and_provider_errors() {
        let mut io = io();
        assert!(io.render_payment(42).is_ok());
        assert_eq!(
            io.render_identification(&"x".repeat(8000)).err(),
            Some(RenderError::Encode)
        );
        assert_eq!(
            io.open_session("127.0.0.1", Requirements::default()),
            Err(ProviderError::Unreachable)
        );
    }
}
