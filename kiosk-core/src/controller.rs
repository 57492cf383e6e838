//! Mode controller
//!
//! The controller is the single owner of kiosk state. Every input (key
//! presses, render completions, identification status callbacks and timer
//! expiries) is fed through [`Controller::handle`] in arrival order, and
//! every side effect goes out through the [`KioskIo`] collaborator. The
//! controller itself never blocks.

use core::mem;

use heapless::{String, Vec};
use kiosk_protocol::{KeyCode, KeyEvent};

use crate::amount::{AmountEntry, DigitOutcome};
use crate::error::{bounded, ErrorCode, ErrorInfo};
use crate::ident::{Accept, Session, Status, StatusEvent};
use crate::screens::{self, Notice, IDENT_PROMPT};
use crate::state::{Mode, ModeEvent};
use crate::traits::{KioskIo, Requirements, TimerKind};

/// Maximum end-user address length
pub const MAX_ADDR_LEN: usize = 64;

/// Transitions one input can cause
pub const MAX_TRANSITIONS: usize = 4;

/// Controller input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Key code from the keypad
    Key(KeyCode),
    /// Outcome of the outstanding render push
    RenderFinished(Result<(), ErrorInfo>),
    /// Status callback from the identification service
    Identification(StatusEvent),
    /// A timer armed through [`crate::traits::Timers`] fired
    TimerElapsed(TimerKind),
}

/// Mode change caused by an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
    pub event: ModeEvent,
}

/// Mode changes caused by one input, in order
pub type Transitions = Vec<Transition, MAX_TRANSITIONS>;

/// Runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Address registered with the identification service for callbacks
    pub end_user_addr: String<MAX_ADDR_LEN>,
    /// Identification session deadline
    pub identification_timeout_ms: u32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            end_user_addr: bounded("127.0.0.1"),
            identification_timeout_ms: 180_000,
        }
    }
}

/// Identification sub-state
#[derive(Debug, Clone, PartialEq, Eq)]
enum IdentPhase {
    /// No session
    Idle,
    /// Session open, waiting for status updates
    Waiting(Session),
    /// Identity shown, waiting for a key
    AwaitingAck,
    /// Session closed, a notice is on its way back to amount entry
    Finished,
}

/// Notice currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingNotice {
    /// Mode event to apply once the notice ends
    then: Option<ModeEvent>,
}

/// The kiosk mode controller
pub struct Controller {
    settings: ControllerSettings,
    mode: Mode,
    amount: AmountEntry,
    ident: IdentPhase,
    render_busy: bool,
    notice: Option<PendingNotice>,
    error: Option<ErrorInfo>,
    transitions: Transitions,
}

impl Controller {
    pub fn new(settings: ControllerSettings) -> Self {
        Self {
            settings,
            mode: Mode::default(),
            amount: AmountEntry::new(),
            ident: IdentPhase::Idle,
            render_busy: false,
            notice: None,
            error: None,
            transitions: Transitions::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn amount(&self) -> &AmountEntry {
        &self.amount
    }

    /// Whether a render push is outstanding
    pub fn render_busy(&self) -> bool {
        self.render_busy
    }

    pub fn notice_active(&self) -> bool {
        self.notice.is_some()
    }

    /// Error captured on entry to error mode
    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    /// Request id of the live identification session
    pub fn session_request_id(&self) -> Option<&str> {
        match &self.ident {
            IdentPhase::Waiting(session) => Some(session.request_id()),
            _ => None,
        }
    }

    /// Draw the initial screen
    pub fn start<IO: KioskIo>(&mut self, io: &mut IO) {
        self.enter(self.mode, io);
    }

    /// Process one input
    pub fn handle<IO: KioskIo>(&mut self, input: Input, io: &mut IO) -> Transitions {
        self.transitions.clear();

        match input {
            Input::Key(code) => self.on_key(code, io),
            Input::RenderFinished(result) => self.on_render_finished(result, io),
            Input::Identification(event) => self.on_identification(event, io),
            Input::TimerElapsed(kind) => self.on_timer(kind, io),
        }

        mem::take(&mut self.transitions)
    }

    // ========================================================================
    // Inputs
    // ========================================================================

    fn on_key<IO: KioskIo>(&mut self, code: KeyCode, io: &mut IO) {
        if self.mode.is_error() {
            return;
        }

        // A key ends the notice early and is then handled normally
        if self.notice.is_some() {
            self.end_notice(false, io);
        }

        match self.mode {
            Mode::AmountEntry => self.amount_key(code, io),
            Mode::Identification => self.identification_key(code, io),
            Mode::Settings | Mode::Error => {}
        }
    }

    fn on_render_finished<IO: KioskIo>(&mut self, result: Result<(), ErrorInfo>, io: &mut IO) {
        self.render_busy = false;
        if let Err(info) = result {
            self.fault(info, io);
        }
    }

    fn on_identification<IO: KioskIo>(&mut self, event: StatusEvent, io: &mut IO) {
        if self.mode != Mode::Identification {
            return;
        }
        let IdentPhase::Waiting(session) = &mut self.ident else {
            return;
        };

        let verdict = session.accept(event);
        match verdict {
            Accept::Foreign | Accept::Repeat => {}
            Accept::Illegal { from, to } => self.fault(
                ErrorInfo::new(
                    ErrorCode::UnexpectedStatus,
                    format_args!(
                        "identification status {} after {}",
                        to.name(),
                        from.map_or("nothing", |s| s.name())
                    ),
                ),
                io,
            ),
            Accept::Advanced(status) => self.on_status(status, io),
        }
    }

    fn on_timer<IO: KioskIo>(&mut self, kind: TimerKind, io: &mut IO) {
        match kind {
            TimerKind::Notice => {
                if self.notice.is_some() {
                    self.end_notice(true, io);
                }
            }
            TimerKind::IdentificationDeadline => {
                if self.mode == Mode::Identification
                    && matches!(self.ident, IdentPhase::Waiting(_))
                {
                    self.finish_session(Notice::IDENT_TIMEOUT, io);
                }
            }
        }
    }

    // ========================================================================
    // Amount entry
    // ========================================================================

    fn amount_key<IO: KioskIo>(&mut self, code: KeyCode, io: &mut IO) {
        let Some(key) = KeyEvent::from_code(code) else {
            self.unknown_key(code, io);
            return;
        };

        match key {
            KeyEvent::Digit(digit) => {
                if let DigitOutcome::Accepted { col } = self.amount.push_digit(digit) {
                    screens::amount_digits(io, col, &self.amount);
                }
            }
            KeyEvent::Confirm => self.confirm(io),
            KeyEvent::Clear => {
                self.amount.reset();
                screens::amount_screen(io, &self.amount);
            }
            KeyEvent::Identification => {
                self.unless_busy(ModeEvent::IdentificationRequested, io);
            }
            KeyEvent::Settings => self.unless_busy(ModeEvent::SettingsRequested, io),
        }
    }

    fn unless_busy<IO: KioskIo>(&mut self, event: ModeEvent, io: &mut IO) {
        if self.render_busy {
            self.show_notice(Notice::BUSY, None, io);
        } else {
            self.apply(event, io);
        }
    }

    fn confirm<IO: KioskIo>(&mut self, io: &mut IO) {
        if !self.amount.has_input() {
            return;
        }
        if self.render_busy {
            self.show_notice(Notice::BUSY, None, io);
            return;
        }

        let amount = self.amount.amount();
        let artifact = match io.render_payment(amount) {
            Ok(artifact) => artifact,
            Err(e) => {
                self.fault(
                    ErrorInfo::new(
                        ErrorCode::PaymentArtifact,
                        format_args!("payment artifact for {}: {}", amount, e.as_str()),
                    ),
                    io,
                );
                return;
            }
        };
        if let Err(e) = io.push(artifact) {
            self.fault(
                ErrorInfo::new(
                    ErrorCode::RenderPush,
                    format_args!("payment push for {}: {}", amount, e.as_str()),
                ),
                io,
            );
            return;
        }

        self.render_busy = true;
        self.amount.reset();
        self.show_notice(Notice::SCAN, None, io);
    }

    fn unknown_key<IO: KioskIo>(&mut self, code: KeyCode, io: &mut IO) {
        self.fault(
            ErrorInfo::new(
                ErrorCode::UnknownKey,
                format_args!("key code {} out of range in {}", code.0, self.mode.name()),
            ),
            io,
        );
    }

    // ========================================================================
    // Identification
    // ========================================================================

    fn identification_key<IO: KioskIo>(&mut self, code: KeyCode, io: &mut IO) {
        match self.ident {
            IdentPhase::AwaitingAck => self.apply(ModeEvent::SessionFinished, io),
            IdentPhase::Waiting(_) => match KeyEvent::from_code(code) {
                None => self.unknown_key(code, io),
                Some(KeyEvent::Clear) => self.finish_session(Notice::IDENT_CANCELLED, io),
                Some(_) => {}
            },
            IdentPhase::Idle | IdentPhase::Finished => {}
        }
    }

    fn on_status<IO: KioskIo>(&mut self, status: Status, io: &mut IO) {
        match &status {
            Status::Sent => self.show_identification_artifact(io),
            Status::Pending | Status::UserActionRequired => {}
            Status::Failed(_) => {
                let notice = match status.failure_kind() {
                    Some(crate::ident::FailureKind::Timeout) => Notice::IDENT_TIMEOUT,
                    _ => Notice::IDENT_ABORTED,
                };
                self.finish_session(notice, io);
            }
            Status::Complete(detail) => {
                self.close_session(io);
                self.ident = IdentPhase::AwaitingAck;
                let (top, bottom) = screens::identity_lines(detail);
                screens::two_lines(io, top, bottom);
            }
        }
    }

    fn show_identification_artifact<IO: KioskIo>(&mut self, io: &mut IO) {
        screens::two_lines(io, IDENT_PROMPT.0, IDENT_PROMPT.1);

        let payload = match &self.ident {
            IdentPhase::Waiting(session) => io.artifact_payload(session.request_id()),
            _ => return,
        };
        let payload = match payload {
            Ok(payload) => payload,
            Err(e) => {
                self.fault(
                    ErrorInfo::new(
                        ErrorCode::IdentificationArtifact,
                        format_args!("identification payload: {}", e.as_str()),
                    ),
                    io,
                );
                return;
            }
        };

        if self.render_busy {
            self.fault(
                ErrorInfo::new(
                    ErrorCode::RenderPush,
                    format_args!("identification artifact while a push is outstanding"),
                ),
                io,
            );
            return;
        }

        let artifact = match io.render_identification(&payload) {
            Ok(artifact) => artifact,
            Err(e) => {
                self.fault(
                    ErrorInfo::new(
                        ErrorCode::IdentificationArtifact,
                        format_args!("identification artifact: {}", e.as_str()),
                    ),
                    io,
                );
                return;
            }
        };
        if let Err(e) = io.push(artifact) {
            self.fault(
                ErrorInfo::new(
                    ErrorCode::RenderPush,
                    format_args!("identification push: {}", e.as_str()),
                ),
                io,
            );
            return;
        }
        self.render_busy = true;
    }

    /// Close the live session and show `notice` before returning to amount
    /// entry
    fn finish_session<IO: KioskIo>(&mut self, notice: Notice, io: &mut IO) {
        self.close_session(io);
        self.show_notice(notice, Some(ModeEvent::SessionFinished), io);
    }

    /// Release the session if one is open
    fn close_session<IO: KioskIo>(&mut self, io: &mut IO) {
        if let IdentPhase::Waiting(session) = mem::replace(&mut self.ident, IdentPhase::Finished) {
            io.cancel_timer(TimerKind::IdentificationDeadline);
            io.close_session(session.request_id());
        }
    }

    // ========================================================================
    // Notices
    // ========================================================================

    fn show_notice<IO: KioskIo>(&mut self, notice: Notice, then: Option<ModeEvent>, io: &mut IO) {
        screens::notice(io, &notice);
        io.start_timer(TimerKind::Notice, notice.duration_ms);
        self.notice = Some(PendingNotice { then });
    }

    fn end_notice<IO: KioskIo>(&mut self, elapsed: bool, io: &mut IO) {
        let Some(pending) = self.notice.take() else {
            return;
        };
        if !elapsed {
            io.cancel_timer(TimerKind::Notice);
        }

        match pending.then {
            Some(event) => self.apply(event, io),
            None => self.redraw(io),
        }
    }

    fn redraw<IO: KioskIo>(&mut self, io: &mut IO) {
        if self.mode == Mode::AmountEntry {
            screens::amount_screen(io, &self.amount);
        }
    }

    // ========================================================================
    // Mode changes
    // ========================================================================

    fn fault<IO: KioskIo>(&mut self, info: ErrorInfo, io: &mut IO) {
        if self.mode.is_error() {
            return;
        }
        self.error = Some(info);
        self.apply(ModeEvent::Fault, io);
    }

    fn apply<IO: KioskIo>(&mut self, event: ModeEvent, io: &mut IO) {
        let from = self.mode;
        let to = from.transition(event);
        if to == from {
            return;
        }

        self.exit(from, io);
        self.mode = to;
        let _ = self.transitions.push(Transition { from, to, event });
        self.enter(to, io);
    }

    fn exit<IO: KioskIo>(&mut self, mode: Mode, io: &mut IO) {
        if self.notice.take().is_some() {
            io.cancel_timer(TimerKind::Notice);
        }

        match mode {
            Mode::AmountEntry => self.amount.reset(),
            Mode::Identification => {
                self.close_session(io);
                self.ident = IdentPhase::Idle;
            }
            Mode::Settings | Mode::Error => {}
        }
    }

    fn enter<IO: KioskIo>(&mut self, mode: Mode, io: &mut IO) {
        match mode {
            Mode::AmountEntry => screens::amount_screen(io, &self.amount),
            Mode::Identification => self.open_session(io),
            Mode::Settings => {
                self.show_notice(Notice::NOT_IMPLEMENTED, Some(ModeEvent::SettingsDismissed), io)
            }
            Mode::Error => {
                if let Some(info) = &self.error {
                    screens::error_screen(io, info);
                }
            }
        }
    }

    fn open_session<IO: KioskIo>(&mut self, io: &mut IO) {
        screens::wait_screen(io);

        let requirements = Requirements {
            token_start_required: true,
        };
        match io.open_session(&self.settings.end_user_addr, requirements) {
            Ok(request_id) => {
                self.ident = IdentPhase::Waiting(Session::new(&request_id));
                io.start_timer(
                    TimerKind::IdentificationDeadline,
                    self.settings.identification_timeout_ms,
                );
            }
            Err(_) => {
                self.ident = IdentPhase::Finished;
                self.show_notice(Notice::CONNECT_FAILED, Some(ModeEvent::SessionFinished), io);
            }
        }
    }
}
