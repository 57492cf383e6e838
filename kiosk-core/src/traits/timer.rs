//! One-shot timers

/// Timers the controller arms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// End of a transient notice
    Notice,
    /// Upper bound on a live identification session
    IdentificationDeadline,
}

/// One-shot timer service
///
/// Arming a timer that is already armed restarts it. A cancelled timer
/// must not fire.
pub trait Timers {
    fn start_timer(&mut self, kind: TimerKind, duration_ms: u32);

    fn cancel_timer(&mut self, kind: TimerKind);
}
