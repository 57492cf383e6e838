//! Mode machine definition
//!
//! Exactly one mode is active at a time. Transitions are a pure function
//! of the current mode and an event; the controller performs the entry
//! and exit actions.

use super::events::ModeEvent;

/// Top-level operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Keypad enters a payment amount (initial mode)
    #[default]
    AmountEntry,
    /// An identification session is running
    Identification,
    /// Settings screen (placeholder, returns immediately)
    Settings,
    /// Fault detected; only a restart leaves this mode
    Error,
}

impl Mode {
    /// Check if this is the error mode
    pub fn is_error(&self) -> bool {
        matches!(self, Mode::Error)
    }

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Mode::AmountEntry => "amount-entry",
            Mode::Identification => "identification",
            Mode::Settings => "settings",
            Mode::Error => "error",
        }
    }

    /// Process an event and return the next mode
    ///
    /// This is the core transition table.
    pub fn transition(self, event: ModeEvent) -> Self {
        use Mode::*;
        use ModeEvent::*;

        match (self, event) {
            // Error is terminal until the process restarts
            (Error, _) => Error,
            (_, Fault) => Error,

            // AmountEntry transitions
            (AmountEntry, IdentificationRequested) => Identification,
            (AmountEntry, SettingsRequested) => Settings,

            // Identification transitions
            (Identification, SessionFinished) => AmountEntry,

            // Settings transitions
            (Settings, SettingsDismissed) => AmountEntry,

            // Default: stay in current mode
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_mode() {
        assert_eq!(Mode::default(), Mode::AmountEntry);
    }

    #[test]
    fn test_fault_from_any_mode() {
        let modes = [Mode::AmountEntry, Mode::Identification, Mode::Settings];

        for mode in modes {
            assert_eq!(mode.transition(ModeEvent::Fault), Mode::Error);
        }
    }

    #[test]
    fn test_error_is_sticky() {
        let events = [
            ModeEvent::IdentificationRequested,
            ModeEvent::SettingsRequested,
            ModeEvent::SessionFinished,
            ModeEvent::SettingsDismissed,
            ModeEvent::Fault,
        ];

        for event in events {
            assert_eq!(Mode::Error.transition(event), Mode::Error);
        }
    }

    #[test]
    fn test_identification_round_trip() {
        let ident = Mode::AmountEntry.transition(ModeEvent::IdentificationRequested);
        assert_eq!(ident, Mode::Identification);

        let back = ident.transition(ModeEvent::SessionFinished);
        assert_eq!(back, Mode::AmountEntry);
    }

    #[test]
    fn test_settings_round_trip() {
        let settings = Mode::AmountEntry.transition(ModeEvent::SettingsRequested);
        assert_eq!(settings, Mode::Settings);
        assert_eq!(
            settings.transition(ModeEvent::SettingsDismissed),
            Mode::AmountEntry
        );
    }

    #[test]
    fn test_requests_ignored_outside_amount_entry() {
        assert_eq!(
            Mode::Identification.transition(ModeEvent::SettingsRequested),
            Mode::Identification
        );
        assert_eq!(
            Mode::Settings.transition(ModeEvent::IdentificationRequested),
            Mode::Settings
        );
        assert_eq!(
            Mode::AmountEntry.transition(ModeEvent::SessionFinished),
            Mode::AmountEntry
        );
    }
}
