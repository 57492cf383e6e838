//! Events that trigger mode transitions

/// Events that can trigger mode transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    // User navigation events
    /// Identification button pressed while idle
    IdentificationRequested,
    /// Settings button pressed while idle
    SettingsRequested,

    // Completion events
    /// Identification session ended (any outcome except a fault)
    SessionFinished,
    /// Settings screen was shown and dismissed
    SettingsDismissed,

    // Fault events
    /// Unrecoverable condition reported by any component
    Fault,
}

impl ModeEvent {
    /// Check if this event indicates an error
    pub fn is_fault(&self) -> bool {
        matches!(self, ModeEvent::Fault)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_events() {
        assert!(ModeEvent::Fault.is_fault());
        assert!(!ModeEvent::SettingsDismissed.is_fault());
    }
}
