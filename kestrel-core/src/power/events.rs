//! Events that drive the power state machine

/// Events that can trigger power state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerEvent {
    // Boot decisions
    /// Previous session ended in a crash or watchdog reset
    CrashRecovered,
    /// Charger present at boot with no crash to recover from
    ChargerDetected,
    /// Normal button power-on path
    BootComplete,

    // Charge-hold loop outcomes
    /// Power button held past the power-on threshold
    ButtonHeld,
    /// Charger removed while the button was idle
    ChargerRemoved,

    // Shutdown
    /// Long press (or UI request) asked for power-off
    ShutdownRequested,
    /// Button released with the charger still attached
    ChargerStillPresent,
    /// Button released with no charger; rail can go down
    ShutdownComplete,
}

impl PowerEvent {
    /// Check if this event is only valid while deciding the boot path
    pub fn is_boot_event(&self) -> bool {
        matches!(
            self,
            PowerEvent::CrashRecovered | PowerEvent::ChargerDetected | PowerEvent::BootComplete
        )
    }

    /// Check if this event reflects a charger level change
    pub fn is_charger_event(&self) -> bool {
        matches!(
            self,
            PowerEvent::ChargerDetected
                | PowerEvent::ChargerRemoved
                | PowerEvent::ChargerStillPresent
        )
    }

    /// Check if this event came from the power button
    pub fn is_button_event(&self) -> bool {
        matches!(self, PowerEvent::ButtonHeld | PowerEvent::ShutdownRequested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_events() {
        assert!(PowerEvent::CrashRecovered.is_boot_event());
        assert!(PowerEvent::ChargerDetected.is_boot_event());
        assert!(!PowerEvent::ShutdownRequested.is_boot_event());
    }

    #[test]
    fn test_charger_events() {
        assert!(PowerEvent::ChargerRemoved.is_charger_event());
        assert!(PowerEvent::ChargerStillPresent.is_charger_event());
        assert!(!PowerEvent::ButtonHeld.is_charger_event());
    }

    #[test]
    fn test_button_events() {
        assert!(PowerEvent::ButtonHeld.is_button_event());
        assert!(PowerEvent::ShutdownRequested.is_button_event());
        assert!(!PowerEvent::BootComplete.is_button_event());
    }
}
