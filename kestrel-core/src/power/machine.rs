//! Power state machine definition
//!
//! Everything the firmware does with the power rail, the charge display,
//! and the shutdown procedure is a function of the current state and an
//! event.

use super::events::PowerEvent;

/// Power states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Rail just latched, deciding which way to come up
    Boot,
    /// Charger attached with the radio off; charge screen/LED active
    ChargeDisplay,
    /// Normal operation
    Running,
    /// Power button held; waiting for release before cutting the rail
    ShuttingDown,
    /// Shutdown finished with the charger still attached; the firmware
    /// soft-resets so the charge display comes back
    Restarting,
    /// Rail released (or about to be); nothing leaves this state
    Off,
}

impl PowerState {
    /// Check if the power rail latch must be held in this state
    pub fn rail_enabled(&self) -> bool {
        !matches!(self, PowerState::Off)
    }

    /// Check if the normal UI (inputs, main screen) is active
    pub fn ui_active(&self) -> bool {
        matches!(self, PowerState::Running)
    }

    /// Check if the charge screen should be shown
    pub fn charge_ui(&self) -> bool {
        matches!(self, PowerState::ChargeDisplay)
    }

    /// Check if this state ends in a hardware action (reset or rail cut)
    pub fn is_final(&self) -> bool {
        matches!(self, PowerState::Off | PowerState::Restarting)
    }

    /// Process an event and return the next state
    ///
    /// This is the core transition logic. Pairs not listed stay in the
    /// current state.
    pub fn transition(self, event: PowerEvent) -> Self {
        use PowerEvent::*;
        use PowerState::*;

        match (self, event) {
            // Boot decisions, in the order the bring-up code asks them
            (Boot, CrashRecovered) => Running,
            (Boot, ChargerDetected) => ChargeDisplay,
            (Boot, BootComplete) => Running,

            // Charge-hold loop outcomes
            (ChargeDisplay, ButtonHeld) => Running,
            (ChargeDisplay, ChargerRemoved) => Off,

            // Shutdown
            (Running, ShutdownRequested) => ShuttingDown,
            (ShuttingDown, ChargerStillPresent) => Restarting,
            (ShuttingDown, ShutdownComplete) => Off,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crash_recovery_skips_charge_display() {
        // A watchdog/crash reset powers straight on even when charging
        let state = PowerState::Boot;
        assert_eq!(state.transition(PowerEvent::CrashRecovered), PowerState::Running);
    }

    #[test]
    fn test_charger_boot_flow() {
        let state = PowerState::Boot;
        let charging = state.transition(PowerEvent::ChargerDetected);
        assert_eq!(charging, PowerState::ChargeDisplay);

        // Long press while charging turns the radio on
        assert_eq!(
            charging.transition(PowerEvent::ButtonHeld),
            PowerState::Running
        );

        // Charger removed while idle powers off
        assert_eq!(
            charging.transition(PowerEvent::ChargerRemoved),
            PowerState::Off
        );
    }

    #[test]
    fn test_shutdown_flow() {
        let running = PowerState::Boot.transition(PowerEvent::BootComplete);
        assert_eq!(running, PowerState::Running);

        let shutting = running.transition(PowerEvent::ShutdownRequested);
        assert_eq!(shutting, PowerState::ShuttingDown);

        // Charger still plugged: soft reset back into the charge display
        assert_eq!(
            shutting.transition(PowerEvent::ChargerStillPresent),
            PowerState::Restarting
        );

        // No charger: rail goes down
        assert_eq!(
            shutting.transition(PowerEvent::ShutdownComplete),
            PowerState::Off
        );
    }

    #[test]
    fn test_off_is_terminal() {
        let off = PowerState::Off;
        let events = [
            PowerEvent::CrashRecovered,
            PowerEvent::ChargerDetected,
            PowerEvent::BootComplete,
            PowerEvent::ButtonHeld,
            PowerEvent::ChargerRemoved,
            PowerEvent::ShutdownRequested,
            PowerEvent::ChargerStillPresent,
            PowerEvent::ShutdownComplete,
        ];
        for event in events {
            assert_eq!(off.transition(event), PowerState::Off);
        }
    }

    #[test]
    fn test_shutdown_only_from_running() {
        for state in [PowerState::Boot, PowerState::ChargeDisplay, PowerState::Off] {
            assert_eq!(state.transition(PowerEvent::ShutdownRequested), state);
        }
    }

    #[test]
    fn test_rail_predicate() {
        assert!(PowerState::Boot.rail_enabled());
        assert!(PowerState::ChargeDisplay.rail_enabled());
        assert!(PowerState::Running.rail_enabled());
        assert!(PowerState::ShuttingDown.rail_enabled());
        assert!(PowerState::Restarting.rail_enabled());
        assert!(!PowerState::Off.rail_enabled());
    }

    #[test]
    fn test_ui_predicates() {
        assert!(PowerState::Running.ui_active());
        assert!(!PowerState::ChargeDisplay.ui_active());
        assert!(PowerState::ChargeDisplay.charge_ui());
        assert!(PowerState::Off.is_final());
        assert!(PowerState::Restarting.is_final());
        assert!(!PowerState::ShuttingDown.is_final());
    }
}
