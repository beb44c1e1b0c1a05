//! Startup and shutdown sequencers
//!
//! Pure polled logic for the two places where power handling has to wait
//! on the outside world: the charge-hold loop before power-on, and the
//! wait-for-release before power-off. The firmware polls these at a
//! fixed cadence and applies the returned step to the hardware.

/// Continuous hold required to power on from the charge display
pub const POWER_ON_DELAY_MS: u32 = 500;

/// Poll cadence the sequencers are designed around
pub const POWER_POLL_MS: u32 = 10;

/// Which way the bring-up code should come up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootPath {
    /// Normal power-on (button boot or crash recovery)
    Run,
    /// Charger attached with the radio off: enter the charge-hold loop
    ChargeHold,
}

/// Decide the boot path from the reset classification and charger state
///
/// Crash recovery never routes through the charge display, even when the
/// charger is attached: the radio was on, so it comes back on.
pub fn boot_path(unexpected_shutdown: bool, charger_active: bool) -> BootPath {
    if unexpected_shutdown {
        BootPath::Run
    } else if charger_active {
        BootPath::ChargeHold
    } else {
        BootPath::Run
    }
}

/// Outcome of one charge-hold poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupStep {
    /// Stay in the loop; refresh the charge display and poll again
    Continue,
    /// Button held long enough: power on
    PowerOn,
    /// Charger removed with the button idle: release the rail
    PowerOff,
}

/// The charge-hold loop
///
/// Tracks how long the power button has been held continuously. Any
/// release resets the accounting, so a press interval never spans a
/// release.
#[derive(Debug, Default)]
pub struct StartupSequencer {
    press_start: Option<u32>,
}

impl StartupSequencer {
    pub const fn new() -> Self {
        Self { press_start: None }
    }

    /// Poll with the current time and input levels
    pub fn poll(&mut self, now_ms: u32, button_pressed: bool, charger_active: bool) -> StartupStep {
        if button_pressed {
            let start = *self.press_start.get_or_insert(now_ms);
            if now_ms.wrapping_sub(start) >= POWER_ON_DELAY_MS {
                StartupStep::PowerOn
            } else {
                StartupStep::Continue
            }
        } else if !charger_active {
            StartupStep::PowerOff
        } else {
            self.press_start = None;
            StartupStep::Continue
        }
    }
}

/// Outcome of one shutdown poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShutdownStep {
    /// Button still held: keep feeding the watchdog and poll again
    WaitRelease,
    /// Released with the charger attached: record the soft-reset reason
    /// and request a system reset
    SoftReset,
    /// Released with no charger: record the shutdown reason and release
    /// the power rail
    RailOff,
}

/// One shutdown poll
///
/// The rail must not drop while the button is held, or the radio would
/// power straight back on from the same press.
pub fn shutdown_step(button_pressed: bool, charger_active: bool) -> ShutdownStep {
    if button_pressed {
        ShutdownStep::WaitRelease
    } else if charger_active {
        ShutdownStep::SoftReset
    } else {
        ShutdownStep::RailOff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_path_decision() {
        assert_eq!(boot_path(true, true), BootPath::Run);
        assert_eq!(boot_path(true, false), BootPath::Run);
        assert_eq!(boot_path(false, true), BootPath::ChargeHold);
        assert_eq!(boot_path(false, false), BootPath::Run);
    }

    #[test]
    fn test_long_press_powers_on() {
        let mut seq = StartupSequencer::new();
        let mut now = 0;
        loop {
            match seq.poll(now, true, true) {
                StartupStep::Continue => {
                    assert!(now < POWER_ON_DELAY_MS);
                    now += POWER_POLL_MS;
                }
                StartupStep::PowerOn => break,
                StartupStep::PowerOff => panic!("charger attached, must not power off"),
            }
        }
        assert_eq!(now, POWER_ON_DELAY_MS);
    }

    #[test]
    fn test_release_resets_held_time() {
        let mut seq = StartupSequencer::new();
        // Hold for most of the threshold, then bounce
        let mut now = 0;
        while now < POWER_ON_DELAY_MS - POWER_POLL_MS {
            assert_eq!(seq.poll(now, true, true), StartupStep::Continue);
            now += POWER_POLL_MS;
        }
        assert_eq!(seq.poll(now, false, true), StartupStep::Continue);
        now += POWER_POLL_MS;

        // A fresh press starts the clock over
        let restart = now;
        while now.wrapping_sub(restart) < POWER_ON_DELAY_MS {
            assert_eq!(seq.poll(now, true, true), StartupStep::Continue);
            now += POWER_POLL_MS;
        }
        assert_eq!(seq.poll(now, true, true), StartupStep::PowerOn);
    }

    #[test]
    fn test_charger_removal_powers_off() {
        let mut seq = StartupSequencer::new();
        assert_eq!(seq.poll(0, false, true), StartupStep::Continue);
        assert_eq!(seq.poll(10, false, false), StartupStep::PowerOff);
    }

    #[test]
    fn test_press_outranks_charger_removal() {
        // Charger unplugged in the same poll as a press: the press wins
        let mut seq = StartupSequencer::new();
        assert_eq!(seq.poll(0, true, false), StartupStep::Continue);
    }

    #[test]
    fn test_held_time_survives_timestamp_wrap() {
        let mut seq = StartupSequencer::new();
        let start = u32::MAX - 100;
        assert_eq!(seq.poll(start, true, true), StartupStep::Continue);
        assert_eq!(
            seq.poll(start.wrapping_add(POWER_ON_DELAY_MS), true, true),
            StartupStep::PowerOn
        );
    }

    #[test]
    fn test_shutdown_waits_for_release() {
        assert_eq!(shutdown_step(true, false), ShutdownStep::WaitRelease);
        assert_eq!(shutdown_step(true, true), ShutdownStep::WaitRelease);
        assert_eq!(shutdown_step(false, true), ShutdownStep::SoftReset);
        assert_eq!(shutdown_step(false, false), ShutdownStep::RailOff);
    }
}
