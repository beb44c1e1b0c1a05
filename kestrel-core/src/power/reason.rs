//! Reset-reason classification
//!
//! Two RTC backup-domain registers survive everything short of losing
//! battery power: one holds the last recorded power reason, the other a
//! signature proving this firmware initialized the domain. Together with
//! the MCU reset flags they answer the one question the bring-up code
//! cares about: did the last session end cleanly, or did we crash?

/// Signature written to the backup domain once this firmware has run
pub const BACKUP_SIGNATURE: u32 = 0x4B53_544C; // "KSTL"

/// Power reasons recorded in the backup domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum PowerReason {
    /// Clean power-off: the shutdown procedure ran to completion
    Shutdown = 0x0FF5_EA5E,
    /// Deliberate reboot (shutdown with the charger attached)
    SoftReset = 0x50F7_8007,
}

/// Access to the two backup-domain registers
///
/// Implemented by the chip glue over the RTC backup registers, and by a
/// plain struct in host tests.
pub trait BackupRegisters {
    /// Read the recorded power reason
    fn reason(&self) -> u32;

    /// Record a power reason
    fn set_reason(&mut self, value: u32);

    /// Read the firmware signature register
    fn signature(&self) -> u32;

    /// Write the firmware signature register
    fn set_signature(&mut self, value: u32);
}

/// Raw reset status flags, captured from the RCC once at boot
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResetFlags {
    /// Independent or window watchdog fired
    pub watchdog: bool,
    /// Software-requested system reset
    pub software: bool,
    /// Power-on / power-down reset
    pub power_on: bool,
    /// Brownout reset
    pub brownout: bool,
    /// External reset pin
    pub pin: bool,
}

/// Classified reset cause, most specific flag wins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetKind {
    Watchdog,
    Software,
    PowerOn,
    Brownout,
    External,
}

impl ResetFlags {
    /// Classify the flags into a single cause
    ///
    /// On these parts a software reset also raises the pin flag, and a
    /// power-on raises the brownout flag, so precedence matters.
    pub fn classify(&self) -> ResetKind {
        if self.watchdog {
            ResetKind::Watchdog
        } else if self.software {
            ResetKind::Software
        } else if self.power_on {
            ResetKind::PowerOn
        } else if self.brownout {
            ResetKind::Brownout
        } else {
            ResetKind::External
        }
    }
}

/// Decide whether the previous session ended in a crash
///
/// - A watchdog reset is always a crash.
/// - A software reset is a crash unless the soft-reset reason was
///   recorded first (panic handlers also reach `SCB::sys_reset`).
/// - Any other reset is a crash only if the backup domain carries our
///   signature but no clean-shutdown reason. A fresh battery insertion
///   has no signature and boots normally.
pub fn unexpected_shutdown(kind: ResetKind, regs: &impl BackupRegisters) -> bool {
    match kind {
        ResetKind::Watchdog => true,
        ResetKind::Software => regs.reason() != PowerReason::SoftReset as u32,
        _ => {
            regs.signature() == BACKUP_SIGNATURE && regs.reason() != PowerReason::Shutdown as u32
        }
    }
}

/// Record a clean shutdown before releasing the power rail
pub fn mark_shutdown(regs: &mut impl BackupRegisters) {
    regs.set_reason(PowerReason::Shutdown as u32);
    regs.set_signature(BACKUP_SIGNATURE);
}

/// Record a deliberate reboot before requesting a system reset
pub fn mark_soft_reset(regs: &mut impl BackupRegisters) {
    regs.set_reason(PowerReason::SoftReset as u32);
    regs.set_signature(BACKUP_SIGNATURE);
}

/// Clear the recorded reason once the session is up
///
/// Leaves the signature in place; from here on, any reset that is not
/// preceded by `mark_shutdown`/`mark_soft_reset` reads as a crash.
pub fn mark_running(regs: &mut impl BackupRegisters) {
    regs.set_reason(0);
    regs.set_signature(BACKUP_SIGNATURE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockBackup {
        reason: u32,
        signature: u32,
    }

    impl BackupRegisters for MockBackup {
        fn reason(&self) -> u32 {
            self.reason
        }
        fn set_reason(&mut self, value: u32) {
            self.reason = value;
        }
        fn signature(&self) -> u32 {
            self.signature
        }
        fn set_signature(&mut self, value: u32) {
            self.signature = value;
        }
    }

    #[test]
    fn test_watchdog_is_always_a_crash() {
        let mut regs = MockBackup::default();
        mark_shutdown(&mut regs);
        assert!(unexpected_shutdown(ResetKind::Watchdog, &regs));
    }

    #[test]
    fn test_fresh_battery_is_not_a_crash() {
        // Backup domain all zeroes: never ran before
        let regs = MockBackup::default();
        assert!(!unexpected_shutdown(ResetKind::PowerOn, &regs));
        assert!(!unexpected_shutdown(ResetKind::External, &regs));
    }

    #[test]
    fn test_clean_shutdown_then_power_on() {
        let mut regs = MockBackup::default();
        mark_shutdown(&mut regs);
        assert!(!unexpected_shutdown(ResetKind::External, &regs));
    }

    #[test]
    fn test_crash_after_running() {
        let mut regs = MockBackup::default();
        mark_running(&mut regs);
        // Pin reset mid-session with no shutdown recorded
        assert!(unexpected_shutdown(ResetKind::External, &regs));
        assert!(unexpected_shutdown(ResetKind::PowerOn, &regs));
    }

    #[test]
    fn test_soft_reset_is_deliberate() {
        let mut regs = MockBackup::default();
        mark_soft_reset(&mut regs);
        assert!(!unexpected_shutdown(ResetKind::Software, &regs));

        // A software reset without the marker is a panic path
        mark_running(&mut regs);
        assert!(unexpected_shutdown(ResetKind::Software, &regs));
    }

    #[test]
    fn test_classify_precedence() {
        let flags = ResetFlags {
            watchdog: true,
            software: true,
            pin: true,
            ..Default::default()
        };
        assert_eq!(flags.classify(), ResetKind::Watchdog);

        let flags = ResetFlags {
            software: true,
            pin: true,
            ..Default::default()
        };
        assert_eq!(flags.classify(), ResetKind::Software);

        let flags = ResetFlags {
            power_on: true,
            brownout: true,
            ..Default::default()
        };
        assert_eq!(flags.classify(), ResetKind::PowerOn);

        assert_eq!(ResetFlags::default().classify(), ResetKind::External);
    }
}
