//! Power domain glue
//!
//! Reset-flag capture, RTC backup register access, and the independent
//! watchdog. This is the only place the firmware touches registers
//! directly; everything above it goes through `kestrel-core`'s power
//! logic.

use embassy_stm32::pac;
use embassy_stm32::peripherals::IWDG;
use embassy_stm32::wdg::IndependentWatchdog;
use embassy_stm32::Peri;

use kestrel_core::power::{BackupRegisters, ResetFlags};

/// Watchdog timeout during normal operation
pub const WATCHDOG_TIMEOUT_MS: u32 = 1500;

/// Capture and clear the RCC reset flags
///
/// Must run once, early: the flags accumulate across resets until
/// cleared, and a stale watchdog flag would read as a crash on the next
/// boot.
pub fn take_reset_flags() -> ResetFlags {
    let csr = pac::RCC.csr().read();
    let flags = ResetFlags {
        watchdog: csr.iwdgrstf() || csr.wwdgrstf(),
        software: csr.sftrstf(),
        power_on: csr.porrstf(),
        brownout: csr.borrstf(),
        pin: csr.pinrstf(),
    };
    pac::RCC.csr().modify(|w| w.set_rmvf(true));
    flags
}

/// RTC backup registers BKP0R/BKP1R
///
/// BKP0R holds the power reason, BKP1R the firmware signature. Both
/// survive any reset while VBAT is present.
pub struct BackupDomain(());

impl BackupDomain {
    /// Unlock backup-domain writes and hand out the accessor
    pub fn enable() -> Self {
        pac::PWR.cr().modify(|w| w.set_dbp(true));
        Self(())
    }
}

impl BackupRegisters for BackupDomain {
    fn reason(&self) -> u32 {
        pac::RTC.bkpr(0).read().bkp()
    }

    fn set_reason(&mut self, value: u32) {
        pac::RTC.bkpr(0).write(|w| w.set_bkp(value));
    }

    fn signature(&self) -> u32 {
        pac::RTC.bkpr(1).read().bkp()
    }

    fn set_signature(&mut self, value: u32) {
        pac::RTC.bkpr(1).write(|w| w.set_bkp(value));
    }
}

/// Independent watchdog behind the `kestrel-hal` trait
pub struct Iwdg {
    inner: IndependentWatchdog<'static, IWDG>,
}

impl Iwdg {
    pub fn new(peri: Peri<'static, IWDG>) -> Self {
        Self {
            inner: IndependentWatchdog::new(peri, WATCHDOG_TIMEOUT_MS * 1000),
        }
    }
}

impl kestrel_hal::Watchdog for Iwdg {
    fn start(&mut self) {
        self.inner.unleash();
    }

    fn feed(&mut self) {
        self.inner.pet();
    }
}
