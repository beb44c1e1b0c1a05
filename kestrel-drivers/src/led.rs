//! Status LED
//!
//! Steady and blink patterns, polled with a millisecond timestamp.
//! Blink phase is free-running off the timestamp so several LEDs blink
//! in step without coordination.

use kestrel_core::battery::ChargeState;
use kestrel_hal::OutputPin;

/// LED display modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedMode {
    #[default]
    Off,
    On,
    Blink {
        on_ms: u16,
        off_ms: u16,
    },
}

/// Slow blink while charge current flows
pub const CHARGING_BLINK: LedMode = LedMode::Blink {
    on_ms: 500,
    off_ms: 500,
};

/// Status LED driver
pub struct StatusLed<P> {
    pin: P,
    /// LED lights when pin is LOW on some boards
    inverted: bool,
    mode: LedMode,
}

impl<P: OutputPin> StatusLed<P> {
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut led = Self {
            pin,
            inverted,
            mode: LedMode::Off,
        };
        led.drive(false);
        led
    }

    pub fn set_mode(&mut self, mode: LedMode) {
        self.mode = mode;
        // Steady modes take effect without waiting for a poll
        match mode {
            LedMode::Off => self.drive(false),
            LedMode::On => self.drive(true),
            LedMode::Blink { .. } => {}
        }
    }

    pub fn mode(&self) -> LedMode {
        self.mode
    }

    /// Map a charger state onto the LED
    pub fn show_charge(&mut self, state: ChargeState) {
        let mode = match state {
            ChargeState::Charging => CHARGING_BLINK,
            ChargeState::Complete => LedMode::On,
            ChargeState::NotCharging => LedMode::Off,
        };
        if mode != self.mode {
            self.set_mode(mode);
        }
    }

    /// Update the output for blink modes
    pub fn poll(&mut self, now_ms: u32) {
        if let LedMode::Blink { on_ms, off_ms } = self.mode {
            let period = on_ms as u32 + off_ms as u32;
            if period == 0 {
                self.drive(false);
                return;
            }
            self.drive(now_ms % period < on_ms as u32);
        }
    }

    fn drive(&mut self, lit: bool) {
        self.pin.set_state(lit != self.inverted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPin {
        high: bool,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }
        fn set_low(&mut self) {
            self.high = false;
        }
        fn toggle(&mut self) {
            self.high = !self.high;
        }
        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    fn led() -> StatusLed<MockPin> {
        StatusLed::new(MockPin { high: true }, false)
    }

    #[test]
    fn test_starts_dark() {
        let led = led();
        assert!(!led.pin.high);
    }

    #[test]
    fn test_steady_modes() {
        let mut led = led();
        led.set_mode(LedMode::On);
        assert!(led.pin.high);
        led.set_mode(LedMode::Off);
        assert!(!led.pin.high);
    }

    #[test]
    fn test_blink_phases() {
        let mut led = led();
        led.set_mode(LedMode::Blink {
            on_ms: 100,
            off_ms: 100,
        });

        led.poll(0);
        assert!(led.pin.high);
        led.poll(99);
        assert!(led.pin.high);
        led.poll(100);
        assert!(!led.pin.high);
        led.poll(200);
        assert!(led.pin.high);
    }

    #[test]
    fn test_charge_mapping() {
        let mut led = led();
        led.show_charge(ChargeState::Charging);
        assert_eq!(led.mode(), CHARGING_BLINK);

        led.show_charge(ChargeState::Complete);
        assert_eq!(led.mode(), LedMode::On);
        assert!(led.pin.high);

        led.show_charge(ChargeState::NotCharging);
        assert_eq!(led.mode(), LedMode::Off);
        assert!(!led.pin.high);
    }

    #[test]
    fn test_active_low_led() {
        let mut led = StatusLed::new(MockPin { high: false }, true);
        assert!(led.pin.high); // dark = high
        led.set_mode(LedMode::On);
        assert!(!led.pin.high);
    }
}
