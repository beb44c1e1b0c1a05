//! LCD backlight
//!
//! Brightness control over a PWM channel. The level survives off/on so
//! the backlight comes back where the pilot left it.

use kestrel_hal::PwmOutput;

/// Default brightness after power-on
pub const DEFAULT_BRIGHTNESS: u8 = 70;

/// Backlight driver
pub struct Backlight<P> {
    pwm: P,
    level: u8,
    on: bool,
}

impl<P: PwmOutput> Backlight<P> {
    /// Create a backlight, initially off at the default level
    pub fn new(mut pwm: P) -> Self {
        pwm.set_duty_percent(0);
        pwm.enable();
        Self {
            pwm,
            level: DEFAULT_BRIGHTNESS,
            on: false,
        }
    }

    /// Set the brightness level, 0-100
    ///
    /// Applied immediately if the backlight is on; remembered either
    /// way. Values above 100 saturate.
    pub fn set_brightness(&mut self, level: u8) {
        self.level = level.min(100);
        if self.on {
            self.pwm.set_duty_percent(self.level);
        }
    }

    /// Turn the backlight on at the remembered level
    pub fn on(&mut self) {
        self.on = true;
        self.pwm.set_duty_percent(self.level);
    }

    /// Turn the backlight off, keeping the level
    pub fn off(&mut self) {
        self.on = false;
        self.pwm.set_duty_percent(0);
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn brightness(&self) -> u8 {
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock PWM channel for testing
    struct MockPwm {
        duty: u8,
        enabled: bool,
    }

    impl PwmOutput for MockPwm {
        fn set_duty_percent(&mut self, percent: u8) {
            self.duty = percent.min(100);
        }
        fn enable(&mut self) {
            self.enabled = true;
        }
        fn disable(&mut self) {
            self.enabled = false;
        }
    }

    fn mock() -> MockPwm {
        MockPwm {
            duty: 0,
            enabled: false,
        }
    }

    #[test]
    fn test_starts_off() {
        let bl = Backlight::new(mock());
        assert!(!bl.is_on());
        assert_eq!(bl.pwm.duty, 0);
        assert!(bl.pwm.enabled);
    }

    #[test]
    fn test_level_survives_off() {
        let mut bl = Backlight::new(mock());
        bl.set_brightness(40);
        bl.on();
        assert_eq!(bl.pwm.duty, 40);

        bl.off();
        assert_eq!(bl.pwm.duty, 0);

        bl.on();
        assert_eq!(bl.pwm.duty, 40);
    }

    #[test]
    fn test_brightness_while_off_is_deferred() {
        let mut bl = Backlight::new(mock());
        bl.set_brightness(90);
        assert_eq!(bl.pwm.duty, 0);
        bl.on();
        assert_eq!(bl.pwm.duty, 90);
    }

    #[test]
    fn test_brightness_saturates() {
        let mut bl = Backlight::new(mock());
        bl.on();
        bl.set_brightness(200);
        assert_eq!(bl.brightness(), 100);
        assert_eq!(bl.pwm.duty, 100);
    }
}
