//! Haptic feedback motor
//!
//! The vibration motor is a plain on/off output; patterns are played by
//! polling with a millisecond timestamp from the tick task.

use kestrel_hal::OutputPin;

/// One step of a pulse pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseStep {
    pub on_ms: u16,
    pub off_ms: u16,
}

/// Short tick for key feedback
pub const KEY_CLICK: &[PulseStep] = &[PulseStep { on_ms: 20, off_ms: 0 }];

/// Double buzz on power-on
pub const POWER_ON: &[PulseStep] = &[
    PulseStep { on_ms: 60, off_ms: 60 },
    PulseStep { on_ms: 60, off_ms: 0 },
];

/// Long buzz for warnings (low battery)
pub const WARNING: &[PulseStep] = &[PulseStep {
    on_ms: 300,
    off_ms: 0,
}];

/// Haptic motor driver
pub struct Haptic<P> {
    pin: P,
    /// Motor driven when pin is LOW on some boards
    inverted: bool,
    pattern: Option<&'static [PulseStep]>,
    step: usize,
    in_on_phase: bool,
    phase_start: u32,
}

impl<P: OutputPin> Haptic<P> {
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut haptic = Self {
            pin,
            inverted,
            pattern: None,
            step: 0,
            in_on_phase: false,
            phase_start: 0,
        };
        haptic.drive(false);
        haptic
    }

    /// Start playing a pattern; replaces anything in progress
    pub fn play(&mut self, pattern: &'static [PulseStep], now_ms: u32) {
        self.pattern = Some(pattern);
        self.step = 0;
        self.in_on_phase = true;
        self.phase_start = now_ms;
        self.drive(!pattern.is_empty());
    }

    /// Advance the pattern; returns true while still playing
    pub fn poll(&mut self, now_ms: u32) -> bool {
        let Some(pattern) = self.pattern else {
            return false;
        };
        let Some(step) = pattern.get(self.step) else {
            self.stop();
            return false;
        };

        let elapsed = now_ms.wrapping_sub(self.phase_start);
        if self.in_on_phase {
            if elapsed >= step.on_ms as u32 {
                self.in_on_phase = false;
                self.phase_start = now_ms;
                self.drive(false);
                // Zero-length off phase: fall through on the next poll
            }
        } else if elapsed >= step.off_ms as u32 {
            self.step += 1;
            self.phase_start = now_ms;
            if self.step < pattern.len() {
                self.in_on_phase = true;
                self.drive(true);
            } else {
                self.stop();
                return false;
            }
        }
        true
    }

    /// Stop immediately and release the motor
    pub fn stop(&mut self) {
        self.pattern = None;
        self.drive(false);
    }

    pub fn is_playing(&self) -> bool {
        self.pattern.is_some()
    }

    fn drive(&mut self, on: bool) {
        self.pin.set_state(on != self.inverted);
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

    fn haptic() -> Haptic<MockPin> {
        Haptic::new(MockPin { high: true }, false)
    }

    #[test]
    fn test_idle_motor_is_off() {
        let h = haptic();
        assert!(!h.pin.high);
        assert!(!h.is_playing());
    }

    #[test]
    fn test_single_pulse() {
        let mut h = haptic();
        h.play(KEY_CLICK, 0);
        assert!(h.pin.high);

        assert!(h.poll(10));
        assert!(h.pin.high);

        // On phase over at 20 ms, zero off phase ends the pattern
        assert!(h.poll(20));
        assert!(!h.pin.high);
        assert!(!h.poll(20));
        assert!(!h.is_playing());
    }

    #[test]
    fn test_double_pulse_sequence() {
        let mut h = haptic();
        h.play(POWER_ON, 0);
        assert!(h.pin.high);

        h.poll(60); // first on phase done
        assert!(!h.pin.high);

        h.poll(120); // first off phase done, second pulse starts
        assert!(h.pin.high);

        h.poll(180); // second on phase done
        assert!(!h.pin.high);
        assert!(!h.poll(180));
    }

    #[test]
    fn test_play_replaces_pattern() {
        let mut h = haptic();
        h.play(WARNING, 0);
        h.poll(100);
        assert!(h.pin.high);

        h.play(KEY_CLICK, 100);
        h.poll(120);
        assert!(!h.pin.high);
        assert!(!h.poll(121));
    }

    #[test]
    fn test_inverted_drive() {
        let mut h = Haptic::new(MockPin { high: false }, true);
        assert!(h.pin.high); // idle = high when inverted
        h.play(KEY_CLICK, 0);
        assert!(!h.pin.high);
    }
}
