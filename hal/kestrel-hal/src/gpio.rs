//! GPIO pin abstractions
//!
//! Digital I/O traits implemented by the chip glue. The boards in this
//! family wire most inputs active-low against internal pull-ups, so the
//! [`ActiveLow`] adapter is provided to keep the logical sense in one
//! place.

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Toggle the pin state
    fn toggle(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Active-low adapter
///
/// Wraps a pin so that "active" maps to the electrical low level. Works
/// for both directions: an `ActiveLow<Output>` drives low when set
/// active, an `ActiveLow<Input>` reads active when the line is low.
pub struct ActiveLow<P>(pub P);

impl<P: OutputPin> ActiveLow<P> {
    /// Drive the wrapped pin to its active (low) level
    pub fn set_active(&mut self, active: bool) {
        self.0.set_state(!active);
    }

    pub fn is_active(&self) -> bool {
        !self.0.is_set_high()
    }
}

impl<P: InputPin> ActiveLow<P> {
    /// Read the wrapped pin, active when low
    pub fn reads_active(&self) -> bool {
        self.0.is_low()
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

    impl InputPin for MockPin {
        fn is_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_set_state_default_method() {
        let mut pin = MockPin { high: false };
        pin.set_state(true);
        assert!(pin.is_set_high());
        pin.set_state(false);
        assert!(!pin.is_set_high());
    }

    #[test]
    fn test_active_low_output() {
        let mut led = ActiveLow(MockPin { high: true });
        led.set_active(true);
        assert!(!led.0.is_set_high());
        assert!(led.is_active());
        led.set_active(false);
        assert!(led.0.is_set_high());
    }

    #[test]
    fn test_active_low_input() {
        let button = ActiveLow(MockPin { high: false });
        assert!(button.reads_active());
    }
}
