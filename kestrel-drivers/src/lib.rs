//! Peripheral drivers for the Kestrel transmitter
//!
//! Polled drivers for the simple outputs a transmitter carries:
//!
//! - LCD backlight (PWM brightness)
//! - Haptic motor (pulse patterns)
//! - Status LED (steady/blink patterns, charge indication)
//!
//! All drivers are pure logic over the `kestrel-hal` pin traits and are
//! tested on the host against mock pins.

#![no_std]
#![deny(unsafe_code)]

pub mod backlight;
pub mod haptic;
pub mod led;

pub use backlight::Backlight;
pub use haptic::{Haptic, PulseStep};
pub use led::{LedMode, StatusLed};
