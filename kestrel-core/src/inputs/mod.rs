//! Input handling
//!
//! Debouncing, key scanning, switch decoding, and stick calibration.
//! Everything here works on sampled levels and raw ADC counts; the
//! firmware owns the GPIO/ADC reads.

pub mod debounce;
pub mod keys;
pub mod sticks;
pub mod switches;

pub use debounce::Debouncer;
pub use keys::{Key, KeyEvent, KeyScanner, MAX_KEY_EVENTS};
pub use sticks::{AxisCalibration, StickAxis, STICK_RESOLUTION};
pub use switches::{decode_switch, Switch, SwitchKind, SwitchPosition};
