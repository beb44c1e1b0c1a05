//! Kestrel hardware abstraction layer
//!
//! Trait seams between the portable crates and the chip glue. The
//! drivers crate consumes the pin and PWM traits with mock
//! implementations in its tests; the firmware implements them over
//! embassy-stm32.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  kestrel-drivers / kestrel-firmware     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  kestrel-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  kestrel-hal-stm32 + embassy-stm32      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`pwm::PwmOutput`] - Duty-cycle outputs (backlight)
//! - [`watchdog::Watchdog`] - Independent watchdog
//! - [`flash::FlashStorage`] - Persistent calibration storage

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod gpio;
pub mod pwm;
pub mod watchdog;

// Re-export key traits at crate root for convenience
pub use flash::{FlashError, FlashStorage, StorageKey};
pub use gpio::{ActiveLow, InputPin, OutputPin};
pub use pwm::PwmOutput;
pub use watchdog::Watchdog;
