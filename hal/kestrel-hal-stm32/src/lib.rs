//! STM32-specific HAL glue for the Kestrel firmware
//!
//! The transmitter boards in this family all carry STM32F2-class parts.
//! This crate provides what sits between the portable crates and
//! embassy-stm32:
//!
//! - GPIO claim tracking so a board binding bug surfaces at bring-up
//!   instead of as two drivers fighting over a pin
//! - ADC scaling constants and helpers
//! - The flash-backed key-value store for calibration data
//!
//! Peripheral access itself goes through embassy-stm32 directly from
//! the firmware crate; select the chip with one of the `stm32f205*`
//! features.

#![no_std]

pub mod adc;
pub mod flash;
pub mod gpio;

// Re-export shared types from kestrel-hal
pub use kestrel_hal::flash::StorageKey;
