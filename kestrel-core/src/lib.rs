//! Board-agnostic core logic for the Kestrel transmitter firmware
//!
//! This crate contains all behavior that does not depend on a specific
//! PCB revision:
//!
//! - Power sequencing state machine and the startup/shutdown sequencers
//! - Reset-reason classification (clean shutdown vs. crash/watchdog)
//! - Input handling (debouncing, key scanning, switch decoding,
//!   stick calibration)
//! - Battery voltage monitoring and charger state decoding
//! - Board description types and persisted calibration data

#![no_std]
#![deny(unsafe_code)]

pub mod battery;
pub mod config;
pub mod inputs;
pub mod power;
