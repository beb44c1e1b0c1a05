//! Configuration types
//!
//! Board description tables (const data, one per hardware variant) and
//! the calibration blob persisted to flash.

pub mod board;
pub mod calibration;

pub use board::*;
pub use calibration::*;
