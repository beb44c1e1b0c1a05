//! Battery monitoring and charger state

pub mod monitor;

pub use monitor::{BatteryMonitor, BatteryStatus, ChargeState};
