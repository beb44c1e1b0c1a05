//! LCD driver and screen rendering

pub mod screens;
pub mod st7565;

pub use st7565::St7565;
