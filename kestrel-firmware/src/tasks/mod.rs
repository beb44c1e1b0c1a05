//! Embassy async tasks
//!
//! Each task owns its peripherals and communicates through the statics
//! in `channels`.

pub mod adc;
pub mod display;
pub mod inputs;
pub mod leds;
pub mod power;
pub mod tick;

pub use adc::adc_task;
pub use display::display_task;
pub use inputs::input_task;
pub use leds::led_task;
pub use power::power_task;
pub use tick::tick_task;
