//! Inter-task communication
//!
//! Static embassy-sync channels and signals between the tasks. Signals
//! carry latest-value state with a single consumer each; the key event
//! channel buffers edges.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use kestrel_core::battery::{BatteryStatus, ChargeState};
use kestrel_core::inputs::{KeyEvent, StickAxis, Switch, SwitchPosition};

/// Key event buffer depth
const KEY_CHANNEL_SIZE: usize = 8;

/// Debounced key edges from the input task (consumed by the display task)
pub static KEY_EVENTS: Channel<CriticalSectionRawMutex, KeyEvent, KEY_CHANNEL_SIZE> =
    Channel::new();

/// 100 ms heartbeat carrying milliseconds since boot (consumed by the
/// power task, which feeds the watchdog off it)
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u32> = Signal::new();

/// Latest calibrated stick frame (consumed by the display task)
pub static STICKS: Signal<CriticalSectionRawMutex, [i16; StickAxis::COUNT]> = Signal::new();

/// Latest switch positions (consumed by the display task)
pub static SWITCHES: Signal<CriticalSectionRawMutex, [SwitchPosition; Switch::COUNT]> =
    Signal::new();

/// Battery sample
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryReading {
    pub mv: u16,
    pub status: BatteryStatus,
}

/// Latest battery reading (consumed by the display task)
pub static BATTERY: Signal<CriticalSectionRawMutex, BatteryReading> = Signal::new();

/// Low-battery flag edges from the ADC task (consumed by the LED task)
pub static LOW_BATTERY: Signal<CriticalSectionRawMutex, bool> = Signal::new();

/// Charger state changes from the power task (consumed by the LED task)
pub static CHARGER: Signal<CriticalSectionRawMutex, ChargeState> = Signal::new();

/// Tells the display task to blank and release the panel before the
/// rail drops
pub static DISPLAY_OFF: Signal<CriticalSectionRawMutex, ()> = Signal::new();
