//! Status LED task
//!
//! Follows charger state, with low battery overriding as a fast blink.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use kestrel_core::battery::ChargeState;
use kestrel_drivers::led::LedMode;
use kestrel_drivers::StatusLed;

use crate::boards::PinAdapter;
use crate::channels::{CHARGER, LOW_BATTERY};

/// Fast blink for the low-battery warning
const LOW_BATTERY_BLINK: LedMode = LedMode::Blink {
    on_ms: 100,
    off_ms: 100,
};

#[embassy_executor::task]
pub async fn led_task(led: Option<StatusLed<PinAdapter>>) {
    let Some(mut led) = led else {
        info!("no status LED on this board");
        return;
    };
    info!("LED task started");

    let mut charge = ChargeState::NotCharging;
    let mut low_battery = false;
    let mut ticker = Ticker::every(Duration::from_millis(100));

    loop {
        ticker.next().await;

        if let Some(state) = CHARGER.try_take() {
            charge = state;
        }
        if let Some(low) = LOW_BATTERY.try_take() {
            low_battery = low;
        }

        if low_battery {
            if led.mode() != LOW_BATTERY_BLINK {
                led.set_mode(LOW_BATTERY_BLINK);
            }
        } else {
            led.show_charge(charge);
        }
        led.poll(Instant::now().as_millis() as u32);
    }
}
