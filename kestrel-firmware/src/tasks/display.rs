//! Display task
//!
//! Renders the status screen every 100 ms from the latest published
//! state and flushes when the buffer changed. On the shutdown signal it
//! blanks the panel, kills the backlight, and parks.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_stm32::mode::Blocking;
use embassy_stm32::spi::Spi;
use embassy_time::{Duration, Ticker};

use kestrel_core::inputs::{Key, KeyEvent, StickAxis, Switch, SwitchPosition};
use kestrel_display::{DisplayBackend, FrameBuffer};
use kestrel_drivers::Backlight;

use crate::boards::BacklightPwm;
use crate::channels::{BatteryReading, BATTERY, DISPLAY_OFF, KEY_EVENTS, STICKS, SWITCHES};
use crate::display::{screens, St7565};

/// Render cadence
pub const FRAME_MS: u64 = 100;

#[embassy_executor::task]
pub async fn display_task(
    mut lcd: St7565<Spi<'static, Blocking>>,
    mut backlight: Backlight<BacklightPwm>,
    mut fb: FrameBuffer,
) {
    info!("Display task started");
    backlight.on();

    let mut ticker = Ticker::every(Duration::from_millis(FRAME_MS));
    let mut battery: Option<BatteryReading> = None;
    let mut sticks = [0i16; StickAxis::COUNT];
    let mut switches = [SwitchPosition::Mid; Switch::COUNT];
    let mut last_key: Option<Key> = None;

    loop {
        match select(ticker.next(), DISPLAY_OFF.wait()).await {
            Either::First(_) => {
                if let Some(reading) = BATTERY.try_take() {
                    battery = Some(reading);
                }
                if let Some(frame) = STICKS.try_take() {
                    sticks = frame;
                }
                if let Some(positions) = SWITCHES.try_take() {
                    switches = positions;
                }
                while let Ok(event) = KEY_EVENTS.try_receive() {
                    if let KeyEvent::Pressed(key) = event {
                        last_key = Some(key);
                    }
                }

                screens::main_screen(&mut fb, battery, &sticks, &switches, last_key);
                if fb.take_dirty() {
                    if let Err(e) = lcd.flush(fb.pages()) {
                        warn!("lcd flush failed: {:?}", e);
                    }
                }
            }
            Either::Second(()) => {
                backlight.off();
                fb.clear();
                let _ = lcd.flush(fb.pages());
                let _ = lcd.display_on(false);
                info!("display released for shutdown");
                // The power task owns the rail from here
                core::future::pending::<()>().await;
            }
        }
    }
}
