//! Power task
//!
//! Owns the power button, the rail latch, the backup registers, and the
//! watchdog. Detects the power-off long press and runs the shutdown
//! procedure from `kestrel-core`: wait for release feeding the
//! watchdog, then soft-reset into the charge display if the charger is
//! still attached, or record the clean shutdown and drop the rail.

use defmt::*;
use embassy_stm32::gpio::{Input, Output};
use embassy_time::Timer;

use kestrel_core::battery::ChargeState;
use kestrel_core::inputs::Debouncer;
use kestrel_core::power::{
    mark_shutdown, mark_soft_reset, sequencer::POWER_POLL_MS, shutdown_step, PowerEvent,
    PowerState, ShutdownStep,
};

use crate::boards::{button_pressed, charger_active};
use crate::channels::{CHARGER, DISPLAY_OFF, TICK_SIGNAL};
use crate::pwr::{BackupDomain, Iwdg};

/// Continuous hold that powers the radio off
pub const POWER_OFF_HOLD_MS: u32 = 1000;

#[embassy_executor::task]
pub async fn power_task(
    button: Input<'static>,
    usb_charger: Option<Input<'static>>,
    mut latch: Output<'static>,
    mut backup: BackupDomain,
    mut wdg: Iwdg,
) {
    info!("Power task started");
    use kestrel_hal::Watchdog;
    wdg.start();

    let mut state = PowerState::Running;
    let mut held_ms = 0u32;
    let mut last_tick = 0u32;
    let mut charge = ChargeState::NotCharging;
    let mut usb_debounce = Debouncer::new(charger_active(&usb_charger));

    loop {
        let now = TICK_SIGNAL.wait().await;
        wdg.feed();
        let delta = now.wrapping_sub(last_tick);
        last_tick = now;

        // These boards do not bring out the charge IC status lines;
        // debounced charger presence is the whole signal
        let new_charge = if usb_debounce.update(charger_active(&usb_charger)) {
            ChargeState::Charging
        } else {
            ChargeState::NotCharging
        };
        if new_charge != charge {
            charge = new_charge;
            CHARGER.signal(charge);
        }

        if button_pressed(&button) {
            held_ms = held_ms.saturating_add(delta);
        } else {
            held_ms = 0;
        }

        if held_ms >= POWER_OFF_HOLD_MS {
            state = state.transition(PowerEvent::ShutdownRequested);
            info!("power button held {} ms, shutting down", held_ms);
            DISPLAY_OFF.signal(());
            // Give the display task a beat to blank the panel
            Timer::after_millis(50).await;
            shutdown(state, &button, &usb_charger, &mut latch, &mut backup, &mut wdg).await;
        }
    }
}

/// The point of no return: never comes back
async fn shutdown(
    mut state: PowerState,
    button: &Input<'static>,
    usb_charger: &Option<Input<'static>>,
    latch: &mut Output<'static>,
    backup: &mut BackupDomain,
    wdg: &mut Iwdg,
) {
    use kestrel_hal::Watchdog;

    loop {
        match shutdown_step(button_pressed(button), charger_active(usb_charger)) {
            ShutdownStep::WaitRelease => {
                wdg.feed();
                Timer::after_millis(POWER_POLL_MS as u64).await;
            }
            ShutdownStep::SoftReset => {
                state = state.transition(PowerEvent::ChargerStillPresent);
                info!("charger attached, rebooting into charge display ({:?})", state);
                mark_soft_reset(backup);
                cortex_m::peripheral::SCB::sys_reset();
            }
            ShutdownStep::RailOff => {
                state = state.transition(PowerEvent::ShutdownComplete);
                info!("rail off ({:?})", state);
                mark_shutdown(backup);
                latch.set_low();
                // Only reachable on bench power; stay quiet so the
                // watchdog does not bounce us back as a crash
                loop {
                    wdg.feed();
                    Timer::after_millis(100).await;
                }
            }
        }
    }
}
