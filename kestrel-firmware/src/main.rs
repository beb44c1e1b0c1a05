//! Kestrel - RC transmitter firmware
//!
//! Main firmware binary for the STM32F2-based radios. Bring-up follows
//! the order the hardware demands: latch the power rail, classify the
//! reset, run the charge-hold loop if the charger brought us up, then
//! start the tasks.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::{Instant, Timer};
use {defmt_rtt as _, panic_probe as _};

use kestrel_core::battery::{BatteryMonitor, ChargeState};
use kestrel_core::config::CalibrationData;
use kestrel_core::inputs::Debouncer;
use kestrel_core::power::sequencer::POWER_POLL_MS;
use kestrel_core::power::{
    boot_path, mark_running, mark_shutdown, unexpected_shutdown, BootPath, PowerEvent,
    PowerState, StartupSequencer, StartupStep,
};
use kestrel_display::{DisplayBackend, FrameBuffer};
use kestrel_hal::{FlashStorage, StorageKey};
use kestrel_hal_stm32::flash::Stm32FlashStorage;

mod boards;
mod channels;
mod display;
mod pwr;
mod tasks;

use boards::BoardIo;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_stm32::init(Default::default());
    // bind() latches the rail as its first act; everything after this
    // can afford to be slow
    let mut io = boards::bind(p);
    info!("Kestrel starting on {}", boards::BOARD.name);

    if let Err(e) = boards::BOARD.validate() {
        defmt::panic!("board table invalid: {:?}", e);
    }

    let reset = pwr::take_reset_flags();
    let kind = reset.classify();
    let mut backup = pwr::BackupDomain::enable();
    let crashed = unexpected_shutdown(kind, &backup);
    info!("reset cause {:?}, unexpected shutdown: {}", kind, crashed);

    let mut fb = FrameBuffer::new();
    if let Err(e) = io.lcd.init() {
        warn!("lcd init failed: {:?}", e);
    }

    let mut state = PowerState::Boot;
    match boot_path(crashed, boards::charger_active(&io.usb_charger)) {
        BootPath::ChargeHold => {
            state = state.transition(PowerEvent::ChargerDetected);
            info!("charger attached, entering charge display");
            match charge_hold(&mut io, &mut fb).await {
                StartupStep::PowerOn => {
                    state = state.transition(PowerEvent::ButtonHeld);
                    info!("power button held, powering on");
                }
                _ => {
                    state = state.transition(PowerEvent::ChargerRemoved);
                    info!("charger removed, powering off ({:?})", state);
                    mark_shutdown(&mut backup);
                    io.backlight.off();
                    io.pwr_latch.set_low();
                    loop {
                        Timer::after_millis(100).await;
                    }
                }
            }
        }
        BootPath::Run => {
            state = state.transition(if crashed {
                PowerEvent::CrashRecovered
            } else {
                PowerEvent::BootComplete
            });
        }
    }
    info!("power state {:?}", state);
    mark_running(&mut backup);

    let calibration = load_calibration(&mut io.flash).await;

    display::screens::splash(&mut fb, boards::BOARD.name);
    fb.take_dirty();
    if let Err(e) = io.lcd.flush(fb.pages()) {
        warn!("lcd flush failed: {:?}", e);
    }

    let BoardIo {
        pwr_latch,
        pwr_button,
        usb_charger,
        keys,
        switches,
        adc,
        sticks,
        battery,
        status_led,
        haptic,
        backlight,
        lcd,
        flash: _,
        wdg,
    } = io;

    spawner.must_spawn(tasks::tick_task());
    spawner.must_spawn(tasks::power_task(
        pwr_button, usb_charger, pwr_latch, backup, wdg,
    ));
    spawner.must_spawn(tasks::input_task(keys, switches, haptic));
    spawner.must_spawn(tasks::adc_task(adc, sticks, battery, calibration));
    spawner.must_spawn(tasks::display_task(lcd, backlight, fb));
    spawner.must_spawn(tasks::led_task(status_led));

    info!("{} up", boards::BOARD.name);
}

/// The charge-hold loop
///
/// Runs with the radio "off": rail latched, charge screen up, polling
/// the sequencer at its 10 ms cadence until it decides to power on or
/// drop the rail.
async fn charge_hold(io: &mut BoardIo, fb: &mut FrameBuffer) -> StartupStep {
    let mut seq = StartupSequencer::new();
    let mut monitor = BatteryMonitor::new(&boards::BOARD.battery);
    let mut usb_debounce = Debouncer::new(true);
    let mut last_refresh = 0u32;

    io.backlight.set_brightness(30);
    io.backlight.on();

    loop {
        let now = Instant::now().as_millis() as u32;
        let pressed = boards::button_pressed(&io.pwr_button);
        let charger = usb_debounce.update(boards::charger_active(&io.usb_charger));

        match seq.poll(now, pressed, charger) {
            StartupStep::Continue => {}
            step => return step,
        }

        // Screen and LED refresh at a gentler cadence than the poll
        if now.wrapping_sub(last_refresh) >= 100 {
            last_refresh = now;
            monitor.update_raw(io.adc.blocking_read(&mut io.battery));
            display::screens::charge_screen(
                fb,
                monitor.percent(),
                monitor.voltage_mv().unwrap_or(0),
            );
            if fb.take_dirty() {
                let _ = io.lcd.flush(fb.pages());
            }
            if let Some(led) = io.status_led.as_mut() {
                led.show_charge(ChargeState::Charging);
                led.poll(now);
            }
        }

        Timer::after_millis(POWER_POLL_MS as u64).await;
    }
}

/// Load stick calibration, seeding the store on first boot
async fn load_calibration(flash: &mut Stm32FlashStorage<'static>) -> CalibrationData {
    let mut buffer = [0u8; 128];
    match flash.read(StorageKey::StickCalibration, &mut buffer).await {
        Ok(len) => match CalibrationData::from_bytes(&buffer[..len]) {
            Some(data) => {
                info!("stick calibration loaded");
                data
            }
            None => {
                warn!("stored calibration invalid, using defaults");
                CalibrationData::new()
            }
        },
        Err(_) => {
            info!("no stored calibration, seeding defaults");
            let data = CalibrationData::new();
            match data.to_bytes(&mut buffer) {
                Ok(bytes) => {
                    if let Err(e) = flash.write(StorageKey::StickCalibration, bytes).await {
                        warn!("calibration seed failed: {:?}", e);
                    }
                }
                Err(_) => warn!("calibration serialization failed"),
            }
            data
        }
    }
}
