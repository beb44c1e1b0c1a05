//! ADC task
//!
//! Samples the stick axes and the battery divider, applies the stored
//! calibration and the board's direction table, and publishes the
//! results.

use defmt::*;
use embassy_stm32::adc::{Adc, AnyAdcChannel};
use embassy_stm32::peripherals::ADC1;
use embassy_time::{Duration, Ticker};

use kestrel_core::battery::{BatteryMonitor, BatteryStatus};
use kestrel_core::config::CalibrationData;
use kestrel_core::inputs::StickAxis;

use crate::boards::BOARD;
use crate::channels::{BatteryReading, BATTERY, LOW_BATTERY, STICKS};

/// Sample cadence
pub const ADC_PERIOD_MS: u64 = 50;

#[embassy_executor::task]
pub async fn adc_task(
    mut adc: Adc<'static, ADC1>,
    mut sticks: [AnyAdcChannel<ADC1>; StickAxis::COUNT],
    mut battery: AnyAdcChannel<ADC1>,
    calibration: CalibrationData,
) {
    info!("ADC task started");

    let mut monitor = BatteryMonitor::new(&BOARD.battery);
    let mut low = false;
    let mut ticker = Ticker::every(Duration::from_millis(ADC_PERIOD_MS));

    loop {
        ticker.next().await;

        let mut frame = [0i16; StickAxis::COUNT];
        for binding in BOARD.sticks {
            let i = binding.axis.index();
            let raw = adc.blocking_read(&mut sticks[i]);
            let mut value = calibration.get(binding.axis).apply(raw);
            if binding.inverted {
                value = -value;
            }
            frame[i] = value;
        }
        STICKS.signal(frame);

        monitor.update_raw(adc.blocking_read(&mut battery));
        let status = monitor.check();
        BATTERY.signal(BatteryReading {
            mv: monitor.voltage_mv().unwrap_or(0),
            status,
        });

        let now_low = status != BatteryStatus::Ok;
        if now_low != low {
            low = now_low;
            if low {
                warn!("battery {} mV ({:?})", monitor.voltage_mv().unwrap_or(0), status);
            }
            LOW_BATTERY.signal(low);
        }
    }
}
