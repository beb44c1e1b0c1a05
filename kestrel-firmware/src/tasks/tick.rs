//! Tick task
//!
//! Periodic heartbeat for the power task: long-press accounting and the
//! watchdog feed both hang off it.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use crate::channels::TICK_SIGNAL;

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u32 = 100;

/// Tick task - sends periodic tick signals with a timestamp
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS as u64));
    let start = Instant::now();

    loop {
        ticker.next().await;
        TICK_SIGNAL.signal(start.elapsed().as_millis() as u32);
    }
}
