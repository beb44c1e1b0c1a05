//! Input scan task
//!
//! 10 ms scan of the bound keys and switches. Key edges go out on the
//! event channel (with a haptic tick on press); switch positions are
//! published when they change.

use defmt::*;
use embassy_stm32::gpio::Input;
use embassy_time::{Duration, Instant, Ticker};
use heapless::Vec;

use kestrel_core::inputs::{decode_switch, Key, KeyEvent, KeyScanner, Switch, SwitchPosition, MAX_KEY_EVENTS};
use kestrel_drivers::haptic::KEY_CLICK;
use kestrel_drivers::Haptic;

use crate::boards::{PinAdapter, SwitchLines, BOARD};
use crate::channels::{KEY_EVENTS, SWITCHES};

/// Scan cadence
pub const INPUT_SCAN_MS: u64 = 10;

#[embassy_executor::task]
pub async fn input_task(
    keys: [Option<Input<'static>>; Key::COUNT],
    switches: [Option<SwitchLines>; Switch::COUNT],
    mut haptic: Option<Haptic<PinAdapter>>,
) {
    info!("Input task started");

    let mut scanner = KeyScanner::new();
    let mut positions = [SwitchPosition::Mid; Switch::COUNT];
    let mut ticker = Ticker::every(Duration::from_millis(INPUT_SCAN_MS));

    loop {
        ticker.next().await;
        let now = Instant::now().as_millis() as u32;

        let mut mask = 0u16;
        for binding in BOARD.keys {
            let i = binding.key.index();
            if let Some(pin) = &keys[i] {
                if pin.is_low() == binding.pin.inverted {
                    mask |= 1 << i;
                }
            }
        }

        let mut events: Vec<KeyEvent, MAX_KEY_EVENTS> = Vec::new();
        scanner.scan(mask, &mut events);
        for event in events {
            if let KeyEvent::Pressed(key) = event {
                debug!("key {:?} pressed", key);
                if let Some(h) = haptic.as_mut() {
                    h.play(KEY_CLICK, now);
                }
            }
            // A full channel just drops the edge; the scan keeps going
            let _ = KEY_EVENTS.try_send(event);
        }
        if let Some(h) = haptic.as_mut() {
            h.poll(now);
        }

        let mut changed = false;
        for binding in BOARD.switches {
            let i = binding.switch.index();
            if let Some(lines) = &switches[i] {
                let high_low = lines.high.is_low();
                let low_low = lines.low.as_ref().map(|l| l.is_low()).unwrap_or(false);
                let position = decode_switch(lines.kind, high_low, low_low);
                if position != positions[i] {
                    debug!("switch {:?} -> {:?}", binding.switch, position);
                    positions[i] = position;
                    changed = true;
                }
            }
        }
        if changed {
            SWITCHES.signal(positions);
        }
    }
}
