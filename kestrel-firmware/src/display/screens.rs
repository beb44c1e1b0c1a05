//! Screen rendering
//!
//! Pure drawing into the frame buffer; the display task decides when to
//! flush. Layout targets the 128x64 panel with the 5x7 font.

use core::fmt::Write;

use heapless::String;

use kestrel_core::battery::BatteryStatus;
use kestrel_core::inputs::{Key, StickAxis, Switch, SwitchPosition, STICK_RESOLUTION};
use kestrel_display::{FrameBuffer, TextStyle, FONT_5X7, WIDTH};

use crate::channels::BatteryReading;

/// Boot splash
pub fn splash(fb: &mut FrameBuffer, board: &str) {
    fb.clear();
    fb.draw_text(16, 20, &FONT_5X7, "KESTREL", TextStyle::DoubleSize);
    let mut line: String<24> = String::new();
    let _ = write!(line, "{}", board);
    fb.draw_text(16, 40, &FONT_5X7, &line, TextStyle::Normal);
}

/// Charge display shown while the radio is off with the charger in
pub fn charge_screen(fb: &mut FrameBuffer, percent: u8, mv: u16) {
    fb.clear();
    fb.draw_text(34, 6, &FONT_5X7, "CHARGING", TextStyle::Normal);

    // Battery outline with terminal nub
    fb.rect(24, 24, 76, 20);
    fb.fill_rect(100, 30, 4, 8);

    // Fill proportional to the charge estimate
    let fill = (72 * percent as usize) / 100;
    fb.fill_rect(26, 26, fill, 16);

    let mut line: String<24> = String::new();
    let _ = write!(line, "{}.{:02}V  {}%", mv / 1000, (mv % 1000) / 10, percent);
    let x = (WIDTH - line.len() * 6) / 2;
    fb.draw_text(x, 52, &FONT_5X7, &line, TextStyle::Normal);
}

/// Main status screen
pub fn main_screen(
    fb: &mut FrameBuffer,
    battery: Option<BatteryReading>,
    sticks: &[i16; StickAxis::COUNT],
    switches: &[SwitchPosition; Switch::COUNT],
    last_key: Option<Key>,
) {
    fb.clear();

    // Title bar
    let mut title: String<24> = String::new();
    let _ = match battery {
        Some(b) => write!(title, "KESTREL  {}.{:02}V", b.mv / 1000, (b.mv % 1000) / 10),
        None => write!(title, "KESTREL  --.-V"),
    };
    fb.draw_text(1, 1, &FONT_5X7, &title, TextStyle::Normal);
    fb.invert_rect(0, 0, WIDTH, 9);

    if let Some(b) = battery {
        let warn = match b.status {
            BatteryStatus::Ok => None,
            BatteryStatus::Low => Some("BATTERY LOW"),
            BatteryStatus::Critical => Some("BATTERY CRITICAL"),
        };
        if let Some(text) = warn {
            fb.draw_text(2, 56, &FONT_5X7, text, TextStyle::Inverted);
        }
    }

    // Stick bars, one gauge per axis
    for axis in StickAxis::ALL {
        let y = 14 + axis.index() * 8;
        fb.rect(8, y, 66, 6);
        // Map -1024..1024 onto the 64 inner columns
        let offset = ((sticks[axis.index()] as i32 + STICK_RESOLUTION as i32) * 62
            / (2 * STICK_RESOLUTION as i32)) as usize;
        fb.fill_rect(9 + offset, y + 1, 3, 4);
    }

    // Switch positions
    for sw in Switch::ALL {
        let glyph = match switches[sw.index()] {
            SwitchPosition::Up => '^',
            SwitchPosition::Mid => '-',
            SwitchPosition::Down => 'v',
        };
        let mut cell: String<4> = String::new();
        let _ = write!(cell, "{}{}", (b'A' + sw.index() as u8) as char, glyph);
        let x = 82 + (sw.index() % 2) * 20;
        let y = 14 + (sw.index() / 2) * 8;
        fb.draw_text(x, y, &FONT_5X7, &cell, TextStyle::Normal);
    }

    if let Some(key) = last_key {
        let mut line: String<16> = String::new();
        let _ = write!(line, "key {:?}", key);
        fb.draw_text(8, 48, &FONT_5X7, &line, TextStyle::Normal);
    }
}
