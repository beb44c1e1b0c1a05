//! Board description types
//!
//! A `BoardConfig` binds the logical inputs and outputs of a
//! transmitter (keys, switches, stick axes, battery sense, power latch,
//! backlight, LCD) to port/pin identifiers for one PCB revision. Tables
//! are `const` data in the firmware crate, selected by cargo feature;
//! the types here make them checkable.

use heapless::Vec;

use crate::inputs::{Key, StickAxis, Switch, SwitchKind};

/// GPIO ports present on the supported parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

/// One port/pin identifier, e.g. PA7
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId {
    pub port: Port,
    pub pin: u8,
}

impl PinId {
    pub const fn new(port: Port, pin: u8) -> Self {
        Self { port, pin }
    }

    /// Parse a pin string
    ///
    /// Supports formats:
    /// - "PA0" -> (PA0, false)
    /// - "!PB1" -> (PB1, true/inverted)
    pub fn parse(s: &str) -> Option<(Self, bool)> {
        let s = s.trim();

        let (s, inverted) = match s.strip_prefix('!') {
            Some(rest) => (rest, true),
            None => (s, false),
        };

        let s = s.strip_prefix('P')?;
        let mut chars = s.chars();
        let port = match chars.next()? {
            'A' => Port::A,
            'B' => Port::B,
            'C' => Port::C,
            'D' => Port::D,
            'E' => Port::E,
            'F' => Port::F,
            'G' => Port::G,
            _ => return None,
        };

        let pin: u8 = chars.as_str().parse().ok()?;
        if pin > 15 {
            return None;
        }

        Some((PinId::new(port, pin), inverted))
    }
}

/// Pin binding with optional inversion and pull-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    pub pin: PinId,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    pub const fn new(pin: PinId) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: PinId) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }

    /// Create an active-low pin with the internal pull-up enabled
    ///
    /// The common case for keys and switch sense lines.
    pub const fn low_with_pullup(pin: PinId) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: true,
        }
    }
}

/// One key bound to a pin
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyBinding {
    pub key: Key,
    pub pin: PinConfig,
}

/// One toggle switch bound to its sense line(s)
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchBinding {
    pub switch: Switch,
    pub kind: SwitchKind,
    pub high: PinConfig,
    /// Second sense line, three-position switches only
    pub low: Option<PinConfig>,
}

/// One stick axis bound to an ADC input
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StickBinding {
    pub axis: StickAxis,
    pub pin: PinId,
    /// ADC channel number the pin routes to
    pub channel: u8,
    /// Pot wired backwards on this board
    pub inverted: bool,
}

/// Status LED binding
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedConfig {
    pub pin: PinConfig,
}

/// Power domain pins
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerConfig {
    /// Output holding the power rail on
    pub latch: PinConfig,
    /// Power button sense
    pub button: PinConfig,
    /// USB charger presence sense, boards with charge circuitry only
    pub usb_charger: Option<PinConfig>,
}

/// Battery voltage sense and thresholds
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatterySense {
    pub pin: PinId,
    pub channel: u8,
    /// Millivolts per full-scale numerator (divider and VREF folded in)
    pub scale_num: u16,
    /// Denominator, normally the ADC full-scale count
    pub scale_den: u16,
    pub warn_mv: u16,
    pub critical_mv: u16,
    pub full_mv: u16,
}

/// Backlight output
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BacklightConfig {
    pub pin: PinId,
    pub active_low: bool,
}

/// LCD controller wiring (SPI plus control lines)
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LcdConfig {
    pub clk: PinId,
    pub mosi: PinId,
    /// Command/data select
    pub a0: PinId,
    pub ncs: PinId,
    pub rst: PinId,
}

/// What a variant physically has
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardCapabilities {
    pub keys: u8,
    pub switches: u8,
    pub sticks: u8,
    pub has_haptic: bool,
    pub has_status_led: bool,
}

/// Full per-variant binding table
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    pub name: &'static str,
    pub capabilities: BoardCapabilities,
    pub keys: &'static [KeyBinding],
    pub switches: &'static [SwitchBinding],
    pub sticks: &'static [StickBinding],
    pub leds: &'static [LedConfig],
    pub power: PowerConfig,
    pub battery: BatterySense,
    pub backlight: Option<BacklightConfig>,
    pub lcd: Option<LcdConfig>,
    pub haptic: Option<PinConfig>,
}

/// Board table validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardConfigError {
    /// The same pin is bound twice
    DuplicatePin(PinId),
    /// More bindings than the table types allow
    TooManyPins,
}

/// Upper bound on distinct pins a table can bind
const MAX_BOUND_PINS: usize = 64;

impl BoardConfig {
    /// Check the table for double-bound pins
    ///
    /// Run from each variant's tests; a table that fails this cannot
    /// have come off a real PCB.
    pub fn validate(&self) -> Result<(), BoardConfigError> {
        let mut seen: Vec<PinId, MAX_BOUND_PINS> = Vec::new();

        let mut claim = |pin: PinId| -> Result<(), BoardConfigError> {
            if seen.contains(&pin) {
                return Err(BoardConfigError::DuplicatePin(pin));
            }
            seen.push(pin).map_err(|_| BoardConfigError::TooManyPins)
        };

        for key in self.keys {
            claim(key.pin.pin)?;
        }
        for sw in self.switches {
            claim(sw.high.pin)?;
            if let Some(low) = sw.low {
                claim(low.pin)?;
            }
        }
        for stick in self.sticks {
            claim(stick.pin)?;
        }
        for led in self.leds {
            claim(led.pin.pin)?;
        }
        claim(self.power.latch.pin)?;
        claim(self.power.button.pin)?;
        if let Some(usb) = self.power.usb_charger {
            claim(usb.pin)?;
        }
        claim(self.battery.pin)?;
        if let Some(backlight) = self.backlight {
            claim(backlight.pin)?;
        }
        if let Some(lcd) = self.lcd {
            claim(lcd.clk)?;
            claim(lcd.mosi)?;
            claim(lcd.a0)?;
            claim(lcd.ncs)?;
            claim(lcd.rst)?;
        }
        if let Some(haptic) = self.haptic {
            claim(haptic.pin)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_parsing() {
        assert_eq!(
            PinId::parse("PA7"),
            Some((PinId::new(Port::A, 7), false))
        );
        assert_eq!(
            PinId::parse("!PB5"),
            Some((PinId::new(Port::B, 5), true))
        );
        assert_eq!(
            PinId::parse(" PD15 "),
            Some((PinId::new(Port::D, 15), false))
        );
    }

    #[test]
    fn test_pin_parsing_rejects_garbage() {
        assert_eq!(PinId::parse(""), None);
        assert_eq!(PinId::parse("A7"), None);
        assert_eq!(PinId::parse("PH3"), None);
        assert_eq!(PinId::parse("PA16"), None);
        assert_eq!(PinId::parse("PAx"), None);
        assert_eq!(PinId::parse("!!PA1"), None);
    }

    fn minimal_board(keys: &'static [KeyBinding]) -> BoardConfig {
        BoardConfig {
            name: "test",
            capabilities: BoardCapabilities::default(),
            keys,
            switches: &[],
            sticks: &[],
            leds: &[],
            power: PowerConfig {
                latch: PinConfig::new(PinId::new(Port::A, 6)),
                button: PinConfig::low_with_pullup(PinId::new(Port::A, 7)),
                usb_charger: None,
            },
            battery: BatterySense {
                pin: PinId::new(Port::C, 0),
                channel: 10,
                scale_num: 6600,
                scale_den: 4095,
                warn_mv: 3550,
                critical_mv: 3400,
                full_mv: 4200,
            },
            backlight: None,
            lcd: None,
            haptic: None,
        }
    }

    #[test]
    fn test_validate_accepts_distinct_pins() {
        static KEYS: [KeyBinding; 2] = [
            KeyBinding {
                key: Key::Menu,
                pin: PinConfig::low_with_pullup(PinId::new(Port::D, 7)),
            },
            KeyBinding {
                key: Key::Exit,
                pin: PinConfig::low_with_pullup(PinId::new(Port::D, 2)),
            },
        ];
        assert!(minimal_board(&KEYS).validate().is_ok());
    }

    #[test]
    fn test_validate_catches_duplicates() {
        // Exit accidentally bound to the power button pin
        static KEYS: [KeyBinding; 1] = [KeyBinding {
            key: Key::Exit,
            pin: PinConfig::low_with_pullup(PinId::new(Port::A, 7)),
        }];
        assert_eq!(
            minimal_board(&KEYS).validate(),
            Err(BoardConfigError::DuplicatePin(PinId::new(Port::A, 7)))
        );
    }
}
