//! Board variant tables and peripheral binding
//!
//! One module per PCB revision. Each provides two things:
//!
//! - `BOARD`: the `BoardConfig` table binding logical names to pins
//!   (validated by that module's tests)
//! - `bind()`: moves the embassy peripherals into a [`BoardIo`]
//!   matching the table
//!
//! Exactly one `board-*` cargo feature selects the variant.

use embassy_stm32::adc::{Adc, AnyAdcChannel};
use embassy_stm32::gpio::{Input, Output};
use embassy_stm32::mode::Blocking;
use embassy_stm32::peripherals::{ADC1, TIM4};
use embassy_stm32::spi::Spi;
use embassy_stm32::timer::simple_pwm::SimplePwmChannel;

use kestrel_core::inputs::{Key, StickAxis, Switch, SwitchKind};
use kestrel_drivers::{Backlight, Haptic, StatusLed};
use kestrel_hal_stm32::flash::Stm32FlashStorage;

use crate::display::St7565;
use crate::pwr::Iwdg;

#[cfg(feature = "board-x7")]
mod x7;
#[cfg(feature = "board-x7")]
pub use x7::{bind, BOARD};

#[cfg(feature = "board-xlite")]
mod xlite;
#[cfg(feature = "board-xlite")]
pub use xlite::{bind, BOARD};

#[cfg(feature = "board-t8")]
mod t8;
#[cfg(feature = "board-t8")]
pub use t8::{bind, BOARD};

#[cfg(not(any(feature = "board-x7", feature = "board-xlite", feature = "board-t8")))]
compile_error!("select a board: enable exactly one of the board-* features");

#[cfg(any(
    all(feature = "board-x7", feature = "board-xlite"),
    all(feature = "board-x7", feature = "board-t8"),
    all(feature = "board-xlite", feature = "board-t8"),
))]
compile_error!("board-* features are mutually exclusive");

/// Adapter from embassy `Output` to the `kestrel-hal` pin trait
pub struct PinAdapter(pub Output<'static>);

impl kestrel_hal::OutputPin for PinAdapter {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn toggle(&mut self) {
        self.0.toggle();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Backlight PWM channel behind the `kestrel-hal` trait
///
/// Every board in this family routes the backlight through a TIM4
/// channel; only the channel number differs.
pub struct BacklightPwm {
    pub channel: SimplePwmChannel<'static, TIM4>,
}

impl kestrel_hal::PwmOutput for BacklightPwm {
    fn set_duty_percent(&mut self, percent: u8) {
        self.channel.set_duty_cycle_percent(percent.min(100));
    }

    fn enable(&mut self) {
        self.channel.enable();
    }

    fn disable(&mut self) {
        self.channel.disable();
    }
}

/// One toggle switch's sense lines
pub struct SwitchLines {
    pub kind: SwitchKind,
    pub high: Input<'static>,
    pub low: Option<Input<'static>>,
}

/// Everything `bind()` hands back to `main`
///
/// Members are public and intended to be moved out into the tasks.
pub struct BoardIo {
    pub pwr_latch: Output<'static>,
    pub pwr_button: Input<'static>,
    pub usb_charger: Option<Input<'static>>,
    pub keys: [Option<Input<'static>>; Key::COUNT],
    pub switches: [Option<SwitchLines>; Switch::COUNT],
    pub adc: Adc<'static, ADC1>,
    /// Stick channels indexed by [`StickAxis::index`]
    pub sticks: [AnyAdcChannel<ADC1>; StickAxis::COUNT],
    pub battery: AnyAdcChannel<ADC1>,
    pub status_led: Option<StatusLed<PinAdapter>>,
    pub haptic: Option<Haptic<PinAdapter>>,
    pub backlight: Backlight<BacklightPwm>,
    pub lcd: St7565<Spi<'static, Blocking>>,
    pub flash: Stm32FlashStorage<'static>,
    pub wdg: Iwdg,
}

/// Debounce-free power button read, honoring the table's active level
pub fn button_pressed(button: &Input<'static>) -> bool {
    button.is_low() == BOARD.power.button.inverted
}

/// Charger presence, false on boards without charge circuitry
pub fn charger_active(usb: &Option<Input<'static>>) -> bool {
    match (usb, BOARD.power.usb_charger) {
        (Some(pin), Some(cfg)) => pin.is_low() == cfg.inverted,
        _ => false,
    }
}
