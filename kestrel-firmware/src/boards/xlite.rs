//! XLITE board
//!
//! Gamepad-format radio: full navigation cluster on GPIOE, shift key
//! instead of a menu key, power latch on PE9 rather than the usual PA6,
//! and a USB charge circuit sensed on PB5.

use core::array;

use embassy_stm32::adc::{Adc, AdcChannel as _};
use embassy_stm32::gpio::{Input, Level, Output, OutputType, Pull, Speed};
use embassy_stm32::spi::{self, Spi};
use embassy_stm32::time::{khz, Hertz};
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};

use kestrel_core::config::{
    BacklightConfig, BatterySense, BoardCapabilities, BoardConfig, KeyBinding, LcdConfig,
    LedConfig, PinConfig, PinId, Port, PowerConfig, StickBinding, SwitchBinding,
};
use kestrel_core::inputs::{Key, StickAxis, Switch, SwitchKind};
use kestrel_drivers::{Backlight, Haptic, StatusLed};
use kestrel_hal_stm32::flash::Stm32FlashStorage;

use super::{BacklightPwm, BoardIo, PinAdapter, SwitchLines};
use crate::display::St7565;
use crate::pwr::Iwdg;

const fn pin(port: Port, n: u8) -> PinId {
    PinId::new(port, n)
}

static KEYS: [KeyBinding; 7] = [
    KeyBinding {
        key: Key::Shift,
        pin: PinConfig::low_with_pullup(pin(Port::E, 8)),
    },
    KeyBinding {
        key: Key::Exit,
        pin: PinConfig::low_with_pullup(pin(Port::E, 7)),
    },
    KeyBinding {
        key: Key::Enter,
        pin: PinConfig::low_with_pullup(pin(Port::E, 11)),
    },
    KeyBinding {
        key: Key::Up,
        pin: PinConfig::low_with_pullup(pin(Port::E, 10)),
    },
    KeyBinding {
        key: Key::Down,
        pin: PinConfig::low_with_pullup(pin(Port::E, 14)),
    },
    KeyBinding {
        key: Key::Left,
        pin: PinConfig::low_with_pullup(pin(Port::E, 12)),
    },
    KeyBinding {
        key: Key::Right,
        pin: PinConfig::low_with_pullup(pin(Port::E, 13)),
    },
];

static SWITCHES: [SwitchBinding; 4] = [
    SwitchBinding {
        switch: Switch::A,
        kind: SwitchKind::ThreePos,
        high: PinConfig::low_with_pullup(pin(Port::E, 1)),
        low: Some(PinConfig::low_with_pullup(pin(Port::E, 0))),
    },
    SwitchBinding {
        switch: Switch::B,
        kind: SwitchKind::ThreePos,
        high: PinConfig::low_with_pullup(pin(Port::E, 5)),
        low: Some(PinConfig::low_with_pullup(pin(Port::E, 6))),
    },
    SwitchBinding {
        switch: Switch::C,
        kind: SwitchKind::TwoPos,
        high: PinConfig::low_with_pullup(pin(Port::C, 5)),
        low: None,
    },
    SwitchBinding {
        switch: Switch::D,
        kind: SwitchKind::TwoPos,
        high: PinConfig::low_with_pullup(pin(Port::B, 9)),
        low: None,
    },
];

static STICKS: [StickBinding; 4] = [
    StickBinding {
        axis: StickAxis::LeftHorz,
        pin: pin(Port::A, 3),
        channel: 3,
        inverted: true,
    },
    StickBinding {
        axis: StickAxis::LeftVert,
        pin: pin(Port::A, 2),
        channel: 2,
        inverted: false,
    },
    StickBinding {
        axis: StickAxis::RightHorz,
        pin: pin(Port::A, 1),
        channel: 1,
        inverted: false,
    },
    StickBinding {
        axis: StickAxis::RightVert,
        pin: pin(Port::A, 0),
        channel: 0,
        inverted: true,
    },
];

static LEDS: [LedConfig; 1] = [LedConfig {
    pin: PinConfig::new(pin(Port::C, 4)),
}];

pub static BOARD: BoardConfig = BoardConfig {
    name: "XLITE",
    capabilities: BoardCapabilities {
        keys: 7,
        switches: 4,
        sticks: 4,
        has_haptic: true,
        has_status_led: true,
    },
    keys: &KEYS,
    switches: &SWITCHES,
    sticks: &STICKS,
    leds: &LEDS,
    power: PowerConfig {
        latch: PinConfig::new(pin(Port::E, 9)),
        button: PinConfig::low_with_pullup(pin(Port::A, 7)),
        usb_charger: Some(PinConfig::new(pin(Port::B, 5))),
    },
    battery: BatterySense {
        pin: pin(Port::C, 0),
        channel: 10,
        // 2S li-ion pack behind a 3:1 divider
        scale_num: 9900,
        scale_den: 4095,
        warn_mv: 7000,
        critical_mv: 6600,
        full_mv: 8400,
    },
    backlight: Some(BacklightConfig {
        pin: pin(Port::B, 8),
        active_low: false,
    }),
    lcd: Some(LcdConfig {
        clk: pin(Port::C, 10),
        mosi: pin(Port::C, 12),
        a0: pin(Port::C, 11),
        ncs: pin(Port::D, 14),
        rst: pin(Port::D, 12),
    }),
    haptic: Some(PinConfig::new(pin(Port::B, 1))),
};

/// Move the peripherals into the XLITE wiring
pub fn bind(p: embassy_stm32::Peripherals) -> BoardIo {
    let pwr_latch = Output::new(p.PE9, Level::High, Speed::Low);
    let pwr_button = Input::new(p.PA7, Pull::Up);
    let usb_charger = Some(Input::new(p.PB5, Pull::None));

    let mut keys: [Option<Input<'static>>; Key::COUNT] = array::from_fn(|_| None);
    keys[Key::Shift.index()] = Some(Input::new(p.PE8, Pull::Up));
    keys[Key::Exit.index()] = Some(Input::new(p.PE7, Pull::Up));
    keys[Key::Enter.index()] = Some(Input::new(p.PE11, Pull::Up));
    keys[Key::Up.index()] = Some(Input::new(p.PE10, Pull::Up));
    keys[Key::Down.index()] = Some(Input::new(p.PE14, Pull::Up));
    keys[Key::Left.index()] = Some(Input::new(p.PE12, Pull::Up));
    keys[Key::Right.index()] = Some(Input::new(p.PE13, Pull::Up));

    let mut switches: [Option<SwitchLines>; Switch::COUNT] = array::from_fn(|_| None);
    switches[Switch::A.index()] = Some(SwitchLines {
        kind: SwitchKind::ThreePos,
        high: Input::new(p.PE1, Pull::Up),
        low: Some(Input::new(p.PE0, Pull::Up)),
    });
    switches[Switch::B.index()] = Some(SwitchLines {
        kind: SwitchKind::ThreePos,
        high: Input::new(p.PE5, Pull::Up),
        low: Some(Input::new(p.PE6, Pull::Up)),
    });
    switches[Switch::C.index()] = Some(SwitchLines {
        kind: SwitchKind::TwoPos,
        high: Input::new(p.PC5, Pull::Up),
        low: None,
    });
    switches[Switch::D.index()] = Some(SwitchLines {
        kind: SwitchKind::TwoPos,
        high: Input::new(p.PB9, Pull::Up),
        low: None,
    });

    let adc = Adc::new(p.ADC1);
    let sticks = [
        p.PA3.degrade_adc(), // LeftHorz
        p.PA2.degrade_adc(), // LeftVert
        p.PA1.degrade_adc(), // RightHorz
        p.PA0.degrade_adc(), // RightVert
    ];
    let battery = p.PC0.degrade_adc();

    let status_led = Some(StatusLed::new(
        PinAdapter(Output::new(p.PC4, Level::Low, Speed::Low)),
        false,
    ));
    let haptic = Some(Haptic::new(
        PinAdapter(Output::new(p.PB1, Level::Low, Speed::Low)),
        false,
    ));

    let pwm = SimplePwm::new(
        p.TIM4,
        None,
        None,
        Some(PwmPin::new_ch3(p.PB8, OutputType::PushPull)),
        None,
        khz(1),
        CountingMode::EdgeAlignedUp,
    );
    let backlight = Backlight::new(BacklightPwm {
        channel: pwm.split().ch3,
    });

    let mut spi_config = spi::Config::default();
    spi_config.frequency = Hertz(8_000_000);
    let spi = Spi::new_blocking_txonly(p.SPI3, p.PC10, p.PC12, spi_config);
    let lcd = St7565::new(
        spi,
        Output::new(p.PC11, Level::Low, Speed::VeryHigh),
        Output::new(p.PD14, Level::High, Speed::VeryHigh),
        Output::new(p.PD12, Level::High, Speed::VeryHigh),
    );

    BoardIo {
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
        flash: Stm32FlashStorage::new(p.FLASH),
        wdg: Iwdg::new(p.IWDG),
    }
}
