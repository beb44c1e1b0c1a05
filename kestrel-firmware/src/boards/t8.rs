//! T8 board
//!
//! Budget 6-key radio. Navigation on GPIOD/GPIOB/GPIOE with plus/minus
//! keys standing in for a scroll wheel, four three-position switches,
//! USB charging on PB5, no haptic motor fitted.

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
use kestrel_drivers::{Backlight, StatusLed};
use kestrel_hal_stm32::flash::Stm32FlashStorage;

use super::{BacklightPwm, BoardIo, PinAdapter, SwitchLines};
use crate::display::St7565;
use crate::pwr::Iwdg;

const fn pin(port: Port, n: u8) -> PinId {
    PinId::new(port, n)
}

static KEYS: [KeyBinding; 6] = [
    KeyBinding {
        key: Key::Page,
        pin: PinConfig::low_with_pullup(pin(Port::D, 3)),
    },
    KeyBinding {
        key: Key::Menu,
        pin: PinConfig::low_with_pullup(pin(Port::D, 7)),
    },
    KeyBinding {
        key: Key::Exit,
        pin: PinConfig::low_with_pullup(pin(Port::B, 3)),
    },
    KeyBinding {
        key: Key::Enter,
        pin: PinConfig::low_with_pullup(pin(Port::A, 10)),
    },
    KeyBinding {
        key: Key::Up,
        pin: PinConfig::low_with_pullup(pin(Port::E, 9)),
    },
    KeyBinding {
        key: Key::Down,
        pin: PinConfig::low_with_pullup(pin(Port::E, 10)),
    },
];

static SWITCHES: [SwitchBinding; 4] = [
    SwitchBinding {
        switch: Switch::A,
        kind: SwitchKind::ThreePos,
        high: PinConfig::low_with_pullup(pin(Port::E, 2)),
        low: Some(PinConfig::low_with_pullup(pin(Port::E, 3))),
    },
    SwitchBinding {
        switch: Switch::B,
        kind: SwitchKind::ThreePos,
        high: PinConfig::low_with_pullup(pin(Port::E, 4)),
        low: Some(PinConfig::low_with_pullup(pin(Port::E, 5))),
    },
    SwitchBinding {
        switch: Switch::C,
        kind: SwitchKind::ThreePos,
        high: PinConfig::low_with_pullup(pin(Port::B, 0)),
        low: Some(PinConfig::low_with_pullup(pin(Port::B, 1))),
    },
    SwitchBinding {
        switch: Switch::D,
        kind: SwitchKind::ThreePos,
        high: PinConfig::low_with_pullup(pin(Port::B, 6)),
        low: Some(PinConfig::low_with_pullup(pin(Port::B, 7))),
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
    name: "T8",
    capabilities: BoardCapabilities {
        keys: 6,
        switches: 4,
        sticks: 4,
        has_haptic: false,
        has_status_led: true,
    },
    keys: &KEYS,
    switches: &SWITCHES,
    sticks: &STICKS,
    leds: &LEDS,
    power: PowerConfig {
        latch: PinConfig::new(pin(Port::A, 6)),
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
        pin: pin(Port::D, 13),
        active_low: false,
    }),
    lcd: Some(LcdConfig {
        clk: pin(Port::C, 10),
        mosi: pin(Port::C, 12),
        a0: pin(Port::C, 11),
        ncs: pin(Port::D, 14),
        rst: pin(Port::D, 12),
    }),
    haptic: None,
};

/// Move the peripherals into the T8 wiring
pub fn bind(p: embassy_stm32::Peripherals) -> BoardIo {
    let pwr_latch = Output::new(p.PA6, Level::High, Speed::Low);
    let pwr_button = Input::new(p.PA7, Pull::Up);
    let usb_charger = Some(Input::new(p.PB5, Pull::None));

    let mut keys: [Option<Input<'static>>; Key::COUNT] = array::from_fn(|_| None);
    keys[Key::Page.index()] = Some(Input::new(p.PD3, Pull::Up));
    keys[Key::Menu.index()] = Some(Input::new(p.PD7, Pull::Up));
    keys[Key::Exit.index()] = Some(Input::new(p.PB3, Pull::Up));
    keys[Key::Enter.index()] = Some(Input::new(p.PA10, Pull::Up));
    keys[Key::Up.index()] = Some(Input::new(p.PE9, Pull::Up));
    keys[Key::Down.index()] = Some(Input::new(p.PE10, Pull::Up));

    let mut switches: [Option<SwitchLines>; Switch::COUNT] = array::from_fn(|_| None);
    switches[Switch::A.index()] = Some(SwitchLines {
        kind: SwitchKind::ThreePos,
        high: Input::new(p.PE2, Pull::Up),
        low: Some(Input::new(p.PE3, Pull::Up)),
    });
    switches[Switch::B.index()] = Some(SwitchLines {
        kind: SwitchKind::ThreePos,
        high: Input::new(p.PE4, Pull::Up),
        low: Some(Input::new(p.PE5, Pull::Up)),
    });
    switches[Switch::C.index()] = Some(SwitchLines {
        kind: SwitchKind::ThreePos,
        high: Input::new(p.PB0, Pull::Up),
        low: Some(Input::new(p.PB1, Pull::Up)),
    });
    switches[Switch::D.index()] = Some(SwitchLines {
        kind: SwitchKind::ThreePos,
        high: Input::new(p.PB6, Pull::Up),
        low: Some(Input::new(p.PB7, Pull::Up)),
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

    let pwm = SimplePwm::new(
        p.TIM4,
        None,
        Some(PwmPin::new_ch2(p.PD13, OutputType::PushPull)),
        None,
        None,
        khz(1),
        CountingMode::EdgeAlignedUp,
    );
    let backlight = Backlight::new(BacklightPwm {
        channel: pwm.split().ch2,
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
        haptic: None,
        backlight,
        lcd,
        flash: Stm32FlashStorage::new(p.FLASH),
        wdg: Iwdg::new(p.IWDG),
    }
}
