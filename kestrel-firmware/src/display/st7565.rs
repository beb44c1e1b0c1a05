//! ST7565 LCD driver
//!
//! Driver for the 128x64 ST7565-class LCD fitted to these radios,
//! SPI write-only with separate A0 (command/data), chip select, and
//! reset lines. Implements the `DisplayBackend` trait; the rendered
//! page buffer maps 1:1 onto the controller's display RAM.

use embassy_stm32::gpio::Output;
use embassy_time::{block_for, Duration};
use embedded_hal::spi::SpiBus;

use kestrel_display::{DisplayBackend, DisplayError, PAGES, WIDTH};

/// ST7565 command set
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_START_LINE: u8 = 0x40;
    pub const ADC_NORMAL: u8 = 0xA0;
    pub const ADC_REVERSE: u8 = 0xA1;
    pub const COM_NORMAL: u8 = 0xC0;
    pub const COM_REVERSE: u8 = 0xC8;
    pub const BIAS_1_9: u8 = 0xA2;
    pub const BIAS_1_7: u8 = 0xA3;
    pub const POWER_CONTROL: u8 = 0x28;
    pub const RESISTOR_RATIO: u8 = 0x20;
    pub const SET_VOLUME: u8 = 0x81;
    pub const SET_PAGE: u8 = 0xB0;
    pub const COL_HIGH: u8 = 0x10;
    pub const COL_LOW: u8 = 0x00;
    pub const ALL_POINTS_NORMAL: u8 = 0xA4;
    pub const DISPLAY_NORMAL: u8 = 0xA6;
}

/// Default electronic volume (contrast), 0-63
const DEFAULT_CONTRAST: u8 = 0x28;

/// ST7565 driver over a blocking SPI bus
pub struct St7565<SPI> {
    spi: SPI,
    a0: Output<'static>,
    ncs: Output<'static>,
    rst: Output<'static>,
    initialized: bool,
}

impl<SPI: SpiBus<u8>> St7565<SPI> {
    pub fn new(spi: SPI, a0: Output<'static>, ncs: Output<'static>, rst: Output<'static>) -> Self {
        Self {
            spi,
            a0,
            ncs,
            rst,
            initialized: false,
        }
    }

    fn command(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.a0.set_low();
        self.ncs.set_low();
        let result = self.spi.write(bytes);
        self.ncs.set_high();
        result.map_err(|_| DisplayError::Communication)
    }

    fn data(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.a0.set_high();
        self.ncs.set_low();
        let result = self.spi.write(bytes);
        self.ncs.set_high();
        result.map_err(|_| DisplayError::Communication)
    }
}

impl<SPI: SpiBus<u8>> DisplayBackend for St7565<SPI> {
    fn init(&mut self) -> Result<(), DisplayError> {
        // Hardware reset pulse
        self.rst.set_low();
        block_for(Duration::from_millis(1));
        self.rst.set_high();
        block_for(Duration::from_millis(10));

        self.command(&[
            cmd::BIAS_1_9,
            cmd::ADC_NORMAL,
            cmd::COM_REVERSE,
            cmd::SET_START_LINE,
        ])?;

        // Power stages come up one booster at a time
        self.command(&[cmd::POWER_CONTROL | 0x4])?;
        block_for(Duration::from_millis(50));
        self.command(&[cmd::POWER_CONTROL | 0x6])?;
        block_for(Duration::from_millis(50));
        self.command(&[cmd::POWER_CONTROL | 0x7])?;
        block_for(Duration::from_millis(10));

        self.command(&[
            cmd::RESISTOR_RATIO | 0x5,
            cmd::SET_VOLUME,
            DEFAULT_CONTRAST,
            cmd::ALL_POINTS_NORMAL,
            cmd::DISPLAY_NORMAL,
            cmd::DISPLAY_ON,
        ])?;

        self.initialized = true;
        Ok(())
    }

    fn flush(&mut self, pages: &[u8]) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        for page in 0..PAGES {
            self.command(&[cmd::SET_PAGE | page as u8, cmd::COL_HIGH, cmd::COL_LOW])?;
            self.data(&pages[page * WIDTH..(page + 1) * WIDTH])?;
        }
        Ok(())
    }

    fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.command(&[cmd::SET_VOLUME, contrast & 0x3F])
    }

    fn display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        self.command(&[if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF }])
    }
}
