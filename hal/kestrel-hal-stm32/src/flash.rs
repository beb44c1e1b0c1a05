//! Flash-backed key-value store
//!
//! Implements the `FlashStorage` trait from `kestrel-hal` over the last
//! 128 KB sector of the F205's internal flash. Each key owns a fixed
//! 1 KB slot; a write gathers the live slots, erases the sector, and
//! rewrites. The stored blobs carry their own CRC (calibration data is
//! sealed by `kestrel-core`), so a torn write shows up as a blob that
//! fails validation upstream.
//!
//! The write pattern is wasteful for frequently-changing data; the only
//! writers are the calibration screen and the settings menu, both
//! pilot-driven.

use embassy_stm32::flash::{Blocking, Flash};
use embassy_stm32::peripherals::FLASH;
use embassy_stm32::Peri;

// Re-export shared types from kestrel-hal
pub use kestrel_hal::flash::{FlashError, StorageKey};

/// Total flash on the F205RG parts
pub const FLASH_SIZE: u32 = 1024 * 1024;

/// Config partition: the last 128 KB sector
pub const CONFIG_PARTITION_SIZE: u32 = 128 * 1024;
pub const CONFIG_PARTITION_START: u32 = FLASH_SIZE - CONFIG_PARTITION_SIZE;

/// One slot per storage key
const SLOT_SIZE: usize = 1024;
const SLOT_COUNT: usize = 4;
const SLOT_HEADER: usize = 3;
const SLOT_DATA_MAX: usize = SLOT_SIZE - SLOT_HEADER;

/// First header byte of a written slot (erased flash reads 0xFF)
const SLOT_MAGIC: u8 = 0xA5;

/// STM32 internal-flash storage
pub struct Stm32FlashStorage<'d> {
    flash: Flash<'d, Blocking>,
}

impl<'d> Stm32FlashStorage<'d> {
    /// Create a new flash storage instance
    pub fn new(flash: Peri<'d, FLASH>) -> Self {
        Self {
            flash: Flash::new_blocking(flash),
        }
    }

    fn slot_offset(key: StorageKey) -> u32 {
        CONFIG_PARTITION_START + key.as_u8() as u32 * SLOT_SIZE as u32
    }

    /// Read a slot header, returning the stored length if the slot is live
    fn slot_len(&mut self, key: StorageKey) -> Result<Option<usize>, FlashError> {
        let mut header = [0u8; SLOT_HEADER];
        self.flash
            .blocking_read(Self::slot_offset(key), &mut header)
            .map_err(|_| FlashError::Flash)?;

        if header[0] != SLOT_MAGIC {
            return Ok(None);
        }
        let len = u16::from_le_bytes([header[1], header[2]]) as usize;
        if len > SLOT_DATA_MAX {
            return Err(FlashError::Corrupted);
        }
        Ok(Some(len))
    }
}

impl kestrel_hal::FlashStorage for Stm32FlashStorage<'_> {
    async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let len = self.slot_len(key)?.ok_or(FlashError::NotFound)?;
        if buffer.len() < len {
            return Err(FlashError::BufferTooSmall);
        }
        self.flash
            .blocking_read(
                Self::slot_offset(key) + SLOT_HEADER as u32,
                &mut buffer[..len],
            )
            .map_err(|_| FlashError::Flash)?;
        Ok(len)
    }

    async fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        if data.len() > SLOT_DATA_MAX {
            return Err(FlashError::Full);
        }

        // Gather every live slot before the erase wipes the sector
        let mut slots = [[0xFFu8; SLOT_SIZE]; SLOT_COUNT];
        let mut live = [false; SLOT_COUNT];
        for i in 0..SLOT_COUNT {
            let Some(other) = StorageKey::from_u8(i as u8) else {
                continue;
            };
            if other == key {
                continue;
            }
            if let Some(len) = self.slot_len(other)? {
                self.flash
                    .blocking_read(Self::slot_offset(other), &mut slots[i][..SLOT_HEADER + len])
                    .map_err(|_| FlashError::Flash)?;
                live[i] = true;
            }
        }

        self.flash
            .blocking_erase(
                CONFIG_PARTITION_START,
                CONFIG_PARTITION_START + CONFIG_PARTITION_SIZE,
            )
            .map_err(|_| FlashError::Flash)?;

        // Rewrite the survivors
        for i in 0..SLOT_COUNT {
            if live[i] {
                let len = u16::from_le_bytes([slots[i][1], slots[i][2]]) as usize;
                self.flash
                    .blocking_write(
                        CONFIG_PARTITION_START + (i * SLOT_SIZE) as u32,
                        &slots[i][..SLOT_HEADER + len],
                    )
                    .map_err(|_| FlashError::Flash)?;
            }
        }

        // And the new value
        let offset = Self::slot_offset(key);
        let len = (data.len() as u16).to_le_bytes();
        let header = [SLOT_MAGIC, len[0], len[1]];
        self.flash
            .blocking_write(offset, &header)
            .map_err(|_| FlashError::Flash)?;
        self.flash
            .blocking_write(offset + SLOT_HEADER as u32, data)
            .map_err(|_| FlashError::Flash)?;
        Ok(())
    }

    async fn exists(&mut self, key: StorageKey) -> bool {
        matches!(self.slot_len(key), Ok(Some(_)))
    }

    async fn erase_all(&mut self) -> Result<(), FlashError> {
        self.flash
            .blocking_erase(
                CONFIG_PARTITION_START,
                CONFIG_PARTITION_START + CONFIG_PARTITION_SIZE,
            )
            .map_err(|_| FlashError::Flash)
    }
}
