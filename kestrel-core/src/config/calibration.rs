//! Persisted stick calibration
//!
//! Stored in the flash calibration slot as postcard binary data, sealed
//! with magic, version, and CRC32 so a stale or torn write falls back to
//! defaults instead of producing a radio with crooked sticks.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::inputs::{AxisCalibration, StickAxis};

/// Magic number to identify valid calibration data
pub const CALIBRATION_MAGIC: u32 = 0x4B43_414C; // "KCAL"

/// Current calibration data version
pub const CALIBRATION_VERSION: u8 = 1;

/// Complete calibration blob stored in flash
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationData {
    /// Magic number for validation
    pub magic: u32,
    /// Data format version
    pub version: u8,
    /// Per-axis calibration, indexed by [`StickAxis::index`]
    pub axes: [AxisCalibration; StickAxis::COUNT],
    /// CRC32 over magic, version, and axes
    pub crc: u32,
}

impl Default for CalibrationData {
    fn default() -> Self {
        Self::new()
    }
}

impl CalibrationData {
    /// Create calibration data with nominal per-axis defaults, sealed
    pub fn new() -> Self {
        let mut data = Self {
            magic: CALIBRATION_MAGIC,
            version: CALIBRATION_VERSION,
            axes: [AxisCalibration::default(); StickAxis::COUNT],
            crc: 0,
        };
        data.seal();
        data
    }

    /// Check magic, version, and CRC
    pub fn is_valid(&self) -> bool {
        self.magic == CALIBRATION_MAGIC
            && self.version == CALIBRATION_VERSION
            && self.crc == self.checksum()
    }

    /// Recompute and store the CRC after a modification
    pub fn seal(&mut self) {
        self.crc = self.checksum();
    }

    /// Calibration for one axis
    pub fn get(&self, axis: StickAxis) -> &AxisCalibration {
        &self.axes[axis.index()]
    }

    /// Replace one axis and reseal
    pub fn set(&mut self, axis: StickAxis, calibration: AxisCalibration) {
        self.axes[axis.index()] = calibration;
        self.seal();
    }

    fn checksum(&self) -> u32 {
        let mut crc = Crc32::new();
        crc.update(&self.magic.to_le_bytes());
        crc.update(&[self.version]);
        for axis in &self.axes {
            crc.update(&axis.min.to_le_bytes());
            crc.update(&axis.mid.to_le_bytes());
            crc.update(&axis.max.to_le_bytes());
            crc.update(&axis.deadband.to_le_bytes());
            crc.update(&[axis.inverted as u8]);
        }
        crc.finalize()
    }

    /// Serialize into a buffer for the flash store
    #[cfg(feature = "serde")]
    pub fn to_bytes<'a>(&self, buffer: &'a mut [u8]) -> Result<&'a mut [u8], postcard::Error> {
        postcard::to_slice(self, buffer)
    }

    /// Deserialize from the flash store, rejecting invalid blobs
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let data: Self = postcard::from_bytes(bytes).ok()?;
        data.is_valid().then_some(data)
    }
}

/// CRC32 (IEEE 802.3, bit-reflected), table-free
struct Crc32 {
    state: u32,
}

impl Crc32 {
    fn new() -> Self {
        Self { state: 0xFFFF_FFFF }
    }

    fn update(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= byte as u32;
            for _ in 0..8 {
                let mask = (self.state & 1).wrapping_neg();
                self.state = (self.state >> 1) ^ (0xEDB8_8320 & mask);
            }
        }
    }

    fn finalize(self) -> u32 {
        !self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc32_known_vector() {
        // CRC32("123456789") = 0xCBF43926
        let mut crc = Crc32::new();
        crc.update(b"123456789");
        assert_eq!(crc.finalize(), 0xCBF4_3926);
    }

    #[test]
    fn test_fresh_data_is_valid() {
        assert!(CalibrationData::new().is_valid());
    }

    #[test]
    fn test_tamper_is_detected() {
        let mut data = CalibrationData::new();
        data.axes[0].mid = 1234;
        assert!(!data.is_valid());
        data.seal();
        assert!(data.is_valid());
    }

    #[test]
    fn test_set_reseals() {
        let mut data = CalibrationData::new();
        data.set(StickAxis::RightVert, AxisCalibration::new(120, 2010, 3980));
        assert!(data.is_valid());
        assert_eq!(data.get(StickAxis::RightVert).mid, 2010);
    }

    #[test]
    fn test_wrong_magic_rejected() {
        let mut data = CalibrationData::new();
        data.magic = 0xDEAD_0000;
        data.seal();
        // CRC is fine but the magic is not ours
        assert!(!data.is_valid());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_flash_round_trip() {
        let mut data = CalibrationData::new();
        data.set(StickAxis::LeftHorz, AxisCalibration::new(80, 1990, 3870));

        let mut buffer = [0u8; 128];
        let bytes = data.to_bytes(&mut buffer).unwrap();
        let loaded = CalibrationData::from_bytes(bytes).unwrap();
        assert_eq!(loaded, data);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_corrupt_bytes_rejected() {
        let data = CalibrationData::new();
        let mut buffer = [0u8; 128];
        let bytes = data.to_bytes(&mut buffer).unwrap();
        let len = bytes.len();
        bytes[len - 1] ^= 0xFF; // flip a CRC byte
        assert!(CalibrationData::from_bytes(bytes).is_none());
    }
}
