//! Stick axis calibration
//!
//! Raw ADC counts are mapped into the signed full-scale convention the
//! rest of the firmware uses (±1024, mid = 0), with a dead band around
//! the calibrated center. Integer math only.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Full-scale magnitude of a calibrated axis
pub const STICK_RESOLUTION: i16 = 1024;

/// Gimbal axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StickAxis {
    LeftHorz,
    LeftVert,
    RightHorz,
    RightVert,
}

impl StickAxis {
    /// Number of stick axes
    pub const COUNT: usize = 4;

    /// All axes, indexable by `index()`
    pub const ALL: [StickAxis; StickAxis::COUNT] = [
        StickAxis::LeftHorz,
        StickAxis::LeftVert,
        StickAxis::RightHorz,
        StickAxis::RightVert,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Per-axis calibration: raw ADC bounds plus dead band and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisCalibration {
    /// Raw count at full deflection toward negative
    pub min: u16,
    /// Raw count at rest
    pub mid: u16,
    /// Raw count at full deflection toward positive
    pub max: u16,
    /// Half-width of the zero region around `mid`, in raw counts
    pub deadband: u16,
    /// Flip the sign (pot wired backwards on some boards)
    pub inverted: bool,
}

impl AxisCalibration {
    pub const fn new(min: u16, mid: u16, max: u16) -> Self {
        Self {
            min,
            mid,
            max,
            deadband: 16,
            inverted: false,
        }
    }

    /// Map a raw ADC count to ±[`STICK_RESOLUTION`]
    ///
    /// Clamps outside the calibrated range, returns 0 anywhere inside
    /// the dead band, and maps each calibrated endpoint to full scale.
    /// A degenerate calibration (mid not strictly between min and max)
    /// yields 0 rather than dividing by zero.
    pub fn apply(&self, raw: u16) -> i16 {
        let min = self.min as i32;
        let mid = self.mid as i32;
        let max = self.max as i32;
        let db = self.deadband as i32;

        if mid <= min || max <= mid {
            return 0;
        }

        let centered = (raw as i32).clamp(min, max) - mid;
        let value = if centered > db {
            let span = (max - mid - db).max(1);
            (centered - db) * STICK_RESOLUTION as i32 / span
        } else if centered < -db {
            let span = (mid - min - db).max(1);
            (centered + db) * STICK_RESOLUTION as i32 / span
        } else {
            0
        };

        let value = value.clamp(-(STICK_RESOLUTION as i32), STICK_RESOLUTION as i32) as i16;
        if self.inverted {
            -value
        } else {
            value
        }
    }
}

impl Default for AxisCalibration {
    /// Uncalibrated 12-bit axis: nominal center, full range
    fn default() -> Self {
        Self::new(0, 2048, 4095)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mid_maps_to_zero() {
        let cal = AxisCalibration::new(100, 2000, 3900);
        assert_eq!(cal.apply(2000), 0);
    }

    #[test]
    fn test_endpoints_reach_full_scale() {
        let cal = AxisCalibration::new(100, 2000, 3900);
        assert_eq!(cal.apply(100), -STICK_RESOLUTION);
        assert_eq!(cal.apply(3900), STICK_RESOLUTION);
        // And clamp beyond them
        assert_eq!(cal.apply(0), -STICK_RESOLUTION);
        assert_eq!(cal.apply(4095), STICK_RESOLUTION);
    }

    #[test]
    fn test_dead_band() {
        let cal = AxisCalibration::new(100, 2000, 3900);
        assert_eq!(cal.apply(2000 + cal.deadband), 0);
        assert_eq!(cal.apply(2000 - cal.deadband), 0);
        assert!(cal.apply(2000 + cal.deadband + 40) > 0);
        assert!(cal.apply(2000 - cal.deadband - 40) < 0);
    }

    #[test]
    fn test_inverted_axis() {
        let cal = AxisCalibration {
            inverted: true,
            ..AxisCalibration::new(100, 2000, 3900)
        };
        assert_eq!(cal.apply(3900), -STICK_RESOLUTION);
        assert_eq!(cal.apply(100), STICK_RESOLUTION);
    }

    #[test]
    fn test_degenerate_calibration_is_zero() {
        let cal = AxisCalibration::new(2000, 2000, 2000);
        assert_eq!(cal.apply(0), 0);
        assert_eq!(cal.apply(4095), 0);
        let cal = AxisCalibration::new(3000, 2000, 1000);
        assert_eq!(cal.apply(2000), 0);
    }

    fn calibrations() -> impl Strategy<Value = AxisCalibration> {
        (0u16..1000, 1500u16..2500, 3000u16..4096, 0u16..100).prop_map(
            |(min, mid, max, deadband)| AxisCalibration {
                min,
                mid,
                max,
                deadband,
                inverted: false,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_output_in_range(cal in calibrations(), raw in 0u16..8192) {
            let v = cal.apply(raw);
            prop_assert!((-STICK_RESOLUTION..=STICK_RESOLUTION).contains(&v));
        }

        #[test]
        fn prop_monotone(cal in calibrations(), a in 0u16..8192, b in 0u16..8192) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(cal.apply(lo) <= cal.apply(hi));
        }

        #[test]
        fn prop_inversion_negates(cal in calibrations(), raw in 0u16..8192) {
            let flipped = AxisCalibration { inverted: true, ..cal };
            prop_assert_eq!(flipped.apply(raw), -cal.apply(raw));
        }
    }
}
