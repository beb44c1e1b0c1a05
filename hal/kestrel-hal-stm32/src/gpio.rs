//! GPIO claim tracking
//!
//! A board table binds dozens of pins across seven ports. The allocator
//! records every claim during bring-up, so a table error that slipped
//! past `BoardConfig::validate` (or a hand-written binding function that
//! disagrees with its table) fails loudly instead of producing a pin
//! driven from two places.

use kestrel_core::config::{PinId, Port};

/// Number of GPIO ports tracked (A through G)
const PORT_COUNT: usize = 7;

/// Errors when claiming a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// Pin number out of range (0-15 valid)
    InvalidPin,
    /// Pin already claimed
    AlreadyClaimed,
}

/// GPIO allocator tracking claims per port
pub struct GpioAllocator {
    /// Claim bitmask per port, bit n = pin n
    claimed: [u16; PORT_COUNT],
}

impl Default for GpioAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioAllocator {
    pub const fn new() -> Self {
        Self {
            claimed: [0; PORT_COUNT],
        }
    }

    /// Claim a pin
    pub fn claim(&mut self, pin: PinId) -> Result<(), GpioError> {
        if pin.pin > 15 {
            return Err(GpioError::InvalidPin);
        }
        let mask = 1u16 << pin.pin;
        let port = &mut self.claimed[pin.port as usize];
        if *port & mask != 0 {
            return Err(GpioError::AlreadyClaimed);
        }
        *port |= mask;
        Ok(())
    }

    /// Release a pin
    pub fn release(&mut self, pin: PinId) {
        if pin.pin <= 15 {
            self.claimed[pin.port as usize] &= !(1u16 << pin.pin);
        }
    }

    /// Check if a pin is claimed
    pub fn is_claimed(&self, pin: PinId) -> bool {
        pin.pin <= 15 && self.claimed[pin.port as usize] & (1u16 << pin.pin) != 0
    }

    /// Total number of claimed pins
    pub fn count(&self) -> usize {
        self.claimed.iter().map(|p| p.count_ones() as usize).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_and_release() {
        let mut alloc = GpioAllocator::new();
        let pa7 = PinId::new(Port::A, 7);

        assert!(alloc.claim(pa7).is_ok());
        assert!(alloc.is_claimed(pa7));
        assert_eq!(alloc.claim(pa7), Err(GpioError::AlreadyClaimed));

        alloc.release(pa7);
        assert!(!alloc.is_claimed(pa7));
        assert!(alloc.claim(pa7).is_ok());
    }

    #[test]
    fn test_same_pin_number_different_ports() {
        let mut alloc = GpioAllocator::new();
        assert!(alloc.claim(PinId::new(Port::A, 3)).is_ok());
        assert!(alloc.claim(PinId::new(Port::B, 3)).is_ok());
        assert_eq!(alloc.count(), 2);
    }

    #[test]
    fn test_invalid_pin() {
        let mut alloc = GpioAllocator::new();
        assert_eq!(
            alloc.claim(PinId::new(Port::A, 16)),
            Err(GpioError::InvalidPin)
        );
    }
}
