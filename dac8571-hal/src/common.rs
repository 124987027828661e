//! Device address and transfer timeout types.

use crate::error::InvalidSetting;

/// 7-bit I2C address of the DAC8571, selected by the A0 pin.
///
/// See the "Address byte" section of the datasheet. The A1 bit of the address
/// is fixed low in this package, leaving two possible addresses.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Address {
    /// A0 tied low: `0x4C`.
    #[default]
    Low = 0x4C,
    /// A0 tied high: `0x4E`.
    High = 0x4E,
}

impl Address {
    /// The 7-bit address, as passed to the transport.
    pub const fn seven_bit(self) -> u8 {
        self as u8
    }
}

impl From<Address> for u8 {
    fn from(value: Address) -> Self {
        value.seven_bit()
    }
}

impl TryFrom<u8> for Address {
    type Error = InvalidSetting;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x4C => Ok(Address::Low),
            0x4E => Ok(Address::High),
            other => Err(InvalidSetting::Address(other)),
        }
    }
}

/// How long a transport may block on a single transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Timeout {
    /// Give up after this many milliseconds.
    Millis(u32),
    /// Wait for as long as the transport allows.
    Max,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn only_two_addresses_accepted() {
        assert_eq!(Address::try_from(0x4C), Ok(Address::Low));
        assert_eq!(Address::try_from(0x4E), Ok(Address::High));
        for other in (0..=0x7F).filter(|a| *a != 0x4C && *a != 0x4E) {
            assert_eq!(Address::try_from(other), Err(InvalidSetting::Address(other)));
        }
    }
}
