// src/common/address.rs

use super::error::LidarError;
use core::convert::TryFrom;
use core::fmt;

/// A 7-bit I2C address held by one lidar.
///
/// Every LidarLite powers up answering on [`LidarAddress::DEFAULT`] (0x62);
/// the controller reprograms each unit onto a unique address during the
/// reset cycle.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LidarAddress(u8);

impl LidarAddress {
    /// Factory default address shared by every unit at power-up.
    pub const DEFAULT: LidarAddress = LidarAddress(0x62);

    /// Creates a new `LidarAddress` if the byte is a usable 7-bit address.
    ///
    /// The I2C reserved ranges (0x00-0x07 and 0x78-0x7f) are rejected, as is
    /// anything with the high bit set.
    pub fn new(address: u8) -> Result<Self, LidarError<()>> {
        if Self::is_valid_address_byte(address) {
            Ok(LidarAddress(address))
        } else {
            Err(LidarError::InvalidAddress(address))
        }
    }

    /// Constructs without validation. The caller must guarantee the byte is a
    /// legal, non-reserved 7-bit address.
    pub const unsafe fn new_unchecked(address: u8) -> Self {
        LidarAddress(address)
    }

    #[inline]
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_default(&self) -> bool {
        self.0 == Self::DEFAULT.0
    }

    #[inline]
    pub const fn is_valid_address_byte(byte: u8) -> bool {
        matches!(byte, 0x08..=0x77)
    }
}

impl Default for LidarAddress {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for LidarAddress {
    // Address validation cannot cause an I/O error, so E = ()
    type Error = LidarError<()>;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LidarAddress> for u8 {
    fn from(value: LidarAddress) -> Self {
        value.0
    }
}

impl fmt::Display for LidarAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}
