// src/common/hal_traits.rs

use super::address::LidarAddress;
use core::fmt::Debug;
use core::ops::Add;
use core::time::Duration;

/// Abstraction over the raw I2C transactions the controller needs.
///
/// Every method is synchronous and expected to complete within a bounded
/// short timeout enforced by the underlying transport. The controller treats
/// every call as potentially failing and routes failures into the per-device
/// fault counter; it never assumes success.
pub trait LidarBus {
    /// Associated error type for failed transactions (NACK, timeout).
    type Error: Debug;

    /// Reads one byte from `register` of the device at `address`.
    fn read_byte(&mut self, address: LidarAddress, register: u8) -> Result<u8, Self::Error>;

    /// Reads two consecutive bytes starting at `register`.
    ///
    /// The LidarLite returns multi-byte values high byte first.
    fn read_word(&mut self, address: LidarAddress, register: u8)
        -> Result<[u8; 2], Self::Error>;

    /// Writes one byte to `register` of the device at `address`.
    fn write_byte(
        &mut self,
        address: LidarAddress,
        register: u8,
        value: u8,
    ) -> Result<(), Self::Error>;

    /// Returns `true` when a device acknowledges `address`.
    fn is_online(&mut self, address: LidarAddress) -> bool;
}

/// Per-device power enable line.
///
/// Each lidar has its own power control so the controller can hold all but
/// one unit off while the shared default address is being reprogrammed.
pub trait PowerSwitch {
    fn power_on(&mut self);
    fn power_off(&mut self);
}

/// Monotonic time source supplied by the caller.
///
/// The controller never blocks; it arms deadlines and polls them on later
/// scheduling passes. `Instant` only needs ordering and `+ Duration`.
pub trait LidarClock {
    type Instant: Copy + Ord + Add<Duration, Output = Self::Instant>;

    fn now(&self) -> Self::Instant;
}

// --- embedded-hal 1.0 adapters (feature "impl-ehal") ---

/// [`LidarBus`] implementation on top of any `embedded_hal::i2c::I2c`.
#[cfg(feature = "impl-ehal")]
pub struct EhalBus<I2C> {
    i2c: I2C,
}

#[cfg(feature = "impl-ehal")]
impl<I2C> EhalBus<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Releases the wrapped peripheral.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

#[cfg(feature = "impl-ehal")]
impl<I2C> LidarBus for EhalBus<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    type Error = I2C::Error;

    fn read_byte(&mut self, address: LidarAddress, register: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(address.as_u8(), &[register], &mut buf)?;
        Ok(buf[0])
    }

    fn read_word(
        &mut self,
        address: LidarAddress,
        register: u8,
    ) -> Result<[u8; 2], Self::Error> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(address.as_u8(), &[register], &mut buf)?;
        Ok(buf)
    }

    fn write_byte(
        &mut self,
        address: LidarAddress,
        register: u8,
        value: u8,
    ) -> Result<(), Self::Error> {
        self.i2c.write(address.as_u8(), &[register, value])
    }

    fn is_online(&mut self, address: LidarAddress) -> bool {
        // An empty write probes for an address ACK without touching any
        // register.
        self.i2c.write(address.as_u8(), &[]).is_ok()
    }
}

/// [`PowerSwitch`] implementation for an active-high enable pin.
#[cfg(feature = "impl-ehal")]
pub struct EnablePin<P> {
    pin: P,
}

#[cfg(feature = "impl-ehal")]
impl<P> EnablePin<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

#[cfg(feature = "impl-ehal")]
impl<P> PowerSwitch for EnablePin<P>
where
    P: embedded_hal::digital::OutputPin,
{
    fn power_on(&mut self) {
        // Pin errors are unrecoverable at this layer; a stuck enable line
        // shows up as bus faults and is handled by the reset cycle.
        let _ = self.pin.set_high();
    }

    fn power_off(&mut self) {
        let _ = self.pin.set_low();
    }
}
