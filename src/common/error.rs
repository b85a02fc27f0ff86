// src/common/error.rs

/// Errors surfaced by the fallible public entry points.
///
/// Generic over the bus transport error `E` so HAL-specific failures flow
/// through unchanged. Most bus failures never reach the caller: the scheduler
/// absorbs them into the per-device fault counter instead.
#[derive(Debug, thiserror::Error)]
pub enum LidarError<E = ()>
where
    E: core::fmt::Debug,
{
    /// Underlying I2C transaction error from the HAL implementation.
    #[error("I2C error: {0:?}")]
    Io(E),

    /// Provided byte is not a usable 7-bit I2C address.
    #[error("Invalid I2C address: {0:#04x}")]
    InvalidAddress(u8),

    /// Operation referenced a handle whose slot is empty.
    ///
    /// Handles are only minted by registration, so this indicates a handle
    /// from a different controller instance.
    #[error("Unknown device handle")]
    UnknownHandle,
}

// Allow mapping from the underlying HAL error via `?`
impl<E: core::fmt::Debug> From<E> for LidarError<E> {
    fn from(e: E) -> Self {
        LidarError::Io(e)
    }
}

/// Step-classified failure of the address-assignment sequence.
///
/// Each variant identifies which of the six protocol steps failed. The
/// sequence never retries internally; recovery happens through the fault
/// counter and the forced-reset cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressAssignError {
    /// No device answers on the shared default address.
    #[error("No device responding on the default address")]
    Unresponsive,

    /// Another device already answers on the target address.
    #[error("Target address already occupied on the bus")]
    AddressInUse,

    /// Reading the factory serial number failed.
    #[error("Failed to read the serial number")]
    SerialRead,

    /// Echoing serial byte 0 back failed.
    #[error("Failed to write serial byte 0")]
    SerialWrite1,

    /// Echoing serial byte 1 back failed.
    #[error("Failed to write serial byte 1")]
    SerialWrite2,

    /// Writing the target unique address failed.
    #[error("Failed to write the new address")]
    AddressWrite,

    /// Disabling the response on the default address failed.
    #[error("Failed to disable the party line")]
    PartyLineOff,
}

/// Registration failures, checked once at setup time.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// Requested id is at or beyond the registry capacity.
    #[error("Device id {id} out of range (capacity {capacity})")]
    IdOutOfRange { id: u8, capacity: usize },

    /// Slot already holds a device; slots are write-once.
    #[error("Device id {0} already registered")]
    SlotOccupied(u8),
}
