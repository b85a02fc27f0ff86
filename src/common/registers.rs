// src/common/registers.rs

// LidarLite v2 register map. Read and write registers are separated because
// the sensor does not treat reading and writing the same internal register
// symmetrically. These values are a fixed hardware contract and must stay
// bit-exact.

// === Read registers ===

/// Acquisition status. Bit 0 is the busy flag.
pub const STATUS: u8 = 0x01;
/// Signal strength of the last completed acquisition.
pub const SIGNAL_STRENGTH: u8 = 0x0e;
/// Measured distance, 16 bits big-endian (high byte first).
pub const MEASURED_VALUE: u8 = 0x8f;
/// Two-byte factory serial number, used to unlock address reprogramming.
pub const READ_SERIAL: u8 = 0x96;

// === Write registers ===

/// Command/control register; writing [`INITIATE_VALUE`] starts an acquisition.
pub const CONTROL: u8 = 0x00;
/// First serial-number echo register.
pub const SERIAL_1: u8 = 0x18;
/// Second serial-number echo register.
pub const SERIAL_2: u8 = 0x19;
/// Target unique I2C address.
pub const ADDRESS: u8 = 0x1a;
/// Party-line control: whether the sensor keeps answering on 0x62.
pub const PARTY_LINE: u8 = 0x1e;
/// Distance offset applied by the sensor to every reading.
pub const OFFSET: u8 = 0x13;

// === Values ===

/// Start an acquisition with preamp enabled and DC stabilization.
pub const INITIATE_VALUE: u8 = 0x04;
/// Stop answering on the shared default address.
pub const PARTY_LINE_OFF: u8 = 0x08;
/// Mask for the busy flag in [`STATUS`]; zero means acquisition done.
pub const BUSY_MASK: u8 = 0x01;
