// src/common/timing.rs

use core::time::Duration;

// Nominal values; the controller polls deadlines once per scheduling pass,
// so actual waits round up to the pass period.

// === Reset cycle ===

/// Settle time after power-up before the sensor accepts I2C traffic.
pub const POWER_ON_SETTLE: Duration = Duration::from_micros(16);

/// Hold time in the powered-off state before a unit re-enters the reset
/// queue. Long enough to fully discharge the sensor supply rail.
pub const POWER_OFF_HOLD: Duration = Duration::from_millis(20);

// === Fault handling ===

/// Consecutive-fault count beyond which a device is force-reset.
pub const MAX_NACKS: u8 = 10;

// === Plausibility limits ===
// The v2 occasionally returns wild readings after an offset glitch; readings
// outside these bounds are stored but counted as faults.

/// Largest credible change between two consecutive readings, in centimeters.
pub const DISTANCE_JUMP_MAX: u16 = 100;
/// Shortest credible reading, in centimeters.
pub const DISTANCE_MIN: u16 = 4;
/// Longest credible reading, in centimeters.
pub const DISTANCE_MAX: u16 = 1000;
