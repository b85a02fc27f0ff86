// src/controller/device.rs

use crate::common::address::LidarAddress;
use crate::common::profile::LidarConfig;
use crate::common::timing;

/// Lifecycle state of one lidar, advanced at most one step per scheduling
/// pass.
///
/// A freshly registered device starts in `ShuttingDown` so it is forced
/// through a full power-down cycle before first use, guaranteeing a known
/// power state. The machine cycles indefinitely; there is no terminal state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LidarState {
    /// Acquisition profile not yet written.
    NeedConfigure,
    /// Configured and idle; next step triggers an acquisition.
    AcquisitionReady,
    /// Acquisition triggered; polling the busy flag.
    AcquisitionPending,
    /// Reading collected; next step reads strength and notifies the sink.
    AcquisitionDone,
    /// Powered off, waiting for its turn on the shared default address.
    NeedReset,
    /// Powered on, waiting out the settle delay before address assignment.
    ResetPending,
    /// Power-down hold before re-entering the reset queue.
    ShuttingDown,
}

/// Per-sensor record: assigned address, lifecycle state, latest readings,
/// fault counter and reset deadline.
///
/// Owned exclusively by the controller through its registry slot. `P` is the
/// device's power enable line, `I` the monotonic instant type of the
/// controller's clock.
pub struct LidarDevice<P, I> {
    pub(crate) address: LidarAddress,
    pub(crate) state: LidarState,
    pub(crate) distance: u16,
    pub(crate) last_distance: u16,
    pub(crate) strength: u8,
    pub(crate) nack_count: u8,
    pub(crate) deadline: Option<I>,
    pub(crate) config: LidarConfig,
    pub(crate) power: P,
}

impl<P, I: Copy + Ord> LidarDevice<P, I> {
    /// Creates a device record with the default configuration.
    ///
    /// `address` is the unique address this unit will be reprogrammed onto
    /// during its reset cycle.
    pub fn new(address: LidarAddress, power: P) -> Self {
        Self::with_config(address, power, LidarConfig::default())
    }

    /// Creates a device record with an explicit configuration.
    pub fn with_config(address: LidarAddress, power: P, config: LidarConfig) -> Self {
        LidarDevice {
            address,
            state: LidarState::ShuttingDown,
            distance: 0,
            last_distance: 0,
            strength: 0,
            nack_count: 0,
            deadline: None,
            config,
            power,
        }
    }

    /// The unique bus address assigned to this unit.
    pub fn address(&self) -> LidarAddress {
        self.address
    }

    pub fn state(&self) -> LidarState {
        self.state
    }

    /// Most recent distance reading, in centimeters.
    pub fn distance(&self) -> u16 {
        self.distance
    }

    /// Distance reading before the most recent one.
    pub fn last_distance(&self) -> u16 {
        self.last_distance
    }

    /// Signal strength of the last completed acquisition.
    pub fn strength(&self) -> u8 {
        self.strength
    }

    /// Consecutive faults recorded since the last forced reset.
    pub fn fault_count(&self) -> u8 {
        self.nack_count
    }

    pub fn config(&self) -> LidarConfig {
        self.config
    }

    /// Records one communication fault.
    pub(crate) fn note_fault(&mut self) {
        self.nack_count = self.nack_count.saturating_add(1);
    }

    /// Stores a new reading, shifting the previous one, and applies the
    /// plausibility check. Implausible readings are stored anyway but count
    /// as a fault. Returns whether the reading passed the check.
    pub(crate) fn store_reading(&mut self, value: u16) -> bool {
        let plausible = self.distance.abs_diff(value) <= timing::DISTANCE_JUMP_MAX
            && (timing::DISTANCE_MIN..=timing::DISTANCE_MAX).contains(&value);
        if !plausible {
            self.note_fault();
        }
        self.last_distance = self.distance;
        self.distance = value;
        plausible
    }

    /// Returns `true` once the armed deadline has passed. A device with no
    /// armed deadline never reports elapsed.
    pub(crate) fn deadline_elapsed(&self, now: I) -> bool {
        matches!(self.deadline, Some(deadline) if now >= deadline)
    }
}
