// src/controller/mod.rs

// Declare the modules within the controller directory.

pub mod device;
pub mod registry;
pub mod reset;
pub mod sink; // Defines the DistanceSink trait (user implements this)

// --- Public Re-exports ---
pub use self::device::{LidarDevice, LidarState};
pub use self::registry::{LidarHandle, MAX_LIDARS};
pub use self::reset::ResetLatch;
pub use self::sink::{DistanceSink, NullSink};

use crate::common::{
    address::LidarAddress,
    error::{AddressAssignError, LidarError, RegistryError},
    hal_traits::{LidarBus, LidarClock, PowerSwitch},
    registers, timing,
};
use self::registry::Registry;

/// Coordinates an array of LidarLite units sharing one I2C bus.
///
/// The controller owns the bus, the clock and a fixed-capacity registry of
/// device records. It is driven cooperatively: an external loop calls
/// [`spin_once`](Self::spin_once) periodically, and each call advances every
/// registered device by at most one lifecycle transition. No call blocks;
/// all waiting is done by arming deadlines against the caller-supplied
/// monotonic clock and polling them on later passes.
///
/// Bus failures never escape a scheduling pass. They are counted per device,
/// and a device whose consecutive-fault count crosses
/// [`timing::MAX_NACKS`] is forced through a full power-cycle reset.
pub struct LidarController<B, C, P, const N: usize = MAX_LIDARS>
where
    B: LidarBus,
    C: LidarClock,
    P: PowerSwitch,
{
    bus: B,
    clock: C,
    registry: Registry<LidarDevice<P, C::Instant>, N>,
    latch: ResetLatch,
}

impl<B, C, P, const N: usize> LidarController<B, C, P, N>
where
    B: LidarBus,
    C: LidarClock,
    P: PowerSwitch,
{
    pub fn new(bus: B, clock: C) -> Self {
        LidarController {
            bus,
            clock,
            registry: Registry::new(),
            latch: ResetLatch::new(),
        }
    }

    /// Registers a device under logical id `id` and schedules it for its
    /// initial power-down cycle.
    ///
    /// The device is powered off immediately and enters `ShuttingDown`, so
    /// its first trip through the state machine starts from a known power
    /// state. Fails if `id` is at or beyond the capacity or the slot is
    /// already in use.
    pub fn register(
        &mut self,
        id: u8,
        device: LidarDevice<P, C::Instant>,
    ) -> Result<LidarHandle, RegistryError> {
        let handle = self.registry.register(id, device)?;
        let now = self.clock.now();
        if let Some(dev) = self.registry.get_mut(handle) {
            Self::begin_shutdown(dev, now);
        }
        Ok(handle)
    }

    /// Performs one scheduling pass: every registered device is advanced by
    /// at most one lifecycle transition, then checked against the fault
    /// threshold.
    ///
    /// Side effects are bus transactions and `sink` notifications; bus
    /// failures are absorbed into the per-device fault counters.
    pub fn spin_once<S: DistanceSink>(&mut self, sink: &mut S) {
        let Self {
            bus,
            clock,
            registry,
            latch,
        } = self;

        for index in 0..N {
            if let Some(dev) = registry.slot_mut(index) {
                let handle = LidarHandle::from_index(index);
                Self::step_device(bus, clock, latch, handle, dev, sink);

                // The threshold check overrides whatever the step produced.
                if dev.nack_count > timing::MAX_NACKS {
                    dev.nack_count = 0;
                    latch.release(handle);
                    Self::begin_shutdown(dev, clock.now());
                }
            }
        }
    }

    /// Reads the measured distance and immediately triggers the next
    /// acquisition, saving one scheduling pass over the plain cycle.
    ///
    /// The read is retried exactly once on failure; the trigger is issued
    /// regardless so the sensor keeps measuring. This is the only
    /// per-operation retry in the system.
    pub fn read_distance_and_retrigger(
        &mut self,
        handle: LidarHandle,
    ) -> Result<u16, LidarError<B::Error>> {
        let bus = &mut self.bus;
        let dev = self
            .registry
            .get_mut(handle)
            .ok_or(LidarError::UnknownHandle)?;

        let word = match bus.read_word(dev.address, registers::MEASURED_VALUE) {
            Ok(word) => Ok(word),
            Err(_) => {
                dev.note_fault();
                bus.read_word(dev.address, registers::MEASURED_VALUE)
            }
        };
        let result = match word {
            Ok(word) => Ok(u16::from_be_bytes(word)),
            Err(e) => {
                dev.note_fault();
                Err(LidarError::Io(e))
            }
        };

        if bus
            .write_byte(dev.address, registers::CONTROL, registers::INITIATE_VALUE)
            .is_err()
        {
            dev.note_fault();
        }

        result
    }

    /// Forces a device through a full power-cycle reset on the next passes.
    pub fn reset_device(&mut self, handle: LidarHandle) -> Result<(), LidarError<()>> {
        let now = self.clock.now();
        let dev = self
            .registry
            .get_mut(handle)
            .ok_or(LidarError::UnknownHandle)?;
        self.latch.release(handle);
        Self::begin_shutdown(dev, now);
        Ok(())
    }

    /// Read-only view of a device record.
    pub fn device(&self, handle: LidarHandle) -> Option<&LidarDevice<P, C::Instant>> {
        self.registry.get(handle)
    }

    /// Number of registered devices.
    pub fn count(&self) -> usize {
        self.registry.count()
    }

    /// Registry capacity.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// `true` while some device occupies the shared default address.
    pub fn reset_in_progress(&self) -> bool {
        !self.latch.is_idle()
    }

    // --- Per-device step (private) ---

    fn step_device<S: DistanceSink>(
        bus: &mut B,
        clock: &C,
        latch: &mut ResetLatch,
        handle: LidarHandle,
        dev: &mut LidarDevice<P, C::Instant>,
        sink: &mut S,
    ) {
        match dev.state {
            LidarState::NeedConfigure => {
                let (register, value) = dev.config.profile.register_write();
                if bus.write_byte(dev.address, register, value).is_err() {
                    dev.note_fault();
                }
                dev.state = LidarState::AcquisitionReady;
            }

            LidarState::AcquisitionReady => {
                if bus
                    .write_byte(dev.address, registers::CONTROL, registers::INITIATE_VALUE)
                    .is_err()
                {
                    dev.note_fault();
                }
                dev.state = LidarState::AcquisitionPending;
            }

            LidarState::AcquisitionPending => {
                match bus.read_byte(dev.address, registers::STATUS) {
                    Ok(status) if status & registers::BUSY_MASK == 0 => {
                        match bus.read_word(dev.address, registers::MEASURED_VALUE) {
                            Ok(word) => {
                                dev.store_reading(u16::from_be_bytes(word));
                                dev.state = LidarState::AcquisitionDone;
                            }
                            // Reading failed: stay pending, retry next pass
                            Err(_) => dev.note_fault(),
                        }
                    }
                    // Still busy: no-op this tick
                    Ok(_) => {}
                    Err(_) => dev.note_fault(),
                }
            }

            LidarState::AcquisitionDone => {
                match bus.read_byte(dev.address, registers::SIGNAL_STRENGTH) {
                    Ok(strength) => dev.strength = strength,
                    Err(_) => dev.note_fault(),
                }
                sink.distance_ready(handle, dev.distance, dev.last_distance, dev.strength);
                if dev.config.force_offset_reset
                    && bus.write_byte(dev.address, registers::OFFSET, 0x00).is_err()
                {
                    dev.note_fault();
                }
                // Cycle repeats without reconfiguring
                dev.state = LidarState::AcquisitionReady;
            }

            LidarState::NeedReset => {
                // Only one device may occupy the default address; blocked
                // devices re-check every pass.
                if latch.try_claim(handle) {
                    dev.power.power_on();
                    dev.deadline = Some(clock.now() + timing::POWER_ON_SETTLE);
                    dev.state = LidarState::ResetPending;
                }
            }

            LidarState::ResetPending => {
                if dev.deadline_elapsed(clock.now()) {
                    if Self::run_address_sequence(bus, dev.address).is_err() {
                        dev.note_fault();
                    }
                    latch.release(handle);
                    dev.deadline = None;
                    dev.state = LidarState::NeedConfigure;
                }
            }

            LidarState::ShuttingDown => {
                if dev.deadline_elapsed(clock.now()) {
                    if Self::run_address_sequence(bus, dev.address).is_err() {
                        dev.note_fault();
                    }
                    latch.release(handle);
                    dev.deadline = None;
                    dev.state = LidarState::NeedReset;
                }
            }
        }
    }

    /// Reprograms the device currently answering on the default address onto
    /// `target`. Six steps, in order; the first failure aborts with a
    /// step-identifying code. No internal retry.
    fn run_address_sequence(
        bus: &mut B,
        target: LidarAddress,
    ) -> Result<(), AddressAssignError> {
        if !bus.is_online(LidarAddress::DEFAULT) {
            return Err(AddressAssignError::Unresponsive);
        }
        if bus.is_online(target) {
            return Err(AddressAssignError::AddressInUse);
        }

        let serial = bus
            .read_word(LidarAddress::DEFAULT, registers::READ_SERIAL)
            .map_err(|_| AddressAssignError::SerialRead)?;

        // Protocol-required echo of the serial number before the address
        // register unlocks.
        bus.write_byte(LidarAddress::DEFAULT, registers::SERIAL_1, serial[0])
            .map_err(|_| AddressAssignError::SerialWrite1)?;
        bus.write_byte(LidarAddress::DEFAULT, registers::SERIAL_2, serial[1])
            .map_err(|_| AddressAssignError::SerialWrite2)?;

        bus.write_byte(LidarAddress::DEFAULT, registers::ADDRESS, target.as_u8())
            .map_err(|_| AddressAssignError::AddressWrite)?;

        bus.write_byte(
            LidarAddress::DEFAULT,
            registers::PARTY_LINE,
            registers::PARTY_LINE_OFF,
        )
        .map_err(|_| AddressAssignError::PartyLineOff)?;

        Ok(())
    }

    fn begin_shutdown(dev: &mut LidarDevice<P, C::Instant>, now: C::Instant) {
        dev.power.power_off();
        dev.deadline = Some(now + timing::POWER_OFF_HOLD);
        dev.state = LidarState::ShuttingDown;
    }
}
