// src/controller/registry.rs

use crate::common::error::RegistryError;
use core::fmt;

/// Default registry capacity.
pub const MAX_LIDARS: usize = 8;

/// Opaque handle to a registered device.
///
/// Handles are only minted by a successful [`Registry::register`] call and
/// slots are never vacated, so a handle always refers to a live record in
/// the registry that issued it.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LidarHandle(u8);

impl LidarHandle {
    pub(crate) const fn from_index(index: usize) -> Self {
        LidarHandle(index as u8)
    }

    /// The logical device id this handle was registered under.
    pub const fn id(self) -> u8 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LidarHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lidar{}", self.0)
    }
}

/// Fixed-capacity slot table mapping logical ids to device records.
///
/// Slots are write-once: there is no removal path, matching the process
/// lifetime of the records it holds.
pub(crate) struct Registry<D, const N: usize> {
    slots: [Option<D>; N],
}

impl<D, const N: usize> Registry<D, N> {
    const EMPTY: Option<D> = None;

    pub(crate) const fn new() -> Self {
        Registry {
            slots: [Self::EMPTY; N],
        }
    }

    /// Claims slot `id` for `device`. Fails if the id is out of range or the
    /// slot is already in use.
    pub(crate) fn register(&mut self, id: u8, device: D) -> Result<LidarHandle, RegistryError> {
        let index = id as usize;
        if index >= N {
            return Err(RegistryError::IdOutOfRange { id, capacity: N });
        }
        if self.slots[index].is_some() {
            return Err(RegistryError::SlotOccupied(id));
        }
        self.slots[index] = Some(device);
        Ok(LidarHandle(id))
    }

    pub(crate) fn get(&self, handle: LidarHandle) -> Option<&D> {
        self.slots.get(handle.index()).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, handle: LidarHandle) -> Option<&mut D> {
        self.slots.get_mut(handle.index()).and_then(Option::as_mut)
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> Option<&mut D> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Number of registered devices.
    pub(crate) fn count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}
