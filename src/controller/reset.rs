// src/controller/reset.rs

use super::registry::LidarHandle;

/// Mutual-exclusion token for the reset window.
///
/// Every lidar powers up answering on the shared default address, so only
/// one device may be powered and mid-address-assignment at a time. The
/// controller owns one latch and passes it into each per-device step; a
/// device whose turn is blocked simply re-checks on the next pass. This is
/// a binary latch, not a queue: no fairness ordering across waiters.
#[derive(Debug, Default)]
pub struct ResetLatch {
    holder: Option<LidarHandle>,
}

impl ResetLatch {
    pub const fn new() -> Self {
        ResetLatch { holder: None }
    }

    /// Claims the latch for `handle`. Succeeds when the latch is free or
    /// already held by the same device.
    pub fn try_claim(&mut self, handle: LidarHandle) -> bool {
        match self.holder {
            None => {
                self.holder = Some(handle);
                true
            }
            Some(current) => current == handle,
        }
    }

    /// Releases the latch if `handle` holds it. A release by any other
    /// device is ignored so one device cannot cut short another's reset
    /// window.
    pub fn release(&mut self, handle: LidarHandle) {
        if self.holder == Some(handle) {
            self.holder = None;
        }
    }

    /// `true` when no device is mid-reset.
    pub fn is_idle(&self) -> bool {
        self.holder.is_none()
    }

    pub fn holder(&self) -> Option<LidarHandle> {
        self.holder
    }
}
