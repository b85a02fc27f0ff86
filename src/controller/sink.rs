// src/controller/sink.rs

use super::registry::LidarHandle;

/// Consumer of completed acquisitions (user implements this).
///
/// Invoked once per completed acquisition, from within the scheduling pass.
/// Implementations must not block; anything expensive belongs in the caller's
/// own queueing.
pub trait DistanceSink {
    /// A device finished an acquisition.
    ///
    /// `distance` and `previous` are in centimeters; `strength` is the raw
    /// signal strength register value.
    fn distance_ready(&mut self, device: LidarHandle, distance: u16, previous: u16, strength: u8);
}

/// Sink that discards every notification.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullSink;

impl DistanceSink for NullSink {
    fn distance_ready(&mut self, _: LidarHandle, _: u16, _: u16, _: u8) {}
}
