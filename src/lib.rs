// src/lib.rs

#![no_std] // Specify no_std at the crate root

pub mod common;
pub mod controller;

// Re-export key types for convenience
pub use common::LidarAddress;
pub use common::LidarError;
pub use controller::{LidarController, LidarDevice, LidarHandle, LidarState};
