// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod address;
pub mod error;
pub mod hal_traits;
pub mod profile;
pub mod registers;
pub mod timing;

// --- Re-export key types/traits for easier access ---

// From address.rs
pub use address::LidarAddress;

// From error.rs
pub use error::{AddressAssignError, LidarError, RegistryError};

// From hal_traits.rs
pub use hal_traits::{LidarBus, LidarClock, PowerSwitch};

// From profile.rs
pub use profile::{AcquisitionProfile, LidarConfig};

// From timing.rs and registers.rs (constants - access via the module path)

// --- Feature-gated re-exports ---

// embedded-hal adapters (from hal_traits.rs)
#[cfg(feature = "impl-ehal")]
pub use hal_traits::{EhalBus, EnablePin};
