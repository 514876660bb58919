//! # Location Acquisition
//!
//! Everything between "the user opened the screen" and "we know where
//! they are". The [`resolver::LocationResolver`] owns the pipeline;
//! [`provider`] defines the platform seams it drives.

pub mod provider;
pub mod providers;
pub mod resolver;
pub mod types;

pub use provider::{CapabilityProvider, PermissionError, PositionError, PositionProvider};
pub use resolver::LocationResolver;
pub use types::{
    AddressInfo, Capability, Coordinates, LocationResult, PermissionState, PositionOptions,
};
