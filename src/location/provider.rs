use std::fmt;

use async_trait::async_trait;

use super::types::{Capability, Coordinates, PermissionState, PositionOptions};

/// Platform permission subsystem failure (the check or request itself
/// failed, distinct from the user declining).
#[derive(Debug)]
pub struct PermissionError(pub String);

impl fmt::Display for PermissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "permission subsystem error: {}", self.0)
    }
}

impl std::error::Error for PermissionError {}

/// Errors from the position provider.
/// The `Display` text is what ends up in the published `Error` variant,
/// so `Unavailable` passes the provider's message through verbatim.
#[derive(Debug)]
pub enum PositionError {
    /// No fix within the requested timeout.
    Timeout,
    /// Hardware unavailable, OS-level denial, or any provider-reported failure.
    Unavailable(String),
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::Timeout => write!(f, "position request timed out"),
            PositionError::Unavailable(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for PositionError {}

/// Platform abstraction for checking and requesting a sensitive permission.
#[async_trait]
pub trait CapabilityProvider: Send + Sync {
    /// Current grant state without prompting the user.
    async fn check(&self, capability: Capability) -> Result<PermissionState, PermissionError>;

    /// Interactive request. Only ever returns `Granted` or `Denied`.
    async fn request(&self, capability: Capability) -> Result<PermissionState, PermissionError>;
}

/// Platform abstraction yielding the device's current coordinates.
#[async_trait]
pub trait PositionProvider: Send + Sync {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinates, PositionError>;
}
