//! Desktop bindings for the provider seams.
//!
//! A terminal has no OS permission prompt and no GPS radio, so these
//! stand in for the platform: the grant comes from a configured policy
//! and the fix comes from configured coordinates. The resolver cannot
//! tell the difference, which is the point.

use async_trait::async_trait;

use super::super::provider::{
    CapabilityProvider, PermissionError, PositionError, PositionProvider,
};
use super::super::types::{Capability, Coordinates, PermissionState, PositionOptions};

/// Grant policy for [`DesktopCapabilityProvider`], read from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantPolicy {
    /// Check reports `Unknown`; the interactive request grants.
    Allow,
    /// Check reports `Unknown`; the interactive request denies.
    Deny,
}

pub struct DesktopCapabilityProvider {
    policy: GrantPolicy,
}

impl DesktopCapabilityProvider {
    pub fn new(policy: GrantPolicy) -> Self {
        Self { policy }
    }
}

#[async_trait]
impl CapabilityProvider for DesktopCapabilityProvider {
    async fn check(&self, _capability: Capability) -> Result<PermissionState, PermissionError> {
        // Never pre-granted: the interactive request decides, which keeps
        // the prompt path of the pipeline exercised outside of tests.
        Ok(PermissionState::Unknown)
    }

    async fn request(&self, _capability: Capability) -> Result<PermissionState, PermissionError> {
        Ok(match self.policy {
            GrantPolicy::Allow => PermissionState::Granted,
            GrantPolicy::Deny => PermissionState::Denied,
        })
    }
}

/// Position provider backed by configured coordinates
/// (`[location] latitude`/`longitude` or `DANCEFLOOR_LAT`/`DANCEFLOOR_LON`).
pub struct ConfiguredPositionProvider {
    coordinates: Option<Coordinates>,
}

impl ConfiguredPositionProvider {
    pub fn new(coordinates: Option<Coordinates>) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl PositionProvider for ConfiguredPositionProvider {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinates, PositionError> {
        self.coordinates.ok_or_else(|| {
            PositionError::Unavailable(
                "No position source configured (set [location] latitude/longitude \
                 or DANCEFLOOR_LAT/DANCEFLOOR_LON)"
                    .to_string(),
            )
        })
    }
}
