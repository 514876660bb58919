//! # Location Resolver
//!
//! The one canonical state machine behind every "where am I" screen.
//! Drives the permission → position → geocode pipeline and publishes a
//! single current [`LocationResult`] that any presentation binding can
//! subscribe to.
//!
//! ```text
//! Pending --activate--> (permission check)
//!   --granted--> Loading --fix ok--> (geocode) --always--> Success
//!   --denied--> Denied
//!   --platform error--> Error
//! Loading --fix failure--> Error
//! Denied --retry_permission--> (permission check)
//! Error --refresh / retry_permission--> Loading / (permission check)
//! Success --refresh--> Loading
//! ```
//!
//! Concurrency contract:
//! - At most one pipeline in flight. `refresh()` or `activate()` while a
//!   run is active is a no-op — no duplicate provider calls.
//! - `deactivate()` bumps an epoch counter. A run whose epoch is stale
//!   must neither publish nor touch the in-flight flag, so a late
//!   position or geocode completion cannot mutate discarded state.

use std::sync::{Arc, Mutex};

use log::{debug, info, warn};
use tokio::sync::watch;

use super::provider::{CapabilityProvider, PermissionError, PositionProvider};
use super::types::{
    AddressInfo, Capability, Coordinates, LocationResult, PermissionState, PositionOptions,
};
use crate::geocode::ReverseGeocoder;

/// Published when the permission subsystem itself fails (as opposed to
/// the user declining). Terminal until an explicit retry.
const PERMISSION_CHECK_FAILED: &str = "Permission check failed";

/// Control block shared between overlapping calls. Kept tiny so the
/// mutex is only ever held for a few instructions.
struct Inner {
    /// Bumped by `deactivate()`; runs stamped with an older value are stale.
    epoch: u64,
    /// True while a pipeline run owns the state.
    in_flight: bool,
}

pub struct LocationResolver {
    capabilities: Arc<dyn CapabilityProvider>,
    positions: Arc<dyn PositionProvider>,
    geocoder: Arc<dyn ReverseGeocoder>,
    capability: Capability,
    options: PositionOptions,
    inner: Mutex<Inner>,
    tx: watch::Sender<LocationResult>,
}

impl LocationResolver {
    pub fn new(
        capabilities: Arc<dyn CapabilityProvider>,
        positions: Arc<dyn PositionProvider>,
        geocoder: Arc<dyn ReverseGeocoder>,
        options: PositionOptions,
    ) -> Self {
        let (tx, _rx) = watch::channel(LocationResult::Pending);
        Self {
            capabilities,
            positions,
            geocoder,
            capability: Capability::platform_default(),
            options,
            inner: Mutex::new(Inner {
                epoch: 0,
                in_flight: false,
            }),
            tx,
        }
    }

    /// A receiver over the current result. `borrow()` always yields the
    /// latest published variant.
    pub fn subscribe(&self) -> watch::Receiver<LocationResult> {
        self.tx.subscribe()
    }

    /// Snapshot of the current result.
    pub fn current(&self) -> LocationResult {
        self.tx.borrow().clone()
    }

    /// Entry point, once per presentation-layer mount. Idempotent: only a
    /// `Pending` resolver with no run in flight starts the pipeline.
    pub async fn activate(&self) {
        let Some(epoch) = self.begin("activate", |r| matches!(r, LocationResult::Pending)) else {
            return;
        };
        info!("Location pipeline activated (capability: {:?})", self.capability);
        self.drive_from_permission(epoch).await;
        self.finish(epoch);
    }

    /// Re-enters from the position fetch; the existing grant is trusted.
    /// Allowed from `Success` or `Error`; ignored while a run is in flight.
    pub async fn refresh(&self) {
        let allowed = |r: &LocationResult| {
            matches!(r, LocationResult::Success(..) | LocationResult::Error(_))
        };
        let Some(epoch) = self.begin("refresh", allowed) else {
            return;
        };
        self.drive_from_position(epoch).await;
        self.finish(epoch);
    }

    /// Re-enters from the permission check. Allowed from `Denied` or `Error`.
    pub async fn retry_permission(&self) {
        let allowed =
            |r: &LocationResult| matches!(r, LocationResult::Denied | LocationResult::Error(_));
        let Some(epoch) = self.begin("retry_permission", allowed) else {
            return;
        };
        self.drive_from_permission(epoch).await;
        self.finish(epoch);
    }

    /// Abandons any in-flight run and discards the current result. Late
    /// provider completions from before this call can no longer publish.
    pub fn deactivate(&self) {
        let mut inner = self.inner.lock().expect("resolver lock poisoned");
        inner.epoch += 1;
        inner.in_flight = false;
        self.tx.send_replace(LocationResult::Pending);
        debug!("Resolver deactivated (epoch now {})", inner.epoch);
    }

    // ------------------------------------------------------------------
    // Pipeline phases
    // ------------------------------------------------------------------

    async fn drive_from_permission(&self, epoch: u64) {
        match self.confirm_grant().await {
            Ok(true) => self.drive_from_position(epoch).await,
            Ok(false) => {
                info!("Location permission denied by user");
                self.publish(epoch, LocationResult::Denied);
            }
            Err(e) => {
                warn!("Permission subsystem failure: {}", e);
                self.publish(epoch, LocationResult::Error(PERMISSION_CHECK_FAILED.to_string()));
            }
        }
    }

    /// Checks the current grant; anything short of `Granted` triggers an
    /// interactive request. `Denied` is only ever published from the
    /// result of an explicit request.
    async fn confirm_grant(&self) -> Result<bool, PermissionError> {
        match self.capabilities.check(self.capability).await? {
            PermissionState::Granted => Ok(true),
            PermissionState::Unknown | PermissionState::Denied => {
                let requested = self.capabilities.request(self.capability).await?;
                Ok(requested == PermissionState::Granted)
            }
        }
    }

    async fn drive_from_position(&self, epoch: u64) {
        if !self.publish(epoch, LocationResult::Loading) {
            return;
        }

        let coordinates = match self.positions.current_position(&self.options).await {
            Ok(coords) => coords,
            Err(e) => {
                warn!("Position fix failed: {}", e);
                self.publish(epoch, LocationResult::Error(e.to_string()));
                return;
            }
        };

        if self.is_stale(epoch) {
            debug!("Position fix arrived after deactivation, abandoning");
            return;
        }

        debug!(
            "Position fix: ({}, {}), resolving address",
            coordinates.latitude, coordinates.longitude
        );
        let address = self.resolve_address(coordinates).await;
        self.publish(epoch, LocationResult::Success(coordinates, address));
    }

    /// Best-effort reverse geocode. A failure here never regresses
    /// coordinates already obtained; it only costs the address fields.
    async fn resolve_address(&self, coordinates: Coordinates) -> Option<AddressInfo> {
        match self.geocoder.reverse(coordinates).await {
            Ok(info) => Some(info),
            Err(e) => {
                warn!("Reverse geocode unavailable, keeping coordinates only: {}", e);
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Epoch and in-flight bookkeeping
    // ------------------------------------------------------------------

    /// Claims the pipeline. Returns the run's epoch stamp, or `None` when
    /// a run is already in flight or the current variant does not allow
    /// this operation.
    fn begin(&self, op: &str, allowed: impl Fn(&LocationResult) -> bool) -> Option<u64> {
        let mut inner = self.inner.lock().expect("resolver lock poisoned");
        if inner.in_flight {
            debug!("Ignoring {}: pipeline already in flight", op);
            return None;
        }
        let current = self.tx.borrow().clone();
        if !allowed(&current) {
            debug!("Ignoring {}: not allowed from {:?}", op, current);
            return None;
        }
        inner.in_flight = true;
        Some(inner.epoch)
    }

    /// Releases the in-flight flag, unless a deactivation superseded this run.
    fn finish(&self, epoch: u64) {
        let mut inner = self.inner.lock().expect("resolver lock poisoned");
        if inner.epoch == epoch {
            inner.in_flight = false;
        }
    }

    fn is_stale(&self, epoch: u64) -> bool {
        self.inner.lock().expect("resolver lock poisoned").epoch != epoch
    }

    /// Publishes a result, unless this run went stale. Returns whether the
    /// run still owns the state.
    fn publish(&self, epoch: u64, result: LocationResult) -> bool {
        let inner = self.inner.lock().expect("resolver lock poisoned");
        if inner.epoch != epoch {
            debug!("Dropping stale result: {:?}", result);
            return false;
        }
        debug!("State transition -> {:?}", result);
        self.tx.send_replace(result);
        true
    }
}
