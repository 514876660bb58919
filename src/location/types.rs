use std::time::Duration;

/// Outcome of a permission check or request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    /// Never asked — an interactive request may change this.
    Unknown,
    Granted,
    Denied,
}

/// The platform capability the resolver needs before touching the
/// position provider. Selected by build target, not at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Apple targets: location access while the app is foregrounded.
    LocationWhileInUse,
    /// Everything else: fine-grained location.
    FineLocation,
}

impl Capability {
    /// The capability for the current build target.
    pub fn platform_default() -> Self {
        if cfg!(any(target_os = "ios", target_os = "macos")) {
            Capability::LocationWhileInUse
        } else {
            Capability::FineLocation
        }
    }
}

/// A device position fix. Immutable once captured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Human-readable place attached to a fix after reverse geocoding.
/// Best-effort: any field beyond `display_name` may be missing, and the
/// whole struct may be absent from a `Success` result.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressInfo {
    pub display_name: String,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Options passed to the position provider for a single fix request.
#[derive(Debug, Clone, Copy)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached fix the provider may hand back instead of a fresh one.
    pub max_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_millis(15_000),
            max_age: Duration::from_millis(10_000),
        }
    }
}

/// The single piece of state the resolver owns and publishes.
///
/// Exactly one variant is active at a time. `Pending` covers the
/// permission-check phase; `Loading` covers the position fix and the
/// geocode lookup. `Denied` and `Error` are terminal until an explicit
/// retry; `Success` is stable but revocable by a refresh.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationResult {
    Pending,
    Loading,
    Success(Coordinates, Option<AddressInfo>),
    Denied,
    Error(String),
}

impl LocationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, LocationResult::Success(..))
    }

    /// True for the transient phases where a pipeline is still running.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, LocationResult::Pending | LocationResult::Loading)
    }
}
