//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::geocode::{GeocodeError, ReverseGeocoder};
use crate::location::{
    AddressInfo, Capability, CapabilityProvider, Coordinates, PermissionError, PermissionState,
    PositionError, PositionOptions, PositionProvider,
};

/// Scripted capability provider with call counters.
pub struct MockCapabilityProvider {
    check: Mutex<Result<PermissionState, String>>,
    request: Mutex<Result<PermissionState, String>>,
    pub check_calls: AtomicUsize,
    pub request_calls: AtomicUsize,
}

impl MockCapabilityProvider {
    pub fn new(check: PermissionState, request: PermissionState) -> Self {
        Self {
            check: Mutex::new(Ok(check)),
            request: Mutex::new(Ok(request)),
            check_calls: AtomicUsize::new(0),
            request_calls: AtomicUsize::new(0),
        }
    }

    /// Pre-granted: the interactive request should never fire.
    pub fn granted() -> Self {
        Self::new(PermissionState::Granted, PermissionState::Granted)
    }

    /// Platform subsystem failure on both check and request.
    pub fn failing(message: &str) -> Self {
        Self {
            check: Mutex::new(Err(message.to_string())),
            request: Mutex::new(Err(message.to_string())),
            check_calls: AtomicUsize::new(0),
            request_calls: AtomicUsize::new(0),
        }
    }

    /// Re-scripts the request outcome mid-test (e.g. "user flipped the
    /// switch in settings").
    pub fn set_request(&self, state: PermissionState) {
        *self.request.lock().unwrap() = Ok(state);
    }
}

#[async_trait]
impl CapabilityProvider for MockCapabilityProvider {
    async fn check(&self, _capability: Capability) -> Result<PermissionState, PermissionError> {
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        self.check.lock().unwrap().clone().map_err(PermissionError)
    }

    async fn request(&self, _capability: Capability) -> Result<PermissionState, PermissionError> {
        self.request_calls.fetch_add(1, Ordering::SeqCst);
        self.request.lock().unwrap().clone().map_err(PermissionError)
    }
}

/// Scripted position provider; optionally sleeps before answering to
/// simulate a slow fix.
pub struct MockPositionProvider {
    result: Result<Coordinates, String>,
    delay: Option<Duration>,
    pub calls: AtomicUsize,
}

impl MockPositionProvider {
    pub fn returning(coordinates: Coordinates) -> Self {
        Self {
            result: Ok(coordinates),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl PositionProvider for MockPositionProvider {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinates, PositionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result
            .clone()
            .map_err(PositionError::Unavailable)
    }
}

/// Geocoder that either returns a fixed address or fails.
pub struct MockGeocoder {
    result: Option<AddressInfo>,
}

impl MockGeocoder {
    pub fn returning(info: AddressInfo) -> Self {
        Self { result: Some(info) }
    }

    pub fn failing() -> Self {
        Self { result: None }
    }
}

#[async_trait]
impl ReverseGeocoder for MockGeocoder {
    async fn reverse(&self, _coordinates: Coordinates) -> Result<AddressInfo, GeocodeError> {
        self.result
            .clone()
            .ok_or_else(|| GeocodeError::Network("connection refused".to_string()))
    }
}

pub fn london_address() -> AddressInfo {
    AddressInfo {
        display_name: "London, Greater London, England, United Kingdom".to_string(),
        city: Some("London".to_string()),
        state: Some("England".to_string()),
    }
}
