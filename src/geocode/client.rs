//! Reverse geocoding against a Nominatim-style endpoint.
//!
//! The lookup is strictly best-effort: the resolver logs a failure and
//! publishes coordinates without an address. The error taxonomy still
//! distinguishes "service said no" from "no data" so the log tells the
//! difference.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};

use super::types::ReverseResponse;
use crate::location::{AddressInfo, Coordinates};

pub const DEFAULT_NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_GEOCODE_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from a reverse-geocode lookup.
#[derive(Debug)]
pub enum GeocodeError {
    /// Network-level failure (DNS, connection refused).
    Network(String),
    /// The request exceeded the configured timeout.
    Timeout,
    /// The service returned a non-success status.
    Api { status: u16, message: String },
    /// Failed to parse the response body.
    Parse(String),
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodeError::Network(msg) => write!(f, "network error: {msg}"),
            GeocodeError::Timeout => write!(f, "geocode request timed out"),
            GeocodeError::Api { status, message } => {
                write!(f, "geocode API error (HTTP {status}): {message}")
            }
            GeocodeError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for GeocodeError {}

/// Converts coordinates into a human-readable place via an external lookup.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse(&self, coordinates: Coordinates) -> Result<AddressInfo, GeocodeError>;
}

/// Nominatim HTTP client.
pub struct NominatimClient {
    base_url: String,
    client: reqwest::Client,
}

impl NominatimClient {
    /// Creates a client against the given base URL (None = public Nominatim)
    /// with an explicit request timeout.
    pub fn new(base_url: Option<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            // Nominatim's usage policy requires an identifying agent.
            .user_agent(concat!("dancefloor/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_NOMINATIM_BASE_URL.to_string()),
            client,
        }
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    async fn reverse(&self, coordinates: Coordinates) -> Result<AddressInfo, GeocodeError> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json",
            self.base_url, coordinates.latitude, coordinates.longitude
        );
        debug!("Reverse geocode request: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                GeocodeError::Timeout
            } else {
                GeocodeError::Network(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Reverse geocode failed: HTTP {} - {}", status, message);
            return Err(GeocodeError::Api { status, message });
        }

        let body: ReverseResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::Parse(e.to_string()))?;

        let info = body.into_address_info();
        debug!(
            "Reverse geocode result: city={:?}, state={:?}",
            info.city, info.state
        );
        Ok(info)
    }
}
