pub mod client;
pub mod types;

pub use client::{
    DEFAULT_GEOCODE_TIMEOUT, DEFAULT_NOMINATIM_BASE_URL, GeocodeError, NominatimClient,
    ReverseGeocoder,
};
