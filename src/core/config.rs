//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.dancefloor/config.toml`. If missing on first run,
//! a commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::geocode::{DEFAULT_GEOCODE_TIMEOUT, DEFAULT_NOMINATIM_BASE_URL};
use crate::location::providers::GrantPolicy;
use crate::location::{Coordinates, PositionOptions};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DancefloorConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub geocode: GeocodeConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// "allow" or "deny" — what the desktop permission prompt answers.
    pub grant_policy: Option<String>,
    /// Radius shown on the events placeholder, in miles.
    pub event_radius_miles: Option<u16>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub high_accuracy: Option<bool>,
    pub timeout_ms: Option<u64>,
    pub max_age_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeocodeConfig {
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
}

/// Hex color strings; parsed into terminal colors by the TUI layer.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ThemeConfig {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub background: Option<String>,
    pub text: Option<String>,
    pub text_light: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_EVENT_RADIUS_MILES: u16 = 25;
pub const DEFAULT_THEME_PRIMARY: &str = "#800080";
pub const DEFAULT_THEME_SECONDARY: &str = "#D8BFD8";
pub const DEFAULT_THEME_BACKGROUND: &str = "#FFFFFF";
pub const DEFAULT_THEME_TEXT: &str = "#000000";
pub const DEFAULT_THEME_TEXT_LIGHT: &str = "#FFFFFF";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub grant_policy: GrantPolicy,
    pub event_radius_miles: u16,
    /// Desktop stand-in for a GPS fix; None means "no position source".
    pub coordinates: Option<Coordinates>,
    pub position_options: PositionOptions,
    pub geocode_base_url: String,
    pub geocode_timeout: Duration,
    pub theme_primary: String,
    pub theme_secondary: String,
    pub theme_background: String,
    pub theme_text: String,
    pub theme_text_light: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.dancefloor/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".dancefloor").join("config.toml"))
}

/// Load config from `~/.dancefloor/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `DancefloorConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<DancefloorConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(DancefloorConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(DancefloorConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: DancefloorConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Commented-out default config, written on first run so users can
/// discover all options.
const DEFAULT_CONFIG_TEMPLATE: &str = r##"# Dancefloor Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# grant_policy = "allow"        # "allow" or "deny": desktop permission prompt answer
# event_radius_miles = 25

# [location]
# latitude = 51.5               # Desktop stand-in for a GPS fix
# longitude = -0.12             # (or set DANCEFLOOR_LAT / DANCEFLOOR_LON)
# high_accuracy = true
# timeout_ms = 15000
# max_age_ms = 10000

# [geocode]
# base_url = "https://nominatim.openstreetmap.org"
# timeout_ms = 10000

# [theme]
# primary = "#800080"           # Purple
# secondary = "#D8BFD8"         # Lighter purple
# background = "#FFFFFF"
# text = "#000000"
# text_light = "#FFFFFF"
"##;

/// Writes the default config template at the given path.
fn generate_default_config(path: &PathBuf) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_TEMPLATE) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars.
pub fn resolve(config: &DancefloorConfig) -> ResolvedConfig {
    let grant_policy = match config.general.grant_policy.as_deref() {
        Some("deny") => GrantPolicy::Deny,
        Some("allow") | None => GrantPolicy::Allow,
        Some(other) => {
            warn!("Unknown grant_policy '{}', defaulting to allow", other);
            GrantPolicy::Allow
        }
    };

    // Coordinates: env → config → none
    let coordinates = resolve_coordinates(config);

    let defaults = PositionOptions::default();
    let position_options = PositionOptions {
        high_accuracy: config.location.high_accuracy.unwrap_or(defaults.high_accuracy),
        timeout: config
            .location
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.timeout),
        max_age: config
            .location
            .max_age_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.max_age),
    };

    // Geocode base URL: env → config → default
    let geocode_base_url = std::env::var("DANCEFLOOR_GEOCODE_URL")
        .ok()
        .or_else(|| config.geocode.base_url.clone())
        .unwrap_or_else(|| DEFAULT_NOMINATIM_BASE_URL.to_string());

    let geocode_timeout = config
        .geocode
        .timeout_ms
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_GEOCODE_TIMEOUT);

    ResolvedConfig {
        grant_policy,
        event_radius_miles: config
            .general
            .event_radius_miles
            .unwrap_or(DEFAULT_EVENT_RADIUS_MILES),
        coordinates,
        position_options,
        geocode_base_url,
        geocode_timeout,
        theme_primary: theme_value(&config.theme.primary, DEFAULT_THEME_PRIMARY),
        theme_secondary: theme_value(&config.theme.secondary, DEFAULT_THEME_SECONDARY),
        theme_background: theme_value(&config.theme.background, DEFAULT_THEME_BACKGROUND),
        theme_text: theme_value(&config.theme.text, DEFAULT_THEME_TEXT),
        theme_text_light: theme_value(&config.theme.text_light, DEFAULT_THEME_TEXT_LIGHT),
    }
}

fn theme_value(configured: &Option<String>, default: &str) -> String {
    configured.clone().unwrap_or_else(|| default.to_string())
}

/// Coordinates come from `DANCEFLOOR_LAT`/`DANCEFLOOR_LON` or the config
/// file; both axes must be present for a fix to exist.
fn resolve_coordinates(config: &DancefloorConfig) -> Option<Coordinates> {
    let env_axis = |name: &str| -> Option<f64> {
        let raw = std::env::var(name).ok()?;
        match raw.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring {}: '{}' is not a number", name, raw);
                None
            }
        }
    };

    let latitude = env_axis("DANCEFLOOR_LAT").or(config.location.latitude)?;
    let longitude = env_axis("DANCEFLOOR_LON").or(config.location.longitude)?;
    Some(Coordinates {
        latitude,
        longitude,
    })
}
