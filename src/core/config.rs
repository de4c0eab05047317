//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.wayfarer/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WayfarerConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub directions: DirectionsConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Base URL of the travel-assistant server.
    pub server_url: Option<String>,
    /// Platform agent string used for the navigation deep-link rewrite.
    pub user_agent: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DirectionsConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
pub const DEFAULT_DIRECTIONS_BASE_URL: &str = "https://maps.googleapis.com";
pub const DEFAULT_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64)";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub server_url: String,
    pub agent: String,
    pub directions_api_key: Option<String>,
    pub directions_base_url: String,
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

/// Returns the path to `~/.wayfarer/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".wayfarer").join("config.toml"))
}

/// Load config from `~/.wayfarer/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `WayfarerConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<WayfarerConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(WayfarerConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(WayfarerConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: WayfarerConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Wayfarer Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# server_url = "http://localhost:8080"        # Travel-assistant server
# user_agent = "Mozilla/5.0 (X11; Linux x86_64)"

# [directions]
# api_key = "AIza..."                          # Or set GOOGLE_API_KEY env var
# base_url = "https://maps.googleapis.com"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_server_url` and `cli_agent` are from CLI flags (None = not specified).
pub fn resolve(
    config: &WayfarerConfig,
    cli_server_url: Option<&str>,
    cli_agent: Option<&str>,
) -> ResolvedConfig {
    // Server URL: CLI → env → config → default
    let server_url = cli_server_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("WAYFARER_SERVER_URL").ok())
        .or_else(|| config.general.server_url.clone())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

    // Agent: CLI → env → config → default
    let agent = cli_agent
        .map(|s| s.to_string())
        .or_else(|| std::env::var("WAYFARER_USER_AGENT").ok())
        .or_else(|| config.general.user_agent.clone())
        .unwrap_or_else(|| DEFAULT_AGENT.to_string());

    // Directions API key: env → config
    let directions_api_key = std::env::var("GOOGLE_API_KEY")
        .ok()
        .or_else(|| config.directions.api_key.clone());

    // Directions base URL: env → config → default
    let directions_base_url = std::env::var("DIRECTIONS_BASE_URL")
        .ok()
        .or_else(|| config.directions.base_url.clone())
        .unwrap_or_else(|| DEFAULT_DIRECTIONS_BASE_URL.to_string());

    ResolvedConfig {
        server_url,
        agent,
        directions_api_key,
        directions_base_url,
    }
}
