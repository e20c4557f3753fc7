//! Configuration loading and parsing

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub api: ApiConfig,
}

/// Carrier API credentials and endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub api_key: String,
    pub secret_key: String,
    /// API authority, overridable for sandbox endpoints or tests
    #[serde(default = "default_authority")]
    pub authority: String,
    #[serde(default = "default_auth_path")]
    pub auth_path: String,
    #[serde(default = "default_track_path")]
    pub track_path: String,
}

fn default_authority() -> String {
    "https://apis.fedex.com/".to_string()
}

fn default_auth_path() -> String {
    "oauth/token".to_string()
}

fn default_track_path() -> String {
    "track/v1/trackingnumbers".to_string()
}

impl ApiConfig {
    /// URL of the OAuth token endpoint
    pub fn auth_url(&self) -> String {
        format!("{}{}", self.authority, self.auth_path)
    }

    /// URL of the tracking endpoint
    pub fn track_url(&self) -> String {
        format!("{}{}", self.authority, self.track_path)
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

/// Build configuration from FEDEX_API_KEY / FEDEX_SECRET_KEY environment
/// variables, for use when no config file is given
pub fn config_from_env() -> Result<AppConfig> {
    let api_key = env::var("FEDEX_API_KEY").unwrap_or_default();
    let secret_key = env::var("FEDEX_SECRET_KEY").unwrap_or_default();
    if api_key.is_empty() || secret_key.is_empty() {
        bail!(
            "No credentials: pass --config <FILE> or set FEDEX_API_KEY and FEDEX_SECRET_KEY"
        );
    }

    Ok(AppConfig {
        api: ApiConfig {
            api_key,
            secret_key,
            authority: default_authority(),
            auth_path: default_auth_path(),
            track_path: default_track_path(),
        },
    })
}
