//! Daemon configuration
//!
//! Layered with figment, lowest precedence first:
//! 1. Built-in defaults
//! 2. Optional TOML file
//! 3. Environment (`MINTD_<SECTION>__<KEY>`, plus the bare provider key names)

use std::net::SocketAddr;
use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pinata::Credentials;

/// Default request body limit (50MB) so inline base64 images fit
pub const DEFAULT_BODY_LIMIT: usize = 50 * 1024 * 1024;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Figment(#[from] Box<figment::Error>),
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Maximum accepted request body in bytes
    pub body_limit: usize,
    pub stability: StabilityConfig,
    pub pinata: PinataConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            body_limit: DEFAULT_BODY_LIMIT,
            stability: StabilityConfig::default(),
            pinata: PinataConfig::default(),
        }
    }
}

/// Image generation provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilityConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub output_format: String,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: crate::stability::DEFAULT_BASE_URL.to_string(),
            output_format: "png".to_string(),
        }
    }
}

/// Pinning service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PinataConfig {
    pub api_key: Option<String>,
    pub secret_api_key: Option<String>,
    pub base_url: String,
    /// Public gateway used to turn CIDs into links
    pub gateway_url: String,
}

impl Default for PinataConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            secret_api_key: None,
            base_url: crate::pinata::DEFAULT_BASE_URL.to_string(),
            gateway_url: crate::pinata::DEFAULT_GATEWAY_URL.to_string(),
        }
    }
}

impl PinataConfig {
    /// Both keys, if both are set and non-empty
    pub fn credentials(&self) -> Option<Credentials> {
        let api_key = self.api_key.as_deref().filter(|k| !k.is_empty())?;
        let secret = self.secret_api_key.as_deref().filter(|k| !k.is_empty())?;
        Some(Credentials::new(api_key, secret))
    }
}

impl Config {
    /// Build the layered figment without extracting it
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed("MINTD_").split("__"))
            .merge(
                Env::raw()
                    .only(&["AI_API_KEY"])
                    .map(|_| "stability.api_key".into()),
            )
            .merge(
                Env::raw()
                    .only(&["PINATA_API_KEY"])
                    .map(|_| "pinata.api_key".into()),
            )
            .merge(
                Env::raw()
                    .only(&["PINATA_SECRET_API_KEY"])
                    .map(|_| "pinata.secret_api_key".into()),
            )
    }

    /// Load configuration from defaults, an optional TOML file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Ok(Self::figment(path).extract().map_err(Box::new)?)
    }
}
