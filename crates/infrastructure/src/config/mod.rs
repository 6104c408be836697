//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `backends`: remote vision backend settings and credential
//! - `storage`: temporary artifact location
//! - `telemetry`: log filter and format
//!
//! Values come from an optional `config.toml`, overridden by environment
//! variables such as `MEDASSIST_SERVER__PORT` or `MEDASSIST_VISION__API_KEY`.

mod backends;
mod server;
mod storage;
mod telemetry;

use std::path::Path;

use ai_core::LocalModelConfig;
use application::{ApplicationError, HealthConfig};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use backends::VisionAppConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;
pub use telemetry::{LogFormat, TelemetryAppConfig};

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "MEDASSIST";

/// Variable consulted when no API key is configured
pub const FALLBACK_API_KEY_VAR: &str = "API_KEY";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote vision backend (lab reports, prescriptions)
    #[serde(default)]
    pub vision: VisionAppConfig,

    /// Local model runtime (diagnosis)
    #[serde(default)]
    pub local_model: LocalModelConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub telemetry: TelemetryAppConfig,

    /// Readiness check timeouts
    #[serde(default)]
    pub health: HealthConfig,
}

impl AppConfig {
    /// Load from `config.toml` in the working directory (if present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load from an explicit file (required to exist) or the default location
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }

    /// Credential for the remote vision backend
    ///
    /// Uses `vision.api_key`, falling back to the `API_KEY` environment
    /// variable.
    pub fn vision_api_key(&self) -> Result<SecretString, ApplicationError> {
        self.vision_api_key_with(|name| std::env::var(name).ok())
    }

    fn vision_api_key_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<SecretString, ApplicationError> {
        if let Some(key) = &self.vision.api_key {
            if !key.expose_secret().trim().is_empty() {
                debug!("Using configured vision API key");
                return Ok(key.clone());
            }
        }

        lookup(FALLBACK_API_KEY_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(SecretString::from)
            .ok_or_else(|| {
                ApplicationError::Configuration(format!(
                    "no vision API key: set {ENV_PREFIX}_VISION__API_KEY or {FALLBACK_API_KEY_VAR}"
                ))
            })
    }
}
