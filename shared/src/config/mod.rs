//! Configuration module with sub-modules per concern
//!
//! - `api` - backend base URL, timeouts and OTP endpoint paths
//! - `environment` - environment detection and logging configuration
//! - `otp` - cooldown window, default resend budget, verify success message
//! - `session` - where the session token is persisted
//!
//! Values are layered: built-in defaults for the detected environment, then an
//! optional TOML file, then `EP_`-prefixed environment variables
//! (`EP_API__BASE_URL`, `EP_OTP__COOLDOWN_SECONDS`, ...).

pub mod api;
pub mod environment;
pub mod otp;
pub mod session;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::types::Language;

pub use api::{ApiConfig, OtpEndpoints};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::{OtpConfig, DEFAULT_VERIFY_SUCCESS_MESSAGE};
pub use session::SessionConfig;

/// Prefix of environment variables that override configuration values
pub const ENV_PREFIX: &str = "EP";

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Complete client configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Backend API configuration
    pub api: ApiConfig,

    /// OTP flow configuration
    #[serde(default)]
    pub otp: OtpConfig,

    /// Session persistence configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Language of user-facing fallback messages
    #[serde(default)]
    pub language: Language,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Built-in defaults for an environment
    pub fn for_environment(environment: Environment) -> Self {
        let api = match environment {
            Environment::Development => ApiConfig::default(),
            Environment::Staging => ApiConfig::new("https://staging-api.ecopickup.id"),
            Environment::Production => ApiConfig::new("https://api.ecopickup.id"),
        };

        Self {
            environment,
            api,
            otp: OtpConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::for_environment(environment),
            language: Language::default(),
        }
    }

    /// Load configuration from defaults, an optional file and the environment
    ///
    /// When `path` is `None` the environment's default file
    /// (`config.<env>.toml`) is read if it exists. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let environment = Environment::from_env();
        dotenvy::from_filename(environment.env_file()).ok();

        let file = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(environment.config_file()));

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Self::for_environment(environment))?)
            .add_source(config::File::from(file).required(path.is_some()))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay a TOML document onto the defaults of `environment`
    pub fn from_toml_str(environment: Environment, toml: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Self::for_environment(environment))?)
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the client cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::Invalid {
                field: "api.base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                field: "api.base_url",
                reason: format!("unsupported scheme in {}", base_url),
            });
        }
        if self.otp.cooldown_seconds == 0 {
            return Err(ConfigError::Invalid {
                field: "otp.cooldown_seconds",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.otp.verify_success_message.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "otp.verify_success_message",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
