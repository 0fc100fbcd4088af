//! Shared utilities and common types for the EcoPickup client
//!
//! This crate provides functionality used across all client crates:
//! - Configuration types and the layered configuration loader
//! - Language selection for user-facing messages
//! - Small validation helpers (OTP digits, secret masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    ApiConfig, AppConfig, ConfigError, Environment, LogFormat, LoggingConfig, OtpConfig,
    OtpEndpoints, SessionConfig, DEFAULT_VERIFY_SUCCESS_MESSAGE,
};
pub use types::Language;
pub use utils::validation;
