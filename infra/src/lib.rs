//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the OTP flow depends on.
//!
//! ## Architecture
//!
//! - **HTTP**: `reqwest` client for the backend OTP endpoints
//! - **Session**: persistent (JSON file) and in-memory session stores
//! - **Timer**: tokio task delivering one-second ticks to a flow

// Re-export core types for convenience
pub use ep_core::errors::*;

/// Backend HTTP client
pub mod http;

/// Session token and pending-resend marker storage
pub mod session;

/// Cooldown tick scheduling
pub mod timer;

pub use http::HttpOtpApi;
pub use session::{FileSessionStore, MemorySessionStore};
pub use timer::{CooldownTimer, DEFAULT_TICK_INTERVAL};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP client construction or request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Session file could not be read or written
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Session file contents could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
