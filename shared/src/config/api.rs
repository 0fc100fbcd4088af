//! Backend API configuration module

use serde::{Deserialize, Serialize};

/// Connection settings for the marketplace backend
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the REST backend, e.g. `https://api.ecopickup.id`
    pub base_url: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// TCP connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// OTP endpoint paths, relative to `base_url`
    #[serde(default)]
    pub endpoints: OtpEndpoints,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:8000"),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agent: default_user_agent(),
            endpoints: OtpEndpoints::default(),
        }
    }
}

impl ApiConfig {
    /// Create a config pointing at `base_url` with default timeouts
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Join an endpoint path onto the base URL without doubling slashes
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Paths of the three OTP endpoints
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpEndpoints {
    pub send: String,
    pub resend: String,
    pub verify: String,
}

impl Default for OtpEndpoints {
    fn default() -> Self {
        Self {
            send: String::from("/api/otp/send"),
            resend: String::from("/api/otp/resend"),
            verify: String::from("/api/otp/verify"),
        }
    }
}

fn default_request_timeout() -> u64 {
    15
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_user_agent() -> String {
    format!("ecopickup-client/{}", env!("CARGO_PKG_VERSION"))
}
