//! OTP flow configuration module

use serde::{Deserialize, Serialize};

/// Literal message the backend returns on a successful verification
pub const DEFAULT_VERIFY_SUCCESS_MESSAGE: &str = "Email berhasil diverifikasi";

/// Client-side OTP flow settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Seconds the resend action stays disabled after a send or resend
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: u32,

    /// Resend budget assumed when the server omits `remaining_resend`
    #[serde(default = "default_resend_budget")]
    pub default_resend_budget: u32,

    /// Message that marks a verify response as successful
    #[serde(default = "default_success_message")]
    pub verify_success_message: String,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            cooldown_seconds: default_cooldown_seconds(),
            default_resend_budget: default_resend_budget(),
            verify_success_message: default_success_message(),
        }
    }
}

fn default_cooldown_seconds() -> u32 {
    30
}

fn default_resend_budget() -> u32 {
    3
}

fn default_success_message() -> String {
    DEFAULT_VERIFY_SUCCESS_MESSAGE.to_string()
}
