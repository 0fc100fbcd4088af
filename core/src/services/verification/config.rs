//! Configuration for the verification flow

use ep_shared::{AppConfig, Language, OtpConfig, DEFAULT_VERIFY_SUCCESS_MESSAGE};

use crate::domain::entities::resend_throttle::{COOLDOWN_SECONDS, DEFAULT_RESEND_BUDGET};

/// Configuration for the verification flow
#[derive(Debug, Clone)]
pub struct VerificationFlowConfig {
    /// Seconds of cooldown after every successful send or resend
    pub cooldown_seconds: u32,
    /// Resend budget used until the server reports one
    pub default_resend_budget: u32,
    /// Message that marks a verify response as successful when the backend
    /// sends no structured flag
    pub success_message: String,
    /// Language of locally generated notices
    pub language: Language,
}

impl Default for VerificationFlowConfig {
    fn default() -> Self {
        Self {
            cooldown_seconds: COOLDOWN_SECONDS,
            default_resend_budget: DEFAULT_RESEND_BUDGET,
            success_message: DEFAULT_VERIFY_SUCCESS_MESSAGE.to_string(),
            language: Language::default(),
        }
    }
}

impl VerificationFlowConfig {
    pub fn from_otp_config(otp: &OtpConfig, language: Language) -> Self {
        Self {
            cooldown_seconds: otp.cooldown_seconds,
            default_resend_budget: otp.default_resend_budget,
            success_message: otp.verify_success_message.clone(),
            language,
        }
    }

    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::from_otp_config(&config.otp, config.language)
    }
}
