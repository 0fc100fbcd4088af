//! Parsed responses of the OTP endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Which delivery endpoint produced a dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchKind {
    Send,
    Resend,
}

impl DispatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchKind::Send => "send",
            DispatchKind::Resend => "resend",
        }
    }
}

/// Result of a successful send or resend call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtpDispatch {
    /// Message shown to the user, e.g. "Kode OTP telah dikirim"
    pub message: String,
    /// When the delivered code stops being accepted
    pub expires_at: Option<DateTime<Utc>>,
    /// Resends left in this session, when the server reports it
    pub remaining_resend: Option<u32>,
    /// Earliest time the server accepts another resend
    pub next_resend_available: Option<DateTime<Utc>>,
}

impl OtpDispatch {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expires_at: None,
            remaining_resend: None,
            next_resend_available: None,
        }
    }

    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn with_remaining_resend(mut self, remaining: u32) -> Self {
        self.remaining_resend = Some(remaining);
        self
    }
}

/// Body of a verify response that reached the client
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct VerifyResponse {
    pub message: Option<String>,
    /// Structured outcome flag, when the backend sends one
    pub success: Option<bool>,
    /// User profile returned on success; consumed by other screens
    pub profile: Option<serde_json::Value>,
}

impl VerifyResponse {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }
}
