//! Wire formats of the backend OTP endpoints

use chrono::{DateTime, NaiveDateTime, Utc};
use ep_core::{OtpDispatch, VerifyResponse};
use serde::{Deserialize, Serialize};

/// Body of a verify request
#[derive(Debug, Serialize)]
pub struct VerifyRequest<'a> {
    pub otp: &'a str,
}

/// Body of a send or resend response
#[derive(Debug, Deserialize)]
pub struct DispatchBody {
    pub message: String,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub remaining_resend: Option<i64>,
    #[serde(default)]
    pub next_resend_available: Option<String>,
}

impl DispatchBody {
    /// Convert into the domain value, tolerating odd timestamp formats
    pub fn into_dispatch(self) -> OtpDispatch {
        OtpDispatch {
            message: self.message,
            expires_at: self.expires_at.as_deref().and_then(parse_timestamp),
            // A negative count means nothing is left
            remaining_resend: self
                .remaining_resend
                .map(|remaining| remaining.clamp(0, u32::MAX as i64) as u32),
            next_resend_available: self
                .next_resend_available
                .as_deref()
                .and_then(parse_timestamp),
        }
    }
}

/// Body of a verify response
#[derive(Debug, Default, Deserialize)]
pub struct VerifyBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl VerifyBody {
    pub fn into_response(self) -> VerifyResponse {
        VerifyResponse {
            message: self.message,
            success: self.success,
            profile: self.user.or(self.data),
        }
    }
}

/// Body of an error response
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// First non-blank message the server provided
    pub fn into_message(self) -> Option<String> {
        self.message
            .into_iter()
            .chain(self.error)
            .find(|message| !message.trim().is_empty())
    }
}

/// Parse an RFC 3339 timestamp, or a `YYYY-MM-DD HH:MM:SS` one taken as UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        Ok(naive) => Some(naive.and_utc()),
        Err(_) => {
            tracing::warn!(timestamp = raw, "Ignoring unparseable timestamp from backend");
            None
        }
    }
}
