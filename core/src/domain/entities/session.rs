//! Session credential passed explicitly into the flows that need it.

use ep_shared::validation::mask_secret;
use serde::{Deserialize, Serialize};

use crate::errors::{OtpError, OtpResult};

/// Opaque bearer credential issued at login or registration
///
/// `Debug` and `Display` never print the raw value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token, rejecting blank values
    pub fn new(raw: impl Into<String>) -> OtpResult<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(OtpError::MissingSession);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Raw value, for building the Authorization header only
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn masked(&self) -> String {
        mask_secret(&self.0)
    }
}

impl TryFrom<String> for SessionToken {
    type Error = OtpError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<SessionToken> for String {
    fn from(token: SessionToken) -> Self {
        token.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SessionToken").field(&self.masked()).finish()
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.masked())
    }
}

/// Session context injected into a verification flow
///
/// Created once the token has been read from persistent storage; the flow
/// only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    token: SessionToken,
    email: Option<String>,
}

impl SessionContext {
    pub fn new(token: SessionToken) -> Self {
        Self { token, email: None }
    }

    /// Attach the address the code is delivered to, for display
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_rejects_blank() {
        assert!(matches!(SessionToken::new("   "), Err(OtpError::MissingSession)));
        assert!(matches!(SessionToken::new(""), Err(OtpError::MissingSession)));
    }

    #[test]
    fn test_token_is_trimmed_and_masked() {
        let token = SessionToken::new(" 42|abcdefghijkl \n").unwrap();
        assert_eq!(token.expose(), "42|abcdefghijkl");
        assert_eq!(token.to_string(), "***********ijkl");
        assert!(!format!("{:?}", token).contains("abcdefgh"));
    }

    #[test]
    fn test_context_carries_token_and_email() {
        let token = SessionToken::new("token-value").unwrap();
        let context = SessionContext::new(token.clone()).with_email("warga@example.id");
        assert_eq!(context.token(), &token);
        assert_eq!(context.email(), Some("warga@example.id"));
    }

    #[test]
    fn test_token_serializes_as_plain_string() {
        let token = SessionToken::new("abc123").unwrap();
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"abc123\"");
    }

    #[test]
    fn test_deserialization_applies_blank_check() {
        let token: SessionToken = serde_json::from_str("\" abc123 \"").unwrap();
        assert_eq!(token.expose(), "abc123");

        assert!(serde_json::from_str::<SessionToken>("\"   \"").is_err());
        assert!(serde_json::from_str::<SessionToken>("\"\"").is_err());
    }
}
