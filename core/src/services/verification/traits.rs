//! Traits for the backend, session storage and timer integration

use async_trait::async_trait;

use crate::domain::entities::session::SessionToken;
use crate::domain::value_objects::otp_dispatch::{OtpDispatch, VerifyResponse};
use crate::errors::ApiFailure;

/// Backend OTP endpoints
///
/// Every call carries the session token as a bearer credential.
#[async_trait]
pub trait OtpApiTrait: Send + Sync {
    /// Deliver a first code for this session
    async fn send_otp(&self, token: &SessionToken) -> Result<OtpDispatch, ApiFailure>;
    /// Deliver a new code, consuming one unit of the server's resend budget
    async fn resend_otp(&self, token: &SessionToken) -> Result<OtpDispatch, ApiFailure>;
    /// Submit the six-digit code
    async fn verify_otp(&self, token: &SessionToken, code: &str)
        -> Result<VerifyResponse, ApiFailure>;
}

/// Persistent key-value storage for the session
#[async_trait]
pub trait SessionStoreTrait: Send + Sync {
    /// Read the stored session token, if any
    async fn load_token(&self) -> Result<Option<SessionToken>, String>;
    /// Persist the session token
    async fn save_token(&self, token: &SessionToken) -> Result<(), String>;
    /// Whether a previous screen asked for a resend instead of a first send
    async fn pending_resend(&self) -> Result<bool, String>;
    /// Set or clear the pending-resend marker
    async fn set_pending_resend(&self, pending: bool) -> Result<(), String>;
}

/// Receiver of one-second scheduler ticks
pub trait TickTarget: Send + Sync {
    /// Advance by one tick
    ///
    /// # Returns
    ///
    /// `false` once the target no longer wants ticks
    fn tick(&self) -> bool;
}
