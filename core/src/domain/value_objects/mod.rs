//! Value objects exchanged with the backend.

pub mod otp_dispatch;

// Re-export commonly used types
pub use otp_dispatch::{DispatchKind, OtpDispatch, VerifyResponse};
