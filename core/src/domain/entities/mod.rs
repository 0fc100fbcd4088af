//! Domain entities of the OTP verification flow.

pub mod otp_input;
pub mod resend_throttle;
pub mod session;

// Re-export commonly used types
pub use otp_input::{OtpInput, CODE_LENGTH};
pub use resend_throttle::{ResendThrottle, ThrottleState, COOLDOWN_SECONDS, DEFAULT_RESEND_BUDGET};
pub use session::{SessionContext, SessionToken};
