//! # EcoPickup Core
//!
//! Client-side core of the EcoPickup mobile app: the OTP verification flow.
//! This crate contains the domain entities (OTP input slots, resend throttle,
//! session context), the collaborator traits for the backend and session
//! storage, and the verification flow coordinator that sequences the send,
//! resend and verify calls.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
