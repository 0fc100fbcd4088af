//! OTP verification flow
//!
//! This module sequences the three backend calls of an email/phone
//! verification session:
//! - the initial send (or resend, when a previous screen left a pending
//!   marker) fired once when the flow starts
//! - user-initiated resends, throttled by a cooldown and a server budget
//! - verification of the six assembled digits, guarded against duplicate
//!   submissions

mod config;
mod flow;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationFlowConfig;
pub use flow::VerificationFlow;
pub use traits::{OtpApiTrait, SessionStoreTrait, TickTarget};
pub use types::{FlowOutcome, FlowPhase, FlowSnapshot};
