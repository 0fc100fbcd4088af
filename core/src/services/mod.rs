//! Services coordinating the domain entities with external collaborators.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    FlowOutcome, FlowPhase, FlowSnapshot, OtpApiTrait, SessionStoreTrait, TickTarget,
    VerificationFlow, VerificationFlowConfig,
};
