//! Types describing the verification flow's progress

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::otp_input::CODE_LENGTH;
use crate::domain::entities::resend_throttle::ThrottleState;

/// Lifecycle phase of a flow instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowPhase {
    /// Constructed, initial dispatch not attempted yet
    Created,
    /// Initial dispatch attempted; user may type, resend and verify
    Started,
    /// Verification succeeded; terminal
    Verified,
    /// Torn down by the caller; terminal
    Disposed,
}

impl FlowPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowPhase::Verified | FlowPhase::Disposed)
    }
}

/// Successful end of a verification flow
#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    /// The server accepted the code; the caller moves to its success screen
    Verified {
        message: Option<String>,
        profile: Option<serde_json::Value>,
    },
}

/// Read-only view of a flow for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowSnapshot {
    pub flow_id: Uuid,
    pub phase: FlowPhase,
    pub digits: [Option<char>; CODE_LENGTH],
    pub focused_index: usize,
    pub cooldown: u32,
    pub resend_budget: u32,
    pub throttle_state: ThrottleState,
    pub expires_at: Option<DateTime<Utc>>,
    pub next_resend_available: Option<DateTime<Utc>>,
    pub dispatching: bool,
    pub verifying: bool,
    /// Last user-visible message (success notice or error)
    pub last_notice: Option<String>,
}

impl FlowSnapshot {
    /// Whether the resend control should be enabled
    pub fn resend_enabled(&self) -> bool {
        self.phase == FlowPhase::Started
            && !self.dispatching
            && self.throttle_state == ThrottleState::Idle
    }

    /// Whether the verify control should be enabled
    pub fn verify_enabled(&self) -> bool {
        !self.phase.is_terminal()
            && !self.verifying
            && self.digits.iter().all(Option::is_some)
    }

    /// Seconds until the delivered code expires, clamped at zero
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expires_at
            .map(|expires_at| (expires_at - now).num_seconds().max(0))
    }
}
