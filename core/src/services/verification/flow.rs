//! Verification flow coordinator

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use ep_shared::validation::is_valid_otp_code;
use uuid::Uuid;

use crate::domain::entities::otp_input::OtpInput;
use crate::domain::entities::resend_throttle::ResendThrottle;
use crate::domain::entities::session::SessionContext;
use crate::domain::value_objects::otp_dispatch::{DispatchKind, OtpDispatch, VerifyResponse};
use crate::errors::{ApiFailure, OtpError, OtpResult};

use super::config::VerificationFlowConfig;
use super::traits::{OtpApiTrait, SessionStoreTrait, TickTarget};
use super::types::{FlowOutcome, FlowPhase, FlowSnapshot};

/// Mutable state of one flow instance
#[derive(Debug)]
struct FlowState {
    phase: FlowPhase,
    input: OtpInput,
    throttle: ResendThrottle,
    expires_at: Option<DateTime<Utc>>,
    next_resend_available: Option<DateTime<Utc>>,
    /// Pending-resend marker seen at start and not cleared yet
    pending_marker: bool,
    dispatching: bool,
    verifying: bool,
    last_notice: Option<String>,
}

/// One OTP verification session
///
/// Created when the OTP screen mounts and dropped when the user leaves it.
/// All methods take `&self`; the state lock is never held across a network
/// call, so input handling stays responsive while a request is in flight.
pub struct VerificationFlow<A: OtpApiTrait, S: SessionStoreTrait> {
    id: Uuid,
    /// Backend OTP endpoints
    api: Arc<A>,
    /// Session storage, used for the pending-resend marker
    store: Arc<S>,
    session: SessionContext,
    config: VerificationFlowConfig,
    state: Mutex<FlowState>,
}

impl<A: OtpApiTrait, S: SessionStoreTrait> VerificationFlow<A, S> {
    /// Create a new verification flow
    ///
    /// # Arguments
    ///
    /// * `api` - Backend OTP endpoints
    /// * `store` - Session storage holding the pending-resend marker
    /// * `session` - Session context carrying the bearer token
    /// * `config` - Flow configuration
    pub fn new(
        api: Arc<A>,
        store: Arc<S>,
        session: SessionContext,
        config: VerificationFlowConfig,
    ) -> Self {
        let throttle = ResendThrottle::new(config.cooldown_seconds, config.default_resend_budget);
        let id = Uuid::new_v4();

        tracing::debug!(
            flow_id = %id,
            token = %session.token(),
            event = "otp_flow_created",
            "Created verification flow"
        );

        Self {
            id,
            api,
            store,
            session,
            config,
            state: Mutex::new(FlowState {
                phase: FlowPhase::Created,
                input: OtpInput::new(),
                throttle,
                expires_at: None,
                next_resend_available: None,
                pending_marker: false,
                dispatching: false,
                verifying: false,
                last_notice: None,
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Fire the mandatory initial dispatch
    ///
    /// Sends a first code, or resends when the pending-resend marker is set.
    /// Runs once per flow regardless of the throttle. On success the
    /// cooldown starts, the budget is seeded, and a consumed marker is
    /// cleared. On failure the flow stays usable and the user may resend.
    pub async fn start(&self) -> OtpResult<OtpDispatch> {
        {
            let mut state = self.lock();
            match state.phase {
                FlowPhase::Created => {}
                FlowPhase::Disposed => return Err(OtpError::FlowClosed),
                _ => return Err(OtpError::AlreadyStarted),
            }
            state.phase = FlowPhase::Started;
            state.dispatching = true;
        }

        let pending = match self.store.pending_resend().await {
            Ok(pending) => pending,
            Err(e) => {
                tracing::warn!(
                    flow_id = %self.id,
                    error = %e,
                    "Failed to read pending-resend marker, sending a fresh code"
                );
                false
            }
        };
        self.lock().pending_marker = pending;

        let kind = if pending {
            DispatchKind::Resend
        } else {
            DispatchKind::Send
        };

        tracing::info!(
            flow_id = %self.id,
            kind = kind.as_str(),
            event = "otp_initial_dispatch",
            "Starting verification flow"
        );

        let token = self.session.token();
        let result = match kind {
            DispatchKind::Send => self.api.send_otp(token).await,
            DispatchKind::Resend => self.api.resend_otp(token).await,
        };

        self.complete_dispatch(kind, result).await
    }

    /// Ask the server for a new code
    ///
    /// Refused without a network call while the cooldown runs, when the
    /// budget is used up, or while another dispatch is in flight.
    pub async fn resend(&self) -> OtpResult<OtpDispatch> {
        {
            let mut state = self.lock();
            let refusal = match state.phase {
                FlowPhase::Created => Some(OtpError::NotStarted),
                FlowPhase::Verified => Some(OtpError::AlreadyVerified),
                FlowPhase::Disposed => Some(OtpError::FlowClosed),
                FlowPhase::Started if state.dispatching => Some(OtpError::ResendInFlight),
                FlowPhase::Started => state.throttle.check_resend().err().map(OtpError::from),
            };

            if let Some(error) = refusal {
                tracing::debug!(
                    flow_id = %self.id,
                    reason = error.error_code(),
                    "Resend refused locally"
                );
                return Err(self.notice_error(&mut state, error));
            }
            state.dispatching = true;
        }

        tracing::info!(
            flow_id = %self.id,
            event = "otp_resend_requested",
            "Requesting a new verification code"
        );

        let result = self.api.resend_otp(self.session.token()).await;
        self.complete_dispatch(DispatchKind::Resend, result).await
    }

    /// Submit the assembled code
    ///
    /// The code must be six digits; otherwise nothing is sent. Only one
    /// verify call may be in flight. Entered digits are kept on failure so
    /// the user can retry; verify itself has no attempt limit.
    pub async fn verify(&self) -> OtpResult<FlowOutcome> {
        let code = {
            let mut state = self.lock();
            let refusal = match state.phase {
                FlowPhase::Verified => Some(OtpError::AlreadyVerified),
                FlowPhase::Disposed => Some(OtpError::FlowClosed),
                _ if state.verifying => Some(OtpError::VerifyInFlight),
                _ => None,
            };
            if let Some(error) = refusal {
                return Err(self.notice_error(&mut state, error));
            }

            let code = state.input.assembled_code();
            if !is_valid_otp_code(&code) {
                let filled = state.input.filled_count();
                tracing::debug!(
                    flow_id = %self.id,
                    filled = filled,
                    "Verification refused, code incomplete"
                );
                return Err(self.notice_error(&mut state, OtpError::IncompleteCode { filled }));
            }

            state.verifying = true;
            code
        };

        let result = self.api.verify_otp(self.session.token(), &code).await;

        let mut state = self.lock();
        state.verifying = false;

        let response = match result {
            Ok(response) => response,
            Err(failure) => {
                tracing::warn!(
                    flow_id = %self.id,
                    error = %failure,
                    event = "otp_verification_error",
                    "Verification request failed"
                );
                return Err(self.notice_error(&mut state, OtpError::from(failure)));
            }
        };

        if !self.is_success(&response) {
            tracing::warn!(
                flow_id = %self.id,
                event = "otp_verification_failed",
                "Verification code rejected"
            );
            let error = match response.message {
                Some(message) if !message.trim().is_empty() => OtpError::Server {
                    status: None,
                    message,
                },
                _ => OtpError::from(ApiFailure::Malformed(
                    "verify response without a success marker or message".to_string(),
                )),
            };
            return Err(self.notice_error(&mut state, error));
        }

        tracing::info!(
            flow_id = %self.id,
            event = "otp_verified_success",
            "Verification code accepted"
        );

        if state.phase != FlowPhase::Disposed {
            state.phase = FlowPhase::Verified;
            state.last_notice = response.message.clone();
        }

        Ok(FlowOutcome::Verified {
            message: response.message,
            profile: response.profile,
        })
    }

    /// Store a digit typed into slot `index`
    pub fn set_digit(&self, index: usize, value: &str) -> bool {
        let mut state = self.lock();
        if state.phase.is_terminal() {
            return false;
        }
        state.input.set_digit(index, value)
    }

    /// Handle a backspace in slot `index`
    pub fn handle_backspace(&self, index: usize) -> bool {
        let mut state = self.lock();
        if state.phase.is_terminal() {
            return false;
        }
        state.input.handle_backspace(index)
    }

    pub fn assembled_code(&self) -> String {
        self.lock().input.assembled_code()
    }

    /// Advance the cooldown by one second
    ///
    /// # Returns
    ///
    /// `false` once the flow has ended, telling the scheduler to stop
    pub fn tick(&self) -> bool {
        let mut state = self.lock();
        if state.phase.is_terminal() {
            return false;
        }
        let was_cooling = state.throttle.cooldown() > 0;
        state.throttle.tick();
        if was_cooling && state.throttle.can_resend() {
            tracing::debug!(
                flow_id = %self.id,
                event = "otp_resend_available",
                "Cooldown finished, resend available"
            );
        }
        true
    }

    /// End the flow without notifying the server
    ///
    /// Later ticks are ignored and responses still in flight no longer
    /// change the flow's state.
    pub fn teardown(&self) {
        let mut state = self.lock();
        if state.phase != FlowPhase::Disposed {
            state.phase = FlowPhase::Disposed;
            tracing::debug!(
                flow_id = %self.id,
                event = "otp_flow_disposed",
                "Verification flow torn down"
            );
        }
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        let state = self.lock();
        FlowSnapshot {
            flow_id: self.id,
            phase: state.phase,
            digits: state.input.digits(),
            focused_index: state.input.focused_index(),
            cooldown: state.throttle.cooldown(),
            resend_budget: state.throttle.budget(),
            throttle_state: state.throttle.state(),
            expires_at: state.expires_at,
            next_resend_available: state.next_resend_available,
            dispatching: state.dispatching,
            verifying: state.verifying,
            last_notice: state.last_notice.clone(),
        }
    }

    /// Apply the result of a send or resend call
    async fn complete_dispatch(
        &self,
        kind: DispatchKind,
        result: Result<OtpDispatch, ApiFailure>,
    ) -> OtpResult<OtpDispatch> {
        let dispatch = match result {
            Ok(dispatch) => dispatch,
            Err(failure) => {
                tracing::warn!(
                    flow_id = %self.id,
                    kind = kind.as_str(),
                    error = %failure,
                    event = "otp_dispatch_failed",
                    "Failed to deliver verification code"
                );
                let mut state = self.lock();
                state.dispatching = false;
                return Err(self.notice_error(&mut state, OtpError::from(failure)));
            }
        };

        let clear_marker = kind == DispatchKind::Resend && self.lock().pending_marker;
        if clear_marker {
            match self.store.set_pending_resend(false).await {
                Ok(()) => self.lock().pending_marker = false,
                Err(e) => tracing::warn!(
                    flow_id = %self.id,
                    error = %e,
                    "Failed to clear pending-resend marker"
                ),
            }
        }

        let mut state = self.lock();
        state.dispatching = false;
        if state.phase == FlowPhase::Disposed {
            return Ok(dispatch);
        }

        state.throttle.on_dispatch_success(dispatch.remaining_resend);
        state.expires_at = dispatch.expires_at;
        state.next_resend_available = dispatch.next_resend_available;
        state.last_notice = Some(dispatch.message.clone());

        tracing::info!(
            flow_id = %self.id,
            kind = kind.as_str(),
            remaining_resend = state.throttle.budget(),
            cooldown = state.throttle.cooldown(),
            event = "otp_dispatch_success",
            "Verification code delivered"
        );

        Ok(dispatch)
    }

    /// Decide whether a verify response means success
    ///
    /// A structured `success` flag wins when present; otherwise the message
    /// must equal the configured success message exactly.
    fn is_success(&self, response: &VerifyResponse) -> bool {
        match response.success {
            Some(success) => success,
            None => response.message.as_deref() == Some(self.config.success_message.as_str()),
        }
    }

    /// Record an error as the user-visible notice and hand it back
    fn notice_error(&self, state: &mut FlowState, error: OtpError) -> OtpError {
        if state.phase != FlowPhase::Disposed {
            state.last_notice = Some(error.user_message(self.config.language));
        }
        error
    }

    fn lock(&self) -> MutexGuard<'_, FlowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<A: OtpApiTrait, S: SessionStoreTrait> TickTarget for VerificationFlow<A, S> {
    fn tick(&self) -> bool {
        VerificationFlow::tick(self)
    }
}
