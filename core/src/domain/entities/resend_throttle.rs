//! Resend throttle: client-side cooldown plus the server-reported resend budget.

use serde::Serialize;

use crate::errors::ResendRefusal;

/// Seconds the resend action stays disabled after a send or resend
pub const COOLDOWN_SECONDS: u32 = 30;

/// Resend budget assumed until the server reports one
pub const DEFAULT_RESEND_BUDGET: u32 = 3;

/// Observable state of the throttle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThrottleState {
    /// Resend allowed
    Idle,
    /// Cooldown running, resend disallowed
    CoolingDown,
    /// No resends left; takes precedence over a running cooldown
    Exhausted,
}

/// Resend throttle controller
///
/// The budget is only ever overwritten with values reported by the server;
/// the client never decrements it. The cooldown is advisory and only moves
/// through `on_dispatch_success` and `tick`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendThrottle {
    cooldown: u32,
    budget: u32,
    window: u32,
}

impl Default for ResendThrottle {
    fn default() -> Self {
        Self::new(COOLDOWN_SECONDS, DEFAULT_RESEND_BUDGET)
    }
}

impl ResendThrottle {
    /// Create a throttle with no cooldown running
    pub fn new(window: u32, initial_budget: u32) -> Self {
        Self {
            cooldown: 0,
            budget: initial_budget,
            window,
        }
    }

    /// Record a successful send or resend
    ///
    /// Restarts the cooldown and mirrors the server's remaining budget when
    /// the response carried one.
    pub fn on_dispatch_success(&mut self, remaining_resend: Option<u32>) {
        self.cooldown = self.window;
        if let Some(remaining) = remaining_resend {
            self.budget = remaining;
        }
    }

    /// Advance the cooldown by one second
    ///
    /// # Returns
    ///
    /// The cooldown left after the tick
    pub fn tick(&mut self) -> u32 {
        self.cooldown = self.cooldown.saturating_sub(1);
        self.cooldown
    }

    pub fn state(&self) -> ThrottleState {
        if self.budget == 0 {
            ThrottleState::Exhausted
        } else if self.cooldown > 0 {
            ThrottleState::CoolingDown
        } else {
            ThrottleState::Idle
        }
    }

    /// Check whether a resend may be issued right now
    pub fn check_resend(&self) -> Result<(), ResendRefusal> {
        match self.state() {
            ThrottleState::Idle => Ok(()),
            ThrottleState::CoolingDown => Err(ResendRefusal::CoolingDown {
                seconds_left: self.cooldown,
            }),
            ThrottleState::Exhausted => Err(ResendRefusal::Exhausted),
        }
    }

    pub fn can_resend(&self) -> bool {
        self.check_resend().is_ok()
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn window(&self) -> u32 {
        self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let throttle = ResendThrottle::default();
        assert_eq!(throttle.state(), ThrottleState::Idle);
        assert_eq!(throttle.cooldown(), 0);
        assert_eq!(throttle.budget(), DEFAULT_RESEND_BUDGET);
        assert!(throttle.can_resend());
    }

    #[test]
    fn test_dispatch_success_starts_cooldown() {
        let mut throttle = ResendThrottle::default();
        throttle.on_dispatch_success(None);

        assert_eq!(throttle.cooldown(), 30);
        assert_eq!(throttle.budget(), 3);
        assert_eq!(throttle.state(), ThrottleState::CoolingDown);
        assert_eq!(
            throttle.check_resend(),
            Err(ResendRefusal::CoolingDown { seconds_left: 30 })
        );
    }

    #[test]
    fn test_cooldown_reaches_zero_after_window_and_never_underflows() {
        let mut throttle = ResendThrottle::default();
        throttle.on_dispatch_success(Some(2));

        for expected in (0..30).rev() {
            assert_eq!(throttle.tick(), expected);
        }
        assert_eq!(throttle.state(), ThrottleState::Idle);

        assert_eq!(throttle.tick(), 0);
        assert_eq!(throttle.cooldown(), 0);
    }

    #[test]
    fn test_server_budget_overrides_local_value() {
        let mut throttle = ResendThrottle::new(30, 1);
        throttle.on_dispatch_success(Some(2));
        assert_eq!(throttle.budget(), 2);

        throttle.on_dispatch_success(None);
        assert_eq!(throttle.budget(), 2);
    }

    #[test]
    fn test_exhausted_wins_over_cooldown() {
        let mut throttle = ResendThrottle::default();
        throttle.on_dispatch_success(Some(0));

        assert_eq!(throttle.state(), ThrottleState::Exhausted);
        for _ in 0..30 {
            throttle.tick();
        }
        assert_eq!(throttle.check_resend(), Err(ResendRefusal::Exhausted));
    }

    #[test]
    fn test_custom_window() {
        let mut throttle = ResendThrottle::new(5, 3);
        throttle.on_dispatch_success(None);
        assert_eq!(throttle.cooldown(), 5);
        assert_eq!(throttle.window(), 5);
    }
}
