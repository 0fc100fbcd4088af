//! Periodic tick delivery for cooldown countdowns

mod cooldown_timer;

pub use cooldown_timer::{CooldownTimer, DEFAULT_TICK_INTERVAL};
