//! # EcoPickup OTP terminal client
//!
//! Wires configuration, logging and the infrastructure adapters into a
//! [`ep_core::VerificationFlow`] and drives it from line-based commands.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod runner;

pub use cli::Args;
pub use commands::{Command, CommandError};
pub use runner::{render_status, run_session, SessionEnd};
