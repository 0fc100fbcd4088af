//! Session storage
//!
//! Holds the bearer token issued at login or registration and the
//! pending-resend marker a previous screen may leave behind.

mod file_store;
mod memory_store;

pub use file_store::FileSessionStore;
pub use memory_store::MemorySessionStore;

use ep_core::SessionToken;
use serde::{Deserialize, Deserializer, Serialize};

/// Contents of the persisted session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// A blank stored token reads as no session
    #[serde(default, deserialize_with = "usable_token")]
    pub token: Option<SessionToken>,
    #[serde(default)]
    pub pending_resend: bool,
}

fn usable_token<'de, D>(deserializer: D) -> Result<Option<SessionToken>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| SessionToken::new(raw).ok()))
}
