//! Session persistence configuration module

use serde::{Deserialize, Serialize};

/// Where the session token and the pending-resend marker are persisted
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Path of the JSON session file
    #[serde(default = "default_session_path")]
    pub path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

fn default_session_path() -> String {
    String::from(".ecopickup/session.json")
}
