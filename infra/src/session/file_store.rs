//! JSON file session store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ep_core::{SessionStoreTrait, SessionToken};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::SessionData;
use crate::InfrastructureError;

/// Session store persisted as a small JSON document
///
/// Every write rewrites the whole file. A missing file reads as an empty
/// session. Writers are serialized so concurrent updates of the token and
/// the marker never clobber each other.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole session document
    pub async fn read(&self) -> Result<SessionData, InfrastructureError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(SessionData::default()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No session file yet");
                Ok(SessionData::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Apply `change` to the stored document and write it back
    async fn update<F>(&self, change: F) -> Result<(), InfrastructureError>
    where
        F: FnOnce(&mut SessionData),
    {
        let _guard = self.write_lock.lock().await;

        let mut data = self.read().await?;
        change(&mut data);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_vec_pretty(&data)?;
        tokio::fs::write(&self.path, json).await?;

        debug!(
            path = %self.path.display(),
            pending_resend = data.pending_resend,
            "Session file updated"
        );
        Ok(())
    }
}

fn to_message(error: InfrastructureError) -> String {
    warn!(error = %error, "Session storage failure");
    error.to_string()
}

#[async_trait]
impl SessionStoreTrait for FileSessionStore {
    async fn load_token(&self) -> Result<Option<SessionToken>, String> {
        self.read().await.map(|data| data.token).map_err(to_message)
    }

    async fn save_token(&self, token: &SessionToken) -> Result<(), String> {
        let token = token.clone();
        self.update(|data| data.token = Some(token))
            .await
            .map_err(to_message)
    }

    async fn pending_resend(&self) -> Result<bool, String> {
        self.read()
            .await
            .map(|data| data.pending_resend)
            .map_err(to_message)
    }

    async fn set_pending_resend(&self, pending: bool) -> Result<(), String> {
        self.update(|data| data.pending_resend = pending)
            .await
            .map_err(to_message)
    }
}
