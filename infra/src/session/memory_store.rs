//! In-memory session store

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use ep_core::{SessionStoreTrait, SessionToken};

use super::SessionData;

/// Session store that lives only as long as the process
///
/// Used when no session file is configured and in tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    data: Mutex<SessionData>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a token and marker
    pub fn with_session(token: SessionToken, pending_resend: bool) -> Self {
        Self {
            data: Mutex::new(SessionData {
                token: Some(token),
                pending_resend,
            }),
        }
    }

    pub fn data(&self) -> SessionData {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, SessionData> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl SessionStoreTrait for MemorySessionStore {
    async fn load_token(&self) -> Result<Option<SessionToken>, String> {
        Ok(self.lock().token.clone())
    }

    async fn save_token(&self, token: &SessionToken) -> Result<(), String> {
        self.lock().token = Some(token.clone());
        Ok(())
    }

    async fn pending_resend(&self) -> Result<bool, String> {
        Ok(self.lock().pending_resend)
    }

    async fn set_pending_resend(&self, pending: bool) -> Result<(), String> {
        self.lock().pending_resend = pending;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemorySessionStore::new();
        assert_eq!(store.load_token().await.unwrap(), None);
        assert!(!store.pending_resend().await.unwrap());

        let token = SessionToken::new("abc-123-token").unwrap();
        store.save_token(&token).await.unwrap();
        store.set_pending_resend(true).await.unwrap();

        assert_eq!(store.load_token().await.unwrap(), Some(token));
        assert!(store.pending_resend().await.unwrap());
    }

    #[tokio::test]
    async fn test_with_session_prepopulates() {
        let token = SessionToken::new("abc-123-token").unwrap();
        let store = MemorySessionStore::with_session(token.clone(), true);

        assert_eq!(
            store.data(),
            SessionData {
                token: Some(token),
                pending_resend: true,
            }
        );
    }
}
