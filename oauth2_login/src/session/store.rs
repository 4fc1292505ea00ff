use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::session::errors::SessionError;
use crate::session::types::AuthenticatedUser;

/// Storage for signed-in identities, keyed by the id carried in the session cookie.
///
/// Handlers only talk to this trait, so replacing the single-slot store with one that
/// keeps an entry per browser does not touch the request flow.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    async fn get(&self, session_id: &str) -> Result<Option<AuthenticatedUser>, SessionError>;

    async fn set(&self, session_id: &str, user: AuthenticatedUser) -> Result<(), SessionError>;

    async fn clear(&self, session_id: &str) -> Result<(), SessionError>;
}

/// Holds at most one signed-in identity for the whole process.
///
/// A new sign-in from any browser replaces the previous one. Entries never expire.
#[derive(Debug, Default)]
pub struct SingleSlotSessionStore {
    slot: Mutex<Option<(String, AuthenticatedUser)>>,
}

impl SingleSlotSessionStore {
    pub fn new() -> Self {
        tracing::info!("Creating single-slot session store");
        Self::default()
    }
}

#[async_trait]
impl SessionStore for SingleSlotSessionStore {
    async fn get(&self, session_id: &str) -> Result<Option<AuthenticatedUser>, SessionError> {
        let slot = self.slot.lock().await;
        Ok(slot
            .as_ref()
            .filter(|(id, _)| id == session_id)
            .map(|(_, user)| user.clone()))
    }

    async fn set(&self, session_id: &str, user: AuthenticatedUser) -> Result<(), SessionError> {
        let mut slot = self.slot.lock().await;
        if slot.is_some() {
            tracing::debug!("Replacing the signed-in user in the session slot");
        }
        *slot = Some((session_id.to_string(), user));
        Ok(())
    }

    async fn clear(&self, session_id: &str) -> Result<(), SessionError> {
        let mut slot = self.slot.lock().await;
        if slot.as_ref().is_some_and(|(id, _)| id == session_id) {
            *slot = None;
        }
        Ok(())
    }
}
