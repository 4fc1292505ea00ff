use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::userdb::errors::UserError;
use crate::userdb::store::UserStore;
use crate::userdb::types::StoredUserRecord;

/// Process-local user store with the same overwrite-on-email semantics as the real one.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<String, StoredUserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        tracing::info!("Creating in-memory user store");
        Self::default()
    }

    /// Returns the record stored under `email`.
    pub async fn get_user(&self, email: &str) -> Option<StoredUserRecord> {
        self.users.lock().await.get(email).cloned()
    }

    pub async fn len(&self) -> usize {
        self.users.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.lock().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn upsert_user(&self, record: StoredUserRecord) -> Result<(), UserError> {
        if record.email.is_empty() {
            return Err(UserError::InvalidData("email must not be empty".to_string()));
        }
        self.users.lock().await.insert(record.email.clone(), record);
        Ok(())
    }
}
