use async_trait::async_trait;

use crate::userdb::errors::UserError;
use crate::userdb::types::StoredUserRecord;

/// External store of users who have signed in at least once.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Inserts the record, or overwrites the existing row with the same email.
    async fn upsert_user(&self, record: StoredUserRecord) -> Result<(), UserError>;
}
