use thiserror::Error;

/// Failure reported by a [`SessionStore`](super::SessionStore) backend.
#[derive(Debug, Error, Clone)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(String),
}
