use thiserror::Error;

use crate::utils::UtilError;

/// Failures while writing to the user store.
#[derive(Clone, Error, Debug)]
pub enum UserError {
    /// The store refused the write. `hint` carries the store's remediation text, if any.
    #[error("{message}")]
    Rejected {
        message: String,
        hint: Option<String>,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}

impl UserError {
    /// Remediation text the store sent along with a rejection.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Rejected { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for UserError {
    fn from(err: serde_json::Error) -> Self {
        UserError::InvalidData(err.to_string())
    }
}
