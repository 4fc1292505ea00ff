//! Error types for the coordination layer

use thiserror::Error;

use crate::oauth2::OAuth2Error;
use crate::session::SessionError;
use crate::userdb::UserError;
use crate::utils::UtilError;

/// Errors that can occur while signing a user in or out
#[derive(Error, Debug, Clone)]
pub enum CoordinationError {
    /// Error from OAuth2 operations
    #[error("OAuth2 error: {0}")]
    OAuth2Error(OAuth2Error),

    /// Error from the user store
    #[error("User store error: {0}")]
    UserError(UserError),

    /// Error from session operations
    #[error("Session error: {0}")]
    SessionError(SessionError),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    UtilsError(UtilError),
}

impl CoordinationError {
    /// Log the error and return self
    pub fn log(self) -> Self {
        match &self {
            Self::OAuth2Error(err) if err.is_client_error() => {
                tracing::warn!("OAuth2 callback rejected: {}", err)
            }
            Self::OAuth2Error(err) => tracing::error!("OAuth2 error: {}", err),
            Self::UserError(err) => tracing::error!(hint = ?err.hint(), "User store error: {}", err),
            Self::SessionError(err) => tracing::error!("Session error: {}", err),
            Self::UtilsError(err) => tracing::error!("Utils error: {}", err),
        }
        self
    }

    /// True when the request itself was at fault (the 400 class).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::OAuth2Error(err) if err.is_client_error())
    }

    /// Remediation text supplied by the user store, if any.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::UserError(err) => err.hint(),
            _ => None,
        }
    }
}

impl From<OAuth2Error> for CoordinationError {
    fn from(err: OAuth2Error) -> Self {
        Self::OAuth2Error(err).log()
    }
}

impl From<UserError> for CoordinationError {
    fn from(err: UserError) -> Self {
        Self::UserError(err).log()
    }
}

impl From<SessionError> for CoordinationError {
    fn from(err: SessionError) -> Self {
        Self::SessionError(err).log()
    }
}

impl From<UtilError> for CoordinationError {
    fn from(err: UtilError) -> Self {
        Self::UtilsError(err).log()
    }
}
