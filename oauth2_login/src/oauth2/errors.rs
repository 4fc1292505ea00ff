use thiserror::Error;

use crate::utils::UtilError;

/// Failures of the authorization-code grant against Google.
#[derive(Debug, Error, Clone)]
pub enum OAuth2Error {
    /// The provider redirected back with an `error` parameter.
    #[error("Provider returned an error: {0}")]
    ProviderDenied(String),

    #[error("Missing authorization code")]
    MissingCode,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Token exchange error: {0}")]
    TokenExchange(String),

    #[error("Fetch user info error: {0}")]
    FetchUserInfo(String),

    /// The provider answered 2xx with a body that does not match the expected shape.
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("Transport error: {0}")]
    Transport(String),

    /// A provider endpoint in the configuration is not usable.
    #[error("Invalid provider configuration: {0}")]
    Configuration(String),

    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}

impl OAuth2Error {
    /// Errors caused by the callback request itself rather than by a failed outbound call.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::ProviderDenied(_) | Self::MissingCode | Self::InvalidState(_)
        )
    }
}
