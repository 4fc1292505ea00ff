use serde::{Deserialize, Serialize};

/// Query parameters Google appends to the redirect URI.
///
/// Every field is optional so a malformed callback still reaches the handler and gets
/// the regular error page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub id_token: Option<String>,
}

/// The user data we get back from Google's userinfo endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GoogleUserInfo {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

/// Error body returned by Google on a non-2xx response.
#[derive(Debug, Deserialize)]
pub(super) struct ProviderErrorBody {
    error: serde_json::Value,
    error_description: Option<String>,
}

impl ProviderErrorBody {
    /// `error` is a string on the token endpoint and an object on the userinfo endpoint.
    pub(super) fn message(&self) -> String {
        let error = match &self.error {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Object(obj) => obj
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| self.error.to_string()),
            other => other.to_string(),
        };
        match &self.error_description {
            Some(description) => format!("{error}: {description}"),
            None => error,
        }
    }
}
