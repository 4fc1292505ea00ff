use std::sync::LazyLock;

/// Cookie carrying the anti-forgery `state` between the redirect and the callback.
pub(crate) static OAUTH2_STATE_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    std::env::var("OAUTH2_STATE_COOKIE_NAME")
        .ok()
        .unwrap_or("OAuth2State".to_string())
});

pub(crate) static OAUTH2_STATE_COOKIE_MAX_AGE: LazyLock<u64> = LazyLock::new(|| {
    std::env::var("OAUTH2_STATE_COOKIE_MAX_AGE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(600) // Default to 10 minutes if not set or invalid
});

// Supported parameters on the authorization request:
// response_type: code
// access_type: offline (asks for a refresh token; it is not stored)
// prompt: consent
pub(super) const OAUTH2_RESPONSE_TYPE: &str = "code";
pub(super) const OAUTH2_ACCESS_TYPE: &str = "offline";
pub(super) const OAUTH2_PROMPT: &str = "consent";
