use std::sync::LazyLock;

pub static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    std::env::var("SESSION_COOKIE_NAME")
        .ok()
        .unwrap_or("SessionId".to_string())
});

/// Number of random bytes in a session id.
pub(crate) const SESSION_ID_BYTES: usize = 32;
