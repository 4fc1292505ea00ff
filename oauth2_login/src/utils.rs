use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use http::header::{HeaderMap, SET_COOKIE};
use ring::rand::SecureRandom;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum UtilError {
    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Cookie error: {0}")]
    Cookie(String),

    #[error("Http client error: {0}")]
    HttpClient(String),
}

pub(crate) fn base64url_encode(input: Vec<u8>) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Returns `len` random bytes from the system CSPRNG, base64url encoded.
pub(crate) fn gen_random_string(len: usize) -> Result<String, UtilError> {
    let rng = ring::rand::SystemRandom::new();
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes)
        .map_err(|_| UtilError::Crypto("Failed to generate random string".to_string()))?;
    Ok(base64url_encode(bytes))
}

/// Attributes for a `Set-Cookie` header.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CookieOptions {
    pub(crate) same_site: &'static str,
    pub(crate) secure: bool,
    /// `None` leaves the cookie alive for the browser session.
    pub(crate) max_age: Option<i64>,
}

pub(crate) fn header_set_cookie(
    headers: &mut HeaderMap,
    name: &str,
    value: &str,
    options: CookieOptions,
) -> Result<(), UtilError> {
    let mut cookie = format!(
        "{name}={value}; SameSite={}; HttpOnly; Path=/",
        options.same_site
    );
    if options.secure {
        cookie.push_str("; Secure");
    }
    if let Some(max_age) = options.max_age {
        cookie.push_str(&format!("; Max-Age={max_age}"));
    }

    headers.append(
        SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| UtilError::Cookie(format!("Failed to parse cookie {name}")))?,
    );
    Ok(())
}

/// Appends a `Set-Cookie` header that makes the browser drop `name`.
pub(crate) fn header_expire_cookie(
    headers: &mut HeaderMap,
    name: &str,
    secure: bool,
) -> Result<(), UtilError> {
    header_set_cookie(
        headers,
        name,
        "",
        CookieOptions {
            same_site: "Lax",
            secure,
            max_age: Some(0),
        },
    )
}

/// Creates the HTTP client used for calls to the identity provider and the user store.
///
/// Every request carries the same fixed `timeout`; there is no retry.
pub(crate) fn build_http_client(timeout: Duration) -> Result<reqwest::Client, UtilError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .map_err(|e| UtilError::HttpClient(e.to_string()))
}
