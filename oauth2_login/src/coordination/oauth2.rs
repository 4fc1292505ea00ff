use chrono::Utc;
use headers::{Cookie, HeaderMapExt};
use http::HeaderMap;
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::config::Config;
use crate::oauth2::{
    AuthResponse, GoogleClient, OAUTH2_STATE_COOKIE_MAX_AGE, OAUTH2_STATE_COOKIE_NAME, OAuth2Error,
};
use crate::session::{AuthenticatedUser, SESSION_COOKIE_NAME, SESSION_ID_BYTES, SessionStore};
use crate::userdb::{StoredUserRecord, UserStore};
use crate::utils::{CookieOptions, gen_random_string, header_expire_cookie, header_set_cookie};

use super::errors::CoordinationError;

const STATE_TOKEN_BYTES: usize = 32;

/// Drives the sign-in handshake and owns the collaborators it needs.
///
/// Cheap to clone; every collaborator sits behind an `Arc`.
#[derive(Clone)]
pub struct AuthService {
    config: Arc<Config>,
    google: GoogleClient,
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
}

impl AuthService {
    /// Wires the provider client and both stores around a loaded configuration.
    pub fn new(
        config: Arc<Config>,
        google: GoogleClient,
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            config,
            google,
            users,
            sessions,
        }
    }

    /// The configuration the service was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Creates the provider authorization URL and the cookie binding it to this browser.
    pub fn prepare_oauth2_auth_request(&self) -> Result<(String, HeaderMap), CoordinationError> {
        let state = gen_random_string(STATE_TOKEN_BYTES)?;
        let auth_url = self.google.authorization_url(&state);

        let mut headers = HeaderMap::new();
        header_set_cookie(
            &mut headers,
            OAUTH2_STATE_COOKIE_NAME.as_str(),
            &state,
            CookieOptions {
                same_site: "Lax",
                secure: self.config.secure_cookies(),
                max_age: Some(*OAUTH2_STATE_COOKIE_MAX_AGE as i64),
            },
        )?;

        tracing::debug!("Prepared authorization request");
        Ok((auth_url, headers))
    }

    /// Completes the authorization-code grant for a callback request.
    ///
    /// Order: provider error, code presence, state check, token exchange, profile
    /// fetch, upsert, session commit. The first failure ends the flow and the session
    /// store is only written after the upsert succeeded.
    pub async fn authorized_core(
        &self,
        auth_response: &AuthResponse,
        request_headers: &HeaderMap,
    ) -> Result<(HeaderMap, AuthenticatedUser), CoordinationError> {
        if let Some(error) = &auth_response.error {
            let message = match &auth_response.error_description {
                Some(description) => format!("{error}: {description}"),
                None => error.clone(),
            };
            return Err(OAuth2Error::ProviderDenied(message).into());
        }

        let code = auth_response
            .code
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or(OAuth2Error::MissingCode)?;

        verify_state(auth_response.state.as_deref(), request_headers)?;

        let token = self.google.exchange_code_for_token(code).await?;
        let user_info = self.google.fetch_user_info(&token.access_token).await?;

        let record = StoredUserRecord::from_user_info(&user_info, Utc::now());
        self.users.upsert_user(record).await?;

        let user = AuthenticatedUser::from(user_info);
        let session_id = gen_random_string(SESSION_ID_BYTES)?;
        self.sessions.set(&session_id, user.clone()).await?;

        let secure = self.config.secure_cookies();
        let mut headers = HeaderMap::new();
        header_set_cookie(
            &mut headers,
            SESSION_COOKIE_NAME.as_str(),
            &session_id,
            CookieOptions {
                same_site: "Lax",
                secure,
                max_age: None,
            },
        )?;
        header_expire_cookie(&mut headers, OAUTH2_STATE_COOKIE_NAME.as_str(), secure)?;

        tracing::info!(user_id = %user.id, "User signed in");
        Ok((headers, user))
    }

    /// Returns the user bound to the request's session cookie, if any.
    pub async fn current_user(&self, request_headers: &HeaderMap) -> Option<AuthenticatedUser> {
        let session_id = session_id_from_headers(request_headers)?;
        match self.sessions.get(&session_id).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!("Failed to read session: {}", e);
                None
            }
        }
    }

    /// Forgets the caller's session and returns headers that expire the cookie.
    pub async fn logout_core(
        &self,
        request_headers: &HeaderMap,
    ) -> Result<HeaderMap, CoordinationError> {
        if let Some(session_id) = session_id_from_headers(request_headers) {
            self.sessions.clear(&session_id).await?;
            tracing::info!("User signed out");
        }

        let mut headers = HeaderMap::new();
        header_expire_cookie(
            &mut headers,
            SESSION_COOKIE_NAME.as_str(),
            self.config.secure_cookies(),
        )?;
        Ok(headers)
    }
}

fn cookie_from_headers(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .typed_get::<Cookie>()
        .and_then(|cookies| cookies.get(name).map(str::to_string))
        .filter(|value| !value.is_empty())
}

fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    cookie_from_headers(headers, SESSION_COOKIE_NAME.as_str())
}

/// Compares the `state` echoed by the provider with the one stored in the browser.
fn verify_state(state: Option<&str>, request_headers: &HeaderMap) -> Result<(), OAuth2Error> {
    let state = state
        .filter(|s| !s.is_empty())
        .ok_or_else(|| OAuth2Error::InvalidState("state parameter missing".to_string()))?;

    let expected = cookie_from_headers(request_headers, OAUTH2_STATE_COOKIE_NAME.as_str())
        .ok_or_else(|| OAuth2Error::InvalidState("state cookie missing or expired".to_string()))?;

    if !bool::from(state.as_bytes().ct_eq(expected.as_bytes())) {
        return Err(OAuth2Error::InvalidState("state mismatch".to_string()));
    }
    Ok(())
}
