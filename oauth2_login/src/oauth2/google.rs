use url::Url;

use crate::config::Config;
use crate::oauth2::config::{OAUTH2_ACCESS_TYPE, OAUTH2_PROMPT, OAUTH2_RESPONSE_TYPE};
use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::types::{GoogleUserInfo, ProviderErrorBody, TokenResponse};
use crate::utils::build_http_client;

/// Client for the two server-to-server calls of the authorization-code grant.
#[derive(Debug, Clone)]
pub struct GoogleClient {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth_url: Url,
    token_url: String,
    userinfo_url: String,
    scopes: String,
    http: reqwest::Client,
}

impl GoogleClient {
    /// Creates a client for the endpoints and credentials in `config`.
    ///
    /// Fails when the authorization endpoint is not an absolute URL or when the
    /// HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, OAuth2Error> {
        let auth_url = Url::parse(&config.google_auth_url).map_err(|e| {
            OAuth2Error::Configuration(format!("Invalid authorization URL: {e}"))
        })?;

        Ok(Self {
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            redirect_uri: config.google_redirect_uri.clone(),
            auth_url,
            token_url: config.google_token_url.clone(),
            userinfo_url: config.google_userinfo_url.clone(),
            scopes: config.google_scopes.clone(),
            http: build_http_client(config.http_timeout)?,
        })
    }

    /// Builds the URL the browser is redirected to for consent.
    pub fn authorization_url(&self, state: &str) -> String {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("response_type", OAUTH2_RESPONSE_TYPE)
            .append_pair("scope", &self.scopes)
            .append_pair("access_type", OAUTH2_ACCESS_TYPE)
            .append_pair("prompt", OAUTH2_PROMPT)
            .append_pair("state", state);

        url.into()
    }

    /// Exchanges a one-time authorization code for an access token.
    ///
    /// The code is consumed by the provider on the first attempt, so failures are
    /// returned as is and never retried.
    pub async fn exchange_code_for_token(&self, code: &str) -> Result<TokenResponse, OAuth2Error> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| OAuth2Error::Transport(format!("Token endpoint unreachable: {e}")))?;

        let status = response.status();
        let response_body = response
            .text()
            .await
            .map_err(|e| OAuth2Error::Transport(format!("Failed to read token response: {e}")))?;

        if !status.is_success() {
            tracing::warn!(%status, "Token exchange rejected by provider");
            return Err(OAuth2Error::TokenExchange(describe_failure(
                status,
                &response_body,
            )));
        }

        let token: TokenResponse = serde_json::from_str(&response_body).map_err(|e| {
            OAuth2Error::InvalidResponse(format!("Failed to deserialize token response: {e}"))
        })?;

        tracing::debug!(
            token_type = ?token.token_type,
            expires_in = ?token.expires_in,
            scope = ?token.scope,
            "Token exchange succeeded"
        );
        Ok(token)
    }

    /// Fetches the profile of the user the access token was issued for.
    pub async fn fetch_user_info(&self, access_token: &str) -> Result<GoogleUserInfo, OAuth2Error> {
        let response = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| OAuth2Error::Transport(format!("Userinfo endpoint unreachable: {e}")))?;

        let status = response.status();
        let response_body = response.text().await.map_err(|e| {
            OAuth2Error::Transport(format!("Failed to read userinfo response: {e}"))
        })?;

        if !status.is_success() {
            tracing::warn!(%status, "Userinfo request rejected by provider");
            return Err(OAuth2Error::FetchUserInfo(describe_failure(
                status,
                &response_body,
            )));
        }

        let user_info: GoogleUserInfo = serde_json::from_str(&response_body).map_err(|e| {
            OAuth2Error::InvalidResponse(format!("Failed to deserialize user info: {e}"))
        })?;

        tracing::debug!(user_id = %user_info.id, "Fetched user info");
        Ok(user_info)
    }
}

fn describe_failure(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ProviderErrorBody>(body) {
        Ok(error_body) => format!("{status}: {}", error_body.message()),
        Err(_) if body.trim().is_empty() => status.to_string(),
        Err(_) => format!("{status}: {}", body.trim()),
    }
}
