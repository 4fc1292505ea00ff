//! Process configuration, read once from the environment at startup.

use std::time::Duration;
use thiserror::Error;
use url::Url;

pub(crate) const DEFAULT_PORT: u16 = 3000;
pub(crate) const DEFAULT_ENVIRONMENT: &str = "development";
pub(crate) const DEFAULT_USERS_TABLE: &str = "users";
pub(crate) const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 5;

pub(crate) const DEFAULT_GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub(crate) const DEFAULT_GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub(crate) const DEFAULT_GOOGLE_USERINFO_URL: &str =
    "https://www.googleapis.com/oauth2/v2/userinfo";
pub(crate) const DEFAULT_GOOGLE_SCOPES: &str = "openid email profile";

/// Names of the variables without which the server refuses to start.
pub(crate) const REQUIRED_VARS: [&str; 4] = [
    "GOOGLE_CLIENT_ID",
    "GOOGLE_CLIENT_SECRET",
    "SUPABASE_URL",
    "SUPABASE_KEY",
];

/// Reasons the server refuses to start.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Every required variable that is unset or empty, in declaration order.
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<&'static str>),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Returns `value` unchanged when it parses as an absolute URL.
fn url_setting(name: &'static str, value: String) -> Result<String, ConfigError> {
    match Url::parse(&value) {
        Ok(_) => Ok(value),
        Err(e) => {
            tracing::error!(name, "Invalid URL setting: {}", e);
            Err(ConfigError::Invalid { name, value })
        }
    }
}

/// Immutable server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_redirect_uri: String,
    pub google_auth_url: String,
    pub google_token_url: String,
    pub google_userinfo_url: String,
    pub google_scopes: String,
    pub database_url: String,
    pub database_key: String,
    pub users_table: String,
    pub port: u16,
    pub environment: String,
    pub http_timeout: Duration,
}

impl Config {
    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the configuration through `lookup`, which maps a variable name to its value.
    ///
    /// Unset and empty values are treated alike. Every missing required name is
    /// reported, not only the first one.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let missing: Vec<&'static str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|name| get(*name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing));
        }

        let port = match get("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid {
                    name: "PORT",
                    value,
                })?,
            None => DEFAULT_PORT,
        };

        let http_timeout_secs = match get("HTTP_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    name: "HTTP_TIMEOUT_SECS",
                    value,
                })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let required = |name: &str| get(name).unwrap_or_default();
        let optional = |name: &str, default: String| get(name).unwrap_or(default);

        Ok(Self {
            google_client_id: required("GOOGLE_CLIENT_ID"),
            google_client_secret: required("GOOGLE_CLIENT_SECRET"),
            google_redirect_uri: url_setting(
                "GOOGLE_REDIRECT_URI",
                optional(
                    "GOOGLE_REDIRECT_URI",
                    format!("http://localhost:{port}/auth/google/callback"),
                ),
            )?,
            google_auth_url: url_setting(
                "GOOGLE_AUTH_URL",
                optional("GOOGLE_AUTH_URL", DEFAULT_GOOGLE_AUTH_URL.to_string()),
            )?,
            google_token_url: url_setting(
                "GOOGLE_TOKEN_URL",
                optional("GOOGLE_TOKEN_URL", DEFAULT_GOOGLE_TOKEN_URL.to_string()),
            )?,
            google_userinfo_url: url_setting(
                "GOOGLE_USERINFO_URL",
                optional("GOOGLE_USERINFO_URL", DEFAULT_GOOGLE_USERINFO_URL.to_string()),
            )?,
            google_scopes: optional("GOOGLE_SCOPES", DEFAULT_GOOGLE_SCOPES.to_string()),
            database_url: url_setting(
                "SUPABASE_URL",
                required("SUPABASE_URL").trim_end_matches('/').to_string(),
            )?,
            database_key: required("SUPABASE_KEY"),
            users_table: optional("USERS_TABLE", DEFAULT_USERS_TABLE.to_string()),
            port,
            environment: optional("APP_ENV", DEFAULT_ENVIRONMENT.to_string()),
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }

    /// True when both the store URL and its API key are non-empty.
    pub fn has_database(&self) -> bool {
        !self.database_url.is_empty() && !self.database_key.is_empty()
    }

    /// True when both the OAuth2 client id and secret are non-empty.
    pub fn has_google_oauth(&self) -> bool {
        !self.google_client_id.is_empty() && !self.google_client_secret.is_empty()
    }

    /// Cookies are marked `Secure` only when the callback is served over https.
    pub fn secure_cookies(&self) -> bool {
        self.google_redirect_uri.starts_with("https://")
    }

    /// Logs which settings are present. Secret values never reach the log.
    pub fn startup_report(&self) {
        tracing::info!(
            environment = %self.environment,
            port = self.port,
            redirect_uri = %self.google_redirect_uri,
            has_google_client_id = !self.google_client_id.is_empty(),
            has_google_client_secret = !self.google_client_secret.is_empty(),
            has_database_url = !self.database_url.is_empty(),
            has_database_key = !self.database_key.is_empty(),
            http_timeout_secs = self.http_timeout.as_secs(),
            "Configuration loaded"
        );
    }
}
