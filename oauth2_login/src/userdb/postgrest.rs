use async_trait::async_trait;
use serde::Deserialize;

use crate::config::Config;
use crate::userdb::errors::UserError;
use crate::userdb::store::UserStore;
use crate::userdb::types::StoredUserRecord;
use crate::utils::build_http_client;

/// Upserts users through a PostgREST endpoint (as exposed by Supabase).
#[derive(Debug, Clone)]
pub struct PostgrestUserStore {
    endpoint: String,
    api_key: String,
    http: reqwest::Client,
}

/// Error body PostgREST returns on a rejected request.
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
    code: Option<String>,
}

impl PostgrestUserStore {
    /// Targets `{SUPABASE_URL}/rest/v1/{USERS_TABLE}` with the configured API key.
    pub fn new(config: &Config) -> Result<Self, UserError> {
        let endpoint = format!(
            "{}/rest/v1/{}?on_conflict=email",
            config.database_url.trim_end_matches('/'),
            config.users_table
        );
        tracing::info!(table = %config.users_table, "Creating PostgREST user store");

        Ok(Self {
            endpoint,
            api_key: config.database_key.clone(),
            http: build_http_client(config.http_timeout)?,
        })
    }
}

#[async_trait]
impl UserStore for PostgrestUserStore {
    async fn upsert_user(&self, record: StoredUserRecord) -> Result<(), UserError> {
        let body = serde_json::to_vec(&[&record])?;
        let response = self
            .http
            .post(&self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| UserError::Transport(format!("User store unreachable: {e}")))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!("Upserted user record");
            return Ok(());
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(%status, "Failed to read user store error body: {}", e);
                String::new()
            }
        };
        let err = rejection_from_body(status, &body);
        tracing::error!(%status, error = %err, "User store rejected upsert");
        Err(err)
    }
}

fn rejection_from_body(status: reqwest::StatusCode, body: &str) -> UserError {
    match serde_json::from_str::<PostgrestErrorBody>(body) {
        Ok(error_body) => {
            let mut message = error_body
                .message
                .unwrap_or_else(|| format!("User store returned {status}"));
            if let Some(code) = error_body.code {
                message = format!("{message} (code {code})");
            }
            if let Some(details) = error_body.details {
                message = format!("{message}: {details}");
            }
            UserError::Rejected {
                message,
                hint: error_body.hint.filter(|h| !h.is_empty()),
            }
        }
        Err(_) => UserError::Rejected {
            message: if body.trim().is_empty() {
                format!("User store returned {status}")
            } else {
                format!("User store returned {status}: {}", body.trim())
            },
            hint: None,
        },
    }
}
