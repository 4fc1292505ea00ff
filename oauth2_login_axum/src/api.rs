use axum::{Json, Router, extract::State, routing::get};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use super::session::AuthUser;
use super::state::AppState;

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile))
        .route("/health", get(health))
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Serialize)]
struct ProfileResponse {
    message: &'static str,
    user: AuthUser,
    timestamp: String,
}

async fn profile(user: AuthUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        message: "Profile retrieved successfully",
        user,
        timestamp: timestamp(),
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthConfig {
    port: u16,
    has_database: bool,
    has_google_oauth: bool,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    environment: String,
    authenticated: bool,
    config: HealthConfig,
}

async fn health(State(state): State<AppState>, user: Option<AuthUser>) -> Json<HealthResponse> {
    let config = state.config();
    Json(HealthResponse {
        status: "ok",
        timestamp: timestamp(),
        environment: config.environment.clone(),
        authenticated: user.is_some(),
        config: HealthConfig {
            port: config.port,
            has_database: config.has_database(),
            has_google_oauth: config.has_google_oauth(),
        },
    })
}
