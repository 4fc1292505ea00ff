use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
    routing::get,
};
use http::{HeaderMap, HeaderValue, StatusCode, header::LOCATION};

use oauth2_login::{AuthResponse, AuthService};

use super::config::{CALLBACK_PATH, HOME_URL};
use super::error::{ErrorPage, IntoResponseError};
use super::state::AppState;

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/google", get(google_auth))
        .route(CALLBACK_PATH, get(google_callback))
}

/// Plain 302 with the given headers; `Redirect` only offers 303/307/308.
fn found(mut headers: HeaderMap, location: &str) -> Result<Response, ErrorPage> {
    headers.insert(LOCATION, HeaderValue::from_str(location).into_response_error()?);
    Ok((StatusCode::FOUND, headers).into_response())
}

async fn google_auth(State(auth): State<AuthService>) -> Result<Response, ErrorPage> {
    let (auth_url, headers) = auth.prepare_oauth2_auth_request().into_response_error()?;
    found(headers, &auth_url)
}

async fn google_callback(
    State(auth): State<AuthService>,
    query: Result<Query<AuthResponse>, QueryRejection>,
    headers: HeaderMap,
) -> Result<Response, ErrorPage> {
    let Query(query) = query.map_err(|rejection| {
        tracing::warn!("Malformed callback query: {}", rejection.body_text());
        ErrorPage::new(
            StatusCode::BAD_REQUEST,
            "The sign-in response was malformed. Please sign in again.",
        )
    })?;
    let (headers, user) = auth
        .authorized_core(&query, &headers)
        .await
        .into_response_error()?;

    tracing::debug!(user_id = %user.id, "Redirecting signed-in user home");
    found(headers, HOME_URL)
}
