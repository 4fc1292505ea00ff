use askama::Template;
use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use http::{HeaderMap, StatusCode};
use std::any::Any;

use oauth2_login::AuthService;

use super::config::LOGIN_URL;
use super::error::{ErrorPage, IntoResponseError};
use super::session::AuthUser;
use super::state::AppState;

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/logout", get(logout))
}

#[derive(Template)]
#[template(path = "index_user.j2", escape = "html")]
struct IndexUserTemplate<'a> {
    user: &'a AuthUser,
}

#[derive(Template)]
#[template(path = "index_anon.j2", escape = "html")]
struct IndexAnonTemplate<'a> {
    login_url: &'a str,
}

#[derive(Template)]
#[template(path = "logout.j2", escape = "html")]
struct LogoutTemplate<'a> {
    login_url: &'a str,
}

#[derive(Template)]
#[template(path = "not_found.j2", escape = "html")]
struct NotFoundTemplate;

async fn index(user: Option<AuthUser>) -> Result<Html<String>, ErrorPage> {
    let html = match &user {
        Some(user) => IndexUserTemplate { user }.render(),
        None => IndexAnonTemplate {
            login_url: LOGIN_URL,
        }
        .render(),
    }
    .into_response_error()?;
    Ok(Html(html))
}

async fn logout(
    State(auth): State<AuthService>,
    headers: HeaderMap,
) -> Result<(HeaderMap, Html<String>), ErrorPage> {
    let headers = auth.logout_core(&headers).await.into_response_error()?;
    let html = LogoutTemplate {
        login_url: LOGIN_URL,
    }
    .render()
    .into_response_error()?;
    Ok((headers, Html(html)))
}

pub(super) async fn not_found() -> Response {
    match NotFoundTemplate.render() {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render not found page: {}", e);
            (StatusCode::NOT_FOUND, "Not Found").into_response()
        }
    }
}

/// Turns a handler panic into the generic error page.
pub(super) fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Handler panicked");

    ErrorPage::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        "An unexpected error occurred. Please try again.",
    )
    .into_response()
}
