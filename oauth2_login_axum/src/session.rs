use axum::{
    Json,
    extract::{FromRef, FromRequestParts, OptionalFromRequestParts},
    response::{IntoResponse, Response},
};
use http::{StatusCode, request::Parts};
use serde::Serialize;
use std::convert::Infallible;

use oauth2_login::{AuthService, AuthenticatedUser};

use super::config::LOGIN_URL;

/// Rejection for handlers that need a signed-in user.
#[derive(Debug)]
pub struct NotAuthenticated;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotAuthenticatedBody {
    error: &'static str,
    message: &'static str,
    login_url: &'static str,
}

impl IntoResponse for NotAuthenticated {
    fn into_response(self) -> Response {
        tracing::debug!("Rejecting unauthenticated request");
        let body = NotAuthenticatedBody {
            error: "Not authenticated",
            message: "Sign in with Google to access this resource",
            login_url: LOGIN_URL,
        };
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

/// The signed-in user, available as an Axum extractor
///
/// Resolved from the session cookie on the request. Use `Option<AuthUser>` for
/// handlers that also serve anonymous visitors.
///
/// ```no_run
/// use axum::{Router, routing::get};
/// use oauth2_login_axum::{AppState, AuthUser};
///
/// async fn hello(user: AuthUser) -> String {
///     format!("Hello, {}!", user.name)
/// }
///
/// let app: Router<AppState> = Router::new().route("/hello", get(hello));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

impl From<AuthenticatedUser> for AuthUser {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            picture: user.picture,
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthService: FromRef<S>,
{
    type Rejection = NotAuthenticated;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthService::from_ref(state);
        auth.current_user(&parts.headers)
            .await
            .map(AuthUser::from)
            .ok_or(NotAuthenticated)
    }
}

impl<S> OptionalFromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthService: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let auth = AuthService::from_ref(state);
        Ok(auth.current_user(&parts.headers).await.map(AuthUser::from))
    }
}
