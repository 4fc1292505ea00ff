//! Complete application router

use axum::Router;
use tower_http::LatencyUnit;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use oauth2_login::AuthService;

use super::state::AppState;

/// Builds the router serving every page and API endpoint.
///
/// - `GET /` home page, signed-in or anonymous view
/// - `GET /auth/google` redirect to Google's consent screen
/// - `GET /auth/google/callback` completes sign-in
/// - `GET /logout` clears the session
/// - `GET /profile` signed-in user as JSON
/// - `GET /health` status snapshot as JSON
pub fn app_router(auth: AuthService) -> Router {
    app_router_no_trace(auth).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`app_router`] without the HTTP tracing middleware.
pub fn app_router_no_trace(auth: AuthService) -> Router {
    let routes = Router::new()
        .merge(super::pages::router())
        .merge(super::oauth2::router())
        .merge(super::api::router());
    with_error_pages(routes).with_state(AppState::new(auth))
}

/// HTML fallback for unknown paths and a 500 page for panicking handlers.
fn with_error_pages<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .fallback(super::pages::not_found)
        .layer(CatchPanicLayer::custom(super::pages::panic_response))
}
