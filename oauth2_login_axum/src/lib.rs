//! Axum integration for `oauth2-login`
//!
//! Provides the application router, the [`AuthUser`] extractor and the mapping of
//! sign-in failures to HTML error pages.

mod api;
mod config;
mod error;
mod oauth2;
mod pages;
mod router;
mod session;
mod state;

pub use config::{HOME_URL, LOGIN_URL};
pub use error::{ErrorPage, IntoResponseError};
pub use router::{app_router, app_router_no_trace};
pub use session::{AuthUser, NotAuthenticated};
pub use state::AppState;
