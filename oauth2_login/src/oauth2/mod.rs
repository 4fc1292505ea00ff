mod config;
mod errors;
mod google;
mod types;

pub use errors::OAuth2Error;
pub use google::GoogleClient;
pub use types::{AuthResponse, GoogleUserInfo, TokenResponse};

pub(crate) use config::{OAUTH2_STATE_COOKIE_MAX_AGE, OAUTH2_STATE_COOKIE_NAME};
