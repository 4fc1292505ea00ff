//! oauth2_login - Google sign-in for a single-user web server
//!
//! This crate runs the OAuth2 authorization-code handshake against Google, records
//! the signed-in profile in an external PostgREST user store, and keeps the
//! signed-in identity in a session store keyed by a browser cookie.

mod config;
mod coordination;
mod oauth2;
mod session;
mod userdb;
mod utils;

pub use config::{Config, ConfigError};

pub use coordination::{AuthService, CoordinationError};

pub use oauth2::{AuthResponse, GoogleClient, GoogleUserInfo, OAuth2Error, TokenResponse};

pub use session::{
    AuthenticatedUser, SESSION_COOKIE_NAME, SessionError, SessionStore, SingleSlotSessionStore,
};

pub use userdb::{InMemoryUserStore, PostgrestUserStore, StoredUserRecord, UserError, UserStore};
