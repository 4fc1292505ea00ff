mod config;
mod errors;
mod store;
mod types;

pub use config::SESSION_COOKIE_NAME;
pub use errors::SessionError;
pub use store::{SessionStore, SingleSlotSessionStore};
pub use types::AuthenticatedUser;

pub(crate) use config::SESSION_ID_BYTES;
