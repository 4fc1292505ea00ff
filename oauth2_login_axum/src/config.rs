/// Where anonymous clients are sent to start signing in.
pub const LOGIN_URL: &str = "/auth/google";

/// Landing page after a completed sign-in.
pub const HOME_URL: &str = "/";

pub(crate) const CALLBACK_PATH: &str = "/auth/google/callback";
