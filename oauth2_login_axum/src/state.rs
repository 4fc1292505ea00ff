use axum::extract::FromRef;
use oauth2_login::{AuthService, Config};

/// Router state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
}

impl AppState {
    /// Wraps the sign-in service for use as router state.
    pub fn new(auth: AuthService) -> Self {
        Self { auth }
    }

    /// Configuration of the wrapped service, read by the health endpoint.
    pub fn config(&self) -> &Config {
        self.auth.config()
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
