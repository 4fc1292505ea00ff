use serde::{Deserialize, Serialize};

use crate::oauth2::GoogleUserInfo;

/// The signed-in identity held by the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

impl From<GoogleUserInfo> for AuthenticatedUser {
    fn from(info: GoogleUserInfo) -> Self {
        Self {
            id: info.id,
            email: info.email,
            name: info.name,
            picture: info.picture,
        }
    }
}
