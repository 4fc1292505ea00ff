use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::oauth2::GoogleUserInfo;

/// Row written to the users table, unique on `email`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredUserRecord {
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub google_id: String,
    pub last_login: DateTime<Utc>,
}

impl StoredUserRecord {
    /// Builds the row for `info`, stamped with `last_login`.
    pub fn from_user_info(info: &GoogleUserInfo, last_login: DateTime<Utc>) -> Self {
        Self {
            email: info.email.clone(),
            name: info.name.clone(),
            picture: info.picture.clone(),
            google_id: info.id.clone(),
            last_login,
        }
    }
}
