use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Default role assigned to self-registered accounts.
pub const DEFAULT_ROLE: &str = "user";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// bcrypt hash; never leaves the service layer.
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub last_login: Option<NaiveDateTime>,
    pub active: bool,
    pub recovery_token: Option<String>,
    pub recovery_token_expires: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
}

impl NewUser {
    #[must_use]
    pub fn new(username: String, email: String, password_hash: String, full_name: String) -> Self {
        Self {
            username: username.trim().to_string(),
            email: email.to_lowercase().trim().to_string(),
            password_hash,
            full_name: full_name.trim().to_string(),
            role: DEFAULT_ROLE.to_string(),
        }
    }
}
