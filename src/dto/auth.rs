//! Response projections for authentication endpoints.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::user::User;

#[derive(Debug, Clone, Serialize, PartialEq)]
/// Public view of an account; never carries the password hash.
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub last_login: Option<NaiveDateTime>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
/// Successful login/registration payload.
pub struct AuthResponse {
    pub token: String,
    pub expires_at: NaiveDateTime,
    pub user: UserResponse,
}
