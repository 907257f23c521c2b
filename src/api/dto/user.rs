//! Request and response bodies for account endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::User;

/// Body for `POST /api/user`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Body for `PUT /api/user/{id}`.
///
/// `password` is optional: when omitted the stored hash is kept, so a
/// profile edit never silently resets credentials.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    pub password: Option<String>,
}

/// One account as returned to clients. The password hash never leaves
/// the server.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Acknowledgement for account mutations.
#[derive(Debug, Serialize)]
pub struct UserActionResponse {
    pub status: bool,
    pub message: String,
}
