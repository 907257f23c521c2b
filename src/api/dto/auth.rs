//! Request and response bodies for the authentication endpoints.

use serde::{Deserialize, Serialize};

/// Body for `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login: the token plus the account it belongs to.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: bool,
    pub message: String,
    pub token: String,
    pub user_id: i64,
}

/// Body for `POST /api/auth/logout`.
#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub user_id: i64,
}

/// Acknowledgement for logout.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub status: bool,
    pub message: String,
}
