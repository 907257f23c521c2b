//! Account entity for people who operate the booking system.

use chrono::{DateTime, Utc};

/// A registered account.
///
/// `password_hash` holds the Argon2 PHC string, never the plaintext.
/// Response DTOs map away from this type; the hash stays server-side.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for registering a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Full-row update for an existing account.
///
/// Username and email are always replaced. `password_hash: None`
/// keeps the stored credential untouched.
#[derive(Debug, Clone)]
pub struct UserPatch {
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
}
