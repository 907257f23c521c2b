//! Helper functions used across the application.
//!
//! - [`jwt`] - Bearer token issuing and verification
//! - [`password`] - Argon2 hashing and verification
//! - [`db_error`] - Database error classification

pub mod db_error;
pub mod jwt;
pub mod password;
