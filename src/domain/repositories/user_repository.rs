//! Repository trait for account data access.

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new account and returns its generated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<i64, AppError>;

    /// Finds an account by its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, AppError>;

    /// Finds an account by email. The lookup is exact, not fuzzy.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Lists every account, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Replaces username and email, and the password hash when the
    /// patch carries one.
    ///
    /// Returns `Ok(true)` if a row was updated, `Ok(false)` if no
    /// account had that identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new email belongs to a
    /// different account. Returns [`AppError::Internal`] on database
    /// errors.
    async fn update(&self, user_id: i64, patch: UserPatch) -> Result<bool, AppError>;

    /// Deletes an account.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if no
    /// account had that identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, user_id: i64) -> Result<bool, AppError>;

    /// Round-trips a trivial query to prove the database is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the database cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;
}
