//! Account management: listing, creation and maintenance of the staff
//! accounts that may log in.

use std::sync::Arc;

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::hash_password;

/// Service for managing staff accounts.
///
/// Passwords are hashed with Argon2 before they reach the repository;
/// plaintext never leaves this layer.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Lists every account, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.repository.list().await
    }

    /// Fetches a single account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no account has that identifier.
    pub async fn get_user(&self, user_id: i64) -> Result<User, AppError> {
        self.repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Creates an account with a freshly hashed password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a field is blank,
    /// [`AppError::Conflict`] if the email is already registered.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<i64, AppError> {
        let username = require_text(username, "Username is required")?;
        let email = require_text(email, "Email is required")?;

        if password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }

        let new_user = NewUser {
            username,
            email,
            password_hash: hash_password(password)?,
        };

        let user_id = self.repository.create(new_user).await?;
        tracing::info!(user_id, "user created");

        Ok(user_id)
    }

    /// Updates username and email, and the password when one is given.
    ///
    /// `password: None` keeps the stored hash untouched, so editing a
    /// profile never silently resets credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for blank fields,
    /// [`AppError::NotFound`] if no account has that identifier,
    /// [`AppError::Conflict`] if the email belongs to another account.
    pub async fn update_user(
        &self,
        user_id: i64,
        username: &str,
        email: &str,
        password: Option<&str>,
    ) -> Result<(), AppError> {
        let patch = UserPatch {
            username: require_text(username, "Username is required")?,
            email: require_text(email, "Email is required")?,
            password_hash: match password {
                Some("") => return Err(AppError::validation("Password must not be empty")),
                Some(p) => Some(hash_password(p)?),
                None => None,
            },
        };

        if !self.repository.update(user_id, patch).await? {
            return Err(AppError::not_found("User not found"));
        }

        tracing::info!(user_id, "user updated");

        Ok(())
    }

    /// Deletes an account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no account has that identifier.
    pub async fn delete_user(&self, user_id: i64) -> Result<(), AppError> {
        if !self.repository.delete(user_id).await? {
            return Err(AppError::not_found("User not found"));
        }

        tracing::info!(user_id, "user deleted");

        Ok(())
    }

    /// Proves the backing database is reachable. Used by health checks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the database cannot be reached.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

/// Trims `value` and rejects the empty string.
fn require_text(value: &str, message: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(message));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use crate::utils::password::verify_password;
    use chrono::Utc;

    fn sample_user(user_id: i64) -> User {
        User {
            user_id,
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_create()
            .withf(|new_user| {
                new_user.password_hash != "hunter2"
                    && verify_password("hunter2", &new_user.password_hash).unwrap_or(false)
            })
            .times(1)
            .returning(|_| Ok(3));

        let service = UserService::new(Arc::new(mock_repo));

        let user_id = service
            .create_user("ana", "ana@example.com", "hunter2")
            .await
            .unwrap();

        assert_eq!(user_id, 3);
    }

    #[tokio::test]
    async fn test_create_user_rejects_blank_username() {
        let service = UserService::new(Arc::new(MockUserRepository::new()));

        let result = service.create_user("  ", "ana@example.com", "hunter2").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_user_propagates_email_conflict() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Email already exists")));

        let service = UserService::new(Arc::new(mock_repo));

        let result = service
            .create_user("ana", "ana@example.com", "hunter2")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(mock_repo));

        let result = service.get_user(42).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_user_without_password_keeps_hash() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_update()
            .withf(|user_id, patch| *user_id == 3 && patch.password_hash.is_none())
            .times(1)
            .returning(|_, _| Ok(true));

        let service = UserService::new(Arc::new(mock_repo));

        service
            .update_user(3, "ana", "ana@example.com", None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_user_with_password_rehashes() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_update()
            .withf(|_, patch| {
                patch
                    .password_hash
                    .as_deref()
                    .is_some_and(|hash| verify_password("new-pass", hash).unwrap_or(false))
            })
            .times(1)
            .returning(|_, _| Ok(true));

        let service = UserService::new(Arc::new(mock_repo));

        service
            .update_user(3, "ana", "ana@example.com", Some("new-pass"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_user_rejects_empty_password() {
        let service = UserService::new(Arc::new(MockUserRepository::new()));

        let result = service
            .update_user(3, "ana", "ana@example.com", Some(""))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_user_missing_row_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_update().times(1).returning(|_, _| Ok(false));

        let service = UserService::new(Arc::new(mock_repo));

        let result = service.update_user(99, "ana", "ana@example.com", None).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_user_missing_row_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_delete().times(1).returning(|_| Ok(false));

        let service = UserService::new(Arc::new(mock_repo));

        let result = service.delete_user(99).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_users_passthrough() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_list()
            .times(1)
            .returning(|| Ok(vec![sample_user(1), sample_user(2)]));

        let service = UserService::new(Arc::new(mock_repo));

        let users = service.list_users().await.unwrap();

        assert_eq!(users.len(), 2);
    }
}
