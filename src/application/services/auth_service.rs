//! Authentication: credential checks, token issuance and verification.

use std::sync::Arc;

use chrono::Duration;

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::jwt::{issue_token, verify_token};
use crate::utils::password::verify_password;

/// How long an issued token stays valid.
const TOKEN_VALIDITY_HOURS: i64 = 24;

/// Service for logging accounts in and validating their Bearer tokens.
///
/// Tokens are stateless HS256 JWTs signed with the server secret. There
/// is no revocation list: logout is an audit event, and a token stays
/// usable until it expires.
pub struct AuthService {
    repository: Arc<dyn UserRepository>,
    signing_secret: String,
    token_validity: Duration,
}

impl AuthService {
    /// Creates a new authentication service with the default 24-hour
    /// token validity.
    ///
    /// # Arguments
    ///
    /// - `repository` - account repository for credential lookups
    /// - `signing_secret` - HS256 key; must match the value used when
    ///   outstanding tokens were issued
    pub fn new(repository: Arc<dyn UserRepository>, signing_secret: String) -> Self {
        Self::with_validity(
            repository,
            signing_secret,
            Duration::hours(TOKEN_VALIDITY_HOURS),
        )
    }

    /// Same as [`AuthService::new`] but with an explicit token lifetime.
    pub fn with_validity(
        repository: Arc<dyn UserRepository>,
        signing_secret: String,
        token_validity: Duration,
    ) -> Self {
        Self {
            repository,
            signing_secret,
            token_validity,
        }
    }

    /// Checks credentials and issues a signed token.
    ///
    /// Unknown email and wrong password produce the same error, so the
    /// response does not reveal which accounts exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] when the credentials do not
    /// match an account. Returns [`AppError::Internal`] on database
    /// errors or a corrupt stored hash.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User), AppError> {
        let Some(user) = self.repository.find_by_email(email).await? else {
            tracing::warn!(email, "login failed: unknown email");
            return Err(AppError::unauthorized("Invalid email or password"));
        };

        if !verify_password(password, &user.password_hash)? {
            tracing::warn!(user_id = user.user_id, "login failed: wrong password");
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let token = issue_token(&self.signing_secret, user.user_id, self.token_validity)?;
        tracing::info!(user_id = user.user_id, "login succeeded");

        Ok((token, user))
    }

    /// Resolves a Bearer token to the account that owns it.
    ///
    /// The signature and expiry are checked first, then the account is
    /// loaded so tokens of deleted accounts stop working immediately.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for a bad signature, an
    /// expired token or a missing account. Returns
    /// [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let claims = verify_token(&self.signing_secret, token).map_err(|err| {
            tracing::debug!(%err, "token rejected");
            AppError::unauthorized("Token is invalid or expired")
        })?;

        self.repository
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::unauthorized("Account no longer exists"))
    }

    /// Records a logout for the audit trail.
    ///
    /// Tokens are not revocable, so this only logs; the client discards
    /// its copy.
    pub fn logout(&self, user_id: i64) {
        tracing::info!(user_id, "logout recorded");
    }
}
