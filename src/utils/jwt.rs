//! Signed bearer token issuing and verification.

use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Claims carried by every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account identifier the token was issued for.
    pub sub: i64,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Issues an HS256 token for `user_id`, valid for `validity`.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if signing fails.
pub fn issue_token(secret: &str, user_id: i64, validity: Duration) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        iat: now.timestamp(),
        exp: (now + validity).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(format!("token signing failed: {e}")))
}

/// Verifies signature and expiry, returning the claims on success.
///
/// Callers decide how a failure maps onto their error taxonomy; the
/// raw library error keeps the expired/invalid distinction available
/// for logging.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::errors::ErrorKind;

    const SECRET: &str = "test-secret-at-least-sixteen-bytes";

    #[test]
    fn test_issue_and_verify_round_trip() {
        let token = issue_token(SECRET, 42, Duration::hours(24)).unwrap();
        let claims = verify_token(SECRET, &token).unwrap();

        assert_eq!(claims.sub, 42);
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Well past the default 60s leeway.
        let token = issue_token(SECRET, 42, Duration::hours(-2)).unwrap();
        let err = verify_token(SECRET, &token).unwrap_err();

        assert_eq!(*err.kind(), ErrorKind::ExpiredSignature);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token(SECRET, 42, Duration::hours(24)).unwrap();
        let err = verify_token("a-completely-different-secret", &token).unwrap_err();

        assert_eq!(*err.kind(), ErrorKind::InvalidSignature);
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(verify_token(SECRET, "not.a.token").is_err());
        assert!(verify_token(SECRET, "").is_err());
    }
}
