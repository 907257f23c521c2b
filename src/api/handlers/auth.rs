//! Handlers for login and logout.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::auth::{LoginRequest, LoginResponse, LogoutRequest, LogoutResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Exchanges credentials for a Bearer token.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Request Body
///
/// ```json
/// {
///   "email": "ana@example.com",
///   "password": "secret"
/// }
/// ```
///
/// # Errors
///
/// Returns 401 Unauthorized when the credentials do not match an
/// account; the body never reveals whether the email exists.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (token, user) = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        status: true,
        message: "Login successful".to_string(),
        token,
        user_id: user.user_id,
    }))
}

/// Records a logout.
///
/// # Endpoint
///
/// `POST /api/auth/logout`
///
/// Tokens are stateless, so nothing is revoked server-side; the call
/// writes an audit log line and the client discards its token.
pub async fn logout_handler(
    State(state): State<AppState>,
    Json(payload): Json<LogoutRequest>,
) -> (StatusCode, Json<LogoutResponse>) {
    state.auth_service.logout(payload.user_id);

    (
        StatusCode::CREATED,
        Json(LogoutResponse {
            status: true,
            message: "Logout successful".to_string(),
        }),
    )
}
