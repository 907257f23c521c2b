//! Handlers for account management endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::user::{
    CreateUserRequest, UpdateUserRequest, UserActionResponse, UserResponse,
};
use crate::error::AppError;
use crate::state::AppState;

/// Lists every account, newest first.
///
/// # Endpoint
///
/// `GET /api/user`
///
/// Password hashes are stripped before serialization.
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.user_service.list_users().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Fetches a single account.
///
/// # Endpoint
///
/// `GET /api/user/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no account has that identifier.
pub async fn get_user_handler(
    Path(user_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service.get_user(user_id).await?;

    Ok(Json(user.into()))
}

/// Creates an account.
///
/// # Endpoint
///
/// `POST /api/user`
///
/// # Errors
///
/// Returns 400 Bad Request on validation failure, 409 Conflict if the
/// email is already registered.
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserActionResponse>), AppError> {
    payload.validate()?;

    state
        .user_service
        .create_user(&payload.username, &payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserActionResponse {
            status: true,
            message: "User created successfully".to_string(),
        }),
    ))
}

/// Updates an account. The password only changes when one is supplied.
///
/// # Endpoint
///
/// `PUT /api/user/{id}`
///
/// # Errors
///
/// Returns 400 Bad Request on validation failure, 404 Not Found for an
/// unknown account, 409 Conflict if the email belongs to someone else.
pub async fn update_user_handler(
    Path(user_id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserActionResponse>, AppError> {
    payload.validate()?;

    state
        .user_service
        .update_user(
            user_id,
            &payload.username,
            &payload.email,
            payload.password.as_deref(),
        )
        .await?;

    Ok(Json(UserActionResponse {
        status: true,
        message: "User updated successfully".to_string(),
    }))
}

/// Deletes an account.
///
/// # Endpoint
///
/// `DELETE /api/user/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no account has that identifier.
pub async fn delete_user_handler(
    Path(user_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<UserActionResponse>, AppError> {
    state.user_service.delete_user(user_id).await?;

    Ok(Json(UserActionResponse {
        status: true,
        message: "User deleted successfully".to_string(),
    }))
}
