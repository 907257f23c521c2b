//! Handlers for tour booking endpoints.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::dto::pagination::{DateRangeParams, PaginationParams};
use crate::api::dto::tour::{
    CreateTourRequest, CreateTourResponse, TourActionResponse, TourDetailResponse,
    TourListResponse, UpdateTourRequest,
};
use crate::api::middleware::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a tour booking.
///
/// # Endpoint
///
/// `POST /api/tour`
///
/// # Request Body
///
/// ```json
/// {
///   "client_name": "Maria Silva",
///   "client_contact": "+55 11 98888-7777",
///   "contact_type": "whatsapp",       // optional, default "whatsapp"
///   "tour_date": "2026-06-15 09:00:00",
///   "guide_name": "John Reef",
///   "total_value": "350.00",
///   "guide_commission": "10",
///   "commission_type": "percentage",  // optional, default "percentage"
///   "client_payment_status": "pending",
///   "guide_payment_status": "pending"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request when a required field is blank, the date
/// does not parse, an enum value is unknown or an amount is negative.
pub async fn create_tour_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateTourRequest>,
) -> Result<(StatusCode, Json<CreateTourResponse>), AppError> {
    tracing::debug!(user_id = auth.user_id, "create tour requested");

    let tour_id = state.tour_service.create_tour(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateTourResponse {
            success: true,
            message: "Tour created successfully".to_string(),
            tour_id,
        }),
    ))
}

/// Lists every tour, newest booking first.
///
/// # Endpoint
///
/// `GET /api/tour?page=1&limit=10`
///
/// The response carries one page of rows, pagination metadata and
/// aggregate metrics computed over all tours, not just the page.
pub async fn list_tours_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<TourListResponse>, AppError> {
    let (page, limit) = params.resolve();

    let listing = state.tour_service.list_tours(page, limit).await?;

    Ok(Json(listing.into()))
}

/// Lists tours inside an inclusive date range, most recent tour first.
///
/// # Endpoint
///
/// `GET /api/tour/date-range?startDate=2026-06-01&endDate=2026-06-30&page=1&limit=10`
///
/// # Errors
///
/// Returns 400 Bad Request when either date is missing, unparseable,
/// or the range is inverted.
pub async fn tours_by_date_range_handler(
    State(state): State<AppState>,
    Query(params): Query<DateRangeParams>,
) -> Result<Json<TourListResponse>, AppError> {
    let (start, end) = match (params.start_date.as_deref(), params.end_date.as_deref()) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            return Err(AppError::validation("startDate and endDate are required"));
        }
    };

    let (page, limit) = params.pagination.resolve();

    let listing = state
        .tour_service
        .list_tours_by_date_range(start, end, page, limit)
        .await?;

    Ok(Json(listing.into()))
}

/// Lists tours whose guide name contains the given term,
/// case-insensitive.
///
/// # Endpoint
///
/// `GET /api/tour/guide/{guide_name}?page=1&limit=10`
pub async fn tours_by_guide_handler(
    Path(guide_name): Path<String>,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<TourListResponse>, AppError> {
    let (page, limit) = params.resolve();

    let listing = state
        .tour_service
        .list_tours_by_guide(&guide_name, page, limit)
        .await?;

    Ok(Json(listing.into()))
}

/// Fetches a single tour.
///
/// # Endpoint
///
/// `GET /api/tour/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no tour has that identifier.
pub async fn get_tour_handler(
    Path(tour_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<TourDetailResponse>, AppError> {
    let tour = state.tour_service.get_tour(tour_id).await?;

    Ok(Json(TourDetailResponse {
        success: true,
        data: tour.into(),
    }))
}

/// Partially updates a tour. Omitted fields keep their stored value.
///
/// # Endpoint
///
/// `PUT /api/tour/{id}`
///
/// # Errors
///
/// Returns 400 Bad Request when a supplied field fails validation,
/// 404 Not Found if no tour has that identifier.
pub async fn update_tour_handler(
    Path(tour_id): Path<i64>,
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<UpdateTourRequest>,
) -> Result<Json<TourActionResponse>, AppError> {
    tracing::debug!(user_id = auth.user_id, tour_id, "update tour requested");

    state.tour_service.update_tour(tour_id, payload.into()).await?;

    Ok(Json(TourActionResponse {
        success: true,
        message: "Tour updated successfully".to_string(),
    }))
}

/// Deletes a tour.
///
/// # Endpoint
///
/// `DELETE /api/tour/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no tour has that identifier.
pub async fn delete_tour_handler(
    Path(tour_id): Path<i64>,
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<TourActionResponse>, AppError> {
    tracing::debug!(user_id = auth.user_id, tour_id, "delete tour requested");

    state.tour_service.delete_tour(tour_id).await?;

    Ok(Json(TourActionResponse {
        success: true,
        message: "Tour deleted successfully".to_string(),
    }))
}
