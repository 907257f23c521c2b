//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: database status (public)
//! - `/api/auth/*`       - Login and logout (public)
//! - `/api/*`            - Booking and account REST API (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Single allowed frontend origin, with credentials
//! - **Authentication** - Bearer token on everything under `/api` except auth

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::http::{HeaderValue, Method, header};
use axum::routing::get;
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;

/// Constructs the application router with all routes and middleware.
///
/// The trailing-slash normalization layer is applied around this router
/// at serve time, because `NormalizePath` has to wrap the whole router
/// rather than sit inside it.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `frontend_origin` - the one origin allowed by CORS; responses
///   permit credentials, so a wildcard is never used
pub fn app_router(state: AppState, frontend_origin: HeaderValue) -> Router {
    let api_router = api::routes::public_routes().merge(
        api::routes::protected_routes()
            .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
    );

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(cors_layer(frontend_origin))
        .layer(tracing::layer())
}

/// CORS policy mirroring what the booking frontend needs: one origin,
/// the four verbs the API serves, JSON bodies and Bearer tokens.
fn cors_layer(frontend_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(frontend_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
