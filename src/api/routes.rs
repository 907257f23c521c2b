//! API route configuration.
//!
//! Everything except the auth endpoints requires Bearer token
//! authentication via [`crate::api::middleware::auth`].

use crate::api::handlers::{
    create_tour_handler, create_user_handler, delete_tour_handler, delete_user_handler,
    get_tour_handler, get_user_handler, list_tours_handler, list_users_handler, login_handler,
    logout_handler, tours_by_date_range_handler, tours_by_guide_handler, update_tour_handler,
    update_user_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get, routing::post};

/// Routes reachable without a token.
///
/// # Endpoints
///
/// - `POST /auth/login`  - Exchange credentials for a Bearer token
/// - `POST /auth/logout` - Record a logout (stateless)
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
}

/// All booking and account routes, protected by Bearer token
/// authentication.
///
/// # Endpoints
///
/// - `GET    /user`                    - List accounts
/// - `POST   /user`                    - Create an account
/// - `GET    /user/{id}`               - Fetch one account
/// - `PUT    /user/{id}`               - Update an account
/// - `DELETE /user/{id}`               - Delete an account
/// - `GET    /tour`                    - List tours (paginated, with metrics)
/// - `POST   /tour`                    - Create a tour
/// - `GET    /tour/date-range`         - Tours inside a date range
/// - `GET    /tour/guide/{guide_name}` - Tours by guide name substring
/// - `GET    /tour/{id}`               - Fetch one tour
/// - `PUT    /tour/{id}`               - Partially update a tour
/// - `DELETE /tour/{id}`               - Delete a tour
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(list_users_handler).post(create_user_handler))
        .route(
            "/user/{user_id}",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
        .route("/tour", get(list_tours_handler).post(create_tour_handler))
        .route("/tour/date-range", get(tours_by_date_range_handler))
        .route("/tour/guide/{guide_name}", get(tours_by_guide_handler))
        .route(
            "/tour/{id}",
            get(get_tour_handler)
                .put(update_tour_handler)
                .delete(delete_tour_handler),
        )
}
