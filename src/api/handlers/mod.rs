//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod health;
pub mod tours;
pub mod users;

pub use auth::{login_handler, logout_handler};
pub use health::health_handler;
pub use tours::{
    create_tour_handler, delete_tour_handler, get_tour_handler, list_tours_handler,
    tours_by_date_range_handler, tours_by_guide_handler, update_tour_handler,
};
pub use users::{
    create_user_handler, delete_user_handler, get_user_handler, list_users_handler,
    update_user_handler,
};
