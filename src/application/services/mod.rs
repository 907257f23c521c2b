//! Business logic services for the application layer.

pub mod auth_service;
pub mod tour_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use tour_service::{CreateTour, TourListing, TourService, UpdateTour};
pub use user_service::UserService;
