//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::tour_service::TourService`] - Tour bookings, listings and metrics
//! - [`services::user_service::UserService`] - Staff account management
//! - [`services::auth_service::AuthService`] - Login and Bearer token authentication

pub mod services;
