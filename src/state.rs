//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, TourService, UserService};

/// Service handles shared across requests. Cloning is cheap; every
/// field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub tour_service: Arc<TourService>,
    pub user_service: Arc<UserService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(
        tour_service: Arc<TourService>,
        user_service: Arc<UserService>,
        auth_service: Arc<AuthService>,
    ) -> Self {
        Self {
            tour_service,
            user_service,
            auth_service,
        }
    }
}
