#![allow(dead_code)]

//! Shared fixtures for the handler integration tests.
//!
//! The full router, auth middleware included, runs against in-memory
//! repositories, so no test needs a live database. The fakes mirror the
//! PostgreSQL contract: listing order, inclusive date ranges,
//! case-insensitive guide search and full-set metrics.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderValue;
use axum_test::TestServer;
use chrono::{DateTime, Duration, TimeZone, Utc};

use aqua_dive::application::services::{AuthService, TourService, UserService};
use aqua_dive::domain::entities::{
    CommissionType, ContactType, NewTour, NewUser, PaymentStatus, Tour, TourPatch, User, UserPatch,
};
use aqua_dive::domain::repositories::{TourFilter, TourMetrics, TourRepository, UserRepository};
use aqua_dive::error::AppError;
use aqua_dive::routes::app_router;
use aqua_dive::state::AppState;
use aqua_dive::utils::jwt::issue_token;
use aqua_dive::utils::password::hash_password;

pub const TEST_SECRET: &str = "integration-test-signing-secret";

/// Deterministic creation timestamps: base plus one second per id, so
/// `created_at DESC` equals insertion order reversed.
fn created_at_for(id: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(id)
}

fn matches_filter(tour: &Tour, filter: &TourFilter) -> bool {
    match filter {
        TourFilter::All => true,
        TourFilter::DateRange { start, end } => {
            tour.tour_date >= *start && tour.tour_date <= *end
        }
        TourFilter::Guide { pattern } => tour
            .guide_name
            .to_lowercase()
            .contains(&pattern.to_lowercase()),
    }
}

#[derive(Default)]
struct TourStore {
    next_id: i64,
    tours: Vec<Tour>,
}

/// In-memory stand-in for the tour table.
///
/// `op_count` reports how many repository calls the request under test
/// actually made; rejected requests must make none.
#[derive(Default)]
pub struct InMemoryTourRepository {
    store: Mutex<TourStore>,
    ops: AtomicU64,
}

impl InMemoryTourRepository {
    pub fn op_count(&self) -> u64 {
        self.ops.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl TourRepository for InMemoryTourRepository {
    async fn create(&self, new_tour: NewTour) -> Result<i64, AppError> {
        self.ops.fetch_add(1, Ordering::Relaxed);
        let mut store = self.store.lock().unwrap();

        store.next_id += 1;
        let tour_id = store.next_id;

        store.tours.push(Tour {
            tour_id,
            client_name: new_tour.client_name,
            client_contact: new_tour.client_contact,
            contact_type: new_tour.contact_type,
            tour_date: new_tour.tour_date,
            guide_name: new_tour.guide_name,
            total_value: new_tour.total_value,
            guide_commission: new_tour.guide_commission,
            commission_type: new_tour.commission_type,
            client_payment_status: new_tour.client_payment_status,
            guide_payment_status: new_tour.guide_payment_status,
            created_at: created_at_for(tour_id),
        });

        Ok(tour_id)
    }

    async fn find_by_id(&self, tour_id: i64) -> Result<Option<Tour>, AppError> {
        self.ops.fetch_add(1, Ordering::Relaxed);
        let store = self.store.lock().unwrap();

        Ok(store.tours.iter().find(|t| t.tour_id == tour_id).cloned())
    }

    async fn list(
        &self,
        filter: TourFilter,
        page: i64,
        limit: i64,
    ) -> Result<Vec<Tour>, AppError> {
        self.ops.fetch_add(1, Ordering::Relaxed);
        let store = self.store.lock().unwrap();

        let mut matched: Vec<Tour> = store
            .tours
            .iter()
            .filter(|t| matches_filter(t, &filter))
            .cloned()
            .collect();

        match filter {
            TourFilter::All => matched.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            _ => matched.sort_by(|a, b| b.tour_date.cmp(&a.tour_date)),
        }

        let offset = ((page - 1) * limit) as usize;
        Ok(matched
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .collect())
    }

    async fn metrics(&self, filter: TourFilter) -> Result<TourMetrics, AppError> {
        self.ops.fetch_add(1, Ordering::Relaxed);
        let store = self.store.lock().unwrap();

        let matched: Vec<&Tour> = store
            .tours
            .iter()
            .filter(|t| matches_filter(t, &filter))
            .collect();

        let pending = matched
            .iter()
            .filter(|t| t.guide_payment_status == PaymentStatus::Pending)
            .count() as i64;
        let paid = matched
            .iter()
            .filter(|t| t.guide_payment_status == PaymentStatus::Paid)
            .count() as i64;

        Ok(TourMetrics {
            total_count: matched.len() as i64,
            total_value: matched.iter().map(|t| t.total_value).sum(),
            total_guide_commission: matched.iter().map(|t| t.guide_commission).sum(),
            total_pending_payments: pending,
            total_paid_tours: paid,
            total_guide_commission_pending: pending,
        })
    }

    async fn update(&self, tour_id: i64, patch: TourPatch) -> Result<Option<Tour>, AppError> {
        self.ops.fetch_add(1, Ordering::Relaxed);
        let mut store = self.store.lock().unwrap();

        let Some(pos) = store.tours.iter().position(|t| t.tour_id == tour_id) else {
            return Ok(None);
        };

        let merged = store.tours[pos].clone().merged_with(patch);
        store.tours[pos] = merged.clone();

        Ok(Some(merged))
    }

    async fn delete(&self, tour_id: i64) -> Result<bool, AppError> {
        self.ops.fetch_add(1, Ordering::Relaxed);
        let mut store = self.store.lock().unwrap();

        let before = store.tours.len();
        store.tours.retain(|t| t.tour_id != tour_id);

        Ok(store.tours.len() < before)
    }
}

#[derive(Default)]
struct UserStore {
    next_id: i64,
    users: Vec<User>,
}

/// In-memory stand-in for the users table, including the unique-email
/// rule the real table enforces with a constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: Mutex<UserStore>,
    ops: AtomicU64,
}

impl InMemoryUserRepository {
    pub fn op_count(&self) -> u64 {
        self.ops.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<i64, AppError> {
        self.ops.fetch_add(1, Ordering::Relaxed);
        let mut store = self.store.lock().unwrap();

        if store.users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::conflict("Email already exists"));
        }

        store.next_id += 1;
        let user_id = store.next_id;

        store.users.push(User {
            user_id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: created_at_for(user_id),
        });

        Ok(user_id)
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, AppError> {
        self.ops.fetch_add(1, Ordering::Relaxed);
        let store = self.store.lock().unwrap();

        Ok(store.users.iter().find(|u| u.user_id == user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.ops.fetch_add(1, Ordering::Relaxed);
        let store = self.store.lock().unwrap();

        Ok(store.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        self.ops.fetch_add(1, Ordering::Relaxed);
        let store = self.store.lock().unwrap();

        let mut users = store.users.clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(users)
    }

    async fn update(&self, user_id: i64, patch: UserPatch) -> Result<bool, AppError> {
        self.ops.fetch_add(1, Ordering::Relaxed);
        let mut store = self.store.lock().unwrap();

        if store
            .users
            .iter()
            .any(|u| u.user_id != user_id && u.email == patch.email)
        {
            return Err(AppError::conflict("Email already exists"));
        }

        let Some(user) = store.users.iter_mut().find(|u| u.user_id == user_id) else {
            return Ok(false);
        };

        user.username = patch.username;
        user.email = patch.email;
        if let Some(hash) = patch.password_hash {
            user.password_hash = hash;
        }

        Ok(true)
    }

    async fn delete(&self, user_id: i64) -> Result<bool, AppError> {
        self.ops.fetch_add(1, Ordering::Relaxed);
        let mut store = self.store.lock().unwrap();

        let before = store.users.len();
        store.users.retain(|u| u.user_id != user_id);

        Ok(store.users.len() < before)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.ops.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// The full application wired over in-memory repositories.
pub struct TestApp {
    pub server: TestServer,
    pub tours: Arc<InMemoryTourRepository>,
    pub users: Arc<InMemoryUserRepository>,
}

pub fn spawn_app() -> TestApp {
    let tours = Arc::new(InMemoryTourRepository::default());
    let users = Arc::new(InMemoryUserRepository::default());

    let tour_service = Arc::new(TourService::new(tours.clone()));
    let user_service = Arc::new(UserService::new(users.clone()));
    let auth_service = Arc::new(AuthService::new(users.clone(), TEST_SECRET.to_string()));

    let state = AppState::new(tour_service, user_service, auth_service);
    let origin = HeaderValue::from_static("http://localhost:5173");

    let server = TestServer::new(app_router(state, origin)).unwrap();

    TestApp {
        server,
        tours,
        users,
    }
}

/// Inserts an account directly, hashing the password for real so login
/// round-trips work.
pub async fn seed_user(app: &TestApp, username: &str, email: &str, password: &str) -> i64 {
    let password_hash = hash_password(password).unwrap();

    app.users
        .create(NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
        })
        .await
        .unwrap()
}

/// Inserts a tour directly, bypassing the HTTP layer.
pub async fn seed_tour(
    app: &TestApp,
    client_name: &str,
    guide_name: &str,
    tour_date: &str,
    total_value: &str,
    guide_commission: &str,
    guide_status: PaymentStatus,
) -> i64 {
    app.tours
        .create(NewTour {
            client_name: client_name.to_string(),
            client_contact: "+55 11 98888-7777".to_string(),
            contact_type: ContactType::Whatsapp,
            tour_date: tour_date.parse().unwrap(),
            guide_name: guide_name.to_string(),
            total_value: total_value.parse().unwrap(),
            guide_commission: guide_commission.parse().unwrap(),
            commission_type: CommissionType::Percentage,
            client_payment_status: PaymentStatus::Pending,
            guide_payment_status: guide_status,
        })
        .await
        .unwrap()
}

/// Signs a valid one-hour token for `user_id` with the test secret.
pub fn bearer_token(user_id: i64) -> String {
    issue_token(TEST_SECRET, user_id, Duration::hours(1)).unwrap()
}

/// Seeds a default staff account and returns a token for it.
pub async fn login_token(app: &TestApp) -> String {
    let user_id = seed_user(app, "Marina", "marina@example.com", "coral-reef-9").await;
    bearer_token(user_id)
}

/// A complete, valid create-tour body.
pub fn tour_body(client_name: &str, guide_name: &str) -> serde_json::Value {
    serde_json::json!({
        "client_name": client_name,
        "client_contact": "+55 11 98888-7777",
        "contact_type": "whatsapp",
        "tour_date": "2026-06-15T09:00:00Z",
        "guide_name": guide_name,
        "total_value": "350.00",
        "guide_commission": "35.00",
        "commission_type": "percentage",
        "client_payment_status": "pending",
        "guide_payment_status": "pending"
    })
}
