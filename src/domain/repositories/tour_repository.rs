//! Repository trait for tour data access.

use crate::domain::entities::{NewTour, Tour, TourPatch};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Row filter shared by listings and aggregate metrics.
///
/// The same filter value must be handed to both [`TourRepository::list`]
/// and [`TourRepository::metrics`] so the aggregates describe exactly
/// the record set being paged, not some other set.
#[derive(Debug, Clone, PartialEq)]
pub enum TourFilter {
    /// Every tour.
    All,
    /// Tours whose `tour_date` falls inside the inclusive range.
    DateRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// Tours whose guide name contains `pattern`, case-insensitive.
    Guide { pattern: String },
}

/// Aggregates computed over the full filtered set, not the page.
///
/// `total_guide_commission_pending` intentionally mirrors
/// `total_pending_payments`; the frontend consumes both keys.
#[derive(Debug, Clone, PartialEq)]
pub struct TourMetrics {
    pub total_count: i64,
    pub total_value: Decimal,
    pub total_guide_commission: Decimal,
    pub total_pending_payments: i64,
    pub total_paid_tours: i64,
    pub total_guide_commission_pending: i64,
}

impl TourMetrics {
    /// Metrics for an empty set. Sums are zero, never null.
    pub fn empty() -> Self {
        Self {
            total_count: 0,
            total_value: Decimal::ZERO,
            total_guide_commission: Decimal::ZERO,
            total_pending_payments: 0,
            total_paid_tours: 0,
            total_guide_commission_pending: 0,
        }
    }
}

/// Repository interface for managing tours.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTourRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TourRepository: Send + Sync {
    /// Inserts a new tour and returns its generated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_tour: NewTour) -> Result<i64, AppError>;

    /// Finds a tour by its identifier.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Tour))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, tour_id: i64) -> Result<Option<Tour>, AppError>;

    /// Lists one page of tours matching `filter`.
    ///
    /// The unfiltered listing is ordered by `created_at DESC`; filtered
    /// listings are ordered by `tour_date DESC`. `page` is 1-indexed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(
        &self,
        filter: TourFilter,
        page: i64,
        limit: i64,
    ) -> Result<Vec<Tour>, AppError>;

    /// Computes aggregates over every tour matching `filter`.
    ///
    /// Pagination never affects the result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn metrics(&self, filter: TourFilter) -> Result<TourMetrics, AppError>;

    /// Applies a partial update inside a single transaction.
    ///
    /// Reads the current row, merges `patch` over it and writes the
    /// result back. Concurrent updates serialize on a row lock.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Tour))` with the merged row if the tour exists
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, tour_id: i64, patch: TourPatch) -> Result<Option<Tour>, AppError>;

    /// Deletes a tour.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if no tour
    /// had that identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, tour_id: i64) -> Result<bool, AppError>;
}
