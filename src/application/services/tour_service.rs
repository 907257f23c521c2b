//! Tour booking logic: validation, listings and full-set metrics.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::entities::{
    CommissionType, ContactType, NewTour, PaymentStatus, Tour, TourPatch,
};
use crate::domain::repositories::{TourFilter, TourMetrics, TourRepository};
use crate::error::AppError;

/// Largest page size a caller may request.
const MAX_PAGE_SIZE: i64 = 100;

/// Raw create payload, prior to validation.
///
/// String fields arrive as the client sent them; enum fields already
/// carry their transport defaults (`whatsapp`, `percentage`, `pending`)
/// when the request omitted them.
#[derive(Debug, Clone)]
pub struct CreateTour {
    pub client_name: String,
    pub client_contact: String,
    pub contact_type: String,
    pub tour_date: String,
    pub guide_name: String,
    pub total_value: Decimal,
    pub guide_commission: Decimal,
    pub commission_type: String,
    pub client_payment_status: String,
    pub guide_payment_status: String,
}

/// Raw partial-update payload. Absent fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateTour {
    pub client_name: Option<String>,
    pub client_contact: Option<String>,
    pub contact_type: Option<String>,
    pub tour_date: Option<String>,
    pub guide_name: Option<String>,
    pub total_value: Option<Decimal>,
    pub guide_commission: Option<Decimal>,
    pub commission_type: Option<String>,
    pub client_payment_status: Option<String>,
    pub guide_payment_status: Option<String>,
}

/// One page of tours plus the aggregates over the whole filtered set.
#[derive(Debug)]
pub struct TourListing {
    pub tours: Vec<Tour>,
    pub page: i64,
    pub limit: i64,
    pub metrics: TourMetrics,
}

/// Service for creating, listing and maintaining tours.
///
/// Every listing pairs one page of rows with [`TourMetrics`] computed
/// over the entire filtered set, so dashboard totals stay correct no
/// matter which page the client is on.
pub struct TourService {
    repository: Arc<dyn TourRepository>,
}

impl TourService {
    pub fn new(repository: Arc<dyn TourRepository>) -> Self {
        Self { repository }
    }

    /// Validates and stores a new tour, returning its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a required field is blank,
    /// the date does not parse, an enum value is unknown, or a money
    /// amount is negative. Returns [`AppError::Internal`] on database
    /// errors.
    pub async fn create_tour(&self, input: CreateTour) -> Result<i64, AppError> {
        let client_name = require_text(&input.client_name, "Client name is required")?;
        let client_contact = require_text(&input.client_contact, "Client contact is required")?;
        let guide_name = require_text(&input.guide_name, "Guide name is required")?;
        let tour_date = parse_tour_date(&input.tour_date)?;

        require_non_negative(input.total_value, "Total value must not be negative")?;
        require_non_negative(input.guide_commission, "Guide commission must not be negative")?;

        let new_tour = NewTour {
            client_name,
            client_contact,
            contact_type: parse_contact_type(&input.contact_type)?,
            tour_date,
            guide_name,
            total_value: input.total_value,
            guide_commission: input.guide_commission,
            commission_type: parse_commission_type(&input.commission_type)?,
            client_payment_status: parse_payment_status(
                &input.client_payment_status,
                "Invalid client payment status",
            )?,
            guide_payment_status: parse_payment_status(
                &input.guide_payment_status,
                "Invalid guide payment status",
            )?,
        };

        let tour_id = self.repository.create(new_tour).await?;
        tracing::info!(tour_id, "tour created");

        Ok(tour_id)
    }

    /// Fetches a single tour.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no tour has that identifier.
    pub async fn get_tour(&self, tour_id: i64) -> Result<Tour, AppError> {
        self.repository
            .find_by_id(tour_id)
            .await?
            .ok_or_else(|| AppError::not_found("Tour not found"))
    }

    /// Lists every tour, newest booking first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an out-of-range page or
    /// limit. Returns [`AppError::Internal`] on database errors.
    pub async fn list_tours(&self, page: i64, limit: i64) -> Result<TourListing, AppError> {
        self.listing(TourFilter::All, page, limit).await
    }

    /// Lists tours whose date falls inside the inclusive range,
    /// most recent tour date first.
    ///
    /// Accepts the same date formats as tour creation; a bare date
    /// means midnight UTC.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if either bound does not parse
    /// or the range is inverted.
    pub async fn list_tours_by_date_range(
        &self,
        start: &str,
        end: &str,
        page: i64,
        limit: i64,
    ) -> Result<TourListing, AppError> {
        let start = parse_tour_date(start)?;
        let end = parse_tour_date(end)?;

        if start > end {
            return Err(AppError::validation("Start date must not be after end date"));
        }

        self.listing(TourFilter::DateRange { start, end }, page, limit)
            .await
    }

    /// Lists tours whose guide name contains `guide_name`,
    /// case-insensitive, most recent tour date first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the search term is blank.
    pub async fn list_tours_by_guide(
        &self,
        guide_name: &str,
        page: i64,
        limit: i64,
    ) -> Result<TourListing, AppError> {
        let pattern = require_text(guide_name, "Guide name is required")?;

        self.listing(TourFilter::Guide { pattern }, page, limit).await
    }

    /// Applies a partial update and returns the merged tour.
    ///
    /// Only fields present in `input` change; everything else is
    /// preserved from the stored row. An empty payload is a no-op that
    /// still verifies the tour exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a supplied field fails the
    /// same checks as creation, [`AppError::NotFound`] if no tour has
    /// that identifier.
    pub async fn update_tour(&self, tour_id: i64, input: UpdateTour) -> Result<Tour, AppError> {
        let patch = build_patch(input)?;

        if patch.is_empty() {
            return self.get_tour(tour_id).await;
        }

        let tour = self
            .repository
            .update(tour_id, patch)
            .await?
            .ok_or_else(|| AppError::not_found("Tour not found"))?;

        tracing::info!(tour_id, "tour updated");

        Ok(tour)
    }

    /// Deletes a tour.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no tour has that identifier.
    pub async fn delete_tour(&self, tour_id: i64) -> Result<(), AppError> {
        if !self.repository.delete(tour_id).await? {
            return Err(AppError::not_found("Tour not found"));
        }

        tracing::info!(tour_id, "tour deleted");

        Ok(())
    }

    /// Runs the page query and the full-set aggregates concurrently,
    /// with the same filter for both.
    async fn listing(
        &self,
        filter: TourFilter,
        page: i64,
        limit: i64,
    ) -> Result<TourListing, AppError> {
        check_pagination(page, limit)?;

        tracing::debug!(?filter, page, limit, "listing tours");

        let (tours, metrics) = tokio::try_join!(
            self.repository.list(filter.clone(), page, limit),
            self.repository.metrics(filter),
        )?;

        Ok(TourListing {
            tours,
            page,
            limit,
            metrics,
        })
    }
}

fn check_pagination(page: i64, limit: i64) -> Result<(), AppError> {
    if page < 1 {
        return Err(AppError::validation("Page must be 1 or greater"));
    }
    if limit < 1 || limit > MAX_PAGE_SIZE {
        return Err(AppError::validation(format!(
            "Limit must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    Ok(())
}

/// Trims `value` and rejects the empty string.
fn require_text(value: &str, message: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(message));
    }
    Ok(trimmed.to_string())
}

fn require_non_negative(value: Decimal, message: &str) -> Result<(), AppError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AppError::validation(message));
    }
    Ok(())
}

fn parse_contact_type(s: &str) -> Result<ContactType, AppError> {
    ContactType::parse(s).ok_or_else(|| AppError::validation("Invalid contact type"))
}

fn parse_commission_type(s: &str) -> Result<CommissionType, AppError> {
    CommissionType::parse(s).ok_or_else(|| AppError::validation("Invalid commission type"))
}

fn parse_payment_status(s: &str, message: &str) -> Result<PaymentStatus, AppError> {
    PaymentStatus::parse(s).ok_or_else(|| AppError::validation(message))
}

/// Parses a client-supplied timestamp.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` and a
/// bare `YYYY-MM-DD`. Values without an offset are taken as UTC.
fn parse_tour_date(s: &str) -> Result<DateTime<Utc>, AppError> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc());
    }

    Err(AppError::validation("Invalid tour date"))
}

fn build_patch(input: UpdateTour) -> Result<TourPatch, AppError> {
    let mut patch = TourPatch::default();

    if let Some(v) = input.client_name {
        patch.client_name = Some(require_text(&v, "Client name is required")?);
    }
    if let Some(v) = input.client_contact {
        patch.client_contact = Some(require_text(&v, "Client contact is required")?);
    }
    if let Some(v) = input.contact_type {
        patch.contact_type = Some(parse_contact_type(&v)?);
    }
    if let Some(v) = input.tour_date {
        patch.tour_date = Some(parse_tour_date(&v)?);
    }
    if let Some(v) = input.guide_name {
        patch.guide_name = Some(require_text(&v, "Guide name is required")?);
    }
    if let Some(v) = input.total_value {
        require_non_negative(v, "Total value must not be negative")?;
        patch.total_value = Some(v);
    }
    if let Some(v) = input.guide_commission {
        require_non_negative(v, "Guide commission must not be negative")?;
        patch.guide_commission = Some(v);
    }
    if let Some(v) = input.commission_type {
        patch.commission_type = Some(parse_commission_type(&v)?);
    }
    if let Some(v) = input.client_payment_status {
        patch.client_payment_status =
            Some(parse_payment_status(&v, "Invalid client payment status")?);
    }
    if let Some(v) = input.guide_payment_status {
        patch.guide_payment_status =
            Some(parse_payment_status(&v, "Invalid guide payment status")?);
    }

    Ok(patch)
}
