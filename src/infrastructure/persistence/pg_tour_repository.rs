//! PostgreSQL implementation of the tour repository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::entities::{CommissionType, ContactType, NewTour, PaymentStatus, Tour, TourPatch};
use crate::domain::repositories::{TourFilter, TourMetrics, TourRepository};
use crate::error::AppError;

const TOUR_COLUMNS: &str = "tour_id, client_name, client_contact, contact_type, tour_date, \
     guide_name, total_value, guide_commission, commission_type, \
     client_payment_status, guide_payment_status, created_at";

/// Aggregate projection evaluated over whatever WHERE clause the filter
/// contributes. `FILTER` keeps each counter scoped to its own predicate
/// inside a single scan.
const METRICS_COLUMNS: &str = "COUNT(*) AS total_count, \
     COALESCE(SUM(total_value), 0) AS total_value, \
     COALESCE(SUM(guide_commission), 0) AS total_guide_commission, \
     COUNT(*) FILTER (WHERE guide_payment_status = 'pending') AS total_pending_payments, \
     COUNT(*) FILTER (WHERE guide_payment_status = 'paid') AS total_paid_tours, \
     COUNT(*) FILTER (WHERE guide_payment_status = 'pending') AS total_guide_commission_pending";

/// PostgreSQL repository for tour storage and retrieval.
///
/// Uses SQLx prepared statements for SQL injection protection.
pub struct PgTourRepository {
    pool: Arc<PgPool>,
}

impl PgTourRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Escapes LIKE wildcards so a search pattern matches literally.
fn escape_like(pattern: &str) -> String {
    pattern
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn parse_enum_column<T>(
    raw: &str,
    column: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, AppError> {
    parse(raw).ok_or_else(|| AppError::internal(format!("unknown {column} value in row: {raw}")))
}

fn map_tour_row(row: &PgRow) -> Result<Tour, AppError> {
    let contact_type: String = row.try_get("contact_type")?;
    let commission_type: String = row.try_get("commission_type")?;
    let client_payment_status: String = row.try_get("client_payment_status")?;
    let guide_payment_status: String = row.try_get("guide_payment_status")?;

    Ok(Tour {
        tour_id: row.try_get("tour_id")?,
        client_name: row.try_get("client_name")?,
        client_contact: row.try_get("client_contact")?,
        contact_type: parse_enum_column(&contact_type, "contact_type", ContactType::parse)?,
        tour_date: row.try_get("tour_date")?,
        guide_name: row.try_get("guide_name")?,
        total_value: row.try_get("total_value")?,
        guide_commission: row.try_get("guide_commission")?,
        commission_type: parse_enum_column(
            &commission_type,
            "commission_type",
            CommissionType::parse,
        )?,
        client_payment_status: parse_enum_column(
            &client_payment_status,
            "client_payment_status",
            PaymentStatus::parse,
        )?,
        guide_payment_status: parse_enum_column(
            &guide_payment_status,
            "guide_payment_status",
            PaymentStatus::parse,
        )?,
        created_at: row.try_get("created_at")?,
    })
}

fn map_metrics_row(row: &PgRow) -> Result<TourMetrics, AppError> {
    Ok(TourMetrics {
        total_count: row.try_get("total_count")?,
        total_value: row.try_get("total_value")?,
        total_guide_commission: row.try_get("total_guide_commission")?,
        total_pending_payments: row.try_get("total_pending_payments")?,
        total_paid_tours: row.try_get("total_paid_tours")?,
        total_guide_commission_pending: row.try_get("total_guide_commission_pending")?,
    })
}

#[async_trait]
impl TourRepository for PgTourRepository {
    async fn create(&self, new_tour: NewTour) -> Result<i64, AppError> {
        let tour_id: i64 = sqlx::query_scalar(
            "INSERT INTO tours (client_name, client_contact, contact_type, tour_date, \
             guide_name, total_value, guide_commission, commission_type, \
             client_payment_status, guide_payment_status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING tour_id",
        )
        .bind(&new_tour.client_name)
        .bind(&new_tour.client_contact)
        .bind(new_tour.contact_type.as_str())
        .bind(new_tour.tour_date)
        .bind(&new_tour.guide_name)
        .bind(new_tour.total_value)
        .bind(new_tour.guide_commission)
        .bind(new_tour.commission_type.as_str())
        .bind(new_tour.client_payment_status.as_str())
        .bind(new_tour.guide_payment_status.as_str())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(tour_id)
    }

    async fn find_by_id(&self, tour_id: i64) -> Result<Option<Tour>, AppError> {
        let sql = format!("SELECT {TOUR_COLUMNS} FROM tours WHERE tour_id = $1");

        let row = sqlx::query(&sql)
            .bind(tour_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.as_ref().map(map_tour_row).transpose()
    }

    async fn list(
        &self,
        filter: TourFilter,
        page: i64,
        limit: i64,
    ) -> Result<Vec<Tour>, AppError> {
        let offset = (page - 1) * limit;

        let rows = match filter {
            TourFilter::All => {
                let sql = format!(
                    "SELECT {TOUR_COLUMNS} FROM tours \
                     ORDER BY created_at DESC LIMIT $1 OFFSET $2"
                );
                sqlx::query(&sql)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(self.pool.as_ref())
                    .await?
            }
            TourFilter::DateRange { start, end } => {
                let sql = format!(
                    "SELECT {TOUR_COLUMNS} FROM tours \
                     WHERE tour_date BETWEEN $1 AND $2 \
                     ORDER BY tour_date DESC LIMIT $3 OFFSET $4"
                );
                sqlx::query(&sql)
                    .bind(start)
                    .bind(end)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(self.pool.as_ref())
                    .await?
            }
            TourFilter::Guide { pattern } => {
                let sql = format!(
                    "SELECT {TOUR_COLUMNS} FROM tours \
                     WHERE guide_name ILIKE $1 \
                     ORDER BY tour_date DESC LIMIT $2 OFFSET $3"
                );
                sqlx::query(&sql)
                    .bind(format!("%{}%", escape_like(&pattern)))
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(self.pool.as_ref())
                    .await?
            }
        };

        rows.iter().map(map_tour_row).collect()
    }

    async fn metrics(&self, filter: TourFilter) -> Result<TourMetrics, AppError> {
        let row = match filter {
            TourFilter::All => {
                let sql = format!("SELECT {METRICS_COLUMNS} FROM tours");
                sqlx::query(&sql).fetch_one(self.pool.as_ref()).await?
            }
            TourFilter::DateRange { start, end } => {
                let sql = format!(
                    "SELECT {METRICS_COLUMNS} FROM tours WHERE tour_date BETWEEN $1 AND $2"
                );
                sqlx::query(&sql)
                    .bind(start)
                    .bind(end)
                    .fetch_one(self.pool.as_ref())
                    .await?
            }
            TourFilter::Guide { pattern } => {
                let sql = format!("SELECT {METRICS_COLUMNS} FROM tours WHERE guide_name ILIKE $1");
                sqlx::query(&sql)
                    .bind(format!("%{}%", escape_like(&pattern)))
                    .fetch_one(self.pool.as_ref())
                    .await?
            }
        };

        map_metrics_row(&row)
    }

    async fn update(&self, tour_id: i64, patch: TourPatch) -> Result<Option<Tour>, AppError> {
        let mut tx = self.pool.begin().await?;

        // Row lock so concurrent patches of the same tour serialize
        // instead of overwriting each other's merge.
        let sql = format!("SELECT {TOUR_COLUMNS} FROM tours WHERE tour_id = $1 FOR UPDATE");
        let Some(row) = sqlx::query(&sql)
            .bind(tour_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let merged = map_tour_row(&row)?.merged_with(patch);

        sqlx::query(
            "UPDATE tours SET client_name = $1, client_contact = $2, contact_type = $3, \
             tour_date = $4, guide_name = $5, total_value = $6, guide_commission = $7, \
             commission_type = $8, client_payment_status = $9, guide_payment_status = $10 \
             WHERE tour_id = $11",
        )
        .bind(&merged.client_name)
        .bind(&merged.client_contact)
        .bind(merged.contact_type.as_str())
        .bind(merged.tour_date)
        .bind(&merged.guide_name)
        .bind(merged.total_value)
        .bind(merged.guide_commission)
        .bind(merged.commission_type.as_str())
        .bind(merged.client_payment_status.as_str())
        .bind(merged.guide_payment_status.as_str())
        .bind(tour_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(merged))
    }

    async fn delete(&self, tour_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tours WHERE tour_id = $1")
            .bind(tour_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_passes_plain_text() {
        assert_eq!(escape_like("Marcos"), "Marcos");
    }

    #[test]
    fn test_escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_metrics_projection_counts_both_pending_keys() {
        // Both pending counters must run the same predicate.
        let pending_clauses = METRICS_COLUMNS
            .matches("FILTER (WHERE guide_payment_status = 'pending')")
            .count();
        assert_eq!(pending_clauses, 2);
    }
}
