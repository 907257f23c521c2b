//! Pagination query parameters and page metadata.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,
}

impl PaginationParams {
    /// Applies the defaults: page 1, ten rows per page.
    ///
    /// Range checks happen in the service layer, which owns the
    /// pagination contract.
    pub fn resolve(&self) -> (i64, i64) {
        (self.page.unwrap_or(1), self.limit.unwrap_or(10))
    }
}

/// Query parameters for the date-range listing.
///
/// `startDate` and `endDate` stay raw strings here; the service parses
/// them together with the same formats accepted at tour creation.
#[derive(Debug, Deserialize)]
pub struct DateRangeParams {
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,

    #[serde(rename = "endDate")]
    pub end_date: Option<String>,

    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Page metadata returned next to every listing.
///
/// Field names are camelCase on the wire; the frontend consumes them
/// as-is.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total_count: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PaginationMeta {
    /// Derives page metadata from the requested page and the size of
    /// the full filtered set.
    pub fn new(page: i64, limit: i64, total_count: i64) -> Self {
        let total_pages = if total_count > 0 {
            (total_count + limit - 1) / limit
        } else {
            0
        };

        Self {
            page,
            limit,
            total_count,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }
}
