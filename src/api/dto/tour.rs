//! Request and response bodies for tour endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::dto::pagination::PaginationMeta;
use crate::application::services::{CreateTour, TourListing, UpdateTour};
use crate::domain::entities::Tour;
use crate::domain::repositories::TourMetrics;

/// Body for `POST /api/tour`.
///
/// Omitted enum fields fall back to the booking-desk defaults:
/// `whatsapp` contact, `percentage` commission, both payments `pending`.
#[derive(Debug, Deserialize)]
pub struct CreateTourRequest {
    pub client_name: String,
    pub client_contact: String,

    #[serde(default = "default_contact_type")]
    pub contact_type: String,

    pub tour_date: String,
    pub guide_name: String,
    pub total_value: Decimal,
    pub guide_commission: Decimal,

    #[serde(default = "default_commission_type")]
    pub commission_type: String,

    #[serde(default = "default_payment_status")]
    pub client_payment_status: String,

    #[serde(default = "default_payment_status")]
    pub guide_payment_status: String,
}

fn default_contact_type() -> String {
    "whatsapp".to_string()
}

fn default_commission_type() -> String {
    "percentage".to_string()
}

fn default_payment_status() -> String {
    "pending".to_string()
}

impl From<CreateTourRequest> for CreateTour {
    fn from(req: CreateTourRequest) -> Self {
        CreateTour {
            client_name: req.client_name,
            client_contact: req.client_contact,
            contact_type: req.contact_type,
            tour_date: req.tour_date,
            guide_name: req.guide_name,
            total_value: req.total_value,
            guide_commission: req.guide_commission,
            commission_type: req.commission_type,
            client_payment_status: req.client_payment_status,
            guide_payment_status: req.guide_payment_status,
        }
    }
}

/// Body for `PUT /api/tour/{id}`. Every field is optional; omitted
/// fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTourRequest {
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

impl From<UpdateTourRequest> for UpdateTour {
    fn from(req: UpdateTourRequest) -> Self {
        UpdateTour {
            client_name: req.client_name,
            client_contact: req.client_contact,
            contact_type: req.contact_type,
            tour_date: req.tour_date,
            guide_name: req.guide_name,
            total_value: req.total_value,
            guide_commission: req.guide_commission,
            commission_type: req.commission_type,
            client_payment_status: req.client_payment_status,
            guide_payment_status: req.guide_payment_status,
        }
    }
}

/// One tour as returned to clients. Enum fields serialize as their
/// lowercase wire names, money fields as decimal strings.
#[derive(Debug, Serialize)]
pub struct TourResponse {
    pub tour_id: i64,
    pub client_name: String,
    pub client_contact: String,
    pub contact_type: String,
    pub tour_date: DateTime<Utc>,
    pub guide_name: String,
    pub total_value: Decimal,
    pub guide_commission: Decimal,
    pub commission_type: String,
    pub client_payment_status: String,
    pub guide_payment_status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Tour> for TourResponse {
    fn from(tour: Tour) -> Self {
        TourResponse {
            tour_id: tour.tour_id,
            client_name: tour.client_name,
            client_contact: tour.client_contact,
            contact_type: tour.contact_type.as_str().to_string(),
            tour_date: tour.tour_date,
            guide_name: tour.guide_name,
            total_value: tour.total_value,
            guide_commission: tour.guide_commission,
            commission_type: tour.commission_type.as_str().to_string(),
            client_payment_status: tour.client_payment_status.as_str().to_string(),
            guide_payment_status: tour.guide_payment_status.as_str().to_string(),
            created_at: tour.created_at,
        }
    }
}

/// Aggregates block attached to every listing response.
#[derive(Debug, Serialize)]
pub struct MetricsBody {
    pub total_count: i64,
    pub total_value: Decimal,
    pub total_guide_commission: Decimal,
    pub total_pending_payments: i64,
    pub total_paid_tours: i64,
    pub total_guide_commission_pending: i64,
}

impl From<TourMetrics> for MetricsBody {
    fn from(metrics: TourMetrics) -> Self {
        MetricsBody {
            total_count: metrics.total_count,
            total_value: metrics.total_value,
            total_guide_commission: metrics.total_guide_commission,
            total_pending_payments: metrics.total_pending_payments,
            total_paid_tours: metrics.total_paid_tours,
            total_guide_commission_pending: metrics.total_guide_commission_pending,
        }
    }
}

/// Envelope for every tour listing: one page of rows plus pagination
/// metadata and full-set aggregates.
#[derive(Debug, Serialize)]
pub struct TourListResponse {
    pub success: bool,
    pub data: Vec<TourResponse>,
    pub pagination: PaginationMeta,
    pub metrics: MetricsBody,
}

impl From<TourListing> for TourListResponse {
    fn from(listing: TourListing) -> Self {
        let pagination =
            PaginationMeta::new(listing.page, listing.limit, listing.metrics.total_count);

        TourListResponse {
            success: true,
            data: listing.tours.into_iter().map(TourResponse::from).collect(),
            pagination,
            metrics: listing.metrics.into(),
        }
    }
}

/// Envelope for a single-tour fetch.
#[derive(Debug, Serialize)]
pub struct TourDetailResponse {
    pub success: bool,
    pub data: TourResponse,
}

/// Returned by `POST /api/tour` with the generated identifier.
#[derive(Debug, Serialize)]
pub struct CreateTourResponse {
    pub success: bool,
    pub message: String,

    #[serde(rename = "tourId")]
    pub tour_id: i64,
}

/// Plain acknowledgement for tour updates and deletes.
#[derive(Debug, Serialize)]
pub struct TourActionResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CommissionType, ContactType, PaymentStatus};
    use chrono::TimeZone;

    #[test]
    fn test_create_request_fills_defaults() {
        let req: CreateTourRequest = serde_json::from_str(
            r#"{
                "client_name": "Maria",
                "client_contact": "+55 11 98888-7777",
                "tour_date": "2026-06-15",
                "guide_name": "John",
                "total_value": "350.00",
                "guide_commission": 10
            }"#,
        )
        .unwrap();

        assert_eq!(req.contact_type, "whatsapp");
        assert_eq!(req.commission_type, "percentage");
        assert_eq!(req.client_payment_status, "pending");
        assert_eq!(req.guide_payment_status, "pending");
    }

    #[test]
    fn test_create_request_keeps_explicit_values() {
        let req: CreateTourRequest = serde_json::from_str(
            r#"{
                "client_name": "Maria",
                "client_contact": "maria@example.com",
                "contact_type": "email",
                "tour_date": "2026-06-15",
                "guide_name": "John",
                "total_value": 350,
                "guide_commission": 35,
                "commission_type": "fixed",
                "client_payment_status": "paid",
                "guide_payment_status": "paid"
            }"#,
        )
        .unwrap();

        assert_eq!(req.contact_type, "email");
        assert_eq!(req.commission_type, "fixed");
        assert_eq!(req.client_payment_status, "paid");
    }

    #[test]
    fn test_update_request_empty_body_is_all_none() {
        let req: UpdateTourRequest = serde_json::from_str("{}").unwrap();

        assert!(req.client_name.is_none());
        assert!(req.tour_date.is_none());
        assert!(req.total_value.is_none());
        assert!(req.guide_payment_status.is_none());
    }

    #[test]
    fn test_tour_response_uses_wire_names() {
        let tour = Tour {
            tour_id: 5,
            client_name: "Maria".to_string(),
            client_contact: "+55 11 98888-7777".to_string(),
            contact_type: ContactType::Whatsapp,
            tour_date: Utc.with_ymd_and_hms(2026, 6, 15, 9, 0, 0).unwrap(),
            guide_name: "John".to_string(),
            total_value: Decimal::new(35000, 2),
            guide_commission: Decimal::new(10, 0),
            commission_type: CommissionType::Percentage,
            client_payment_status: PaymentStatus::Pending,
            guide_payment_status: PaymentStatus::Paid,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(TourResponse::from(tour)).unwrap();

        assert_eq!(json["tour_id"], 5);
        assert_eq!(json["contact_type"], "whatsapp");
        assert_eq!(json["commission_type"], "percentage");
        assert_eq!(json["client_payment_status"], "pending");
        assert_eq!(json["guide_payment_status"], "paid");
        assert_eq!(json["total_value"], "350.00");
    }

    #[test]
    fn test_metrics_body_carries_both_pending_keys() {
        let metrics = TourMetrics {
            total_count: 4,
            total_value: Decimal::new(140000, 2),
            total_guide_commission: Decimal::new(40, 0),
            total_pending_payments: 3,
            total_paid_tours: 1,
            total_guide_commission_pending: 3,
        };

        let json = serde_json::to_value(MetricsBody::from(metrics)).unwrap();

        assert_eq!(json["total_pending_payments"], 3);
        assert_eq!(json["total_guide_commission_pending"], 3);
    }

    #[test]
    fn test_create_response_uses_camel_case_id() {
        let json = serde_json::to_value(CreateTourResponse {
            success: true,
            message: "Tour created successfully".to_string(),
            tour_id: 7,
        })
        .unwrap();

        assert_eq!(json["tourId"], 7);
        assert!(json.get("tour_id").is_none());
    }
}
