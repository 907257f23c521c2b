//! Tour entity and the closed vocabularies attached to it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

/// How the client prefers to be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactType {
    Whatsapp,
    Phone,
    Email,
}

impl ContactType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactType::Whatsapp => "whatsapp",
            ContactType::Phone => "phone",
            ContactType::Email => "email",
        }
    }

    /// Parses the stored lowercase form. Anything else is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "whatsapp" => Some(ContactType::Whatsapp),
            "phone" => Some(ContactType::Phone),
            "email" => Some(ContactType::Email),
            _ => None,
        }
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the guide commission is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommissionType {
    Percentage,
    Fixed,
}

impl CommissionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommissionType::Percentage => "percentage",
            CommissionType::Fixed => "fixed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "percentage" => Some(CommissionType::Percentage),
            "fixed" => Some(CommissionType::Fixed),
            _ => None,
        }
    }
}

impl fmt::Display for CommissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement state of a payment leg, client side or guide side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Paid,
    Pending,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "paid" => Some(PaymentStatus::Paid),
            "pending" => Some(PaymentStatus::Pending),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booked diving tour.
///
/// Money fields use fixed-point decimals, never floats, so aggregate
/// sums stay exact.
#[derive(Debug, Clone)]
pub struct Tour {
    pub tour_id: i64,
    pub client_name: String,
    pub client_contact: String,
    pub contact_type: ContactType,
    pub tour_date: DateTime<Utc>,
    pub guide_name: String,
    pub total_value: Decimal,
    pub guide_commission: Decimal,
    pub commission_type: CommissionType,
    pub client_payment_status: PaymentStatus,
    pub guide_payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl Tour {
    /// Applies a partial update, keeping the current value for every
    /// field the patch leaves out.
    pub fn merged_with(self, patch: TourPatch) -> Tour {
        Tour {
            tour_id: self.tour_id,
            client_name: patch.client_name.unwrap_or(self.client_name),
            client_contact: patch.client_contact.unwrap_or(self.client_contact),
            contact_type: patch.contact_type.unwrap_or(self.contact_type),
            tour_date: patch.tour_date.unwrap_or(self.tour_date),
            guide_name: patch.guide_name.unwrap_or(self.guide_name),
            total_value: patch.total_value.unwrap_or(self.total_value),
            guide_commission: patch.guide_commission.unwrap_or(self.guide_commission),
            commission_type: patch.commission_type.unwrap_or(self.commission_type),
            client_payment_status: patch
                .client_payment_status
                .unwrap_or(self.client_payment_status),
            guide_payment_status: patch
                .guide_payment_status
                .unwrap_or(self.guide_payment_status),
            created_at: self.created_at,
        }
    }
}

/// Input data for recording a new tour. Defaults are already resolved.
#[derive(Debug, Clone)]
pub struct NewTour {
    pub client_name: String,
    pub client_contact: String,
    pub contact_type: ContactType,
    pub tour_date: DateTime<Utc>,
    pub guide_name: String,
    pub total_value: Decimal,
    pub guide_commission: Decimal,
    pub commission_type: CommissionType,
    pub client_payment_status: PaymentStatus,
    pub guide_payment_status: PaymentStatus,
}

/// Partial update for an existing tour.
///
/// `None` fields are left unchanged. There is no way to clear a field;
/// every tour column is mandatory.
#[derive(Debug, Clone, Default)]
pub struct TourPatch {
    pub client_name: Option<String>,
    pub client_contact: Option<String>,
    pub contact_type: Option<ContactType>,
    pub tour_date: Option<DateTime<Utc>>,
    pub guide_name: Option<String>,
    pub total_value: Option<Decimal>,
    pub guide_commission: Option<Decimal>,
    pub commission_type: Option<CommissionType>,
    pub client_payment_status: Option<PaymentStatus>,
    pub guide_payment_status: Option<PaymentStatus>,
}

impl TourPatch {
    /// True when the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.client_name.is_none()
            && self.client_contact.is_none()
            && self.contact_type.is_none()
            && self.tour_date.is_none()
            && self.guide_name.is_none()
            && self.total_value.is_none()
            && self.guide_commission.is_none()
            && self.commission_type.is_none()
            && self.client_payment_status.is_none()
            && self.guide_payment_status.is_none()
    }
}
