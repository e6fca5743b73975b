//! Database models for the booking store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::engine::models::PlanType;

/// Authoritative booking lifecycle. New bookings start PENDING and either
/// get confirmed, cancelled, expired by the sweeper, or completed after
/// checkout. BLOCKED rows are admin maintenance holds with no guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Expired,
    Completed,
    Blocked,
}

impl BookingStatus {
    /// Statuses that hold dates against new requests.
    pub fn blocks_dates(self) -> bool {
        matches!(
            self,
            BookingStatus::Pending | BookingStatus::Confirmed | BookingStatus::Blocked
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    DepositPaid,
    Paid,
    Refunded,
}

/// A persisted booking row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookingRecord {
    pub id: Uuid,
    pub property_id: i32,
    pub plan_type: PlanType,
    pub guest_count: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub subtotal: i64,
    pub cleaning_fee: i64,
    pub total: i64,
    pub deposit: i64,
    pub currency: String,
    pub price_description: String,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub guest_city: Option<String>,
    pub override_reason: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Everything needed to insert a new booking row.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub property_id: i32,
    pub plan_type: PlanType,
    pub guest_count: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub subtotal: i64,
    pub cleaning_fee: i64,
    pub total: i64,
    pub deposit: i64,
    pub currency: String,
    pub price_description: String,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub guest_city: Option<String>,
    pub override_reason: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocking_statuses() {
        assert!(BookingStatus::Pending.blocks_dates());
        assert!(BookingStatus::Confirmed.blocks_dates());
        assert!(BookingStatus::Blocked.blocks_dates());
        assert!(!BookingStatus::Cancelled.blocks_dates());
        assert!(!BookingStatus::Expired.blocks_dates());
        assert!(!BookingStatus::Completed.blocks_dates());
    }

    #[test]
    fn test_status_wire_strings() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::DepositPaid).unwrap(),
            "\"deposit_paid\""
        );
    }
}
