//! Response DTOs for the booking API endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::booking::models::BookingStatus;
use crate::engine::models::{PriceBreakdown, ValidationResult};

/// Response for a created booking
#[derive(Debug, Serialize)]
pub struct BookingCreatedResponse {
    pub booking_id: Uuid,
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub price: PriceBreakdown,
}

/// Response for the quote endpoint: the validation verdict plus, when the
/// request is eligible, the derived breakdown.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    #[serde(flatten)]
    pub verdict: ValidationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceBreakdown>,
}

/// Response for the availability probe
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub property_id: i32,
    pub available: bool,
}

/// Response for the holiday lookup
#[derive(Debug, Serialize)]
pub struct HolidaysResponse {
    pub holidays_in_range: Vec<NaiveDate>,
    pub holidays_in_window: Vec<NaiveDate>,
    pub has_holiday_in_window: bool,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
}
