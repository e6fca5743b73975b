//! Request DTOs for the booking API endpoints.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::engine::models::{PlanType, StayRequest};

/// Request to create a standard (guest-facing) booking
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub plan_type: PlanType,
    pub guest_count: i32,
    pub check_in: NaiveDate,
    /// Optional for a day pass, where it defaults to `check_in`.
    #[serde(default)]
    pub check_out: Option<NaiveDate>,
    #[serde(default)]
    pub property_id: Option<i32>,

    // Guest contact info
    #[serde(default)]
    pub guest_name: Option<String>,
    #[serde(default)]
    pub guest_email: Option<String>,
    #[serde(default)]
    pub guest_phone: Option<String>,
    #[serde(default)]
    pub guest_city: Option<String>,
}

impl CreateBookingRequest {
    /// The stay this request describes. A missing `check_out` means a
    /// single-day stay; the validator decides whether that is legal for
    /// the plan.
    pub fn stay(&self) -> StayRequest {
        StayRequest {
            plan: self.plan_type,
            guest_count: self.guest_count,
            check_in: self.check_in,
            check_out: self.check_out.unwrap_or(self.check_in),
        }
    }
}

/// Request to create an admin manual booking. Eligibility rules are
/// bypassed, pricing is supplied by the admin, and a reason is mandatory.
#[derive(Debug, Deserialize)]
pub struct AdminBookingRequest {
    pub plan_type: PlanType,
    pub guest_count: i32,
    pub check_in: NaiveDate,
    #[serde(default)]
    pub check_out: Option<NaiveDate>,
    #[serde(default)]
    pub property_id: Option<i32>,

    pub reason: String,
    pub subtotal: i64,
    pub cleaning_fee: i64,

    #[serde(default)]
    pub guest_name: Option<String>,
    #[serde(default)]
    pub guest_email: Option<String>,
    #[serde(default)]
    pub guest_phone: Option<String>,
    #[serde(default)]
    pub guest_city: Option<String>,
}

impl AdminBookingRequest {
    pub fn stay(&self) -> StayRequest {
        StayRequest {
            plan: self.plan_type,
            guest_count: self.guest_count,
            check_in: self.check_in,
            check_out: self.check_out.unwrap_or(self.check_in),
        }
    }
}

/// Request to quote a stay without persisting anything (the instant-feedback
/// mirror; the same engine runs again on the real booking call).
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub plan_type: PlanType,
    pub guest_count: i32,
    pub check_in: NaiveDate,
    #[serde(default)]
    pub check_out: Option<NaiveDate>,
    #[serde(default)]
    pub property_id: Option<i32>,
}

impl QuoteRequest {
    pub fn stay(&self) -> StayRequest {
        StayRequest {
            plan: self.plan_type,
            guest_count: self.guest_count,
            check_in: self.check_in,
            check_out: self.check_out.unwrap_or(self.check_in),
        }
    }
}

/// Query for `GET /api/availability`
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default)]
    pub property_id: Option<i32>,
}

/// Query for `GET /api/holidays`
#[derive(Debug, Deserialize)]
pub struct HolidaysQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}
