//! Core types for the booking rule & pricing engine.
//!
//! Everything here is plain data: the engine is a pure function of these
//! inputs plus a [`RateCard`](crate::config::RateCard). Dates are calendar
//! dates (day granularity, single canonical timezone); money is integer COP.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The category of stay. Each plan carries its own eligibility and
/// pricing rules (see `engine::rules` / `engine::pricing`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "text", rename_all = "snake_case")]
pub enum PlanType {
    /// Day use only (8 AM - 5 PM), exteriors, no cabins. Any group size.
    DayPass,
    /// Whole property, Monday-Thursday nights only, no holidays nearby.
    FullPropertyWeekday,
    /// Whole property, Friday-Sunday nights, standard (non-holiday) weekend.
    FullPropertyWeekend,
    /// Whole property on a long weekend with a public holiday in the window.
    FullPropertyHoliday,
    /// Cabin #3 only, up to 5 people, exactly one night.
    FamilyPlan,
}

impl PlanType {
    pub fn is_full_property(self) -> bool {
        matches!(
            self,
            PlanType::FullPropertyWeekday
                | PlanType::FullPropertyWeekend
                | PlanType::FullPropertyHoliday
        )
    }
}

/// The dates and headcount of a requested stay.
///
/// For [`PlanType::DayPass`] the stay is a single calendar day and
/// `check_out` must equal `check_in`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StayRequest {
    pub plan: PlanType,
    pub guest_count: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayRequest {
    /// Number of nights, counting a day pass as 1.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days().max(1)
    }

    /// The calendar dates the stay occupies: `[check_in, check_out)`.
    /// A night "occupies" the date it begins on.
    pub fn occupied_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.check_in
            .iter_days()
            .take_while(|d| *d < self.check_out)
    }
}

/// A reservation request. The admin-override path is a distinct variant so
/// the type system guarantees a reason accompanies every override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationRequest {
    Standard(StayRequest),
    AdminOverride { stay: StayRequest, reason: String },
}

impl ReservationRequest {
    pub fn stay(&self) -> &StayRequest {
        match self {
            ReservationRequest::Standard(stay) => stay,
            ReservationRequest::AdminOverride { stay, .. } => stay,
        }
    }

    pub fn is_override(&self) -> bool {
        matches!(self, ReservationRequest::AdminOverride { .. })
    }
}

/// Holiday calendar context for one requested stay, supplied by the caller.
///
/// `in_range` holds holidays strictly within `[check_in, check_out)`;
/// `in_window` holds holidays within the extended classification window
/// (see `holidays::WindowPolicy`). A non-empty window classifies the stay
/// as holiday-adjacent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayContext {
    pub in_range: BTreeSet<NaiveDate>,
    pub in_window: BTreeSet<NaiveDate>,
}

impl HolidayContext {
    pub fn has_holiday_in_window(&self) -> bool {
        !self.in_window.is_empty()
    }
}

/// How a stay's nights are rated. Derived once by `rules::classify_stay`
/// and shared by validation and pricing so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StayClass {
    Weekday,
    Weekend,
    Holiday,
}

/// Machine-readable rule violation codes, one per validator rule.
/// Serialized as the fixed wire strings (e.g. `PAST_DATE_NOT_ALLOWED`)
/// so any client can map them to localized copy without string-matching
/// prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleCode {
    PastDateNotAllowed,
    MinNightsRequired,
    DayPassInvalidRange,
    MinPeopleNotMet,
    InvalidWeekdayDates,
    InvalidWeekendDates,
    HolidayRequired,
    PlanNotAllowedOnHoliday,
    FamilyPlanLimitExceeded,
    FamilyPlanOneNight,
    OverbookingNotAllowed,
}

impl RuleCode {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleCode::PastDateNotAllowed => "PAST_DATE_NOT_ALLOWED",
            RuleCode::MinNightsRequired => "MIN_NIGHTS_REQUIRED",
            RuleCode::DayPassInvalidRange => "DAY_PASS_INVALID_RANGE",
            RuleCode::MinPeopleNotMet => "MIN_PEOPLE_NOT_MET",
            RuleCode::InvalidWeekdayDates => "INVALID_WEEKDAY_DATES",
            RuleCode::InvalidWeekendDates => "INVALID_WEEKEND_DATES",
            RuleCode::HolidayRequired => "HOLIDAY_REQUIRED",
            RuleCode::PlanNotAllowedOnHoliday => "PLAN_NOT_ALLOWED_ON_HOLIDAY",
            RuleCode::FamilyPlanLimitExceeded => "FAMILY_PLAN_LIMIT_EXCEEDED",
            RuleCode::FamilyPlanOneNight => "FAMILY_PLAN_ONE_NIGHT",
            RuleCode::OverbookingNotAllowed => "OVERBOOKING_NOT_ALLOWED",
        }
    }
}

impl std::fmt::Display for RuleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A business-rule violation: the expected, non-exceptional outcome of
/// validating an ineligible request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolation {
    pub code: RuleCode,
    pub message: String,
}

impl RuleViolation {
    pub fn new(code: RuleCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for RuleViolation {}

/// Engine failure: either an expected rule violation or a caller contract
/// breach (malformed input). Collaborator failures never reach the engine;
/// the caller surfaces those as an indeterminate outcome instead.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("{0}")]
    Rule(#[from] RuleViolation),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Serializable validation verdict for API consumers (the quote endpoint).
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<RuleCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error_code: None,
            message: None,
        }
    }
}

impl From<&RuleViolation> for ValidationResult {
    fn from(violation: &RuleViolation) -> Self {
        Self {
            is_valid: false,
            error_code: Some(violation.code),
            message: Some(violation.message.clone()),
        }
    }
}

/// How a priced reservation breaks down. All amounts are integer COP and
/// `total == subtotal + cleaning_fee` always holds. The deposit is reported
/// for display but is not part of the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub nights: i64,
    /// Per person per night, per person for a day pass, flat for the
    /// family plan.
    pub rate: i64,
    pub subtotal: i64,
    pub cleaning_fee: i64,
    pub total: i64,
    pub deposit: i64,
    pub currency: String,
    pub description: String,
}
