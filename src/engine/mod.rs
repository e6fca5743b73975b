//! Booking rule & pricing engine for Villa Roli.
//!
//! The canonical authority for reservation eligibility and pricing. Pure and
//! synchronous: callers pass in the server date, the holiday context and the
//! overlap verdict, and get back either a machine-readable rule violation or
//! an integer-COP price breakdown. Validation and pricing are strictly
//! sequenced - a request is never priced unless it validates.

pub mod models;
pub mod pricing;
pub mod rules;

// Re-export commonly used items
pub use models::{
    EngineError, HolidayContext, PlanType, PriceBreakdown, ReservationRequest, RuleCode,
    RuleViolation, StayClass, StayRequest, ValidationResult,
};
pub use pricing::{manual_breakdown, price};
pub use rules::{classify_stay, validate};
