//! Booking store and API surface.
//!
//! The engine in `crate::engine` decides; this module persists. It owns the
//! HTTP handlers, the DTOs, the sqlx queries and the transactional
//! check-and-reserve that keeps two requests from committing overlapping
//! stays.

pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use models::{BookingRecord, BookingStatus, NewBooking, PaymentStatus};
pub use routes::router;
pub use services::GuestContact;
