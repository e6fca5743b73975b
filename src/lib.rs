//! Villa Roli booking service.
//!
//! One canonical rule & pricing engine (`engine`) behind a small Axum API
//! (`booking`). Browser-side copies of the rules are a UX hint only; every
//! reservation is re-validated and re-priced here before it is stored.

pub mod booking;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod holidays;

use std::sync::Arc;

use sqlx::PgPool;

use crate::cache::HolidayCache;
use crate::config::RateCard;
use crate::holidays::WindowPolicy;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub holidays: HolidayCache,
    pub rates: Arc<RateCard>,
    pub window: WindowPolicy,
    pub default_property_id: i32,
}
