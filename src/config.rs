//! Application and pricing configuration.
//!
//! Rates are injected as an immutable [`RateCard`] rather than read from
//! module globals, so they can vary per property or season and tests can
//! supply fixed values.

use std::env;

/// 2026 rate card for Villa Roli. All amounts are integer COP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateCard {
    /// Day pass, per person (8 AM - 5 PM, exteriors only).
    pub day_pass_rate: i64,
    /// Full property, per person per night, Monday-Thursday.
    pub weekday_rate: i64,
    /// Full property, per person per night, standard weekend.
    pub weekend_rate: i64,
    /// Full property, per person per night, holiday weekend.
    pub holiday_rate: i64,
    /// Family plan flat rate per night, cleaning included.
    pub family_plan_rate: i64,
    /// Cleaning fee for full-property stays, not included in the nightly rate.
    pub cleaning_fee: i64,
    /// Refundable damage deposit, reported alongside the breakdown.
    pub deposit: i64,
    /// Minimum group size for full-property plans.
    pub min_group_size: i32,
    /// Family plan headcount cap (cabin #3 only).
    pub max_family_size: i32,
    /// Total sleeping capacity across the three cabins.
    pub capacity: i32,
    /// Extra check-in/check-out hour, tiered by group size.
    pub extra_hour_small: i64,
    pub extra_hour_medium: i64,
    pub extra_hour_large: i64,
}

impl Default for RateCard {
    fn default() -> Self {
        Self {
            day_pass_rate: 25_000,
            weekday_rate: 55_000,
            weekend_rate: 60_000,
            holiday_rate: 70_000,
            family_plan_rate: 420_000,
            cleaning_fee: 70_000,
            deposit: 200_000,
            min_group_size: 10,
            max_family_size: 5,
            capacity: 37,
            extra_hour_small: 50_000,
            extra_hour_medium: 70_000,
            extra_hour_large: 100_000,
        }
    }
}

impl RateCard {
    /// Price of one extra hour (early check-in or late check-out) for a
    /// group of the given size. Tiers: up to 10, 11-30, 31 and above.
    pub fn extra_hour_rate(&self, guest_count: i32) -> i64 {
        if guest_count <= 10 {
            self.extra_hour_small
        } else if guest_count <= 30 {
            self.extra_hour_medium
        } else {
            self.extra_hour_large
        }
    }
}

/// Process configuration read from the environment (.env supported).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    /// Single-property deployment; requests may still override per call.
    pub default_property_id: i32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let default_property_id = env::var("PROPERTY_ID")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);

        Ok(Self {
            database_url,
            bind_addr,
            default_property_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_hour_tiers() {
        let rates = RateCard::default();
        assert_eq!(rates.extra_hour_rate(5), 50_000);
        assert_eq!(rates.extra_hour_rate(10), 50_000);
        assert_eq!(rates.extra_hour_rate(11), 70_000);
        assert_eq!(rates.extra_hour_rate(30), 70_000);
        assert_eq!(rates.extra_hour_rate(31), 100_000);
        assert_eq!(rates.extra_hour_rate(40), 100_000);
    }

    #[test]
    fn test_default_rates_are_2026_card() {
        let rates = RateCard::default();
        assert_eq!(rates.day_pass_rate, 25_000);
        assert_eq!(rates.weekday_rate, 55_000);
        assert_eq!(rates.weekend_rate, 60_000);
        assert_eq!(rates.holiday_rate, 70_000);
        assert_eq!(rates.family_plan_rate, 420_000);
        assert_eq!(rates.cleaning_fee, 70_000);
        assert_eq!(rates.deposit, 200_000);
    }
}
