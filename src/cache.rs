//! In-memory caching using moka
//!
//! Holiday sets change at most when an admin edits the overrides table, so
//! the merged per-year calendar (algorithmic holidays plus DB overrides) is
//! cached aggressively and rebuilt on a TTL.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;

use crate::booking::queries;
use crate::error::Result;

/// Application cache holding merged holiday calendars per year
#[derive(Clone)]
pub struct HolidayCache {
    /// year -> merged set of algorithmic holidays and DB overrides
    years: Cache<i32, Arc<BTreeSet<NaiveDate>>>,
}

impl HolidayCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // A handful of years at most, 1 hour TTL so override edits
            // show up without a restart.
            years: Cache::builder()
                .max_capacity(10)
                .time_to_live(Duration::from_secs(60 * 60))
                .build(),
        }
    }

    /// Merged holidays for one year: the algorithmic Colombian calendar
    /// unioned with any rows in the overrides table.
    pub async fn holidays_for_year(
        &self,
        pool: &PgPool,
        year: i32,
    ) -> Result<Arc<BTreeSet<NaiveDate>>> {
        if let Some(cached) = self.years.get(&year).await {
            tracing::debug!("Cache HIT for holiday year: {}", year);
            return Ok(cached);
        }
        tracing::debug!("Cache MISS for holiday year: {}", year);

        let mut merged = crate::holidays::colombian_holidays(year);
        let overrides = queries::holiday_overrides_for_year(pool, year).await?;
        merged.extend(overrides);

        let merged = Arc::new(merged);
        self.years.insert(year, Arc::clone(&merged)).await;
        Ok(merged)
    }

    /// Merged holidays for every year a date span touches.
    pub async fn holidays_between(
        &self,
        pool: &PgPool,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BTreeSet<NaiveDate>> {
        use chrono::Datelike;

        let mut merged = BTreeSet::new();
        for year in start.year()..=end.year() {
            let set = self.holidays_for_year(pool, year).await?;
            merged.extend(set.iter().copied());
        }
        Ok(merged)
    }

    /// Invalidate all cached years (after an override edit)
    pub fn invalidate_all(&self) {
        self.years.invalidate_all();
        info!("Holiday cache invalidated");
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            years_cached: self.years.entry_count(),
        }
    }
}

impl Default for HolidayCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub years_cached: u64,
}
