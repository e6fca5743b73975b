//! Colombian public-holiday calendar and the holiday-window classifier.
//!
//! Holidays come in four kinds: fixed dates that never move, fixed dates
//! observed the following Monday (Ley Emiliani), Easter-relative dates that
//! never move (Maundy Thursday, Good Friday) and Easter-relative dates
//! observed the following Monday (Ascension, Corpus Christi, Sacred Heart).

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::engine::models::HolidayContext;

/// Easter Sunday for a given year (anonymous Gregorian computus).
pub fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;

    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .expect("computus always yields a valid March/April date")
}

/// Ley Emiliani observance: holidays that move are celebrated on the
/// following Monday, unless they already fall on one.
pub fn observed_monday(d: NaiveDate) -> NaiveDate {
    if d.weekday() == Weekday::Mon {
        return d;
    }
    let days_ahead = 7 - i64::from(d.weekday().num_days_from_monday());
    d + Duration::days(days_ahead)
}

/// All Colombian public holidays for a year, observance shifts applied.
pub fn colombian_holidays(year: i32) -> BTreeSet<NaiveDate> {
    let mut holidays = BTreeSet::new();
    let ymd = |m, d| NaiveDate::from_ymd_opt(year, m, d).expect("valid fixed holiday date");

    // Fixed, never move.
    for (month, day) in [(1, 1), (5, 1), (7, 20), (8, 7), (12, 8), (12, 25)] {
        holidays.insert(ymd(month, day));
    }

    // Fixed, observed the following Monday.
    for (month, day) in [(1, 6), (3, 19), (6, 29), (8, 15), (10, 12), (11, 1), (11, 11)] {
        holidays.insert(observed_monday(ymd(month, day)));
    }

    let easter = easter_sunday(year);
    // Maundy Thursday and Good Friday never move.
    holidays.insert(easter - Duration::days(3));
    holidays.insert(easter - Duration::days(2));
    // Ascension (+39), Corpus Christi (+60), Sacred Heart (+68) are
    // observed the following Monday.
    for offset in [39, 60, 68] {
        holidays.insert(observed_monday(easter + Duration::days(offset)));
    }

    holidays
}

/// How far the classification window extends around a stay.
///
/// The window anchors on the Sunday associated with the check-in (the
/// coming Sunday, or the previous one when checking in on a Monday) and
/// spans `days_before_anchor` back and `days_after_anchor` forward. The
/// default reproduces the Thursday-to-Monday span the property uses to
/// decide whether a weekend is a "puente".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPolicy {
    pub days_before_anchor: i64,
    pub days_after_anchor: i64,
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self {
            days_before_anchor: 3,
            days_after_anchor: 1,
        }
    }
}

impl WindowPolicy {
    /// The inclusive `[start, end]` window for a stay starting on `check_in`.
    pub fn window_for(&self, check_in: NaiveDate) -> (NaiveDate, NaiveDate) {
        let anchor_sunday = match check_in.weekday() {
            Weekday::Sun => check_in,
            Weekday::Mon => check_in - Duration::days(1),
            other => {
                let to_sunday = 6 - i64::from(other.num_days_from_monday());
                check_in + Duration::days(to_sunday)
            }
        };
        (
            anchor_sunday - Duration::days(self.days_before_anchor),
            anchor_sunday + Duration::days(self.days_after_anchor),
        )
    }
}

/// Build the [`HolidayContext`] for a stay from a merged holiday set.
///
/// `holidays` must cover every year the stay and its window can touch.
/// Range holidays are the half-open `[check_in, check_out)`; window
/// holidays use the inclusive window from the policy.
pub fn build_context(
    check_in: NaiveDate,
    check_out: NaiveDate,
    policy: WindowPolicy,
    holidays: &BTreeSet<NaiveDate>,
) -> HolidayContext {
    let (window_start, window_end) = policy.window_for(check_in);

    let in_range = holidays
        .iter()
        .copied()
        .filter(|d| *d >= check_in && *d < check_out)
        .collect();
    let in_window = holidays
        .iter()
        .copied()
        .filter(|d| *d >= window_start && *d <= window_end)
        .collect();

    HolidayContext { in_range, in_window }
}
