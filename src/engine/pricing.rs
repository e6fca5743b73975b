//! The price calculator.
//!
//! Pure pricing math - no database access, no clock. Only called after
//! validation succeeds; pricing an invalid request is a caller bug and the
//! few remaining guards here report it as a contract error, never as a
//! business-rule failure.
//!
//! All arithmetic is integer COP: guest count x nights x rate, plus fixed
//! fees. No floating point appears at any step.

use crate::config::RateCard;
use crate::engine::models::{
    EngineError, HolidayContext, PlanType, PriceBreakdown, StayClass, StayRequest,
};
use crate::engine::rules::classify_stay;

const CURRENCY: &str = "COP";

/// Price a validated stay against the given rate card.
///
/// Rate selection reuses [`classify_stay`], the same classifier the
/// validator uses, so an accepted weekday request is always priced at the
/// weekday rate.
pub fn price(
    stay: &StayRequest,
    holidays: &HolidayContext,
    rates: &RateCard,
) -> Result<PriceBreakdown, EngineError> {
    if stay.guest_count <= 0 {
        return Err(EngineError::InvalidArgument(format!(
            "guest_count must be positive, got {}",
            stay.guest_count
        )));
    }

    let guests = i64::from(stay.guest_count);

    let breakdown = match stay.plan {
        PlanType::DayPass => {
            let subtotal = rates.day_pass_rate * guests;
            PriceBreakdown {
                nights: 1,
                rate: rates.day_pass_rate,
                subtotal,
                cleaning_fee: 0,
                total: subtotal,
                deposit: rates.deposit,
                currency: CURRENCY.to_string(),
                description: format!(
                    "Pasadía: {} personas x ${} (8 AM - 5 PM, solo exteriores)",
                    stay.guest_count, rates.day_pass_rate
                ),
            }
        }

        PlanType::FamilyPlan => {
            // Flat nightly rate independent of headcount; cleaning is
            // bundled into the rate and reported as 0.
            let nights = stay.nights();
            let subtotal = rates.family_plan_rate * nights;
            PriceBreakdown {
                nights,
                rate: rates.family_plan_rate,
                subtotal,
                cleaning_fee: 0,
                total: subtotal,
                deposit: rates.deposit,
                currency: CURRENCY.to_string(),
                description: format!(
                    "Plan Familia x {} noche(s) (${}/noche, hasta {} personas, aseo incluido)",
                    nights, rates.family_plan_rate, rates.max_family_size
                ),
            }
        }

        PlanType::FullPropertyWeekday
        | PlanType::FullPropertyWeekend
        | PlanType::FullPropertyHoliday => {
            let (rate, label) = match classify_stay(stay, holidays) {
                StayClass::Weekday => (rates.weekday_rate, "entre semana"),
                StayClass::Weekend => (rates.weekend_rate, "fin de semana"),
                StayClass::Holiday => (rates.holiday_rate, "festivo"),
            };
            let nights = stay.nights();
            let subtotal = rate * guests * nights;
            let total = subtotal + rates.cleaning_fee;
            PriceBreakdown {
                nights,
                rate,
                subtotal,
                cleaning_fee: rates.cleaning_fee,
                total,
                deposit: rates.deposit,
                currency: CURRENCY.to_string(),
                description: format!(
                    "{} personas x {} noche(s) x ${} ({}) + aseo ${}",
                    stay.guest_count, nights, rate, label, rates.cleaning_fee
                ),
            }
        }
    };

    Ok(breakdown)
}

/// Admin manual pricing: the admin supplies the amounts directly and the
/// engine only assembles a consistent breakdown.
pub fn manual_breakdown(
    stay: &StayRequest,
    subtotal: i64,
    cleaning_fee: i64,
    rates: &RateCard,
    reason: &str,
) -> Result<PriceBreakdown, EngineError> {
    if subtotal < 0 || cleaning_fee < 0 {
        return Err(EngineError::InvalidArgument(
            "manual amounts must be non-negative".to_string(),
        ));
    }
    let nights = stay.nights();
    Ok(PriceBreakdown {
        nights,
        rate: 0,
        subtotal,
        cleaning_fee,
        total: subtotal + cleaning_fee,
        deposit: rates.deposit,
        currency: CURRENCY.to_string(),
        description: format!("Precio manual (admin): {reason}"),
    })
}
