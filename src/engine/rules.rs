//! The booking validator.
//!
//! Pure rule evaluation - no clock, no database. The caller supplies the
//! server date, the holiday context and the overlap verdict. Rules run in a
//! fixed order and the first failure wins.
//!
//! Admin overrides bypass the eligibility rules (occupancy, date windows,
//! family-plan limits) but never the past-date or overbooking checks, and
//! never the structural checks (minimum duration, day-pass single day).

use chrono::{Datelike, NaiveDate, Weekday};

use crate::config::RateCard;
use crate::engine::models::{
    EngineError, HolidayContext, PlanType, ReservationRequest, RuleCode, RuleViolation, StayClass,
    StayRequest,
};

/// Monday-Thursday nights rate as weekday.
pub fn is_weekday_night(d: NaiveDate) -> bool {
    matches!(
        d.weekday(),
        Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu
    )
}

/// Friday, Saturday and Sunday nights rate as weekend.
pub fn is_weekend_night(d: NaiveDate) -> bool {
    matches!(d.weekday(), Weekday::Fri | Weekday::Sat | Weekday::Sun)
}

/// Classify a stay for rating purposes. Validation and pricing both go
/// through here, so "this plan is valid" and "this stay is priced at rate X"
/// can never disagree.
///
/// A holiday anywhere in the classification window makes the whole stay a
/// holiday stay; otherwise the stay is weekday only if every occupied night
/// is Monday-Thursday.
pub fn classify_stay(stay: &StayRequest, holidays: &HolidayContext) -> StayClass {
    if holidays.has_holiday_in_window() {
        StayClass::Holiday
    } else if stay.occupied_dates().all(is_weekday_night) {
        StayClass::Weekday
    } else {
        StayClass::Weekend
    }
}

/// Validate a reservation request against the business rules.
///
/// `today` is the authoritative server date and `has_overlap` is the
/// availability service's verdict for `[check_in, check_out)`. Returns
/// `Ok(())` for an eligible request, a [`RuleViolation`] for an expected
/// business-rule failure, and [`EngineError::InvalidArgument`] only for
/// caller contract breaches (non-positive headcount, empty override reason).
pub fn validate(
    request: &ReservationRequest,
    holidays: &HolidayContext,
    rates: &RateCard,
    today: NaiveDate,
    has_overlap: bool,
) -> Result<(), EngineError> {
    let stay = request.stay();

    if stay.guest_count <= 0 {
        return Err(EngineError::InvalidArgument(format!(
            "guest_count must be positive, got {}",
            stay.guest_count
        )));
    }
    if let ReservationRequest::AdminOverride { reason, .. } = request {
        if reason.trim().is_empty() {
            return Err(EngineError::InvalidArgument(
                "an admin override requires a non-empty reason".to_string(),
            ));
        }
    }

    // Past dates are rejected unconditionally, override or not.
    if stay.check_in < today {
        return Err(violation(
            RuleCode::PastDateNotAllowed,
            "No puedes reservar fechas pasadas.",
        ));
    }

    if stay.plan == PlanType::DayPass {
        // A day pass is a single calendar day; arrival equals departure.
        if stay.check_out != stay.check_in {
            return Err(violation(
                RuleCode::DayPassInvalidRange,
                "El plan Pasadía es de un solo día (Llegada = Salida).",
            ));
        }
    } else if stay.check_out <= stay.check_in {
        return Err(violation(
            RuleCode::MinNightsRequired,
            "La fecha de salida debe ser posterior a la de llegada.",
        ));
    }

    if !request.is_override() {
        validate_plan_eligibility(stay, holidays, rates)?;
    }

    // Overbooking is checked last and can never be overridden.
    if has_overlap {
        return Err(violation(
            RuleCode::OverbookingNotAllowed,
            "Las fechas seleccionadas ya no están disponibles.",
        ));
    }

    Ok(())
}

/// The eligibility rules an admin override is allowed to bypass.
fn validate_plan_eligibility(
    stay: &StayRequest,
    holidays: &HolidayContext,
    rates: &RateCard,
) -> Result<(), EngineError> {
    match stay.plan {
        PlanType::DayPass => {}

        PlanType::FullPropertyWeekday => {
            require_min_group(stay, rates.min_group_size)?;
            for night in stay.occupied_dates() {
                if !is_weekday_night(night) {
                    return Err(violation(
                        RuleCode::InvalidWeekdayDates,
                        "Este plan solo se puede reservar de lunes a jueves.",
                    ));
                }
            }
            if holidays.has_holiday_in_window() {
                return Err(violation(
                    RuleCode::PlanNotAllowedOnHoliday,
                    "Hay un festivo en estas fechas. Debes seleccionar el plan Finca Completa - Festivo.",
                ));
            }
        }

        PlanType::FullPropertyWeekend => {
            require_min_group(stay, rates.min_group_size)?;
            for night in stay.occupied_dates() {
                if !is_weekend_night(night) {
                    return Err(violation(
                        RuleCode::InvalidWeekendDates,
                        "El plan Fin de Semana solo permite noches de viernes, sábado o domingo.",
                    ));
                }
            }
            // Holiday-adjacent weekends must use the holiday plan instead.
            if holidays.has_holiday_in_window() {
                return Err(violation(
                    RuleCode::PlanNotAllowedOnHoliday,
                    "Es un fin de semana con festivo (puente). Debes seleccionar el plan Finca Completa - Festivo.",
                ));
            }
        }

        PlanType::FullPropertyHoliday => {
            require_min_group(stay, rates.min_group_size)?;
            if !holidays.has_holiday_in_window() {
                return Err(violation(
                    RuleCode::HolidayRequired,
                    "Este plan solo aplica para fechas con un día festivo asociado. Selecciona el plan Fin de Semana estándar.",
                ));
            }
        }

        PlanType::FamilyPlan => {
            if stay.guest_count > rates.max_family_size {
                return Err(violation(
                    RuleCode::FamilyPlanLimitExceeded,
                    "El Plan Familia es válido solo para máximo 5 personas.",
                ));
            }
            if (stay.check_out - stay.check_in).num_days() != 1 {
                return Err(violation(
                    RuleCode::FamilyPlanOneNight,
                    "El Plan Familia es para exactamente 1 noche.",
                ));
            }
            if holidays.has_holiday_in_window() {
                return Err(violation(
                    RuleCode::PlanNotAllowedOnHoliday,
                    "El Plan Familia no aplica en fines de semana con festivo.",
                ));
            }
        }
    }

    Ok(())
}

fn require_min_group(stay: &StayRequest, min: i32) -> Result<(), EngineError> {
    if stay.guest_count < min {
        return Err(violation(
            RuleCode::MinPeopleNotMet,
            format!("Se requiere un mínimo de {min} personas para este plan."),
        ));
    }
    Ok(())
}

fn violation(code: RuleCode, message: impl Into<String>) -> EngineError {
    EngineError::Rule(RuleViolation::new(code, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    // 2026-02-02 is a Monday in a week with no Colombian holidays.
    const TODAY: (i32, u32, u32) = (2026, 1, 15);

    fn today() -> NaiveDate {
        d(TODAY.0, TODAY.1, TODAY.2)
    }

    fn rates() -> RateCard {
        RateCard::default()
    }

    fn stay(plan: PlanType, guests: i32, check_in: NaiveDate, check_out: NaiveDate) -> StayRequest {
        StayRequest {
            plan,
            guest_count: guests,
            check_in,
            check_out,
        }
    }

    fn standard(s: StayRequest) -> ReservationRequest {
        ReservationRequest::Standard(s)
    }

    fn no_holidays() -> HolidayContext {
        HolidayContext::default()
    }

    fn holiday_window(dates: &[NaiveDate]) -> HolidayContext {
        HolidayContext {
            in_range: BTreeSet::new(),
            in_window: dates.iter().copied().collect(),
        }
    }

    fn code_of(result: Result<(), EngineError>) -> RuleCode {
        match result.unwrap_err() {
            EngineError::Rule(v) => v.code,
            other => panic!("expected rule violation, got {other:?}"),
        }
    }

    #[test]
    fn test_past_date_rejected() {
        let req = standard(stay(
            PlanType::FullPropertyWeekday,
            12,
            d(2026, 1, 5),
            d(2026, 1, 7),
        ));
        assert_eq!(
            code_of(validate(&req, &no_holidays(), &rates(), today(), false)),
            RuleCode::PastDateNotAllowed
        );
    }

    #[test]
    fn test_past_date_rejected_even_with_override() {
        let req = ReservationRequest::AdminOverride {
            stay: stay(PlanType::FullPropertyWeekday, 2, d(2026, 1, 5), d(2026, 1, 7)),
            reason: "walk-in group".to_string(),
        };
        assert_eq!(
            code_of(validate(&req, &no_holidays(), &rates(), today(), false)),
            RuleCode::PastDateNotAllowed
        );
    }

    #[test]
    fn test_min_nights_required() {
        let req = standard(stay(
            PlanType::FullPropertyWeekend,
            12,
            d(2026, 2, 6),
            d(2026, 2, 6),
        ));
        assert_eq!(
            code_of(validate(&req, &no_holidays(), &rates(), today(), false)),
            RuleCode::MinNightsRequired
        );
    }

    #[test]
    fn test_day_pass_must_be_single_day() {
        let req = standard(stay(PlanType::DayPass, 8, d(2026, 2, 2), d(2026, 2, 3)));
        assert_eq!(
            code_of(validate(&req, &no_holidays(), &rates(), today(), false)),
            RuleCode::DayPassInvalidRange
        );
    }

    #[test]
    fn test_day_pass_any_group_size_is_valid() {
        let req = standard(stay(PlanType::DayPass, 40, d(2026, 2, 2), d(2026, 2, 2)));
        assert!(validate(&req, &no_holidays(), &rates(), today(), false).is_ok());
    }

    #[test]
    fn test_weekday_plan_monday_to_wednesday_valid() {
        // Mon 2026-02-02 to Wed 2026-02-04: nights Mon, Tue.
        let req = standard(stay(
            PlanType::FullPropertyWeekday,
            12,
            d(2026, 2, 2),
            d(2026, 2, 4),
        ));
        assert!(validate(&req, &no_holidays(), &rates(), today(), false).is_ok());
    }

    #[test]
    fn test_weekday_plan_rejects_friday_night() {
        // Thu 2026-02-05 to Sat 2026-02-07 includes a Friday night.
        let req = standard(stay(
            PlanType::FullPropertyWeekday,
            12,
            d(2026, 2, 5),
            d(2026, 2, 7),
        ));
        assert_eq!(
            code_of(validate(&req, &no_holidays(), &rates(), today(), false)),
            RuleCode::InvalidWeekdayDates
        );
    }

    #[test]
    fn test_weekday_plan_rejects_holiday_window() {
        let req = standard(stay(
            PlanType::FullPropertyWeekday,
            12,
            d(2026, 3, 23),
            d(2026, 3, 25),
        ));
        // San José observed Monday 2026-03-23.
        let ctx = holiday_window(&[d(2026, 3, 23)]);
        assert_eq!(
            code_of(validate(&req, &ctx, &rates(), today(), false)),
            RuleCode::PlanNotAllowedOnHoliday
        );
    }

    #[test]
    fn test_weekday_plan_min_people() {
        let req = standard(stay(
            PlanType::FullPropertyWeekday,
            9,
            d(2026, 2, 2),
            d(2026, 2, 4),
        ));
        assert_eq!(
            code_of(validate(&req, &no_holidays(), &rates(), today(), false)),
            RuleCode::MinPeopleNotMet
        );
    }

    #[test]
    fn test_weekend_plan_friday_to_sunday_valid() {
        // Fri 2026-02-06 to Sun 2026-02-08: nights Fri, Sat.
        let req = standard(stay(
            PlanType::FullPropertyWeekend,
            10,
            d(2026, 2, 6),
            d(2026, 2, 8),
        ));
        assert!(validate(&req, &no_holidays(), &rates(), today(), false).is_ok());
    }

    #[test]
    fn test_weekend_plan_rejects_weekday_night() {
        // Thu 2026-02-05 night is not a weekend night.
        let req = standard(stay(
            PlanType::FullPropertyWeekend,
            10,
            d(2026, 2, 5),
            d(2026, 2, 8),
        ));
        assert_eq!(
            code_of(validate(&req, &no_holidays(), &rates(), today(), false)),
            RuleCode::InvalidWeekendDates
        );
    }

    #[test]
    fn test_weekend_plan_rejects_holiday_weekend() {
        // Friday stay whose window contains an observed holiday Monday.
        let req = standard(stay(
            PlanType::FullPropertyWeekend,
            10,
            d(2026, 6, 26),
            d(2026, 6, 28),
        ));
        let ctx = holiday_window(&[d(2026, 6, 29)]);
        assert_eq!(
            code_of(validate(&req, &ctx, &rates(), today(), false)),
            RuleCode::PlanNotAllowedOnHoliday
        );
    }

    #[test]
    fn test_holiday_plan_requires_holiday() {
        let req = standard(stay(
            PlanType::FullPropertyHoliday,
            10,
            d(2026, 2, 6),
            d(2026, 2, 8),
        ));
        assert_eq!(
            code_of(validate(&req, &no_holidays(), &rates(), today(), false)),
            RuleCode::HolidayRequired
        );
    }

    #[test]
    fn test_holiday_plan_valid_on_long_weekend() {
        let req = standard(stay(
            PlanType::FullPropertyHoliday,
            10,
            d(2026, 6, 26),
            d(2026, 6, 29),
        ));
        let ctx = holiday_window(&[d(2026, 6, 29)]);
        assert!(validate(&req, &ctx, &rates(), today(), false).is_ok());
    }

    #[test]
    fn test_family_plan_limit() {
        let req = standard(stay(PlanType::FamilyPlan, 6, d(2026, 2, 2), d(2026, 2, 3)));
        assert_eq!(
            code_of(validate(&req, &no_holidays(), &rates(), today(), false)),
            RuleCode::FamilyPlanLimitExceeded
        );
    }

    #[test]
    fn test_family_plan_exactly_one_night() {
        let req = standard(stay(PlanType::FamilyPlan, 4, d(2026, 2, 2), d(2026, 2, 4)));
        assert_eq!(
            code_of(validate(&req, &no_holidays(), &rates(), today(), false)),
            RuleCode::FamilyPlanOneNight
        );
    }

    #[test]
    fn test_family_plan_blocked_on_holiday_weekend() {
        let req = standard(stay(PlanType::FamilyPlan, 4, d(2026, 6, 27), d(2026, 6, 28)));
        let ctx = holiday_window(&[d(2026, 6, 29)]);
        assert_eq!(
            code_of(validate(&req, &ctx, &rates(), today(), false)),
            RuleCode::PlanNotAllowedOnHoliday
        );
    }

    #[test]
    fn test_family_plan_valid() {
        let req = standard(stay(PlanType::FamilyPlan, 5, d(2026, 2, 2), d(2026, 2, 3)));
        assert!(validate(&req, &no_holidays(), &rates(), today(), false).is_ok());
    }

    #[test]
    fn test_overlap_always_rejected() {
        let req = standard(stay(
            PlanType::FullPropertyWeekend,
            10,
            d(2026, 2, 6),
            d(2026, 2, 8),
        ));
        assert_eq!(
            code_of(validate(&req, &no_holidays(), &rates(), today(), true)),
            RuleCode::OverbookingNotAllowed
        );
    }

    #[test]
    fn test_overlap_rejected_even_with_override() {
        let req = ReservationRequest::AdminOverride {
            stay: stay(PlanType::FullPropertyWeekend, 3, d(2026, 2, 6), d(2026, 2, 8)),
            reason: "repeat customer".to_string(),
        };
        assert_eq!(
            code_of(validate(&req, &no_holidays(), &rates(), today(), true)),
            RuleCode::OverbookingNotAllowed
        );
    }

    #[test]
    fn test_override_bypasses_eligibility_rules() {
        // 3 people, weekday plan on a holiday-window weekend: every
        // eligibility rule would fail, the override accepts it.
        let req = ReservationRequest::AdminOverride {
            stay: stay(PlanType::FullPropertyWeekday, 3, d(2026, 6, 26), d(2026, 6, 28)),
            reason: "owner's guests".to_string(),
        };
        let ctx = holiday_window(&[d(2026, 6, 29)]);
        assert!(validate(&req, &ctx, &rates(), today(), false).is_ok());
    }

    #[test]
    fn test_override_requires_reason() {
        let req = ReservationRequest::AdminOverride {
            stay: stay(PlanType::FullPropertyWeekday, 3, d(2026, 2, 2), d(2026, 2, 4)),
            reason: "  ".to_string(),
        };
        assert!(matches!(
            validate(&req, &no_holidays(), &rates(), today(), false),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_override_still_requires_min_nights() {
        let req = ReservationRequest::AdminOverride {
            stay: stay(PlanType::FullPropertyWeekday, 3, d(2026, 2, 4), d(2026, 2, 2)),
            reason: "manual".to_string(),
        };
        assert_eq!(
            code_of(validate(&req, &no_holidays(), &rates(), today(), false)),
            RuleCode::MinNightsRequired
        );
    }

    #[test]
    fn test_non_positive_guest_count_is_contract_error() {
        let req = standard(stay(PlanType::DayPass, 0, d(2026, 2, 2), d(2026, 2, 2)));
        assert!(matches!(
            validate(&req, &no_holidays(), &rates(), today(), false),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_validate_is_idempotent() {
        let req = standard(stay(
            PlanType::FullPropertyWeekday,
            12,
            d(2026, 2, 2),
            d(2026, 2, 4),
        ));
        let first = validate(&req, &no_holidays(), &rates(), today(), false);
        let second = validate(&req, &no_holidays(), &rates(), today(), false);
        assert_eq!(first, second);
    }

    #[test]
    fn test_classification_matches_validation() {
        // A stay the validator accepts as weekday must classify as weekday.
        let s = stay(PlanType::FullPropertyWeekday, 12, d(2026, 2, 2), d(2026, 2, 4));
        let ctx = no_holidays();
        assert!(validate(&standard(s.clone()), &ctx, &rates(), today(), false).is_ok());
        assert_eq!(classify_stay(&s, &ctx), StayClass::Weekday);

        let s = stay(PlanType::FullPropertyWeekend, 10, d(2026, 2, 6), d(2026, 2, 8));
        assert!(validate(&standard(s.clone()), &ctx, &rates(), today(), false).is_ok());
        assert_eq!(classify_stay(&s, &ctx), StayClass::Weekend);

        let s = stay(PlanType::FullPropertyHoliday, 10, d(2026, 6, 26), d(2026, 6, 29));
        let holiday_ctx = holiday_window(&[d(2026, 6, 29)]);
        assert!(validate(&standard(s.clone()), &holiday_ctx, &rates(), today(), false).is_ok());
        assert_eq!(classify_stay(&s, &holiday_ctx), StayClass::Holiday);
    }
}
