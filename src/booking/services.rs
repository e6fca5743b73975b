//! Booking service functions with database access.
//!
//! The pure engine decides eligibility and price; this layer assembles its
//! inputs (holiday context, server date, overlap verdict) and owns the
//! transactional check-and-reserve against the store.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::booking::models::{BookingRecord, NewBooking};
use crate::booking::queries;
use crate::engine::models::{
    EngineError, HolidayContext, PriceBreakdown, ReservationRequest, RuleCode, RuleViolation,
    StayRequest,
};
use crate::engine::{price, validate};
use crate::error::{AppError, Result};
use crate::AppState;

/// How long a PENDING booking holds its dates before the sweeper releases
/// them.
const PENDING_HOLD_HOURS: i64 = 48;

/// Guest contact details accompanying a reservation.
#[derive(Debug, Clone, Default)]
pub struct GuestContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
}

/// Build the holiday context for a date range from the cached merged
/// calendar.
pub async fn holiday_context(
    state: &AppState,
    check_in: chrono::NaiveDate,
    check_out: chrono::NaiveDate,
) -> Result<HolidayContext> {
    let (window_start, _) = state.window.window_for(check_in);
    // Cover every year the range or the window can touch.
    let span_start = window_start.min(check_in);
    let span_end = check_out.max(check_in) + Duration::days(7);

    let holidays = state
        .holidays
        .holidays_between(&state.db, span_start, span_end)
        .await?;

    Ok(crate::holidays::build_context(
        check_in,
        check_out,
        state.window,
        &holidays,
    ))
}

/// Validate and price a stay without touching the store (quote path).
/// The overlap verdict comes from a read-only probe; the authoritative
/// check re-runs inside the reservation transaction.
pub async fn quote(
    state: &AppState,
    stay: &StayRequest,
    property_id: i32,
) -> Result<std::result::Result<PriceBreakdown, RuleViolation>> {
    let holidays = holiday_context(state, stay.check_in, stay.check_out).await?;
    let today = Utc::now().date_naive();
    let available =
        queries::is_available(&state.db, property_id, stay.check_in, stay.check_out).await?;

    let request = ReservationRequest::Standard(stay.clone());
    match validate(&request, &holidays, &state.rates, today, !available) {
        Ok(()) => {
            let breakdown = price(stay, &holidays, &state.rates)?;
            Ok(Ok(breakdown))
        }
        Err(EngineError::Rule(violation)) => Ok(Err(violation)),
        Err(err @ EngineError::InvalidArgument(_)) => Err(err.into()),
    }
}

/// Create a booking: validate, price, then atomically check-and-reserve.
///
/// For the standard path the breakdown comes from the engine; an admin
/// override supplies `manual` amounts instead. Either way the overlap check
/// runs locked inside the insert transaction, and the exclusion constraint
/// backstops any race the locked read cannot see.
pub async fn create_booking(
    state: &AppState,
    request: &ReservationRequest,
    contact: GuestContact,
    manual: Option<PriceBreakdown>,
    property_id: i32,
) -> Result<(BookingRecord, PriceBreakdown)> {
    let stay = request.stay();
    let holidays = holiday_context(state, stay.check_in, stay.check_out).await?;
    let today = Utc::now().date_naive();

    // Eligibility first, with the overlap verdict still unknown. The
    // authoritative overlap answer is only available inside the
    // transaction below.
    validate(request, &holidays, &state.rates, today, false)?;

    let breakdown = match manual {
        Some(manual) => manual,
        None => price(stay, &holidays, &state.rates)?,
    };

    let mut tx = state.db.begin().await?;

    if queries::overlapping_booking_exists(&mut tx, property_id, stay.check_in, stay.check_out)
        .await?
    {
        return Err(overbooking_error());
    }

    let new_booking = NewBooking {
        property_id,
        plan_type: stay.plan,
        guest_count: stay.guest_count,
        check_in: stay.check_in,
        check_out: stay.check_out,
        subtotal: breakdown.subtotal,
        cleaning_fee: breakdown.cleaning_fee,
        total: breakdown.total,
        deposit: breakdown.deposit,
        currency: breakdown.currency.clone(),
        price_description: breakdown.description.clone(),
        guest_name: contact.name,
        guest_email: contact.email,
        guest_phone: contact.phone,
        guest_city: contact.city,
        override_reason: match request {
            ReservationRequest::AdminOverride { reason, .. } => Some(reason.clone()),
            ReservationRequest::Standard(_) => None,
        },
        expires_at: Some(Utc::now() + Duration::hours(PENDING_HOLD_HOURS)),
    };

    let record = match queries::insert_booking(&mut tx, &new_booking).await {
        Ok(record) => record,
        // A racing transaction committed an overlapping range after our
        // locked read: surface it as overbooking, not as a server error.
        Err(AppError::Database(err)) if queries::is_exclusion_violation(&err) => {
            return Err(overbooking_error());
        }
        Err(err) => return Err(err),
    };

    tx.commit().await?;

    info!(
        booking_id = %record.id,
        plan = ?record.plan_type,
        check_in = %record.check_in,
        check_out = %record.check_out,
        "Booking created (pending)"
    );

    Ok((record, breakdown))
}

fn overbooking_error() -> AppError {
    AppError::Rule(RuleViolation::new(
        RuleCode::OverbookingNotAllowed,
        "Las fechas seleccionadas ya no están disponibles.",
    ))
}

/// Start the background sweeper that expires stale PENDING bookings.
///
/// Runs on startup and every 10 minutes thereafter.
pub async fn start_expiry_sweeper(db: PgPool) {
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(10 * 60));
    loop {
        interval.tick().await;
        match queries::expire_stale_pending(&db, Utc::now()).await {
            Ok(0) => {}
            Ok(expired) => info!("Expired {} stale pending booking(s)", expired),
            Err(e) => warn!("Pending-booking sweep failed: {}", e),
        }
    }
}
