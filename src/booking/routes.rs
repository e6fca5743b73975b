//! Booking API route handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::booking::requests::{
    AdminBookingRequest, AvailabilityQuery, CreateBookingRequest, HolidaysQuery, QuoteRequest,
};
use crate::booking::responses::{
    AvailabilityResponse, BookingCreatedResponse, HolidaysResponse, QuoteResponse,
};
use crate::booking::services::{self, GuestContact};
use crate::booking::{models::BookingRecord, queries};
use crate::engine::models::{PriceBreakdown, ReservationRequest, ValidationResult};
use crate::engine::manual_breakdown;
use crate::error::Result;
use crate::AppState;

/// Build the booking API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", post(create_booking))
        .route("/api/bookings/quote", post(quote))
        .route("/api/bookings/:id", get(get_booking))
        .route("/api/admin/bookings", post(create_admin_booking))
        .route("/api/availability", get(availability))
        .route("/api/holidays", get(holidays))
}

/// POST /api/bookings - guest-facing booking creation
async fn create_booking(
    State(state): State<AppState>,
    Json(body): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingCreatedResponse>)> {
    let property_id = body.property_id.unwrap_or(state.default_property_id);
    let request = ReservationRequest::Standard(body.stay());
    let contact = GuestContact {
        name: body.guest_name,
        email: body.guest_email,
        phone: body.guest_phone,
        city: body.guest_city,
    };

    let (record, breakdown) =
        services::create_booking(&state, &request, contact, None, property_id).await?;
    Ok((StatusCode::CREATED, Json(created_response(record, breakdown))))
}

/// POST /api/admin/bookings - admin manual booking with override
async fn create_admin_booking(
    State(state): State<AppState>,
    Json(body): Json<AdminBookingRequest>,
) -> Result<(StatusCode, Json<BookingCreatedResponse>)> {
    let property_id = body.property_id.unwrap_or(state.default_property_id);
    let stay = body.stay();
    let manual = manual_breakdown(
        &stay,
        body.subtotal,
        body.cleaning_fee,
        &state.rates,
        &body.reason,
    )?;
    let request = ReservationRequest::AdminOverride {
        stay,
        reason: body.reason,
    };
    let contact = GuestContact {
        name: body.guest_name,
        email: body.guest_email,
        phone: body.guest_phone,
        city: body.guest_city,
    };

    let (record, breakdown) =
        services::create_booking(&state, &request, contact, Some(manual), property_id).await?;
    Ok((StatusCode::CREATED, Json(created_response(record, breakdown))))
}

/// POST /api/bookings/quote - validate and price without persisting
async fn quote(
    State(state): State<AppState>,
    Json(body): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    let property_id = body.property_id.unwrap_or(state.default_property_id);
    let stay = body.stay();

    let response = match services::quote(&state, &stay, property_id).await? {
        Ok(breakdown) => QuoteResponse {
            verdict: ValidationResult::ok(),
            price: Some(breakdown),
        },
        Err(violation) => QuoteResponse {
            verdict: ValidationResult::from(&violation),
            price: None,
        },
    };

    Ok(Json(response))
}

/// GET /api/bookings/:id
async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingRecord>> {
    let record = queries::get_booking(&state.db, id).await?;
    Ok(Json(record))
}

/// GET /api/availability
async fn availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>> {
    let property_id = query.property_id.unwrap_or(state.default_property_id);
    let available =
        queries::is_available(&state.db, property_id, query.check_in, query.check_out).await?;

    Ok(Json(AvailabilityResponse {
        property_id,
        available,
    }))
}

/// GET /api/holidays - holiday context for a date range, as the engine
/// will see it
async fn holidays(
    State(state): State<AppState>,
    Query(query): Query<HolidaysQuery>,
) -> Result<Json<HolidaysResponse>> {
    let ctx = services::holiday_context(&state, query.check_in, query.check_out).await?;
    let (window_start, window_end) = state.window.window_for(query.check_in);

    Ok(Json(HolidaysResponse {
        holidays_in_range: ctx.in_range.iter().copied().collect(),
        holidays_in_window: ctx.in_window.iter().copied().collect(),
        has_holiday_in_window: ctx.has_holiday_in_window(),
        window_start,
        window_end,
    }))
}

fn created_response(record: BookingRecord, breakdown: PriceBreakdown) -> BookingCreatedResponse {
    BookingCreatedResponse {
        booking_id: record.id,
        status: record.status,
        expires_at: record.expires_at,
        price: breakdown,
    }
}
