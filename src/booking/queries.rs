//! Database queries for the booking store.
//!
//! The overlap check and the insert run inside one transaction; the read
//! locks the matching rows (`FOR UPDATE`) and the `bookings_no_overlap`
//! exclusion constraint rejects racing inserts at commit, so the store
//! provides atomic check-and-reserve semantics.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::booking::models::{BookingRecord, NewBooking};
use crate::error::{AppError, Result};

/// True if any date-blocking booking overlaps `[check_in, check_out)` for
/// the property. Two ranges overlap iff
/// `existing.check_in < check_out AND existing.check_out > check_in`;
/// a day pass stores an empty range and so never collides with another
/// day pass on the same date, but does collide with real stays.
pub async fn overlapping_booking_exists(
    tx: &mut Transaction<'_, Postgres>,
    property_id: i32,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<bool> {
    let existing: Option<Uuid> = sqlx::query_scalar(
        r#"
        SELECT id
        FROM bookings
        WHERE property_id = $1
          AND status IN ('pending', 'confirmed', 'blocked')
          AND check_in < $3
          AND check_out > $2
        LIMIT 1
        FOR UPDATE
        "#,
    )
    .bind(property_id)
    .bind(check_in)
    .bind(check_out)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(existing.is_some())
}

/// Insert a new booking with status PENDING.
///
/// A `23P01` exclusion violation means another transaction reserved an
/// overlapping range between our check and this insert; the caller maps it
/// to the overbooking rule code.
pub async fn insert_booking(
    tx: &mut Transaction<'_, Postgres>,
    booking: &NewBooking,
) -> Result<BookingRecord> {
    let record = sqlx::query_as::<_, BookingRecord>(
        r#"
        INSERT INTO bookings (
            id, property_id, plan_type, guest_count, check_in, check_out,
            status, payment_status,
            subtotal, cleaning_fee, total, deposit, currency, price_description,
            guest_name, guest_email, guest_phone, guest_city,
            override_reason, expires_at, created_at
        )
        VALUES (
            $1, $2, $3, $4, $5, $6,
            'pending', 'unpaid',
            $7, $8, $9, $10, $11, $12,
            $13, $14, $15, $16,
            $17, $18, now()
        )
        RETURNING
            id, property_id, plan_type, guest_count, check_in, check_out,
            status, payment_status,
            subtotal, cleaning_fee, total, deposit, currency, price_description,
            guest_name, guest_email, guest_phone, guest_city,
            override_reason, expires_at, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(booking.property_id)
    .bind(booking.plan_type)
    .bind(booking.guest_count)
    .bind(booking.check_in)
    .bind(booking.check_out)
    .bind(booking.subtotal)
    .bind(booking.cleaning_fee)
    .bind(booking.total)
    .bind(booking.deposit)
    .bind(&booking.currency)
    .bind(&booking.price_description)
    .bind(&booking.guest_name)
    .bind(&booking.guest_email)
    .bind(&booking.guest_phone)
    .bind(&booking.guest_city)
    .bind(&booking.override_reason)
    .bind(booking.expires_at)
    .fetch_one(&mut **tx)
    .await?;

    Ok(record)
}

/// True if the sqlx error is the `bookings_no_overlap` exclusion constraint
/// firing (Postgres SQLSTATE 23P01).
pub fn is_exclusion_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23P01")
    )
}

/// Get a booking by id.
pub async fn get_booking(pool: &PgPool, id: Uuid) -> Result<BookingRecord> {
    let record = sqlx::query_as::<_, BookingRecord>(
        r#"
        SELECT
            id, property_id, plan_type, guest_count, check_in, check_out,
            status, payment_status,
            subtotal, cleaning_fee, total, deposit, currency, price_description,
            guest_name, guest_email, guest_phone, guest_city,
            override_reason, expires_at, created_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(record)
}

/// Availability probe outside any reservation transaction (read-only,
/// no locks): used by `GET /api/availability` for UX feedback only.
pub async fn is_available(
    pool: &PgPool,
    property_id: i32,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<bool> {
    let conflicts: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM bookings
        WHERE property_id = $1
          AND status IN ('pending', 'confirmed', 'blocked')
          AND check_in < $3
          AND check_out > $2
        "#,
    )
    .bind(property_id)
    .bind(check_in)
    .bind(check_out)
    .fetch_one(pool)
    .await?;

    Ok(conflicts == 0)
}

/// Admin-maintained holiday additions for one year.
pub async fn holiday_overrides_for_year(pool: &PgPool, year: i32) -> Result<Vec<NaiveDate>> {
    let dates: Vec<NaiveDate> = sqlx::query_scalar(
        r#"
        SELECT holiday_date
        FROM holiday_overrides
        WHERE date_part('year', holiday_date) = $1
        ORDER BY holiday_date
        "#,
    )
    .bind(f64::from(year))
    .fetch_all(pool)
    .await?;

    Ok(dates)
}

/// Expire PENDING bookings whose hold has lapsed. Returns the number of
/// rows transitioned.
pub async fn expire_stale_pending(pool: &PgPool, now: DateTime<Utc>) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE bookings
        SET status = 'expired'
        WHERE status = 'pending'
          AND expires_at IS NOT NULL
          AND expires_at < $1
        "#,
    )
    .bind(now)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
