//! Database queries for properties and reservations

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::models::{Property, ReservationRow};

const PROPERTY_COLUMNS: &str = r#"
    id,
    organization_id,
    name,
    description,
    address,
    country,
    property_type,
    max_guests,
    bedrooms,
    bathrooms,
    status,
    denny_fee,
    price_per_person_day,
    created_at,
    updated_at
"#;

const RESERVATION_COLUMNS: &str = r#"
    id,
    organization_id,
    property_id,
    customer_id,
    check_in_date,
    check_out_date,
    total_price,
    status,
    no_of_guests
"#;

/// Every property that has not been deleted
pub async fn list_properties(pool: &PgPool) -> Result<Vec<Property>> {
    let sql = format!(
        "SELECT {} FROM properties WHERE deleted_at IS NULL ORDER BY updated_at DESC",
        PROPERTY_COLUMNS
    );
    let properties = sqlx::query_as::<_, Property>(&sql).fetch_all(pool).await?;

    Ok(properties)
}

/// Get a property by id
pub async fn get_property(pool: &PgPool, id: i64) -> Result<Property> {
    let sql = format!(
        "SELECT {} FROM properties WHERE id = $1 AND deleted_at IS NULL",
        PROPERTY_COLUMNS
    );
    let property = sqlx::query_as::<_, Property>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(property)
}

/// Reservations of one property that occupy its calendar.
///
/// Cancelled and rejected reservations are excluded here so the
/// availability checker only ever sees blocking ranges.
pub async fn find_blocking_reservations(
    pool: &PgPool,
    property_id: i64,
) -> Result<Vec<ReservationRow>> {
    let sql = format!(
        r#"
        SELECT {}
        FROM reservations
        WHERE property_id = $1
          AND status NOT IN ('CANCELLED', 'REJECTED')
        ORDER BY check_in_date
        "#,
        RESERVATION_COLUMNS
    );
    let rows = sqlx::query_as::<_, ReservationRow>(&sql)
        .bind(property_id)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Blocking reservations of any property that touch `[from, to]`
pub async fn find_blocking_reservations_between(
    pool: &PgPool,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<ReservationRow>> {
    let sql = format!(
        r#"
        SELECT {}
        FROM reservations
        WHERE check_in_date <= $2
          AND check_out_date >= $1
          AND status NOT IN ('CANCELLED', 'REJECTED')
        ORDER BY property_id, check_in_date
        "#,
        RESERVATION_COLUMNS
    );
    let rows = sqlx::query_as::<_, ReservationRow>(&sql)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}
