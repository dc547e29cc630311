//! Availability lookups backed by stored reservations.

use chrono::NaiveDateTime;
use sqlx::PgPool;
use std::sync::Arc;

use crate::cache::AppCache;
use crate::db::queries;
use crate::error::Result;
use crate::models::Reservation;

use super::calendar::BookingCalendar;
use super::checker::{is_range_available, AvailabilityLabel};
use super::dates::DateRange;

/// Blocking booked ranges of a property, cache first
pub async fn load_booked_ranges(
    pool: &PgPool,
    cache: &AppCache,
    property_id: i64,
) -> Result<Arc<Vec<DateRange>>> {
    if let Some(cached) = cache.bookings.get(&property_id).await {
        tracing::debug!("Cache HIT for bookings of property: {}", property_id);
        return Ok(cached);
    }

    tracing::debug!("Cache MISS for bookings of property: {}", property_id);
    let reservations: Vec<Reservation> = queries::find_blocking_reservations(pool, property_id)
        .await?
        .into_iter()
        .map(|row| row.into_reservation())
        .collect();

    let calendar = BookingCalendar::from_reservations(&reservations);
    let ranges = Arc::new(calendar.ranges(property_id).to_vec());
    cache.bookings.insert(property_id, Arc::clone(&ranges)).await;
    Ok(ranges)
}

/// Availability label of a property for a possibly incomplete selection
pub async fn property_availability(
    pool: &PgPool,
    cache: &AppCache,
    property_id: i64,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> Result<AvailabilityLabel> {
    let (Some(start), Some(end)) = (start, end) else {
        return Ok(AvailabilityLabel::SelectDates);
    };

    let booked = load_booked_ranges(pool, cache, property_id).await?;
    let candidate = DateRange::from_datetimes(start, end);

    Ok(if is_range_available(property_id, candidate, &booked) {
        AvailabilityLabel::Available
    } else {
        AvailabilityLabel::Booked
    })
}

/// Calendar of every blocking reservation touching `range`
pub async fn calendar_for_range(pool: &PgPool, range: DateRange) -> Result<BookingCalendar> {
    if range.is_inverted() {
        return Ok(BookingCalendar::new());
    }

    let rows = queries::find_blocking_reservations_between(pool, range.from, range.to).await?;
    let reservations: Vec<Reservation> = rows.into_iter().map(|row| row.into_reservation()).collect();
    Ok(BookingCalendar::from_reservations(&reservations))
}
