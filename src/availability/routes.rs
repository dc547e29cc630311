//! Availability route handlers

use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Reservation, ReservationRecord};
use crate::AppState;

use super::calendar::BookingCalendar;
use super::checker::{availability_label, AvailabilityLabel};
use super::dates::{parse_optional_wall_clock, BookedRange};

/// Availability routes, mounted under `/api/availability`
pub fn router() -> Router<AppState> {
    Router::new().route("/check", post(check))
}

/// Check a selection against bookings supplied by the caller.
///
/// `bookings` are bare ranges already known to block the property.
/// `reservations` are backend records in either field spelling; only those
/// for `property_id` whose status blocks the calendar are considered.
#[derive(Debug, Deserialize)]
pub struct AvailabilityCheckRequest {
    pub property_id: i64,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub bookings: Vec<BookedRange>,
    #[serde(default)]
    pub reservations: Vec<ReservationRecord>,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub property_id: i64,
    /// `None` until both dates are selected
    pub available: Option<bool>,
    pub label: AvailabilityLabel,
    pub severity: &'static str,
}

impl AvailabilityResponse {
    pub fn new(property_id: i64, label: AvailabilityLabel) -> Self {
        let available = match label {
            AvailabilityLabel::SelectDates => None,
            AvailabilityLabel::Available => Some(true),
            AvailabilityLabel::Booked => Some(false),
        };
        Self {
            property_id,
            available,
            label,
            severity: label.severity(),
        }
    }
}

/// Pure availability check, no stored reservations involved
pub async fn check(Json(req): Json<AvailabilityCheckRequest>) -> Result<Json<AvailabilityResponse>> {
    let from = parse_optional_wall_clock(req.from.as_deref())?;
    let to = parse_optional_wall_clock(req.to.as_deref())?;

    let reservations = req
        .reservations
        .into_iter()
        .map(Reservation::try_from)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let calendar = BookingCalendar::from_reservations(&reservations);

    let mut bookings = req.bookings;
    bookings.extend(calendar.booked_ranges(req.property_id));

    let label = availability_label(req.property_id, from, to, &bookings)?;
    Ok(Json(AvailabilityResponse::new(req.property_id, label)))
}
