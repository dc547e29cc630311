//! Availability checks for a single property.
//!
//! Pure functions - no database access. Callers hand in the property's
//! non-cancelled reservations; see `BookingCalendar` for the filtering.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::dates::{BookedRange, DateError, DateRange};

/// Check whether `candidate` is free of every booked range.
///
/// Booked ranges are parsed before anything is compared, so a malformed
/// date is always reported even when another range would already conflict.
/// An inverted candidate is vacuous and always available.
///
/// # Examples
/// ```
/// use booking_console::availability::{is_available, BookedRange, DateRange};
///
/// let bookings = vec![BookedRange::new("2026-01-05", "2026-01-08")];
/// let candidate = DateRange::parse("2026-01-08", "2026-01-10").unwrap();
/// assert_eq!(is_available(101, candidate, &bookings), Ok(false));
/// ```
pub fn is_available(
    property_id: i64,
    candidate: DateRange,
    bookings: &[BookedRange],
) -> Result<bool, DateError> {
    let booked = bookings
        .iter()
        .map(BookedRange::to_range)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(is_range_available(property_id, candidate, &booked))
}

/// Same as [`is_available`] for ranges that are already parsed
pub fn is_range_available(property_id: i64, candidate: DateRange, booked: &[DateRange]) -> bool {
    if candidate.is_inverted() {
        return true;
    }

    match booked.iter().find(|range| candidate.overlaps(range)) {
        Some(conflict) => {
            tracing::debug!(
                property_id,
                from = %candidate.from,
                to = %candidate.to,
                conflict_from = %conflict.from,
                conflict_to = %conflict.to,
                "Candidate range overlaps an existing booking"
            );
            false
        }
        None => true,
    }
}

/// Three-valued availability label shown next to a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AvailabilityLabel {
    #[serde(rename = "Select dates")]
    SelectDates,
    Available,
    Booked,
}

impl AvailabilityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityLabel::SelectDates => "Select dates",
            AvailabilityLabel::Available => "Available",
            AvailabilityLabel::Booked => "Booked",
        }
    }

    /// Tag severity used by the console
    pub fn severity(&self) -> &'static str {
        match self {
            AvailabilityLabel::SelectDates => "secondary",
            AvailabilityLabel::Available => "success",
            AvailabilityLabel::Booked => "danger",
        }
    }
}

impl std::fmt::Display for AvailabilityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label for a possibly incomplete date selection
pub fn availability_label(
    property_id: i64,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    bookings: &[BookedRange],
) -> Result<AvailabilityLabel, DateError> {
    let (Some(start), Some(end)) = (start, end) else {
        return Ok(AvailabilityLabel::SelectDates);
    };

    let candidate = DateRange::from_datetimes(start, end);
    Ok(if is_available(property_id, candidate, bookings)? {
        AvailabilityLabel::Available
    } else {
        AvailabilityLabel::Booked
    })
}
