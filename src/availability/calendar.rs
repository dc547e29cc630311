//! Per-property index of booked ranges.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::models::{Property, Reservation};

use super::checker::{is_range_available, AvailabilityLabel};
use super::dates::{BookedRange, DateRange};

/// Booked ranges grouped by property.
///
/// Only reservations whose status blocks the calendar are kept, so callers
/// never have to filter cancelled or rejected bookings themselves.
#[derive(Debug, Clone, Default)]
pub struct BookingCalendar {
    by_property: HashMap<i64, Vec<DateRange>>,
}

impl BookingCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_reservations<'a, I>(reservations: I) -> Self
    where
        I: IntoIterator<Item = &'a Reservation>,
    {
        let mut calendar = Self::new();
        for reservation in reservations {
            calendar.add(reservation);
        }
        calendar
    }

    /// Record a reservation. Returns false when its status does not block.
    pub fn add(&mut self, reservation: &Reservation) -> bool {
        if !reservation.status.blocks_calendar() {
            return false;
        }
        self.by_property
            .entry(reservation.property_id)
            .or_default()
            .push(reservation.stay);
        true
    }

    /// Booked ranges of one property, empty when none are known
    pub fn ranges(&self, property_id: i64) -> &[DateRange] {
        self.by_property
            .get(&property_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Booked ranges in their persisted string form
    pub fn booked_ranges(&self, property_id: i64) -> Vec<BookedRange> {
        self.ranges(property_id)
            .iter()
            .copied()
            .map(BookedRange::from)
            .collect()
    }

    pub fn is_available(&self, property_id: i64, candidate: DateRange) -> bool {
        is_range_available(property_id, candidate, self.ranges(property_id))
    }

    pub fn label(
        &self,
        property_id: i64,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> AvailabilityLabel {
        match (start, end) {
            (Some(start), Some(end)) => {
                if self.is_available(property_id, DateRange::from_datetimes(start, end)) {
                    AvailabilityLabel::Available
                } else {
                    AvailabilityLabel::Booked
                }
            }
            _ => AvailabilityLabel::SelectDates,
        }
    }

    /// Keep the properties that are free for the selected range.
    ///
    /// Without a complete range every property passes.
    pub fn filter_available<'a>(
        &self,
        properties: &'a [Property],
        range: Option<DateRange>,
    ) -> Vec<&'a Property> {
        properties
            .iter()
            .filter(|p| match range {
                Some(range) => self.is_available(p.id, range),
                None => true,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::property::fixtures::property;
    use crate::models::ReservationStatus;

    fn reservation(id: i64, property_id: i64, from: &str, to: &str, status: ReservationStatus) -> Reservation {
        Reservation {
            id,
            organization_id: Some(1),
            property_id,
            customer_id: Some(1),
            stay: DateRange::parse(from, to).unwrap(),
            total_price: None,
            status,
            no_of_guests: 2,
        }
    }

    fn calendar() -> BookingCalendar {
        let reservations = vec![
            reservation(1, 101, "2026-01-05", "2026-01-08", ReservationStatus::Confirmed),
            reservation(2, 101, "2026-01-18", "2026-01-20", ReservationStatus::PaymentRequired),
            reservation(3, 102, "2026-01-12", "2026-01-14", ReservationStatus::Cancelled),
            reservation(4, 103, "2026-01-02", "2026-01-06", ReservationStatus::Rejected),
            reservation(5, 103, "2026-01-22", "2026-01-26", ReservationStatus::Created),
        ];
        BookingCalendar::from_reservations(&reservations)
    }

    #[test]
    fn test_cancelled_and_rejected_are_dropped() {
        let calendar = calendar();
        assert_eq!(calendar.ranges(101).len(), 2);
        assert!(calendar.ranges(102).is_empty());
        assert_eq!(calendar.booked_ranges(103), vec![BookedRange::new("2026-01-22", "2026-01-26")]);
    }

    #[test]
    fn test_cancelled_booking_does_not_block() {
        let calendar = calendar();
        let range = DateRange::parse("2026-01-12", "2026-01-13").unwrap();
        assert!(calendar.is_available(102, range));
    }

    #[test]
    fn test_unknown_property_is_available() {
        let range = DateRange::parse("2026-01-01", "2026-12-31").unwrap();
        assert!(calendar().is_available(999, range));
    }

    #[test]
    fn test_label() {
        let calendar = calendar();
        let at = |s: &str| {
            chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
        };
        assert_eq!(calendar.label(101, None, None), AvailabilityLabel::SelectDates);
        assert_eq!(
            calendar.label(101, Some(at("2026-01-08")), Some(at("2026-01-10"))),
            AvailabilityLabel::Booked
        );
        assert_eq!(
            calendar.label(101, Some(at("2026-01-09")), Some(at("2026-01-10"))),
            AvailabilityLabel::Available
        );
    }

    #[test]
    fn test_filter_available() {
        let calendar = calendar();
        let properties = vec![
            property(101, "Lake House", "Slovenia", "Available"),
            property(102, "City Loft", "Slovenia", "Available"),
            property(103, "Villa", "Croatia", "Available"),
        ];

        let range = DateRange::parse("2026-01-06", "2026-01-13").unwrap();
        let ids: Vec<i64> = calendar
            .filter_available(&properties, Some(range))
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![102, 103]);

        assert_eq!(calendar.filter_available(&properties, None).len(), 3);
    }
}
