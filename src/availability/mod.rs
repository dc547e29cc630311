//! Booking availability.
//!
//! Decides whether a candidate stay is free of a property's existing
//! reservations. Ranges are inclusive calendar dates: the check-out day of
//! one booking is still occupied.

pub mod calendar;
pub mod checker;
pub mod dates;
pub mod routes;
pub mod services;

pub use calendar::BookingCalendar;
pub use checker::{availability_label, is_available, is_range_available, AvailabilityLabel};
pub use dates::{
    parse_iso_date, parse_optional_wall_clock, parse_wall_clock, BookedRange, DateError, DateRange,
};
pub use routes::router;
