//! Domain models shared by the availability, pricing and listing modules

pub mod property;
pub mod reservation;

pub use property::{Property, PropertyStatus, PropertyType};
pub use reservation::{Reservation, ReservationRecord, ReservationRow, ReservationStatus};
