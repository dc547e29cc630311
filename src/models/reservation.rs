//! Reservation models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::availability::{parse_iso_date, BookedRange, DateError, DateRange};

/// Reservation lifecycle status as stored by the booking backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Created,
    Confirmed,
    PaymentRequired,
    Rejected,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 6] = [
        ReservationStatus::Created,
        ReservationStatus::Confirmed,
        ReservationStatus::PaymentRequired,
        ReservationStatus::Rejected,
        ReservationStatus::Cancelled,
        ReservationStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Created => "CREATED",
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::PaymentRequired => "PAYMENT_REQUIRED",
            ReservationStatus::Rejected => "REJECTED",
            ReservationStatus::Cancelled => "CANCELLED",
            ReservationStatus::Completed => "COMPLETED",
        }
    }

    /// Whether a reservation in this status occupies the property's calendar
    pub fn blocks_calendar(&self) -> bool {
        !matches!(self, ReservationStatus::Rejected | ReservationStatus::Cancelled)
    }

    /// Tag severity used by the console
    pub fn severity(&self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => "success",
            ReservationStatus::Cancelled => "danger",
            ReservationStatus::PaymentRequired => "warn",
            _ => "info",
        }
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown reservation status: {}", s))
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical in-memory reservation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reservation {
    pub id: i64,
    pub organization_id: Option<i64>,
    pub property_id: i64,
    pub customer_id: Option<i64>,
    pub stay: DateRange,
    pub total_price: Option<Decimal>,
    pub status: ReservationStatus,
    pub no_of_guests: i32,
}

impl Reservation {
    pub fn booked_range(&self) -> BookedRange {
        BookedRange::from(self.stay)
    }
}

/// Reservation record as the booking backend sends it.
///
/// This is the only place the older field spellings are recognised.
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationRecord {
    pub id: i64,
    #[serde(default, alias = "organizationId")]
    pub organization_id: Option<i64>,
    #[serde(alias = "propertyId")]
    pub property_id: i64,
    #[serde(default, alias = "customerId")]
    pub customer_id: Option<i64>,
    #[serde(alias = "start_date", alias = "startDate")]
    pub check_in_date: String,
    #[serde(alias = "end_date", alias = "endDate")]
    pub check_out_date: String,
    #[serde(default, alias = "totalPrice")]
    pub total_price: Option<Decimal>,
    pub status: ReservationStatus,
    #[serde(default = "default_guests", alias = "noOfGuests")]
    pub no_of_guests: i32,
}

fn default_guests() -> i32 {
    1
}

impl TryFrom<ReservationRecord> for Reservation {
    type Error = DateError;

    fn try_from(record: ReservationRecord) -> Result<Self, Self::Error> {
        Ok(Reservation {
            id: record.id,
            organization_id: record.organization_id,
            property_id: record.property_id,
            customer_id: record.customer_id,
            stay: DateRange::new(
                parse_iso_date(&record.check_in_date)?,
                parse_iso_date(&record.check_out_date)?,
            ),
            total_price: record.total_price,
            status: record.status,
            no_of_guests: record.no_of_guests,
        })
    }
}

/// Reservation row from the reservations table
#[derive(Debug, Clone, FromRow)]
pub struct ReservationRow {
    pub id: i64,
    pub organization_id: Option<i64>,
    pub property_id: i64,
    pub customer_id: Option<i64>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total_price: Option<Decimal>,
    pub status: String,
    pub no_of_guests: i32,
}

impl ReservationRow {
    /// Map into the canonical shape. Unknown statuses are kept on the
    /// calendar: an unrecognised booking is safer treated as occupied.
    pub fn into_reservation(self) -> Reservation {
        let status = self.status.parse().unwrap_or_else(|err| {
            tracing::warn!("{} (reservation {}), treating as CREATED", err, self.id);
            ReservationStatus::Created
        });

        Reservation {
            id: self.id,
            organization_id: self.organization_id,
            property_id: self.property_id,
            customer_id: self.customer_id,
            stay: DateRange::new(self.check_in_date, self.check_out_date),
            total_price: self.total_price,
            status,
            no_of_guests: self.no_of_guests,
        }
    }
}
