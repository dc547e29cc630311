//! Database models for pricing queries.

use rust_decimal::Decimal;
use sqlx::FromRow;

/// Pricing-relevant columns of a property
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PropertyRate {
    pub property_id: i64,
    pub name: String,
    pub status: String,
    pub max_guests: Option<i32>,
    pub price_per_person_day: Option<Decimal>,
}

impl PropertyRate {
    /// Whether `guest_count` fits the property. No limit when unset.
    pub fn accepts_guests(&self, guest_count: i32) -> bool {
        match self.max_guests {
            Some(max) if max > 0 => guest_count <= max,
            _ => true,
        }
    }
}
