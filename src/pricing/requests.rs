//! Request DTOs for pricing API endpoints.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::availability::{parse_wall_clock, DateError};

/// Request to calculate a stay total from explicit factors
#[derive(Debug, Deserialize)]
pub struct CalculateTotalRequest {
    pub check_in: String,
    pub check_out: String,
    pub guest_count: i32,
    #[serde(with = "rust_decimal::serde::str")]
    pub rate_per_guest_per_day: Decimal,
    #[serde(default)]
    pub currency: Option<String>,
}

impl CalculateTotalRequest {
    /// Check-in and check-out as wall-clock instants
    pub fn stay(&self) -> Result<(NaiveDateTime, NaiveDateTime), DateError> {
        parse_stay(&self.check_in, &self.check_out)
    }
}

/// Request to quote a stay at a property using its stored rate
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub property_id: i64,
    pub check_in: String,
    pub check_out: String,
    pub guest_count: i32,
}

impl QuoteRequest {
    pub fn stay(&self) -> Result<(NaiveDateTime, NaiveDateTime), DateError> {
        parse_stay(&self.check_in, &self.check_out)
    }
}

fn parse_stay(check_in: &str, check_out: &str) -> Result<(NaiveDateTime, NaiveDateTime), DateError> {
    Ok((parse_wall_clock(check_in)?, parse_wall_clock(check_out)?))
}
