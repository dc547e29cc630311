//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::StayPrice;

/// Money value for JSON responses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self {
            amount,
            currency: currency.to_string(),
        }
    }
}

/// Response for a stay total.
///
/// `total` is null when no price could be derived; the console keeps the
/// total it already shows.
#[derive(Debug, Serialize)]
pub struct TotalResponse {
    pub total: Option<MoneyResponse>,
    pub day_span: Option<i64>,
    pub guest_count: i32,
    pub rate_per_guest_per_day: MoneyResponse,
}

impl TotalResponse {
    pub fn from_price(
        price: Option<StayPrice>,
        guest_count: i32,
        rate_per_guest_per_day: Decimal,
        currency: &str,
    ) -> Self {
        Self {
            total: price.as_ref().map(|p| MoneyResponse::new(p.total, currency)),
            day_span: price.as_ref().map(|p| p.day_span),
            guest_count,
            rate_per_guest_per_day: MoneyResponse::new(rate_per_guest_per_day, currency),
        }
    }
}

/// Response for a property quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub property_id: i64,
    #[serde(flatten)]
    pub total: TotalResponse,
}
