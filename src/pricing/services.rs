//! Pricing service functions with database access.
//!
//! These functions look up property rates (cache first) and feed them to
//! the pure calculators.

use axum::http::StatusCode;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;

use crate::cache::AppCache;
use crate::error::AppError;

use super::calculators::{price_stay, StayPrice};
use super::models::PropertyRate;
use super::queries;

/// Pricing calculation error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("No property found with id {property_id}")]
    UnknownProperty { property_id: i64 },

    #[error("Property {property_id} has no per-guest daily rate")]
    MissingRate { property_id: i64 },

    #[error("Property {property_id} accepts at most {max_guests} guests, {requested} requested")]
    TooManyGuests {
        property_id: i64,
        max_guests: i32,
        requested: i32,
    },
}

impl PricingError {
    pub fn error_type(&self) -> &'static str {
        match self {
            PricingError::UnknownProperty { .. } => "unknown_property",
            PricingError::MissingRate { .. } => "missing_rate",
            PricingError::TooManyGuests { .. } => "too_many_guests",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            PricingError::UnknownProperty { .. } => StatusCode::NOT_FOUND,
            PricingError::MissingRate { .. } | PricingError::TooManyGuests { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    }
}

/// Result of quoting a stay at a property
#[derive(Debug, Clone)]
pub struct QuoteResult {
    pub property_id: i64,
    pub rate_per_guest_per_day: Decimal,
    /// `None` when the dates give no positive day span
    pub price: Option<StayPrice>,
}

/// Load a property's rate, cache first
pub async fn load_property_rate(
    pool: &PgPool,
    cache: &AppCache,
    property_id: i64,
) -> Result<Arc<PropertyRate>, AppError> {
    if let Some(cached) = cache.rates.get(&property_id).await {
        tracing::debug!("Cache HIT for property rate: {}", property_id);
        return Ok(cached);
    }

    tracing::debug!("Cache MISS for property rate: {}", property_id);
    let rate = queries::find_property_rate(pool, property_id)
        .await?
        .ok_or(PricingError::UnknownProperty { property_id })?;

    let rate = Arc::new(rate);
    cache.rates.insert(property_id, Arc::clone(&rate)).await;
    Ok(rate)
}

/// Check a guest count against a rate and return the usable daily rate
pub fn validate_quote(rate: &PropertyRate, guest_count: i32) -> Result<Decimal, PricingError> {
    let daily = rate
        .price_per_person_day
        .filter(|r| !r.is_zero())
        .ok_or(PricingError::MissingRate {
            property_id: rate.property_id,
        })?;

    if !rate.accepts_guests(guest_count) {
        return Err(PricingError::TooManyGuests {
            property_id: rate.property_id,
            max_guests: rate.max_guests.unwrap_or_default(),
            requested: guest_count,
        });
    }

    Ok(daily)
}

/// Price a stay using the property's own per-guest daily rate.
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `cache` - Application cache (for rate lookup)
/// * `property_id` - Property being booked
/// * `check_in` / `check_out` - Wall-clock stay bounds
/// * `guest_count` - Number of guests
pub async fn quote_stay(
    pool: &PgPool,
    cache: &AppCache,
    property_id: i64,
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
    guest_count: i32,
) -> Result<QuoteResult, AppError> {
    let rate = load_property_rate(pool, cache, property_id).await?;
    let daily = validate_quote(&rate, guest_count)?;

    Ok(QuoteResult {
        property_id,
        rate_per_guest_per_day: daily,
        price: price_stay(check_in, check_out, guest_count, daily),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rate(price: Option<Decimal>, max_guests: Option<i32>) -> PropertyRate {
        PropertyRate {
            property_id: 101,
            name: "Lake House".to_string(),
            status: "Available".to_string(),
            max_guests,
            price_per_person_day: price,
        }
    }

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::UnknownProperty { property_id: 42 };
        assert!(err.to_string().contains("42"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = PricingError::TooManyGuests {
            property_id: 1,
            max_guests: 4,
            requested: 6,
        };
        assert!(err.to_string().contains("at most 4"));
        assert_eq!(err.error_type(), "too_many_guests");
    }

    #[test]
    fn test_validate_quote_ok() {
        assert_eq!(validate_quote(&rate(Some(dec!(50)), Some(4)), 2), Ok(dec!(50)));
    }

    #[test]
    fn test_validate_quote_missing_rate() {
        assert_eq!(
            validate_quote(&rate(None, Some(4)), 2),
            Err(PricingError::MissingRate { property_id: 101 })
        );
        assert_eq!(
            validate_quote(&rate(Some(dec!(0)), Some(4)), 2),
            Err(PricingError::MissingRate { property_id: 101 })
        );
    }

    #[test]
    fn test_validate_quote_capacity() {
        assert_eq!(
            validate_quote(&rate(Some(dec!(50)), Some(4)), 5),
            Err(PricingError::TooManyGuests {
                property_id: 101,
                max_guests: 4,
                requested: 5,
            })
        );
    }
}
