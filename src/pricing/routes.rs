//! Pricing route handlers

use axum::{extract::State, routing::post, Json, Router};

use crate::error::{AppError, Result};
use crate::AppState;

use super::calculators::price_stay;
use super::requests::{CalculateTotalRequest, QuoteRequest};
use super::responses::{QuoteResponse, TotalResponse};
use super::services;

/// Pricing routes, mounted under `/api/pricing`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/total", post(calculate_total))
        .route("/quote", post(quote))
}

/// Stay total from explicit factors
pub async fn calculate_total(
    State(state): State<AppState>,
    Json(req): Json<CalculateTotalRequest>,
) -> Result<Json<TotalResponse>> {
    let currency = req
        .currency
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_uppercase)
        .unwrap_or_else(|| state.config.currency.clone());

    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::Validation(format!("Invalid currency code: {}", currency)));
    }

    let (check_in, check_out) = req.stay()?;
    let price = price_stay(check_in, check_out, req.guest_count, req.rate_per_guest_per_day);
    if price.is_none() {
        tracing::debug!(
            check_in = %check_in,
            check_out = %check_out,
            guest_count = req.guest_count,
            "No total derived"
        );
    }

    Ok(Json(TotalResponse::from_price(
        price,
        req.guest_count,
        req.rate_per_guest_per_day,
        &currency,
    )))
}

/// Stay total using the property's stored rate
pub async fn quote(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    let (check_in, check_out) = req.stay()?;
    let result = services::quote_stay(
        &state.db,
        &state.cache,
        req.property_id,
        check_in,
        check_out,
        req.guest_count,
    )
    .await?;

    Ok(Json(QuoteResponse {
        property_id: result.property_id,
        total: TotalResponse::from_price(
            result.price,
            req.guest_count,
            result.rate_per_guest_per_day,
            &state.config.currency,
        ),
    }))
}
