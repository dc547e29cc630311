//! Pricing engine module.
//!
//! Derives stay totals from check-in/out, guest count and a per-guest daily
//! rate, and holds the booking form's draft with its debounced
//! recomputation.

pub mod calculators;
pub mod draft;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{calculate_total, day_span, price_stay, round_money, StayPrice};
pub use draft::{DraftForm, FieldEdit, ReservationDraft};
pub use routes::router;
pub use services::{PricingError, QuoteResult};
