//! Property models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Listing status of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyStatus {
    Available,
    SoldOut,
    Closed,
}

impl PropertyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Available => "Available",
            PropertyStatus::SoldOut => "SoldOut",
            PropertyStatus::Closed => "Closed",
        }
    }

    pub fn severity(&self) -> &'static str {
        match self {
            PropertyStatus::Available => "success",
            PropertyStatus::SoldOut => "warn",
            PropertyStatus::Closed => "danger",
        }
    }
}

impl std::str::FromStr for PropertyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Available" => Ok(PropertyStatus::Available),
            "SoldOut" => Ok(PropertyStatus::SoldOut),
            "Closed" => Ok(PropertyStatus::Closed),
            other => Err(format!("Unknown property status: {}", other)),
        }
    }
}

/// Kind of rental unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Apartment,
    House,
    Villa,
    Studio,
    Room,
    Cottage,
    Bungalow,
    Chalet,
    Duplex,
    Penthouse,
    Townhouse,
    Farmhouse,
    Loft,
    MobileHome,
}

/// Property from the properties table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i64,
    pub organization_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
    pub property_type: Option<String>,
    pub max_guests: Option<i32>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub status: String,
    pub denny_fee: Option<Decimal>,
    pub price_per_person_day: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    pub fn status(&self) -> Option<PropertyStatus> {
        self.status.parse().ok()
    }

    pub fn property_type(&self) -> Option<PropertyType> {
        self.property_type
            .as_deref()
            .and_then(|t| serde_json::from_value(serde_json::Value::String(t.to_string())).ok())
    }

    /// "4 guests • 2 bed • 1 bath"
    pub fn capacity_label(&self) -> String {
        format!(
            "{} guests • {} bed • {} bath",
            self.max_guests.unwrap_or(0),
            self.bedrooms.unwrap_or(0),
            self.bathrooms.unwrap_or(0)
        )
    }

    /// Nightly rate text for cards, e.g. "50€ / person · day"
    pub fn display_price(&self, currency_symbol: &str) -> String {
        match self.price_per_person_day {
            Some(rate) if rate > Decimal::ZERO => {
                format!("{}{} / person · day", rate.normalize(), currency_symbol)
            }
            _ => "Price on request".to_string(),
        }
    }
}
