//! Property list ordering and its GraphQL `order` input.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Property;

/// Sortable columns of the property list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    Country,
    Status,
    MaxGuests,
    PricePerPersonDay,
    #[default]
    UpdatedAt,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Country => "country",
            SortField::Status => "status",
            SortField::MaxGuests => "maxGuests",
            SortField::PricePerPersonDay => "pricePerPersonDay",
            SortField::UpdatedAt => "updatedAt",
        }
    }

    fn compare(&self, a: &Property, b: &Property) -> Ordering {
        match self {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Country => a.country.cmp(&b.country),
            SortField::Status => a.status.cmp(&b.status),
            SortField::MaxGuests => a.max_guests.cmp(&b.max_guests),
            SortField::PricePerPersonDay => a.price_per_person_day.cmp(&b.price_per_person_day),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

/// Table sort order, `1` ascending and `-1` descending on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl TryFrom<i8> for SortOrder {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SortOrder::Asc),
            -1 => Ok(SortOrder::Desc),
            other => Err(format!("sort order must be 1 or -1, got {}", other)),
        }
    }
}

impl From<SortOrder> for i8 {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Property `order` input, e.g. `{ "updatedAt": "DESC" }`
pub type PropertySortInput = BTreeMap<&'static str, SortDirection>;

/// Column and direction of the property list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertySort {
    #[serde(default)]
    pub field: SortField,
    #[serde(default)]
    pub order: SortOrder,
}

impl PropertySort {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    pub fn order_input(&self) -> Vec<PropertySortInput> {
        let direction = match self.order {
            SortOrder::Asc => SortDirection::Asc,
            SortOrder::Desc => SortDirection::Desc,
        };
        vec![BTreeMap::from([(self.field.as_str(), direction)])]
    }

    /// Stable in-place sort. Missing values come first when ascending.
    pub fn apply(&self, properties: &mut [Property]) {
        properties.sort_by(|a, b| {
            let ordering = self.field.compare(a, b);
            match self.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }
}
