//! Property list and per-property availability handlers

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::availability::{
    parse_optional_wall_clock, services as availability, AvailabilityLabel, DateError, DateRange,
};
use crate::availability::routes::AvailabilityResponse;
use crate::db;
use crate::error::Result;
use crate::listing::{
    ListQuery, PropertyFilter, PropertyFilterInput, PropertySort, PropertySortInput, SortField,
    SortOrder,
};
use crate::models::Property;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/:id", get(detail))
        .route("/:id/availability", get(property_availability))
}

/// Query parameters for the property list
#[derive(Debug, Default, Deserialize)]
pub struct PropertyListParams {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub sort_field: Option<SortField>,
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub only_available: bool,
}

impl PropertyListParams {
    pub fn list_query(&self) -> ListQuery {
        ListQuery {
            filter: PropertyFilter {
                name: self.name.clone(),
                country: self.country.clone(),
                status: self.status.clone(),
                q: self.q.clone(),
            },
            sort: PropertySort::new(
                self.sort_field.unwrap_or_default(),
                self.sort_order.unwrap_or_default(),
            ),
        }
    }

    /// Selected stay, `None` until both ends are given
    pub fn range(&self) -> std::result::Result<Option<DateRange>, DateError> {
        let from = parse_optional_wall_clock(self.from.as_deref())?;
        let to = parse_optional_wall_clock(self.to.as_deref())?;
        Ok(match (from, to) {
            (Some(from), Some(to)) => Some(DateRange::from_datetimes(from, to)),
            _ => None,
        })
    }
}

/// The GraphQL inputs equivalent to the applied filter and sort
#[derive(Debug, Serialize)]
pub struct GraphqlInputs {
    #[serde(rename = "where")]
    pub where_input: Option<PropertyFilterInput>,
    pub order: Vec<PropertySortInput>,
}

#[derive(Debug, Serialize)]
pub struct PropertyListItem {
    #[serde(flatten)]
    pub property: Property,
    pub availability: AvailabilityLabel,
    pub display_price: String,
    pub capacity: String,
}

#[derive(Debug, Serialize)]
pub struct PropertyListResponse {
    pub items: Vec<PropertyListItem>,
    pub total: usize,
    pub query_key: String,
    pub graphql: GraphqlInputs,
}

fn currency_symbol(currency: &str) -> &str {
    match currency {
        "EUR" => "€",
        "USD" => "$",
        "GBP" => "£",
        other => other,
    }
}

async fn load_properties(state: &AppState) -> Result<Arc<Vec<Property>>> {
    if let Some(cached) = state.cache.property_list().await {
        tracing::debug!("Cache HIT for property list");
        return Ok(cached);
    }

    tracing::debug!("Cache MISS for property list");
    let properties = db::list_properties(&state.db).await?;
    Ok(state.cache.store_property_list(properties).await)
}

/// Filtered, sorted property list with availability for the selected range
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PropertyListParams>,
) -> Result<Json<PropertyListResponse>> {
    let query = params.list_query();
    let range = params.range()?;

    let properties = load_properties(&state).await?;
    let mut rows = query.apply(&properties);

    let calendar = match range {
        Some(range) => Some(availability::calendar_for_range(&state.db, range).await?),
        None => None,
    };

    if params.only_available {
        if let Some(calendar) = &calendar {
            rows = calendar
                .filter_available(&rows, range)
                .into_iter()
                .cloned()
                .collect();
        }
    }

    let symbol = currency_symbol(&state.config.currency);
    let items: Vec<PropertyListItem> = rows
        .into_iter()
        .map(|property| {
            let availability = match (&calendar, range) {
                (Some(calendar), Some(range)) if calendar.is_available(property.id, range) => {
                    AvailabilityLabel::Available
                }
                (Some(_), Some(_)) => AvailabilityLabel::Booked,
                _ => AvailabilityLabel::SelectDates,
            };
            PropertyListItem {
                display_price: property.display_price(symbol),
                capacity: property.capacity_label(),
                availability,
                property,
            }
        })
        .collect();

    Ok(Json(PropertyListResponse {
        total: items.len(),
        items,
        query_key: query.key(),
        graphql: GraphqlInputs {
            where_input: query.filter.where_input(),
            order: query.sort.order_input(),
        },
    }))
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Property>> {
    Ok(Json(db::get_property(&state.db, id).await?))
}

/// Date selection for a single property
#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

pub async fn property_availability(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<AvailabilityResponse>> {
    let from = parse_optional_wall_clock(params.from.as_deref())?;
    let to = parse_optional_wall_clock(params.to.as_deref())?;
    let label = availability::property_availability(&state.db, &state.cache, id, from, to).await?;
    Ok(Json(AvailabilityResponse::new(id, label)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;
    use chrono::NaiveDate;

    fn parse_params(uri: &'static str) -> PropertyListParams {
        let uri = Uri::from_static(uri);
        let Query(params) = Query::<PropertyListParams>::try_from_uri(&uri).unwrap();
        params
    }

    #[test]
    fn test_list_params_from_query_string() {
        let params = parse_params(
            "/api/properties?name=%20lake&sort_field=maxGuests&sort_order=-1&only_available=true\
             &from=2026-03-01&to=2026-03-04",
        );

        let query = params.list_query();
        assert_eq!(query.filter.name.as_deref(), Some(" lake"));
        assert_eq!(query.sort, PropertySort::new(SortField::MaxGuests, SortOrder::Desc));
        assert!(params.only_available);

        let range = params.range().unwrap().unwrap();
        assert_eq!(range.from, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(range.to, NaiveDate::from_ymd_opt(2026, 3, 4).unwrap());
    }

    #[test]
    fn test_list_params_ascending_and_defaults() {
        let params = parse_params("/api/properties?sort_field=pricePerPersonDay&sort_order=1");
        assert_eq!(
            params.list_query().sort,
            PropertySort::new(SortField::PricePerPersonDay, SortOrder::Asc)
        );
        assert!(!params.only_available);
        assert_eq!(params.range(), Ok(None));

        let defaults = parse_params("/api/properties");
        assert_eq!(defaults.list_query().sort, PropertySort::default());
    }

    #[test]
    fn test_list_params_half_selected_range_is_none() {
        let params = parse_params("/api/properties?from=2026-03-01&to=");
        assert_eq!(params.range(), Ok(None));
    }

    #[test]
    fn test_list_params_malformed_date_is_an_error() {
        let params = parse_params("/api/properties?from=2026-13-45&to=2026-03-04");
        assert!(params.range().is_err());
    }

    #[test]
    fn test_list_params_rejects_unknown_sort_order() {
        let uri = Uri::from_static("/api/properties?sort_order=2");
        assert!(Query::<PropertyListParams>::try_from_uri(&uri).is_err());
    }
}
