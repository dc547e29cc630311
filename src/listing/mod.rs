//! Property list pipeline: filter, sort and reload bookkeeping.

pub mod filter;
pub mod reload;
pub mod sort;

use serde::{Deserialize, Serialize};

use crate::models::Property;

pub use filter::{matches_text, PropertyFilter, PropertyFilterInput, StringOperationFilterInput};
pub use reload::{ReloadPipeline, ReloadTicket};
pub use sort::{PropertySort, PropertySortInput, SortDirection, SortField, SortOrder};

/// Everything that determines the content of the property list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub filter: PropertyFilter,
    pub sort: PropertySort,
}

impl ListQuery {
    /// Stable key of the normalized query, used to skip duplicate reloads
    pub fn key(&self) -> String {
        let normalized = ListQuery {
            filter: self.filter.normalized(),
            sort: self.sort,
        };
        serde_json::to_string(&normalized).unwrap_or_default()
    }

    /// Filter and sort a loaded list
    pub fn apply(&self, properties: &[Property]) -> Vec<Property> {
        let mut rows: Vec<Property> = properties
            .iter()
            .filter(|p| self.filter.matches(p))
            .cloned()
            .collect();
        self.sort.apply(&mut rows);
        rows
    }
}
