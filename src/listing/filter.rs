//! Property list filters and their GraphQL `where` input.

use serde::{Deserialize, Serialize};

use crate::models::Property;

/// String operation input, e.g. `{ "contains": "lake" }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StringOperationFilterInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
}

impl StringOperationFilterInput {
    pub fn eq(value: impl Into<String>) -> Self {
        Self {
            eq: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn contains(value: impl Into<String>) -> Self {
        Self {
            contains: Some(value.into()),
            ..Self::default()
        }
    }
}

/// Property `where` input of the GraphQL listing query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PropertyFilterInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub and: Option<Vec<PropertyFilterInput>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<StringOperationFilterInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<StringOperationFilterInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StringOperationFilterInput>,
}

/// Filters chosen in the property list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyFilter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Free text matched against name, address and country
    #[serde(default)]
    pub q: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

impl PropertyFilter {
    /// Trimmed copy with blank values removed
    pub fn normalized(&self) -> Self {
        Self {
            name: non_blank(&self.name),
            country: non_blank(&self.country),
            status: non_blank(&self.status),
            q: non_blank(&self.q),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.normalized() == Self::default()
    }

    /// `{ and: [...] }`, or `None` when no filter is set.
    ///
    /// The free-text query has no server-side counterpart and is not part
    /// of the input.
    pub fn where_input(&self) -> Option<PropertyFilterInput> {
        let filter = self.normalized();
        let mut and = Vec::new();

        if let Some(name) = filter.name {
            and.push(PropertyFilterInput {
                name: Some(StringOperationFilterInput::contains(name)),
                ..PropertyFilterInput::default()
            });
        }
        if let Some(country) = filter.country {
            and.push(PropertyFilterInput {
                country: Some(StringOperationFilterInput::contains(country)),
                ..PropertyFilterInput::default()
            });
        }
        if let Some(status) = filter.status {
            and.push(PropertyFilterInput {
                status: Some(StringOperationFilterInput::eq(status)),
                ..PropertyFilterInput::default()
            });
        }

        if and.is_empty() {
            None
        } else {
            Some(PropertyFilterInput {
                and: Some(and),
                ..PropertyFilterInput::default()
            })
        }
    }

    /// Client-side equivalent of the `where` input plus the free text
    pub fn matches(&self, property: &Property) -> bool {
        let filter = self.normalized();

        if let Some(name) = &filter.name {
            if !contains_ci(Some(&property.name), name) {
                return false;
            }
        }
        if let Some(country) = &filter.country {
            if !contains_ci(property.country.as_deref(), country) {
                return false;
            }
        }
        if let Some(status) = &filter.status {
            if &property.status != status {
                return false;
            }
        }
        match &filter.q {
            Some(q) => matches_text(property, q),
            None => true,
        }
    }
}

/// Free-text match over name, address and country
pub fn matches_text(property: &Property, query: &str) -> bool {
    let query = query.trim();
    query.is_empty()
        || contains_ci(Some(&property.name), query)
        || contains_ci(property.address.as_deref(), query)
        || contains_ci(property.country.as_deref(), query)
}
