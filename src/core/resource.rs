//! Purpose: Resource records as supplied by loaders, and type-based selection over them.
//! Exports: `Resource`, `ANY_RESOURCE_TYPE`, `filter_resources_by_type`, `parse_resources`.
//! Role: Rules target one resource type (or `*`); this narrows a loaded set before evaluation.
//! Invariants: Filtering preserves input order and never drops a matching resource.
//! Invariants: The wildcard type returns the caller's slice borrowed, never a copy.
//! Invariants: JSON field names match the loader format (`ID`, `Type`, `Category`, ...).

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::core::error::{Error, ErrorKind};
use crate::json::parse;

/// Resource type that selects every resource.
pub const ANY_RESOURCE_TYPE: &str = "*";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "Type")]
    pub resource_type: String,
    /// Loader-defined grouping such as `resource`, `data`, or `provider`.
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "Properties", default)]
    pub properties: Value,
    #[serde(rename = "Filename", default)]
    pub filename: String,
    #[serde(rename = "LineNumber", default)]
    pub line_number: u64,
}

impl Resource {
    pub fn new(id: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_type: resource_type.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_properties(mut self, properties: Value) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_location(mut self, filename: impl Into<String>, line_number: u64) -> Self {
        self.filename = filename.into();
        self.line_number = line_number;
        self
    }
}

pub fn filter_resources_by_type<'a>(
    resources: &'a [Resource],
    resource_type: &str,
) -> Cow<'a, [Resource]> {
    if resource_type == ANY_RESOURCE_TYPE {
        return Cow::Borrowed(resources);
    }
    let filtered: Vec<Resource> = resources
        .iter()
        .filter(|resource| resource.resource_type == resource_type)
        .cloned()
        .collect();
    trace!(
        resource_type,
        total = resources.len(),
        kept = filtered.len(),
        "filtered resources by type"
    );
    Cow::Owned(filtered)
}

/// Decodes a JSON array of resources, or a single resource object.
///
/// The document shape is chosen from the first non-whitespace byte so decode
/// errors keep serde's field-level detail (e.g. a missing `Type`).
pub fn parse_resources(input: &str) -> Result<Vec<Resource>, Error> {
    let decoded = if input.trim_start().starts_with('[') {
        parse::from_str::<Vec<Resource>>(input)
    } else {
        parse::from_str::<Resource>(input).map(|resource| vec![resource])
    };
    decoded.map_err(|err| {
        Error::new(ErrorKind::Parse)
            .with_message(format!("invalid resource document: {err}"))
            .with_hint(parse::hint_for_error(&err, "resources"))
            .with_source(err)
    })
}
