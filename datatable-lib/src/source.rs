//! REST-style list payloads.
//!
//! Dashboard endpoints answer list requests with an envelope:
//!
//! ```json
//! { "data": [ {...}, {...} ], "pagination": { "page": 1, "limit": 20, "total": 57 } }
//! ```
//!
//! Some endpoints name the collection after the resource instead
//! (`{ "jobs": [...] }`). [`SourcePage::from_json`] accepts both.

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::SourceError;
use crate::model::Row;
use crate::query::Pagination;

/// One page of records as delivered by a data source.
#[derive(Debug, Clone, Default)]
pub struct SourcePage {
    pub rows: Vec<Row>,
    /// Server pagination, when the payload carries one.
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct RawPagination {
    #[serde(default = "first_page")]
    page: usize,
    #[serde(alias = "page_size", alias = "pageSize")]
    limit: usize,
    #[serde(default)]
    total: usize,
}

fn first_page() -> usize {
    1
}

impl SourcePage {
    /// Parses a list payload.
    ///
    /// With `collection_key`, the records are read from that member.
    /// Without it, `data` is used when present, otherwise the first
    /// array-valued member other than `pagination`.
    ///
    /// A collection that is not an array yields no rows. Items that are not
    /// objects are skipped.
    pub fn from_json(text: &str, collection_key: Option<&str>) -> Result<Self, SourceError> {
        let root: JsonValue = serde_json::from_str(text)?;
        let JsonValue::Object(mut root) = root else {
            return Err(SourceError::NotAnObject);
        };

        let pagination = match root.remove("pagination") {
            None | Some(JsonValue::Null) => None,
            Some(raw) => Some(parse_pagination(raw)?),
        };

        let collection = match collection_key {
            Some(key) => root
                .remove(key)
                .ok_or_else(|| SourceError::MissingCollection {
                    key: Some(key.to_string()),
                })?,
            None => match root.remove("data") {
                Some(data) => data,
                None => {
                    let key = root
                        .iter()
                        .find(|(_, value)| value.is_array())
                        .map(|(key, _)| key.clone())
                        .ok_or(SourceError::MissingCollection { key: None })?;
                    root.remove(&key).unwrap_or_default()
                }
            },
        };

        Ok(Self {
            rows: rows_from(collection),
            pagination,
        })
    }
}

fn parse_pagination(raw: JsonValue) -> Result<Pagination, SourceError> {
    let raw: RawPagination =
        serde_json::from_value(raw).map_err(|e| SourceError::pagination(e.to_string()))?;
    Pagination::new(raw.page, raw.limit, raw.total).map_err(|e| SourceError::pagination(e.to_string()))
}

fn rows_from(collection: JsonValue) -> Vec<Row> {
    let JsonValue::Array(items) = collection else {
        log::warn!(
            "record collection is {}, not an array; treating as empty",
            json_type(&collection)
        );
        return Vec::new();
    };

    let total = items.len();
    let rows: Vec<Row> = items
        .into_iter()
        .filter_map(|item| match item {
            JsonValue::Object(map) => Some(Row::from(map)),
            other => {
                log::warn!("skipping non-object record: {}", json_type(&other));
                None
            }
        })
        .collect();
    log::debug!("parsed {} of {total} records", rows.len());
    rows
}

fn json_type(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
