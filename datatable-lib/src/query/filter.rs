//! Search and per-column filter predicates.

use std::collections::BTreeMap;

use crate::column::{Column, ColumnSet, FilterType};
use crate::model::{TableRecord, Value};

/// Current per-column filter values, keyed by column key.
///
/// Empty values mean "no constraint" and are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    values: BTreeMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter for a column. An empty (or whitespace) value clears it.
    ///
    /// Returns `true` if the state changed.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        let value = value.into();
        if value.trim().is_empty() {
            return self.values.remove(&key).is_some();
        }
        self.values.insert(key, value.clone()) != Some(value)
    }

    /// Returns the filter value for a column.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Removes the filter for a column.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Removes every filter. Returns `true` if any was set.
    pub fn clear(&mut self) -> bool {
        let had_any = !self.values.is_empty();
        self.values.clear();
        had_any
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterates over `(column key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut state = Self::new();
        for (k, v) in iter {
            state.set(k, v);
        }
        state
    }
}

/// Returns `true` if any field of the record contains `term`,
/// case-insensitively. An empty term matches every record.
pub fn matches_search<R: TableRecord>(record: &R, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    record
        .values()
        .iter()
        .any(|value| value.to_string().to_lowercase().contains(&needle))
}

/// Returns `true` if the record satisfies one column filter.
///
/// - `text`: case-insensitive substring
/// - `select`: exact string equality
/// - `date`: same calendar day, substring when either side is not a date
pub fn matches_filter<R: TableRecord>(record: &R, column: &Column, filter: &str) -> bool {
    let value = record.field(&column.data_index).unwrap_or(Value::Null);
    match column.filter_type {
        FilterType::Text => contains_ignore_case(&value, filter),
        FilterType::Select => value.to_string() == filter,
        FilterType::Date => match (value.as_date(), Value::from(filter).as_date()) {
            (Some(actual), Some(wanted)) => actual == wanted,
            _ => contains_ignore_case(&value, filter),
        },
    }
}

fn contains_ignore_case(value: &Value, filter: &str) -> bool {
    value
        .to_string()
        .to_lowercase()
        .contains(&filter.to_lowercase())
}

/// Returns the indices of the records matching the search term AND every
/// filter, in original order.
///
/// Filters naming a column outside `columns` are ignored.
pub fn filter_indices<R: TableRecord>(
    records: &[R],
    columns: &ColumnSet,
    search: &str,
    filters: &FilterState,
) -> Vec<usize> {
    let active: Vec<(&Column, &str)> = filters
        .iter()
        .filter_map(|(key, value)| columns.get(key).map(|column| (column, value)))
        .collect();

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            matches_search(*record, search)
                && active
                    .iter()
                    .all(|(column, value)| matches_filter(*record, column, value))
        })
        .map(|(index, _)| index)
        .collect()
}
