//! Single-column sort state and stable ordering.

use std::fmt;

use serde::Deserialize;

use crate::model::{TableRecord, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Header indicator for this direction.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// The active sort: one column, one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    /// Key of the sorted column.
    pub column: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    /// Sort state after activating the header of `column`.
    ///
    /// The same column toggles its direction; a different column starts
    /// ascending.
    pub fn next(current: Option<&SortState>, column: &str) -> SortState {
        match current {
            Some(sort) if sort.column == column => {
                SortState::new(column, sort.direction.toggled())
            }
            _ => SortState::new(column, SortDirection::Asc),
        }
    }
}

/// Stable-sorts `indices` by the value each record holds at `field`.
///
/// `Desc` reverses the comparator rather than the result, so records with
/// equal values keep their relative order in both directions.
pub fn sort_indices<R: TableRecord>(
    records: &[R],
    indices: &mut [usize],
    field: &str,
    direction: SortDirection,
) {
    let keys: Vec<Value> = records
        .iter()
        .map(|record| record.field(field).unwrap_or(Value::Null))
        .collect();

    indices.sort_by(|&a, &b| {
        let ordering = keys[a].compare(&keys[b]);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}
