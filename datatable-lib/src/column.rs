//! Column descriptors and the validated column set.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::ColumnError;
use crate::model::Value;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// How a column's filter control interprets its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Free text, case-insensitive substring match.
    #[default]
    Text,
    /// Discrete choice, exact match.
    Select,
    /// Calendar date, same-day match.
    Date,
}

/// Whether a column is always shown on a card or hidden behind the
/// per-card disclosure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MobilePriority {
    #[default]
    Primary,
    Secondary,
}

/// One choice of a `select` filter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
}

impl FilterOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Value to text transform applied to a cell.
pub type CellRenderer = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Column configuration.
///
/// Columns define both the display order and, through
/// [`MobilePriority`], the grouping used by the card layout.
///
/// # Examples
///
/// ```
/// use datatable_lib::column::{Alignment, Column, FilterType};
///
/// let columns = vec![
///     Column::new("id", "ID").sortable().align(Alignment::Right),
///     Column::new("status", "Status").filterable(FilterType::Select),
///     Column::new("stack", "Stack trace").secondary(),
/// ];
/// ```
#[derive(Clone)]
pub struct Column {
    /// Unique identifier within the column set.
    pub key: String,
    /// Display label.
    pub title: String,
    /// Record field to read.
    pub data_index: String,
    /// Optional value to text transform.
    pub render: Option<CellRenderer>,
    pub sortable: bool,
    pub filterable: bool,
    pub filter_type: FilterType,
    /// Choices offered by a `select` filter.
    pub filter_options: Vec<FilterOption>,
    /// Preferred width in character cells.
    pub width: Option<u16>,
    pub align: Alignment,
    pub mobile_priority: MobilePriority,
}

impl Column {
    /// Create a new column reading the record field named `key`.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            data_index: key.clone(),
            key,
            title: title.into(),
            render: None,
            sortable: false,
            filterable: false,
            filter_type: FilterType::default(),
            filter_options: Vec::new(),
            width: None,
            align: Alignment::default(),
            mobile_priority: MobilePriority::default(),
        }
    }

    /// Read a different record field than the column key.
    pub fn data_index(mut self, field: impl Into<String>) -> Self {
        self.data_index = field.into();
        self
    }

    /// Set the cell transform.
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Make the column filterable with the given filter type.
    pub fn filterable(mut self, filter_type: FilterType) -> Self {
        self.filterable = true;
        self.filter_type = filter_type;
        self
    }

    /// Make the column a `select` filter with the given choices.
    pub fn select_options(mut self, options: Vec<FilterOption>) -> Self {
        self.filterable = true;
        self.filter_type = FilterType::Select;
        self.filter_options = options;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Hide this column behind the card disclosure on narrow viewports.
    pub fn secondary(mut self) -> Self {
        self.mobile_priority = MobilePriority::Secondary;
        self
    }

    /// Text for a cell of this column.
    ///
    /// Missing and null values become `placeholder`; the render transform
    /// only sees present values.
    pub fn cell_text(&self, value: Option<&Value>, placeholder: &str) -> String {
        match value {
            None | Some(Value::Null) => placeholder.to_string(),
            Some(value) => match &self.render {
                Some(render) => render(value),
                None => value.to_string(),
            },
        }
    }

    /// Whether this column looks like it names its record.
    fn is_identity(&self) -> bool {
        [self.key.as_str(), self.data_index.as_str()]
            .iter()
            .any(|name| looks_like_identifier(name))
    }
}

fn looks_like_identifier(name: &str) -> bool {
    matches!(name.to_ascii_lowercase().as_str(), "id" | "name" | "title" | "key")
        || name.ends_with("_id")
        || name.ends_with("Id")
        || name.ends_with("_name")
        || name.ends_with("Name")
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("data_index", &self.data_index)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("filter_type", &self.filter_type)
            .field("filter_options", &self.filter_options)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("mobile_priority", &self.mobile_priority)
            .finish()
    }
}

// =============================================================================
// ColumnSet
// =============================================================================

/// An ordered set of columns with unique, non-empty keys.
#[derive(Debug, Clone, Default)]
pub struct ColumnSet {
    columns: Vec<Column>,
}

impl ColumnSet {
    /// Validates and wraps the given columns.
    pub fn new(columns: Vec<Column>) -> Result<Self, ColumnError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if column.key.is_empty() {
                return Err(ColumnError::EmptyKey);
            }
            if !seen.insert(column.key.as_str()) {
                return Err(ColumnError::duplicate(&column.key));
            }
        }
        Ok(Self { columns })
    }

    /// Get a column by key.
    pub fn get(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Get the position of a column by key.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The column used as a card title: the first identifier-like column,
    /// falling back to the first column.
    pub fn identity(&self) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.is_identity())
            .or_else(|| self.columns.first())
    }

    /// Columns always shown on a card, excluding the identity column.
    pub fn primary(&self) -> impl Iterator<Item = &Column> {
        let identity = self.identity().map(|c| c.key.as_str());
        self.columns.iter().filter(move |c| {
            c.mobile_priority == MobilePriority::Primary && Some(c.key.as_str()) != identity
        })
    }

    /// Columns shown only when a card is expanded.
    pub fn secondary(&self) -> impl Iterator<Item = &Column> {
        let identity = self.identity().map(|c| c.key.as_str());
        self.columns.iter().filter(move |c| {
            c.mobile_priority == MobilePriority::Secondary && Some(c.key.as_str()) != identity
        })
    }

    pub fn has_secondary(&self) -> bool {
        self.secondary().next().is_some()
    }
}

impl<'a> IntoIterator for &'a ColumnSet {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_set_rejects_duplicate_and_empty_keys() {
        let err = ColumnSet::new(vec![
            Column::new("id", "ID"),
            Column::new("status", "Status"),
            Column::new("id", "Identifier"),
        ])
        .unwrap_err();
        assert_eq!(err, ColumnError::duplicate("id"));

        let err = ColumnSet::new(vec![Column::new("", "Blank")]).unwrap_err();
        assert_eq!(err, ColumnError::EmptyKey);
    }

    #[test]
    fn test_primary_and_secondary_skip_identity() {
        let set = ColumnSet::new(vec![
            Column::new("id", "ID"),
            Column::new("status", "Status"),
            Column::new("stack", "Stack").secondary(),
        ])
        .unwrap();
        let primary: Vec<&str> = set.primary().map(|c| c.key.as_str()).collect();
        assert_eq!(primary, vec!["status"]);
        assert!(set.has_secondary());
    }

    #[test]
    fn test_identity_prefers_identifier_columns() {
        let set = ColumnSet::new(vec![
            Column::new("status", "Status"),
            Column::new("job_id", "Job"),
            Column::new("name", "Name"),
        ])
        .unwrap();
        assert_eq!(set.identity().unwrap().key, "job_id");
    }

    #[test]
    fn test_identity_falls_back_to_first_column() {
        let set = ColumnSet::new(vec![
            Column::new("status", "Status"),
            Column::new("paid", "Paid"),
        ])
        .unwrap();
        assert_eq!(set.identity().unwrap().key, "status");
    }

    #[test]
    fn test_identity_uses_data_index() {
        let set = ColumnSet::new(vec![
            Column::new("level", "Level"),
            Column::new("who", "Actor").data_index("userName"),
        ])
        .unwrap();
        assert_eq!(set.identity().unwrap().key, "who");
    }

    #[test]
    fn test_cell_text_placeholder_skips_render() {
        let column = Column::new("count", "Count").render(|v| format!("{v} items"));
        assert_eq!(column.cell_text(Some(&Value::Int(3)), "-"), "3 items");
        assert_eq!(column.cell_text(Some(&Value::Null), "-"), "-");
        assert_eq!(column.cell_text(None, "N/A"), "N/A");
    }
}
