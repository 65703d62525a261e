//! Record access for the presenter

use std::collections::HashMap;

use super::Value;

/// Read-only field access for anything the presenter can display.
///
/// The presenter never constructs or mutates records. It only reads the
/// fields named by column descriptors and, for free-text search, every
/// field value the record carries.
///
/// # Example
///
/// ```
/// use datatable_lib::model::{TableRecord, Value};
///
/// #[derive(Clone)]
/// struct Job {
///     id: u32,
///     queue: String,
/// }
///
/// impl TableRecord for Job {
///     fn field(&self, name: &str) -> Option<Value> {
///         match name {
///             "id" => Some(self.id.into()),
///             "queue" => Some(self.queue.as_str().into()),
///             _ => None,
///         }
///     }
///
///     fn values(&self) -> Vec<Value> {
///         vec![self.id.into(), self.queue.as_str().into()]
///     }
/// }
/// ```
pub trait TableRecord {
    /// Returns the value of a field, or `None` when the record lacks it.
    fn field(&self, name: &str) -> Option<Value>;

    /// Returns every field value of the record, in any order.
    fn values(&self) -> Vec<Value>;
}

/// A dynamic record holding field values in a map.
///
/// # Example
///
/// ```
/// use datatable_lib::model::{Row, TableRecord, Value};
///
/// let row = Row::new()
///     .set("id", 17)
///     .set("status", "active");
///
/// assert_eq!(row.field("status"), Some(Value::from("active")));
/// assert_eq!(row.field("missing"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: HashMap<String, Value>,
}

impl Row {
    /// Creates a new empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the row contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns the field names of this row, sorted.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl TableRecord for Row {
    fn field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }

    fn values(&self) -> Vec<Value> {
        self.fields.values().cloned().collect()
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Row {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            fields: map.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl TableRecord for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).map(Value::from)
    }

    fn values(&self) -> Vec<Value> {
        serde_json::Map::values(self).map(Value::from).collect()
    }
}
