//! Config file loading.
//!
//! ```json
//! {
//!   "table": { "row_key": "id", "search_debounce_ms": 300 },
//!   "columns": [
//!     { "key": "id", "title": "ID", "sortable": true, "align": "right" },
//!     { "key": "status", "filter": "select", "options": [{ "label": "Open", "value": "open" }] },
//!     { "key": "created", "data_index": "created_at", "format": "date" },
//!     { "key": "stack", "mobile_priority": "secondary" }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use datatable_lib::column::{Alignment, Column, FilterOption, FilterType, MobilePriority};
use datatable_lib::config::TableConfig;
use datatable_lib::model::{Row, Value};
use serde::Deserialize;

use crate::error::CliError;
use crate::paths;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub table: TableConfig,
    pub columns: Vec<ColumnEntry>,
}

/// Serialized form of a [`Column`].
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnEntry {
    key: String,
    title: Option<String>,
    data_index: Option<String>,
    #[serde(default)]
    sortable: bool,
    /// Filter type; the column is filterable when set.
    filter: Option<FilterType>,
    #[serde(default)]
    options: Vec<FilterOption>,
    width: Option<u16>,
    #[serde(default)]
    align: Alignment,
    #[serde(default)]
    mobile_priority: MobilePriority,
    format: Option<CellFormat>,
}

/// Named cell transforms available from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellFormat {
    /// Upper-case text.
    Upper,
    /// Calendar date (`YYYY-MM-DD`) of a timestamp.
    Date,
    /// `Yes`/`No` for booleans.
    Bool,
}

impl CellFormat {
    fn apply(self, value: &Value) -> String {
        match (self, value) {
            (CellFormat::Upper, value) => value.to_string().to_uppercase(),
            (CellFormat::Date, value) => match value.as_date() {
                Some(date) => date.format("%Y-%m-%d").to_string(),
                None => value.to_string(),
            },
            (CellFormat::Bool, Value::Bool(true)) => "Yes".to_string(),
            (CellFormat::Bool, Value::Bool(false)) => "No".to_string(),
            (CellFormat::Bool, value) => value.to_string(),
        }
    }
}

impl From<ColumnEntry> for Column {
    fn from(entry: ColumnEntry) -> Self {
        let title = entry.title.unwrap_or_else(|| entry.key.clone());
        let mut column = Column::new(entry.key, title).align(entry.align);
        if let Some(field) = entry.data_index {
            column = column.data_index(field);
        }
        if entry.sortable {
            column = column.sortable();
        }
        if let Some(filter_type) = entry.filter {
            column = column.filterable(filter_type);
        }
        if !entry.options.is_empty() {
            column = column.select_options(entry.options);
        }
        if let Some(width) = entry.width {
            column = column.width(width);
        }
        if entry.mobile_priority == MobilePriority::Secondary {
            column = column.secondary();
        }
        if let Some(format) = entry.format {
            column = column.render(move |value| format.apply(value));
        }
        column
    }
}

impl Settings {
    /// Loads `path`, or the default config file when `path` is `None`.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        match path {
            Some(path) => Self::read(path),
            None => match paths::config_file() {
                Some(default) if default.exists() => Self::read(&default),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> Result<Self, CliError> {
        log::info!("loading config from {}", path.display());
        let text = fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        serde_json::from_str(&text).map_err(|e| CliError::json(path, e))
    }

    /// Configured columns, or columns inferred from the first record.
    pub fn columns(&mut self, rows: &[Row]) -> Vec<Column> {
        if self.columns.is_empty() {
            return infer_columns(rows);
        }
        std::mem::take(&mut self.columns)
            .into_iter()
            .map(Column::from)
            .collect()
    }
}

/// One sortable text-filterable column per field of the first record, in
/// name order.
fn infer_columns(rows: &[Row]) -> Vec<Column> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    log::debug!("inferring {} columns from first record", first.len());
    first
        .field_names()
        .into_iter()
        .map(|name| {
            Column::new(name, name)
                .sortable()
                .filterable(FilterType::Text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use datatable_lib::config::FilterMode;

    use super::*;

    #[test]
    fn test_load_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{
                "table": { "row_key": "uuid", "filter_mode": "server", "search_debounce_ms": 500 },
                "columns": [
                    { "key": "uuid", "title": "Key", "width": 12 },
                    { "key": "status", "options": [{ "label": "Open", "value": "open" }] },
                    { "key": "active", "format": "bool", "mobile_priority": "secondary" }
                ]
            }"#,
        )
        .unwrap();

        let mut settings = Settings::load(Some(path.as_path())).unwrap();
        assert_eq!(settings.table.row_key, "uuid");
        assert_eq!(settings.table.filter_mode, FilterMode::Server);
        assert_eq!(settings.table.search_debounce, Duration::from_millis(500));

        let columns = settings.columns(&[]);
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].title, "Key");
        assert_eq!(columns[0].width, Some(12));
        assert_eq!(columns[1].title, "status");
        assert_eq!(columns[1].filter_type, FilterType::Select);
        assert!(columns[1].filterable);
        assert_eq!(columns[2].mobile_priority, MobilePriority::Secondary);
        assert_eq!(columns[2].cell_text(Some(&Value::Bool(true)), "-"), "Yes");
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(dir.path().join("absent.json").as_path())).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }

    #[test]
    fn test_unknown_column_fields_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "columns": [{ "key": "id", "sortible": true }] }"#).unwrap();
        assert!(matches!(
            Settings::load(Some(path.as_path())),
            Err(CliError::Json { .. })
        ));
    }

    #[test]
    fn test_infer_columns_from_first_record() {
        let rows = vec![Row::new().set("status", "open").set("id", 3).set("age", 12)];
        let columns = Settings::default().columns(&rows);
        let keys: Vec<&str> = columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["age", "id", "status"]);
        assert!(columns.iter().all(|c| c.sortable && c.filterable));
    }

    #[test]
    fn test_date_format() {
        let value = Value::from("2024-06-30T22:10:00Z");
        assert_eq!(CellFormat::Date.apply(&value), "2024-06-30");
        assert_eq!(CellFormat::Date.apply(&Value::from("soon")), "soon");
        assert_eq!(CellFormat::Upper.apply(&Value::from("warn")), "WARN");
    }
}
