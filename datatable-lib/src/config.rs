//! Presenter configuration

use std::time::Duration;

use serde::Deserialize;

use crate::layout::MOBILE_BREAKPOINT;

/// Who filters and searches the record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// The presenter filters the records it holds.
    #[default]
    Client,
    /// The consumer re-fetches on `Filter`/`Search` events; the presenter
    /// shows `data` as given.
    Server,
}

/// Presenter configuration.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use datatable_lib::config::{FilterMode, TableConfig};
///
/// let config = TableConfig::default()
///     .with_row_key("uuid")
///     .with_filter_mode(FilterMode::Server)
///     .with_search_debounce(Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Record field supplying a stable unique row key.
    ///
    /// Default: `id`
    pub row_key: String,

    /// Client-side or server-side filtering.
    ///
    /// Default: client
    pub filter_mode: FilterMode,

    /// The consumer already sliced `data` to one page.
    ///
    /// Default: false
    pub server_side_pagination: bool,

    /// Quiet period before a search term is emitted.
    ///
    /// Default: 300 ms
    #[serde(rename = "search_debounce_ms", deserialize_with = "millis::deserialize")]
    pub search_debounce: Duration,

    /// Viewport width below which cards are used.
    ///
    /// Default: 1024
    pub mobile_breakpoint: u32,

    /// Message shown when there is nothing to display and no constraint
    /// is active.
    ///
    /// Default: "No data available"
    pub empty_message: String,

    /// Text for missing or null cell values.
    ///
    /// Default: "-"
    pub placeholder: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            row_key: "id".to_string(),
            filter_mode: FilterMode::Client,
            server_side_pagination: false,
            search_debounce: Duration::from_millis(300),
            mobile_breakpoint: MOBILE_BREAKPOINT,
            empty_message: "No data available".to_string(),
            placeholder: "-".to_string(),
        }
    }
}

impl TableConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row key field.
    pub fn with_row_key(mut self, field: impl Into<String>) -> Self {
        self.row_key = field.into();
        self
    }

    /// Sets the filter mode.
    pub fn with_filter_mode(mut self, mode: FilterMode) -> Self {
        self.filter_mode = mode;
        self
    }

    /// Marks incoming data as already paginated.
    pub fn with_server_side_pagination(mut self, enabled: bool) -> Self {
        self.server_side_pagination = enabled;
        self
    }

    /// Sets the search debounce period.
    pub fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = delay;
        self
    }

    /// Sets the mobile breakpoint.
    pub fn with_mobile_breakpoint(mut self, width: u32) -> Self {
        self.mobile_breakpoint = width;
        self
    }

    /// Sets the empty-state message.
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Sets the placeholder for missing values.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Returns `true` when the presenter filters locally.
    pub fn filters_locally(&self) -> bool {
        self.filter_mode == FilterMode::Client
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
