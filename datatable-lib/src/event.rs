//! Outbound presenter events.
//!
//! The presenter never calls back into its host. Every user intent that a
//! consumer may want to act on (re-fetching sorted or filtered data,
//! opening a record, exporting it) is queued as a [`TableEvent`] and
//! drained with [`Presenter::drain_events`](crate::Presenter::drain_events).

use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;

use crate::query::{FilterState, SortDirection};

/// A named row operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    View,
    Edit,
    Delete,
    Export,
    Copy,
}

impl ActionKind {
    pub const ALL: [ActionKind; 5] = [
        ActionKind::View,
        ActionKind::Edit,
        ActionKind::Delete,
        ActionKind::Export,
        ActionKind::Copy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ActionKind::View => "view",
            ActionKind::Edit => "edit",
            ActionKind::Delete => "delete",
            ActionKind::Export => "export",
            ActionKind::Copy => "copy",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The set of row actions a consumer has wired up.
///
/// Presence of a kind is what makes its control render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actions {
    enabled: BTreeSet<ActionKind>,
}

impl Actions {
    pub fn none() -> Self {
        Self::default()
    }

    /// Enable an action (builder pattern).
    pub fn with(mut self, kind: ActionKind) -> Self {
        self.enabled.insert(kind);
        self
    }

    pub fn contains(&self, kind: ActionKind) -> bool {
        self.enabled.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    /// Enabled actions in display order.
    pub fn to_vec(&self) -> Vec<ActionKind> {
        self.enabled.iter().copied().collect()
    }
}

impl FromIterator<ActionKind> for Actions {
    fn from_iter<I: IntoIterator<Item = ActionKind>>(iter: I) -> Self {
        Self {
            enabled: iter.into_iter().collect(),
        }
    }
}

/// A notification emitted by the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// A sortable header was activated. `field` is the column's record field.
    Sort {
        field: String,
        direction: SortDirection,
    },
    /// The composite filter state changed.
    Filter(FilterState),
    /// The search term settled after the debounce period.
    Search(String),
    /// A different page or page size was requested.
    PaginationChange { page: usize, page_size: usize },
    /// A row action was triggered for the row with key `key`.
    Action { kind: ActionKind, key: String },
}
