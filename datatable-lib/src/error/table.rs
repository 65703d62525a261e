//! Errors returned by presenter transitions.

use crate::event::ActionKind;

/// Pagination state that violates `page_size > 0` or `current >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// Page size of zero.
    #[error("Page size must be greater than zero")]
    ZeroPageSize,

    /// Page number of zero (pages are 1-based).
    #[error("Page numbers start at 1")]
    ZeroPage,
}

/// Error type for presenter transitions.
///
/// A failed transition leaves the presenter state untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The column key is not part of the column set.
    #[error("Unknown column '{key}'")]
    UnknownColumn { key: String },

    /// The column exists but does not accept filters.
    #[error("Column '{key}' is not filterable")]
    NotFilterable { key: String },

    /// The column exists but does not accept sorting.
    #[error("Column '{key}' is not sortable")]
    NotSortable { key: String },

    /// The requested row action has not been enabled.
    #[error("Action '{action}' is not enabled")]
    ActionDisabled { action: ActionKind },

    /// No record in the current data set carries this row key.
    #[error("No row with key '{key}'")]
    UnknownRow { key: String },

    /// Invalid pagination request.
    #[error(transparent)]
    Pagination(#[from] PaginationError),
}

impl TableError {
    /// Creates a new unknown column error.
    pub fn unknown_column(key: impl Into<String>) -> Self {
        Self::UnknownColumn { key: key.into() }
    }

    /// Creates a new not-filterable error.
    pub fn not_filterable(key: impl Into<String>) -> Self {
        Self::NotFilterable { key: key.into() }
    }

    /// Creates a new not-sortable error.
    pub fn not_sortable(key: impl Into<String>) -> Self {
        Self::NotSortable { key: key.into() }
    }

    /// Creates a new unknown row error.
    pub fn unknown_row(key: impl Into<String>) -> Self {
        Self::UnknownRow { key: key.into() }
    }
}
