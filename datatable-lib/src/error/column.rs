//! Errors raised while assembling a column set.

/// Error type for [`ColumnSet`](crate::column::ColumnSet) construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColumnError {
    /// Two columns share the same key.
    #[error("Duplicate column key '{key}'")]
    DuplicateKey { key: String },

    /// A column was declared with an empty key.
    #[error("Column key must not be empty")]
    EmptyKey,
}

impl ColumnError {
    /// Creates a new duplicate key error.
    pub fn duplicate(key: impl Into<String>) -> Self {
        Self::DuplicateKey { key: key.into() }
    }
}
