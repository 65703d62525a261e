//! Errors raised while reading a data source payload.

/// Error type for [`SourcePage`](crate::source::SourcePage) parsing.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The payload is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload root is not a JSON object.
    #[error("Payload root must be a JSON object")]
    NotAnObject,

    /// No record collection could be located in the payload.
    #[error("No record collection found{}", key.as_ref().map(|k| format!(" under '{k}'")).unwrap_or_default())]
    MissingCollection { key: Option<String> },

    /// The `pagination` member is present but unusable.
    #[error("Invalid pagination: {message}")]
    Pagination { message: String },
}

impl SourceError {
    /// Creates a new pagination error.
    pub fn pagination(message: impl Into<String>) -> Self {
        Self::Pagination {
            message: message.into(),
        }
    }
}
