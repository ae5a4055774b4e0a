//! Tabular data error types

/// Errors raised while decoding a payload into a data set.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The payload was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload parsed, but the top level was not an array.
    #[error("expected a JSON array of rows, got {found}")]
    NotAnArray {
        /// Short description of what was found instead.
        found: &'static str,
    },

    /// A row inside the array was not a flat JSON object.
    #[error("row {index} is not a JSON object")]
    RowNotAnObject {
        /// Zero-based position of the offending row.
        index: usize,
    },
}
