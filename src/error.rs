//! Error types for dataset loading.

use thiserror::Error;

/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Errors raised while turning a data source into a [`crate::data::model::Dataset`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// The HTTP request for a remote CSV failed.
    #[error("Failed to fetch {url}: {message}")]
    Http { url: String, message: String },

    #[error("Unsupported file extension: .{extension}")]
    UnsupportedFormat { extension: String },

    /// A required column is absent from the header or schema.
    #[error("Missing column '{column}'")]
    MissingColumn { column: String },

    /// A cell could not be parsed as the column's type.
    #[error("Row {row}, column '{column}': '{value}' is not a valid value")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    /// A required text field is empty.
    #[error("Row {row}: '{column}' is required")]
    MissingField { row: usize, column: String },

    /// The document does not have the expected shape.
    #[error("Malformed input: {0}")]
    Malformed(String),
}

impl LoadError {
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    pub fn invalid_value(row: usize, column: &str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            row,
            column: column.to_string(),
            value: value.into(),
        }
    }
}
