//! Custom error types for the diagnostics library.
//!
//! Only conditions that stop a run are errors: unreadable input or a malformed
//! table. Invalid settings are rejected earlier by
//! [`ConfigValidationError`](crate::config::ConfigValidationError). Degenerate
//! data (empty tables, constant columns, absent key columns) is reported inside
//! the diagnostics themselves.
//!
//! Errors are serializable so they can be shipped to a frontend as
//! `{ "code": ..., "message": ... }`.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the diagnostics library.
#[derive(Error, Debug)]
pub enum DiagnosticsError {
    /// The input file does not exist.
    #[error("Input file not found: {0}")]
    InputNotFound(String),

    /// Two columns share a name after whitespace normalization.
    #[error("Duplicate column name '{0}' after trimming whitespace")]
    DuplicateColumn(String),

    /// A column does not have the same number of entries as the table.
    #[error("Column '{column}' has {actual} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DiagnosticsError>,
    },
}

impl DiagnosticsError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DiagnosticsError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InputNotFound(_) => "INPUT_NOT_FOUND",
            Self::DuplicateColumn(_) => "DUPLICATE_COLUMN",
            Self::LengthMismatch { .. } => "LENGTH_MISMATCH",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error can be fixed by the caller without touching the data
    /// (e.g. pointing at another file or changing a flag).
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InputNotFound(_) => true,
            Self::WithContext { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for DiagnosticsError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("DiagnosticsError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for diagnostics operations.
pub type Result<T> = std::result::Result<T, DiagnosticsError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| DiagnosticsError::Polars(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::io::Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| DiagnosticsError::Io(e).with_context(context))
    }
}
