//! Unified error types for chatlens.
//!
//! This module provides a single [`ReportError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - Two load-time conditions — a missing input file and undecodable JSON —
//!   are *recoverable*: the pipeline reports them and exits with no data
//!   instead of failing. Everything else aborts the run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::aggregate::Aggregate;
///
/// fn my_function() -> Result<Vec<Aggregate>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ReportError>;

/// The error type for all chatlens operations.
///
/// Each variant contains context about what went wrong and, where applicable,
/// the underlying source error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    /// The input path does not resolve to a readable file.
    ///
    /// Recoverable: the pipeline prints a diagnostic and produces no output,
    /// as if there were no input at all.
    #[error("file {} does not exist", path.display())]
    InputNotFound {
        /// The path that was requested
        path: PathBuf,
    },

    /// The input file is not valid JSON.
    ///
    /// Recoverable in the same way as [`InputNotFound`](Self::InputNotFound).
    #[error("failed to decode JSON{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    MalformedJson {
        /// The underlying decode error
        #[source]
        source: serde_json::Error,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// A required field is absent from the parsed document.
    ///
    /// Raised by the flattener when the export has no `messages` key.
    #[error("missing field `{field}` in export")]
    MissingField {
        /// Name of the absent field
        field: &'static str,
    },

    /// The document structure does not match a chat export.
    ///
    /// Raised when `messages` is present but is not an array of objects.
    #[error("invalid export structure: {message}")]
    InvalidFormat {
        /// Description of what's wrong
        message: String,
    },

    /// A message carries a timestamp that cannot be parsed.
    ///
    /// Fatal: the whole run aborts rather than skipping the message, so a
    /// partial report is never written.
    #[error("cannot parse timestamp '{value}' (message #{index})")]
    MalformedTimestamp {
        /// The offending timestamp text
        value: String,
        /// Zero-based position of the message in the export
        index: usize,
    },

    /// A chart could not be rendered.
    ///
    /// Never fatal to the remaining renders; the pipeline reports it and
    /// moves on to the next chart.
    #[error("failed to render {chart}: {message}")]
    Chart {
        /// Output name of the chart (without extension)
        chart: String,
        /// Description from the rendering backend
        message: String,
    },

    /// An I/O error occurred.
    ///
    /// This typically happens when the output directory cannot be created
    /// or the disk is full while writing artifacts.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ReportError {
    /// Creates an error for a missing input file.
    pub fn input_not_found(path: impl Into<PathBuf>) -> Self {
        ReportError::InputNotFound { path: path.into() }
    }

    /// Creates an error for undecodable JSON input.
    pub fn malformed_json(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        ReportError::MalformedJson { source, path }
    }

    /// Creates a missing-field error.
    pub fn missing_field(field: &'static str) -> Self {
        ReportError::MissingField { field }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        ReportError::InvalidFormat {
            message: message.into(),
        }
    }

    /// Creates a malformed timestamp error.
    pub fn malformed_timestamp(value: impl Into<String>, index: usize) -> Self {
        ReportError::MalformedTimestamp {
            value: value.into(),
            index,
        }
    }

    /// Creates a chart rendering error.
    pub fn chart(chart: impl Into<String>, message: impl Into<String>) -> Self {
        ReportError::Chart {
            chart: chart.into(),
            message: message.into(),
        }
    }

    /// Returns `true` for the two load-time conditions the pipeline recovers
    /// from by exiting without data: a missing input file and invalid JSON.
    pub fn is_recoverable_load(&self) -> bool {
        matches!(
            self,
            ReportError::InputNotFound { .. } | ReportError::MalformedJson { .. }
        )
    }

    /// Returns `true` if this is a missing-field error.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, ReportError::MissingField { .. })
    }

    /// Returns `true` if this is a malformed timestamp error.
    pub fn is_malformed_timestamp(&self) -> bool {
        matches!(self, ReportError::MalformedTimestamp { .. })
    }

    /// Returns `true` if this is a chart rendering error.
    pub fn is_chart(&self) -> bool {
        matches!(self, ReportError::Chart { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
