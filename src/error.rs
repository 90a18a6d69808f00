//! Error types for the PCA conversion pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`SheetError`] - input spreadsheet reading/decoding errors
//! - [`OutputError`] - CSV/JSON sink errors
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! Classification and field normalization deliberately have no error types:
//! per the leniency policy, they degrade to defaults instead of failing.

use thiserror::Error;

// =============================================================================
// Input Spreadsheet Errors
// =============================================================================

/// Errors while reading and decoding the input sheet.
#[derive(Debug, Error)]
pub enum SheetError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to decode content.
    #[error("Failed to decode content: {0}")]
    EncodingError(String),

    /// Malformed delimited content.
    #[error("Invalid delimited data: {0}")]
    ParseError(String),

    /// Empty file.
    #[error("Input file is empty")]
    EmptyFile,
}

impl From<csv::Error> for SheetError {
    fn from(err: csv::Error) -> Self {
        SheetError::ParseError(err.to_string())
    }
}

// =============================================================================
// Output Sink Errors
// =============================================================================

/// Errors while writing the CSV or JSON sinks.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to write file.
    #[error("Failed to write output: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("CSV write error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON write error: {0}")]
    JsonError(#[from] serde_json::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the main error type returned by [`crate::transform::pipeline::convert_file`].
/// Row-level problems never surface here; rows are skipped or ignored instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input sheet error.
    #[error("Sheet error: {0}")]
    Sheet(#[from] SheetError),

    /// Output sink error.
    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    /// No rows to convert.
    #[error("No rows to convert")]
    EmptyInput,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for input sheet operations.
pub type SheetResult<T> = Result<T, SheetError>;

/// Result type for output sink operations.
pub type OutputResult<T> = Result<T, OutputError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
