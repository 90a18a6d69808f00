//! # Pcaload - PCA planning sheet to PNCP import format
//!
//! Pcaload converts a government procurement-planning spreadsheet (PCA) into
//! the two documents the PNCP import system consumes: a semicolon CSV
//! (UTF-8 with BOM) and a JSON array, both carrying the same 20 fields.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  PCA sheet  │────▶│   Parser    │────▶│  Transform  │────▶│  CSV + JSON │
//! │  (CSV-ish)  │     │ (auto-enc)  │     │ (classify + │     │  (PNCP)     │
//! └─────────────┘     └─────────────┘     │  normalize) │     └─────────────┘
//!                                         └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pcaload::{convert_file, ConvertOptions};
//!
//! let result = convert_file("PCA 2025.csv", ConvertOptions::default()).unwrap();
//! println!("Converted {} items", result.records.len());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (RawRow, OutputRecord, Category, Unit)
//! - [`parser`] - Delimited input with encoding auto-detection
//! - [`catalog`] - Keyword taxonomy, classifier, and item-code synthesis
//! - [`normalize`] - Monetary, quantity, date, and text normalization
//! - [`transform`] - Row assembly and the conversion pipeline
//! - [`output`] - PNCP CSV and JSON sinks
//! - [`report`] - Console run summary

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Classification and normalization engine
pub mod catalog;
pub mod normalize;

// Transformation
pub mod transform;

// Sinks and reporting
pub mod output;
pub mod report;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{OutputError, PipelineError, SheetError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Category, Classification, NormalizedRow, OutputRecord, RawRow, Unit};

// =============================================================================
// Re-exports - Parser
// =============================================================================

pub use parser::{
    detect_delimiter, detect_encoding, read_sheet_bytes, read_sheet_file, SheetData,
};

// =============================================================================
// Re-exports - Catalog
// =============================================================================

pub use catalog::{
    best_match, Classifier, CodeBook, Domain, TaxonomyEntry, MATERIAL_CLASSES, SERVICE_CLASSES,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::{
    convert_bytes, convert_file, convert_rows, ConvertOptions, ConvertResult,
};

// =============================================================================
// Re-exports - Output and report
// =============================================================================

pub use output::{csv_string, json_string, write_csv, write_json};
pub use report::render_summary;
