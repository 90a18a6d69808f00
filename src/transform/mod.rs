//! Row-to-record transformation.
//!
//! - [`assembler`] - acceptance test and per-row record assembly
//! - [`pipeline`] - whole-run orchestration over a parsed sheet

pub mod assembler;
pub mod pipeline;

pub use assembler::{assemble, RowOutcome};
pub use pipeline::{convert_bytes, convert_file, convert_rows, ConvertOptions, ConvertResult};
