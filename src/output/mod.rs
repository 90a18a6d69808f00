//! Output sinks: PNCP semicolon CSV and JSON import document.
//!
//! The CSV sink writes UTF-8 with a byte-order marker and semicolon
//! separators, one header row with the 20 PNCP field names, one data row per
//! record in input order. The JSON sink mirrors the same fields as an array
//! of objects.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::OutputResult;
use crate::models::{OutputRecord, OUTPUT_HEADERS};

/// UTF-8 byte-order marker expected by the import target's CSV reader.
const BOM: &[u8] = b"\xef\xbb\xbf";

/// Render records as the PNCP semicolon CSV (without the BOM).
///
/// The header row is written explicitly so it is present even when every
/// input row was skipped and there are no records.
pub fn csv_string(records: &[OutputRecord]) -> OutputResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(OUTPUT_HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).to_string())
}

/// Write the PNCP CSV file (UTF-8 with BOM, semicolon separators).
pub fn write_csv<P: AsRef<Path>>(records: &[OutputRecord], path: P) -> OutputResult<()> {
    let content = csv_string(records)?;
    let mut file = File::create(path)?;
    file.write_all(BOM)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Render records as the pretty-printed JSON import document.
pub fn json_string(records: &[OutputRecord]) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write the JSON import document.
pub fn write_json<P: AsRef<Path>>(records: &[OutputRecord], path: P) -> OutputResult<()> {
    let content = json_string(records)?;
    std::fs::write(path, content)?;
    Ok(())
}
