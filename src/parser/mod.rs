//! Delimited-sheet reader with encoding and delimiter auto-detection.
//!
//! Reads the planning sheet positionally: every line becomes a [`RawRow`]
//! with the seven PCA columns. No header handling happens here; header-like
//! lines (the "OBJETIVO" row, title banners) are rejected later by the
//! assembler's acceptance test, so exports with or without a header line
//! convert the same way.

use std::path::Path;

use crate::error::{SheetError, SheetResult};
use crate::models::RawRow;

/// Result of reading a sheet, with detection metadata.
#[derive(Debug, Clone)]
pub struct SheetData {
    /// Raw rows in input order.
    pub rows: Vec<RawRow>,
    /// Detected or forced encoding.
    pub encoding: String,
    /// Detected or forced delimiter.
    pub delimiter: char,
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the specified encoding.
pub fn decode_content(bytes: &[u8], encoding: &str) -> SheetResult<String> {
    let decoded = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).to_string(),
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::ISO_8859_15.decode(bytes).0.to_string(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        // Fallback: UTF-8 with lossy conversion
        _ => String::from_utf8_lossy(bytes).to_string(),
    };

    // Drop a leading BOM left by spreadsheet exports
    Ok(decoded.strip_prefix('\u{feff}').unwrap_or(&decoded).to_string())
}

/// Detect the delimiter by counting occurrences in the first line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [';', ',', '\t', '|'];
    let mut best_sep = ';';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse decoded content into positional rows with an explicit delimiter.
///
/// Quoted cells (including embedded delimiters and line breaks) are handled
/// by the csv reader; blank lines are dropped.
pub fn parse_rows(content: &str, delimiter: char) -> SheetResult<Vec<RawRow>> {
    if content.trim().is_empty() {
        return Err(SheetError::EmptyFile);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cells: Vec<String> = record.iter().map(|cell| cell.trim().to_string()).collect();

        if cells.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        rows.push(RawRow::from_cells(&cells));
    }

    Ok(rows)
}

/// Read a sheet file with auto-detection of encoding and delimiter.
pub fn read_sheet_file<P: AsRef<Path>>(path: P, delimiter: Option<char>) -> SheetResult<SheetData> {
    let bytes = std::fs::read(path.as_ref())?;
    read_sheet_bytes(&bytes, delimiter)
}

/// Read sheet bytes with auto-detection of encoding and delimiter.
pub fn read_sheet_bytes(bytes: &[u8], delimiter: Option<char>) -> SheetResult<SheetData> {
    if bytes.is_empty() {
        return Err(SheetError::EmptyFile);
    }

    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));
    let rows = parse_rows(&content, delimiter)?;

    Ok(SheetData {
        rows,
        encoding,
        delimiter,
    })
}
