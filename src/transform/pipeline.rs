//! High-level pipeline API for the PCA to PNCP conversion.
//!
//! One strictly sequential pass: parse the sheet, run every row through the
//! assembler, and collect records plus run statistics. Writing the sinks is
//! the caller's step (see [`crate::output`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use pcaload::{convert_file, ConvertOptions};
//!
//! let result = convert_file("PCA 2025.csv", ConvertOptions::default())?;
//! println!("Converted {} items", result.records.len());
//! ```

use std::path::Path;

use chrono::Datelike;

use crate::catalog::Classifier;
use crate::error::{PipelineError, PipelineResult};
use crate::models::{OutputRecord, RawRow};
use crate::normalize::parse_formatted_amount;
use crate::parser::{read_sheet_bytes, read_sheet_file, SheetData};
use crate::transform::assembler::{assemble, RowOutcome};

/// Options for a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Year written into every desired-date field.
    pub target_year: i32,
    /// Force a delimiter instead of auto-detecting.
    pub delimiter: Option<char>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            target_year: chrono::Local::now().year(),
            delimiter: None,
        }
    }
}

/// Result of a complete conversion run.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Output records, densely numbered from 1 in input order.
    pub records: Vec<OutputRecord>,
    /// Rows with a real but too-short description.
    pub ignored: usize,
    /// Issued item codes per prefix, sorted by prefix.
    pub class_counts: Vec<(String, u32)>,
    /// Grand total, recomputed by re-parsing the formatted totals.
    pub total_value: f64,
    /// Input detection metadata.
    pub input: InputInfo,
}

/// Input sheet information.
#[derive(Debug, Clone)]
pub struct InputInfo {
    pub encoding: String,
    pub delimiter: char,
    pub row_count: usize,
}

/// Convert a sheet file.
///
/// This is the main entry point. Whole-run failures (unreadable input) are
/// the only errors; malformed rows are skipped or ignored, never fatal.
pub fn convert_file<P: AsRef<Path>>(
    path: P,
    options: ConvertOptions,
) -> PipelineResult<ConvertResult> {
    let sheet = read_sheet_file(path, options.delimiter)?;
    convert_sheet(sheet, &options)
}

/// Convert sheet bytes. Same as [`convert_file`] without the file read.
pub fn convert_bytes(bytes: &[u8], options: ConvertOptions) -> PipelineResult<ConvertResult> {
    let sheet = read_sheet_bytes(bytes, options.delimiter)?;
    convert_sheet(sheet, &options)
}

/// Convert already-parsed rows.
pub fn convert_rows(
    rows: Vec<RawRow>,
    options: &ConvertOptions,
) -> PipelineResult<ConvertResult> {
    let sheet = SheetData {
        rows,
        encoding: "utf-8".to_string(),
        delimiter: ';',
    };
    convert_sheet(sheet, options)
}

fn convert_sheet(sheet: SheetData, options: &ConvertOptions) -> PipelineResult<ConvertResult> {
    if sheet.rows.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let input = InputInfo {
        encoding: sheet.encoding.clone(),
        delimiter: sheet.delimiter,
        row_count: sheet.rows.len(),
    };

    let mut classifier = Classifier::new();
    let mut records = Vec::new();
    let mut ignored = 0;

    for raw in &sheet.rows {
        let item_number = records.len() as u32 + 1;
        match assemble(raw, item_number, options.target_year, &mut classifier) {
            RowOutcome::Record(record) => records.push(*record),
            RowOutcome::Skipped => {}
            RowOutcome::Ignored => ignored += 1,
        }
    }

    // The grand total re-parses the formatted strings, as the import target
    // would see them, rather than summing the pre-format amounts.
    let total_value = records
        .iter()
        .map(|record| parse_formatted_amount(&record.total_value))
        .sum();

    Ok(ConvertResult {
        class_counts: classifier.code_counts(),
        records,
        ignored,
        total_value,
        input,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(requester: &str, objective: &str, quantity: &str, expectation: &str, value: &str) -> RawRow {
        RawRow {
            requester: requester.into(),
            objective: objective.into(),
            quantity: quantity.into(),
            expectation: expectation.into(),
            value: value.into(),
            program: String::new(),
            justification: String::new(),
        }
    }

    fn options() -> ConvertOptions {
        ConvertOptions {
            target_year: 2025,
            delimiter: None,
        }
    }

    #[test]
    fn test_dense_numbering_skips_rejects() {
        let rows = vec![
            row("A", "Serviço de limpeza e conservação predial", "12 Meses", "Maio/25", "100"),
            row("B", "OBJETIVO", "", "", ""),
            row("C", "TI", "", "", ""),
            row("D", "Aquisição de notebooks para os setores", "10 unidades", "Março/25", "5000"),
        ];

        let result = convert_rows(rows, &options()).unwrap();

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].item_number, 1);
        assert_eq!(result.records[1].item_number, 2);
        assert_eq!(result.ignored, 1);
    }

    #[test]
    fn test_item_codes_unique_across_run() {
        let rows = vec![
            row("A", "Serviço de limpeza e conservação geral", "12 Meses", "Maio/25", "100"),
            row("B", "Serviço de limpeza e higienização dos prédios", "12 Meses", "Maio/25", "200"),
            row("C", "Serviço de dedetização e desratização", "12 Meses", "Maio/25", "300"),
        ];

        let result = convert_rows(rows, &options()).unwrap();
        let codes: Vec<&str> = result.records.iter().map(|r| r.item_code.as_str()).collect();

        assert_eq!(codes, vec!["S5000001", "S5000002", "S5000003"]);
        assert_eq!(result.class_counts, vec![("S500".to_string(), 3)]);
    }

    #[test]
    fn test_total_value_from_formatted_strings() {
        let rows = vec![
            row("A", "Serviço de limpeza e conservação geral", "12", "Maio/25", "R$ 1.000,00"),
            row("B", "Serviço de vigilância e monitoramento", "12", "Maio/25", "R$ 234,56"),
        ];

        let result = convert_rows(rows, &options()).unwrap();
        assert!((result.total_value - 1234.56).abs() < 0.005);
    }

    #[test]
    fn test_empty_rows_is_pipeline_error() {
        assert!(matches!(
            convert_rows(Vec::new(), &options()),
            Err(PipelineError::EmptyInput)
        ));
    }

    #[test]
    fn test_convert_bytes_end_to_end() {
        let content = "\u{feff}DTI - Tecnologia;Renovação do link de internet dedicado;12 Meses;Março/25;R$ 1.234,56;Manutenção";
        let result = convert_bytes(content.as_bytes(), options()).unwrap();

        assert_eq!(result.input.delimiter, ';');
        assert_eq!(result.input.row_count, 1);
        assert_eq!(result.records.len(), 1);

        let record = &result.records[0];
        assert_eq!(record.item_code, "S1000001");
        assert_eq!(record.requester, "DTI");
        assert_eq!(record.renewal, "1-Sim");
        assert_eq!(record.desired_date, "01/03/2025");
    }
}
