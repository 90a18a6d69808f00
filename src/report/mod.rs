//! Console summary of a conversion run.
//!
//! Mirrors what the import operators check after a run: totals, ignored
//! rows, issued codes per class prefix, the grand total as the import target
//! will re-read it, and a preview of the first records.

use crate::models::OutputRecord;
use crate::normalize::{format_amount, truncate_chars};
use crate::transform::ConvertResult;

/// How many records the preview section shows.
const PREVIEW_ROWS: usize = 10;

/// Render the run summary as console-ready text.
pub fn render_summary(result: &ConvertResult) -> String {
    let mut out = String::new();

    out.push_str("=== CONVERSION RESULT ===\n");
    out.push_str(&format!("Items converted: {}\n", result.records.len()));
    out.push_str(&format!("Rows ignored (short descriptions): {}\n", result.ignored));

    out.push_str("\n=== CLASSES USED ===\n");
    for (prefix, count) in &result.class_counts {
        out.push_str(&format!("  {}: {} items\n", prefix, count));
    }

    out.push_str("\n=== TOTAL VALUE ===\n");
    out.push_str(&format!("  {}\n", format_amount(result.total_value)));

    out.push_str(&format!("\n=== FIRST {} ITEMS ===\n", PREVIEW_ROWS));
    for record in result.records.iter().take(PREVIEW_ROWS) {
        out.push_str(&preview_line(record));
        out.push('\n');
    }

    out
}

fn preview_line(record: &OutputRecord) -> String {
    format!(
        "  {:3}. [{}] {}...",
        record.item_number,
        record.item_code,
        truncate_chars(&record.description, 60)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawRow;
    use crate::transform::{convert_rows, ConvertOptions};

    fn converted() -> ConvertResult {
        let rows = vec![
            RawRow {
                requester: "DTI".into(),
                objective: "Renovação do link de internet dedicado".into(),
                quantity: "12 Meses".into(),
                expectation: "Março/25".into(),
                value: "R$ 1.200,00".into(),
                program: String::new(),
                justification: String::new(),
            },
            RawRow {
                objective: "TI".into(),
                ..Default::default()
            },
        ];
        let options = ConvertOptions {
            target_year: 2025,
            delimiter: None,
        };
        convert_rows(rows, &options).unwrap()
    }

    #[test]
    fn test_summary_sections() {
        let summary = render_summary(&converted());

        assert!(summary.contains("Items converted: 1"));
        assert!(summary.contains("Rows ignored (short descriptions): 1"));
        assert!(summary.contains("S100: 1 items"));
        assert!(summary.contains("R$ 1.200,00"));
        assert!(summary.contains("[S1000001] Renovação do link de internet dedicado..."));
    }

    #[test]
    fn test_preview_caps_at_ten() {
        let rows: Vec<RawRow> = (0..15)
            .map(|i| RawRow {
                requester: "DTI".into(),
                objective: format!("Serviço de limpeza e conservação número {}", i),
                quantity: "12".into(),
                expectation: "Maio/25".into(),
                value: "100".into(),
                ..Default::default()
            })
            .collect();
        let options = ConvertOptions {
            target_year: 2025,
            delimiter: None,
        };
        let result = convert_rows(rows, &options).unwrap();
        let summary = render_summary(&result);

        let preview_lines = summary
            .lines()
            .filter(|line| line.trim_start().starts_with(char::is_numeric))
            .count();
        assert_eq!(preview_lines, 10);
    }
}
