//! Per-row record assembly.
//!
//! Combines the acceptance test, coarse category inference, field
//! normalization, and classification into one PNCP output record per
//! accepted row.

use crate::catalog::Classifier;
use crate::models::{Category, OutputRecord, RawRow, CATALOG_USED, HEADER_PLACEHOLDER};
use crate::normalize;

/// Maximum output length of the item description, in characters.
const DESCRIPTION_MAX: usize = 500;
/// Maximum output length of the requester unit, in characters.
const REQUESTER_MAX: usize = 100;

/// Outcome of assembling one raw row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Accepted row: one output record.
    Record(Box<OutputRecord>),
    /// Header-like or empty row, dropped silently.
    Skipped,
    /// Non-empty description that failed the length test, dropped but tallied.
    Ignored,
}

/// Acceptance test for the description cell.
///
/// A row is accepted iff its trimmed description is non-empty, is not the
/// literal column-header word, and is longer than 10 characters. Very short
/// non-empty descriptions are both skipped and tallied as ignored; the
/// header placeholder itself is not tallied.
fn acceptance(description: &str) -> Option<RowOutcome> {
    let trimmed = description.trim();
    if trimmed.is_empty() || trimmed == HEADER_PLACEHOLDER {
        return Some(RowOutcome::Skipped);
    }
    if trimmed.chars().count() <= 10 {
        return Some(RowOutcome::Ignored);
    }
    None
}

/// Assemble one raw row into an output record.
///
/// `item_number` is the dense sequential number this record will carry if
/// accepted; the caller only advances it on acceptance. `target_year` fixes
/// the year of the desired-date field.
pub fn assemble(
    raw: &RawRow,
    item_number: u32,
    target_year: i32,
    classifier: &mut Classifier,
) -> RowOutcome {
    if let Some(outcome) = acceptance(&raw.objective) {
        return outcome;
    }

    let row = normalize::normalize_row(raw);
    let description_lower = row.description.to_lowercase();

    // Coarse category tag; also the classifier's domain hint. The classifier
    // runs its own domain selection and the two may disagree.
    let category = Category::infer(&description_lower);
    let classification = classifier.classify(&row.description, category.hint());

    let total = normalize::format_amount(row.amount_total);
    let desired_month = u32::from(row.delivery_quarter) * 3;

    RowOutcome::Record(Box::new(OutputRecord {
        item_number,
        category: category.label().to_string(),
        catalog: CATALOG_USED.to_string(),
        catalog_classification: category.label().to_string(),
        class_code: classification.class_code,
        class_name: classification.class_name,
        pdm_code: String::new(),
        pdm_name: String::new(),
        item_code: classification.item_code,
        description: normalize::truncate_chars(&row.description, DESCRIPTION_MAX),
        unit: row.unit.as_str().to_string(),
        quantity: row.quantity,
        unit_value: normalize::format_amount(row.amount_unit),
        total_value: total.clone(),
        budget_value: total,
        renewal: if row.is_renewal { "1-Sim" } else { "2-Não" }.to_string(),
        desired_date: format!("01/{:02}/{}", desired_month, target_year),
        requester: normalize::truncate_chars(&row.requester, REQUESTER_MAX),
        group_code: String::new(),
        group_name: String::new(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(objective: &str) -> RawRow {
        RawRow {
            requester: "DTI - Diretoria de Tecnologia".into(),
            objective: objective.into(),
            quantity: "12 Meses".into(),
            expectation: "Março/25".into(),
            value: "R$ 1.234,56".into(),
            program: String::new(),
            justification: String::new(),
        }
    }

    #[test]
    fn test_empty_description_skipped() {
        let mut classifier = Classifier::new();
        let outcome = assemble(&raw("   "), 1, 2025, &mut classifier);
        assert_eq!(outcome, RowOutcome::Skipped);
    }

    #[test]
    fn test_header_placeholder_skipped_not_ignored() {
        let mut classifier = Classifier::new();
        let outcome = assemble(&raw("OBJETIVO"), 1, 2025, &mut classifier);
        assert_eq!(outcome, RowOutcome::Skipped);
    }

    #[test]
    fn test_short_description_ignored() {
        let mut classifier = Classifier::new();
        let outcome = assemble(&raw("TI"), 1, 2025, &mut classifier);
        assert_eq!(outcome, RowOutcome::Ignored);
    }

    #[test]
    fn test_accepted_row_record() {
        let mut classifier = Classifier::new();
        let outcome = assemble(
            &raw("Renovação do serviço de link de internet dedicado"),
            7,
            2025,
            &mut classifier,
        );

        let record = match outcome {
            RowOutcome::Record(record) => record,
            other => panic!("expected record, got {:?}", other),
        };

        assert_eq!(record.item_number, 7);
        assert_eq!(record.category, "2-Serviço");
        assert_eq!(record.catalog, "2-Outros");
        assert_eq!(record.class_code, "100");
        assert_eq!(record.item_code, "S1000001");
        assert_eq!(record.unit, "MES");
        assert_eq!(record.quantity, 12.0);
        assert_eq!(record.total_value, "R$ 1.234,56");
        assert_eq!(record.budget_value, "R$ 1.234,56");
        assert_eq!(record.unit_value, "R$ 102,88");
        assert_eq!(record.renewal, "1-Sim");
        assert_eq!(record.desired_date, "01/03/2025");
        assert_eq!(record.requester, "DTI");
    }

    #[test]
    fn test_material_acquisition_row() {
        let mut classifier = Classifier::new();
        let outcome = assemble(
            &raw("Aquisição de 10 notebooks para o setor de TI"),
            1,
            2025,
            &mut classifier,
        );

        let record = match outcome {
            RowOutcome::Record(record) => record,
            other => panic!("expected record, got {:?}", other),
        };

        assert_eq!(record.category, "1-Material");
        assert_eq!(record.catalog_classification, "1-Material");
        assert_eq!(record.class_code, "1000");
        assert_eq!(record.class_name, "MATERIAIS DE INFORMÁTICA");
        assert_eq!(record.item_code, "M10000001");
    }

    #[test]
    fn test_fourth_quarter_date_zero_padded() {
        let mut classifier = Classifier::new();
        let mut row = raw("Serviço de manutenção predial do edifício sede");
        row.expectation = "Novembro/25".into();

        let record = match assemble(&row, 1, 2025, &mut classifier) {
            RowOutcome::Record(record) => record,
            other => panic!("expected record, got {:?}", other),
        };

        assert_eq!(record.desired_date, "01/12/2025");
    }

    #[test]
    fn test_description_truncated_to_500_chars() {
        let mut classifier = Classifier::new();
        let long = format!("Serviço de manutenção {}", "x".repeat(600));
        let record = match assemble(&raw(&long), 1, 2025, &mut classifier) {
            RowOutcome::Record(record) => record,
            other => panic!("expected record, got {:?}", other),
        };

        assert_eq!(record.description.chars().count(), 500);
    }
}
