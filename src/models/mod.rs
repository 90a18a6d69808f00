//! Domain models for the PCA conversion pipeline.
//!
//! This module contains the core data structures used throughout the pipeline:
//!
//! - [`RawRow`] - positional cells of one input spreadsheet row
//! - [`NormalizedRow`] - cleaned and parsed fields of an accepted row
//! - [`Classification`] - catalog class and synthesized item code
//! - [`OutputRecord`] - one PNCP import record (20 fixed fields)
//! - [`Category`] / [`Unit`] - coarse item category and supply unit

use serde::{Deserialize, Serialize};

// =============================================================================
// Raw Input Row
// =============================================================================

/// One row of the planning spreadsheet, read positionally.
///
/// Column order follows the PCA layout: requester, objective/description,
/// quantity text, delivery expectation, monetary value, scheduling/program,
/// and an optional justification. Missing trailing cells become empty strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub requester: String,
    pub objective: String,
    pub quantity: String,
    pub expectation: String,
    pub value: String,
    pub program: String,
    pub justification: String,
}

impl RawRow {
    /// Build a row from positional cell values.
    pub fn from_cells(cells: &[String]) -> Self {
        let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();
        Self {
            requester: cell(0),
            objective: cell(1),
            quantity: cell(2),
            expectation: cell(3),
            value: cell(4),
            program: cell(5),
            justification: cell(6),
        }
    }
}

// =============================================================================
// Supply Unit
// =============================================================================

/// Unit of supply inferred from the quantity text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    /// Monthly supply (service contracts quoted in months).
    Mes,
    /// Discrete units.
    #[default]
    Und,
}

impl Unit {
    /// PNCP unit-of-supply label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Mes => "MES",
            Unit::Und => "UND",
        }
    }
}

// =============================================================================
// Coarse Category
// =============================================================================

/// Coarse item category written into the PNCP category fields.
///
/// This is a second, coarser keyword pass over the description and is computed
/// independently of the classifier's domain selection; the two may disagree
/// for the same row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Material,
    Service,
}

impl Category {
    /// Infer the category from a lowered, cleaned description.
    ///
    /// Acquisition-type wording classifies as Material; works/renovation
    /// wording and everything else classifies as Service.
    pub fn infer(description_lower: &str) -> Self {
        if description_lower.contains("aquisição")
            || description_lower.contains("compra")
            || description_lower.contains("material")
        {
            Category::Material
        } else {
            Category::Service
        }
    }

    /// PNCP display label ("1-Material" / "2-Serviço").
    pub fn label(&self) -> &'static str {
        match self {
            Category::Material => "1-Material",
            Category::Service => "2-Serviço",
        }
    }

    /// Hint string handed to the item classifier.
    pub fn hint(&self) -> &'static str {
        match self {
            Category::Material => "MATERIAL",
            Category::Service => "SERVICO",
        }
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Result of classifying one description against the catalog taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Class code of the matched taxonomy entry (e.g. "1000").
    pub class_code: String,
    /// Display name of the matched class.
    pub class_name: String,
    /// Synthesized unique item code (prefix + zero-padded counter).
    pub item_code: String,
}

// =============================================================================
// Normalized Row
// =============================================================================

/// Cleaned and parsed fields of one accepted row.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    /// Cleaned description (line breaks and whitespace runs collapsed).
    pub description: String,
    /// Cleaned requester, truncated at the first " - " separator.
    pub requester: String,
    /// Cleaned justification (carried but absent from the PNCP layout).
    pub justification: String,
    /// Total estimated amount.
    pub amount_total: f64,
    /// Unit price (total / quantity, guarded against zero quantity).
    pub amount_unit: f64,
    /// Estimated quantity.
    pub quantity: f64,
    /// Unit of supply.
    pub unit: Unit,
    /// Delivery quarter, 1..=4.
    pub delivery_quarter: u8,
    /// Four-digit year parsed from the expectation text, when present.
    /// The output date always uses the run's target year instead.
    pub expectation_year: Option<i32>,
    /// Whether the item is a contract renewal.
    pub is_renewal: bool,
}

// =============================================================================
// Output Record (PNCP layout, 20 fields)
// =============================================================================

/// One record of the PNCP import layout.
///
/// Field names are serde-renamed to the exact PNCP column headers, so both
/// the semicolon CSV and the JSON document carry the expected labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    #[serde(rename = "Numero Item*")]
    pub item_number: u32,
    #[serde(rename = "Categoria do Item*")]
    pub category: String,
    #[serde(rename = "Catálogo Utilizado*")]
    pub catalog: String,
    #[serde(rename = "Classificação do Catálogo*")]
    pub catalog_classification: String,
    #[serde(rename = "Código da Classificação Superior (Classe/Grupo)*")]
    pub class_code: String,
    #[serde(rename = "Classificacao Superior Nome*")]
    pub class_name: String,
    #[serde(rename = "Código do PDM do Item")]
    pub pdm_code: String,
    #[serde(rename = "Nome do PDM do Item")]
    pub pdm_name: String,
    #[serde(rename = "Código do Item")]
    pub item_code: String,
    #[serde(rename = "Descrição do Item")]
    pub description: String,
    #[serde(rename = "Unidade de Fornecimento")]
    pub unit: String,
    #[serde(rename = "Quantidade Estimada*")]
    pub quantity: f64,
    #[serde(rename = "Valor Unitário Estimado (R$)*")]
    pub unit_value: String,
    #[serde(rename = "Valor Total Estimado (R$)*")]
    pub total_value: String,
    #[serde(rename = "Valor orçamentário estimado para o exercício (R$)*")]
    pub budget_value: String,
    #[serde(rename = "Renovação Contrato*")]
    pub renewal: String,
    #[serde(rename = "Data Desejada*")]
    pub desired_date: String,
    #[serde(rename = "Unidade Requisitante")]
    pub requester: String,
    #[serde(rename = "Grupo Contratação Codigo")]
    pub group_code: String,
    #[serde(rename = "Grupo Contratação Nome")]
    pub group_name: String,
}

/// The 20 PNCP column headers, in [`OutputRecord`] field order.
///
/// Kept alongside the struct so the CSV sink can emit the header row even
/// for an empty run; must stay in sync with the serde renames above.
pub const OUTPUT_HEADERS: [&str; 20] = [
    "Numero Item*",
    "Categoria do Item*",
    "Catálogo Utilizado*",
    "Classificação do Catálogo*",
    "Código da Classificação Superior (Classe/Grupo)*",
    "Classificacao Superior Nome*",
    "Código do PDM do Item",
    "Nome do PDM do Item",
    "Código do Item",
    "Descrição do Item",
    "Unidade de Fornecimento",
    "Quantidade Estimada*",
    "Valor Unitário Estimado (R$)*",
    "Valor Total Estimado (R$)*",
    "Valor orçamentário estimado para o exercício (R$)*",
    "Renovação Contrato*",
    "Data Desejada*",
    "Unidade Requisitante",
    "Grupo Contratação Codigo",
    "Grupo Contratação Nome",
];

/// Fixed value of the "Catálogo Utilizado*" field (own catalog).
pub const CATALOG_USED: &str = "2-Outros";

/// Placeholder header literal rejected by the row acceptance test.
pub const HEADER_PLACEHOLDER: &str = "OBJETIVO";

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_row_from_cells_short() {
        let cells = vec!["DTI".to_string(), "Serviço de link".to_string()];
        let row = RawRow::from_cells(&cells);
        assert_eq!(row.requester, "DTI");
        assert_eq!(row.objective, "Serviço de link");
        assert_eq!(row.justification, "");
    }

    #[test]
    fn test_category_infer() {
        assert_eq!(Category::infer("aquisição de notebooks"), Category::Material);
        assert_eq!(Category::infer("compra de papel"), Category::Material);
        assert_eq!(Category::infer("reforma do auditório"), Category::Service);
        assert_eq!(Category::infer("serviço de limpeza"), Category::Service);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::Material.label(), "1-Material");
        assert_eq!(Category::Service.label(), "2-Serviço");
        assert_eq!(Category::Material.hint(), "MATERIAL");
    }

    #[test]
    fn test_unit_as_str() {
        assert_eq!(Unit::Mes.as_str(), "MES");
        assert_eq!(Unit::Und.as_str(), "UND");
        assert_eq!(Unit::default(), Unit::Und);
    }

    #[test]
    fn test_output_record_serde_headers() {
        let record = OutputRecord {
            item_number: 1,
            category: "2-Serviço".into(),
            catalog: CATALOG_USED.into(),
            catalog_classification: "2-Serviço".into(),
            class_code: "200".into(),
            class_name: "SERVIÇOS DE TECNOLOGIA DA INFORMAÇÃO".into(),
            pdm_code: String::new(),
            pdm_name: String::new(),
            item_code: "S2000001".into(),
            description: "Licenciamento de software".into(),
            unit: "MES".into(),
            quantity: 12.0,
            unit_value: "R$ 100,00".into(),
            total_value: "R$ 1.200,00".into(),
            budget_value: "R$ 1.200,00".into(),
            renewal: "2-Não".into(),
            desired_date: "01/03/2025".into(),
            requester: "DTI".into(),
            group_code: String::new(),
            group_name: String::new(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["Numero Item*"], 1);
        assert_eq!(json["Código do Item"], "S2000001");
        assert_eq!(json["Catálogo Utilizado*"], "2-Outros");
        assert_eq!(json["Data Desejada*"], "01/03/2025");
    }
}
