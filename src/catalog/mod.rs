//! Own-catalog taxonomy and keyword classifier.
//!
//! The catalog has two disjoint domains (services and materials), each an
//! ordered list of classes with keyword lists and an item-code prefix.
//! Classification scores keywords by literal substring containment in the
//! lowered description; the strictly highest score wins and ties resolve to
//! the entry declared first. A zero score everywhere falls back to a fixed
//! default class per domain.
//!
//! Item codes are synthesized from a per-prefix counter owned by
//! [`Classifier`], so a fresh classifier gives a clean, deterministic run.

use std::collections::HashMap;

use crate::models::Classification;

// =============================================================================
// Taxonomy
// =============================================================================

/// One classification rule of the own catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxonomyEntry {
    /// Class code written to the output (e.g. "200").
    pub class_code: &'static str,
    /// Display name of the class.
    pub class_name: &'static str,
    /// Keywords matched as lowercase substrings of the description.
    pub keywords: &'static [&'static str],
    /// Prefix of synthesized item codes (e.g. "S200").
    pub prefix: &'static str,
}

/// Service classes, in tie-break order.
pub static SERVICE_CLASSES: &[TaxonomyEntry] = &[
    TaxonomyEntry {
        class_code: "100",
        class_name: "SERVIÇOS DE UTILIDADE PÚBLICA",
        keywords: &[
            "água", "esgoto", "energia", "elétrica", "telefonia", "internet", "link", "fibra",
            "óptica",
        ],
        prefix: "S100",
    },
    TaxonomyEntry {
        class_code: "200",
        class_name: "SERVIÇOS DE TECNOLOGIA DA INFORMAÇÃO",
        keywords: &[
            "software", "sistema", "licenciamento", "antivírus", "informática", "ti", "tic",
            "portal", "site", "web", "digital", "certificação", "backup", "nuvem", "cloud",
            "hospedagem", "domínio", "e-mail",
        ],
        prefix: "S200",
    },
    TaxonomyEntry {
        class_code: "300",
        class_name: "SERVIÇOS DE CONSULTORIA E ASSESSORIA",
        keywords: &[
            "consultoria", "assessoria", "técnico especializado", "contábil", "jurídico",
            "auditoria", "perícia",
        ],
        prefix: "S300",
    },
    TaxonomyEntry {
        class_code: "400",
        class_name: "SERVIÇOS DE MANUTENÇÃO PREDIAL",
        keywords: &[
            "manutenção", "elétrica", "hidráulica", "ar condicionado", "elevador", "gerador",
            "pintura", "reparo", "calha", "rufo", "fachada", "vidro", "porta", "janela", "piso",
            "gesso", "impermeabilização", "telhado", "cobertura",
        ],
        prefix: "S400",
    },
    TaxonomyEntry {
        class_code: "500",
        class_name: "SERVIÇOS DE LIMPEZA E CONSERVAÇÃO",
        keywords: &[
            "limpeza", "dedetização", "desratização", "higienização", "conservação",
            "jardinagem", "paisagismo",
        ],
        prefix: "S500",
    },
    TaxonomyEntry {
        class_code: "600",
        class_name: "SERVIÇOS DE RECURSOS HUMANOS",
        keywords: &[
            "terceirização", "estagiário", "treinamento", "seleção", "medicina",
            "segurança do trabalho", "e-social", "folha", "rh", "capacitação", "curso",
        ],
        prefix: "S600",
    },
    TaxonomyEntry {
        class_code: "700",
        class_name: "SERVIÇOS DE COMUNICAÇÃO E MÍDIA",
        keywords: &[
            "tv", "rádio", "transmissão", "sonorização", "áudio", "vídeo", "imprensa",
            "jornalístico", "coffee", "buffet", "evento", "cerimonial", "fotografia", "filmagem",
        ],
        prefix: "S700",
    },
    TaxonomyEntry {
        class_code: "800",
        class_name: "SERVIÇOS DE ENGENHARIA E OBRAS",
        keywords: &[
            "reforma", "obra", "engenheiro", "construção", "projeto", "energia solar",
            "fotovoltaica", "laudo", "vistoria",
        ],
        prefix: "S800",
    },
    TaxonomyEntry {
        class_code: "900",
        class_name: "OUTROS SERVIÇOS",
        keywords: &[
            "locação", "cópia", "chave", "extintor", "multifuncional", "impressora",
            "mobiliário", "seguro", "vigilância", "monitoramento", "rastreamento", "veículo",
            "transporte", "frete", "correio", "malote",
        ],
        prefix: "S900",
    },
];

/// Material classes, in tie-break order.
pub static MATERIAL_CLASSES: &[TaxonomyEntry] = &[
    TaxonomyEntry {
        class_code: "1000",
        class_name: "MATERIAIS DE INFORMÁTICA",
        keywords: &[
            "informática", "computador", "notebook", "monitor", "teclado", "mouse", "servidor",
            "switch", "roteador", "hd", "ssd", "memória", "processador",
        ],
        prefix: "M1000",
    },
    TaxonomyEntry {
        class_code: "1100",
        class_name: "MÓVEIS E EQUIPAMENTOS",
        keywords: &[
            "móveis", "mesa", "cadeira", "armário", "estante", "carrinho", "arquivo", "bancada",
            "balcão", "sofá", "poltrona",
        ],
        prefix: "M1100",
    },
    TaxonomyEntry {
        class_code: "1200",
        class_name: "EQUIPAMENTOS DE CLIMATIZAÇÃO",
        keywords: &["ar condicionado", "climatização", "ventilador", "exaustor", "aquecedor"],
        prefix: "M1200",
    },
    TaxonomyEntry {
        class_code: "1300",
        class_name: "EQUIPAMENTOS ELETRÔNICOS",
        keywords: &[
            "eletrônico", "microfone", "caixa de som", "câmera", "tv", "torre digital",
            "projetor", "tela", "painel", "led",
        ],
        prefix: "M1300",
    },
    TaxonomyEntry {
        class_code: "1400",
        class_name: "MATERIAIS DE ESCRITÓRIO",
        keywords: &[
            "uniforme", "persiana", "cortina", "flores", "arranjo", "papel", "caneta",
            "grampeador", "pasta",
        ],
        prefix: "M1400",
    },
    TaxonomyEntry {
        class_code: "1500",
        class_name: "PEÇAS E COMPONENTES",
        keywords: &[
            "peça", "componente", "elevador", "reposição", "acessório", "bateria", "fonte",
        ],
        prefix: "M1500",
    },
    TaxonomyEntry {
        class_code: "1600",
        class_name: "INFRAESTRUTURA",
        keywords: &[
            "infraestrutura", "rack", "cabeamento", "rede", "cabo", "conector", "patch",
        ],
        prefix: "M1600",
    },
];

// =============================================================================
// Domain
// =============================================================================

/// One of the two disjoint catalog taxonomies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Services,
    Materials,
}

impl Domain {
    /// Choose the domain for a description and coarse category hint.
    ///
    /// Materials when the hint mentions "material" or the description reads
    /// as an acquisition; services otherwise.
    pub fn select(description_lower: &str, hint: &str) -> Self {
        if hint.to_lowercase().contains("material") || description_lower.contains("aquisição") {
            Domain::Materials
        } else {
            Domain::Services
        }
    }

    /// Ordered taxonomy entries of this domain.
    pub fn entries(&self) -> &'static [TaxonomyEntry] {
        match self {
            Domain::Services => SERVICE_CLASSES,
            Domain::Materials => MATERIAL_CLASSES,
        }
    }

    /// Fallback class when no keyword matches.
    pub fn default_entry(&self) -> &'static TaxonomyEntry {
        match self {
            // 900 OUTROS SERVIÇOS / 1400 MATERIAIS DE ESCRITÓRIO
            Domain::Services => &SERVICE_CLASSES[8],
            Domain::Materials => &MATERIAL_CLASSES[4],
        }
    }
}

// =============================================================================
// Scoring
// =============================================================================

/// Count how many keywords of `entry` occur in the lowered description.
///
/// Literal substring containment, no tokenization: short keywords like "ti"
/// can match inside longer words, and overlapping keywords may count for
/// several entries. This mirrors the catalog's matching rules.
pub fn score(description_lower: &str, entry: &TaxonomyEntry) -> usize {
    entry
        .keywords
        .iter()
        .filter(|kw| description_lower.contains(*kw))
        .count()
}

/// Pick the best-scoring entry, or `None` when nothing matches.
///
/// Ties resolve to the entry declared first: only a strictly higher score
/// replaces the current best.
pub fn best_match<'a>(
    description_lower: &str,
    entries: &'a [TaxonomyEntry],
) -> Option<&'a TaxonomyEntry> {
    let mut best: Option<&TaxonomyEntry> = None;
    let mut best_score = 0;

    for entry in entries {
        let s = score(description_lower, entry);
        if s > best_score {
            best_score = s;
            best = Some(entry);
        }
    }

    best
}

// =============================================================================
// Code Book
// =============================================================================

/// Per-prefix sequential counters for item-code synthesis.
///
/// Counters never reset within a run; re-running the conversion starts from a
/// fresh book, so codes are deterministic per run.
#[derive(Debug, Clone, Default)]
pub struct CodeBook {
    counters: HashMap<String, u32>,
}

impl CodeBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-and-increment the counter for `prefix` and format the item code.
    ///
    /// The counter is zero-padded to 4 digits and widens implicitly past 9999.
    pub fn next(&mut self, prefix: &str) -> String {
        let counter = self.counters.entry(prefix.to_string()).or_insert(0);
        *counter += 1;
        format!("{}{:04}", prefix, *counter)
    }

    /// Issued-code counts per prefix, sorted by prefix.
    pub fn counts(&self) -> Vec<(String, u32)> {
        let mut counts: Vec<(String, u32)> =
            self.counters.iter().map(|(p, c)| (p.clone(), *c)).collect();
        counts.sort();
        counts
    }
}

// =============================================================================
// Classifier
// =============================================================================

/// Stateful item classifier: pure keyword scoring plus code synthesis.
#[derive(Debug, Default)]
pub struct Classifier {
    codes: CodeBook,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a description under a coarse category hint.
    ///
    /// Never fails: a description with no keyword match lands on the chosen
    /// domain's default class.
    pub fn classify(&mut self, description: &str, hint: &str) -> Classification {
        let description_lower = description.to_lowercase();
        let domain = Domain::select(&description_lower, hint);

        let entry =
            best_match(&description_lower, domain.entries()).unwrap_or_else(|| domain.default_entry());

        Classification {
            class_code: entry.class_code.to_string(),
            class_name: entry.class_name.to_string(),
            item_code: self.codes.next(entry.prefix),
        }
    }

    /// Issued-code counts per prefix, sorted by prefix.
    pub fn code_counts(&self) -> Vec<(String, u32)> {
        self.codes.counts()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_select() {
        assert_eq!(Domain::select("serviço de limpeza", "SERVICO"), Domain::Services);
        assert_eq!(Domain::select("serviço de limpeza", "MATERIAL"), Domain::Materials);
        assert_eq!(Domain::select("aquisição de papel", "SERVICO"), Domain::Materials);
    }

    #[test]
    fn test_score_counts_substrings() {
        let entry = &SERVICE_CLASSES[0]; // utilities
        assert_eq!(score("fornecimento de energia elétrica", entry), 2);
        assert_eq!(score("limpeza predial", entry), 0);
    }

    #[test]
    fn test_best_match_prefers_first_on_tie() {
        // "elétrica" appears in both class 100 and class 400 keyword lists;
        // with one match each, declaration order must win.
        let best = best_match("instalação elétrica", SERVICE_CLASSES).unwrap();
        assert_eq!(best.class_code, "100");
    }

    #[test]
    fn test_best_match_none_without_keywords() {
        assert!(best_match("xyzzy", SERVICE_CLASSES).is_none());
    }

    #[test]
    fn test_code_book_sequence() {
        let mut book = CodeBook::new();
        assert_eq!(book.next("S200"), "S2000001");
        assert_eq!(book.next("S200"), "S2000002");
        assert_eq!(book.next("M1000"), "M10000001");
        assert_eq!(book.next("S200"), "S2000003");
        assert_eq!(
            book.counts(),
            vec![("M1000".to_string(), 1), ("S200".to_string(), 3)]
        );
    }

    #[test]
    fn test_code_book_widens_past_9999() {
        let mut book = CodeBook::new();
        for _ in 0..9999 {
            book.next("S900");
        }
        assert_eq!(book.next("S900"), "S90010000");
    }

    #[test]
    fn test_classify_notebook_acquisition() {
        let mut classifier = Classifier::new();
        let result =
            classifier.classify("Aquisição de 10 notebooks para o setor de TI", "MATERIAL");
        assert_eq!(result.class_code, "1000");
        assert_eq!(result.class_name, "MATERIAIS DE INFORMÁTICA");
        assert_eq!(result.item_code, "M10000001");
    }

    #[test]
    fn test_classify_falls_back_per_domain() {
        let mut classifier = Classifier::new();

        let service = classifier.classify("xyzzy", "SERVICO");
        assert_eq!(service.class_code, "900");
        assert_eq!(service.item_code, "S9000001");

        let material = classifier.classify("xyzzy", "MATERIAL");
        assert_eq!(material.class_code, "1400");
        assert_eq!(material.item_code, "M14000001");
    }

    #[test]
    fn test_classify_codes_unique_across_calls() {
        let mut classifier = Classifier::new();
        let a = classifier.classify("serviço de limpeza e conservação", "SERVICO");
        let b = classifier.classify("serviço de limpeza predial", "SERVICO");
        assert_eq!(a.class_code, b.class_code);
        assert_ne!(a.item_code, b.item_code);
    }
}
