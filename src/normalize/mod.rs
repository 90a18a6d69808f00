//! Field normalization for raw spreadsheet cells.
//!
//! Every parser here is lenient by design: unparsable cells degrade to a
//! documented default (amount 0, quantity 12, quarter 1) instead of failing,
//! so one bad cell never aborts a batch.
//!
//! Monetary values and dates use Brazilian conventions: "R$" prefix, dot
//! thousands separators, comma decimals, Portuguese month names.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{NormalizedRow, RawRow, Unit};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static MONTH_WORDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)meses|mes").expect("valid regex"));
static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));
static EXPECTATION_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+)/(\d{2})").expect("valid regex"));

// =============================================================================
// Text cleanup
// =============================================================================

/// Collapse line breaks and whitespace runs into single spaces and trim.
///
/// Idempotent: cleaning an already-clean string returns it unchanged.
pub fn clean_text(raw: &str) -> String {
    let unbroken = raw.replace(['\n', '\r'], " ");
    WHITESPACE_RUN.replace_all(&unbroken, " ").trim().to_string()
}

/// Clean a requester cell, keeping only the prefix before the first " - ".
///
/// Requester cells carry "ACRONYM - Full department name"; only the acronym
/// goes to the output.
pub fn clean_requester(raw: &str) -> String {
    let prefix = match raw.split_once(" - ") {
        Some((prefix, _)) => prefix,
        None => raw,
    };
    clean_text(prefix)
}

/// Truncate to at most `max` characters, never splitting a UTF-8 scalar.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

// =============================================================================
// Monetary amounts
// =============================================================================

/// Parse a monetary cell into a decimal amount.
///
/// Accepts a plain numeric string or the localized "R$ 1.234,56" form.
/// Unparsable values default to 0.
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    // Plain numerics (e.g. exported as "1234.56") parse directly; anything
    // with a comma, a currency marker, or dot thousands grouping goes
    // through the localized path.
    if !trimmed.contains("R$") && !trimmed.contains(',') && is_dot_decimal(trimmed) {
        if let Ok(value) = trimmed.parse::<f64>() {
            return value;
        }
    }

    let cleaned = trimmed.replace("R$", "").replace('.', "").replace(',', ".");
    cleaned.trim().parse::<f64>().unwrap_or(0.0)
}

/// Whether a dot in `s` can only be a decimal separator.
///
/// A single dot followed by one or two digits reads as dot-decimal;
/// "1.234" or "1.234.567" read as Brazilian thousands grouping instead.
fn is_dot_decimal(s: &str) -> bool {
    match s.matches('.').count() {
        0 => true,
        1 => {
            let frac = s.rsplit('.').next().unwrap_or("");
            (1..=2).contains(&frac.len()) && frac.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

/// Format an amount in the localized "R$ 1.234,56" form.
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("R$ {}{},{}", sign, grouped, frac_part)
}

/// Parse back an amount formatted by [`format_amount`].
///
/// Used by the summary reporter to recompute totals from output records.
pub fn parse_formatted_amount(formatted: &str) -> f64 {
    parse_amount(formatted)
}

// =============================================================================
// Quantity and unit of supply
// =============================================================================

/// Extract the estimated quantity from the quantity text.
///
/// Month-unit words are stripped first, then the first digit run anywhere in
/// the remainder is taken. No digits defaults to 12 (a full-year contract).
pub fn parse_quantity(raw: &str) -> f64 {
    let stripped = MONTH_WORDS.replace_all(raw, "");
    DIGIT_RUN
        .find(&stripped)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(12.0)
}

/// Infer the unit of supply from the raw quantity text.
pub fn infer_unit(raw: &str) -> Unit {
    let lower = raw.to_lowercase();
    if lower.contains("mes") {
        Unit::Mes
    } else if lower.contains("unidade") || lower.contains("und") {
        Unit::Und
    } else {
        Unit::Und
    }
}

/// Unit price, guarding against division by zero.
pub fn unit_amount(total: f64, quantity: f64) -> f64 {
    if quantity > 0.0 {
        total / quantity
    } else {
        total
    }
}

// =============================================================================
// Delivery schedule
// =============================================================================

/// Delivery schedule extracted from the expectation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliverySchedule {
    /// Calendar quarter, 1..=4.
    pub quarter: u8,
    /// Four-digit year from the matched pattern, when present.
    pub year: Option<i32>,
}

/// Parse a `<month name>/<2-digit year>` pattern from the expectation text.
///
/// Month names are Portuguese, case-insensitive, with "março" accepted both
/// accented and unaccented. An unrecognized name counts as January; no
/// pattern at all defaults to the first quarter.
pub fn parse_delivery(expectation: &str) -> DeliverySchedule {
    match EXPECTATION_DATE.captures(expectation) {
        Some(caps) => {
            let month = month_number(&caps[1]);
            let year = caps[2].parse::<i32>().ok().map(|yy| 2000 + yy);
            DeliverySchedule {
                quarter: (month - 1) / 3 + 1,
                year,
            }
        }
        None => DeliverySchedule { quarter: 1, year: None },
    }
}

fn month_number(name: &str) -> u8 {
    match name.to_lowercase().as_str() {
        "janeiro" => 1,
        "fevereiro" => 2,
        "março" | "marco" => 3,
        "abril" => 4,
        "maio" => 5,
        "junho" => 6,
        "julho" => 7,
        "agosto" => 8,
        "setembro" => 9,
        "outubro" => 10,
        "novembro" => 11,
        "dezembro" => 12,
        _ => 1,
    }
}

// =============================================================================
// Renewal flag
// =============================================================================

/// Whether the item reads as a contract renewal.
pub fn is_renewal(description_lower: &str, program: &str) -> bool {
    description_lower.contains("renovação") || program.to_lowercase().contains("manutenção")
}

// =============================================================================
// Whole-row normalization
// =============================================================================

/// Normalize every field of a raw row.
pub fn normalize_row(raw: &RawRow) -> NormalizedRow {
    let description = clean_text(&raw.objective);
    let description_lower = description.to_lowercase();

    let amount_total = parse_amount(&raw.value);
    let quantity = parse_quantity(&raw.quantity);
    let schedule = parse_delivery(&raw.expectation);

    NormalizedRow {
        requester: clean_requester(&raw.requester),
        justification: clean_text(&raw.justification),
        amount_total,
        amount_unit: unit_amount(amount_total, quantity),
        quantity,
        unit: infer_unit(&raw.quantity),
        delivery_quarter: schedule.quarter,
        expectation_year: schedule.year,
        is_renewal: is_renewal(&description_lower, &raw.program),
        description,
    }
}

// =============================================================================
// Tests
// =============================================================================
