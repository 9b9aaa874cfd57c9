//! Numeric parsing for counter and amount cells.
//!
//! Sheet users type numbers with thousands separators (`"1,200"`), the script
//! sometimes hands back real JSON numbers, and blank cells are common. Every
//! input resolves to a finite value; anything unparseable reads as zero.
//!
//! Only plain decimal notation with an optional exponent is accepted. Hex
//! literals, `Infinity`, `NaN`, and digit-group underscores read as zero.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::cell;

/// Parses a counter cell into its canonical decimal string.
///
/// `"1,200"` → `"1200"`, `"1.50"` → `"1.5"`, `45` → `"45"`. Absent, blank,
/// and unparseable cells become `"0"`.
#[must_use]
pub fn parse_sheet_number(value: Option<&Value>) -> String {
    let Some(cleaned) = cleaned_numeric_text(value) else {
        return "0".to_owned();
    };

    if let Some(decimal) = parse_decimal(&cleaned) {
        return canonical(decimal);
    }

    let Some(float) = cleaned.parse::<f64>().ok().filter(|f| f.is_finite()) else {
        return "0".to_owned();
    };

    // Below one, the float is rounded to `Decimal`'s 28 fractional digits so
    // that it canonicalizes the same way its plain-notation spelling does.
    if float.abs() < 1.0 {
        return parse_decimal(&format!("{float:.28}")).map_or_else(|| "0".to_owned(), canonical);
    }

    // Magnitudes beyond `Decimal`'s 28 digits stay floats.
    float.to_string()
}

/// Parses an amount cell into a [`Decimal`], reading unparseable input as zero.
#[must_use]
pub fn parse_sheet_decimal(value: Option<&Value>) -> Decimal {
    cleaned_numeric_text(value)
        .and_then(|text| parse_decimal(&text))
        .map_or(Decimal::ZERO, |d| d.normalize())
}

/// Parses a quantity cell into a `u32`, truncating fractions and clamping
/// negatives to zero.
#[must_use]
pub fn parse_sheet_quantity(value: Option<&Value>) -> u32 {
    let decimal = parse_sheet_decimal(value).trunc();
    if decimal.is_sign_negative() {
        return 0;
    }
    decimal.to_u32().unwrap_or(u32::MAX)
}

/// Trims the cell text and strips thousands separators. Returns `None` when
/// nothing numeric could remain.
fn cleaned_numeric_text(value: Option<&Value>) -> Option<String> {
    let text = cell::to_text(value);
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    let plausible = cleaned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-' | b'e' | b'E'));
    plausible.then_some(cleaned)
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

fn canonical(decimal: Decimal) -> String {
    if decimal.is_zero() {
        return "0".to_owned();
    }
    decimal.normalize().to_string()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
