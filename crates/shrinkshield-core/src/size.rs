//! # Size Normalizer
//!
//! Converts free-text package sizes from receipt lines into millilitres.
//!
//! ## How A Size Is Read
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    "Distilled Water 1 L"                                │
//! │                                    │                                    │
//! │                                    ▼                                    │
//! │  Scan for <quantity> <ws?> <unit>\b   (leftmost match wins)            │
//! │                                    │                                    │
//! │                                    ▼                                    │
//! │                  quantity = 1, unit = "L" → Litre                      │
//! │                                    │                                    │
//! │                                    ▼                                    │
//! │                  1 × 1000.0 = 1000.0 mL                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recognized Units
//! | token | unit        | factor to mL |
//! |-------|-------------|--------------|
//! | `ml`  | millilitre  | 1.0          |
//! | `l`   | litre       | 1000.0       |
//! | `oz`  | fluid ounce | 29.5735      |
//!
//! Anything else ("gal", "ct", "ea", "floz") is unparseable. There is no
//! error type: an unreadable size is `None`, and callers skip unit-price
//! derivation for it.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Millilitres per US fluid ounce.
///
/// The source data does not say whether "oz" means fluid or weight ounce;
/// receipts for liquids overwhelmingly mean fluid ounces.
pub const ML_PER_FL_OZ: f64 = 29.5735;

/// Millilitres per litre.
pub const ML_PER_LITRE: f64 = 1000.0;

/// Quantity, optional whitespace, unit token ending on a word boundary.
///
/// `ml` is listed before `l` so "500 ml" never stops at the `m`.
static SIZE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(ml|l|oz)\b").expect("size pattern is valid")
});

/// A single Unicode decimal digit (general category Nd), same class as `\d` above.
static DECIMAL_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d$").expect("digit pattern is valid"));

// =============================================================================
// Volume Unit
// =============================================================================

/// A package-size unit that can be expressed in millilitres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum VolumeUnit {
    Millilitre,
    Litre,
    FluidOunce,
}

impl VolumeUnit {
    /// Parses a unit token case-insensitively. Only exact tokens match.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "ml" => Some(VolumeUnit::Millilitre),
            "l" => Some(VolumeUnit::Litre),
            "oz" => Some(VolumeUnit::FluidOunce),
            _ => None,
        }
    }

    /// Multiplier that converts a quantity in this unit to millilitres.
    #[inline]
    pub const fn ml_factor(&self) -> f64 {
        match self {
            VolumeUnit::Millilitre => 1.0,
            VolumeUnit::Litre => ML_PER_LITRE,
            VolumeUnit::FluidOunce => ML_PER_FL_OZ,
        }
    }
}

// =============================================================================
// Millilitres
// =============================================================================

/// A normalized package size in millilitres. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Millilitres(f64);

impl Millilitres {
    /// Creates a size from a millilitre value.
    ///
    /// Returns `None` for negative or non-finite values.
    pub fn new(ml: f64) -> Option<Self> {
        if ml.is_finite() && ml >= 0.0 {
            Some(Millilitres(ml))
        } else {
            None
        }
    }

    /// Returns the raw millilitre value.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Millilitres {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mL", self.0)
    }
}

// =============================================================================
// Size Match
// =============================================================================

/// The leftmost quantity+unit pair found in a raw size string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeMatch {
    /// The numeric quantity as written.
    pub quantity: f64,
    /// The recognized unit.
    pub unit: VolumeUnit,
    /// Byte offset where the match starts in the input.
    pub start: usize,
    /// Byte offset one past the end of the match.
    pub end: usize,
}

impl SizeMatch {
    /// The quantity converted to millilitres.
    pub fn to_millilitres(&self) -> Option<Millilitres> {
        Millilitres::new(self.quantity * self.unit.ml_factor())
    }
}

/// Finds the leftmost `<quantity><ws?><unit>` pair in `raw`.
///
/// Used directly by the line-item parser, which needs the match span to
/// split the product name from its size.
pub fn find_size(raw: &str) -> Option<SizeMatch> {
    let caps = SIZE_PATTERN.captures(raw)?;
    let whole = caps.get(0)?;
    let quantity = parse_quantity(caps.get(1)?.as_str())?;
    let unit = VolumeUnit::from_token(caps.get(2)?.as_str())?;

    Some(SizeMatch {
        quantity,
        unit,
        start: whole.start(),
        end: whole.end(),
    })
}

/// Parses a matched quantity such as `"1.5"`, `"٥"` or `"１"`.
///
/// The pattern's `\d` accepts any Unicode decimal digit, so non-ASCII digits
/// are folded to ASCII before handing the text to `f64::from_str`.
fn parse_quantity(text: &str) -> Option<f64> {
    if text.is_ascii() {
        return text.parse().ok();
    }

    let folded = text
        .chars()
        .map(|c| match c {
            '.' => Some('.'),
            _ => decimal_digit_value(c).and_then(|d| char::from_digit(d, 10)),
        })
        .collect::<Option<String>>()?;

    folded.parse().ok()
}

fn is_decimal_digit(c: char) -> bool {
    c.is_ascii_digit() || DECIMAL_DIGIT.is_match(c.encode_utf8(&mut [0; 4]))
}

/// Numeric value of a Unicode decimal digit.
///
/// Nd digits are encoded in contiguous runs of ten starting at zero, so the
/// value is the count of digits directly before `c`, modulo 10.
fn decimal_digit_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    if !is_decimal_digit(c) {
        return None;
    }

    let mut preceding = 0u32;
    let mut code = c as u32;
    while let Some(prev) = code.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        preceding += 1;
        code -= 1;
    }

    Some(preceding % 10)
}

/// Normalizes a raw package-size string into millilitres.
///
/// ## Example
/// ```rust
/// use shrinkshield_core::size::normalize_size;
///
/// assert_eq!(normalize_size(Some("500 mL")).map(|s| s.value()), Some(500.0));
/// assert_eq!(normalize_size(Some("Distilled Water 1 L")).map(|s| s.value()), Some(1000.0));
/// assert_eq!(normalize_size(Some("3 ct")), None);
/// assert_eq!(normalize_size(None), None);
/// ```
pub fn normalize_size(raw: Option<&str>) -> Option<Millilitres> {
    let raw = raw?;
    if raw.is_empty() {
        return None;
    }
    find_size(raw)?.to_millilitres()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ml(raw: &str) -> Option<f64> {
        normalize_size(Some(raw)).map(|s| s.value())
    }

    #[test]
    fn test_millilitres_are_identity() {
        assert_eq!(ml("500 ml"), Some(500.0));
        assert_eq!(ml("0.5 ml"), Some(0.5));
        assert_eq!(ml("355ml"), Some(355.0));
    }

    #[test]
    fn test_litres_multiply_by_thousand() {
        assert_eq!(ml("1 L"), Some(1000.0));
        assert_eq!(ml("2 l"), Some(2000.0));
        assert_eq!(ml("1.5L"), Some(1.5 * 1000.0));
    }

    #[test]
    fn test_ounces_use_fluid_ounce_factor() {
        assert_eq!(ml("16 oz"), Some(16.0 * 29.5735));
        assert_eq!(ml("12OZ"), Some(12.0 * 29.5735));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(ml("500ML"), Some(500.0));
        assert_eq!(ml("500ml"), Some(500.0));
        assert_eq!(ml("500Ml"), Some(500.0));
        assert_eq!(ml("500 mL"), Some(500.0));
    }

    #[test]
    fn test_embedded_in_text() {
        assert_eq!(ml("Distilled Water 1 L"), Some(1000.0));
        assert_eq!(ml("Sparkling Water 500 mL"), Some(500.0));
        assert_eq!(ml("Juice (1.75 L) bottle"), Some(1750.0));
    }

    #[test]
    fn test_leftmost_match_wins() {
        assert_eq!(ml("Cola 2 L + 355 ml free"), Some(2000.0));
        assert_eq!(ml("6 x 355 ml"), Some(355.0));
    }

    #[test]
    fn test_absent_and_empty_are_unparseable() {
        assert_eq!(normalize_size(None), None);
        assert_eq!(normalize_size(Some("")), None);
        assert_eq!(ml("   "), None);
    }

    #[test]
    fn test_unrecognized_units_are_unparseable() {
        assert_eq!(ml("3 ct"), None);
        assert_eq!(ml("1 gal"), None);
        assert_eq!(ml("2 pt"), None);
        assert_eq!(ml("12 ea"), None);
        assert_eq!(ml("Bananas"), None);
    }

    #[test]
    fn test_partial_unit_tokens_do_not_match() {
        assert_eq!(ml("16 floz"), None);
        assert_eq!(ml("2 lb"), None);
        assert_eq!(ml("5 lbs"), None);
        assert_eq!(ml("3 mlx"), None);
        assert_eq!(ml("1 ozs"), None);
    }

    #[test]
    fn test_no_locale_number_parsing() {
        // Comma is not a decimal separator: only "5 L" is read
        assert_eq!(ml("1,5 L"), Some(5000.0));
        // Thousands separator is not understood either
        assert_eq!(ml("1,000 ml"), Some(0.0));
    }

    #[test]
    fn test_zero_quantity_is_present() {
        assert_eq!(ml("0 ml"), Some(0.0));
    }

    #[test]
    fn test_repeated_calls_are_stable() {
        let first = ml("750 ml");
        for _ in 0..5 {
            assert_eq!(ml("750 ml"), first);
        }
    }

    #[test]
    fn test_find_size_reports_span() {
        let m = find_size("Milk 2 L 3.49").unwrap();
        assert_eq!(m.unit, VolumeUnit::Litre);
        assert_eq!(m.quantity, 2.0);
        assert_eq!(&"Milk 2 L 3.49"[m.start..m.end], "2 L");
    }

    #[test]
    fn test_millilitres_rejects_negative() {
        assert!(Millilitres::new(-1.0).is_none());
        assert!(Millilitres::new(f64::NAN).is_none());
        assert!(Millilitres::new(f64::INFINITY).is_none());
        assert_eq!(Millilitres::new(0.0).map(|m| m.value()), Some(0.0));
    }

    #[test]
    fn test_unit_tokens() {
        assert_eq!(VolumeUnit::from_token("ML"), Some(VolumeUnit::Millilitre));
        assert_eq!(VolumeUnit::from_token("gal"), None);
        assert_eq!(VolumeUnit::from_token("Oz"), Some(VolumeUnit::FluidOunce));
    }

    #[test]
    fn test_unicode_digits_are_read() {
        // Arabic-Indic five, fullwidth one
        assert_eq!(ml("\u{0665} ml Water 500 ml"), Some(5.0));
        assert_eq!(ml("\u{0665} ml"), Some(5.0));
        assert_eq!(ml("\u{FF11} L"), Some(1000.0));
        assert_eq!(ml("\u{0661}.\u{0665} l"), Some(1500.0));
        // Devanagari two, mathematical bold seven
        assert_eq!(ml("\u{0968} oz").unwrap(), 2.0 * ML_PER_FL_OZ);
        assert_eq!(ml("\u{1D7D5} ml"), Some(7.0));
    }

    #[test]
    fn test_decimal_digit_values() {
        assert_eq!(decimal_digit_value('7'), Some(7));
        assert_eq!(decimal_digit_value('\u{0660}'), Some(0));
        assert_eq!(decimal_digit_value('\u{0669}'), Some(9));
        assert_eq!(decimal_digit_value('\u{FF19}'), Some(9));
        assert_eq!(decimal_digit_value('\u{00B2}'), None);
        assert_eq!(decimal_digit_value('x'), None);
    }

    #[test]
    fn test_overflowing_quantity_is_absent() {
        let raw = format!("{} ml", "9".repeat(400));
        assert_eq!(ml(&raw), None);
    }
}
