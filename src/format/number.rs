//! Adaptive numeric display for dashboard values.
//!
//! Values arrive from the analysis service as JSON numbers, decimal
//! strings, scientific-notation strings (`"1.2e+25"`) or not at all.
//! Everything is reduced to a short display string:
//!
//! | magnitude | output     |
//! |-----------|------------|
//! | ≥ 1e12    | `1.23T`    |
//! | ≥ 1e9     | `1.23B`    |
//! | ≥ 1e6     | `1.23M`    |
//! | ≥ 1e3     | `1.23K`    |
//! | smaller   | locale grouping, ≤ 2 fraction digits |
//!
//! Formatting never fails: absent or unparseable input yields the
//! missing label (`-`).

use super::locale::Locale;
use super::rounding::to_fixed;
use crate::utils::config::DisplayConfig;
use serde_json::Value;

/// Abbreviation thresholds, largest first
const SCALES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

/// A raw numeric field as delivered by the API
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NumericValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl NumericValue {
    /// Coerce to a finite number
    ///
    /// Strings are read as decimal numbers (surrounding whitespace
    /// allowed, scientific notation accepted). Empty strings, NaN and
    /// infinities yield `None`.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            NumericValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
            NumericValue::Text(s) => parse_decimal(s),
            NumericValue::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, NumericValue::Missing)
    }
}

impl From<&Value> for NumericValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().map_or(NumericValue::Missing, NumericValue::Number),
            Value::String(s) => NumericValue::Text(s.clone()),
            _ => NumericValue::Missing,
        }
    }
}

impl From<f64> for NumericValue {
    fn from(n: f64) -> Self {
        NumericValue::Number(n)
    }
}

impl From<i64> for NumericValue {
    fn from(n: i64) -> Self {
        NumericValue::Number(n as f64)
    }
}

impl From<u64> for NumericValue {
    fn from(n: u64) -> Self {
        NumericValue::Number(n as f64)
    }
}

impl From<&str> for NumericValue {
    fn from(s: &str) -> Self {
        NumericValue::Text(s.to_string())
    }
}

impl From<String> for NumericValue {
    fn from(s: String) -> Self {
        NumericValue::Text(s)
    }
}

impl<T: Into<NumericValue>> From<Option<T>> for NumericValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(NumericValue::Missing, Into::into)
    }
}

/// Parse a decimal string into a finite number
pub fn parse_decimal(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Read the exponent of an `"<base>e+<exp>"` string
///
/// Only the leading integer after `e+` counts, so `"1e+25abc"` has
/// exponent 25. Returns `None` when there is no `e+` or no digits.
pub fn scientific_exponent(s: &str) -> Option<i64> {
    let (_, exp) = s.split_once("e+")?;
    let exp = exp.trim_start();
    let (negative, digits) = match exp.as_bytes().first() {
        Some(b'-') => (true, &exp[1..]),
        Some(b'+') => (false, &exp[1..]),
        _ => (false, exp),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Saturate absurdly long exponents; they are "too large" either way.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Formats values per a `DisplayConfig`
#[derive(Debug, Clone)]
pub struct NumericFormatter {
    locale: Locale,
    missing_label: String,
    too_large_label: String,
    max_exponent: i64,
}

impl NumericFormatter {
    pub fn new(config: &DisplayConfig) -> Self {
        Self {
            locale: config.locale,
            missing_label: config.missing_label.clone(),
            too_large_label: config.too_large_label.clone(),
            max_exponent: config.max_scientific_exponent,
        }
    }

    /// Format a raw API value
    pub fn format(&self, value: &NumericValue) -> String {
        if let NumericValue::Text(s) = value {
            if let Some(exp) = scientific_exponent(s) {
                if exp > self.max_exponent {
                    return self.too_large_label.clone();
                }
            }
        }

        match value.to_f64() {
            Some(n) => self.format_f64(n),
            None => self.missing_label.clone(),
        }
    }

    /// Format an already-coerced number
    pub fn format_f64(&self, n: f64) -> String {
        if !n.is_finite() {
            return self.missing_label.clone();
        }

        let magnitude = n.abs();
        for (threshold, suffix) in SCALES {
            if magnitude >= threshold {
                return format!("{}{}", to_fixed(n / threshold, 2), suffix);
            }
        }

        self.locale.format_decimal(n, 2)
    }

    /// Format an optional number, `None` rendering as the missing label
    pub fn format_opt(&self, n: Option<f64>) -> String {
        n.map_or_else(|| self.missing_label.clone(), |n| self.format_f64(n))
    }

    /// Format with a unit suffix, e.g. `"12.50K Gwei"`
    pub fn format_with_unit(&self, n: Option<f64>, unit: &str) -> String {
        format!("{} {}", self.format_opt(n), unit)
    }
}

impl Default for NumericFormatter {
    fn default() -> Self {
        Self::new(&DisplayConfig::default())
    }
}

/// Format with the default display settings
pub fn format_number(value: impl Into<NumericValue>) -> String {
    NumericFormatter::default().format(&value.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1.00K");
        assert_eq!(format_number(1e6), "1.00M");
        assert_eq!(format_number(1e9), "1.00B");
        assert_eq!(format_number(1e12), "1.00T");
    }

    #[test]
    fn test_abbreviation_rounds_halves_up() {
        assert_eq!(format_number(1125.0), "1.13K");
        assert_eq!(format_number(1_125_000.0), "1.13M");
        assert_eq!(format_number(-1375.0), "-1.38K");
        assert_eq!(format_number(0.125), "0,13");
    }

    #[test]
    fn test_sentinel_on_invalid_input() {
        assert_eq!(format_number(None::<f64>), "-");
        assert_eq!(format_number(NumericValue::Missing), "-");
        assert_eq!(format_number("abc"), "-");
        assert_eq!(format_number(""), "-");
        assert_eq!(format_number(f64::NAN), "-");
    }

    #[test]
    fn test_numeric_strings() {
        assert_eq!(format_number("2500"), "2.50K");
        assert_eq!(format_number(" 42 "), "42");
        assert_eq!(format_number("1.5e+7"), "15.00M");
    }

    #[test]
    fn test_scientific_too_large() {
        assert_eq!(format_number("1.2e+21"), "Çok Büyük");
        assert_eq!(format_number("9e+20"), "900000000.00T");
    }

    #[test]
    fn test_negative_values_use_magnitude() {
        assert_eq!(format_number(-2500.0), "-2.50K");
        assert_eq!(format_number(-12.5), "-12,5");
    }

    #[test]
    fn test_locale_fraction() {
        let config = DisplayConfig {
            locale: Locale::EnUs,
            ..Default::default()
        };
        let formatter = NumericFormatter::new(&config);
        assert_eq!(formatter.format(&NumericValue::Number(3.14159)), "3.14");
        assert_eq!(format_number(3.14159), "3,14");
    }

    #[test]
    fn test_scientific_exponent() {
        assert_eq!(scientific_exponent("1.5e+25"), Some(25));
        assert_eq!(scientific_exponent("1e+7x"), Some(7));
        assert_eq!(scientific_exponent("1e+abc"), None);
        assert_eq!(scientific_exponent("12345"), None);
    }

    #[test]
    fn test_from_json_value() {
        assert_eq!(NumericValue::from(&serde_json::json!(5)), NumericValue::Number(5.0));
        assert_eq!(
            NumericValue::from(&serde_json::json!("5")),
            NumericValue::Text("5".to_string())
        );
        assert!(NumericValue::from(&serde_json::json!(true)).is_missing());
    }

    #[test]
    fn test_format_with_unit() {
        let formatter = NumericFormatter::default();
        assert_eq!(formatter.format_with_unit(Some(12.0), "Gwei"), "12 Gwei");
        assert_eq!(formatter.format_with_unit(None, "ETH"), "- ETH");
    }
}
