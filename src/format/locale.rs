//! Locale-specific digit grouping and decimal separators.

use super::rounding::round_shortest;
use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number locale used for plain (unabbreviated) display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    /// Turkish: `1.234.567,89`
    #[default]
    #[serde(rename = "tr-TR")]
    TrTr,

    /// US English: `1,234,567.89`
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    pub fn tag(self) -> &'static str {
        match self {
            Locale::TrTr => "tr-TR",
            Locale::EnUs => "en-US",
        }
    }

    pub fn group_separator(self) -> char {
        match self {
            Locale::TrTr => '.',
            Locale::EnUs => ',',
        }
    }

    pub fn decimal_separator(self) -> char {
        match self {
            Locale::TrTr => ',',
            Locale::EnUs => '.',
        }
    }

    /// Insert group separators into a run of ASCII digits
    pub fn group_integer(self, digits: &str) -> String {
        let sep = self.group_separator();
        let len = digits.len();
        let mut out = String::with_capacity(len + len / 3);

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(sep);
            }
            out.push(ch);
        }

        out
    }

    /// Format a finite value with grouping and at most `max_fraction_digits`
    ///
    /// Trailing fractional zeros are dropped, so `1.10` renders as `1,1`
    /// in tr-TR. Halves round away from zero (`0.125` → `0,13`). A value
    /// that rounds to zero never carries a minus sign.
    pub fn format_decimal(self, value: f64, max_fraction_digits: usize) -> String {
        let (int_part, frac_part) = round_shortest(value, max_fraction_digits);

        let mut out = String::with_capacity(int_part.len() + frac_part.len() + 8);
        if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
            out.push('-');
        }
        out.push_str(&self.group_integer(&int_part));
        if !frac_part.is_empty() {
            out.push(self.decimal_separator());
            out.push_str(&frac_part);
        }

        out
    }

    /// Group a count for display (`12345` → `12.345` in tr-TR)
    pub fn format_count(self, count: usize) -> String {
        self.group_integer(&count.to_string())
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tr-tr" | "tr" => Ok(Locale::TrTr),
            "en-us" | "en" => Ok(Locale::EnUs),
            other => Err(ConfigError::UnsupportedLocale(other.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_integer() {
        assert_eq!(Locale::TrTr.group_integer("1234567"), "1.234.567");
        assert_eq!(Locale::EnUs.group_integer("1234567"), "1,234,567");
        assert_eq!(Locale::EnUs.group_integer("123"), "123");
        assert_eq!(Locale::EnUs.group_integer("1000"), "1,000");
    }

    #[test]
    fn test_format_decimal_trims_fraction() {
        assert_eq!(Locale::TrTr.format_decimal(12.346, 2), "12,35");
        assert_eq!(Locale::TrTr.format_decimal(1.1, 2), "1,1");
        assert_eq!(Locale::EnUs.format_decimal(999.0, 2), "999");
        assert_eq!(Locale::EnUs.format_decimal(0.5, 2), "0.5");
    }

    #[test]
    fn test_format_decimal_negative() {
        assert_eq!(Locale::EnUs.format_decimal(-42.25, 2), "-42.25");
        assert_eq!(Locale::EnUs.format_decimal(-0.001, 2), "0");
    }

    #[test]
    fn test_format_decimal_rounds_halves_up() {
        assert_eq!(Locale::TrTr.format_decimal(0.125, 2), "0,13");
        assert_eq!(Locale::EnUs.format_decimal(0.125, 2), "0.13");
        assert_eq!(Locale::EnUs.format_decimal(-0.125, 2), "-0.13");
        assert_eq!(Locale::TrTr.format_decimal(999.995, 2), "1.000");
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::EnUs);
        assert_eq!("TR".parse::<Locale>().unwrap(), Locale::TrTr);
        assert!("fr-FR".parse::<Locale>().is_err());
    }

    #[test]
    fn test_format_count() {
        assert_eq!(Locale::TrTr.format_count(12345), "12.345");
        assert_eq!(Locale::EnUs.format_count(7), "7");
    }
}
