//! Decimal rounding that matches how the dashboard rounds for display.
//!
//! Rust's `{:.N}` rounds exact binary ties to even (`1.125` → `1.12`),
//! while the dashboard rounds them away from zero (`1.13`). Two flavours
//! are needed:
//!
//! - [`to_fixed`]: fixed digits, ties decided on the exact binary value
//!   (`1.125` is a tie, `1.115` is really `1.11499…` and is not).
//! - [`round_shortest`]: rounds the shortest decimal that reads back as
//!   the same value (`1.115` counts as a tie), used for locale display.

/// Render with exactly `digits` fraction digits, exact ties away from zero
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }

    let scale = 10f64.powi(digits as i32);
    let scaled = value * scale;

    // Only a tie when the product was computed without rounding
    let exact = value.mul_add(scale, -scaled) == 0.0;
    if exact && scaled.is_finite() && scaled.fract().abs() == 0.5 {
        let rounded = scaled.trunc() + scaled.signum();
        return format!("{:.*}", digits, rounded / scale);
    }

    format!("{:.*}", digits, value)
}

/// Round `|value|` to at most `max_fraction_digits`, half away from zero
///
/// Works on the shortest round-trip decimal of the value. Returns the
/// integer digits and the fraction digits (trailing zeros removed).
/// The sign is left to the caller.
pub fn round_shortest(value: f64, max_fraction_digits: usize) -> (String, String) {
    let repr = format!("{}", value.abs());
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    if frac_part.len() <= max_fraction_digits {
        return (
            int_part.to_string(),
            frac_part.trim_end_matches('0').to_string(),
        );
    }

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part[..max_fraction_digits].bytes())
        .collect();

    if frac_part.as_bytes()[max_fraction_digits] >= b'5' {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - max_fraction_digits;
    let int_digits = String::from_utf8_lossy(&digits[..split]).into_owned();
    let frac_digits = String::from_utf8_lossy(&digits[split..])
        .trim_end_matches('0')
        .to_string();

    (int_digits, frac_digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_fixed_ties_away_from_zero() {
        assert_eq!(to_fixed(1.125, 2), "1.13");
        assert_eq!(to_fixed(-1.125, 2), "-1.13");
        assert_eq!(to_fixed(0.375, 2), "0.38");
        assert_eq!(to_fixed(2.5, 0), "3");
    }

    #[test]
    fn test_to_fixed_near_ties_use_binary_value() {
        // 1.115 is stored just below the tie
        assert_eq!(to_fixed(1.115, 2), "1.11");
        assert_eq!(to_fixed(3.14159, 4), "3.1416");
        assert_eq!(to_fixed(5.0, 2), "5.00");
    }

    #[test]
    fn test_round_shortest() {
        assert_eq!(round_shortest(0.125, 2), ("0".to_string(), "13".to_string()));
        assert_eq!(round_shortest(1.1, 2), ("1".to_string(), "1".to_string()));
        assert_eq!(round_shortest(999.995, 2), ("1000".to_string(), String::new()));
        assert_eq!(round_shortest(-12.5, 2), ("12".to_string(), "5".to_string()));
        assert_eq!(round_shortest(0.001, 2), ("0".to_string(), String::new()));
    }
}
