use risk_lens::format::{format_number, Locale, NumericFormatter, NumericValue};
use risk_lens::utils::DisplayConfig;

#[test]
fn test_formatting_is_deterministic() {
    for value in ["12345.678", "1e+25", "abc", "999"] {
        assert_eq!(format_number(value), format_number(value));
    }
}

#[test]
fn test_threshold_boundaries() {
    assert_eq!(format_number(999.0), "999");
    assert_eq!(format_number(1000.0), "1.00K");
    assert_eq!(format_number(1e6), "1.00M");
    assert_eq!(format_number(1e9), "1.00B");
    assert_eq!(format_number(1e12), "1.00T");
}

#[test]
fn test_sentinel_on_invalid_input() {
    assert_eq!(format_number(NumericValue::Missing), "-");
    assert_eq!(format_number(None::<&str>), "-");
    assert_eq!(format_number("abc"), "-");
}

#[test]
fn test_too_large_scientific_string() {
    assert_eq!(format_number("3.2e+21"), "Çok Büyük");
    assert_eq!(format_number("1e+6"), "1.00M");
}

#[test]
fn test_custom_labels_from_config() {
    let config = DisplayConfig {
        locale: Locale::EnUs,
        missing_label: "n/a".to_string(),
        too_large_label: "huge".to_string(),
        ..Default::default()
    };
    let formatter = NumericFormatter::new(&config);

    assert_eq!(formatter.format(&"1e+40".into()), "huge");
    assert_eq!(formatter.format(&"bogus".into()), "n/a");
    assert_eq!(formatter.format(&NumericValue::Number(12.5)), "12.5");
}

#[test]
fn test_exact_halves_round_away_from_zero() {
    assert_eq!(format_number(1125.0), "1.13K");
    assert_eq!(format_number(1_125_000.0), "1.13M");
    assert_eq!(format_number(0.125), "0,13");

    let formatter = NumericFormatter::new(&DisplayConfig {
        locale: Locale::EnUs,
        ..Default::default()
    });
    assert_eq!(formatter.format(&NumericValue::Number(0.125)), "0.13");
}
