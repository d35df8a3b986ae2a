//! Configuration and constants for the dashboard view.

use super::error::ConfigError;
use crate::format::Locale;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current view schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Placeholder shown for absent or unparseable numbers
pub const MISSING_LABEL: &str = "-";

/// Shown for scientific-notation strings beyond `MAX_SCIENTIFIC_EXPONENT`
pub const TOO_LARGE_LABEL: &str = "Çok Büyük";

/// Shown for anomaly rows without a flagged address
pub const UNKNOWN_ADDRESS_LABEL: &str = "Bilinmeyen";

/// Shown for absent scores and null detail fields
pub const NOT_AVAILABLE_LABEL: &str = "N/A";

/// Fraction digits for model comparison metrics
pub const METRIC_FRACTION_DIGITS: usize = 4;

/// Largest "e+" exponent that is still converted to a number
pub const MAX_SCIENTIFIC_EXPONENT: i64 = 20;

pub const DEFAULT_BIN_COUNT: usize = 10;
pub const TOKENS_PER_PAGE: usize = 6;

/// 1 Gwei = 1e9 wei
pub const WEI_PER_GWEI: f64 = 1e9;

// Field names used by the analysis service (holdings and anomaly rows)
pub const CONTRACT_FIELD: &str = "contract_address";
pub const SYMBOL_FIELD: &str = "token_symbol";
pub const VALUE_FIELD: &str = "value";
pub const ADDRESS_FIELD: &str = "from";
pub const SCORE_FIELD: &str = "anomaly_score";
pub const ANOMALY_FLAG_FIELD: &str = "is_anomaly";

/// Display settings for a rendered view
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Number locale for sub-thousand values and grouped integers
    pub locale: Locale,

    /// Sentinel for absent/unparseable values
    pub missing_label: String,

    /// Sentinel for oversized scientific-notation strings
    pub too_large_label: String,

    /// Exponent threshold for `too_large_label`
    pub max_scientific_exponent: i64,

    /// Histogram bins per feature
    pub bin_count: usize,

    /// Tokens listed per page in summaries
    pub token_page_size: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            missing_label: MISSING_LABEL.to_string(),
            too_large_label: TOO_LARGE_LABEL.to_string(),
            max_scientific_exponent: MAX_SCIENTIFIC_EXPONENT,
            bin_count: DEFAULT_BIN_COUNT,
            token_page_size: TOKENS_PER_PAGE,
        }
    }
}

impl DisplayConfig {
    /// Reject settings that would render empty charts or pages
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bin_count == 0 {
            return Err(ConfigError::InvalidValue(
                "bin_count must be at least 1".to_string(),
            ));
        }
        if self.token_page_size == 0 {
            return Err(ConfigError::InvalidValue(
                "token_page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load display settings from a TOML file
///
/// Missing keys fall back to their defaults.
///
/// # Errors
/// * `ConfigError::ReadFailed` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
/// * `ConfigError::InvalidValue` - If `bin_count` or `token_page_size` is 0
pub fn load_config(path: impl AsRef<Path>) -> Result<DisplayConfig, ConfigError> {
    let path = path.as_ref();
    debug!("Loading display config from: {}", path.display());

    let contents = fs::read_to_string(path)?;
    let config: DisplayConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}
