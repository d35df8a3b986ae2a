//! Display rows for a single detector's anomaly list.

use crate::format::to_fixed;
use crate::parser::schema::{AnomalyRecord, AnomalyRow};
use crate::utils::config::{NOT_AVAILABLE_LABEL, UNKNOWN_ADDRESS_LABEL};
use serde_json::Value;

/// Render decoded anomaly records, one row per record in input order
///
/// Scores and numeric fields show two decimals; null fields show the
/// not-available label; lists and objects show as compact JSON.
pub fn anomaly_rows(records: &[AnomalyRecord]) -> Vec<AnomalyRow> {
    records
        .iter()
        .map(|record| AnomalyRow {
            address: record
                .address
                .clone()
                .unwrap_or_else(|| UNKNOWN_ADDRESS_LABEL.to_string()),
            score: record
                .score
                .map_or_else(|| NOT_AVAILABLE_LABEL.to_string(), |s| to_fixed(s, 2)),
            details: record
                .fields
                .iter()
                .flatten()
                .map(|(key, value)| (key.clone(), detail_value(value)))
                .collect(),
            details_available: record.fields.is_some(),
        })
        .collect()
}

fn detail_value(value: &Value) -> String {
    match value {
        Value::Null => NOT_AVAILABLE_LABEL.to_string(),
        Value::Number(n) => n
            .as_f64()
            .map_or_else(|| n.to_string(), |n| to_fixed(n, 2)),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
