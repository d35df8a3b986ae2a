//! Decode raw analysis-service payloads into validated entities.
//!
//! This is the one place that looks at JSON shapes. Everything past
//! this module can assume well-formed data. Decoding is tolerant:
//! a bad row or detector is skipped (and recorded where the view shows
//! it), never allowed to fail the whole page.

use super::schema::{
    AnomalyRecord, DetectorImportance, DetectorList, DetectorResults, FeatureDistribution,
    FeatureImportance, FeatureSamples, GasAnalysis, IssueKind, MetricSeries, ModelMetrics,
    ScanIssue, TokenHolding,
};
use crate::format::NumericValue;
use crate::utils::config::{
    ADDRESS_FIELD, ANOMALY_FLAG_FIELD, CONTRACT_FIELD, SCORE_FIELD, SYMBOL_FIELD, VALUE_FIELD,
};
use crate::utils::error::DecodeError;
use log::{debug, warn};
use serde_json::Value;

/// Decode the token holdings list
///
/// Absent payloads and non-list payloads yield no holdings; rows that
/// are not objects are dropped.
pub fn decode_holdings(raw: &Value) -> Vec<TokenHolding> {
    let rows = match raw {
        Value::Array(rows) => rows,
        Value::Null => return Vec::new(),
        _ => {
            warn!("Token payload is not a list, ignoring it");
            return Vec::new();
        }
    };

    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| match row {
            Value::Object(obj) => Some(decode_holding(obj)),
            _ => {
                debug!("Dropping token row {}: not an object", index);
                None
            }
        })
        .collect()
}

/// Split one holding row into identity fields, value and metadata
fn decode_holding(obj: &serde_json::Map<String, Value>) -> TokenHolding {
    let contract_address = obj.get(CONTRACT_FIELD).and_then(string_field);
    let token_symbol = obj.get(SYMBOL_FIELD).and_then(string_field);
    let value = obj
        .get(VALUE_FIELD)
        .map(NumericValue::from)
        .unwrap_or_default();

    let metadata = obj
        .iter()
        .filter(|(key, _)| !matches!(key.as_str(), CONTRACT_FIELD | SYMBOL_FIELD | VALUE_FIELD))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    TokenHolding {
        contract_address,
        token_symbol,
        value,
        metadata,
    }
}

fn string_field(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// Decode the all-algorithms anomaly map (`{detector: [row...]}`)
///
/// # Errors
/// * `DecodeError::InvalidFormat` - root is neither an object nor null
pub fn decode_detector_results(raw: &Value) -> Result<DetectorResults, DecodeError> {
    let map = match raw {
        Value::Object(map) => map,
        Value::Null => return Ok(DetectorResults::default()),
        other => {
            return Err(DecodeError::InvalidFormat(format!(
                "expected a detector map, got {}",
                json_kind(other)
            )))
        }
    };

    let mut results = DetectorResults::default();

    for (name, value) in map {
        let Value::Array(rows) = value else {
            warn!("Skipping detector '{}': result is not a list", name);
            results.issues.push(ScanIssue {
                detector: name.clone(),
                index: None,
                kind: IssueKind::NotAList,
            });
            continue;
        };

        let mut list = DetectorList {
            name: name.clone(),
            addresses: Vec::with_capacity(rows.len()),
            total_entries: rows.len(),
        };

        for (index, row) in rows.iter().enumerate() {
            match flagged_address(row) {
                Ok(address) => list.addresses.push(address),
                Err(kind) => {
                    debug!("Skipping row {} of detector '{}': {:?}", index, name, kind);
                    results.issues.push(ScanIssue {
                        detector: name.clone(),
                        index: Some(index),
                        kind,
                    });
                }
            }
        }

        results.detectors.push(list);
    }

    debug!(
        "Decoded {} detectors ({} issues)",
        results.detectors.len(),
        results.issues.len()
    );

    Ok(results)
}

/// Pull the address key out of a flagged-entry row
///
/// Accepts non-empty strings and numbers (stringified).
fn flagged_address(row: &Value) -> Result<String, IssueKind> {
    let obj = row.as_object().ok_or(IssueKind::NotAnObject)?;
    match obj.get(ADDRESS_FIELD) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(IssueKind::MissingAddress),
    }
}

/// Decode one detector's anomaly list
///
/// Accepts the list itself or a response wrapping it under `anomalies`.
/// Rows that are not objects are kept as records without details, so
/// the list still shows one entry per flagged row.
pub fn decode_anomaly_rows(raw: &Value) -> Vec<AnomalyRecord> {
    let list = raw.get("anomalies").unwrap_or(raw);
    let rows = match list {
        Value::Array(rows) => rows,
        Value::Null => return Vec::new(),
        other => {
            warn!("Anomaly list is {}, not a list; ignoring it", json_kind(other));
            return Vec::new();
        }
    };

    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let Some(obj) = row.as_object() else {
                debug!("Anomaly row {} is {}, details unavailable", index, json_kind(row));
                return AnomalyRecord::default();
            };

            let address = match obj.get(ADDRESS_FIELD) {
                Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
                Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Some(n.to_string()),
                _ => None,
            };

            let fields = obj
                .iter()
                .filter(|(key, _)| {
                    !matches!(key.as_str(), ADDRESS_FIELD | SCORE_FIELD | ANOMALY_FLAG_FIELD)
                })
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();

            AnomalyRecord {
                address,
                score: obj.get(SCORE_FIELD).and_then(Value::as_f64),
                fields: Some(fields),
            }
        })
        .collect()
}

/// Decode model comparison metrics (`{metric: {model: value}}`)
///
/// Accepts the metrics map itself, an object holding it under `metrics`,
/// or a comparison response holding that under `comparison_data`.
/// Returns `None` when no metrics object is present.
pub fn decode_model_metrics(raw: &Value) -> Option<ModelMetrics> {
    let data = raw.get("comparison_data").unwrap_or(raw);
    let metrics = data.get("metrics").unwrap_or(data);

    let Some(map) = metrics.as_object() else {
        if !metrics.is_null() {
            warn!("Model metrics payload is {}, ignoring it", json_kind(metrics));
        }
        return None;
    };

    let series = map
        .iter()
        .map(|(metric, by_model)| {
            if !by_model.is_object() {
                debug!("Metric '{}' has no per-model values", metric);
            }
            MetricSeries {
                metric: metric.clone(),
                by_model: by_model.as_object().cloned(),
            }
        })
        .collect();

    Some(ModelMetrics { series })
}

/// Read a JSON list as numbers, silently dropping everything else
pub fn decode_sample(raw: &Value) -> Vec<f64> {
    match raw {
        Value::Array(items) => items.iter().filter_map(Value::as_f64).collect(),
        _ => Vec::new(),
    }
}

/// Decode the feature-distribution map (`{feature: {anomaly, normal}}`)
///
/// Entries that are not objects, or lack either sample, decode with
/// `samples: None`. A present sample that is not a list counts as empty.
pub fn decode_feature_distributions(raw: &Value) -> Vec<FeatureDistribution> {
    let map = match raw {
        Value::Object(map) => map,
        Value::Null => return Vec::new(),
        _ => {
            warn!("Feature distribution payload is not an object, ignoring it");
            return Vec::new();
        }
    };

    map.iter()
        .map(|(feature, dist)| {
            let samples = match (dist.get("anomaly"), dist.get("normal")) {
                (Some(anomaly), Some(normal)) if !anomaly.is_null() && !normal.is_null() => {
                    Some(FeatureSamples {
                        anomaly: decode_sample(anomaly),
                        normal: decode_sample(normal),
                    })
                }
                _ => {
                    warn!("Invalid distribution data for feature '{}'", feature);
                    None
                }
            };

            FeatureDistribution {
                feature: feature.clone(),
                samples,
            }
        })
        .collect()
}

/// Decode per-detector feature importances (`{detector: [{feature, importance}]}`)
///
/// Detectors whose value is not a list, and rows without a string
/// `feature`, are skipped. A non-numeric importance reads as 0.
pub fn decode_feature_importance(raw: &Value) -> Vec<DetectorImportance> {
    let Some(map) = raw.as_object() else {
        if !raw.is_null() {
            warn!("Feature importance payload is not an object, ignoring it");
        }
        return Vec::new();
    };

    map.iter()
        .filter_map(|(detector, value)| {
            let Some(rows) = value.as_array() else {
                warn!("Skipping importance for '{}': not a list", detector);
                return None;
            };

            let features = rows
                .iter()
                .filter_map(|row| {
                    let feature = row.get("feature")?.as_str()?.to_string();
                    let importance = row
                        .get("importance")
                        .and_then(Value::as_f64)
                        .unwrap_or(0.0);
                    Some(FeatureImportance {
                        feature,
                        importance,
                    })
                })
                .collect();

            Some(DetectorImportance {
                detector: detector.clone(),
                features,
            })
        })
        .collect()
}

/// Decode the `gas_analysis` block
///
/// Accepts either the block itself or a token-analysis response that
/// contains it. Returns `None` when neither is an object.
pub fn decode_gas_analysis(raw: &Value) -> Option<GasAnalysis> {
    let block = raw.get("gas_analysis").unwrap_or(raw).as_object()?;
    let field = |name: &str| block.get(name).map(NumericValue::from).unwrap_or_default();

    Some(GasAnalysis {
        total_gas_used: field("total_gas_used"),
        avg_gas_price: field("avg_gas_price"),
        total_gas_cost: field("total_gas_cost"),
    })
}

/// Human-readable JSON type name for diagnostics
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_holdings_splits_metadata() {
        let raw = json!([
            {"contract_address": "0xA", "token_symbol": "X", "value": "1.5", "decimals": 18},
            "garbage"
        ]);

        let holdings = decode_holdings(&raw);
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].contract_address.as_deref(), Some("0xA"));
        assert_eq!(holdings[0].value, NumericValue::Text("1.5".to_string()));
        assert_eq!(holdings[0].metadata.get("decimals"), Some(&json!(18)));
        assert!(!holdings[0].metadata.contains_key("value"));
    }

    #[test]
    fn test_decode_holdings_absent() {
        assert!(decode_holdings(&Value::Null).is_empty());
        assert!(decode_holdings(&json!({"not": "a list"})).is_empty());
    }

    #[test]
    fn test_decode_detector_results_records_issues() {
        let raw = json!({
            "isoforest": [{"from": "0x1"}, {"anomaly_score": 0.9}, 7, {"from": 42}],
            "lof": "not-an-array"
        });

        let results = decode_detector_results(&raw).unwrap();
        assert_eq!(results.detectors.len(), 1);
        assert_eq!(results.detectors[0].addresses, vec!["0x1", "42"]);
        assert_eq!(results.detectors[0].total_entries, 4);

        let kinds: Vec<IssueKind> = results.issues.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![IssueKind::MissingAddress, IssueKind::NotAnObject, IssueKind::NotAList]
        );
    }

    #[test]
    fn test_decode_detector_results_rejects_non_object_root() {
        assert!(matches!(
            decode_detector_results(&json!([1, 2])),
            Err(DecodeError::InvalidFormat(_))
        ));
        assert!(decode_detector_results(&Value::Null).unwrap().detectors.is_empty());
    }

    #[test]
    fn test_decode_feature_distributions() {
        let raw = json!({
            "value": {"anomaly": [1.0, "x", 2], "normal": [3]},
            "gas": {"anomaly": [1]},
            "nonce": "broken",
            "age": {"anomaly": "oops", "normal": []}
        });

        let dists = decode_feature_distributions(&raw);
        assert_eq!(dists.len(), 4);
        assert_eq!(dists[0].feature, "value");
        assert_eq!(dists[0].samples.as_ref().unwrap().anomaly, vec![1.0, 2.0]);
        assert!(dists[1].samples.is_none());
        assert!(dists[2].samples.is_none());
        assert_eq!(dists[3].samples, Some(FeatureSamples::default()));
    }

    #[test]
    fn test_decode_gas_analysis_nested() {
        let raw = json!({"gas_analysis": {"total_gas_used": 21000, "avg_gas_price": "3e+9"}});
        let gas = decode_gas_analysis(&raw).unwrap();
        assert_eq!(gas.total_gas_used, NumericValue::Number(21000.0));
        assert_eq!(gas.avg_gas_price, NumericValue::Text("3e+9".to_string()));
        assert!(gas.total_gas_cost.is_missing());
    }

    #[test]
    fn test_decode_anomaly_rows() {
        let raw = json!({"anomalies": [
            {"from": "0x1", "anomaly_score": -0.12, "is_anomaly": true, "nonce": 4, "tag": null},
            {"anomaly_score": "high"},
            "garbage"
        ]});

        let rows = decode_anomaly_rows(&raw);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].address.as_deref(), Some("0x1"));
        assert_eq!(rows[0].score, Some(-0.12));

        let fields = rows[0].fields.as_ref().unwrap();
        let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["nonce", "tag"]);

        assert_eq!(rows[1].address, None);
        assert_eq!(rows[1].score, None);
        assert!(rows[1].fields.as_ref().unwrap().is_empty());
        assert_eq!(rows[2], AnomalyRecord::default());
    }

    #[test]
    fn test_decode_anomaly_rows_bare_list_and_absent() {
        assert_eq!(decode_anomaly_rows(&json!([{"from": "0x9"}])).len(), 1);
        assert!(decode_anomaly_rows(&Value::Null).is_empty());
        assert!(decode_anomaly_rows(&json!({"anomalies": "none"})).is_empty());
    }

    #[test]
    fn test_decode_model_metrics_nested() {
        let raw = json!({"status": "success", "comparison_data": {"metrics": {
            "silhouette_score": {"isoforest": 0.41, "lof": 0.38},
            "training_time": "n/a"
        }}});

        let metrics = decode_model_metrics(&raw).unwrap();
        assert_eq!(metrics.series.len(), 2);
        assert_eq!(metrics.series[0].metric, "silhouette_score");
        assert_eq!(metrics.series[0].by_model.as_ref().unwrap().len(), 2);
        assert!(metrics.series[1].by_model.is_none());

        assert!(decode_model_metrics(&Value::Null).is_none());
        assert!(decode_model_metrics(&json!([1])).is_none());
    }

    #[test]
    fn test_decode_feature_importance() {
        let raw = json!({
            "isoforest": [{"feature": "value", "importance": 0.3}, {"importance": 0.1}],
            "ocsvm": null
        });
        let decoded = decode_feature_importance(&raw);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].features.len(), 1);
    }
}
