//! Model comparison table built from per-model evaluation metrics.
//!
//! Columns are the models scored under `silhouette_score` (every
//! comparison run reports it); when that metric is absent, the models
//! seen across all metrics are used in first-seen order.

use crate::format::to_fixed;
use crate::parser::schema::{MetricPreference, MetricRow, MetricsTable, ModelMetrics};
use crate::utils::config::METRIC_FRACTION_DIGITS;
use indexmap::IndexSet;
use log::debug;
use serde_json::Value;

const COLUMN_METRIC: &str = "silhouette_score";

/// Build the comparison table
///
/// **Public** - used by the view assembler
///
/// Numbers show four decimals, strings pass through, and a model a
/// metric does not report shows `missing_label`.
pub fn metrics_table(metrics: &ModelMetrics, missing_label: &str) -> MetricsTable {
    let models = table_models(metrics);

    let rows = metrics
        .series
        .iter()
        .map(|series| MetricRow {
            metric: series.metric.clone(),
            label: metric_label(&series.metric).to_string(),
            preference: metric_preference(&series.metric),
            values: models
                .iter()
                .map(|model| {
                    let value = series.by_model.as_ref().and_then(|m| m.get(model));
                    metric_value(value, missing_label)
                })
                .collect(),
        })
        .collect();

    debug!("Metrics table: {} models", models.len());

    MetricsTable { models, rows }
}

fn table_models(metrics: &ModelMetrics) -> Vec<String> {
    let column_series = metrics
        .series
        .iter()
        .find(|s| s.metric == COLUMN_METRIC)
        .and_then(|s| s.by_model.as_ref());

    if let Some(by_model) = column_series {
        return by_model.keys().cloned().collect();
    }

    let seen: IndexSet<&String> = metrics
        .series
        .iter()
        .filter_map(|s| s.by_model.as_ref())
        .flat_map(|m| m.keys())
        .collect();
    seen.into_iter().cloned().collect()
}

fn metric_value(value: Option<&Value>, missing_label: &str) -> String {
    match value {
        Some(Value::Number(n)) => n.as_f64().map_or_else(
            || missing_label.to_string(),
            |n| to_fixed(n, METRIC_FRACTION_DIGITS),
        ),
        Some(Value::String(s)) => s.clone(),
        _ => missing_label.to_string(),
    }
}

/// Dashboard label for a metric key; unknown keys show as-is
pub fn metric_label(metric: &str) -> &str {
    match metric {
        "silhouette_score" => "Silhouette Skoru",
        "calinski_harabasz_score" => "Calinski-Harabasz Skoru",
        "anomaly_ratio" => "Anomali Oranı",
        "training_time" => "Eğitim Süresi (sn)",
        "accuracy" => "Doğruluk",
        "f1_score" => "F1 Skoru",
        other => other,
    }
}

pub fn metric_preference(metric: &str) -> MetricPreference {
    match metric {
        "silhouette_score" | "calinski_harabasz_score" | "accuracy" | "f1_score" => {
            MetricPreference::HigherIsBetter
        }
        "training_time" => MetricPreference::LowerIsBetter,
        _ => MetricPreference::Informational,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::decode_model_metrics;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_table_columns_follow_silhouette() {
        let raw = json!({
            "accuracy": {"lof": 0.91, "isoforest": 0.875, "dbscan": 0.5},
            "silhouette_score": {"isoforest": 0.41234, "lof": 0.38},
            "f1_score": {"isoforest": "n/a"}
        });

        let table = metrics_table(&decode_model_metrics(&raw).unwrap(), "-");
        assert_eq!(table.models, vec!["isoforest", "lof"]);

        assert_eq!(table.rows[0].metric, "accuracy");
        assert_eq!(table.rows[0].label, "Doğruluk");
        assert_eq!(table.rows[0].values, vec!["0.8750", "0.9100"]);
        assert_eq!(table.rows[1].values, vec!["0.4123", "0.3800"]);
        assert_eq!(table.rows[2].values, vec!["n/a", "-"]);
    }

    #[test]
    fn test_table_without_silhouette() {
        let raw = json!({
            "training_time": {"lof": 1.2},
            "anomaly_ratio": {"ocsvm": 0.1, "lof": 0.05},
            "custom": null
        });

        let table = metrics_table(&decode_model_metrics(&raw).unwrap(), "-");
        assert_eq!(table.models, vec!["lof", "ocsvm"]);
        assert_eq!(table.rows[0].preference, MetricPreference::LowerIsBetter);
        assert_eq!(table.rows[0].values, vec!["1.2000", "-"]);
        assert_eq!(table.rows[2].label, "custom");
        assert_eq!(table.rows[2].values, vec!["-", "-"]);
    }

    #[test]
    fn test_four_decimal_ties_round_up() {
        let raw = json!({"silhouette_score": {"m": 0.03125}});
        let table = metrics_table(&decode_model_metrics(&raw).unwrap(), "-");
        assert_eq!(table.rows[0].values, vec!["0.0313"]);
    }
}
