//! Side-by-side feature importance across detectors.

use crate::parser::schema::{DetectorImportance, ImportanceRow};
use log::debug;

/// Merge per-detector importance lists into one row per feature
///
/// The feature list comes from the first detector. Every other detector
/// contributes its importance for that feature, or 0 if it does not
/// report it. Rows are sorted by mean importance, highest first; ties
/// keep the first detector's order.
pub fn merge_feature_importance(detectors: &[DetectorImportance]) -> Vec<ImportanceRow> {
    let Some(first) = detectors.first() else {
        return Vec::new();
    };

    let mut rows: Vec<ImportanceRow> = first
        .features
        .iter()
        .map(|feature| {
            let by_detector: Vec<(String, f64)> = detectors
                .iter()
                .map(|detector| {
                    let importance = detector
                        .features
                        .iter()
                        .find(|f| f.feature == feature.feature)
                        .map_or(0.0, |f| f.importance);
                    (detector.detector.clone(), importance)
                })
                .collect();

            let mean = by_detector.iter().map(|(_, v)| v).sum::<f64>() / detectors.len() as f64;

            ImportanceRow {
                feature: feature.feature.clone(),
                by_detector,
                mean,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.mean.total_cmp(&a.mean));

    debug!(
        "Merged importance for {} features across {} detectors",
        rows.len(),
        detectors.len()
    );

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::FeatureImportance;

    fn detector(name: &str, features: &[(&str, f64)]) -> DetectorImportance {
        DetectorImportance {
            detector: name.to_string(),
            features: features
                .iter()
                .map(|(feature, importance)| FeatureImportance {
                    feature: feature.to_string(),
                    importance: *importance,
                })
                .collect(),
        }
    }

    #[test]
    fn test_merge_sorts_by_mean() {
        let detectors = vec![
            detector("isoforest", &[("value", 0.1), ("gas", 0.3)]),
            detector("lof", &[("value", 0.3), ("gas", 0.1), ("nonce", 0.9)]),
        ];

        let rows = merge_feature_importance(&detectors);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].by_detector[0].0, "isoforest");
        assert!((rows[0].mean - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_missing_feature_counts_as_zero() {
        let detectors = vec![
            detector("isoforest", &[("value", 0.4)]),
            detector("ocsvm", &[]),
        ];

        let rows = merge_feature_importance(&detectors);
        assert_eq!(rows[0].by_detector[1], ("ocsvm".to_string(), 0.0));
        assert!((rows[0].mean - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_ranking() {
        let detectors = vec![detector("a", &[("low", 0.1), ("high", 0.5), ("mid", 0.3)])];
        let rows = merge_feature_importance(&detectors);
        let order: Vec<&str> = rows.iter().map(|r| r.feature.as_str()).collect();
        assert_eq!(order, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_no_detectors() {
        assert!(merge_feature_importance(&[]).is_empty());
    }
}
