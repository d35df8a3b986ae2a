//! Cross-detector agreement on flagged addresses.
//!
//! Each anomaly detector runs independently and flags its own list of
//! addresses. An address flagged by two or more detectors is a
//! consensus anomaly, the strongest signal the dashboard shows.

use crate::parser::payload::decode_detector_results;
use crate::parser::schema::{
    ConsensusEntry, ConsensusReport, ConsensusView, DetectorCount, DetectorResults,
};
use crate::utils::error::DecodeError;
use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};
use serde_json::Value;

/// Minimum number of detectors for an address to count as consensus
pub const MIN_AGREEING_DETECTORS: usize = 2;

/// Find addresses flagged by more than one detector
///
/// **Public** - core consensus computation over decoded results
///
/// Detectors are scanned in payload order. Output follows the order in
/// which each address was first flagged; each entry's detectors follow
/// the same scan order. A detector listing an address twice counts once.
pub fn find_consensus(results: &DetectorResults) -> Vec<ConsensusEntry> {
    let mut flagged_by: IndexMap<&str, IndexSet<&str>> = IndexMap::new();

    for detector in &results.detectors {
        for address in &detector.addresses {
            flagged_by
                .entry(address.as_str())
                .or_default()
                .insert(detector.name.as_str());
        }
    }

    debug!("{} distinct flagged addresses", flagged_by.len());

    flagged_by
        .into_iter()
        .filter(|(_, detectors)| detectors.len() >= MIN_AGREEING_DETECTORS)
        .map(|(address, detectors)| ConsensusEntry {
            address: address.to_string(),
            count: detectors.len(),
            detectors: detectors.into_iter().map(str::to_string).collect(),
        })
        .collect()
}

/// Build the consensus table straight from the raw anomaly map
///
/// **Public** - boundary used by the view assembler
///
/// Never fails: a root that is not a detector map becomes
/// `ConsensusView::InvalidFormat`; skipped detectors and rows are
/// carried along as issues next to the rows that could be computed.
pub fn consensus_view(raw: &Value) -> ConsensusView {
    match decode_detector_results(raw) {
        Ok(results) => ConsensusView::Report(ConsensusReport {
            entries: find_consensus(&results),
            issues: results.issues,
        }),
        Err(DecodeError::InvalidFormat(reason)) => {
            warn!("Consensus input rejected: {}", reason);
            ConsensusView::InvalidFormat { reason }
        }
    }
}

/// Number of rows each detector flagged, in detector order
///
/// Counts every row of a detector's list, including rows without a
/// usable address. Detectors whose value was not a list are absent.
pub fn detector_counts(results: &DetectorResults) -> Vec<DetectorCount> {
    results
        .detectors
        .iter()
        .map(|detector| DetectorCount {
            detector: detector.name.clone(),
            count: detector.total_entries,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{IssueKind, ScanIssue};
    use serde_json::json;

    fn report(view: ConsensusView) -> ConsensusReport {
        match view {
            ConsensusView::Report(report) => report,
            other => panic!("expected a report, got {:?}", other),
        }
    }

    #[test]
    fn test_only_multi_detector_addresses_kept() {
        let raw = json!({
            "A": [{"from": "x"}, {"from": "y"}],
            "B": [{"from": "x"}],
            "C": []
        });

        let report = report(consensus_view(&raw));
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].address, "x");
        assert_eq!(report.entries[0].detectors, vec!["A", "B"]);
        assert_eq!(report.entries[0].count, 2);
    }

    #[test]
    fn test_malformed_detector_tolerated() {
        let raw = json!({
            "A": [{"from": "x"}],
            "B": "not-an-array",
            "C": [{"from": "x"}]
        });

        let report = report(consensus_view(&raw));
        assert_eq!(report.entries[0].detectors, vec!["A", "C"]);
        assert_eq!(
            report.issues,
            vec![ScanIssue {
                detector: "B".to_string(),
                index: None,
                kind: IssueKind::NotAList,
            }]
        );
    }

    #[test]
    fn test_invalid_root() {
        assert!(matches!(
            consensus_view(&json!("nope")),
            ConsensusView::InvalidFormat { .. }
        ));
        assert!(matches!(
            consensus_view(&json!([{"from": "x"}])),
            ConsensusView::InvalidFormat { .. }
        ));
    }

    #[test]
    fn test_empty_and_absent_input() {
        assert!(report(consensus_view(&json!({}))).entries.is_empty());
        assert!(report(consensus_view(&Value::Null)).entries.is_empty());
        assert!(find_consensus(&DetectorResults::default()).is_empty());
    }

    #[test]
    fn test_repeat_within_detector_counts_once() {
        let raw = json!({
            "A": [{"from": "x"}, {"from": "x"}],
            "B": [{"from": "y"}]
        });

        assert!(report(consensus_view(&raw)).entries.is_empty());
    }

    #[test]
    fn test_output_follows_first_flagged_order() {
        let raw = json!({
            "A": [{"from": "q"}, {"from": "p"}],
            "B": [{"from": "p"}, {"from": "q"}],
            "C": [{"from": "r"}, {"from": "p"}]
        });

        let report = report(consensus_view(&raw));
        let addresses: Vec<&str> = report.entries.iter().map(|e| e.address.as_str()).collect();
        assert_eq!(addresses, vec!["q", "p"]);
        assert_eq!(report.entries[1].detectors, vec!["A", "B", "C"]);
        assert_eq!(report.entries[1].count, 3);
    }

    #[test]
    fn test_detector_counts() {
        let raw = json!({
            "isoforest": [{"from": "x"}, {"score": 1}],
            "lof": null,
            "ocsvm": []
        });

        let results = decode_detector_results(&raw).unwrap();
        let counts = detector_counts(&results);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].detector, "isoforest");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].count, 0);
    }
}
