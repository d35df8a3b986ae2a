//! Reduction of decoded payloads into renderable structures.
//!
//! This module turns validated entities into:
//! - Aggregated token holdings (one record per token)
//! - Paired histograms for feature distributions
//! - Cross-detector consensus anomalies and per-detector counts
//! - Feature importance compared across detectors
//! - Display rows for one detector's anomaly list
//! - The model comparison metrics table

pub mod anomalies;
pub mod consensus;
pub mod histogram;
pub mod importance;
pub mod metrics;
pub mod tokens;

// Re-export main functions
pub use anomalies::anomaly_rows;
pub use consensus::{consensus_view, detector_counts, find_consensus};
pub use histogram::{build_comparison, feature_panels};
pub use importance::merge_feature_importance;
pub use metrics::metrics_table;
pub use tokens::aggregate_holdings;
