//! Payload decoding and schema definitions.
//!
//! This module handles:
//! - Decoding raw JSON from the analysis service
//! - Recording rows and detectors that had to be skipped
//! - Defining the view schema

pub mod payload;
pub mod schema;

// Re-export main types
pub use payload::{
    decode_anomaly_rows, decode_detector_results, decode_feature_distributions,
    decode_feature_importance, decode_gas_analysis, decode_holdings, decode_model_metrics,
    decode_sample,
};
pub use schema::{
    AggregatedHolding, AnomalyRecord, AnomalyRow, Bin, ConsensusEntry, ConsensusReport,
    ConsensusView, DashboardView, DetectorCount, DetectorImportance, DetectorList,
    DetectorResults, FeatureDistribution, FeatureImportance, FeaturePanel, FeatureSamples,
    GasAnalysis, GasSummary, ImportanceRow, IssueKind, MetricPreference, MetricRow,
    MetricSeries, MetricsTable, ModelMetrics, PanelState, ScanIssue, TokenHolding, TokenRow,
};
