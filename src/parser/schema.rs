//! Entity and view schema definitions.
//!
//! The first half holds the validated entities produced by the decode
//! step; the second half is the JSON view written to disk. The view
//! schema is versioned to allow future evolution.

use crate::format::NumericValue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One token holding row from the token analysis endpoint
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenHolding {
    pub contract_address: Option<String>,
    pub token_symbol: Option<String>,
    pub value: NumericValue,

    /// Every other field of the row, passed through untouched
    pub metadata: Map<String, Value>,
}

impl TokenHolding {
    /// Contract address if present and non-empty, else the symbol
    pub fn identity_key(&self) -> Option<&str> {
        self.contract_address
            .as_deref()
            .filter(|addr| !addr.is_empty())
            .or(self.token_symbol.as_deref())
    }
}

/// Holdings merged by identity key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedHolding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_symbol: Option<String>,

    /// Sum of every parseable value; `None` when none parsed
    pub value: Option<f64>,

    /// Number of input rows merged into this record
    pub holdings: usize,

    /// Rows whose value could not be read as a number
    pub rejected_values: usize,

    /// Metadata of the first row seen for this key
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

/// One histogram interval with counts from two samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,

    /// `"<lower>-<upper>"` with two decimals (or just the value for a
    /// single-value histogram)
    pub label: String,

    /// Flagged sample count
    pub count_a: usize,

    /// Unflagged sample count
    pub count_b: usize,

    /// Whether `upper` itself belongs to this bin (true for the last bin)
    pub upper_inclusive: bool,
}

/// Flagged addresses reported by one detector
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetectorList {
    pub name: String,

    /// Usable addresses in report order
    pub addresses: Vec<String>,

    /// Rows in the raw list, usable or not
    pub total_entries: usize,
}

/// Why a row or detector was left out of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Detector value is not a list
    NotAList,
    /// Row is not an object
    NotAnObject,
    /// Row lacks a usable address key
    MissingAddress,
}

/// A row-level marker for data that could not be analysed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanIssue {
    pub detector: String,

    /// Row index within the detector's list (absent for detector-level issues)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,

    pub kind: IssueKind,
}

/// Decoded all-algorithms anomaly map
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetectorResults {
    /// Detectors in payload key order
    pub detectors: Vec<DetectorList>,
    pub issues: Vec<ScanIssue>,
}

/// An address flagged by several detectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusEntry {
    pub address: String,

    /// Detectors in first-flagged order, no repeats
    pub detectors: Vec<String>,

    pub count: usize,
}

/// Consensus rows plus markers for anything skipped while scanning
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConsensusReport {
    pub entries: Vec<ConsensusEntry>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ScanIssue>,
}

/// What the consensus table shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConsensusView {
    /// Root payload was not a detector map
    InvalidFormat { reason: String },
    Report(ConsensusReport),
}

impl Default for ConsensusView {
    fn default() -> Self {
        ConsensusView::Report(ConsensusReport::default())
    }
}

/// Anomalies reported per detector (bar chart data)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorCount {
    pub detector: String,
    pub count: usize,
}

/// The two observed samples of one feature
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureSamples {
    pub anomaly: Vec<f64>,
    pub normal: Vec<f64>,
}

/// One feature's entry in the feature-distribution map
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureDistribution {
    pub feature: String,

    /// `None` when the entry had no usable `anomaly`/`normal` fields
    pub samples: Option<FeatureSamples>,
}

/// How a feature's distribution chart renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelState {
    Histogram { bins: Vec<Bin> },
    NoData,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturePanel {
    pub feature: String,
    #[serde(flatten)]
    pub state: PanelState,
}

/// One detector's importance score for a feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// Per-detector importance list, in payload order
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorImportance {
    pub detector: String,
    pub features: Vec<FeatureImportance>,
}

/// A feature compared across detectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportanceRow {
    pub feature: String,

    /// `(detector, importance)` in detector order; 0 when omitted
    pub by_detector: Vec<(String, f64)>,

    pub mean: f64,
}

/// One row of a single detector's anomaly list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnomalyRecord {
    /// Flagged address, if the row carried a usable one
    pub address: Option<String>,

    pub score: Option<f64>,

    /// Remaining feature fields in payload order; `None` when the row
    /// was not an object
    pub fields: Option<Map<String, Value>>,
}

/// One metric reported for every compared model
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    pub metric: String,

    /// Model name to raw value; `None` when the entry was not an object
    pub by_model: Option<Map<String, Value>>,
}

/// Model comparison metrics (`{metric: {model: value}}`), in payload order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelMetrics {
    pub series: Vec<MetricSeries>,
}

/// Gas usage block of the token analysis response
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GasAnalysis {
    pub total_gas_used: NumericValue,

    /// In wei
    pub avg_gas_price: NumericValue,

    /// In ETH
    pub total_gas_cost: NumericValue,
}

// ---------------------------------------------------------------------
// View schema
// ---------------------------------------------------------------------

/// Top-level view structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Schema version for compatibility checking
    pub version: String,

    /// Aggregated token holdings with display strings
    pub tokens: Vec<TokenRow>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<GasSummary>,

    pub detector_counts: Vec<DetectorCount>,

    pub consensus: ConsensusView,

    pub feature_panels: Vec<FeaturePanel>,

    pub feature_importance: Vec<ImportanceRow>,

    /// Rows of the selected detector's anomaly list
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anomaly_rows: Vec<AnomalyRow>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_metrics: Option<MetricsTable>,

    /// Timestamp when the view was assembled
    pub generated_at: String,
}

/// A token ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRow {
    pub holding: AggregatedHolding,
    pub display_value: String,
}

/// An anomaly-list row ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRow {
    pub address: String,

    /// Score with two decimals, or the not-available label
    pub score: String,

    /// `(field, display value)` pairs in payload order
    pub details: Vec<(String, String)>,

    /// False when the row could not be read as an object
    pub details_available: bool,
}

/// Whether a larger metric value means a better model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricPreference {
    HigherIsBetter,
    LowerIsBetter,
    Informational,
}

/// One metric across all compared models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    pub metric: String,
    pub label: String,
    pub preference: MetricPreference,

    /// Display values, one per entry of `MetricsTable::models`
    pub values: Vec<String>,
}

/// Model comparison table: one column per model, one row per metric
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricsTable {
    pub models: Vec<String>,
    pub rows: Vec<MetricRow>,
}

/// Formatted gas figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasSummary {
    pub total_gas_used: String,
    pub avg_gas_price: String,
    pub total_gas_cost: String,
}
