//! Risk Lens
//!
//! Aggregation and display normalization for blockchain address risk
//! analytics produced by a remote analysis service.
//!
//! The analysis service does the heavy lifting (anomaly scoring,
//! clustering, feature extraction). This crate takes its raw JSON
//! payloads and turns them into stable, renderable structures:
//! - token holdings merged by contract (or symbol)
//! - magnitude-abbreviated, locale-aware number strings
//! - paired histograms comparing anomalous and normal samples
//! - addresses flagged by more than one anomaly detector
//!
//! ## Getting Started
//!
//! ```bash
//! risk-lens report --tokens tokens.json --anomalies anomalies.json --summary
//! risk-lens format 1500 "1.2e+25"
//! ```

pub mod aggregator;
pub mod commands;
pub mod format;
pub mod output;
pub mod parser;
pub mod utils;
