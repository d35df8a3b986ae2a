//! Report command implementation.
//!
//! The report command:
//! 1. Loads the payload files that were given
//! 2. Aggregates tokens and summarizes gas usage
//! 3. Counts anomalies and finds cross-detector consensus
//! 4. Bins feature distributions and merges feature importance
//! 5. Formats the anomaly list and the model metrics table
//! 6. Writes the assembled view (and optionally prints a summary)

use crate::aggregator::{
    aggregate_holdings, anomaly_rows, consensus_view, detector_counts, feature_panels,
    merge_feature_importance, metrics_table,
};
use crate::format::NumericFormatter;
use crate::output::{generate_text_summary, write_view};
use crate::parser::{
    decode_anomaly_rows, decode_detector_results, decode_feature_distributions,
    decode_feature_importance, decode_gas_analysis, decode_holdings, decode_model_metrics,
    DashboardView, GasAnalysis, GasSummary, TokenRow,
};
use crate::utils::config::{DisplayConfig, SCHEMA_VERSION, WEI_PER_GWEI};
use crate::utils::load_config;
use anyhow::{Context, Result};
use log::{debug, info};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Raw payloads fetched for one dashboard page
///
/// Each field holds a decoded response body, or `Value::Null` when the
/// page did not fetch it.
#[derive(Debug, Clone, Default)]
pub struct PagePayloads {
    /// Token holdings list (`[{contract_address, token_symbol, value, ...}]`)
    pub tokens: Value,

    /// Token-analysis response or its `gas_analysis` block
    pub gas: Value,

    /// All-algorithms anomaly map (`{detector: [{from, ...}]}`)
    pub anomalies: Value,

    /// Feature-distribution map (`{feature: {anomaly, normal}}`)
    pub features: Value,

    /// Feature importance map (`{detector: [{feature, importance}]}`)
    pub importance: Value,

    /// One detector's anomaly list (`[{from, anomaly_score, ...}]`)
    pub anomaly_list: Value,

    /// Model comparison metrics (`{metric: {model: value}}`)
    pub metrics: Value,
}

/// Assemble the view for one page
///
/// **Public** - composition root of the presentation layer
///
/// Pure apart from the timestamp: reads only its arguments and returns a
/// fresh view. Missing payloads produce empty sections.
pub fn assemble_view(payloads: &PagePayloads, config: &DisplayConfig) -> DashboardView {
    let formatter = NumericFormatter::new(config);

    let holdings = decode_holdings(&payloads.tokens);
    let tokens: Vec<TokenRow> = aggregate_holdings(&holdings)
        .into_iter()
        .map(|holding| TokenRow {
            display_value: formatter.format_opt(holding.value),
            holding,
        })
        .collect();

    let gas = decode_gas_analysis(&payloads.gas).map(|gas| summarize_gas(&gas, &formatter));

    // The count chart only needs the detectors that are lists; a root
    // that is not a map leaves it empty and shows up in the consensus view.
    let counts = decode_detector_results(&payloads.anomalies)
        .map(|results| detector_counts(&results))
        .unwrap_or_default();
    let consensus = consensus_view(&payloads.anomalies);

    let distributions = decode_feature_distributions(&payloads.features);
    let panels = feature_panels(&distributions, config.bin_count);

    let importance = merge_feature_importance(&decode_feature_importance(&payloads.importance));

    let anomaly_list = anomaly_rows(&decode_anomaly_rows(&payloads.anomaly_list));
    let model_metrics = decode_model_metrics(&payloads.metrics)
        .map(|metrics| metrics_table(&metrics, &config.missing_label));

    debug!(
        "Assembled view: {} tokens, {} detectors, {} feature panels",
        tokens.len(),
        counts.len(),
        panels.len()
    );

    DashboardView {
        version: SCHEMA_VERSION.to_string(),
        tokens,
        gas,
        detector_counts: counts,
        consensus,
        feature_panels: panels,
        feature_importance: importance,
        anomaly_rows: anomaly_list,
        model_metrics,
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Format the gas block: total gas, average price in Gwei, cost in ETH
pub fn summarize_gas(gas: &GasAnalysis, formatter: &NumericFormatter) -> GasSummary {
    let avg_gwei = gas.avg_gas_price.to_f64().map(|wei| wei / WEI_PER_GWEI);

    GasSummary {
        total_gas_used: formatter.format(&gas.total_gas_used),
        avg_gas_price: formatter.format_with_unit(avg_gwei, "Gwei"),
        total_gas_cost: format!("{} ETH", formatter.format(&gas.total_gas_cost)),
    }
}

/// Arguments for the report command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReportArgs {
    pub tokens: Option<PathBuf>,
    pub gas: Option<PathBuf>,
    pub anomalies: Option<PathBuf>,
    pub features: Option<PathBuf>,
    pub importance: Option<PathBuf>,
    pub anomaly_list: Option<PathBuf>,
    pub metrics: Option<PathBuf>,

    /// Display configuration TOML (defaults if omitted)
    pub config: Option<PathBuf>,

    /// Output path for the JSON view
    pub output_json: PathBuf,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            tokens: None,
            gas: None,
            anomalies: None,
            features: None,
            importance: None,
            anomaly_list: None,
            metrics: None,
            config: None,
            output_json: PathBuf::from("view.json"),
            print_summary: false,
        }
    }
}

/// Execute the report command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Unreadable or invalid config file
/// * Unreadable or non-JSON payload files
/// * File write errors
pub fn execute_report(args: ReportArgs) -> Result<DashboardView> {
    let start_time = Instant::now();

    let config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DisplayConfig::default(),
    };

    info!("Step 1/3: Loading payloads...");
    let payloads = PagePayloads {
        tokens: load_optional(args.tokens.as_deref())?,
        gas: load_optional(args.gas.as_deref())?,
        anomalies: load_optional(args.anomalies.as_deref())?,
        features: load_optional(args.features.as_deref())?,
        importance: load_optional(args.importance.as_deref())?,
        anomaly_list: load_optional(args.anomaly_list.as_deref())?,
        metrics: load_optional(args.metrics.as_deref())?,
    };

    info!("Step 2/3: Assembling view...");
    let view = assemble_view(&payloads, &config);

    info!("Step 3/3: Writing output...");
    write_view(&view, &args.output_json).context("Failed to write view JSON")?;
    info!("✓ View written to: {}", args.output_json.display());

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("RISK VIEW SUMMARY");
        println!("{}", "=".repeat(80));
        println!("{}", generate_text_summary(&view, config.token_page_size, config.locale));
        println!("{}", "=".repeat(80));
    }

    info!("Report completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(view)
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
pub fn validate_args(args: &ReportArgs) -> Result<()> {
    let inputs = [
        &args.tokens,
        &args.gas,
        &args.anomalies,
        &args.features,
        &args.importance,
        &args.anomaly_list,
        &args.metrics,
    ];

    if inputs.iter().all(|p| p.is_none()) {
        anyhow::bail!("At least one payload file must be given");
    }

    for path in inputs.into_iter().flatten() {
        if !path.is_file() {
            anyhow::bail!("Payload file not found: {}", path.display());
        }
    }

    if args.output_json.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    Ok(())
}

/// Read a JSON payload file
pub fn load_payload(path: &Path) -> Result<Value> {
    debug!("Loading payload: {}", path.display());

    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    Ok(value)
}

fn load_optional(path: Option<&Path>) -> Result<Value> {
    path.map_or(Ok(Value::Null), load_payload)
}
