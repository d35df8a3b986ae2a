use crate::format::{Locale, NumericFormatter, NumericValue};
use crate::output::read_view;
use crate::parser::ConsensusView;
use crate::utils::config::{DisplayConfig, SCHEMA_VERSION};
use anyhow::Result;
use std::path::PathBuf;

/// Validate a view JSON file
pub fn validate_view_file(file_path: PathBuf) -> Result<()> {
    println!("Validating view: {}", file_path.display());

    let view = read_view(&file_path)?;

    println!("✓ Valid view JSON");
    println!("  Version: {}", view.version);
    println!("  Tokens: {}", view.tokens.len());
    println!("  Detectors: {}", view.detector_counts.len());
    match &view.consensus {
        ConsensusView::Report(report) => {
            println!("  Consensus Anomalies: {}", report.entries.len());
            println!("  Scan Issues: {}", report.issues.len());
        }
        ConsensusView::InvalidFormat { reason } => {
            println!("  Consensus: invalid input ({})", reason);
        }
    }
    println!("  Feature Panels: {}", view.feature_panels.len());
    println!("  Anomaly List Rows: {}", view.anomaly_rows.len());
    if let Some(table) = &view.model_metrics {
        println!("  Compared Models: {}", table.models.len());
    }
    println!("  Generated: {}", view.generated_at);

    Ok(())
}

/// Format raw command-line values the way the dashboard shows them
///
/// Every argument is treated as the string the API would deliver, so
/// scientific notation gets the same oversize check; `null` stands for
/// an absent value.
pub fn format_values(values: &[String], locale: Option<Locale>) -> Vec<(String, String)> {
    let config = DisplayConfig {
        locale: locale.unwrap_or_default(),
        ..Default::default()
    };
    let formatter = NumericFormatter::new(&config);

    values
        .iter()
        .map(|raw| {
            let value = match raw.as_str() {
                "null" | "undefined" => NumericValue::Missing,
                text => NumericValue::from(text),
            };
            (raw.clone(), formatter.format(&value))
        })
        .collect()
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Risk Lens View Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string             - Schema version (e.g., '1.0.0')");
        println!("  tokens: array               - Aggregated token holdings");
        println!("    holding: object           - Merged record and counts");
        println!("    display_value: string     - Abbreviated display value");
        println!("  gas: object?                - Formatted gas usage");
        println!("  detector_counts: array      - Flagged rows per detector");
        println!("  consensus: object           - status: report | invalid_format");
        println!("    entries: array            - Addresses flagged by 2+ detectors");
        println!("    issues: array?            - Skipped detectors and rows");
        println!("  feature_panels: array       - state: histogram | no_data | invalid");
        println!("  feature_importance: array   - Importance per detector and mean");
        println!("  anomaly_rows: array?        - One detector's flagged rows");
        println!("  model_metrics: object?      - Metrics table (models x metrics)");
        println!("  generated_at: string        - RFC 3339 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Risk Lens v{}", env!("CARGO_PKG_VERSION"));
    println!("View Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Aggregation and display normalization for blockchain address risk analytics.");
}
