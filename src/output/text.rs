//! Plain-text summary of an assembled view for terminal output.

use crate::format::Locale;
use crate::parser::schema::{
    ConsensusView, DashboardView, IssueKind, MetricPreference, PanelState,
};

/// Render a view as a terminal summary
///
/// Lists the first `page_size` tokens, the per-detector counts, the
/// consensus table, one line per feature panel, the anomaly list and
/// the model comparison table.
pub fn generate_text_summary(view: &DashboardView, page_size: usize, locale: Locale) -> String {
    let mut lines = Vec::new();

    lines.push("  TOKEN HOLDINGS".to_string());
    match view.tokens.first() {
        Some(top) => lines.push(format!(
            "  Top holding: {} ({})",
            top.holding.token_symbol.as_deref().unwrap_or("?"),
            top.display_value
        )),
        None => lines.push("  No token holdings".to_string()),
    }
    for row in view.tokens.iter().take(page_size) {
        lines.push(format!(
            "    {:<12} {:>14}   {}",
            row.holding.token_symbol.as_deref().unwrap_or("?"),
            row.display_value,
            row.holding.contract_address.as_deref().unwrap_or("")
        ));
    }
    if view.tokens.len() > page_size {
        lines.push(format!(
            "    (Showing {} of {} tokens)",
            page_size,
            locale.format_count(view.tokens.len())
        ));
    }

    if let Some(gas) = &view.gas {
        lines.push(String::new());
        lines.push("  GAS USAGE".to_string());
        lines.push(format!("    Total used:    {}", gas.total_gas_used));
        lines.push(format!("    Average price: {}", gas.avg_gas_price));
        lines.push(format!("    Total cost:    {}", gas.total_gas_cost));
    }

    if !view.detector_counts.is_empty() {
        lines.push(String::new());
        lines.push("  ANOMALIES PER DETECTOR".to_string());
        for count in &view.detector_counts {
            lines.push(format!(
                "    {:<20} {:>8}",
                count.detector,
                locale.format_count(count.count)
            ));
        }
    }

    lines.push(String::new());
    lines.push("  CONSENSUS ANOMALIES".to_string());
    match &view.consensus {
        ConsensusView::InvalidFormat { reason } => {
            lines.push(format!("    Invalid data format: {}", reason));
        }
        ConsensusView::Report(report) => {
            if report.entries.is_empty() {
                lines.push("    No address flagged by more than one detector".to_string());
            }
            for entry in &report.entries {
                lines.push(format!(
                    "    {:<44} {:>2}  {}",
                    entry.address,
                    entry.count,
                    entry.detectors.join(", ")
                ));
            }
            for issue in &report.issues {
                let what = match issue.kind {
                    IssueKind::NotAList => "result is not a list",
                    IssueKind::NotAnObject => "row is not an object",
                    IssueKind::MissingAddress => "row has no address",
                };
                match issue.index {
                    Some(index) => lines.push(format!(
                        "    ! analysis error in {} row {}: {}",
                        issue.detector, index, what
                    )),
                    None => lines.push(format!(
                        "    ! analysis error in {}: {}",
                        issue.detector, what
                    )),
                }
            }
        }
    }

    if !view.feature_panels.is_empty() {
        lines.push(String::new());
        lines.push("  FEATURE DISTRIBUTIONS".to_string());
        for panel in &view.feature_panels {
            let status = match &panel.state {
                PanelState::Histogram { bins } => {
                    let anomalies: usize = bins.iter().map(|b| b.count_a).sum();
                    let normal: usize = bins.iter().map(|b| b.count_b).sum();
                    format!("{} bins, {} anomaly / {} normal", bins.len(), anomalies, normal)
                }
                PanelState::NoData => "no data".to_string(),
                PanelState::Invalid => "invalid data".to_string(),
            };
            lines.push(format!("    {:<24} {}", panel.feature, status));
        }
    }

    if !view.feature_importance.is_empty() {
        lines.push(String::new());
        lines.push("  FEATURE IMPORTANCE (mean across detectors)".to_string());
        for row in &view.feature_importance {
            lines.push(format!("    {:<24} {:>5.1}%", row.feature, row.mean * 100.0));
        }
    }

    if !view.anomaly_rows.is_empty() {
        lines.push(String::new());
        lines.push("  ANOMALY LIST".to_string());
        for row in &view.anomaly_rows {
            lines.push(format!("    {:<44} score {}", row.address, row.score));
            if !row.details_available {
                lines.push("      (details unavailable)".to_string());
            }
            for (field, value) in &row.details {
                lines.push(format!("      {:<22} {}", field, value));
            }
        }
    }

    if let Some(table) = &view.model_metrics {
        lines.push(String::new());
        lines.push("  MODEL COMPARISON".to_string());
        let header: Vec<String> = table.models.iter().map(|m| format!("{:>12}", m)).collect();
        lines.push(format!("    {:<28}{}", "", header.join("")));
        for row in &table.rows {
            let hint = match row.preference {
                MetricPreference::HigherIsBetter => "↑",
                MetricPreference::LowerIsBetter => "↓",
                MetricPreference::Informational => " ",
            };
            let values: Vec<String> = row.values.iter().map(|v| format!("{:>12}", v)).collect();
            lines.push(format!("    {} {:<26}{}", hint, row.label, values.join("")));
        }
    }

    lines.join("\n")
}
