//! Risk Lens CLI
//!
//! Turns analysis-service payloads into a dashboard view.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use risk_lens::commands::{
    display_schema, display_version, execute_report, format_values, validate_args,
    validate_view_file, ReportArgs,
};
use risk_lens::format::Locale;

/// Risk Lens - presentation layer for address risk analytics
#[derive(Parser, Debug)]
#[command(name = "risk-lens")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble a dashboard view from payload files
    Report {
        /// Token holdings list (JSON)
        #[arg(long)]
        tokens: Option<PathBuf>,

        /// Token analysis response or gas_analysis block (JSON)
        #[arg(long)]
        gas: Option<PathBuf>,

        /// All-algorithms anomaly map (JSON)
        #[arg(long)]
        anomalies: Option<PathBuf>,

        /// Feature distribution map (JSON)
        #[arg(long)]
        features: Option<PathBuf>,

        /// Feature importance map (JSON)
        #[arg(long)]
        importance: Option<PathBuf>,

        /// One detector's anomaly list (JSON)
        #[arg(long)]
        anomaly_list: Option<PathBuf>,

        /// Model comparison metrics (JSON)
        #[arg(long)]
        metrics: Option<PathBuf>,

        /// Display configuration (TOML)
        #[arg(short, long, env = "RISK_LENS_CONFIG")]
        config: Option<PathBuf>,

        /// Output path for the JSON view
        #[arg(short, long, default_value = "view.json")]
        output: PathBuf,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Format raw values as the dashboard displays them
    Format {
        /// Values to format (numbers, numeric strings, or "null")
        #[arg(required = true)]
        values: Vec<String>,

        /// Number locale (tr-TR or en-US)
        #[arg(long)]
        locale: Option<Locale>,
    },

    /// Validate a view JSON file
    Validate {
        /// Path to view JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Report {
            tokens,
            gas,
            anomalies,
            features,
            importance,
            anomaly_list,
            metrics,
            config,
            output,
            summary,
        } => {
            let args = ReportArgs {
                tokens,
                gas,
                anomalies,
                features,
                importance,
                anomaly_list,
                metrics,
                config,
                output_json: output,
                print_summary: summary,
            };

            validate_args(&args)?;
            execute_report(args)?;
        }

        Commands::Format { values, locale } => {
            for (raw, formatted) in format_values(&values, locale) {
                println!("{:<24} {}", raw, formatted);
            }
        }

        Commands::Validate { file } => {
            validate_view_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
