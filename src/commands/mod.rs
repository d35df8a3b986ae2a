//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod report;
pub mod utils;

// Re-export main command functions
pub use report::{assemble_view, execute_report, validate_args, PagePayloads, ReportArgs};
pub use utils::{display_schema, display_version, format_values, validate_view_file};
