//! Output writers for assembled views.
//!
//! This module handles:
//! - JSON views written to and read from disk
//! - Text summaries for the terminal

pub mod json;
pub mod text;

// Re-export main functions
pub use json::{read_view, write_view};
pub use text::generate_text_summary;
