//! Output formatting for planner results and checks.
//!
//! This module handles formatting and outputting results:
//! - [`csv`] - CSV output formatting
//! - [`terminal`] - Terminal output with colors
//! - [`json`] - JSON output

mod csv;
mod json;
mod terminal;

pub use csv::{candidates_csv, candidates_csv_report, CSV_HEADER};
pub use json::to_json;
pub use terminal::{
    candidate_table_header, candidate_table_row, check_summary, format_field,
};
