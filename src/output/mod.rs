//! Output formatting for matched nodes.
//!
//! This module handles formatting and outputting query results:
//! - [`rows`] - one [`MatchRow`] per selected node
//! - [`csv`] - CSV output formatting
//! - [`json`] - JSON output via serde
//! - [`terminal`] - field helpers for terminal output

mod csv;
mod json;
mod rows;
mod terminal;

pub use csv::{render_csv, CSV_HEADER};
pub use json::render_json;
pub use rows::{match_rows, node_name, MatchRow};
pub use terminal::{escape_csv_field, format_field};
