//! JSON output for matched nodes.

use super::rows::MatchRow;
use std::error::Error;

pub fn render_json(rows: &[MatchRow]) -> Result<String, Box<dyn Error>> {
    serde_json::to_string_pretty(rows).map_err(|e| format!("Error serializing JSON: {e}").into())
}
