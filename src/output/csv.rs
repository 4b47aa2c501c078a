//! CSV output formatting for matched nodes.

use super::rows::MatchRow;
use super::terminal::format_field;

/// Header line printed before the rows.
pub const CSV_HEADER: &str =
    r#" "cnt",          "node",                   "text",       "kind",          "address""#;

/// Render rows as CSV, header included.
pub fn render_csv(rows: &[MatchRow]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(&csv_row(row));
        out.push('\n');
    }
    out
}

/// Format a single CSV row.
fn csv_row(row: &MatchRow) -> String {
    format!(
        r#"{index},{node},{text},{kind},{address}"#,
        index = format_field(row.index, 6),
        node = format_field(&row.node, 14),
        text = format_field(&row.text, 24),
        kind = format_field(row.kind.as_deref().unwrap_or("-"), 11),
        address = format_field(row.address.as_deref().unwrap_or("-"), 18),
    )
}
