//! Terminal output utilities.
//!
//! Provides formatting helpers for terminal output.

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = escape_csv_field(&value.to_string());
    let quoted = if value_str.starts_with('"') {
        value_str
    } else {
        format!("\"{value_str}\"")
    };

    if quoted.len() >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Quote a CSV field when it holds a comma or double quote, doubling inner quotes.
pub fn escape_csv_field(input: &str) -> String {
    if input.contains(',') || input.contains('"') {
        let escaped = input.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        input.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "    \"test\"");
    }

    #[test]
    fn test_format_field_exact() {
        assert_eq!(format_field("test", 6), "\"test\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("2001:db8::1/64", 5), "\"2001:db8::1/64\"");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(42, 6), "  \"42\"");
    }

    #[test]
    fn test_escape_csv_field() {
        assert_eq!(escape_csv_field("10.0.0.1"), "10.0.0.1");
        assert_eq!(escape_csv_field("a,b"), "\"a,b\"");
        assert_eq!(escape_csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(format_field("a,b", 0), "\"a,b\"");
    }
}
