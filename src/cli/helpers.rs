//! Shared helper functions for CLI commands
//!
//! Catalogue text is mostly Japanese, so everything here measures terminal
//! display width rather than bytes or chars.

use console::{measure_text_width, pad_str, Alignment};

/// Truncate a string to `max_width` display columns, adding "..." if truncated
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if measure_text_width(s) <= max_width {
        s.to_string()
    } else {
        console::truncate_str(s, max_width, "...").into_owned()
    }
}

/// Left-align `s` in a column of `width` display columns
pub fn pad_left(s: &str, width: usize) -> String {
    pad_str(s, width, Alignment::Left, None).into_owned()
}

/// Right-align `s` in a column of `width` display columns
pub fn pad_right(s: &str, width: usize) -> String {
    pad_str(s, width, Alignment::Right, None).into_owned()
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
