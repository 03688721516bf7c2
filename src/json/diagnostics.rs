//! JSON error diagnostics with source locations

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// JSON syntax error with source location
#[derive(Debug, Error, Diagnostic)]
#[error("JSON syntax error: {message}")]
#[diagnostic(code(armory::json::syntax))]
pub struct JsonSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    /// The underlying error message
    message: String,
}

impl JsonSyntaxError {
    /// Create a syntax error from a serde_json error
    pub fn from_serde_error(err: &serde_json::Error, source: &str, filename: &str) -> Self {
        let (line, column) = match (err.line(), err.column()) {
            (0, _) => (1, 1),
            (line, column) => (line, column.max(1)),
        };

        let offset = line_col_to_offset(source, line, column);
        let message = err.to_string();
        let help = generate_help(&message);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help,
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Convert a 1-based line/column (column counted in bytes) to a byte offset
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum::<usize>();

    let offset = line_start + column.saturating_sub(1);
    let mut offset = offset.min(source.len().saturating_sub(1));
    while offset > 0 && !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Generate helpful suggestions based on error message
fn generate_help(message: &str) -> Option<String> {
    let msg_lower = message.to_lowercase();

    if msg_lower.contains("trailing comma") {
        return Some("Remove the comma after the last entry of the object or array.".to_string());
    }

    if msg_lower.contains("expected `,` or `}`") || msg_lower.contains("expected `,` or `]`") {
        return Some("Separate entries with commas: {\"0\": {...}, \"1\": {...}}".to_string());
    }

    if msg_lower.contains("key must be a string") {
        return Some("Object keys must be quoted: {\"0\": {...}}".to_string());
    }

    if msg_lower.contains("eof while parsing") {
        return Some("The file ends early; check for an unclosed brace or bracket.".to_string());
    }

    if msg_lower.contains("control character") {
        return Some("Escape newlines and tabs inside strings as \\n and \\t.".to_string());
    }

    None
}
