//! JSON parsing helpers

pub mod diagnostics;

pub use diagnostics::JsonSyntaxError;

use serde_json::{Map, Value};

/// Parse a JSON document, mapping syntax errors to a located diagnostic
pub fn parse_value(source: &str, filename: &str) -> Result<Value, JsonSyntaxError> {
    serde_json::from_str(source).map_err(|e| JsonSyntaxError::from_serde_error(&e, source, filename))
}

/// Entries of a keyed catalogue object in row order.
///
/// Keys that are canonical array indices ("0", "17", not "007") come first in
/// ascending numeric order, then every other key in document order. This is
/// the order a browser observes when iterating such an object.
pub fn ordered_entries(object: Map<String, Value>) -> Vec<(String, Value)> {
    let (mut indexed, named): (Vec<_>, Vec<_>) = object
        .into_iter()
        .partition(|(key, _)| array_index(key).is_some());

    indexed.sort_by_key(|(key, _)| array_index(key));
    indexed.extend(named);
    indexed
}

fn array_index(key: &str) -> Option<u32> {
    let n: u32 = key.parse().ok()?;
    (n.to_string() == key && n != u32::MAX).then_some(n)
}
