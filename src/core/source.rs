//! Catalogue source - reads one JSON document per entity kind
//!
//! The data directory holds `<endpoint>.json` files, each a JSON object whose
//! keys are row ids and whose values are flat records. Loading produces the
//! `(key, record)` pairs a [`CatalogueIndex`] is built from.

use miette::Diagnostic;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::index::CatalogueIndex;
use crate::core::record::Record;
use crate::json::{self, JsonSyntaxError};

/// Errors raised while reading a catalogue
#[derive(Debug, Error, Diagnostic)]
pub enum SourceError {
    #[error("{kind} catalogue unavailable: {} not found", .path.display())]
    #[diagnostic(
        code(armory::source::unavailable),
        help("Point --data-dir (or ARMORY_DATA_DIR) at the directory holding the catalogue JSON files")
    )]
    Unavailable { kind: &'static str, path: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    #[diagnostic(code(armory::source::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] JsonSyntaxError),

    #[error("Malformed {kind} catalogue: {message}")]
    #[diagnostic(code(armory::source::shape))]
    Shape { kind: &'static str, message: String },
}

/// Reads catalogues from a data directory
#[derive(Debug, Clone)]
pub struct CatalogueSource {
    root: PathBuf,
}

impl CatalogueSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document for an endpoint (e.g., "weapons")
    pub fn path_for(&self, endpoint: &str) -> PathBuf {
        self.root.join(format!("{}.json", endpoint))
    }

    /// Load raw `(key, record)` pairs for a kind, in row order
    pub fn load_entries<R>(&self, kind: &'static str, endpoint: &str) -> Result<Vec<(String, R)>, SourceError>
    where
        R: DeserializeOwned,
    {
        let path = self.path_for(endpoint);
        if !path.is_file() {
            return Err(SourceError::Unavailable { kind, path });
        }

        let content = fs::read_to_string(&path).map_err(|source| SourceError::Io {
            path: path.clone(),
            source,
        })?;
        let entries = parse_entries(&content, kind, &path.display().to_string())?;
        tracing::debug!(kind, path = %path.display(), rows = entries.len(), "loaded catalogue");
        Ok(entries)
    }

    /// Load and index a kind whose records deserialize directly
    pub fn load<T>(&self, endpoint: &str) -> Result<CatalogueIndex<T>, SourceError>
    where
        T: Record + DeserializeOwned,
    {
        self.load_projected::<T, T>(endpoint, |record| record)
    }

    /// Load raw rows, map each through `project`, then index the result
    pub fn load_projected<R, T>(&self, endpoint: &str, project: impl Fn(R) -> T) -> Result<CatalogueIndex<T>, SourceError>
    where
        R: DeserializeOwned,
        T: Record,
    {
        let entries = self.load_entries::<R>(T::KIND, endpoint)?;
        Ok(CatalogueIndex::build(
            entries.into_iter().map(|(key, raw)| (key, project(raw))),
        ))
    }
}

/// Parse a catalogue document into `(key, record)` pairs
pub fn parse_entries<R>(content: &str, kind: &'static str, filename: &str) -> Result<Vec<(String, R)>, SourceError>
where
    R: DeserializeOwned,
{
    let object = match json::parse_value(content, filename)? {
        serde_json::Value::Object(map) => map,
        other => {
            return Err(SourceError::Shape {
                kind,
                message: format!("expected an object keyed by id, found {}", json_type(&other)),
            })
        }
    };

    json::ordered_entries(object)
        .into_iter()
        .map(|(key, value)| {
            serde_json::from_value::<R>(value)
                .map(|record| (key.clone(), record))
                .map_err(|e| SourceError::Shape {
                    kind,
                    message: format!("row \"{}\": {}", key, e),
                })
        })
        .collect()
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
