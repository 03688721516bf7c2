//! Catalogue index - row view plus name lookup
//!
//! The row view keeps records in source order, each tagged with the key it had
//! in the source object. The name lookup is keep-last: when two rows share a
//! name, the later row wins and the collision is recorded so data-quality
//! tooling can surface it.

use serde::Serialize;
use std::collections::HashMap;

use crate::core::record::Record;

/// A catalogue record together with its row key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row<T> {
    /// Key the record had in the source catalogue
    pub key: String,
    #[serde(flatten)]
    pub record: T,
}

/// Two rows sharing one name; `kept` shadows `dropped` in name lookups
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameCollision {
    pub name: String,
    pub kept: String,
    pub dropped: String,
}

/// Row view and keep-last name index over one catalogue
#[derive(Debug, Clone)]
pub struct CatalogueIndex<T> {
    rows: Vec<Row<T>>,
    by_name: HashMap<String, usize>,
    collisions: Vec<NameCollision>,
}

impl<T> Default for CatalogueIndex<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            by_name: HashMap::new(),
            collisions: Vec::new(),
        }
    }
}

impl<T: Record> CatalogueIndex<T> {
    /// Build from `(key, record)` pairs in catalogue order
    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, T)>,
    {
        let rows: Vec<Row<T>> = entries
            .into_iter()
            .map(|(key, record)| Row { key, record })
            .collect();

        let mut by_name: HashMap<String, usize> = HashMap::with_capacity(rows.len());
        let mut collisions = Vec::new();

        for (pos, row) in rows.iter().enumerate() {
            let name = row.record.name();
            if let Some(prev) = by_name.insert(name.to_string(), pos) {
                tracing::debug!(
                    kind = T::KIND,
                    name,
                    kept = %row.key,
                    dropped = %rows[prev].key,
                    "duplicate name in catalogue"
                );
                collisions.push(NameCollision {
                    name: name.to_string(),
                    kept: row.key.clone(),
                    dropped: rows[prev].key.clone(),
                });
            }
        }

        if !collisions.is_empty() {
            tracing::warn!(
                kind = T::KIND,
                count = collisions.len(),
                "catalogue has duplicate names; lookups use the last occurrence"
            );
        }

        Self {
            rows,
            by_name,
            collisions,
        }
    }

    /// Build from records alone, keyed by position ("0", "1", ...)
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::build(
            records
                .into_iter()
                .enumerate()
                .map(|(pos, record)| (pos.to_string(), record)),
        )
    }

    /// All rows in catalogue order
    pub fn view(&self) -> &[Row<T>] {
        &self.rows
    }

    /// Look up a record by name (last occurrence wins)
    pub fn get(&self, name: &str) -> Option<&Row<T>> {
        self.by_name.get(name).map(|&pos| &self.rows[pos])
    }

    /// Look up a row by its source key
    pub fn get_by_key(&self, key: &str) -> Option<&Row<T>> {
        self.rows.iter().find(|r| r.key == key)
    }

    /// Every row carrying `name`, including ones shadowed in the index
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Row<T>> + 'a {
        self.rows.iter().filter(move |r| r.record.name() == name)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Name collisions seen while building, in catalogue order
    pub fn collisions(&self) -> &[NameCollision] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct non-empty values of a field, in first-seen order
    pub fn distinct<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&T) -> Option<&str>,
    {
        let mut seen = std::collections::HashSet::new();
        self.rows
            .iter()
            .filter_map(|r| field(&r.record))
            .filter(|v| !v.is_empty())
            .filter(|v| seen.insert(v.to_string()))
            .map(String::from)
            .collect()
    }
}
