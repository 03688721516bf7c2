//! Generic filter/sort pipeline
//!
//! Each entity kind describes its list parameters as a [`Query`]: an optional
//! crafting-chain name filter plus any number of named predicates. [`apply`]
//! keeps the rows that pass every active predicate and orders them by the
//! kind's [`Record::sort_key`].

use crate::core::chain::{lineage, AncestorSet};
use crate::core::index::{CatalogueIndex, Row};
use crate::core::record::{contains_ignore_case, Record};

type Predicate<T> = Box<dyn Fn(&T) -> bool>;

/// A named predicate over one record
pub struct Filter<T> {
    pub label: &'static str,
    predicate: Predicate<T>,
}

impl<T> Filter<T> {
    pub fn new(label: &'static str, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        Self {
            label,
            predicate: Box::new(predicate),
        }
    }

    pub fn matches(&self, record: &T) -> bool {
        (self.predicate)(record)
    }
}

impl<T> std::fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Filter").field("label", &self.label).finish()
    }
}

/// Active list parameters for one entity kind
#[derive(Debug)]
pub struct Query<T> {
    name: Option<String>,
    filters: Vec<Filter<T>>,
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self {
            name: None,
            filters: Vec::new(),
        }
    }
}

impl<T: 'static> Query<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the crafting lineage of `name`; empty strings impose nothing
    pub fn lineage_of(mut self, name: Option<&str>) -> Self {
        self.name = name.filter(|n| !n.is_empty()).map(String::from);
        self
    }

    /// Exact, case-sensitive match of a text field when `value` is non-empty
    pub fn equals<F>(self, label: &'static str, value: Option<&str>, field: F) -> Self
    where
        F: Fn(&T) -> Option<&str> + 'static,
    {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => {
                let v = v.to_string();
                self.filter(Filter::new(label, move |r| field(r) == Some(v.as_str())))
            }
            None => self,
        }
    }

    /// Case-insensitive containment in a text field when `needle` is non-empty
    pub fn contains<F>(self, label: &'static str, needle: Option<&str>, field: F) -> Self
    where
        F: Fn(&T) -> Option<&str> + 'static,
    {
        match needle.filter(|n| !n.is_empty()) {
            Some(n) => {
                let n = n.to_string();
                self.filter(Filter::new(label, move |r| {
                    field(r).is_some_and(|f| contains_ignore_case(f, &n))
                }))
            }
            None => self,
        }
    }

    /// Apply `predicate` only while the toggle is on
    pub fn toggle<F>(self, label: &'static str, enabled: bool, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        if enabled {
            self.filter(Filter::new(label, predicate))
        } else {
            self
        }
    }

    pub fn filter(mut self, filter: Filter<T>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Labels of the active predicates, in the order they were added
    pub fn active(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.label).collect()
    }

    /// Whether `record` passes every predicate (the name filter is not checked here)
    pub fn matches(&self, record: &T) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }
}

/// Filter and order the catalogue view.
///
/// With a name filter set, only rows named in its lineage survive. Survivors
/// are then sorted with a stable sort, so rows with equal keys keep their
/// catalogue order.
pub fn apply<'a, T: Record + 'static>(index: &'a CatalogueIndex<T>, query: &Query<T>) -> Vec<&'a Row<T>> {
    let admitted: Option<AncestorSet> = query.name().map(|n| lineage(index, n));

    let mut rows: Vec<&Row<T>> = index
        .view()
        .iter()
        .filter(|row| {
            admitted
                .as_ref()
                .map_or(true, |names| names.contains(row.record.name()))
        })
        .filter(|row| query.matches(&row.record))
        .collect();

    // slice::sort_by_cached_key is stable
    rows.sort_by_cached_key(|row| row.record.sort_key());

    tracing::debug!(
        kind = T::KIND,
        total = index.len(),
        kept = rows.len(),
        name = query.name(),
        filters = ?query.active(),
        "applied list query"
    );

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::index::tests::{part, Part};

    fn leveled(name: &str, base: Option<&str>, level: i64, rank: i64) -> Part {
        let mut p = part(name, base);
        p.level = Some(level);
        p.rank = Some(rank);
        p
    }

    fn names<'a>(rows: &[&'a Row<Part>]) -> Vec<&'a str> {
        rows.iter().map(|r| r.record.name.as_str()).collect()
    }

    fn keys<'a>(rows: &[&'a Row<Part>]) -> Vec<&'a str> {
        rows.iter().map(|r| r.key.as_str()).collect()
    }

    #[test]
    fn test_no_filters_returns_everything() {
        let index = CatalogueIndex::from_records(vec![part("c", None), part("a", None), part("b", None)]);
        let rows = apply(&index, &Query::new());
        assert_eq!(names(&rows), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_name_filter_follows_lineage() {
        let index = CatalogueIndex::from_records(vec![
            leveled("Sword+1", Some("Sword"), 2, 1),
            leveled("Sword", Some("(origin)"), 1, 1),
            leveled("Axe", None, 1, 1),
        ]);
        let rows = apply(&index, &Query::new().lineage_of(Some("Sword+1")));
        assert_eq!(names(&rows), vec!["Sword", "Sword+1"]);
    }

    #[test]
    fn test_name_filter_without_match_is_empty() {
        let index = CatalogueIndex::from_records(vec![part("Sword", None)]);
        let rows = apply(&index, &Query::new().lineage_of(Some("Spear")));
        assert!(rows.is_empty());
    }

    #[test]
    fn test_empty_name_filter_is_inactive() {
        let index = CatalogueIndex::from_records(vec![part("Sword", None)]);
        let query = Query::new().lineage_of(Some(""));
        assert!(query.name().is_none());
        assert_eq!(apply(&index, &query).len(), 1);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let index = CatalogueIndex::from_records(vec![
            part("Iron Sword", Some("iron")),
            part("Iron Axe", Some("iron")),
            part("Wood Sword", Some("wood")),
        ]);
        let query = Query::new()
            .contains("search", Some("sword"), |p: &Part| Some(p.name.as_str()))
            .equals("base", Some("iron"), |p: &Part| p.base.as_deref());

        let rows = apply(&index, &query);
        assert_eq!(names(&rows), vec!["Iron Sword"]);
        assert_eq!(query.active(), vec!["search", "base"]);
    }

    #[test]
    fn test_equality_is_case_sensitive_and_contains_is_not() {
        let index = CatalogueIndex::from_records(vec![part("Iron Sword", Some("Iron"))]);

        let exact = Query::new().equals("base", Some("iron"), |p: &Part| p.base.as_deref());
        assert!(apply(&index, &exact).is_empty());

        let loose = Query::new().contains("search", Some("IRON"), |p: &Part| Some(p.name.as_str()));
        assert_eq!(apply(&index, &loose).len(), 1);
    }

    #[test]
    fn test_unset_parameters_impose_nothing() {
        let index = CatalogueIndex::from_records(vec![part("a", None), part("b", Some("x"))]);
        let query = Query::new()
            .equals("base", None, |p: &Part| p.base.as_deref())
            .contains("search", Some(""), |p: &Part| Some(p.name.as_str()))
            .toggle("never", false, |_: &Part| false);
        assert!(query.active().is_empty());
        assert_eq!(apply(&index, &query).len(), 2);
    }

    #[test]
    fn test_empty_equality_value_imposes_nothing() {
        let index = CatalogueIndex::from_records(vec![part("a", None), part("b", Some("x"))]);
        let query = Query::new().equals("base", Some(""), |p: &Part| p.base.as_deref());
        assert!(query.active().is_empty());
        assert_eq!(names(&apply(&index, &query)), vec!["a", "b"]);
    }

    #[test]
    fn test_toggle_applies_predicate() {
        let index = CatalogueIndex::from_records(vec![part("a", None), part("b", Some("x"))]);
        let query = Query::new().toggle("has base", true, |p: &Part| p.base.is_some());
        assert_eq!(names(&apply(&index, &query)), vec!["b"]);
    }

    #[test]
    fn test_sort_level_then_rank() {
        let index = CatalogueIndex::from_records(vec![
            leveled("high", None, 3, 2),
            leveled("low", None, 1, 5),
            leveled("tie", None, 3, 1),
        ]);
        let rows = apply(&index, &Query::new());
        assert_eq!(names(&rows), vec!["low", "tie", "high"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let index = CatalogueIndex::from_records(vec![
            leveled("first", None, 2, 2),
            leveled("other", None, 1, 1),
            leveled("second", None, 2, 2),
            leveled("third", None, 2, 2),
        ]);
        let rows = apply(&index, &Query::new());
        assert_eq!(names(&rows), vec!["other", "first", "second", "third"]);
        assert_eq!(keys(&rows), vec!["1", "0", "2", "3"]);
    }

    #[test]
    fn test_missing_keys_sort_last() {
        let index = CatalogueIndex::from_records(vec![
            part("unknown", None),
            leveled("known", None, 9, 9),
        ]);
        let rows = apply(&index, &Query::new());
        assert_eq!(names(&rows), vec!["known", "unknown"]);
    }

    #[test]
    fn test_apply_is_idempotent_and_non_mutating() {
        let index = CatalogueIndex::from_records(vec![
            leveled("b", Some("a"), 2, 1),
            leveled("a", None, 1, 1),
            leveled("c", None, 1, 1),
        ]);
        let before: Vec<_> = index.view().to_vec();
        let query = Query::new().lineage_of(Some("b"));

        let first = keys(&apply(&index, &query));
        let second = keys(&apply(&index, &query));
        assert_eq!(first, second);
        assert_eq!(first, vec!["1", "0"]);
        assert_eq!(index.view(), before.as_slice());
    }
}
