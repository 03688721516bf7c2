//! Crafting-chain resolution
//!
//! A record's `base` field names the records it is crafted from, separated by
//! whitespace. Two reserved values stop the chain without naming anything: the
//! origin marker (a root record) and the composite marker (a record synthesized
//! without a single predecessor). Names that match no record stay in the
//! result but are not expanded further.

use std::collections::{BTreeSet, HashSet};

use crate::core::index::CatalogueIndex;
use crate::core::record::Record;

/// Spellings of the origin marker
pub const ORIGIN_MARKERS: &[&str] = &["(基点)", "(origin)"];

/// Spellings of the composite marker
pub const COMPOSITE_MARKERS: &[&str] = &["(合成)", "(composite)"];

/// Names reachable through `base` fields
pub type AncestorSet = BTreeSet<String>;

/// Parsed form of a `base` field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseRef<'a> {
    /// Absent or blank
    Missing,
    /// Root record
    Origin,
    /// Synthesized record without a direct predecessor
    Composite,
    /// One or more crafting sources, in field order
    Sources(Vec<&'a str>),
}

impl<'a> BaseRef<'a> {
    /// Surrounding whitespace is ignored, so a padded marker is still a marker.
    pub fn parse(base: Option<&'a str>) -> Self {
        let Some(base) = base.map(str::trim).filter(|b| !b.is_empty()) else {
            return BaseRef::Missing;
        };
        if ORIGIN_MARKERS.contains(&base) {
            return BaseRef::Origin;
        }
        if COMPOSITE_MARKERS.contains(&base) {
            return BaseRef::Composite;
        }

        let sources: Vec<&str> = base.split_whitespace().filter(|t| !is_marker(t)).collect();
        if sources.is_empty() {
            BaseRef::Missing
        } else {
            BaseRef::Sources(sources)
        }
    }

    /// Source names, empty for markers and missing fields
    pub fn sources(&self) -> &[&'a str] {
        match self {
            BaseRef::Sources(s) => s,
            _ => &[],
        }
    }
}

fn is_marker(token: &str) -> bool {
    ORIGIN_MARKERS.contains(&token) || COMPOSITE_MARKERS.contains(&token)
}

/// Transitive crafting sources of `record`, not including the record itself.
///
/// Every name is inserted into the result before it is expanded, and names
/// already present are skipped, so cyclic chains terminate.
pub fn resolve_ancestors<T: Record>(record: &T, index: &CatalogueIndex<T>) -> AncestorSet {
    let mut ancestors = AncestorSet::new();
    let mut pending: Vec<&str> = BaseRef::parse(record.base()).sources().to_vec();
    pending.reverse();

    while let Some(name) = pending.pop() {
        if !ancestors.insert(name.to_string()) {
            continue;
        }
        match index.get(name) {
            Some(row) => {
                let base = BaseRef::parse(row.record.base());
                pending.extend(base.sources().iter().rev());
            }
            None => tracing::trace!(kind = T::KIND, name, "chain cut at unknown record"),
        }
    }

    ancestors
}

/// Names admitted by a chain filter on `name`.
///
/// This is every record named `name` (several, if the name is duplicated)
/// plus all of their ancestors. A name that matches no record admits nothing.
pub fn lineage<T: Record>(index: &CatalogueIndex<T>, name: &str) -> AncestorSet {
    let mut names = AncestorSet::new();
    for row in index.named(name) {
        names.insert(row.record.name().to_string());
        names.extend(resolve_ancestors(&row.record, index));
    }
    names
}

/// One node of a printed crafting tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainStep {
    pub name: String,
    pub depth: usize,
    /// Row key of the record the name resolved to
    pub key: Option<String>,
    /// Name was already shown higher up this branch
    pub cycle: bool,
    /// Name was already expanded on another branch
    pub repeat: bool,
}

/// Depth-first crafting tree below `root`, stopping at `max_depth` if given.
///
/// Each name is expanded once; later sightings are reported but not expanded
/// again.
pub fn trace<T: Record>(root: &T, index: &CatalogueIndex<T>, max_depth: Option<usize>) -> Vec<ChainStep> {
    let max_depth = max_depth.unwrap_or(usize::MAX);
    let mut steps = Vec::new();
    let mut expanded: HashSet<String> = HashSet::new();
    expanded.insert(root.name().to_string());

    // (name, depth, branch of names above it)
    let mut stack: Vec<(&str, usize, Vec<&str>)> = BaseRef::parse(root.base())
        .sources()
        .iter()
        .rev()
        .map(|n| (*n, 1, vec![root.name()]))
        .collect();

    while let Some((name, depth, branch)) = stack.pop() {
        if depth > max_depth {
            continue;
        }
        let row = index.get(name);
        let cycle = branch.contains(&name);
        let repeat = !cycle && expanded.contains(name);

        steps.push(ChainStep {
            name: name.to_string(),
            depth,
            key: row.map(|r| r.key.clone()),
            cycle,
            repeat,
        });

        if cycle || repeat {
            continue;
        }
        expanded.insert(name.to_string());

        if let Some(row) = row {
            let mut below = branch.clone();
            below.push(name);
            let base = BaseRef::parse(row.record.base());
            for source in base.sources().iter().rev() {
                stack.push((*source, depth + 1, below.clone()));
            }
        }
    }

    steps
}

/// Base tokens that name no record, as `(row key, record name, missing name)`
pub fn unresolved<T: Record>(index: &CatalogueIndex<T>) -> Vec<(String, String, String)> {
    index
        .view()
        .iter()
        .flat_map(|row| {
            BaseRef::parse(row.record.base())
                .sources()
                .iter()
                .filter(|n| !index.contains_name(n))
                .map(|n| (row.key.clone(), row.record.name().to_string(), n.to_string()))
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::index::tests::{part, Part};

    fn set(names: &[&str]) -> AncestorSet {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn catalogue(entries: &[(&str, Option<&str>)]) -> CatalogueIndex<Part> {
        CatalogueIndex::from_records(entries.iter().map(|(n, b)| part(n, *b)))
    }

    #[test]
    fn test_parse_base() {
        assert_eq!(BaseRef::parse(None), BaseRef::Missing);
        assert_eq!(BaseRef::parse(Some("  ")), BaseRef::Missing);
        assert_eq!(BaseRef::parse(Some("(基点)")), BaseRef::Origin);
        assert_eq!(BaseRef::parse(Some("(origin)")), BaseRef::Origin);
        assert_eq!(BaseRef::parse(Some("(合成)")), BaseRef::Composite);
        assert_eq!(BaseRef::parse(Some("(composite)")), BaseRef::Composite);
        assert_eq!(
            BaseRef::parse(Some(" Sword  Shield ")),
            BaseRef::Sources(vec!["Sword", "Shield"])
        );
        assert_eq!(
            BaseRef::parse(Some("Sword (origin)")),
            BaseRef::Sources(vec!["Sword"])
        );
    }

    #[test]
    fn test_padded_markers_are_still_markers() {
        assert_eq!(BaseRef::parse(Some(" (基点) ")), BaseRef::Origin);
        assert_eq!(BaseRef::parse(Some("\t(合成)\n")), BaseRef::Composite);

        let index = catalogue(&[("Root", Some(" (origin) "))]);
        let root = &index.get("Root").unwrap().record;
        assert!(resolve_ancestors(root, &index).is_empty());
        assert!(unresolved(&index).is_empty());
    }

    #[test]
    fn test_sword_scenario() {
        let index = catalogue(&[("Sword+1", Some("Sword")), ("Sword", Some("(origin)"))]);
        let upgraded = &index.get("Sword+1").unwrap().record;

        assert_eq!(resolve_ancestors(upgraded, &index), set(&["Sword"]));
        assert_eq!(lineage(&index, "Sword+1"), set(&["Sword+1", "Sword"]));
    }

    #[test]
    fn test_markers_resolve_to_nothing() {
        let index = catalogue(&[("Root", Some("(基点)")), ("Mix", Some("(合成)")), ("Bare", None)]);
        for name in ["Root", "Mix", "Bare"] {
            let record = &index.get(name).unwrap().record;
            assert!(resolve_ancestors(record, &index).is_empty());
        }
    }

    #[test]
    fn test_transitive_closure_multiple_sources() {
        let index = catalogue(&[
            ("Blade", Some("Edge Hilt")),
            ("Edge", Some("Ore")),
            ("Hilt", Some("Wood Ore")),
            ("Ore", Some("(基点)")),
            ("Wood", None),
        ]);
        let blade = &index.get("Blade").unwrap().record;
        assert_eq!(
            resolve_ancestors(blade, &index),
            set(&["Edge", "Hilt", "Ore", "Wood"])
        );
    }

    #[test]
    fn test_token_order_does_not_matter() {
        let forward = catalogue(&[("X", Some("A B C")), ("A", Some("D")), ("B", Some("D E"))]);
        let backward = catalogue(&[("X", Some("C B A")), ("A", Some("D")), ("B", Some("E D"))]);

        let a = resolve_ancestors(&forward.get("X").unwrap().record, &forward);
        let b = resolve_ancestors(&backward.get("X").unwrap().record, &backward);
        assert_eq!(a, b);
        assert_eq!(a, set(&["A", "B", "C", "D", "E"]));
    }

    #[test]
    fn test_cycle_terminates() {
        let index = catalogue(&[("A", Some("B")), ("B", Some("A"))]);
        let a = &index.get("A").unwrap().record;
        assert_eq!(resolve_ancestors(a, &index), set(&["A", "B"]));
    }

    #[test]
    fn test_self_reference_terminates() {
        let index = catalogue(&[("Loop", Some("Loop"))]);
        let record = &index.get("Loop").unwrap().record;
        assert_eq!(resolve_ancestors(record, &index), set(&["Loop"]));
    }

    #[test]
    fn test_unknown_names_are_kept_but_not_expanded() {
        let index = catalogue(&[("Bow", Some("Yew Ghost"))]);
        let bow = &index.get("Bow").unwrap().record;
        assert_eq!(resolve_ancestors(bow, &index), set(&["Ghost", "Yew"]));
        assert_eq!(
            unresolved(&index),
            vec![
                ("0".to_string(), "Bow".to_string(), "Yew".to_string()),
                ("0".to_string(), "Bow".to_string(), "Ghost".to_string()),
            ]
        );
    }

    #[test]
    fn test_lineage_of_unknown_name_is_empty() {
        let index = catalogue(&[("Sword", None)]);
        assert!(lineage(&index, "Spear").is_empty());
    }

    #[test]
    fn test_lineage_unions_duplicate_names() {
        let index = catalogue(&[
            ("Staff", Some("Branch")),
            ("Branch", None),
            ("Staff", Some("Crystal")),
            ("Crystal", None),
        ]);
        assert_eq!(lineage(&index, "Staff"), set(&["Staff", "Branch", "Crystal"]));
    }

    #[test]
    fn test_ancestors_use_last_duplicate_for_expansion() {
        let index = catalogue(&[
            ("Top", Some("Mid")),
            ("Mid", Some("Old")),
            ("Mid", Some("New")),
        ]);
        let top = &index.get("Top").unwrap().record;
        assert_eq!(resolve_ancestors(top, &index), set(&["Mid", "New"]));
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let index = catalogue(&[("A", Some("B C")), ("B", Some("C")), ("C", Some("A"))]);
        let a = &index.get("A").unwrap().record;
        assert_eq!(resolve_ancestors(a, &index), resolve_ancestors(a, &index));
    }

    #[test]
    fn test_trace_tree() {
        let index = catalogue(&[
            ("Blade", Some("Edge Hilt")),
            ("Edge", Some("Ore")),
            ("Hilt", Some("Ore Mystery")),
            ("Ore", None),
        ]);
        let blade = &index.get("Blade").unwrap().record;
        let steps = trace(blade, &index, None);

        let shape: Vec<_> = steps
            .iter()
            .map(|s| (s.name.as_str(), s.depth, s.key.is_some(), s.repeat))
            .collect();
        assert_eq!(
            shape,
            vec![
                ("Edge", 1, true, false),
                ("Ore", 2, true, false),
                ("Hilt", 1, true, false),
                ("Ore", 2, true, true),
                ("Mystery", 2, false, false),
            ]
        );
    }

    #[test]
    fn test_trace_marks_cycles_and_respects_depth() {
        let index = catalogue(&[("A", Some("B")), ("B", Some("A"))]);
        let a = &index.get("A").unwrap().record;

        let steps = trace(a, &index, None);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].name, "A");
        assert!(steps[1].cycle);

        let shallow = trace(a, &index, Some(1));
        assert_eq!(shallow.len(), 1);
        assert_eq!(shallow[0].name, "B");
    }
}
