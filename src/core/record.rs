//! Record trait - common interface for all catalogue entity kinds

use std::cmp::Ordering;

/// Common trait for all catalogue records
pub trait Record {
    /// Singular display name of the kind (e.g., "weapon")
    const KIND: &'static str;

    /// The record's display and lookup name
    fn name(&self) -> &str;

    /// The raw crafting-source field, if the kind has one
    fn base(&self) -> Option<&str> {
        None
    }

    /// Two-key ascending ordering used after filtering.
    ///
    /// Kinds without a declared ordering return `None`, which keeps rows in
    /// catalogue order.
    fn sort_key(&self) -> Option<SortKey> {
        None
    }
}

/// Primary/secondary numeric ordering key.
///
/// Present values sort before absent ones at each position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortKey {
    pub primary: Option<i64>,
    pub secondary: Option<i64>,
}

impl SortKey {
    pub fn new(primary: Option<i64>, secondary: Option<i64>) -> Self {
        Self { primary, secondary }
    }
}

fn cmp_present_first(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_present_first(self.primary, other.primary)
            .then_with(|| cmp_present_first(self.secondary, other.secondary))
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Rarity grade, taken from the leading letter of a rarity code ("S+", "SS", "A")
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Grade {
    E,
    D,
    C,
    B,
    A,
    S,
}

impl Grade {
    /// Grade of a rarity code, or `None` for empty or unrecognized codes
    pub fn of(code: &str) -> Option<Grade> {
        match code.trim().chars().next()? {
            'S' => Some(Grade::S),
            'A' => Some(Grade::A),
            'B' => Some(Grade::B),
            'C' => Some(Grade::C),
            'D' => Some(Grade::D),
            'E' => Some(Grade::E),
            _ => None,
        }
    }

    /// Whether an optional rarity code is at or above `floor`
    pub fn at_least(code: Option<&str>, floor: Grade) -> bool {
        code.and_then(Grade::of).is_some_and(|g| g >= floor)
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::S => write!(f, "S"),
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::E => write!(f, "E"),
        }
    }
}

impl std::str::FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grade::of(s).ok_or_else(|| format!("Unknown rarity grade: {}", s))
    }
}

/// Case-insensitive containment used by free-text search filters
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Skill slots carried by weapons and rings, non-empty entries only
pub fn skill_list(slots: &[Option<String>]) -> Vec<String> {
    slots
        .iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .cloned()
        .collect()
}
