//! Ring entity type - accessories with skill slots and upgrade chains

use serde::{Deserialize, Serialize};

use crate::core::flag;
use crate::core::pipeline::Query;
use crate::core::record::{skill_list, Grade, Record, SortKey};

/// Catalogue endpoint for rings
pub const ENDPOINT: &str = "rings";

/// Marker for multi-hit skills
pub const MULTI_MARK: &str = "複";

/// A ring record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ring {
    #[serde(default, deserialize_with = "flag::name")]
    pub name: String,

    #[serde(default, deserialize_with = "flag::int")]
    pub rank: Option<i64>,

    #[serde(default, deserialize_with = "flag::text")]
    pub rare: Option<String>,

    #[serde(default, deserialize_with = "flag::int")]
    pub level: Option<i64>,

    #[serde(default, deserialize_with = "flag::real")]
    pub phy_atk: Option<f64>,

    #[serde(default, deserialize_with = "flag::real")]
    pub mag_atk: Option<f64>,

    #[serde(default, deserialize_with = "flag::real")]
    pub crit: Option<f64>,

    #[serde(default, deserialize_with = "flag::text")]
    pub skill1: Option<String>,
    #[serde(default, deserialize_with = "flag::text")]
    pub skill2: Option<String>,
    #[serde(default, deserialize_with = "flag::text")]
    pub skill3: Option<String>,
    #[serde(default, deserialize_with = "flag::text")]
    pub skill4: Option<String>,
    #[serde(default, deserialize_with = "flag::text")]
    pub skill5: Option<String>,
    #[serde(default, deserialize_with = "flag::text")]
    pub skill6: Option<String>,

    #[serde(default, deserialize_with = "flag::text")]
    pub base: Option<String>,

    #[serde(default, deserialize_with = "flag::text")]
    pub raw_materials: Option<String>,
}

impl Ring {
    pub fn skills(&self) -> Vec<String> {
        skill_list(&[
            self.skill1.clone(),
            self.skill2.clone(),
            self.skill3.clone(),
            self.skill4.clone(),
            self.skill5.clone(),
            self.skill6.clone(),
        ])
    }

    /// Any skill slot carries the multi-hit marker
    pub fn has_multi(&self) -> bool {
        self.skills().iter().any(|s| s.contains(MULTI_MARK))
    }

    /// Rarity grade A or S
    pub fn is_rarity_a(&self) -> bool {
        Grade::at_least(self.rare.as_deref(), Grade::A)
    }
}

impl Record for Ring {
    const KIND: &'static str = "ring";

    fn name(&self) -> &str {
        &self.name
    }

    fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    fn sort_key(&self) -> Option<SortKey> {
        Some(SortKey::new(self.level, self.rank))
    }
}

/// List parameters for rings
#[derive(Debug, Clone, Default)]
pub struct RingFilter {
    pub name: Option<String>,
    pub search: Option<String>,
    pub rarity_a: bool,
    pub multi: bool,
}

impl RingFilter {
    pub fn query(&self) -> Query<Ring> {
        Query::new()
            .lineage_of(self.name.as_deref())
            .contains("search", self.search.as_deref(), |r: &Ring| Some(r.name.as_str()))
            .toggle("rarity-a", self.rarity_a, Ring::is_rarity_a)
            .toggle("multi", self.multi, Ring::has_multi)
    }
}
