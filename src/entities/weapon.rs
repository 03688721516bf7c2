//! Weapon entity type - craftable weapons with upgrade chains

use serde::{Deserialize, Serialize};

use crate::core::flag;
use crate::core::pipeline::Query;
use crate::core::record::{skill_list, Grade, Record, SortKey};

/// Catalogue endpoint for weapons
pub const ENDPOINT: &str = "weapons";

/// A weapon record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    #[serde(default, deserialize_with = "flag::name")]
    pub name: String,

    #[serde(default, deserialize_with = "flag::int")]
    pub rank: Option<i64>,

    /// Rarity code ("S", "A+", ...)
    #[serde(default, deserialize_with = "flag::text")]
    pub rare: Option<String>,

    #[serde(default, deserialize_with = "flag::text")]
    pub attribute: Option<String>,

    /// Usable in the off hand
    #[serde(default, deserialize_with = "flag::flag")]
    pub left_hand: bool,

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
    pub raw_materials: Option<String>,

    /// Crafting sources, or a chain marker
    #[serde(default, deserialize_with = "flag::text")]
    pub base: Option<String>,

    /// Weapon type (sword, staff, ...)
    #[serde(rename = "type", default, deserialize_with = "flag::text")]
    pub kind: Option<String>,
}

impl Weapon {
    /// Non-empty skills in slot order
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

    /// Rarity grade S
    pub fn is_top_rarity(&self) -> bool {
        Grade::at_least(self.rare.as_deref(), Grade::S)
    }
}

impl Record for Weapon {
    const KIND: &'static str = "weapon";

    fn name(&self) -> &str {
        &self.name
    }

    fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Level, then rank
    fn sort_key(&self) -> Option<SortKey> {
        Some(SortKey::new(self.level, self.rank))
    }
}

/// List parameters for weapons
#[derive(Debug, Clone, Default)]
pub struct WeaponFilter {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub attribute: Option<String>,
    pub search: Option<String>,
    pub top_rarity: bool,
}

impl WeaponFilter {
    pub fn query(&self) -> Query<Weapon> {
        Query::new()
            .lineage_of(self.name.as_deref())
            .equals("type", self.kind.as_deref(), |w: &Weapon| w.kind.as_deref())
            .equals("attribute", self.attribute.as_deref(), |w: &Weapon| {
                w.attribute.as_deref()
            })
            .contains("search", self.search.as_deref(), |w: &Weapon| Some(w.name.as_str()))
            .toggle("top-rarity", self.top_rarity, Weapon::is_top_rarity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::index::CatalogueIndex;
    use crate::core::pipeline::apply;
    use serde_json::json;

    fn weapon(name: &str, base: &str, kind: &str, rare: &str, level: i64, rank: i64) -> Weapon {
        Weapon {
            name: name.to_string(),
            base: Some(base.to_string()),
            kind: Some(kind.to_string()),
            rare: Some(rare.to_string()),
            level: Some(level),
            rank: Some(rank),
            ..Default::default()
        }
    }

    fn catalogue() -> CatalogueIndex<Weapon> {
        CatalogueIndex::from_records(vec![
            weapon("FlameSword", "IronSword", "sword", "S", 3, 1),
            weapon("IronSword", "BronzeSword", "sword", "A", 2, 1),
            weapon("BronzeSword", "(基点)", "sword", "B", 1, 1),
            weapon("OakStaff", "(基点)", "staff", "S+", 1, 2),
            weapon("TwinBlade", "IronSword OakStaff", "dual", "SS", 4, 1),
        ])
    }

    fn names(index: &CatalogueIndex<Weapon>, filter: &WeaponFilter) -> Vec<String> {
        apply(index, &filter.query())
            .into_iter()
            .map(|r| r.record.name.clone())
            .collect()
    }

    #[test]
    fn test_deserialize_source_record() {
        let weapon: Weapon = serde_json::from_value(json!({
            "name": "FlameSword",
            "rank": "2",
            "rare": "S",
            "leftHand": "true",
            "level": 12,
            "phyAtk": "140",
            "magAtk": 30.5,
            "crit": "",
            "skill1": "炎",
            "skill2": "",
            "base": "IronSword",
            "type": "sword"
        }))
        .unwrap();

        assert_eq!(weapon.rank, Some(2));
        assert_eq!(weapon.level, Some(12));
        assert!(weapon.left_hand);
        assert_eq!(weapon.phy_atk, Some(140.0));
        assert_eq!(weapon.mag_atk, Some(30.5));
        assert_eq!(weapon.crit, None);
        assert_eq!(weapon.kind.as_deref(), Some("sword"));
        assert_eq!(weapon.skills(), vec!["炎"]);
    }

    #[test]
    fn test_missing_fields_default() {
        let weapon: Weapon = serde_json::from_value(json!({"name": "Stick"})).unwrap();
        assert!(!weapon.left_hand);
        assert!(weapon.base.is_none());
        assert!(weapon.skills().is_empty());
    }

    #[test]
    fn test_chain_filter_sorted_by_level() {
        let index = catalogue();
        let filter = WeaponFilter {
            name: Some("FlameSword".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&index, &filter), vec!["BronzeSword", "IronSword", "FlameSword"]);
    }

    #[test]
    fn test_chain_with_multiple_sources() {
        let index = catalogue();
        let filter = WeaponFilter {
            name: Some("TwinBlade".to_string()),
            ..Default::default()
        };
        assert_eq!(
            names(&index, &filter),
            vec!["BronzeSword", "OakStaff", "IronSword", "TwinBlade"]
        );
    }

    #[test]
    fn test_type_and_rarity_filters() {
        let index = catalogue();
        let filter = WeaponFilter {
            kind: Some("sword".to_string()),
            top_rarity: true,
            ..Default::default()
        };
        assert_eq!(names(&index, &filter), vec!["FlameSword"]);

        let filter = WeaponFilter {
            top_rarity: true,
            ..Default::default()
        };
        assert_eq!(names(&index, &filter), vec!["OakStaff", "FlameSword", "TwinBlade"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let index = catalogue();
        let filter = WeaponFilter {
            search: Some("SWORD".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&index, &filter), vec!["BronzeSword", "IronSword", "FlameSword"]);
    }

    #[test]
    fn test_unfiltered_sort_level_then_rank() {
        let index = catalogue();
        assert_eq!(
            names(&index, &WeaponFilter::default()),
            vec!["BronzeSword", "OakStaff", "IronSword", "FlameSword", "TwinBlade"]
        );
    }
}
