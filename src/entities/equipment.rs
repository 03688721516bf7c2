//! Equipment entity type - armor pieces with inscriptions and upgrade chains

use serde::{Deserialize, Serialize};

use crate::core::flag;
use crate::core::pipeline::Query;
use crate::core::record::{Grade, Record, SortKey};

/// Catalogue endpoint for equipment
pub const ENDPOINT: &str = "equipments";

/// Inscription markers for follow-up attacks
pub const CHASE_MARKS: &[&str] = &["追撃", "加撃"];

/// An equipment record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    #[serde(default, deserialize_with = "flag::name")]
    pub name: String,

    #[serde(default, deserialize_with = "flag::int")]
    pub rank: Option<i64>,

    #[serde(default, deserialize_with = "flag::text")]
    pub rare: Option<String>,

    #[serde(default, deserialize_with = "flag::int")]
    pub level: Option<i64>,

    /// Body slot (head, torso, ...)
    #[serde(default, deserialize_with = "flag::text")]
    pub part: Option<String>,

    #[serde(default, deserialize_with = "flag::real")]
    pub phy_def: Option<f64>,

    #[serde(default, deserialize_with = "flag::real")]
    pub mag_def: Option<f64>,

    #[serde(default, deserialize_with = "flag::text")]
    pub inscription: Option<String>,

    #[serde(default, deserialize_with = "flag::text")]
    pub base: Option<String>,

    #[serde(default, deserialize_with = "flag::text")]
    pub raw_materials: Option<String>,

    #[serde(default, deserialize_with = "flag::text")]
    pub notice: Option<String>,

    #[serde(rename = "type", default, deserialize_with = "flag::text")]
    pub kind: Option<String>,

    /// Profession restriction
    #[serde(default, deserialize_with = "flag::text")]
    pub pro: Option<String>,
}

impl Equipment {
    pub fn is_rarity_a(&self) -> bool {
        Grade::at_least(self.rare.as_deref(), Grade::A)
    }

    /// Inscription grants a chase or extra strike
    pub fn has_chase(&self) -> bool {
        self.inscription
            .as_deref()
            .is_some_and(|text| CHASE_MARKS.iter().any(|mark| text.contains(mark)))
    }
}

impl Record for Equipment {
    const KIND: &'static str = "equipment";

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

/// List parameters for equipment
#[derive(Debug, Clone, Default)]
pub struct EquipmentFilter {
    pub name: Option<String>,
    pub part: Option<String>,
    pub kind: Option<String>,
    pub pro: Option<String>,
    pub search: Option<String>,
    pub rarity_a: bool,
    pub chase: bool,
}

impl EquipmentFilter {
    pub fn query(&self) -> Query<Equipment> {
        Query::new()
            .lineage_of(self.name.as_deref())
            .equals("part", self.part.as_deref(), |e: &Equipment| e.part.as_deref())
            .equals("type", self.kind.as_deref(), |e: &Equipment| e.kind.as_deref())
            .equals("pro", self.pro.as_deref(), |e: &Equipment| e.pro.as_deref())
            .contains("search", self.search.as_deref(), |e: &Equipment| Some(e.name.as_str()))
            .toggle("rarity-a", self.rarity_a, Equipment::is_rarity_a)
            .toggle("chase", self.chase, Equipment::has_chase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::index::CatalogueIndex;
    use crate::core::pipeline::apply;

    fn piece(name: &str, part: &str, level: i64, rank: i64) -> Equipment {
        Equipment {
            name: name.to_string(),
            part: Some(part.to_string()),
            level: Some(level),
            rank: Some(rank),
            ..Default::default()
        }
    }

    fn names(index: &CatalogueIndex<Equipment>, filter: &EquipmentFilter) -> Vec<String> {
        apply(index, &filter.query())
            .into_iter()
            .map(|r| r.record.name.clone())
            .collect()
    }

    #[test]
    fn test_level_tie_broken_by_rank() {
        let index = CatalogueIndex::from_records(vec![
            piece("鋼の兜", "head", 3, 2),
            piece("革の兜", "head", 3, 1),
        ]);
        assert_eq!(names(&index, &EquipmentFilter::default()), vec!["革の兜", "鋼の兜"]);
    }

    #[test]
    fn test_equal_keys_keep_catalogue_order() {
        let index = CatalogueIndex::from_records(vec![
            piece("first", "head", 1, 1),
            piece("second", "body", 1, 1),
            piece("third", "head", 1, 1),
        ]);
        assert_eq!(
            names(&index, &EquipmentFilter::default()),
            vec!["first", "second", "third"]
        );
    }

    #[test]
    fn test_chase_inscription() {
        let mut equipment = Equipment::default();
        assert!(!equipment.has_chase());
        equipment.inscription = Some("会心時加撃".to_string());
        assert!(equipment.has_chase());
        equipment.inscription = Some("追撃強化".to_string());
        assert!(equipment.has_chase());
        equipment.inscription = Some("防御強化".to_string());
        assert!(!equipment.has_chase());
    }

    #[test]
    fn test_equality_filters_combine() {
        let mut helm = piece("鋼の兜", "head", 3, 2);
        helm.pro = Some("warrior".to_string());
        helm.rare = Some("A".to_string());
        let mut mail = piece("鋼の鎧", "body", 3, 1);
        mail.pro = Some("warrior".to_string());
        let mut hood = piece("絹の頭巾", "head", 2, 1);
        hood.pro = Some("mage".to_string());
        let index = CatalogueIndex::from_records(vec![helm, mail, hood]);

        let filter = EquipmentFilter {
            part: Some("head".to_string()),
            pro: Some("warrior".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&index, &filter), vec!["鋼の兜"]);

        let filter = EquipmentFilter {
            pro: Some("Warrior".to_string()),
            ..Default::default()
        };
        assert!(names(&index, &filter).is_empty());

        let filter = EquipmentFilter {
            rarity_a: true,
            ..Default::default()
        };
        assert_eq!(names(&index, &filter), vec!["鋼の兜"]);
    }

    #[test]
    fn test_unknown_name_matches_nothing() {
        let index = CatalogueIndex::from_records(vec![piece("鋼の兜", "head", 3, 2)]);
        let filter = EquipmentFilter {
            name: Some("存在しない".to_string()),
            ..Default::default()
        };
        assert!(names(&index, &filter).is_empty());
    }
}
