//! Task entity type - quests with time windows and a projected summary
//!
//! Raw task rows carry six time-window flags and a nested reference to the map
//! they take place on. [`project`] turns a [`RawTask`] into a [`Task`] that also
//! carries the presentation fields (availability summary, map rank and level
//! cap, boss-exclusion label) before any filtering happens.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::flag;
use crate::core::pipeline::Query;
use crate::core::record::{Record, SortKey};

/// Catalogue endpoint for tasks
pub const ENDPOINT: &str = "tasks";

/// Summary used when every window is fully available
pub const ALWAYS_AVAILABLE: &str = "常時";

/// Map reference embedded in a task row
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapRef {
    #[serde(default, deserialize_with = "flag::int")]
    pub rank: Option<i64>,

    #[serde(rename = "maxLv", default, deserialize_with = "flag::int")]
    pub max_lv: Option<i64>,
}

/// A task row as exported by the catalogue
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTask {
    #[serde(default, deserialize_with = "flag::name")]
    pub name: String,

    #[serde(default, deserialize_with = "flag::text")]
    pub difficulty: Option<String>,

    #[serde(default, deserialize_with = "flag::text")]
    pub map_name: Option<String>,

    #[serde(default, deserialize_with = "flag::text")]
    pub dlc_name: Option<String>,

    /// Reward item
    #[serde(default, deserialize_with = "flag::text")]
    pub item_name: Option<String>,

    #[serde(default, deserialize_with = "flag::flag")]
    pub day: bool,
    #[serde(rename = "dayS", default, deserialize_with = "flag::flag")]
    pub day_special: bool,
    #[serde(default, deserialize_with = "flag::flag")]
    pub evening: bool,
    #[serde(rename = "eveningS", default, deserialize_with = "flag::flag")]
    pub evening_special: bool,
    #[serde(default, deserialize_with = "flag::flag")]
    pub night: bool,
    #[serde(rename = "nightS", default, deserialize_with = "flag::flag")]
    pub night_special: bool,

    /// Boss fights are excluded from the task
    #[serde(default, deserialize_with = "flag::flag")]
    pub exclude_boss: bool,

    #[serde(default, deserialize_with = "flag::text")]
    pub base: Option<String>,

    /// Absent unless the export holds an object here
    #[serde(default, deserialize_with = "flag::object")]
    pub map: Option<MapRef>,
}

/// A task with its projected presentation fields
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(flatten)]
    pub raw: RawTask,

    pub availability: String,
    pub rank: Option<i64>,
    pub max_level: Option<i64>,
    pub boss_excluded: &'static str,
}

/// One time-of-day window, normal or special variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum TimeSlot {
    Day,
    DayS,
    Evening,
    EveningS,
    Night,
    NightS,
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeSlot::Day => write!(f, "day"),
            TimeSlot::DayS => write!(f, "day-s"),
            TimeSlot::Evening => write!(f, "evening"),
            TimeSlot::EveningS => write!(f, "evening-s"),
            TimeSlot::Night => write!(f, "night"),
            TimeSlot::NightS => write!(f, "night-s"),
        }
    }
}

impl RawTask {
    pub fn slot(&self, slot: TimeSlot) -> bool {
        match slot {
            TimeSlot::Day => self.day,
            TimeSlot::DayS => self.day_special,
            TimeSlot::Evening => self.evening,
            TimeSlot::EveningS => self.evening_special,
            TimeSlot::Night => self.night,
            TimeSlot::NightS => self.night_special,
        }
    }

    /// Any special-variant window is open
    pub fn has_special(&self) -> bool {
        self.day_special || self.evening_special || self.night_special
    }

    /// Availability summary across the day, evening and night windows
    pub fn availability(&self) -> String {
        let windows = [
            ("昼", self.day, self.day_special),
            ("朝夕", self.evening, self.evening_special),
            ("夜", self.night, self.night_special),
        ];

        if windows.iter().all(|(_, normal, special)| *normal && *special) {
            return ALWAYS_AVAILABLE.to_string();
        }

        windows
            .iter()
            .map(|(label, normal, special)| window_label(label, *normal, *special))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn window_label(label: &str, normal: bool, special: bool) -> String {
    match (normal, special) {
        (true, true) => label.to_string(),
        (true, false) => format!("{}(平常)", label),
        (false, true) => format!("{}(特殊)", label),
        (false, false) => String::new(),
    }
}

/// Attach the presentation fields to a raw task
pub fn project(raw: RawTask) -> Task {
    let map = raw.map.clone().unwrap_or_default();
    Task {
        availability: raw.availability(),
        rank: map.rank,
        max_level: map.max_lv,
        boss_excluded: flag::yes_no(raw.exclude_boss),
        raw,
    }
}

impl Record for Task {
    const KIND: &'static str = "task";

    fn name(&self) -> &str {
        &self.raw.name
    }

    fn base(&self) -> Option<&str> {
        self.raw.base.as_deref()
    }

    /// Map rank, then map level cap
    fn sort_key(&self) -> Option<SortKey> {
        Some(SortKey::new(self.rank, self.max_level))
    }
}

/// List parameters for tasks
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub name: Option<String>,
    pub times: Vec<TimeSlot>,
    pub item: Option<String>,
    pub map: Option<String>,
    pub dlc: Option<String>,
    pub search: Option<String>,
    pub special: bool,
    pub no_boss: bool,
}

impl TaskFilter {
    pub fn query(&self) -> Query<Task> {
        let times = self.times.clone();
        Query::new()
            .lineage_of(self.name.as_deref())
            .toggle("time", !times.is_empty(), move |t: &Task| {
                times.iter().any(|slot| t.raw.slot(*slot))
            })
            .equals("item", self.item.as_deref(), |t: &Task| t.raw.item_name.as_deref())
            .equals("map", self.map.as_deref(), |t: &Task| t.raw.map_name.as_deref())
            .equals("dlc", self.dlc.as_deref(), |t: &Task| t.raw.dlc_name.as_deref())
            .contains("search", self.search.as_deref(), |t: &Task| Some(t.raw.name.as_str()))
            .toggle("special", self.special, |t: &Task| t.raw.has_special())
            .toggle("no-boss", self.no_boss, |t: &Task| t.raw.exclude_boss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::index::CatalogueIndex;
    use crate::core::pipeline::apply;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawTask {
        serde_json::from_value(value).unwrap()
    }

    fn task(name: &str, rank: Option<i64>, max_lv: Option<i64>) -> Task {
        project(RawTask {
            name: name.to_string(),
            map: rank.map(|rank| MapRef {
                rank: Some(rank),
                max_lv,
            }),
            ..Default::default()
        })
    }

    fn names(index: &CatalogueIndex<Task>, filter: &TaskFilter) -> Vec<String> {
        apply(index, &filter.query())
            .into_iter()
            .map(|r| r.record.raw.name.clone())
            .collect()
    }

    #[test]
    fn test_availability_keeps_empty_slots() {
        let task = raw(json!({
            "name": "薬草採取",
            "day": true,
            "dayS": false,
            "evening": true,
            "eveningS": true,
            "night": false,
            "nightS": false
        }));
        assert_eq!(task.availability(), "昼(平常) 朝夕 ");
    }

    #[test]
    fn test_availability_all_windows_full() {
        let task = raw(json!({
            "day": "true", "dayS": "true",
            "evening": true, "eveningS": "true",
            "night": true, "nightS": true
        }));
        assert_eq!(task.availability(), ALWAYS_AVAILABLE);
    }

    #[test]
    fn test_availability_special_and_none() {
        let task = raw(json!({"nightS": "true"}));
        assert_eq!(task.availability(), "  夜(特殊)");
        assert_eq!(RawTask::default().availability(), "  ");
    }

    #[test]
    fn test_string_flags_coerced_once() {
        let task = raw(json!({
            "day": "true",
            "dayS": "false",
            "evening": "yes",
            "excludeBoss": "true"
        }));
        assert!(task.day);
        assert!(!task.day_special);
        assert!(!task.evening);
        assert!(!task.night);
        assert!(task.exclude_boss);
    }

    #[test]
    fn test_project_lifts_map_fields() {
        let projected = project(raw(json!({
            "name": "討伐",
            "excludeBoss": false,
            "map": {"rank": "3", "maxLv": 40}
        })));
        assert_eq!(projected.rank, Some(3));
        assert_eq!(projected.max_level, Some(40));
        assert_eq!(projected.boss_excluded, "no");

        let projected = project(raw(json!({"name": "no map", "map": null})));
        assert_eq!(projected.rank, None);
        assert_eq!(projected.max_level, None);
    }

    #[test]
    fn test_projected_fields_serialize_alongside_raw() {
        let projected = project(raw(json!({"name": "討伐", "day": true, "excludeBoss": "true"})));
        let value = serde_json::to_value(&projected).unwrap();
        assert_eq!(value["name"], "討伐");
        assert_eq!(value["day"], true);
        assert_eq!(value["availability"], "昼(平常)  ");
        assert_eq!(value["bossExcluded"], "yes");
    }

    #[test]
    fn test_sort_rank_then_level_with_mapless_last() {
        let index = CatalogueIndex::from_records(vec![
            task("no-map-1", None, None),
            task("r2-40", Some(2), Some(40)),
            task("r1-30", Some(1), Some(30)),
            task("no-map-2", None, None),
            task("r2-20", Some(2), Some(20)),
        ]);
        assert_eq!(
            names(&index, &TaskFilter::default()),
            vec!["r1-30", "r2-20", "r2-40", "no-map-1", "no-map-2"]
        );
    }

    #[test]
    fn test_time_filter_any_selected_slot() {
        let index = CatalogueIndex::from_records(vec![
            project(raw(json!({"name": "day", "day": true}))),
            project(raw(json!({"name": "night", "nightS": "true"}))),
            project(raw(json!({"name": "evening", "evening": true}))),
        ]);

        let filter = TaskFilter {
            times: vec![TimeSlot::Day, TimeSlot::NightS],
            ..Default::default()
        };
        assert_eq!(names(&index, &filter), vec!["day", "night"]);

        let filter = TaskFilter {
            special: true,
            ..Default::default()
        };
        assert_eq!(names(&index, &filter), vec!["night"]);
    }

    #[test]
    fn test_item_and_boss_filters() {
        let index = CatalogueIndex::from_records(vec![
            project(raw(json!({"name": "a", "itemName": "薬草", "excludeBoss": true}))),
            project(raw(json!({"name": "b", "itemName": "薬草"}))),
            project(raw(json!({"name": "c", "itemName": "鉄鉱石", "excludeBoss": "true"}))),
        ]);

        let filter = TaskFilter {
            item: Some("薬草".to_string()),
            no_boss: true,
            ..Default::default()
        };
        assert_eq!(names(&index, &filter), vec!["a"]);
    }

    #[test]
    fn test_empty_item_means_no_item_filter() {
        let index = CatalogueIndex::from_records(vec![
            project(raw(json!({"name": "a", "itemName": "薬草"}))),
            project(raw(json!({"name": "b", "itemName": ""}))),
        ]);
        let filter = TaskFilter {
            item: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(names(&index, &filter), vec!["a", "b"]);
    }

    #[test]
    fn test_non_object_map_is_absent() {
        let projected = project(raw(json!({"name": "odd", "map": "12"})));
        assert_eq!(projected.rank, None);
        assert_eq!(projected.max_level, None);
    }

    #[test]
    fn test_time_slot_display_matches_value_names() {
        for slot in TimeSlot::value_variants() {
            let parsed = TimeSlot::from_str(&slot.to_string(), false).unwrap();
            assert_eq!(parsed, *slot);
        }
    }
}
