//! Item entity type - consumables and materials with coin prices

use serde::{Deserialize, Serialize};

use crate::core::flag;
use crate::core::pipeline::Query;
use crate::core::record::Record;

/// Catalogue endpoint for items
pub const ENDPOINT: &str = "items";

/// An item record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, deserialize_with = "flag::name")]
    pub name: String,

    #[serde(default, deserialize_with = "flag::text")]
    pub dlc_name: Option<String>,

    #[serde(default, deserialize_with = "flag::int")]
    pub copper: Option<i64>,
    #[serde(default, deserialize_with = "flag::int")]
    pub silver: Option<i64>,
    #[serde(default, deserialize_with = "flag::int")]
    pub gold: Option<i64>,
    #[serde(default, deserialize_with = "flag::int")]
    pub shadow: Option<i64>,
    #[serde(default, deserialize_with = "flag::int")]
    pub huang: Option<i64>,
    #[serde(default, deserialize_with = "flag::int")]
    pub normal: Option<i64>,

    /// Currency the item is bought with
    #[serde(default, deserialize_with = "flag::text")]
    pub coin_type: Option<String>,

    #[serde(default, deserialize_with = "flag::text")]
    pub notice: Option<String>,
}

// Items have no crafting chain and keep catalogue order.
impl Record for Item {
    const KIND: &'static str = "item";

    fn name(&self) -> &str {
        &self.name
    }
}

/// List parameters for items
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub coin: Option<String>,
    pub search: Option<String>,
}

impl ItemFilter {
    pub fn query(&self) -> Query<Item> {
        Query::new()
            .equals("coin", self.coin.as_deref(), |i: &Item| i.coin_type.as_deref())
            .contains("search", self.search.as_deref(), |i: &Item| Some(i.name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::index::CatalogueIndex;
    use crate::core::pipeline::apply;
    use serde_json::json;

    fn item(name: &str, coin: &str) -> Item {
        Item {
            name: name.to_string(),
            coin_type: Some(coin.to_string()),
            ..Default::default()
        }
    }

    fn catalogue() -> CatalogueIndex<Item> {
        CatalogueIndex::from_records(vec![
            item("Potion", "copper"),
            item("Ether", "silver"),
            item("Hi-Potion", "silver"),
            item("Elixir", "gold"),
        ])
    }

    fn names(filter: &ItemFilter) -> Vec<String> {
        let index = catalogue();
        apply(&index, &filter.query())
            .into_iter()
            .map(|r| r.record.name.clone())
            .collect()
    }

    #[test]
    fn test_catalogue_order_preserved() {
        assert_eq!(
            names(&ItemFilter::default()),
            vec!["Potion", "Ether", "Hi-Potion", "Elixir"]
        );
    }

    #[test]
    fn test_coin_and_search() {
        let filter = ItemFilter {
            coin: Some("silver".to_string()),
            search: Some("potion".to_string()),
        };
        assert_eq!(names(&filter), vec!["Hi-Potion"]);

        let filter = ItemFilter {
            search: Some("POTION".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&filter), vec!["Potion", "Hi-Potion"]);
    }

    #[test]
    fn test_prices_accept_strings() {
        let item: Item = serde_json::from_value(json!({
            "name": "Potion",
            "copper": "30",
            "silver": "",
            "coinType": "copper"
        }))
        .unwrap();
        assert_eq!(item.copper, Some(30));
        assert_eq!(item.silver, None);
        assert!(item.base().is_none());
    }
}
