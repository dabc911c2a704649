// Catalog domain model - brewer and beer lookup entries
use crate::domain::telemetry::KegRecord;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub id: i64,
    pub name: String,
}

impl CatalogEntry {
    pub fn new(id: i64, name: String) -> Self {
        Self { id, name }
    }
}

/// Label shown in the tap menu for one keg slot, e.g.
/// "Tap 1: Heady Topper (52.00% remaining)". Slots are 1-based for display.
pub fn tap_menu_label(slot: usize, keg: &KegRecord) -> String {
    format!(
        "Tap {}: {} ({:.2}% remaining)",
        slot + 1,
        keg.beer.name,
        keg.remaining.value * 100.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::telemetry::{Beer, Remaining, SeriesSpec};
    use std::collections::BTreeMap;

    fn keg(name: &str, remaining: f64) -> KegRecord {
        KegRecord {
            id: 1,
            beer: Beer {
                id: 9,
                name: name.to_string(),
                brand: None,
                abv: None,
                ibu: None,
                rating: None,
                attributes: BTreeMap::new(),
            },
            consumption: SeriesSpec::default(),
            remaining: Remaining { value: remaining },
            volume: None,
        }
    }

    #[test]
    fn test_tap_menu_label() {
        let label = tap_menu_label(0, &keg("Heady Topper", 0.52));
        assert_eq!(label, "Tap 1: Heady Topper (52.00% remaining)");

        let label = tap_menu_label(1, &keg("Sip of Sunshine", 1.0));
        assert_eq!(label, "Tap 2: Sip of Sunshine (100.00% remaining)");
    }
}
