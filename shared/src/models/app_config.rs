//! Event configuration served by the remote sheet

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{group_by_category, CategoryGroup, Location, Product, Staff, StockItemSubmission};

/// Location name -> product name -> count at the start of the event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct OpeningSnapshot(pub BTreeMap<String, BTreeMap<String, u32>>);

/// Difference between a submitted count and the opening snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variance {
    pub product_name: String,
    pub opening: u32,
    pub counted: u32,
}

impl Variance {
    pub fn delta(&self) -> i64 {
        i64::from(self.counted) - i64::from(self.opening)
    }
}

impl OpeningSnapshot {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn expected(&self, location_name: &str, product_name: &str) -> Option<u32> {
        self.0.get(location_name)?.get(product_name).copied()
    }

    /// Items whose count differs from the snapshot for that location, a
    /// recorded zero included. Products missing from the snapshot are not reported.
    pub fn variances(&self, location_name: &str, items: &[StockItemSubmission]) -> Vec<Variance> {
        let Some(counts) = self.0.get(location_name) else {
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| {
                let opening = *counts.get(item.product_name())?;
                (opening != item.quantity()).then(|| Variance {
                    product_name: item.product_name().to_string(),
                    opening,
                    counted: item.quantity(),
                })
            })
            .collect()
    }
}

/// Everything the form needs for dropdowns and grouping
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub products: Vec<Product>,
    pub locations: Vec<Location>,
    pub staff: Vec<Staff>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_snapshot: Option<OpeningSnapshot>,
}

impl AppConfig {
    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn staff_member(&self, id: &str) -> Option<&Staff> {
        self.staff.iter().find(|s| s.id == id)
    }

    pub fn product_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    pub fn products_by_category(&self) -> Vec<CategoryGroup<'_>> {
        group_by_category(&self.products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> OpeningSnapshot {
        let mut bar = BTreeMap::new();
        bar.insert("Coke 330ml".to_string(), 48);
        bar.insert("RedBull".to_string(), 24);
        let mut map = BTreeMap::new();
        map.insert("Bar 1A".to_string(), bar);
        OpeningSnapshot(map)
    }

    #[test]
    fn test_expected_lookup() {
        let snap = snapshot();
        assert_eq!(snap.expected("Bar 1A", "Coke 330ml"), Some(48));
        assert_eq!(snap.expected("Bar 1A", "Lime Cordial"), None);
        assert_eq!(snap.expected("VIP", "Coke 330ml"), None);
    }

    #[test]
    fn test_variances_only_report_differences() {
        let items = vec![
            StockItemSubmission::new("Coke 330ml", 48),
            StockItemSubmission::new("RedBull", 20),
            StockItemSubmission::new("House Red", 6),
        ];

        let variances = snapshot().variances("Bar 1A", &items);
        assert_eq!(variances.len(), 1);
        assert_eq!(variances[0].product_name, "RedBull");
        assert_eq!(variances[0].delta(), -4);
    }

    #[test]
    fn test_recorded_zero_is_a_variance() {
        let items = vec![StockItemSubmission::new("Coke 330ml", 0)];

        let variances = snapshot().variances("Bar 1A", &items);
        assert_eq!(
            variances,
            vec![Variance {
                product_name: "Coke 330ml".to_string(),
                opening: 48,
                counted: 0,
            }]
        );
        assert_eq!(variances[0].delta(), -48);
    }

    #[test]
    fn test_snapshot_serializes_as_plain_map() {
        let json = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(json["Bar 1A"]["RedBull"], 24);
    }
}
