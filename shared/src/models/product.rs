//! Product catalogue models

use serde::{Deserialize, Serialize};

/// Category assigned when the remote catalogue leaves it blank
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// A stocked product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub category: String,
    pub name: String,
    /// Units per case, always at least 1
    pub case_size: u32,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        name: impl Into<String>,
        case_size: u32,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            name: name.into(),
            case_size: case_size.max(1),
        }
    }
}

/// Products sharing a category, in catalogue order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub products: Vec<&'a Product>,
}

/// Group products by category, keeping first-appearance order of categories
pub fn group_by_category(products: &[Product]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
    for product in products {
        match groups.iter_mut().find(|g| g.category == product.category) {
            Some(group) => group.products.push(product),
            None => groups.push(CategoryGroup {
                category: &product.category,
                products: vec![product],
            }),
        }
    }
    groups
}
