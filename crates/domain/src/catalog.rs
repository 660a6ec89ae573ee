//! Catalog records owned by the inventory service.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use common::PartId;
use serde::{Deserialize, Serialize};

use crate::order::Money;

/// Part category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    #[default]
    Unspecified,
    Engine,
    Fuel,
    Porthole,
    Wing,
    Shield,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub name: String,
    pub country: String,
    pub website: String,
}

/// A typed metadata value attached to a part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
}

/// A catalog part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: PartId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub stock_quantity: i64,
    pub category: Category,
    pub dimensions: Option<Dimensions>,
    pub manufacturer: Option<Manufacturer>,
    pub tags: Vec<String>,
    pub metadata: HashMap<String, MetadataValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Part {
    /// Returns the price/existence view used while pricing an order.
    pub fn snapshot(&self) -> PartSnapshot {
        PartSnapshot {
            id: self.id,
            price: self.price,
        }
    }
}

/// Transient price record of a part, used only to price a new order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartSnapshot {
    pub id: PartId,
    pub price: Money,
}

/// Predicate over catalog parts.
///
/// Every non-empty criterion must match. Within a criterion any listed value
/// matches, except `tags`, where the part must carry all of them. An empty
/// filter matches every part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartsFilter {
    #[serde(default)]
    pub ids: Vec<PartId>,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub manufacturer_countries: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PartsFilter {
    /// A filter selecting exactly the given identifiers.
    pub fn by_ids(ids: impl IntoIterator<Item = PartId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn matches(&self, part: &Part) -> bool {
        if !self.ids.is_empty() && !self.ids.contains(&part.id) {
            return false;
        }
        if !self.names.is_empty() && !self.names.contains(&part.name) {
            return false;
        }
        if !self.categories.is_empty() && !self.categories.contains(&part.category) {
            return false;
        }
        if !self.manufacturer_countries.is_empty() {
            match &part.manufacturer {
                Some(m) if self.manufacturer_countries.contains(&m.country) => {}
                _ => return false,
            }
        }
        self.tags.iter().all(|tag| part.tags.contains(tag))
    }
}
