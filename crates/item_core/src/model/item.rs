//! Item domain model.
//!
//! # Responsibility
//! - Define the persisted item record and its write/search payloads.
//!
//! # Invariants
//! - `id` is `None` until the store assigns it on insert, then never changes.
//! - `price` and `quantity` are non-negative by convention; not enforced here.

use serde::{Deserialize, Serialize};

/// Store-assigned surrogate key.
pub type ItemId = i64;

/// Persisted item record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// `None` before the first save.
    pub id: Option<ItemId>,
    pub item_name: String,
    pub price: i32,
    pub quantity: i32,
}

impl Item {
    /// Creates an unsaved item.
    pub fn new(item_name: impl Into<String>, price: i32, quantity: i32) -> Self {
        Self {
            id: None,
            item_name: item_name.into(),
            price,
            quantity,
        }
    }
}

/// Full replacement values for an existing item.
///
/// Every field is written on update; there is no partial apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdateDto {
    pub item_name: String,
    pub price: i32,
    pub quantity: i32,
}

impl ItemUpdateDto {
    pub fn new(item_name: impl Into<String>, price: i32, quantity: i32) -> Self {
        Self {
            item_name: item_name.into(),
            price,
            quantity,
        }
    }
}

/// Filter for item scans. Absent fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSearchCond {
    /// Substring that `item_name` must contain.
    pub item_name: Option<String>,
    /// Inclusive upper bound on `price`.
    pub max_price: Option<i32>,
}

impl ItemSearchCond {
    pub fn new(item_name: Option<String>, max_price: Option<i32>) -> Self {
        Self {
            item_name,
            max_price,
        }
    }

    /// Returns the name filter when it carries at least one non-whitespace
    /// character. Blank filters count as absent.
    pub fn item_name_filter(&self) -> Option<&str> {
        self.item_name
            .as_deref()
            .filter(|name| name.chars().any(|ch| !ch.is_whitespace()))
    }
}
