//! Plain inputs for analysis jobs, decoupled from the inventory crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub sku: String,
    pub name: String,
    pub stock: i64,
    pub unit: String,
    pub min_stock: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementSnapshot {
    pub date: DateTime<Utc>,
    /// Movement label as shown to users (e.g. "MASUK").
    pub kind: String,
    pub quantity: i64,
    pub item_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub items: Vec<ItemSnapshot>,
    /// Newest first.
    pub recent_movements: Vec<MovementSnapshot>,
}
