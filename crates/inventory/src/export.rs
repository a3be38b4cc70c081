//! Read-only tabular projection handed to spreadsheet writers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::item::Item;
use crate::store::ItemStore;

/// One exported item row. Dates stay as timestamps; formatting is the
/// writer's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemExportRow {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub stock: i64,
    pub unit: String,
    pub min_stock: i64,
    pub last_updated: DateTime<Utc>,
}

impl From<&Item> for ItemExportRow {
    fn from(item: &Item) -> Self {
        Self {
            sku: item.sku.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            stock: item.stock,
            unit: item.unit.clone(),
            min_stock: item.min_stock,
            last_updated: item.last_updated,
        }
    }
}

/// Every item, in store order.
pub fn export_items(store: &ItemStore) -> Vec<ItemExportRow> {
    store.list().map(ItemExportRow::from).collect()
}
