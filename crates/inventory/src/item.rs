use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gudang_core::{Entity, ItemId};

pub const DEFAULT_NAME: &str = "Barang Baru";
pub const DEFAULT_CATEGORY: &str = "Umum";
pub const DEFAULT_UNIT: &str = "Pcs";
pub const DEFAULT_MIN_STOCK: i64 = 5;
pub const DEFAULT_STOCK: i64 = 0;

/// A stocked product tracked by the warehouse.
///
/// `stock` is a cached running balance maintained by the ledger. It may go
/// negative; shortfalls are corrected by reconciliation, not blocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub stock: i64,
    pub unit: String,
    pub min_stock: i64,
    pub last_updated: DateTime<Utc>,
}

impl Item {
    /// New item with default category, unit and thresholds.
    pub fn new(sku: impl Into<String>, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: ItemId::new(),
            sku: sku.into(),
            name: name.into(),
            category: DEFAULT_CATEGORY.to_string(),
            stock: DEFAULT_STOCK,
            unit: DEFAULT_UNIT.to_string(),
            min_stock: DEFAULT_MIN_STOCK,
            last_updated: now,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_min_stock(mut self, min_stock: i64) -> Self {
        self.min_stock = min_stock;
        self
    }

    /// At or below the minimum-stock threshold.
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }
}

impl Entity for Item {
    type Id = ItemId;
    const KIND: &'static str = "item";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
