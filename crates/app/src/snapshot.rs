//! Bridge from warehouse state to the analysis input.

use gudang_ai::{InventorySnapshot, ItemSnapshot, MovementSnapshot};
use gudang_inventory::Warehouse;

/// All items plus the `recent_limit` newest transactions.
pub fn inventory_snapshot(warehouse: &Warehouse, recent_limit: usize) -> InventorySnapshot {
    InventorySnapshot {
        items: warehouse
            .items()
            .map(|i| ItemSnapshot {
                sku: i.sku.clone(),
                name: i.name.clone(),
                stock: i.stock,
                unit: i.unit.clone(),
                min_stock: i.min_stock,
            })
            .collect(),
        recent_movements: warehouse
            .ledger()
            .transactions()
            .iter()
            .take(recent_limit)
            .map(|t| MovementSnapshot {
                date: t.date,
                kind: t.kind.label().to_string(),
                quantity: t.quantity,
                item_name: t.item_name.clone(),
            })
            .collect(),
    }
}
