//! Dashboard figures derived from the current store and ledger.

use serde::{Deserialize, Serialize};

use gudang_core::ItemId;

use crate::ledger::{Ledger, MovementKind};
use crate::store::ItemStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockItem {
    pub item_id: ItemId,
    pub sku: String,
    pub name: String,
    pub stock: i64,
    pub min_stock: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub item_count: usize,
    /// Sum of stock across all items (negative balances included). Wider
    /// than a single balance so any set of stored items can be totalled.
    pub total_stock: i128,
    /// Items at or below their minimum, in store order.
    pub low_stock: Vec<LowStockItem>,
    pub inbound_transactions: usize,
    pub outbound_transactions: usize,
}

impl InventorySummary {
    pub fn compute(store: &ItemStore, ledger: &Ledger) -> Self {
        let low_stock = store
            .list()
            .filter(|i| i.is_low_stock())
            .map(|i| LowStockItem {
                item_id: i.id,
                sku: i.sku.clone(),
                name: i.name.clone(),
                stock: i.stock,
                min_stock: i.min_stock,
            })
            .collect();

        let count = |kind: MovementKind| ledger.transactions().iter().filter(|t| t.kind == kind).count();

        Self {
            item_count: store.len(),
            total_stock: store.list().map(|i| i128::from(i.stock)).sum(),
            low_stock,
            inbound_transactions: count(MovementKind::In),
            outbound_transactions: count(MovementKind::Out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::ledger::PostTransaction;
    use chrono::{TimeZone, Utc};

    #[test]
    fn counts_low_stock_and_movements() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut store = ItemStore::new();
        let chair = Item::new("FURN-001", "Kursi Ergonomis", now).with_stock(3).with_min_stock(5);
        let paper = Item::new("ATK-001", "Kertas", now).with_stock(120).with_min_stock(20);
        let chair_id = chair.id;
        let paper_id = paper.id;
        store.insert(chair).unwrap();
        store.insert(paper).unwrap();

        let mut ledger = Ledger::new();
        ledger.post_transaction(&mut store, PostTransaction::inbound(paper_id, 5), now).unwrap();
        ledger.post_transaction(&mut store, PostTransaction::outbound(paper_id, 1), now).unwrap();
        ledger.post_transaction(&mut store, PostTransaction::outbound(chair_id, 1), now).unwrap();

        let summary = InventorySummary::compute(&store, &ledger);
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.total_stock, 2 + 124);
        assert_eq!(summary.low_stock.len(), 1);
        assert_eq!(summary.low_stock[0].sku, "FURN-001");
        assert_eq!(summary.inbound_transactions, 1);
        assert_eq!(summary.outbound_transactions, 2);
    }

    #[test]
    fn total_stock_does_not_overflow_on_extreme_balances() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut store = ItemStore::new();
        store.insert(Item::new("A", "A", now).with_stock(i64::MAX)).unwrap();
        store.insert(Item::new("B", "B", now).with_stock(1)).unwrap();

        let summary = InventorySummary::compute(&store, &Ledger::new());
        assert_eq!(summary.total_stock, i128::from(i64::MAX) + 1);
    }

    #[test]
    fn empty_warehouse_has_zero_summary() {
        let summary = InventorySummary::compute(&ItemStore::new(), &Ledger::new());
        assert_eq!(summary, InventorySummary::default());
    }
}
