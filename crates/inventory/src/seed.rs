//! Demo data for a fresh session.

use chrono::{DateTime, Duration, Utc};

use gudang_core::TransactionId;

use crate::item::Item;
use crate::ledger::{MovementKind, Transaction};

/// The five demo items.
pub fn demo_items(now: DateTime<Utc>) -> Vec<Item> {
    vec![
        Item::new("ELEC-001", "Laptop Gaming X1", now)
            .with_category("Elektronik")
            .with_stock(15)
            .with_unit("Unit")
            .with_min_stock(5),
        Item::new("ELEC-002", "Mouse Wireless", now)
            .with_category("Aksesoris")
            .with_stock(42)
            .with_unit("Pcs")
            .with_min_stock(10),
        Item::new("FURN-001", "Kursi Ergonomis", now)
            .with_category("Furniture")
            .with_stock(3)
            .with_unit("Unit")
            .with_min_stock(5),
        Item::new("ATK-001", "Kertas A4 Rim", now)
            .with_category("ATK")
            .with_stock(120)
            .with_unit("Rim")
            .with_min_stock(20),
        Item::new("ELEC-003", "Monitor 24 Inch", now)
            .with_category("Elektronik")
            .with_stock(8)
            .with_unit("Unit")
            .with_min_stock(5),
    ]
}

/// Historical movements for the demo items, newest first.
///
/// Their effect is already included in the demo stock values.
pub fn demo_transactions(items: &[Item], now: DateTime<Utc>) -> Vec<Transaction> {
    let history = [
        ("ELEC-002", MovementKind::In, 20, Duration::days(1), "Restock mingguan"),
        ("FURN-001", MovementKind::Out, 2, Duration::days(2), "Penggunaan internal"),
    ];

    history
        .into_iter()
        .filter_map(|(sku, kind, quantity, age, notes)| {
            let item = items.iter().find(|i| i.sku == sku)?;
            Some(Transaction {
                id: TransactionId::new(),
                item_id: item.id,
                item_name: item.name.clone(),
                kind,
                quantity,
                date: now - age,
                notes: notes.to_string(),
            })
        })
        .collect()
}
