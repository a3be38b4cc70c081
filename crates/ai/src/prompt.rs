//! Prompt text for the inventory analysis request.

use crate::snapshot::InventorySnapshot;

/// Build the analysis prompt: current stock per item, then up to
/// `recent_limit` of the newest movements.
pub fn build_prompt(snapshot: &InventorySnapshot, recent_limit: usize) -> String {
    let inventory = snapshot
        .items
        .iter()
        .map(|i| {
            format!(
                "- {} (SKU: {}): Stok {} {} (Min: {})",
                i.name, i.sku, i.stock, i.unit, i.min_stock
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let movements = snapshot
        .recent_movements
        .iter()
        .take(recent_limit)
        .map(|m| {
            format!(
                "- {}: {} {} {}",
                m.date.format("%Y-%m-%d"),
                m.kind,
                m.quantity,
                m.item_name
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Anda adalah asisten ahli manajemen gudang. Analisis data inventaris berikut ini dan berikan ringkasan singkat dalam Bahasa Indonesia.

Data Stok Saat Ini:
{inventory}

Transaksi Terakhir:
{movements}

Tolong berikan:
1. Identifikasi barang yang stoknya kritis (di bawah minimum).
2. Analisis singkat tren pergerakan barang.
3. Rekomendasi tindakan (misal: restock segera, atau kurangi stok mati).

Gunakan format markdown bullet points. Jaga agar tetap ringkas.
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{ItemSnapshot, MovementSnapshot};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn lists_items_and_caps_movements() {
        let base = Utc.with_ymd_and_hms(2024, 9, 30, 15, 0, 0).unwrap();
        let snapshot = InventorySnapshot {
            items: vec![ItemSnapshot {
                sku: "ELEC-001".into(),
                name: "Laptop Gaming X1".into(),
                stock: 15,
                unit: "Unit".into(),
                min_stock: 5,
            }],
            recent_movements: (0..12)
                .map(|n| MovementSnapshot {
                    date: base - Duration::days(n),
                    kind: "MASUK".into(),
                    quantity: n + 1,
                    item_name: "Laptop Gaming X1".into(),
                })
                .collect(),
        };

        let prompt = build_prompt(&snapshot, 10);
        assert!(prompt.contains("- Laptop Gaming X1 (SKU: ELEC-001): Stok 15 Unit (Min: 5)"));
        assert!(prompt.contains("- 2024-09-30: MASUK 1 Laptop Gaming X1"));
        assert!(prompt.contains("MASUK 10 Laptop"));
        assert!(!prompt.contains("MASUK 11 Laptop"));
    }
}
