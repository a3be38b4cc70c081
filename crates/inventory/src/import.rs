//! Import reconciler: bulk upsert of externally sourced item rows.
//!
//! Imported values are treated as ground truth. They go straight into the
//! store and leave no transaction or opname behind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use gudang_core::ItemId;

use crate::item::{
    DEFAULT_CATEGORY, DEFAULT_MIN_STOCK, DEFAULT_NAME, DEFAULT_STOCK, DEFAULT_UNIT, Item,
};
use crate::store::{ItemStore, UpsertOutcome};

const SKU_KEYS: &[&str] = &["PLU", "plu", "SKU", "sku"];
const NAME_KEYS: &[&str] = &["Nama", "Name", "nama", "name"];
const CATEGORY_KEYS: &[&str] = &["Kategori", "Category", "kategori", "category"];
const STOCK_KEYS: &[&str] = &["Stok", "Stock", "stok", "stock"];
const UNIT_KEYS: &[&str] = &["Unit", "Satuan", "unit"];
const MIN_STOCK_KEYS: &[&str] = &["MinimalStok", "MinStock", "min", "minStock"];

/// One externally supplied item record.
///
/// Every field is optional. Absent (or blank) fields keep the existing value
/// on update and fall back to the item defaults on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemCandidate {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub stock: Option<i64>,
    pub unit: Option<String>,
    pub min_stock: Option<i64>,
}

impl ItemCandidate {
    pub fn new(sku: impl Into<String>) -> Self {
        Self {
            sku: Some(sku.into().trim().to_string()),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn min_stock(mut self, min_stock: i64) -> Self {
        self.min_stock = Some(min_stock);
        self
    }

    /// Build a candidate from a spreadsheet-style row.
    ///
    /// Header aliases follow the import template (`PLU`, `Nama`, `Kategori`,
    /// `Stok`, `Unit`/`Satuan`, `MinimalStok`) as well as the English and
    /// lowercase variants. Numbers may arrive as JSON numbers or numeric text.
    pub fn from_row(row: &Map<String, Value>) -> Self {
        Self {
            sku: text_field(row, SKU_KEYS),
            name: text_field(row, NAME_KEYS),
            category: text_field(row, CATEGORY_KEYS),
            stock: int_field(row, STOCK_KEYS),
            unit: text_field(row, UNIT_KEYS),
            min_stock: int_field(row, MIN_STOCK_KEYS),
        }
    }

    /// Has both a SKU and a name.
    pub fn is_usable(&self) -> bool {
        self.sku_value().is_some() && present(&self.name).is_some()
    }

    pub(crate) fn sku_value(&self) -> Option<&str> {
        present(&self.sku)
    }

    pub(crate) fn merge_into(&self, item: &mut Item, now: DateTime<Utc>) {
        if let Some(name) = present(&self.name) {
            item.name = name.to_string();
        }
        if let Some(category) = present(&self.category) {
            item.category = category.to_string();
        }
        if let Some(unit) = present(&self.unit) {
            item.unit = unit.to_string();
        }
        if let Some(stock) = self.stock {
            item.stock = stock;
        }
        if let Some(min_stock) = self.min_stock {
            item.min_stock = min_stock;
        }
        item.last_updated = now;
    }

    pub(crate) fn into_new_item(self, id: ItemId, now: DateTime<Utc>) -> Item {
        let sku = match self.sku_value() {
            Some(sku) => sku.to_string(),
            None => fallback_sku(&id),
        };
        Item {
            id,
            sku,
            name: present(&self.name).unwrap_or(DEFAULT_NAME).to_string(),
            category: present(&self.category).unwrap_or(DEFAULT_CATEGORY).to_string(),
            stock: self.stock.unwrap_or(DEFAULT_STOCK),
            unit: present(&self.unit).unwrap_or(DEFAULT_UNIT).to_string(),
            min_stock: self.min_stock.unwrap_or(DEFAULT_MIN_STOCK),
            last_updated: now,
        }
    }
}

/// Outcome counts of one import batch.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub added: usize,
    pub updated: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.added + self.updated
    }
}

/// Rows split into usable candidates and a count of rejected ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowNormalization {
    pub candidates: Vec<ItemCandidate>,
    pub rejected: usize,
}

/// Normalize raw rows, dropping anything that is not an object or lacks a SKU
/// or name.
pub fn candidates_from_rows(rows: &[Value]) -> RowNormalization {
    let mut out = RowNormalization::default();
    for row in rows {
        let candidate = match row.as_object() {
            Some(map) => ItemCandidate::from_row(map),
            None => {
                out.rejected += 1;
                continue;
            }
        };
        if candidate.is_usable() {
            out.candidates.push(candidate);
        } else {
            out.rejected += 1;
        }
    }
    out
}

/// Upsert every candidate by SKU, in input order.
///
/// Duplicate SKUs inside one batch collapse onto a single item (last wins;
/// the later rows count as updates).
pub fn import_items(
    store: &mut ItemStore,
    candidates: impl IntoIterator<Item = ItemCandidate>,
    now: DateTime<Utc>,
) -> ImportSummary {
    let mut summary = ImportSummary::default();
    for candidate in candidates {
        match store.upsert_by_sku(candidate, now) {
            UpsertOutcome::Created(id) => {
                tracing::debug!(item_id = %id, "import created item");
                summary.added += 1;
            }
            UpsertOutcome::Updated(id) => {
                tracing::debug!(item_id = %id, "import updated item");
                summary.updated += 1;
            }
        }
    }
    tracing::info!(added = summary.added, updated = summary.updated, "import finished");
    summary
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

pub(crate) fn fallback_sku(id: &ItemId) -> String {
    let hex = id.as_uuid().simple().to_string();
    format!("SKU-{}", hex[hex.len() - 12..].to_uppercase())
}

fn first_value<'a>(row: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| row.get(*k))
        .find(|v| match v {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
}

fn text_field(row: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    match first_value(row, keys)? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn int_field(row: &Map<String, Value>, keys: &[&str]) -> Option<i64> {
    match first_value(row, keys)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

fn integral(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 {
        Some(f as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 7, 0, 0).unwrap()
    }

    fn row(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn template_headers_are_recognised() {
        let c = ItemCandidate::from_row(&row(json!({
            "PLU": "CONTOH-001",
            "Nama": "Nama Barang Contoh",
            "Kategori": "Umum",
            "Stok": 10,
            "Unit": "Pcs",
            "MinimalStok": 5
        })));
        assert_eq!(
            c,
            ItemCandidate::new("CONTOH-001")
                .name("Nama Barang Contoh")
                .category("Umum")
                .stock(10)
                .unit("Pcs")
                .min_stock(5)
        );
    }

    #[test]
    fn numeric_text_and_numeric_sku_are_coerced() {
        let c = ItemCandidate::from_row(&row(json!({
            "sku": 12345,
            "Name": "  Lem Kayu ",
            "Stock": " 7 ",
            "Satuan": "Botol",
            "MinStock": 2.0
        })));
        assert_eq!(c.sku.as_deref(), Some("12345"));
        assert_eq!(c.name.as_deref(), Some("Lem Kayu"));
        assert_eq!(c.stock, Some(7));
        assert_eq!(c.unit.as_deref(), Some("Botol"));
        assert_eq!(c.min_stock, Some(2));
    }

    #[test]
    fn unparseable_stock_is_treated_as_absent() {
        let c = ItemCandidate::from_row(&row(json!({ "sku": "A", "name": "A", "stok": "banyak" })));
        assert_eq!(c.stock, None);
        let c = ItemCandidate::from_row(&row(json!({ "sku": "A", "name": "A", "stok": 2.5 })));
        assert_eq!(c.stock, None);
    }

    #[test]
    fn rows_without_sku_or_name_are_rejected() {
        let rows = vec![
            json!({ "PLU": "A-1", "Nama": "Satu" }),
            json!({ "PLU": "A-2" }),
            json!({ "Nama": "Tanpa Kode" }),
            json!({ "PLU": "   ", "Nama": "Kosong" }),
            json!(["not", "an", "object"]),
        ];
        let out = candidates_from_rows(&rows);
        assert_eq!(out.candidates.len(), 1);
        assert_eq!(out.rejected, 4);
        assert_eq!(out.candidates[0].sku.as_deref(), Some("A-1"));
    }

    #[test]
    fn canonical_keys_deserialize_directly() {
        let c: ItemCandidate =
            serde_json::from_value(json!({ "sku": "B-1", "name": "Dus", "minStock": 3 })).unwrap();
        assert_eq!(c, ItemCandidate::new("B-1").name("Dus").min_stock(3));
    }

    #[test]
    fn update_preserves_stock_when_row_has_none() {
        let mut store = ItemStore::new();
        store
            .insert(Item::new("ELEC-002", "Mouse Wireless", t0()).with_stock(42))
            .unwrap();

        let summary = import_items(
            &mut store,
            vec![ItemCandidate::new("ELEC-002").unit("Box")],
            t0(),
        );

        assert_eq!(summary, ImportSummary { added: 0, updated: 1 });
        let item = store.get_by_sku("ELEC-002").unwrap();
        assert_eq!(item.stock, 42);
        assert_eq!(item.unit, "Box");
        assert_eq!(item.name, "Mouse Wireless");
    }

    #[test]
    fn update_overwrites_stock_when_supplied() {
        let mut store = ItemStore::new();
        store.insert(Item::new("ATK-001", "Kertas", t0()).with_stock(120)).unwrap();
        import_items(&mut store, vec![ItemCandidate::new("ATK-001").stock(0)], t0());
        assert_eq!(store.get_by_sku("ATK-001").unwrap().stock, 0);
    }

    #[test]
    fn candidate_without_sku_gets_a_generated_one() {
        let mut store = ItemStore::new();
        let summary = import_items(&mut store, vec![ItemCandidate::default()], t0());
        assert_eq!(summary.added, 1);
        let item = store.list().next().unwrap();
        assert!(item.sku.starts_with("SKU-"));
        assert_eq!(item.name, "Barang Baru");
    }

    #[test]
    fn duplicate_skus_in_one_batch_collapse_last_wins() {
        let mut store = ItemStore::new();
        let summary = import_items(
            &mut store,
            vec![
                ItemCandidate::new("D-1").name("Pertama").stock(1),
                ItemCandidate::new("D-1").name("Kedua").stock(2),
            ],
            t0(),
        );
        assert_eq!(summary, ImportSummary { added: 1, updated: 1 });
        assert_eq!(store.len(), 1);
        let item = store.get_by_sku("D-1").unwrap();
        assert_eq!(item.name, "Kedua");
        assert_eq!(item.stock, 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the store grows by exactly the number of distinct SKUs it
        /// did not already hold, and never holds a SKU twice.
        #[test]
        fn import_grows_store_by_new_distinct_skus(
            existing in prop::collection::hash_set(0u8..20, 0..10),
            incoming in prop::collection::vec((0u8..30, -50i64..500), 0..40),
        ) {
            let mut store = ItemStore::new();
            for n in &existing {
                store.insert(Item::new(format!("SKU-{n}"), format!("Item {n}"), t0())).unwrap();
            }
            let before = store.len();

            let candidates: Vec<_> = incoming
                .iter()
                .map(|(n, stock)| ItemCandidate::new(format!("SKU-{n}")).name("x").stock(*stock))
                .collect();
            let summary = import_items(&mut store, candidates, t0());

            let distinct_new: HashSet<_> = incoming
                .iter()
                .map(|(n, _)| *n)
                .filter(|n| !existing.contains(n))
                .collect();

            prop_assert_eq!(summary.total(), incoming.len());
            prop_assert_eq!(summary.added, distinct_new.len());
            prop_assert_eq!(store.len(), before + distinct_new.len());

            let skus: HashSet<_> = store.list().map(|i| i.sku.clone()).collect();
            prop_assert_eq!(skus.len(), store.len());

            // Last row per SKU wins.
            for (n, _) in &incoming {
                let last = incoming.iter().rev().find(|(m, _)| m == n).map(|(_, s)| *s);
                prop_assert_eq!(store.get_by_sku(&format!("SKU-{n}")).map(|i| i.stock), last);
            }
        }
    }
}
