//! Entity store: the authoritative set of items, keyed by id, with a SKU index.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use gudang_core::{DomainError, DomainResult, ItemId};

use crate::import::{ItemCandidate, fallback_sku};
use crate::item::Item;

/// Result of [`ItemStore::upsert_by_sku`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created(ItemId),
    Updated(ItemId),
}

impl UpsertOutcome {
    pub fn item_id(&self) -> ItemId {
        match self {
            UpsertOutcome::Created(id) | UpsertOutcome::Updated(id) => *id,
        }
    }
}

/// In-memory item store.
///
/// Invariants:
/// - every SKU maps to exactly one item
/// - `order` lists every stored id once, in insertion order
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: HashMap<ItemId, Item>,
    order: Vec<ItemId>,
    sku_index: HashMap<String, ItemId>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.contains_key(id)
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn require(&self, id: &ItemId) -> DomainResult<&Item> {
        self.items.get(id).ok_or_else(|| DomainError::not_found::<Item>(id))
    }

    pub fn get_by_sku(&self, sku: &str) -> Option<&Item> {
        self.sku_index.get(sku).and_then(|id| self.items.get(id))
    }

    /// Items in insertion order.
    pub fn list(&self) -> impl Iterator<Item = &Item> + '_ {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    /// Insert a fully-formed item (seed data, fixtures).
    pub fn insert(&mut self, item: Item) -> DomainResult<()> {
        if self.items.contains_key(&item.id) {
            return Err(DomainError::conflict(format!("item id {} already exists", item.id)));
        }
        if self.sku_index.contains_key(&item.sku) {
            return Err(DomainError::conflict(format!("sku {} already exists", item.sku)));
        }
        self.index(item);
        Ok(())
    }

    /// Merge into the item sharing the candidate's SKU, or create a new one.
    pub fn upsert_by_sku(&mut self, candidate: ItemCandidate, now: DateTime<Utc>) -> UpsertOutcome {
        let existing = candidate
            .sku_value()
            .and_then(|sku| self.sku_index.get(sku).copied());

        if let Some(id) = existing {
            if let Some(item) = self.items.get_mut(&id) {
                candidate.merge_into(item, now);
            }
            return UpsertOutcome::Updated(id);
        }

        let id = match candidate.sku_value() {
            Some(_) => ItemId::new(),
            None => self.id_with_free_fallback_sku(ItemId::new()),
        };
        let item = candidate.into_new_item(id, now);
        self.index(item);
        UpsertOutcome::Created(id)
    }

    /// `stock += delta`. No lower bound is enforced.
    pub(crate) fn adjust_stock(
        &mut self,
        id: &ItemId,
        delta: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<&Item> {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found::<Item>(id))?;
        let stock = item
            .stock
            .checked_add(delta)
            .ok_or_else(|| DomainError::validation("stock adjustment overflows"))?;
        item.stock = stock;
        item.last_updated = now;
        Ok(item)
    }

    pub(crate) fn set_stock(
        &mut self,
        id: &ItemId,
        stock: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<&Item> {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found::<Item>(id))?;
        item.stock = stock;
        item.last_updated = now;
        Ok(item)
    }

    /// Delete an item. History records that reference it are not touched.
    pub fn remove(&mut self, id: &ItemId) -> DomainResult<Item> {
        let item = self
            .items
            .remove(id)
            .ok_or_else(|| DomainError::not_found::<Item>(id))?;
        self.order.retain(|o| o != id);
        self.sku_index.remove(&item.sku);
        Ok(item)
    }

    /// `id`, or a fresh one, such that the SKU generated from it is unused.
    fn id_with_free_fallback_sku(&self, mut id: ItemId) -> ItemId {
        while self.sku_index.contains_key(&fallback_sku(&id)) {
            tracing::warn!(item_id = %id, "generated sku already taken");
            id = ItemId::new();
        }
        id
    }

    fn index(&mut self, item: Item) {
        self.sku_index.insert(item.sku.clone(), item.id);
        self.order.push(item.id);
        self.items.insert(item.id, item);
    }
}
