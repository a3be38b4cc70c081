//! Session controller: owns all warehouse state.
//!
//! Views read through `&self` accessors and mutate only through the methods
//! below. Each mutation is all-or-nothing and produces one [`Notification`].

use std::sync::Arc;

use chrono::{DateTime, Utc};

use gudang_core::{Clock, DomainResult, ItemId, OpnameId, SystemClock, TransactionId};
use gudang_events::{Event, EventBus};

use crate::event::{LedgerEvent, Notification, Operation};
use crate::export::{ItemExportRow, export_items};
use crate::import::{ImportSummary, ItemCandidate, import_items};
use crate::item::Item;
use crate::ledger::{Ledger, PostTransaction, Reconcile, Reversal, StockOpname, Transaction};
use crate::seed;
use crate::store::ItemStore;
use crate::summary::InventorySummary;

pub struct Warehouse {
    store: ItemStore,
    ledger: Ledger,
    clock: Arc<dyn Clock>,
    notifications: Option<Arc<dyn EventBus<Notification>>>,
}

impl core::fmt::Debug for Warehouse {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Warehouse")
            .field("items", &self.store.len())
            .field("transactions", &self.ledger.transactions().len())
            .field("opnames", &self.ledger.opnames().len())
            .field("notifications", &self.notifications.is_some())
            .finish()
    }
}

impl Default for Warehouse {
    fn default() -> Self {
        Self::new()
    }
}

impl Warehouse {
    /// Empty warehouse on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: ItemStore::new(),
            ledger: Ledger::new(),
            clock,
            notifications: None,
        }
    }

    /// Warehouse preloaded with the demo items and their movement history.
    pub fn seeded(clock: Arc<dyn Clock>) -> DomainResult<Self> {
        let mut warehouse = Self::with_clock(clock);
        let now = warehouse.clock.now();
        let items = seed::demo_items(now);
        let history = seed::demo_transactions(&items, now);
        for item in items {
            warehouse.store.insert(item)?;
        }
        for transaction in history {
            warehouse.ledger.restore_transaction(transaction);
        }
        Ok(warehouse)
    }

    /// Publish a [`Notification`] for every mutation on `bus`.
    pub fn with_notifications(mut self, bus: Arc<dyn EventBus<Notification>>) -> Self {
        self.notifications = Some(bus);
        self
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.store.list()
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.store.get(id)
    }

    pub fn summary(&self) -> InventorySummary {
        InventorySummary::compute(&self.store, &self.ledger)
    }

    pub fn export(&self) -> Vec<ItemExportRow> {
        export_items(&self.store)
    }

    /// Add a fully-formed item; fails on a duplicate id or SKU.
    pub fn insert_item(&mut self, item: Item) -> DomainResult<()> {
        let now = self.clock.now();
        let added = item.clone();
        let result = self.store.insert(item).map(|()| added);
        self.finish(Operation::InsertItem, now, result, |item| LedgerEvent::ItemAdded {
            item: item.clone(),
            occurred_at: now,
        })
        .map(|_| ())
    }

    pub fn post_transaction(&mut self, cmd: PostTransaction) -> DomainResult<Transaction> {
        let now = self.clock.now();
        let result = self.ledger.post_transaction(&mut self.store, cmd, now);
        let stock = match &result {
            Ok(tx) => self.store.get(&tx.item_id).map(|i| i.stock).unwrap_or_default(),
            Err(_) => 0,
        };
        self.finish(Operation::PostTransaction, now, result, |tx| {
            LedgerEvent::TransactionPosted {
                transaction: tx.clone(),
                item_stock: stock,
                occurred_at: now,
            }
        })
    }

    pub fn reverse_transaction(&mut self, id: &TransactionId) -> DomainResult<Reversal<Transaction>> {
        let now = self.clock.now();
        let result = self.ledger.reverse_transaction(&mut self.store, id, now);
        self.finish(Operation::ReverseTransaction, now, result, |r| {
            LedgerEvent::TransactionReversed {
                transaction: r.record.clone(),
                item_stock: r.item_stock,
                occurred_at: now,
            }
        })
    }

    pub fn reconcile(&mut self, cmd: Reconcile) -> DomainResult<StockOpname> {
        let now = self.clock.now();
        let result = self.ledger.reconcile(&mut self.store, cmd, now);
        self.finish(Operation::Reconcile, now, result, |opname| {
            LedgerEvent::StockReconciled {
                opname: opname.clone(),
                occurred_at: now,
            }
        })
    }

    pub fn reverse_reconcile(&mut self, id: &OpnameId) -> DomainResult<Reversal<StockOpname>> {
        let now = self.clock.now();
        let result = self.ledger.reverse_reconcile(&mut self.store, id, now);
        self.finish(Operation::ReverseReconcile, now, result, |r| {
            LedgerEvent::ReconciliationReversed {
                opname: r.record.clone(),
                item_stock: r.item_stock,
                occurred_at: now,
            }
        })
    }

    /// Upsert a batch of candidates by SKU. Bypasses the ledger.
    pub fn import_items(&mut self, candidates: impl IntoIterator<Item = ItemCandidate>) -> ImportSummary {
        let now = self.clock.now();
        let summary = import_items(&mut self.store, candidates, now);
        let result: DomainResult<ImportSummary> = Ok(summary);
        self.finish(Operation::ImportItems, now, result, |s| LedgerEvent::ItemsImported {
            summary: *s,
            occurred_at: now,
        })
        .unwrap_or(summary)
    }

    /// Delete an item. Its transactions and opnames stay in the ledger.
    pub fn remove_item(&mut self, id: &ItemId) -> DomainResult<Item> {
        let now = self.clock.now();
        let result = self.store.remove(id);
        self.finish(Operation::RemoveItem, now, result, |item| LedgerEvent::ItemRemoved {
            item: item.clone(),
            occurred_at: now,
        })
    }

    fn finish<T>(
        &self,
        operation: Operation,
        now: DateTime<Utc>,
        result: DomainResult<T>,
        event: impl FnOnce(&T) -> LedgerEvent,
    ) -> DomainResult<T> {
        let notification = match &result {
            Ok(value) => {
                let event = event(value);
                tracing::info!(
                    operation = operation.as_str(),
                    event_type = event.event_type(),
                    occurred_at = %event.occurred_at(),
                    "operation applied"
                );
                Notification::Applied(event)
            }
            Err(error) => {
                tracing::warn!(operation = operation.as_str(), %error, "operation rejected");
                Notification::Rejected {
                    operation,
                    error: error.clone(),
                    occurred_at: now,
                }
            }
        };

        if let Some(bus) = &self.notifications {
            if let Err(error) = bus.publish(notification) {
                tracing::warn!(operation = operation.as_str(), %error, "failed to publish notification");
            }
        }

        result
    }
}
