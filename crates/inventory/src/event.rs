//! Structured outcomes published after each controller operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gudang_core::DomainError;
use gudang_events::Event;

use crate::import::ImportSummary;
use crate::item::Item;
use crate::ledger::{StockOpname, Transaction};

/// Something that changed warehouse state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    TransactionPosted {
        transaction: Transaction,
        item_stock: i64,
        occurred_at: DateTime<Utc>,
    },
    TransactionReversed {
        transaction: Transaction,
        /// `None` when the item was already deleted.
        item_stock: Option<i64>,
        occurred_at: DateTime<Utc>,
    },
    StockReconciled {
        opname: StockOpname,
        occurred_at: DateTime<Utc>,
    },
    ReconciliationReversed {
        opname: StockOpname,
        item_stock: Option<i64>,
        occurred_at: DateTime<Utc>,
    },
    ItemsImported {
        summary: ImportSummary,
        occurred_at: DateTime<Utc>,
    },
    ItemAdded {
        item: Item,
        occurred_at: DateTime<Utc>,
    },
    ItemRemoved {
        item: Item,
        occurred_at: DateTime<Utc>,
    },
}

impl Event for LedgerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            LedgerEvent::TransactionPosted { .. } => "inventory.transaction.posted",
            LedgerEvent::TransactionReversed { .. } => "inventory.transaction.reversed",
            LedgerEvent::StockReconciled { .. } => "inventory.opname.reconciled",
            LedgerEvent::ReconciliationReversed { .. } => "inventory.opname.reversed",
            LedgerEvent::ItemsImported { .. } => "inventory.items.imported",
            LedgerEvent::ItemAdded { .. } => "inventory.item.added",
            LedgerEvent::ItemRemoved { .. } => "inventory.item.removed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            LedgerEvent::TransactionPosted { occurred_at, .. }
            | LedgerEvent::TransactionReversed { occurred_at, .. }
            | LedgerEvent::StockReconciled { occurred_at, .. }
            | LedgerEvent::ReconciliationReversed { occurred_at, .. }
            | LedgerEvent::ItemsImported { occurred_at, .. }
            | LedgerEvent::ItemAdded { occurred_at, .. }
            | LedgerEvent::ItemRemoved { occurred_at, .. } => *occurred_at,
        }
    }
}

/// Controller entry point that produced a notification.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    PostTransaction,
    ReverseTransaction,
    Reconcile,
    ReverseReconcile,
    ImportItems,
    InsertItem,
    RemoveItem,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::PostTransaction => "post_transaction",
            Operation::ReverseTransaction => "reverse_transaction",
            Operation::Reconcile => "reconcile",
            Operation::ReverseReconcile => "reverse_reconcile",
            Operation::ImportItems => "import_items",
            Operation::InsertItem => "insert_item",
            Operation::RemoveItem => "remove_item",
        }
    }
}

/// What the presentation layer turns into a status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Applied(LedgerEvent),
    Rejected {
        operation: Operation,
        error: DomainError,
        occurred_at: DateTime<Utc>,
    },
}
