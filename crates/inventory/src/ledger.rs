//! Ledger engine: stock movements and physical-count reconciliations.
//!
//! Stock is never recomputed from history. Every operation applies its own
//! delta (or absolute value, for reconciliation) to the store, so an item's
//! stock is the fold of the retained history in application order.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use gudang_core::{DomainError, DomainResult, Entity, ItemId, OpnameId, TransactionId, local_midnight};

use crate::store::ItemStore;

/// Direction of a stock movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementKind {
    #[serde(rename = "MASUK")]
    In,
    #[serde(rename = "KELUAR")]
    Out,
}

impl MovementKind {
    pub fn label(&self) -> &'static str {
        match self {
            MovementKind::In => "MASUK",
            MovementKind::Out => "KELUAR",
        }
    }

    /// Stock effect of moving `quantity` units in this direction.
    pub fn signed(&self, quantity: i64) -> i64 {
        match self {
            MovementKind::In => quantity,
            MovementKind::Out => -quantity,
        }
    }
}

/// One inbound or outbound movement (immutable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub item_id: ItemId,
    /// Item name at posting time.
    pub item_name: String,
    pub kind: MovementKind,
    /// Always positive.
    pub quantity: i64,
    pub date: DateTime<Utc>,
    pub notes: String,
}

impl Transaction {
    pub fn stock_effect(&self) -> i64 {
        self.kind.signed(self.quantity)
    }
}

impl Entity for Transaction {
    type Id = TransactionId;
    const KIND: &'static str = "transaction";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Reconciliation state. Only `Resolved` is ever produced.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpnameStatus {
    Pending,
    Resolved,
}

/// One physical-count adjustment (immutable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockOpname {
    pub id: OpnameId,
    pub item_id: ItemId,
    /// Item name at count time.
    pub item_name: String,
    pub system_stock: i64,
    pub actual_stock: i64,
    /// `actual_stock - system_stock`.
    pub difference: i64,
    pub date: DateTime<Utc>,
    pub notes: String,
    pub status: OpnameStatus,
}

impl Entity for StockOpname {
    type Id = OpnameId;
    const KIND: &'static str = "opname";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Command: post a movement against an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTransaction {
    pub item_id: ItemId,
    pub kind: MovementKind,
    pub quantity: i64,
    pub notes: String,
    /// Calendar date chosen by the user; interpreted as local midnight.
    /// `None` means "now".
    pub effective_date: Option<NaiveDate>,
}

impl PostTransaction {
    pub fn inbound(item_id: ItemId, quantity: i64) -> Self {
        Self::new(item_id, MovementKind::In, quantity)
    }

    pub fn outbound(item_id: ItemId, quantity: i64) -> Self {
        Self::new(item_id, MovementKind::Out, quantity)
    }

    pub fn new(item_id: ItemId, kind: MovementKind, quantity: i64) -> Self {
        Self {
            item_id,
            kind,
            quantity,
            notes: String::new(),
            effective_date: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.effective_date = Some(date);
        self
    }
}

/// Command: record a physical count for an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconcile {
    pub item_id: ItemId,
    /// Counted quantity. Non-negativity is checked by the input form, not here.
    pub actual_stock: i64,
    pub notes: String,
}

impl Reconcile {
    pub fn new(item_id: ItemId, actual_stock: i64) -> Self {
        Self {
            item_id,
            actual_stock,
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// A removed history record plus the item's stock after the inverse was applied.
///
/// `item_stock` is `None` when the item had already been deleted; in that case
/// only the record was removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reversal<T> {
    pub record: T,
    pub item_stock: Option<i64>,
}

/// Transaction and opname history.
///
/// Transactions are kept newest-first (by posting order, never re-sorted by
/// effective date). Opnames are kept oldest-first.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    opnames: Vec<StockOpname>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Oldest first.
    pub fn opnames(&self) -> &[StockOpname] {
        &self.opnames
    }

    pub fn opnames_newest_first(&self) -> impl Iterator<Item = &StockOpname> + '_ {
        self.opnames.iter().rev()
    }

    pub fn transaction(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == *id)
    }

    pub fn opname(&self, id: &OpnameId) -> Option<&StockOpname> {
        self.opnames.iter().find(|o| o.id == *id)
    }

    pub fn transactions_for<'a>(&'a self, item_id: &'a ItemId) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.transactions.iter().filter(move |t| t.item_id == *item_id)
    }

    pub fn opnames_for<'a>(&'a self, item_id: &'a ItemId) -> impl Iterator<Item = &'a StockOpname> + 'a {
        self.opnames.iter().filter(move |o| o.item_id == *item_id)
    }

    /// Record a movement and apply its stock effect.
    pub fn post_transaction(
        &mut self,
        store: &mut ItemStore,
        cmd: PostTransaction,
        now: DateTime<Utc>,
    ) -> DomainResult<Transaction> {
        if cmd.quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        let item = store.require(&cmd.item_id)?;
        let transaction = Transaction {
            id: TransactionId::new(),
            item_id: item.id,
            item_name: item.name.clone(),
            kind: cmd.kind,
            quantity: cmd.quantity,
            date: cmd.effective_date.map(local_midnight).unwrap_or(now),
            notes: cmd.notes,
        };

        let stock = store
            .adjust_stock(&cmd.item_id, transaction.stock_effect(), now)?
            .stock;
        tracing::debug!(
            transaction_id = %transaction.id,
            item_id = %transaction.item_id,
            delta = transaction.stock_effect(),
            stock,
            "transaction posted"
        );

        self.transactions.insert(0, transaction.clone());
        Ok(transaction)
    }

    /// Cancel one transaction's net contribution and drop it from history.
    pub fn reverse_transaction(
        &mut self,
        store: &mut ItemStore,
        id: &TransactionId,
        now: DateTime<Utc>,
    ) -> DomainResult<Reversal<Transaction>> {
        let index = self
            .transactions
            .iter()
            .position(|t| t.id == *id)
            .ok_or_else(|| DomainError::not_found::<Transaction>(id))?;

        let transaction = &self.transactions[index];
        let item_stock = apply_inverse(store, &transaction.item_id, -transaction.stock_effect(), now)?;

        let record = self.transactions.remove(index);
        tracing::debug!(transaction_id = %record.id, item_id = %record.item_id, ?item_stock, "transaction reversed");
        Ok(Reversal { record, item_stock })
    }

    /// Record a physical count and set stock to the counted value.
    pub fn reconcile(
        &mut self,
        store: &mut ItemStore,
        cmd: Reconcile,
        now: DateTime<Utc>,
    ) -> DomainResult<StockOpname> {
        let item = store.require(&cmd.item_id)?;
        let system_stock = item.stock;
        let difference = cmd
            .actual_stock
            .checked_sub(system_stock)
            .ok_or_else(|| DomainError::validation("stock difference overflows"))?;

        let opname = StockOpname {
            id: OpnameId::new(),
            item_id: item.id,
            item_name: item.name.clone(),
            system_stock,
            actual_stock: cmd.actual_stock,
            difference,
            date: now,
            notes: cmd.notes,
            status: OpnameStatus::Resolved,
        };

        store.set_stock(&cmd.item_id, cmd.actual_stock, now)?;
        tracing::debug!(
            opname_id = %opname.id,
            item_id = %opname.item_id,
            system_stock,
            actual_stock = opname.actual_stock,
            difference,
            "stock reconciled"
        );

        self.opnames.push(opname.clone());
        Ok(opname)
    }

    /// Subtract a reconciliation's recorded difference and drop it from history.
    ///
    /// If other movements happened since the count, the result is the current
    /// stock minus the difference, not the original `system_stock`.
    pub fn reverse_reconcile(
        &mut self,
        store: &mut ItemStore,
        id: &OpnameId,
        now: DateTime<Utc>,
    ) -> DomainResult<Reversal<StockOpname>> {
        let index = self
            .opnames
            .iter()
            .position(|o| o.id == *id)
            .ok_or_else(|| DomainError::not_found::<StockOpname>(id))?;

        let opname = &self.opnames[index];
        let delta = opname
            .difference
            .checked_neg()
            .ok_or_else(|| DomainError::validation("stock difference overflows"))?;
        let item_stock = apply_inverse(store, &opname.item_id, delta, now)?;

        let record = self.opnames.remove(index);
        tracing::debug!(opname_id = %record.id, item_id = %record.item_id, ?item_stock, "reconciliation reversed");
        Ok(Reversal { record, item_stock })
    }

    /// Append pre-existing history without touching stock.
    pub(crate) fn restore_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }
}

/// Apply `delta` if the item still exists. A deleted item makes this a no-op.
fn apply_inverse(
    store: &mut ItemStore,
    item_id: &ItemId,
    delta: i64,
    now: DateTime<Utc>,
) -> DomainResult<Option<i64>> {
    if !store.contains(item_id) {
        tracing::warn!(item_id = %item_id, delta, "item no longer exists; reversal leaves stock untouched");
        return Ok(None);
    }
    Ok(Some(store.adjust_stock(item_id, delta, now)?.stock))
}
