//! Warehouse stock ledger.
//!
//! Items carry a cached stock balance; movements and physical counts are the
//! history that explains it. The [`Warehouse`] controller is the single owner
//! of that state and the only mutation entry point.

pub mod event;
pub mod export;
pub mod import;
pub mod item;
pub mod ledger;
pub mod seed;
pub mod store;
pub mod summary;
pub mod warehouse;

pub use event::{LedgerEvent, Notification, Operation};
pub use export::ItemExportRow;
pub use import::{ImportSummary, ItemCandidate, RowNormalization, candidates_from_rows};
pub use item::Item;
pub use ledger::{
    Ledger, MovementKind, OpnameStatus, PostTransaction, Reconcile, Reversal, StockOpname,
    Transaction,
};
pub use store::{ItemStore, UpsertOutcome};
pub use summary::{InventorySummary, LowStockItem};
pub use warehouse::Warehouse;
