//! `gudang-ai`
//!
//! **Responsibility:** optional natural-language analysis of the warehouse.
//!
//! This crate is intentionally **not** part of the ledger:
//! - It works on plain snapshots, not on inventory types.
//! - It never mutates state.
//! - Its failures become user-facing text, never ledger errors.

pub mod analyst;
pub mod config;
pub mod generator;
pub mod job;
pub mod prompt;
pub mod result;
pub mod snapshot;

pub use analyst::{EMPTY_RESPONSE_MESSAGE, FAILURE_MESSAGE, InventoryAnalyst, UNAVAILABLE_MESSAGE};
pub use config::AiConfig;
pub use generator::TextGenerator;
#[cfg(feature = "gemini")]
pub use generator::gemini::GeminiClient;
pub use job::{AiJob, InventoryAnalysisJob};
pub use result::{AiError, AiResult};
pub use snapshot::{InventorySnapshot, ItemSnapshot, MovementSnapshot};
