//! `gudang` session runner: seeds a warehouse, applies an optional import,
//! and reports the resulting state.

pub mod config;
pub mod run;
pub mod snapshot;

pub use config::AppConfig;
pub use run::{ImportReport, Report, run};
