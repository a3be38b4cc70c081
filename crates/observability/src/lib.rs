//! Tracing/logging setup shared by binaries.

/// Initialize process-wide logging in the given format. The format is
/// resolved by the caller's configuration (`GUDANG_LOG_FORMAT`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format);
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::LogFormat;
