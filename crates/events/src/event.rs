use chrono::{DateTime, Utc};

/// A domain-agnostic event.
///
/// Events are immutable; treat them as facts.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "inventory.transaction.posted").
    fn event_type(&self) -> &'static str;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
