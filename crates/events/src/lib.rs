//! Ledger events and the notification transport.
//!
//! The inventory controller publishes a structured message after every
//! mutation; presentation layers subscribe and turn them into status text.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, PublishError, Subscription};
pub use event::Event;
pub use in_memory_bus::InMemoryEventBus;
