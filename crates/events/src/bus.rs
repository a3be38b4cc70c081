//! Publish/subscribe abstraction (mechanics only).
//!
//! The bus distributes notifications; it is not a store. Ledger state is owned
//! by the controller and is already updated by the time a message is published,
//! so a failed publish never rolls anything back.

use std::sync::Arc;
use std::sync::mpsc::Receiver;

use thiserror::Error;

/// A subscription to a message stream.
///
/// Each subscription gets a copy of every message published after it was
/// created (broadcast semantics). Meant for single-threaded consumption.
///
/// ```ignore
/// let subscription = bus.subscribe();
/// while let Ok(message) = subscription.try_recv() {
///     render_status(&message);
/// }
/// ```
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Drain everything currently queued.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PublishError {
    /// Internal lock poisoning.
    #[error("event bus is poisoned")]
    Poisoned,
}

/// Message bus (pub/sub abstraction).
///
/// Object safe for a fixed message type, so owners can hold
/// `Arc<dyn EventBus<M>>` without knowing the transport.
pub trait EventBus<M>: Send + Sync {
    fn publish(&self, message: M) -> Result<(), PublishError>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    fn publish(&self, message: M) -> Result<(), PublishError> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
