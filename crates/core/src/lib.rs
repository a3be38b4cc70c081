//! `gudang-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;

pub use clock::{Clock, FixedClock, SystemClock, local_midnight};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ItemId, OpnameId, TransactionId};
