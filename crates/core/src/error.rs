//! Domain error model.

use thiserror::Error;

use crate::entity::Entity;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation, missing
/// records, key conflicts). Every failing operation leaves state untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. non-positive quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// An item, transaction or opname id did not resolve.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A uniqueness constraint would be broken (duplicate SKU or id).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Missing record of entity type `E`.
    pub fn not_found<E: Entity>(id: &E::Id) -> Self
    where
        E::Id: core::fmt::Display,
    {
        Self::NotFound {
            entity: E::KIND,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget {
        id: u32,
    }

    impl Entity for Widget {
        type Id = u32;
        const KIND: &'static str = "widget";

        fn id(&self) -> &Self::Id {
            &self.id
        }
    }

    #[test]
    fn not_found_carries_entity_kind_and_id() {
        let w = Widget { id: 7 };
        let err = DomainError::not_found::<Widget>(w.id());
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "widget not found: 7");
    }

    #[test]
    fn validation_message_is_prefixed() {
        let err = DomainError::validation("quantity must be positive");
        assert_eq!(err.to_string(), "validation failed: quantity must be positive");
        assert!(!err.is_not_found());
    }
}
