use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Output of one AI job.
///
/// An insight for display; it never feeds back into ledger state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiResult {
    /// Generated text, if the model produced any.
    pub text: Option<String>,

    /// Free-form metadata (model name, input sizes, etc).
    pub metadata: JsonValue,
}

impl AiResult {
    pub fn new(text: Option<String>) -> Self {
        Self {
            text,
            metadata: JsonValue::Null,
        }
    }

    pub fn with_metadata(mut self, metadata: JsonValue) -> Self {
        self.metadata = metadata;
        self
    }
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("invalid job input: {0}")]
    InvalidInput(String),

    #[error("inference failed: {0}")]
    InferenceFailed(String),

    #[error("internal error: {0}")]
    Internal(String),
}
