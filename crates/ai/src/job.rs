use serde_json::json;

use crate::generator::TextGenerator;
use crate::prompt::build_prompt;
use crate::result::{AiError, AiResult};
use crate::snapshot::InventorySnapshot;

/// A unit of AI inference over a read-only input.
pub trait AiJob {
    /// Execute inference. Must not mutate domain state.
    fn run(&self) -> Result<AiResult, AiError>;
}

/// Summarize stock levels and recent movements through a text generator.
pub struct InventoryAnalysisJob<'a> {
    generator: &'a dyn TextGenerator,
    model: &'a str,
    input: InventorySnapshot,
    recent_limit: usize,
}

impl<'a> InventoryAnalysisJob<'a> {
    pub fn new(generator: &'a dyn TextGenerator, model: &'a str, input: InventorySnapshot) -> Self {
        Self {
            generator,
            model,
            input,
            recent_limit: crate::config::DEFAULT_RECENT_LIMIT,
        }
    }

    pub fn with_recent_limit(mut self, recent_limit: usize) -> Self {
        self.recent_limit = recent_limit;
        self
    }
}

impl AiJob for InventoryAnalysisJob<'_> {
    fn run(&self) -> Result<AiResult, AiError> {
        if self.model.trim().is_empty() {
            return Err(AiError::InvalidInput("model name is empty".to_string()));
        }

        let prompt = build_prompt(&self.input, self.recent_limit);
        let text = self.generator.generate(self.model, &prompt)?;

        Ok(AiResult::new(text).with_metadata(json!({
            "kind": "inventory.analysis",
            "model": self.model,
            "items": self.input.items.len(),
            "movements": self.input.recent_movements.len().min(self.recent_limit),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::MovementSnapshot;
    use chrono::{TimeZone, Utc};

    struct Echo;

    impl TextGenerator for Echo {
        fn generate(&self, _model: &str, _prompt: &str) -> Result<Option<String>, AiError> {
            Ok(Some("ok".to_string()))
        }
    }

    #[test]
    fn metadata_describes_the_inputs_sent() {
        let at = Utc.with_ymd_and_hms(2024, 2, 2, 8, 0, 0).unwrap();
        let movement = MovementSnapshot {
            date: at,
            kind: "MASUK".into(),
            quantity: 4,
            item_name: "Mouse Wireless".into(),
        };
        let input = InventorySnapshot {
            items: vec![],
            recent_movements: vec![movement; 5],
        };

        let result = InventoryAnalysisJob::new(&Echo, "gemini-test", input)
            .with_recent_limit(3)
            .run()
            .unwrap();

        assert_eq!(result.text.as_deref(), Some("ok"));
        assert_eq!(result.metadata["model"], "gemini-test");
        assert_eq!(result.metadata["items"], 0);
        assert_eq!(result.metadata["movements"], 3);
    }

    #[test]
    fn blank_model_is_invalid_input() {
        let err = InventoryAnalysisJob::new(&Echo, "  ", InventorySnapshot::default())
            .run()
            .unwrap_err();
        assert!(matches!(err, AiError::InvalidInput(_)));
    }
}
