//! User-facing analysis entry point with soft failure.

use crate::config::AiConfig;
use crate::generator::TextGenerator;
use crate::job::{AiJob, InventoryAnalysisJob};
use crate::snapshot::InventorySnapshot;

pub const UNAVAILABLE_MESSAGE: &str =
    "API Key tidak ditemukan. Mohon konfigurasi API_KEY untuk menggunakan fitur AI.";
pub const EMPTY_RESPONSE_MESSAGE: &str = "Tidak ada respon dari AI.";
pub const FAILURE_MESSAGE: &str = "Maaf, terjadi kesalahan saat menganalisis data inventaris.";

/// Produces a text summary of the warehouse, or a fixed message when that is
/// not possible. Never returns an error.
pub struct InventoryAnalyst {
    model: String,
    recent_limit: usize,
    generator: Option<Box<dyn TextGenerator>>,
}

impl core::fmt::Debug for InventoryAnalyst {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InventoryAnalyst")
            .field("model", &self.model)
            .field("recent_limit", &self.recent_limit)
            .field("available", &self.is_available())
            .finish()
    }
}

impl InventoryAnalyst {
    /// Analyst backed by the configured service, if a credential is present.
    pub fn from_config(config: &AiConfig) -> Self {
        Self {
            model: config.model.clone(),
            recent_limit: config.recent_limit,
            generator: default_generator(config),
        }
    }

    /// Analyst backed by an explicit generator.
    pub fn with_generator(config: &AiConfig, generator: impl TextGenerator + 'static) -> Self {
        Self {
            model: config.model.clone(),
            recent_limit: config.recent_limit,
            generator: Some(Box::new(generator)),
        }
    }

    pub fn is_available(&self) -> bool {
        self.generator.is_some()
    }

    pub fn analyze(&self, snapshot: InventorySnapshot) -> String {
        let Some(generator) = self.generator.as_deref() else {
            return UNAVAILABLE_MESSAGE.to_string();
        };

        let job = InventoryAnalysisJob::new(generator, &self.model, snapshot)
            .with_recent_limit(self.recent_limit);

        match job.run() {
            Ok(result) => {
                tracing::debug!(metadata = %result.metadata, "inventory analysis completed");
                match result.text {
                    Some(text) if !text.trim().is_empty() => text,
                    _ => EMPTY_RESPONSE_MESSAGE.to_string(),
                }
            }
            Err(error) => {
                tracing::error!(%error, model = %self.model, "inventory analysis failed");
                FAILURE_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(feature = "gemini")]
fn default_generator(config: &AiConfig) -> Option<Box<dyn TextGenerator>> {
    match crate::generator::gemini::GeminiClient::from_config(config) {
        Ok(client) => client.map(|c| Box::new(c) as Box<dyn TextGenerator>),
        Err(error) => {
            tracing::error!(%error, "could not build Gemini client");
            None
        }
    }
}

#[cfg(not(feature = "gemini"))]
fn default_generator(config: &AiConfig) -> Option<Box<dyn TextGenerator>> {
    if config.has_credential() {
        tracing::warn!("built without the `gemini` feature; AI analysis disabled");
    }
    None
}
