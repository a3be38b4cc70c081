//! Seam to a third-party text-generation service.

use crate::result::AiError;

/// Sends a prompt to a language model.
///
/// `Ok(None)` means the service answered but produced no text.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, model: &str, prompt: &str) -> Result<Option<String>, AiError>;
}

impl<G: TextGenerator + ?Sized> TextGenerator for Box<G> {
    fn generate(&self, model: &str, prompt: &str) -> Result<Option<String>, AiError> {
        (**self).generate(model, prompt)
    }
}

#[cfg(feature = "gemini")]
pub mod gemini {
    //! Google Generative Language API (`generateContent`), blocking.

    use serde::{Deserialize, Serialize};

    use super::TextGenerator;
    use crate::config::AiConfig;
    use crate::result::AiError;

    #[derive(Debug, Serialize)]
    struct GenerateRequest<'a> {
        contents: Vec<Content<'a>>,
    }

    #[derive(Debug, Serialize)]
    struct Content<'a> {
        parts: Vec<Part<'a>>,
    }

    #[derive(Debug, Serialize)]
    struct Part<'a> {
        text: &'a str,
    }

    #[derive(Debug, Default, Deserialize)]
    struct GenerateResponse {
        #[serde(default)]
        candidates: Vec<Candidate>,
    }

    #[derive(Debug, Default, Deserialize)]
    struct Candidate {
        #[serde(default)]
        content: Option<CandidateContent>,
    }

    #[derive(Debug, Default, Deserialize)]
    struct CandidateContent {
        #[serde(default)]
        parts: Vec<CandidatePart>,
    }

    #[derive(Debug, Default, Deserialize)]
    struct CandidatePart {
        #[serde(default)]
        text: Option<String>,
    }

    pub struct GeminiClient {
        http: reqwest::blocking::Client,
        endpoint: String,
        api_key: String,
    }

    impl core::fmt::Debug for GeminiClient {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.debug_struct("GeminiClient").field("endpoint", &self.endpoint).finish()
        }
    }

    impl GeminiClient {
        /// `None` when the config carries no credential.
        pub fn from_config(config: &AiConfig) -> Result<Option<Self>, AiError> {
            let Some(api_key) = config.api_key.clone() else {
                return Ok(None);
            };
            let http = reqwest::blocking::Client::builder()
                .timeout(config.timeout)
                .build()
                .map_err(|e| AiError::Internal(format!("http client: {e}")))?;
            Ok(Some(Self {
                http,
                endpoint: config.endpoint.trim_end_matches('/').to_string(),
                api_key,
            }))
        }
    }

    impl TextGenerator for GeminiClient {
        fn generate(&self, model: &str, prompt: &str) -> Result<Option<String>, AiError> {
            let url = format!("{}/models/{}:generateContent", self.endpoint, model);
            let body = GenerateRequest {
                contents: vec![Content {
                    parts: vec![Part { text: prompt }],
                }],
            };

            let response = self
                .http
                .post(url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .map_err(|e| AiError::InferenceFailed(e.to_string()))?
                .error_for_status()
                .map_err(|e| AiError::InferenceFailed(e.to_string()))?;

            let parsed: GenerateResponse = response
                .json()
                .map_err(|e| AiError::Internal(format!("decode response: {e}")))?;

            let text: String = parsed
                .candidates
                .into_iter()
                .next()
                .and_then(|c| c.content)
                .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
                .unwrap_or_default();

            Ok(if text.trim().is_empty() { None } else { Some(text) })
        }
    }
}
