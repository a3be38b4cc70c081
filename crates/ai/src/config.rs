//! Analysis settings, read from the environment.

use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_RECENT_LIMIT: usize = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, PartialEq, Eq)]
pub struct AiConfig {
    /// Credential for the text-generation service. `None` disables analysis.
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    /// How many of the newest movements go into the prompt.
    pub recent_limit: usize,
    pub timeout: Duration,
}

impl core::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("recent_limit", &self.recent_limit)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl AiConfig {
    /// Read `API_KEY` (or `GEMINI_API_KEY`), `GUDANG_AI_MODEL`,
    /// `GUDANG_AI_ENDPOINT`, `GUDANG_AI_RECENT_LIMIT`, `GUDANG_AI_TIMEOUT_SECS`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let api_key = get("API_KEY").or_else(|| get("GEMINI_API_KEY"));
        if api_key.is_none() {
            tracing::warn!("API_KEY not set; AI analysis disabled");
        }

        Self {
            api_key,
            model: get("GUDANG_AI_MODEL").unwrap_or(defaults.model),
            endpoint: get("GUDANG_AI_ENDPOINT").unwrap_or(defaults.endpoint),
            recent_limit: parse_or("GUDANG_AI_RECENT_LIMIT", get("GUDANG_AI_RECENT_LIMIT"), defaults.recent_limit),
            timeout: Duration::from_secs(parse_or(
                "GUDANG_AI_TIMEOUT_SECS",
                get("GUDANG_AI_TIMEOUT_SECS"),
                defaults.timeout.as_secs(),
            )),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

fn parse_or<T: core::str::FromStr + Copy>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "invalid value; using default");
            default
        }),
    }
}
