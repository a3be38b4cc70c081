use std::path::PathBuf;

use gudang_ai::AiConfig;
use gudang_observability::LogFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON file holding an array of item rows to import.
    pub import_file: Option<PathBuf>,
    /// Start from the demo items instead of an empty warehouse.
    pub seed: bool,
    pub log_format: LogFormat,
    pub ai: AiConfig,
}

impl AppConfig {
    /// Environment plus an optional positional argument (the import file,
    /// which wins over `GUDANG_IMPORT_FILE`).
    pub fn from_env(import_arg: Option<String>) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), import_arg)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, import_arg: Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let seed = match get("GUDANG_SEED").as_deref() {
            None => true,
            Some(v) => !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"),
        };

        Self {
            import_file: import_arg
                .filter(|a| !a.trim().is_empty())
                .or_else(|| get("GUDANG_IMPORT_FILE"))
                .map(PathBuf::from),
            seed,
            log_format: LogFormat::parse(get("GUDANG_LOG_FORMAT").as_deref()),
            ai: AiConfig::from_lookup(&lookup),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| env.get(k).cloned()
    }

    #[test]
    fn defaults_seed_and_json_logs() {
        let c = AppConfig::from_lookup(lookup(&[]), None);
        assert!(c.seed);
        assert_eq!(c.import_file, None);
        assert_eq!(c.log_format, LogFormat::Json);
        assert!(!c.ai.has_credential());
    }

    #[test]
    fn argument_overrides_env_import_file() {
        let env = [("GUDANG_IMPORT_FILE", "env.json")];
        let c = AppConfig::from_lookup(lookup(&env), Some("arg.json".into()));
        assert_eq!(c.import_file, Some(PathBuf::from("arg.json")));
        let c = AppConfig::from_lookup(lookup(&env), None);
        assert_eq!(c.import_file, Some(PathBuf::from("env.json")));
    }

    #[test]
    fn log_format_comes_from_env() {
        let c = AppConfig::from_lookup(lookup(&[("GUDANG_LOG_FORMAT", "pretty")]), None);
        assert_eq!(c.log_format, LogFormat::Pretty);
        let c = AppConfig::from_lookup(lookup(&[("GUDANG_LOG_FORMAT", " Compact ")]), None);
        assert_eq!(c.log_format, LogFormat::Compact);
    }

    #[test]
    fn seed_can_be_disabled() {
        for off in ["false", "0", "OFF"] {
            let c = AppConfig::from_lookup(lookup(&[("GUDANG_SEED", off)]), None);
            assert!(!c.seed, "{off} should disable seeding");
        }
        let c = AppConfig::from_lookup(lookup(&[("GUDANG_SEED", "true")]), None);
        assert!(c.seed);
    }
}
