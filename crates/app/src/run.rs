use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;

use gudang_ai::InventoryAnalyst;
use gudang_core::{Clock, SystemClock};
use gudang_inventory::{InventorySummary, ItemExportRow, Warehouse, candidates_from_rows};

use crate::config::AppConfig;
use crate::snapshot::inventory_snapshot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub added: usize,
    pub updated: usize,
    pub rejected: usize,
}

/// Everything a session produced, ready to print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub import: Option<ImportReport>,
    pub summary: InventorySummary,
    pub items: Vec<ItemExportRow>,
    pub analysis: String,
}

pub fn run(config: &AppConfig) -> anyhow::Result<Report> {
    run_with(config, Arc::new(SystemClock), &InventoryAnalyst::from_config(&config.ai))
}

pub(crate) fn run_with(
    config: &AppConfig,
    clock: Arc<dyn Clock>,
    analyst: &InventoryAnalyst,
) -> anyhow::Result<Report> {
    let mut warehouse = if config.seed {
        Warehouse::seeded(clock).context("failed to load demo data")?
    } else {
        Warehouse::with_clock(clock)
    };

    let import = match &config.import_file {
        Some(path) => Some(import_file(&mut warehouse, path)?),
        None => None,
    };

    let analysis = analyst.analyze(inventory_snapshot(&warehouse, config.ai.recent_limit));

    Ok(Report {
        import,
        summary: warehouse.summary(),
        items: warehouse.export(),
        analysis,
    })
}

fn import_file(warehouse: &mut Warehouse, path: &Path) -> anyhow::Result<ImportReport> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read import file {}", path.display()))?;
    let rows: Vec<Value> = serde_json::from_str(&raw)
        .with_context(|| format!("import file {} is not a JSON array of rows", path.display()))?;

    let normalized = candidates_from_rows(&rows);
    if normalized.rejected > 0 {
        tracing::warn!(rejected = normalized.rejected, "rows without SKU or name were skipped");
    }
    if normalized.candidates.is_empty() {
        anyhow::bail!("import file {} has no usable rows", path.display());
    }

    let summary = warehouse.import_items(normalized.candidates);
    Ok(ImportReport {
        added: summary.added,
        updated: summary.updated,
        rejected: normalized.rejected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use gudang_ai::{AiConfig, AiError, TextGenerator, UNAVAILABLE_MESSAGE};
    use gudang_core::FixedClock;
    use gudang_observability::LogFormat;
    use std::io::Write;

    struct Echo;

    impl TextGenerator for Echo {
        fn generate(&self, _model: &str, prompt: &str) -> Result<Option<String>, AiError> {
            Ok(Some(format!("{} baris", prompt.lines().count())))
        }
    }

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap()))
    }

    fn config(import_file: Option<std::path::PathBuf>, seed: bool) -> AppConfig {
        AppConfig {
            import_file,
            seed,
            log_format: LogFormat::Compact,
            ai: AiConfig::default(),
        }
    }

    #[test]
    fn seeded_run_without_credential_reports_unavailable_analysis() {
        let cfg = config(None, true);
        let report = run_with(&cfg, clock(), &InventoryAnalyst::from_config(&cfg.ai)).unwrap();
        assert_eq!(report.import, None);
        assert_eq!(report.items.len(), 5);
        assert_eq!(report.summary.low_stock.len(), 1);
        assert_eq!(report.analysis, UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn import_file_is_applied_and_counted() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"PLU": "ELEC-001", "Nama": "Laptop Gaming X2", "Stok": 12}},
                {{"PLU": "BARU-01", "Nama": "Rak Besi", "Kategori": "Furniture"}},
                {{"Nama": "tanpa kode"}}
            ]"#
        )
        .unwrap();

        let cfg = config(Some(file.path().to_path_buf()), true);
        let analyst = InventoryAnalyst::with_generator(&cfg.ai, Echo);
        let report = run_with(&cfg, clock(), &analyst).unwrap();

        assert_eq!(
            report.import,
            Some(ImportReport {
                added: 1,
                updated: 1,
                rejected: 1
            })
        );
        assert_eq!(report.items.len(), 6);
        let laptop = report.items.iter().find(|r| r.sku == "ELEC-001").unwrap();
        assert_eq!(laptop.name, "Laptop Gaming X2");
        assert_eq!(laptop.stock, 12);
        assert!(report.analysis.ends_with("baris"));
    }

    #[test]
    fn malformed_import_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"not\": \"an array\"}}").unwrap();
        let cfg = config(Some(file.path().to_path_buf()), false);
        let err = run_with(&cfg, clock(), &InventoryAnalyst::from_config(&cfg.ai)).unwrap_err();
        assert!(err.to_string().contains("not a JSON array"));
    }

    #[test]
    fn file_without_usable_rows_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{\"Nama\": \"tanpa kode\"}}]").unwrap();
        let cfg = config(Some(file.path().to_path_buf()), false);
        assert!(run_with(&cfg, clock(), &InventoryAnalyst::from_config(&cfg.ai)).is_err());
    }
}
