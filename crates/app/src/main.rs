use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let config = gudang_app::AppConfig::from_env(std::env::args().nth(1));
    gudang_observability::init(config.log_format);
    tracing::debug!(?config, "configuration loaded");

    let report = gudang_app::run(&config)?;
    let out = serde_json::to_string_pretty(&report).context("failed to encode report")?;
    println!("{out}");
    Ok(())
}
