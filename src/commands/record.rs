use crate::cli::Cli;
use crate::domain::models::Settings;
use crate::services::storage::audit;
use crate::services::{engine, hasher, locator, output::print_out};

pub fn handle_record(cli: &Cli, settings: &Settings) -> anyhow::Result<()> {
    let artifacts = locator::locate(cli.framework, &cli.framework_version, &cli.root)?;
    if artifacts.is_empty() {
        tracing::warn!(
            framework = ?cli.framework,
            root = %cli.root.display(),
            "no known artifacts found"
        );
    }

    let digest_source = hasher::build(&settings.hasher);
    let reports = engine::run(
        &artifacts,
        &settings.ledger_root,
        digest_source.as_ref(),
        |report| {
            audit(
                "ledger.upsert",
                serde_json::to_value(report).unwrap_or(serde_json::Value::Null),
            )
        },
    )?;

    print_out(cli.json, &reports, |r| {
        format!("{}\t{}\t{}\t{}", r.architecture, r.filename, r.outcome, r.hash)
    })
}
