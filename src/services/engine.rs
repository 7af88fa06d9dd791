use crate::domain::frameworks::ledger_path;
use crate::domain::models::{ResolvedArtifact, UpsertReport};
use crate::services::hasher::DigestSource;
use crate::services::ledger::{Ledger, LedgerKey};
use anyhow::Context;
use std::path::Path;

/// Hash one artifact and record it in its architecture's ledger.
pub fn hash_and_upsert(
    artifact: &ResolvedArtifact,
    ledger_root: &Path,
    hasher: &dyn DigestSource,
) -> anyhow::Result<UpsertReport> {
    let hash = hasher.digest(artifact)?;
    tracing::debug!(path = %artifact.path.display(), %hash, "hashed artifact");

    let ledger_file = ledger_path(ledger_root, artifact.framework, &artifact.architecture);
    let key = LedgerKey {
        version: artifact.version.clone(),
        filename: artifact.keyed.then(|| artifact.filename.clone()),
    };

    let mut ledger = Ledger::load(&ledger_file)?;
    let outcome = ledger.upsert(&key, &hash);
    ledger
        .persist()
        .with_context(|| format!("failed to update ledger {}", ledger_file.display()))?;

    tracing::info!(
        architecture = %artifact.architecture,
        filename = %artifact.filename,
        ledger = %ledger_file.display(),
        %outcome,
        "ledger updated"
    );

    Ok(UpsertReport {
        framework: artifact.framework,
        version: artifact.version.clone(),
        architecture: artifact.architecture.clone(),
        filename: artifact.filename.clone(),
        path: artifact.path.clone(),
        ledger: ledger_file,
        hash,
        outcome,
    })
}

/// Process artifacts in order; the first failure stops the batch.
///
/// `on_report` sees each completed upsert as soon as its ledger is written,
/// so earlier results are observable even when a later artifact fails.
pub fn run(
    artifacts: &[ResolvedArtifact],
    ledger_root: &Path,
    hasher: &dyn DigestSource,
    mut on_report: impl FnMut(&UpsertReport),
) -> anyhow::Result<Vec<UpsertReport>> {
    let mut reports = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let report = hash_and_upsert(artifact, ledger_root, hasher)?;
        on_report(&report);
        reports.push(report);
    }
    Ok(reports)
}
