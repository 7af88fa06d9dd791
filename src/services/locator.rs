use crate::cli::Framework;
use crate::domain::frameworks::{ArtifactSpec, FilenameRule, Folders};
use crate::domain::models::ResolvedArtifact;
use anyhow::Context;
use std::path::Path;

/// Resolve every known artifact of `framework` under `root`, in table order.
///
/// Missing fixed-name artifacts are skipped. Glob artifacts are discovered in
/// the first folder only and then paired with every folder.
pub fn locate(
    framework: Framework,
    version: &str,
    root: &Path,
) -> anyhow::Result<Vec<ResolvedArtifact>> {
    let mut out = Vec::new();
    for spec in framework.artifacts() {
        match spec.filename {
            FilenameRule::Glob(pattern) => {
                locate_glob(framework, version, root, spec, pattern, &mut out)?
            }
            _ => locate_fixed(framework, version, root, spec, &mut out),
        }
    }
    Ok(out)
}

fn locate_fixed(
    framework: Framework,
    version: &str,
    root: &Path,
    spec: &ArtifactSpec,
    out: &mut Vec<ResolvedArtifact>,
) {
    let folders: Vec<(&str, &str)> = match spec.folders {
        Folders::PerArch(archs) => archs.iter().map(|a| (*a, *a)).collect(),
        // Flat artifacts: nothing to splice into the filename, label names the ledger.
        Folders::Flat(label) => vec![("", label)],
    };

    for (folder, architecture) in folders {
        let Some(filename) = spec.filename.resolve(folder) else {
            continue;
        };
        let path = spec.folder_path(root, folder).join(&filename);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "artifact not present, skipping");
            continue;
        }
        out.push(ResolvedArtifact {
            framework,
            version: version.to_string(),
            architecture: architecture.to_string(),
            path,
            filename,
            marker: spec.marker,
            keyed: spec.is_keyed(),
        });
    }
}

fn locate_glob(
    framework: Framework,
    version: &str,
    root: &Path,
    spec: &ArtifactSpec,
    pattern: &str,
    out: &mut Vec<ResolvedArtifact>,
) -> anyhow::Result<()> {
    let folders = spec.folder_names();
    let Some(reference) = folders.first() else {
        return Ok(());
    };

    let dir = spec.folder_path(root, reference);
    let full = format!(
        "{}/{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        pattern
    );

    let mut filenames = Vec::new();
    for entry in glob::glob(&full).with_context(|| format!("invalid glob pattern: {full}"))? {
        let path = entry.context("failed to read glob entry")?;
        if !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name() {
            filenames.push(name.to_string_lossy().into_owned());
        }
    }
    filenames.sort();
    tracing::debug!(count = filenames.len(), dir = %dir.display(), "discovered {}", pattern);

    for filename in filenames {
        for arch in folders {
            out.push(ResolvedArtifact {
                framework,
                version: version.to_string(),
                architecture: (*arch).to_string(),
                path: spec.folder_path(root, arch).join(&filename),
                filename: filename.clone(),
                marker: spec.marker,
                keyed: spec.is_keyed(),
            });
        }
    }
    Ok(())
}
