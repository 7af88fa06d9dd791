use crate::cli::Cli;
use crate::domain::models::{ConfigFile, Settings};
use crate::services::storage::default_config_path;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
#[error("invalid config {path}: {reason}")]
pub struct ConfigError {
    pub path: String,
    pub reason: String,
}

/// Defaults, then the config file, then command-line flags.
pub fn resolve(cli: &Cli) -> anyhow::Result<Settings> {
    let file = match &cli.config {
        Some(path) => Some(load_config(path)?),
        None => match default_config_path() {
            Ok(path) if path.exists() => Some(load_config(&path)?),
            _ => None,
        },
    };

    let mut settings = Settings::default();
    if let Some(file) = file {
        apply(&mut settings, file);
    }
    if let Some(root) = &cli.ledger_root {
        settings.ledger_root = root.clone();
    }
    if let Some(kind) = cli.hasher {
        settings.hasher.kind = kind;
    }
    tracing::debug!(?settings, "resolved settings");
    Ok(settings)
}

pub fn load_config(path: &Path) -> anyhow::Result<ConfigFile> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let parsed: ConfigFile = toml::from_str(&raw).map_err(|e| ConfigError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(parsed)
}

fn apply(settings: &mut Settings, file: ConfigFile) {
    if let Some(root) = file.ledger_root {
        settings.ledger_root = root;
    }
    let h = file.hasher;
    if let Some(kind) = h.kind {
        settings.hasher.kind = kind;
    }
    if let Some(program) = h.program {
        settings.hasher.program = program;
    }
    if let Some(args) = h.args {
        settings.hasher.args = args;
    }
    if let Some(end_marker) = h.end_marker {
        settings.hasher.end_marker = end_marker;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::HasherKind;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn config_overrides_defaults_field_by_field() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"ledger_root = "/srv/hashes"
[hasher]
program = "hashtool"
args = ["--sha256", "{path}"]
"#,
        )
        .expect("write config");

        let mut settings = Settings::default();
        apply(&mut settings, load_config(&path).expect("parse"));
        assert_eq!(settings.ledger_root, PathBuf::from("/srv/hashes"));
        assert_eq!(settings.hasher.kind, HasherKind::External);
        assert_eq!(settings.hasher.program, "hashtool");
        assert_eq!(settings.hasher.args, ["--sha256", "{path}"]);
        assert_eq!(settings.hasher.end_marker, "CertUtil");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "ledger_dir = \"x\"\n").expect("write config");
        let err = load_config(&path).expect_err("unknown key");
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn missing_config_file_is_a_config_error() {
        let tmp = TempDir::new().expect("tmp");
        let err = load_config(&tmp.path().join("absent.toml")).expect_err("missing file");
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn sha256_kind_parses_from_toml() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[hasher]\nkind = \"sha256\"\n").expect("write config");
        let cfg = load_config(&path).expect("parse");
        assert_eq!(cfg.hasher.kind, Some(HasherKind::Sha256));
    }
}
