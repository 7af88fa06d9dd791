use crate::cli::{Framework, HasherKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_LEDGER_ROOT: &str = "files/hashes";
pub const DEFAULT_HASH_PROGRAM: &str = "certutil";
pub const DEFAULT_END_MARKER: &str = "CertUtil";
pub const PATH_PLACEHOLDER: &str = "{path}";

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// One artifact on disk, ready to be hashed.
#[derive(Debug, Clone)]
pub struct ResolvedArtifact {
    pub framework: Framework,
    pub version: String,
    pub architecture: String,
    pub path: PathBuf,
    pub filename: String,
    pub marker: &'static str,
    pub keyed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertOutcome {
    Appended,
    Replaced,
    Unchanged,
}

impl fmt::Display for UpsertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UpsertOutcome::Appended => "appended",
            UpsertOutcome::Replaced => "replaced",
            UpsertOutcome::Unchanged => "unchanged",
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpsertReport {
    pub framework: Framework,
    pub version: String,
    pub architecture: String,
    pub filename: String,
    pub path: PathBuf,
    pub ledger: PathBuf,
    pub hash: String,
    pub outcome: UpsertOutcome,
}

/// Effective settings after defaults, config file and flags are merged.
#[derive(Debug, Clone)]
pub struct Settings {
    pub ledger_root: PathBuf,
    pub hasher: HasherSettings,
}

#[derive(Debug, Clone)]
pub struct HasherSettings {
    pub kind: HasherKind,
    pub program: String,
    pub args: Vec<String>,
    pub end_marker: String,
}

impl Default for HasherSettings {
    fn default() -> Self {
        Self {
            kind: HasherKind::External,
            program: DEFAULT_HASH_PROGRAM.to_string(),
            args: vec![
                "-hashfile".to_string(),
                PATH_PLACEHOLDER.to_string(),
                "SHA256".to_string(),
            ],
            end_marker: DEFAULT_END_MARKER.to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ledger_root: PathBuf::from(DEFAULT_LEDGER_ROOT),
            hasher: HasherSettings::default(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub ledger_root: Option<PathBuf>,
    #[serde(default)]
    pub hasher: HasherConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct HasherConfig {
    #[serde(default)]
    pub kind: Option<HasherKind>,
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub args: Option<Vec<String>>,
    #[serde(default)]
    pub end_marker: Option<String>,
}
