use crate::cli::HasherKind;
use crate::domain::models::{HasherSettings, ResolvedArtifact, PATH_PLACEHOLDER};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::Command;

const BUFFER_SIZE: usize = 8192;

#[derive(thiserror::Error, Debug)]
pub enum HashError {
    #[error("command '{command}' returned with error (code {code}): {output}")]
    Command {
        command: String,
        code: String,
        output: String,
    },
    #[error("could not find digest after marker '{marker}' in hashing output: {output}")]
    Parse { marker: String, output: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Produces the canonical digest string for one artifact.
pub trait DigestSource {
    fn digest(&self, artifact: &ResolvedArtifact) -> Result<String, HashError>;
}

/// Runs an external hashing tool and scrapes the digest from its stdout.
#[derive(Debug, Clone)]
pub struct ExternalHasher {
    pub program: String,
    pub args: Vec<String>,
    pub end_marker: String,
}

impl ExternalHasher {
    fn render_args(&self, path: &Path) -> Vec<String> {
        let path = path.to_string_lossy();
        self.args
            .iter()
            .map(|a| a.replace(PATH_PLACEHOLDER, &path))
            .collect()
    }
}

impl DigestSource for ExternalHasher {
    fn digest(&self, artifact: &ResolvedArtifact) -> Result<String, HashError> {
        let args = self.render_args(&artifact.path);
        let command = std::iter::once(self.program.as_str())
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");
        tracing::debug!(%command, "running hash command");

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| HashError::Command {
                command: command.clone(),
                code: "spawn".to_string(),
                output: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HashError::Command {
                command,
                code: output
                    .status
                    .code()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "signal".to_string()),
                output: format!("{}{}", stdout, stderr).trim().to_string(),
            });
        }

        extract_digest(&stdout, artifact.marker, &self.end_marker)
    }
}

/// In-process SHA-256 over the artifact bytes, lowercase hex.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl DigestSource for Sha256Hasher {
    fn digest(&self, artifact: &ResolvedArtifact) -> Result<String, HashError> {
        file_sha256(&artifact.path)
    }
}

pub fn file_sha256(path: &Path) -> Result<String, HashError> {
    let io_err = |source| HashError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_err)?;
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; BUFFER_SIZE];
    loop {
        let n = reader.read(&mut buffer).map_err(io_err)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Text strictly between the first `start` marker and the next `end` marker,
/// trimmed. Both markers are required.
pub fn extract_digest(output: &str, start: &str, end: &str) -> Result<String, HashError> {
    let parse_err = || HashError::Parse {
        marker: start.to_string(),
        output: output.trim().to_string(),
    };
    let from = output.find(start).ok_or_else(parse_err)? + start.len();
    let len = output[from..].find(end).ok_or_else(parse_err)?;
    let digest = output[from..from + len].trim();
    if digest.is_empty() {
        return Err(parse_err());
    }
    Ok(digest.to_string())
}

pub fn build(settings: &HasherSettings) -> Box<dyn DigestSource> {
    match settings.kind {
        HasherKind::External => Box::new(ExternalHasher {
            program: settings.program.clone(),
            args: settings.args.clone(),
            end_marker: settings.end_marker.clone(),
        }),
        HasherKind::Sha256 => Box::new(Sha256Hasher),
    }
}
