//! Ledger files: headerless comma-delimited rows of `version,hash` (simple)
//! or `version,filename,hash` (keyed).
//!
//! Rows are read whole, mutated in memory and written back either as a
//! single appended line or as an atomic temp-file + rename rewrite.

use crate::domain::models::UpsertOutcome;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum LedgerError {
    #[error("ledger {action} failed for {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn io_err(action: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> LedgerError {
    let path = path.to_path_buf();
    move |source| LedgerError::Io {
        action,
        path,
        source,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerShape {
    Simple,
    Keyed,
}

impl LedgerShape {
    fn hash_column(self) -> usize {
        match self {
            LedgerShape::Simple => 1,
            LedgerShape::Keyed => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerKey {
    pub version: String,
    pub filename: Option<String>,
}

impl LedgerKey {
    pub fn shape(&self) -> LedgerShape {
        if self.filename.is_some() {
            LedgerShape::Keyed
        } else {
            LedgerShape::Simple
        }
    }

    fn matches(&self, row: &[String]) -> bool {
        if row.len() <= self.shape().hash_column() || row[0] != self.version {
            return false;
        }
        match &self.filename {
            Some(f) => row[1] == *f,
            None => true,
        }
    }

    fn row(&self, hash: &str) -> Vec<String> {
        let mut row = vec![self.version.clone()];
        if let Some(f) = &self.filename {
            row.push(f.clone());
        }
        row.push(hash.to_string());
        row
    }
}

#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    rows: Vec<Vec<String>>,
    /// Raw text as read; `None` when the file did not exist.
    on_disk: Option<String>,
}

impl Ledger {
    pub fn load(path: &Path) -> Result<Self, LedgerError> {
        let on_disk = if path.exists() {
            Some(fs::read_to_string(path).map_err(io_err("read", path))?)
        } else {
            None
        };
        let rows = on_disk.as_deref().map(parse_rows).unwrap_or_default();
        Ok(Self {
            path: path.to_path_buf(),
            rows,
            on_disk,
        })
    }

    /// Replace the hash of the first row matching `key`, or append a row.
    pub fn upsert(&mut self, key: &LedgerKey, hash: &str) -> UpsertOutcome {
        let col = key.shape().hash_column();
        if let Some(row) = self.rows.iter_mut().find(|r| key.matches(r)) {
            if row[col] == hash {
                return UpsertOutcome::Unchanged;
            }
            row[col] = hash.to_string();
            return UpsertOutcome::Replaced;
        }
        self.rows.push(key.row(hash));
        UpsertOutcome::Appended
    }

    /// Write in-memory rows back.
    ///
    /// Nothing is written when the file already holds exactly these rows. A
    /// single new trailing row on top of canonical content is appended;
    /// anything else goes through [`write_atomic`].
    pub fn persist(&self) -> Result<(), LedgerError> {
        let rendered = render_rows(&self.rows);
        let current = self.on_disk.as_deref().unwrap_or("");
        if current == rendered {
            return Ok(());
        }

        if let (Some(tail), Some(last)) = (rendered.strip_prefix(current), self.rows.last()) {
            if tail == render_row(last) {
                if let Some(parent) = self.path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent).map_err(io_err("create directory", parent))?;
                    }
                }
                return append_row(&self.path, last);
            }
        }
        write_atomic(&self.path, &rendered)
    }
}

/// Minimal CSV reader: `"`-quoted fields with `""` escapes, `\n` or `\r\n`
/// terminators. Blank lines produce no row. A quote that does not open a
/// field is literal text.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_start = true;
    let mut row_has_content = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if field_start => {
                in_quotes = true;
                field_start = false;
                row_has_content = true;
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                field_start = true;
                row_has_content = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                if row_has_content || !field.is_empty() {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                field_start = true;
                row_has_content = false;
            }
            _ => {
                field.push(c);
                field_start = false;
            }
        }
    }
    if row_has_content || !field.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}

fn render_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn render_row(row: &[String]) -> String {
    let mut line = row
        .iter()
        .map(|f| render_field(f))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

pub fn render_rows(rows: &[Vec<String>]) -> String {
    rows.iter().map(|r| render_row(r)).collect()
}

/// Append one newline-terminated row, creating the file if needed.
pub fn append_row(path: &Path, row: &[String]) -> Result<(), LedgerError> {
    let needs_separator = match fs::read(path) {
        Ok(bytes) => !bytes.is_empty() && !bytes.ends_with(b"\n"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => return Err(io_err("read", path)(e)),
    };
    let mut line = String::new();
    if needs_separator {
        line.push('\n');
    }
    line.push_str(&render_row(row));

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err("open", path))?;
    file.write_all(line.as_bytes())
        .map_err(io_err("append", path))?;
    file.sync_all().map_err(io_err("sync", path))
}

/// Replace `path` with `content` via a temp file in the same directory.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), LedgerError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(io_err("create directory", parent))?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(io_err("create temp file", parent))?;
    tmp.write_all(content.as_bytes())
        .map_err(io_err("write temp file", path))?;
    tmp.as_file()
        .sync_all()
        .map_err(io_err("sync temp file", path))?;
    tmp.persist(path)
        .map_err(|e| io_err("rename", path)(e.error))?;
    Ok(())
}
