#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub project: PathBuf,
    pub ledgers: PathBuf,
    cargo_home: PathBuf,
    rustup_home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");
        let project = tmp.path().join("app");
        fs::create_dir_all(&project).expect("create project root");
        let ledgers = tmp.path().join("files/hashes");

        let orig_home = std::env::var("HOME").unwrap_or_default();
        let cargo_home = PathBuf::from(&orig_home).join(".cargo");
        let rustup_home = PathBuf::from(&orig_home).join(".rustup");

        Self {
            _tmp: tmp,
            home,
            project,
            ledgers,
            cargo_home,
            rustup_home,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("binledger");
        cmd.env("HOME", &self.home)
            .env("CARGO_HOME", &self.cargo_home)
            .env("RUSTUP_HOME", &self.rustup_home)
            .env_remove("RUST_LOG");
        cmd
    }

    /// `binledger --json --ledger-root <ledgers> --hasher sha256 <fw> <version> <project>`
    pub fn record(&self, framework: &str, version: &str) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .arg("--ledger-root")
            .arg(&self.ledgers)
            .args(["--hasher", "sha256", framework, version])
            .arg(&self.project)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    /// Write `content` at `rel` under the project root.
    pub fn binary(&self, rel: &str, content: &[u8]) -> PathBuf {
        let path = self.project.join(rel);
        fs::create_dir_all(path.parent().expect("artifact parent")).expect("create artifact dir");
        fs::write(&path, content).expect("write artifact");
        path
    }

    pub fn ledger(&self, rel: &str) -> PathBuf {
        self.ledgers.join(rel)
    }

    pub fn read_ledger(&self, rel: &str) -> String {
        fs::read_to_string(self.ledger(rel)).expect("read ledger")
    }
}

pub fn sha256_hex(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

pub fn write_config(home: &Path, body: &str) -> PathBuf {
    let path = home.join(".config/binledger/config.toml");
    fs::create_dir_all(path.parent().expect("config parent")).expect("create config dir");
    fs::write(&path, body).expect("write config");
    path
}
