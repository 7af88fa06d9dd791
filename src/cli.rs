use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "binledger",
    version,
    about = "Record framework runtime binary hashes into per-architecture ledgers"
)]
pub struct Cli {
    #[arg(long, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, help = "Path to a config.toml (defaults to ~/.config/binledger/config.toml)")]
    pub config: Option<PathBuf>,
    #[arg(long, help = "Directory holding the <framework>/<arch>.csv ledgers")]
    pub ledger_root: Option<PathBuf>,
    #[arg(long, value_enum, help = "Hashing backend")]
    pub hasher: Option<HasherKind>,
    #[arg(long, default_value = "warn", help = "Log filter (e.g. info, binledger=debug)")]
    pub log_level: String,
    #[arg(value_enum, help = "Framework whose binaries should be hashed")]
    pub framework: Framework,
    #[arg(value_name = "VERSION", help = "Framework version recorded in the ledger")]
    pub framework_version: String,
    #[arg(help = "Project root containing lib/<arch>/ or assemblies/")]
    pub root: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Framework {
    Flutter,
    #[value(name = "react_native")]
    ReactNative,
    Xamarin,
    Qt,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HasherKind {
    External,
    #[value(name = "sha256")]
    Sha256,
}
