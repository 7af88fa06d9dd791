//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `locator.rs` — framework artifact discovery under a project root.
//! - `hasher.rs` — external hashing command + in-process SHA-256, digest parsing.
//! - `ledger.rs` — ledger CSV codec, upsert, append and atomic rewrite.
//! - `engine.rs` — per-artifact hash-and-upsert, batch runner.
//! - `settings.rs` — config file + flag resolution.
//! - `storage.rs` — config paths and audit journal.
//! - `output.rs` — JSON/text output helpers and error envelope.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod engine;
pub mod hasher;
pub mod ledger;
pub mod locator;
pub mod output;
pub mod settings;
pub mod storage;
