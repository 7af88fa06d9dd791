//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep report/settings structs in one place.
//! - Keep framework naming trivia (folders, filenames, markers) out of the
//!   ledger logic.
//!
//! ## Files
//! - `models.rs` — resolved artifacts, upsert reports, settings, JSON envelope.
//! - `frameworks.rs` — static framework -> artifact table.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/process side effects.
//!
//! ## Compatibility note
//! `UpsertReport` is the `--json` output schema and the audit event payload.

pub mod frameworks;
pub mod models;
