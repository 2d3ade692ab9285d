//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `loader.rs` — read a record file, parse YAML/JSON.
//! - `schema.rs` — structural (shape-only) JSON Schema validation.
//! - `rules.rs` — the `Rule` trait shared by both rule passes.
//! - `invariants.rs` — fatal semantic rules.
//! - `strict.rs` — non-fatal advisory rules (`--strict`).
//! - `evidence.rs` — evidence_ref existence probe.
//! - `audit.rs` — pipeline tying the above together.
//! - `report.rs` — text rendering of the verdict.
//! - `config.rs` — optional TOML config.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects (file reads, existence probes) stay in `loader.rs`,
//!   `config.rs` and `evidence.rs`.
//! - Keep command handlers thin; delegate to services.

pub mod audit;
pub mod config;
pub mod evidence;
pub mod invariants;
pub mod loader;
pub mod output;
pub mod report;
pub mod rules;
pub mod schema;
pub mod strict;
