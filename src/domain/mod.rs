//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep the typed WorkUnit view and report DTOs in one place.
//! - Avoid cyclic imports between the engine, the advisory pass and the CLI.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `record.rs` — read-only WorkUnit model deserialized after shape validation.
//! - `models.rs` — findings, report and JSON envelope structs.
//! - `constants.rs` — stable constants (schema, path markers, config location).
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem side effects.
//!
//! ## Compatibility note
//! Changes in `models.rs` affect `--json` output. Keep them synchronized with
//! `docs/contracts/*`.

pub mod constants;
pub mod models;
pub mod record;
