//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `validate.rs` — the verdict/exit-code contract for one record.
//! - `inspect.rs` — `schema` and `rules` introspection.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod inspect;
pub mod validate;

pub use inspect::{handle_rules, handle_schema};
pub use validate::handle_validate;
