//! Audits WorkUnit records that claim test-first discipline: a failing check
//! existed before the passing state, every critical constraint was directly
//! exercised by that failure, and spec changes carry a human decision.
//!
//! ## Layers
//! - `domain/` — data-only record model and report DTOs.
//! - `services/` — loader, shape validator, invariant engine, advisory pass,
//!   report rendering, config.
//! - `commands/` — thin CLI handlers.
//!
//! Library users normally need only [`Auditor`]:
//!
//! ```no_run
//! use ahs_audit::{AuditConfig, Auditor, Verdict};
//!
//! let auditor = Auditor::from_config(&AuditConfig::default())?;
//! let report = auditor.audit_path(std::path::Path::new("workunit.yaml"), false)?;
//! assert_eq!(report.verdict, Verdict::Valid);
//! # Ok::<(), ahs_audit::AuditError>(())
//! ```

pub mod cli;
pub mod commands;
pub mod domain;
pub mod error;
pub mod services;

pub use cli::{Cli, Commands};
pub use domain::models::*;
pub use domain::record::*;
pub use error::{AuditError, AuditResult};
pub use services::audit::{Auditor, Outcome};
pub use services::config::AuditConfig;
pub use services::invariants::{EngineOptions, InvariantEngine};
pub use services::output::{print_error, print_one, print_out};
pub use services::report::render_text;
pub use services::schema::ShapeValidator;
pub use services::strict::AdvisoryPass;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Logs go to stderr; stdout carries only the report.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// Dispatches a parsed command line and returns the process exit code.
pub fn run(cli: &Cli) -> anyhow::Result<u8> {
    let cfg = AuditConfig::load(cli.config.as_deref())?;
    let auditor = Auditor::from_config(&cfg)?;
    tracing::debug!(schema = auditor.shape().source(), "auditor ready");

    match &cli.command {
        Commands::Validate { strict, path } => {
            commands::handle_validate(cli, &cfg, &auditor, path, *strict)
        }
        Commands::Schema => commands::handle_schema(cli, &auditor).map(|_| 0),
        Commands::Rules => commands::handle_rules(cli, &auditor).map(|_| 0),
    }
}
