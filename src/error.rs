//! Fatal error types.
//!
//! Findings about the record itself are never errors; they are reported as
//! violations or warnings. Everything here aborts the run with exit code 2.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    /// The record file could not be read.
    #[error("cannot read record {path}: {source}")]
    RecordRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record file is not well-formed YAML or JSON.
    #[error("cannot parse record {path}: {message}")]
    RecordParse { path: PathBuf, message: String },

    /// The schema document is unreadable or not a usable JSON Schema.
    #[error("schema {source_label} is unusable: {message}")]
    SchemaInvalid {
        source_label: String,
        message: String,
    },

    /// The config file is missing, unreadable or malformed.
    #[error("config {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },
}

impl AuditError {
    /// Stable machine code used in `--json` error envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            AuditError::RecordRead { .. } => "RECORD_READ",
            AuditError::RecordParse { .. } => "RECORD_PARSE",
            AuditError::SchemaInvalid { .. } => "SCHEMA_INVALID",
            AuditError::ConfigInvalid { .. } => "CONFIG_INVALID",
        }
    }
}

pub type AuditResult<T> = Result<T, AuditError>;
