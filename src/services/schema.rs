//! Structural (shape-only) validation against a JSON Schema document.
//!
//! Produces `<dotted.path>: <message>` strings sorted by field path. It knows
//! nothing about red/green semantics; those live in `invariants.rs`.

use crate::domain::constants::{EMBEDDED_SCHEMA, EMBEDDED_SCHEMA_SOURCE, ROOT_PATH_MARKER};
use crate::error::{AuditError, AuditResult};
use jsonschema::Draft;
use serde_json::Value;
use std::cmp::Ordering;
use std::path::Path;

pub struct ShapeValidator {
    validator: jsonschema::Validator,
    source: String,
    document: Value,
}

impl std::fmt::Debug for ShapeValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeValidator")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl ShapeValidator {
    pub fn embedded() -> AuditResult<Self> {
        let document: Value =
            serde_json::from_str(EMBEDDED_SCHEMA).map_err(|e| AuditError::SchemaInvalid {
                source_label: EMBEDDED_SCHEMA_SOURCE.to_string(),
                message: e.to_string(),
            })?;
        Self::from_value(document, EMBEDDED_SCHEMA_SOURCE)
    }

    pub fn from_file(path: &Path) -> AuditResult<Self> {
        let label = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|e| AuditError::SchemaInvalid {
            source_label: label.clone(),
            message: e.to_string(),
        })?;
        let document: Value = serde_json::from_str(&raw).map_err(|e| AuditError::SchemaInvalid {
            source_label: label.clone(),
            message: e.to_string(),
        })?;
        Self::from_value(document, &label)
    }

    pub fn from_value(document: Value, source: &str) -> AuditResult<Self> {
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(&document)
            .map_err(|e| AuditError::SchemaInvalid {
                source_label: source.to_string(),
                message: e.to_string(),
            })?;
        tracing::debug!(source, "schema compiled");
        Ok(Self {
            validator,
            source: source.to_string(),
            document,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Shape errors for `record`, ordered by field path. Empty means shape-valid.
    pub fn validate_shape(&self, record: &Value) -> Vec<String> {
        let mut errors: Vec<(Vec<PathSegment>, String)> = self
            .validator
            .iter_errors(record)
            .map(|err| {
                let segments = parse_pointer(&err.instance_path.to_string());
                let message = format!("{}: {}", dotted(&segments), err);
                (segments, message)
            })
            .collect();
        errors.sort_by(|a, b| compare_paths(&a.0, &b.0));
        tracing::debug!(count = errors.len(), "structural validation finished");
        errors.into_iter().map(|(_, m)| m).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    Index(usize),
    Key(String),
}

fn parse_pointer(pointer: &str) -> Vec<PathSegment> {
    pointer
        .split('/')
        .skip(1)
        .map(|raw| {
            let key = raw.replace("~1", "/").replace("~0", "~");
            match key.parse::<usize>() {
                Ok(i) => PathSegment::Index(i),
                Err(_) => PathSegment::Key(key),
            }
        })
        .collect()
}

fn dotted(segments: &[PathSegment]) -> String {
    if segments.is_empty() {
        return ROOT_PATH_MARKER.to_string();
    }
    segments
        .iter()
        .map(|s| match s {
            PathSegment::Index(i) => i.to_string(),
            PathSegment::Key(k) => k.clone(),
        })
        .collect::<Vec<_>>()
        .join(".")
}

fn compare_paths(a: &[PathSegment], b: &[PathSegment]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        let ord = match (x, y) {
            (PathSegment::Index(i), PathSegment::Index(j)) => i.cmp(j),
            (PathSegment::Key(k), PathSegment::Key(l)) => k.cmp(l),
            (PathSegment::Index(_), PathSegment::Key(_)) => Ordering::Less,
            (PathSegment::Key(_), PathSegment::Index(_)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}
