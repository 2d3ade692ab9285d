use crate::error::{AuditError, AuditResult};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Yaml,
    Json,
}

impl RecordFormat {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => RecordFormat::Yaml,
            _ => RecordFormat::Json,
        }
    }
}

/// A raw record document plus the directory it was read from.
#[derive(Debug, Clone)]
pub struct LoadedRecord {
    pub path: PathBuf,
    pub location: PathBuf,
    pub format: RecordFormat,
    pub document: Value,
}

pub fn load_record(path: &Path) -> AuditResult<LoadedRecord> {
    let resolved = path.canonicalize().map_err(|source| AuditError::RecordRead {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = std::fs::read_to_string(&resolved).map_err(|source| AuditError::RecordRead {
        path: path.to_path_buf(),
        source,
    })?;
    let format = RecordFormat::from_path(&resolved);
    let document = parse_document(&raw, format).map_err(|message| AuditError::RecordParse {
        path: path.to_path_buf(),
        message,
    })?;
    let location = resolved
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/"));

    tracing::debug!(path = %resolved.display(), ?format, "record loaded");
    Ok(LoadedRecord {
        path: resolved,
        location,
        format,
        document,
    })
}

pub fn parse_document(raw: &str, format: RecordFormat) -> Result<Value, String> {
    match format {
        RecordFormat::Yaml => serde_yaml::from_str::<Value>(raw).map_err(|e| e.to_string()),
        RecordFormat::Json => serde_json::from_str::<Value>(raw).map_err(|e| e.to_string()),
    }
}
