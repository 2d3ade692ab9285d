use crate::domain::constants::DEFAULT_CONFIG_RELATIVE;
use crate::error::{AuditError, AuditResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    #[serde(default)]
    pub validate: ValidateSection,
    /// Directory of the file this config came from; anchors relative paths.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ValidateSection {
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub schema: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub unique_constraint_ids: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ValidateSection {
    fn default() -> Self {
        Self {
            strict: false,
            schema: None,
            unique_constraint_ids: true,
        }
    }
}

impl AuditConfig {
    /// An explicit path must exist; the default location is optional.
    pub fn load(explicit: Option<&Path>) -> AuditResult<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(AuditError::ConfigInvalid {
                        path: path.to_path_buf(),
                        message: "file does not exist".to_string(),
                    });
                }
                Self::from_file(path)
            }
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> AuditResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| AuditError::ConfigInvalid {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut cfg: AuditConfig = toml::from_str(&raw).map_err(|e| AuditError::ConfigInvalid {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        cfg.base_dir = path.parent().map(Path::to_path_buf);
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    /// Schema override resolved against the config file's directory.
    pub fn schema_path(&self) -> Option<PathBuf> {
        let schema = self.validate.schema.as_ref()?;
        if schema.is_absolute() {
            return Some(schema.clone());
        }
        Some(match &self.base_dir {
            Some(dir) => dir.join(schema),
            None => schema.clone(),
        })
    }
}

fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(DEFAULT_CONFIG_RELATIVE))
}
