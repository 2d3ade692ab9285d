//! Validation pipeline: shape check, then invariants, then (strict only) the
//! advisory pass. Any structural error stops before semantic rules run.

use crate::domain::constants::ROOT_PATH_MARKER;
use crate::domain::models::{Pass, RuleInfo, Stage, ValidationReport, Verdict, Violation, Warning};
use crate::domain::record::WorkUnit;
use crate::error::AuditResult;
use crate::services::config::AuditConfig;
use crate::services::invariants::{EngineOptions, InvariantEngine};
use crate::services::loader::load_record;
use crate::services::schema::ShapeValidator;
use crate::services::strict::AdvisoryPass;
use serde_json::Value;
use std::path::Path;

/// Result of auditing one in-memory document.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub errors: Vec<Violation>,
    pub warnings: Vec<Warning>,
}

impl Outcome {
    pub fn verdict(&self) -> Verdict {
        if self.errors.is_empty() {
            Verdict::Valid
        } else {
            Verdict::Invalid
        }
    }
}

pub struct Auditor {
    shape: ShapeValidator,
    engine: InvariantEngine,
    advisory: AdvisoryPass,
}

impl Auditor {
    pub fn new(shape: ShapeValidator, options: EngineOptions) -> Self {
        Self {
            shape,
            engine: InvariantEngine::new(options),
            advisory: AdvisoryPass::default(),
        }
    }

    pub fn from_config(cfg: &AuditConfig) -> AuditResult<Self> {
        let shape = match cfg.schema_path() {
            Some(path) => ShapeValidator::from_file(&path)?,
            None => ShapeValidator::embedded()?,
        };
        let options = EngineOptions {
            unique_constraint_ids: cfg.validate.unique_constraint_ids,
        };
        Ok(Self::new(shape, options))
    }

    pub fn shape(&self) -> &ShapeValidator {
        &self.shape
    }

    pub fn audit_document(&self, document: &Value, location: Option<&Path>, strict: bool) -> Outcome {
        let shape_errors: Vec<Violation> = self
            .shape
            .validate_shape(document)
            .into_iter()
            .map(structural_violation)
            .collect();
        if !shape_errors.is_empty() {
            return Outcome {
                errors: shape_errors,
                warnings: vec![],
            };
        }

        let record: WorkUnit = match serde_json::from_value(document.clone()) {
            Ok(r) => r,
            Err(e) => {
                return Outcome {
                    errors: vec![structural_violation(format!("{}: {}", ROOT_PATH_MARKER, e))],
                    warnings: vec![],
                }
            }
        };

        let errors = self.engine.evaluate(&record, location);
        let warnings = if strict && errors.is_empty() {
            self.advisory.evaluate(&record, location)
        } else {
            vec![]
        };
        Outcome { errors, warnings }
    }

    pub fn audit_path(&self, path: &Path, strict: bool) -> AuditResult<ValidationReport> {
        let loaded = load_record(path)?;
        let outcome = self.audit_document(&loaded.document, Some(&loaded.location), strict);
        let verdict = outcome.verdict();
        tracing::debug!(
            record = %loaded.path.display(),
            %verdict,
            errors = outcome.errors.len(),
            warnings = outcome.warnings.len(),
            "audit finished"
        );
        Ok(ValidationReport {
            record: path.display().to_string(),
            verdict,
            errors: outcome.errors,
            warnings: outcome.warnings,
        })
    }

    pub fn rule_catalog(&self) -> Vec<RuleInfo> {
        let invariant = self.engine.rules().map(|r| RuleInfo {
            id: r.id(),
            pass: Pass::Invariant,
            description: r.description(),
        });
        let advisory = self.advisory.rules().map(|r| RuleInfo {
            id: r.id(),
            pass: Pass::Advisory,
            description: r.description(),
        });
        invariant.chain(advisory).collect()
    }
}

fn structural_violation(message: String) -> Violation {
    Violation {
        stage: Stage::Structural,
        rule: "schema",
        message,
    }
}
