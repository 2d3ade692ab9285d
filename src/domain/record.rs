//! Typed, read-only view over a parsed WorkUnit document.
//!
//! Every field is defaulted so a rule that reads an absent value sees its
//! logical default (empty list, `false`, `None`) instead of failing. Shape
//! enforcement belongs to the structural validator; these types only give
//! the invariant rules something typed to read.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct WorkUnit {
    pub audit_version: Option<String>,
    pub work_id: Option<String>,
    pub timestamp_utc: Option<String>,
    pub repo_ref: Option<String>,
    /// Identity and provenance sections are carried opaquely.
    pub actor: Value,
    pub check_suite: Value,
    pub diff_set: Value,
    pub mini_spec: MiniSpec,
    pub first_red: FirstRed,
    pub final_green: FinalGreen,
    pub spec_delta: SpecDelta,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct MiniSpec {
    pub summary: String,
    pub constraints: Vec<Constraint>,
    pub out_of_scope: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Constraint {
    pub id: String,
    pub statement: String,
    #[serde(rename = "type")]
    pub kind: Option<ConstraintType>,
}

impl Constraint {
    /// Critical constraints must be falsified by at least one direct red.
    pub fn is_critical(&self) -> bool {
        self.kind.map(ConstraintType::is_critical).unwrap_or(false)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintType {
    Functional,
    Invariant,
    Negative,
    Compatibility,
    Performance,
    Security,
}

impl ConstraintType {
    pub fn is_critical(self) -> bool {
        matches!(
            self,
            ConstraintType::Functional | ConstraintType::Negative | ConstraintType::Performance
        )
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct FirstRed {
    pub occurred: bool,
    pub failing_checks: Vec<FailingCheck>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct FailingCheck {
    pub check_id: String,
    pub constraint_ids: Vec<String>,
    pub evidence_ref: String,
    pub coupling: Option<Coupling>,
}

impl FailingCheck {
    pub fn is_direct(&self) -> bool {
        self.coupling == Some(Coupling::Direct)
    }

    /// Label used when reporting on this check; `?` stands in for a blank id.
    pub fn label(&self) -> &str {
        if self.check_id.is_empty() {
            "?"
        } else {
            &self.check_id
        }
    }
}

/// Strength of the causal link between a failing check and its constraints.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Coupling {
    Direct,
    Indirect,
    Incidental,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct FinalGreen {
    pub all_checks_passed: bool,
    pub run_id: String,
    pub evidence_ref: String,
    pub summary_metrics: Value,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct SpecDelta {
    pub changed: bool,
    pub changes: Vec<Change>,
    pub human_decision: Option<HumanDecision>,
}

impl SpecDelta {
    pub fn has_human_verdict(&self) -> bool {
        matches!(
            self.human_decision,
            Some(HumanDecision::Accepted) | Some(HumanDecision::Rejected)
        )
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum HumanDecision {
    #[serde(rename = "accepted")]
    Accepted,
    #[serde(rename = "rejected")]
    Rejected,
    #[serde(rename = "n/a")]
    NotApplicable,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Change {
    pub kind: Option<ChangeKind>,
    pub id: String,
    pub before: String,
    pub after: String,
    pub reason: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Constraint,
    Check,
}
