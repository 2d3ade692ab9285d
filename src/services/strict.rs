//! Strict advisory pass. Runs only for records with zero violations and only
//! ever produces warnings.

use crate::domain::models::Warning;
use crate::domain::record::WorkUnit;
use crate::services::evidence::missing_evidence;
use crate::services::rules::{Rule, RuleContext};
use std::collections::HashSet;
use std::path::Path;

pub struct AdvisoryPass {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for AdvisoryPass {
    fn default() -> Self {
        Self {
            rules: vec![
                Box::new(UncoveredRed),
                Box::new(DanglingConstraintRef),
                Box::new(EvidenceAdvisory),
            ],
        }
    }
}

impl AdvisoryPass {
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn evaluate(&self, record: &WorkUnit, location: Option<&Path>) -> Vec<Warning> {
        let ctx = RuleContext::new(record, location);
        let mut out = Vec::new();
        for rule in &self.rules {
            let messages = rule.check(&ctx);
            tracing::debug!(rule = rule.id(), count = messages.len(), "advisory rule evaluated");
            out.extend(messages.into_iter().map(|message| Warning {
                rule: rule.id(),
                message,
            }));
        }
        out
    }
}

struct UncoveredRed;

impl Rule for UncoveredRed {
    fn id(&self) -> &'static str {
        "uncovered-red"
    }

    fn description(&self) -> &'static str {
        "failing checks declare the constraints they exercise"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<String> {
        ctx.record
            .first_red
            .failing_checks
            .iter()
            .filter(|fc| fc.constraint_ids.is_empty())
            .map(|fc| {
                format!(
                    "first_red failing_check '{}' has empty constraint_ids (harder to audit)",
                    fc.label()
                )
            })
            .collect()
    }
}

struct DanglingConstraintRef;

impl Rule for DanglingConstraintRef {
    fn id(&self) -> &'static str {
        "dangling-constraint-ref"
    }

    fn description(&self) -> &'static str {
        "failing checks only reference declared constraints"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<String> {
        let declared: HashSet<&str> = ctx
            .record
            .mini_spec
            .constraints
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        let mut out = Vec::new();
        for fc in &ctx.record.first_red.failing_checks {
            for id in fc.constraint_ids.iter().filter(|id| !declared.contains(id.as_str())) {
                out.push(format!(
                    "first_red failing_check '{}' references unknown constraint id '{}'",
                    fc.label(),
                    id
                ));
            }
        }
        out
    }
}

/// Re-runs the evidence probe as advisory context. Reachable only after the
/// fatal probe passed, so it normally stays quiet.
struct EvidenceAdvisory;

impl Rule for EvidenceAdvisory {
    fn id(&self) -> &'static str {
        "evidence-advisory"
    }

    fn description(&self) -> &'static str {
        "local evidence_ref paths exist (ok if stored elsewhere)"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<String> {
        let Some(location) = ctx.location else {
            return vec![];
        };
        missing_evidence(ctx.record, location)
            .into_iter()
            .map(|m| {
                format!(
                    "{}: evidence_ref '{}' does not exist on disk (ok if stored elsewhere)",
                    m.label, m.reference
                )
            })
            .collect()
    }
}
