//! Invariant engine: semantic rules over a shape-valid WorkUnit.
//!
//! Rules are independent and all of them run; messages are accumulated in
//! rule order so one report shows every defect.

use crate::domain::models::{Stage, Violation};
use crate::domain::record::WorkUnit;
use crate::services::evidence::missing_evidence;
use crate::services::rules::{Rule, RuleContext};
use std::collections::{HashMap, HashSet};
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    pub unique_constraint_ids: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            unique_constraint_ids: true,
        }
    }
}

pub struct InvariantEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for InvariantEngine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl InvariantEngine {
    pub fn new(options: EngineOptions) -> Self {
        let mut rules: Vec<Box<dyn Rule>> = vec![
            Box::new(ConstraintPresence),
            Box::new(RedBeforeGreen),
            Box::new(RedEvidence),
            Box::new(GreenCompleteness),
            Box::new(SpecDeltaConsistency),
            Box::new(DirectRedCoverage),
            Box::new(EvidenceExistence),
        ];
        if options.unique_constraint_ids {
            rules.push(Box::new(UniqueConstraintIds));
        }
        Self { rules }
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn evaluate(&self, record: &WorkUnit, location: Option<&Path>) -> Vec<Violation> {
        let ctx = RuleContext::new(record, location);
        let mut out = Vec::new();
        for rule in &self.rules {
            let messages = rule.check(&ctx);
            tracing::debug!(rule = rule.id(), count = messages.len(), "invariant rule evaluated");
            out.extend(messages.into_iter().map(|message| Violation {
                stage: Stage::Invariant,
                rule: rule.id(),
                message,
            }));
        }
        out
    }
}

struct ConstraintPresence;

impl Rule for ConstraintPresence {
    fn id(&self) -> &'static str {
        "constraint-presence"
    }

    fn description(&self) -> &'static str {
        "mini_spec.constraints is non-empty"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<String> {
        if ctx.record.mini_spec.constraints.is_empty() {
            vec!["mini_spec.constraints must have at least 1 item".to_string()]
        } else {
            vec![]
        }
    }
}

struct RedBeforeGreen;

impl Rule for RedBeforeGreen {
    fn id(&self) -> &'static str {
        "red-before-green"
    }

    fn description(&self) -> &'static str {
        "first_red.occurred is true"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<String> {
        if ctx.record.first_red.occurred {
            vec![]
        } else {
            vec!["first_red.occurred must be true (no green without red)".to_string()]
        }
    }
}

struct RedEvidence;

impl Rule for RedEvidence {
    fn id(&self) -> &'static str {
        "red-evidence"
    }

    fn description(&self) -> &'static str {
        "a red that occurred lists at least one failing check"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<String> {
        let red = &ctx.record.first_red;
        if red.occurred && red.failing_checks.is_empty() {
            vec![
                "first_red.failing_checks must have at least 1 item when occurred is true"
                    .to_string(),
            ]
        } else {
            vec![]
        }
    }
}

struct GreenCompleteness;

impl Rule for GreenCompleteness {
    fn id(&self) -> &'static str {
        "green-completeness"
    }

    fn description(&self) -> &'static str {
        "final_green.all_checks_passed is true"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<String> {
        if ctx.record.final_green.all_checks_passed {
            vec![]
        } else {
            vec!["final_green.all_checks_passed must be true".to_string()]
        }
    }
}

struct SpecDeltaConsistency;

impl Rule for SpecDeltaConsistency {
    fn id(&self) -> &'static str {
        "spec-delta-consistency"
    }

    fn description(&self) -> &'static str {
        "a changed spec carries a human decision and at least one change"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<String> {
        let delta = &ctx.record.spec_delta;
        let mut out = Vec::new();
        if !delta.changed {
            return out;
        }
        if !delta.has_human_verdict() {
            out.push(
                "spec_delta.human_decision must be accepted/rejected when spec_delta.changed is true"
                    .to_string(),
            );
        }
        if delta.changes.is_empty() {
            out.push(
                "spec_delta.changes must be non-empty when spec_delta.changed is true".to_string(),
            );
        }
        out
    }
}

struct DirectRedCoverage;

impl Rule for DirectRedCoverage {
    fn id(&self) -> &'static str {
        "direct-red-coverage"
    }

    fn description(&self) -> &'static str {
        "every functional, negative or performance constraint has a direct red"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<String> {
        let record = ctx.record;
        let covered: HashSet<&str> = record
            .first_red
            .failing_checks
            .iter()
            .filter(|fc| fc.is_direct())
            .flat_map(|fc| fc.constraint_ids.iter().map(String::as_str))
            .collect();

        let missing: Vec<String> = record
            .mini_spec
            .constraints
            .iter()
            .filter(|c| c.is_critical() && !covered.contains(c.id.as_str()))
            .map(|c| format!("'{}'", c.id))
            .collect();

        if missing.is_empty() {
            return vec![];
        }
        vec![format!(
            "Constraints [{}] lack a direct red (required for functional, negative, or performance types)",
            missing.join(", ")
        )]
    }
}

struct EvidenceExistence;

impl Rule for EvidenceExistence {
    fn id(&self) -> &'static str {
        "evidence-existence"
    }

    fn description(&self) -> &'static str {
        "local evidence_ref paths exist relative to the record"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<String> {
        let Some(location) = ctx.location else {
            return vec![];
        };
        missing_evidence(ctx.record, location)
            .into_iter()
            .map(|m| {
                format!(
                    "{}: evidence_ref '{}' does not exist on disk",
                    m.label, m.reference
                )
            })
            .collect()
    }
}

struct UniqueConstraintIds;

impl Rule for UniqueConstraintIds {
    fn id(&self) -> &'static str {
        "unique-constraint-ids"
    }

    fn description(&self) -> &'static str {
        "constraint ids are unique within mini_spec.constraints"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order = Vec::new();
        for c in &ctx.record.mini_spec.constraints {
            let n = counts.entry(c.id.as_str()).or_insert(0);
            *n += 1;
            if *n == 2 {
                order.push(c.id.as_str());
            }
        }
        order
            .into_iter()
            .map(|id| format!("mini_spec.constraints has duplicate id '{}'", id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{
        Change, ChangeKind, Constraint, ConstraintType, Coupling, FailingCheck, HumanDecision,
    };
    use tempfile::TempDir;

    fn constraint(id: &str, kind: ConstraintType) -> Constraint {
        Constraint {
            id: id.to_string(),
            statement: format!("{id} holds"),
            kind: Some(kind),
        }
    }

    fn check(id: &str, ids: &[&str], coupling: Coupling, evidence: &str) -> FailingCheck {
        FailingCheck {
            check_id: id.to_string(),
            constraint_ids: ids.iter().map(|s| s.to_string()).collect(),
            evidence_ref: evidence.to_string(),
            coupling: Some(coupling),
        }
    }

    fn valid_unit() -> WorkUnit {
        let mut unit = WorkUnit::default();
        unit.mini_spec.constraints = vec![constraint("C1", ConstraintType::Functional)];
        unit.first_red.occurred = true;
        unit.first_red.failing_checks = vec![check(
            "t1",
            &["C1"],
            Coupling::Direct,
            "https://ci.example.com/red",
        )];
        unit.final_green.all_checks_passed = true;
        unit.final_green.evidence_ref = "https://ci.example.com/green".to_string();
        unit.spec_delta.human_decision = Some(HumanDecision::NotApplicable);
        unit
    }

    fn messages(unit: &WorkUnit) -> Vec<String> {
        InvariantEngine::default()
            .evaluate(unit, None)
            .into_iter()
            .map(|v| v.message)
            .collect()
    }

    #[test]
    fn valid_unit_has_no_violations() {
        assert!(messages(&valid_unit()).is_empty());
    }

    #[test]
    fn empty_constraints_are_rejected() {
        let mut unit = valid_unit();
        unit.mini_spec.constraints.clear();
        assert_eq!(
            messages(&unit),
            vec!["mini_spec.constraints must have at least 1 item"]
        );
    }

    #[test]
    fn green_without_red_is_rejected_regardless_of_other_fields() {
        let mut unit = valid_unit();
        unit.first_red.occurred = false;
        let msgs = messages(&unit);
        assert!(msgs.contains(&"first_red.occurred must be true (no green without red)".to_string()));
    }

    #[test]
    fn red_without_failing_checks_is_rejected() {
        let mut unit = valid_unit();
        unit.mini_spec.constraints = vec![constraint("C1", ConstraintType::Security)];
        unit.first_red.failing_checks.clear();
        assert_eq!(
            messages(&unit),
            vec!["first_red.failing_checks must have at least 1 item when occurred is true"]
        );
    }

    #[test]
    fn failing_checks_not_required_when_red_did_not_occur() {
        let mut unit = valid_unit();
        unit.mini_spec.constraints = vec![constraint("C1", ConstraintType::Invariant)];
        unit.first_red.occurred = false;
        unit.first_red.failing_checks.clear();
        assert_eq!(
            messages(&unit),
            vec!["first_red.occurred must be true (no green without red)"]
        );
    }

    #[test]
    fn incomplete_green_is_rejected() {
        let mut unit = valid_unit();
        unit.final_green.all_checks_passed = false;
        assert_eq!(messages(&unit), vec!["final_green.all_checks_passed must be true"]);
    }

    #[test]
    fn changed_spec_needs_decision_and_changes() {
        let mut unit = valid_unit();
        unit.spec_delta.changed = true;
        assert_eq!(
            messages(&unit),
            vec![
                "spec_delta.human_decision must be accepted/rejected when spec_delta.changed is true",
                "spec_delta.changes must be non-empty when spec_delta.changed is true",
            ]
        );
    }

    #[test]
    fn changed_spec_without_changes_is_invalid_even_when_accepted() {
        for decision in [HumanDecision::Accepted, HumanDecision::Rejected] {
            let mut unit = valid_unit();
            unit.spec_delta.changed = true;
            unit.spec_delta.human_decision = Some(decision);
            assert_eq!(
                messages(&unit),
                vec!["spec_delta.changes must be non-empty when spec_delta.changed is true"]
            );
        }
    }

    #[test]
    fn decided_spec_change_passes() {
        let mut unit = valid_unit();
        unit.spec_delta.changed = true;
        unit.spec_delta.human_decision = Some(HumanDecision::Accepted);
        unit.spec_delta.changes = vec![Change {
            kind: Some(ChangeKind::Constraint),
            id: "C1".into(),
            before: "old".into(),
            after: "new".into(),
            reason: "clarified".into(),
        }];
        assert!(messages(&unit).is_empty());
    }

    #[test]
    fn indirect_red_does_not_cover_functional_constraint() {
        let mut unit = valid_unit();
        unit.first_red.failing_checks[0].coupling = Some(Coupling::Indirect);
        assert_eq!(
            messages(&unit),
            vec!["Constraints ['C1'] lack a direct red (required for functional, negative, or performance types)"]
        );

        unit.first_red.failing_checks[0].coupling = Some(Coupling::Direct);
        assert!(messages(&unit).is_empty());
    }

    #[test]
    fn missing_direct_reds_are_aggregated_in_constraint_order() {
        let mut unit = valid_unit();
        unit.mini_spec.constraints = vec![
            constraint("C1", ConstraintType::Functional),
            constraint("C2", ConstraintType::Negative),
            constraint("C3", ConstraintType::Performance),
            constraint("C4", ConstraintType::Compatibility),
        ];
        unit.first_red.failing_checks = vec![
            check("t1", &["C2"], Coupling::Incidental, "https://x/1"),
            check("t2", &["C4"], Coupling::Direct, "https://x/2"),
        ];
        assert_eq!(
            messages(&unit),
            vec!["Constraints ['C1', 'C2', 'C3'] lack a direct red (required for functional, negative, or performance types)"]
        );
    }

    #[test]
    fn exempt_constraint_types_need_no_direct_red() {
        let mut unit = valid_unit();
        unit.mini_spec.constraints = vec![
            constraint("I1", ConstraintType::Invariant),
            constraint("K1", ConstraintType::Compatibility),
            constraint("S1", ConstraintType::Security),
        ];
        unit.first_red.failing_checks = vec![check("t1", &[], Coupling::Incidental, "https://x")];
        assert!(messages(&unit).is_empty());
    }

    #[test]
    fn direct_coverage_is_a_union_across_checks() {
        let mut unit = valid_unit();
        unit.mini_spec.constraints = vec![
            constraint("C1", ConstraintType::Functional),
            constraint("C2", ConstraintType::Functional),
        ];
        unit.first_red.failing_checks = vec![
            check("t1", &["C1"], Coupling::Direct, "https://x/1"),
            check("t2", &["C2"], Coupling::Direct, "https://x/2"),
            check("t3", &["C1", "C2"], Coupling::Direct, "https://x/3"),
        ];
        assert!(messages(&unit).is_empty());
    }

    #[test]
    fn all_violations_accumulate_in_rule_order() {
        let mut unit = WorkUnit::default();
        unit.spec_delta.changed = true;
        let rules: Vec<&str> = InvariantEngine::default()
            .evaluate(&unit, None)
            .iter()
            .map(|v| v.rule)
            .collect();
        assert_eq!(
            rules,
            vec![
                "constraint-presence",
                "red-before-green",
                "green-completeness",
                "spec-delta-consistency",
                "spec-delta-consistency",
            ]
        );
    }

    #[test]
    fn evidence_is_not_probed_without_location() {
        let mut unit = valid_unit();
        unit.first_red.failing_checks[0].evidence_ref = "logs/red.txt".into();
        assert!(messages(&unit).is_empty());
    }

    #[test]
    fn missing_local_evidence_is_a_violation_per_reference() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("green.txt"), "ok").unwrap();
        let mut unit = valid_unit();
        unit.first_red.failing_checks[0].evidence_ref = "logs/red.txt".into();
        unit.final_green.evidence_ref = "green.txt".into();

        let msgs: Vec<String> = InvariantEngine::default()
            .evaluate(&unit, Some(tmp.path()))
            .into_iter()
            .map(|v| v.message)
            .collect();
        assert_eq!(
            msgs,
            vec!["first_red.t1: evidence_ref 'logs/red.txt' does not exist on disk"]
        );
    }

    #[test]
    fn duplicate_constraint_ids_are_reported_once_each() {
        let mut unit = valid_unit();
        unit.mini_spec.constraints = vec![
            constraint("C1", ConstraintType::Functional),
            constraint("C2", ConstraintType::Security),
            constraint("C1", ConstraintType::Functional),
            constraint("C2", ConstraintType::Security),
            constraint("C1", ConstraintType::Functional),
        ];
        assert_eq!(
            messages(&unit),
            vec![
                "mini_spec.constraints has duplicate id 'C1'",
                "mini_spec.constraints has duplicate id 'C2'",
            ]
        );
    }

    #[test]
    fn uniqueness_rule_can_be_disabled() {
        let mut unit = valid_unit();
        unit.mini_spec.constraints.push(constraint("C1", ConstraintType::Functional));
        let engine = InvariantEngine::new(EngineOptions {
            unique_constraint_ids: false,
        });
        assert!(engine.evaluate(&unit, None).is_empty());
        assert!(engine.rules().all(|r| r.id() != "unique-constraint-ids"));
    }
}
