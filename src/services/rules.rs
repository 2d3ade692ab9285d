use crate::domain::record::WorkUnit;
use std::path::Path;

/// What a rule may look at: the typed record and, when known, its directory.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub record: &'a WorkUnit,
    pub location: Option<&'a Path>,
}

impl<'a> RuleContext<'a> {
    pub fn new(record: &'a WorkUnit, location: Option<&'a Path>) -> Self {
        Self { record, location }
    }
}

/// One independent predicate over a record. Returns every message it has;
/// an empty list means the rule holds.
pub trait Rule {
    fn id(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn check(&self, ctx: &RuleContext<'_>) -> Vec<String>;
}
