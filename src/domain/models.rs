use serde::Serialize;
use std::fmt;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Structural,
    Invariant,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Pass {
    Invariant,
    Advisory,
}

/// A fatal finding. Any non-empty list of these makes the record INVALID.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Violation {
    pub stage: Stage,
    pub rule: &'static str,
    pub message: String,
}

/// Non-fatal guidance from the strict advisory pass.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Warning {
    pub rule: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    #[serde(rename = "VALID")]
    Valid,
    #[serde(rename = "INVALID")]
    Invalid,
}

impl Verdict {
    pub fn exit_code(self) -> u8 {
        match self {
            Verdict::Valid => 0,
            Verdict::Invalid => 1,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Valid => f.write_str(crate::domain::constants::VERDICT_VALID),
            Verdict::Invalid => f.write_str(crate::domain::constants::VERDICT_INVALID),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct ValidationReport {
    pub record: String,
    pub verdict: Verdict,
    pub errors: Vec<Violation>,
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Serialize, Clone)]
pub struct RuleInfo {
    pub id: &'static str,
    pub pass: Pass,
    pub description: &'static str,
}

#[derive(Debug, Serialize, Clone)]
pub struct SchemaReport {
    pub source: String,
    pub schema: serde_json::Value,
}
