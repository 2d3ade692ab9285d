use crate::domain::constants::URI_SCHEME_MARKER;
use crate::domain::record::WorkUnit;
use std::path::Path;

/// A local `evidence_ref` that does not resolve to a file next to the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingEvidence {
    pub label: String,
    pub reference: String,
}

/// Empty refs and URIs are never probed.
pub fn is_local_ref(reference: &str) -> bool {
    !reference.is_empty() && !reference.contains(URI_SCHEME_MARKER)
}

/// Probes every failing check's evidence, then final_green's, in record order.
pub fn missing_evidence(record: &WorkUnit, location: &Path) -> Vec<MissingEvidence> {
    let labelled = record
        .first_red
        .failing_checks
        .iter()
        .map(|fc| (format!("first_red.{}", fc.label()), fc.evidence_ref.as_str()))
        .chain(std::iter::once((
            "final_green".to_string(),
            record.final_green.evidence_ref.as_str(),
        )));

    let mut out = Vec::new();
    for (label, reference) in labelled {
        if !is_local_ref(reference) {
            continue;
        }
        let exists = location.join(reference).exists();
        tracing::debug!(%label, reference, exists, "evidence probe");
        if !exists {
            out.push(MissingEvidence {
                label,
                reference: reference.to_string(),
            });
        }
    }
    out
}
