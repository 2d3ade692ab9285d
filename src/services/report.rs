use crate::domain::models::{ValidationReport, Verdict};

/// Text form of the verdict contract:
///
/// ```text
/// INVALID
///
/// - <message>
/// ```
///
/// or `VALID`, optionally followed by a blank line, `WARNINGS` and one
/// `- <warning>` line each.
pub fn render_text(report: &ValidationReport) -> String {
    let mut out = String::new();
    match report.verdict {
        Verdict::Invalid => {
            out.push_str(&format!("{}\n\n", report.verdict));
            for e in &report.errors {
                out.push_str(&format!("- {}\n", e.message));
            }
        }
        Verdict::Valid => {
            out.push_str(&format!("{}\n", report.verdict));
            if !report.warnings.is_empty() {
                out.push_str("\nWARNINGS\n");
                for w in &report.warnings {
                    out.push_str(&format!("- {}\n", w.message));
                }
            }
        }
    }
    out
}
