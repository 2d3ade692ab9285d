use crate::*;
use std::path::Path;

/// Returns the process exit code for the verdict.
pub fn handle_validate(
    cli: &Cli,
    cfg: &AuditConfig,
    auditor: &Auditor,
    path: &Path,
    strict: bool,
) -> anyhow::Result<u8> {
    let strict = strict || cfg.validate.strict;
    let report = auditor.audit_path(path, strict)?;
    let code = report.verdict.exit_code();
    print_one(cli.json, report.verdict == Verdict::Valid, report, render_text)?;
    Ok(code)
}
