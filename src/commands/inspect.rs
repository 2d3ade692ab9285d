use crate::*;

pub fn handle_schema(cli: &Cli, auditor: &Auditor) -> anyhow::Result<()> {
    let shape = auditor.shape();
    let report = SchemaReport {
        source: shape.source().to_string(),
        schema: shape.document().clone(),
    };
    if cli.json {
        print_one(true, true, report, |_| String::new())?;
    } else {
        println!("{}", serde_json::to_string_pretty(&report.schema)?);
    }
    Ok(())
}

pub fn handle_rules(cli: &Cli, auditor: &Auditor) -> anyhow::Result<()> {
    let catalog = auditor.rule_catalog();
    print_out(cli.json, &catalog, |r| {
        let pass = match r.pass {
            Pass::Invariant => "invariant",
            Pass::Advisory => "advisory",
        };
        format!("{}\t{}\t{}", pass, r.id, r.description)
    })
}
