use ahs_audit::{init_tracing, print_error, run, AuditError, Cli};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            match err.downcast_ref::<AuditError>() {
                Some(audit) => print_error(cli.json, audit),
                None => eprintln!("error: {:#}", err),
            }
            ExitCode::from(2)
        }
    }
}
