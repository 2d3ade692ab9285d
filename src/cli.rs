use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ahs", version, about = "Audit WorkUnit records for red-before-green discipline")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Config file (default: ~/.config/ahs/config.toml when present)"
    )]
    pub config: Option<PathBuf>,
    #[arg(short, long, global = true, help = "Enable debug logging on stderr")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate one WorkUnit record (exit 0 VALID, 1 INVALID, 2 error)
    Validate {
        #[arg(long, help = "Also report non-fatal advisory warnings")]
        strict: bool,
        #[arg(help = "Path to the record (.yaml, .yml or .json)")]
        path: PathBuf,
    },
    /// Print the structural schema records are checked against
    Schema,
    /// List invariant and advisory rules in evaluation order
    Rules,
}
