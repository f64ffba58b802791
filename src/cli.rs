use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mojifix")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Repairs double-encoded UTF-8 (Latin-1 mojibake) in source files")]
pub struct Cli {
    /// Target files, processed in the order given
    pub files: Vec<PathBuf>,

    /// Read additional targets from a list file (one path per line, # comments)
    #[arg(short, long)]
    pub list: Option<PathBuf>,

    /// Load a replacement table from JSON instead of the built-in one
    #[arg(short, long)]
    pub table: Option<PathBuf>,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Per-pattern counts and debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
