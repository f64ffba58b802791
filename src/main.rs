mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use mojifix::files::{self, read_target_list};
use mojifix::report;
use mojifix::table::ReplacementTable;
use mojifix::Corrector;
use std::path::PathBuf;
use tracing::Level;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .without_time()
        .init();

    let table = match &cli.table {
        Some(path) => ReplacementTable::load(path)
            .with_context(|| format!("failed to load replacement table from {}", path.display()))?,
        None => ReplacementTable::builtin(),
    };
    let corrector = Corrector::new(table).context("invalid replacement table")?;

    let targets = resolve_targets(&cli)?;

    let summary = files::process_files(&corrector, &targets, cli.dry_run, |report| {
        report::render_report(report, cli.verbose, cli.dry_run);
    })
    .context("run aborted by I/O error")?;

    report::render_summary(&summary, cli.dry_run);
    Ok(())
}

/// Targets come from the list file first (in file order), then positionals.
fn resolve_targets(cli: &Cli) -> Result<Vec<PathBuf>> {
    let mut targets = Vec::new();

    if let Some(list) = &cli.list {
        let from_list = read_target_list(list)
            .with_context(|| format!("failed to read target list {}", list.display()))?;
        targets.extend(from_list);
    }
    targets.extend(cli.files.iter().cloned());

    if targets.is_empty() {
        anyhow::bail!("no target files; pass paths or --list <FILE>");
    }
    Ok(targets)
}
