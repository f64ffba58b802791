//! Thin presentation layer translating structured outcomes to console text.

use crate::types::{FileOutcome, FileReport, RunSummary};
use console::style;

pub fn render_report(report: &FileReport, verbose: bool, dry_run: bool) {
    let path = report.path.display();

    match &report.outcome {
        FileOutcome::NotFound => {
            println!("{} {}", style("✗ Not found:").yellow(), path);
        }
        FileOutcome::Unchanged => {
            println!("Processing: {}", path);
            println!("  {} No changes", style("-").dim());
        }
        FileOutcome::Corrected {
            replacements,
            bytes_before,
            bytes_after,
            hits,
        } => {
            println!("Processing: {}", path);
            let verb = if dry_run { "Would correct" } else { "Corrected" };
            println!(
                "  {} {} ({} replacements, {} bytes removed)",
                style("✓").green(),
                verb,
                replacements,
                bytes_before - bytes_after
            );
            if verbose {
                for hit in hits {
                    println!("      {} × {}", hit.count, hit.glyph);
                }
            }
        }
    }
}

pub fn render_summary(summary: &RunSummary, dry_run: bool) {
    let verb = if dry_run {
        "files would be corrected"
    } else {
        "files corrected"
    };
    println!("\nTotal: {} {}", style(summary.corrected).bold(), verb);

    if summary.missing > 0 {
        println!(
            "{}",
            style(format!("{} target(s) not found", summary.missing)).yellow()
        );
    }
}
