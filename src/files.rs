//! File-level processing: read raw bytes, correct, write back only on change.

use crate::corrector::Corrector;
use crate::types::{FileOutcome, FileReport, RunSummary};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Runs one corrective pass over a single file.
///
/// A missing path is a reported outcome, not an error. Read and write
/// failures propagate; the buffer is fully transformed in memory before
/// any write, so a failed write never leaves a half-applied table.
pub fn process_file(corrector: &Corrector, path: &Path, dry_run: bool) -> io::Result<FileReport> {
    if !path.exists() {
        debug!(path = %path.display(), "target file not found");
        return Ok(FileReport::new(path, FileOutcome::NotFound));
    }

    let original = fs::read(path)?;
    let correction = corrector.correct(&original);

    if !correction.changed() {
        debug!(path = %path.display(), bytes = original.len(), "no malformed sequences");
        return Ok(FileReport::new(path, FileOutcome::Unchanged));
    }

    let outcome = FileOutcome::Corrected {
        replacements: correction.replacements(),
        bytes_before: original.len(),
        bytes_after: correction.bytes().len(),
        hits: correction.hits().to_vec(),
    };

    if dry_run {
        debug!(path = %path.display(), "dry run, skipping write");
    } else {
        fs::write(path, correction.bytes())?;
    }

    Ok(FileReport::new(path, outcome))
}

/// Processes the target list in order, invoking `on_report` after each file.
pub fn process_files<F>(
    corrector: &Corrector,
    paths: &[PathBuf],
    dry_run: bool,
    mut on_report: F,
) -> io::Result<RunSummary>
where
    F: FnMut(&FileReport),
{
    let mut summary = RunSummary::default();

    for path in paths {
        let report = process_file(corrector, path, dry_run)?;
        summary.record(&report);
        on_report(&report);
    }

    Ok(summary)
}

/// Reads an ordered target list: one path per line, blank lines and `#`
/// comment lines ignored.
pub fn read_target_list(path: &Path) -> io::Result<Vec<PathBuf>> {
    let data = fs::read_to_string(path)?;

    Ok(data
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect())
}
