//! Fix application logic

use std::fs;
use std::path::{Path, PathBuf};

use linewise_core::{FixResult, LintResult, Linter};
use miette::{IntoDiagnostic, Result};
use tracing::{debug, warn};

/// Summary of applied fixes.
#[derive(Debug, Default)]
pub struct FixSummary {
    pub total_fixes: usize,
    pub files_fixed: usize,
    pub fixes_by_file: Vec<(PathBuf, usize)>,
}

impl FixSummary {
    fn record(&mut self, path: &Path, fixes: usize) {
        self.total_fixes += fixes;
        self.files_fixed += 1;
        self.fixes_by_file.push((path.to_path_buf(), fixes));
    }
}

/// Fixes one file's content and returns the diagnostics to report.
///
/// With `dry_run` the file is left untouched and the diagnostics of the
/// original content are returned; otherwise the corrected text is written
/// back and the remaining diagnostics are returned.
pub fn fix_file(
    linter: &Linter,
    path: &Path,
    content: &str,
    dry_run: bool,
    summary: &mut FixSummary,
) -> Result<LintResult> {
    let outcome = linter.fix_text(content).into_diagnostic()?;

    match outcome.status {
        FixResult::Converged { .. } => {
            debug!(
                "{}: fixes converged after {} passes",
                path.display(),
                outcome.passes
            );
        }
        FixResult::MaxIterationsReached { iterations } => {
            warn!(
                "{}: stopped fixing after {} passes, some fixes were not applied",
                path.display(),
                iterations
            );
        }
        FixResult::CycleDetected { cycle_length } => {
            warn!(
                "{}: fixes cycle with length {}, output kept at the last pass",
                path.display(),
                cycle_length
            );
        }
    }

    if outcome.modified {
        summary.record(path, outcome.fixes_applied);
    }

    if dry_run {
        return linter.lint_text(content).into_diagnostic();
    }

    if outcome.modified {
        fs::write(path, &outcome.output)
            .map_err(|e| miette::miette!("Failed to write {}: {}", path.display(), e))?;
    }

    Ok(outcome.remaining)
}

/// Outputs the fix summary.
pub fn output_fix_summary(summary: &FixSummary, dry_run: bool) {
    if summary.total_fixes == 0 {
        println!("No fixable issues found.");
        return;
    }

    let action = if dry_run { "Would fix" } else { "Fixed" };
    println!(
        "\n{} {} issues in {} files:",
        action, summary.total_fixes, summary.files_fixed
    );
    print_fix_list(&summary.fixes_by_file);

    if dry_run {
        println!("\nRun without --dry-run to apply fixes.");
    }
}

fn print_fix_list(fixes_by_file: &[(PathBuf, usize)]) {
    for (path, count) in fixes_by_file {
        println!("  {}: {} fixes", path.display(), count);
    }
}
