//! Check command implementation

use std::fs;
use std::path::{Path, PathBuf};

use linewise_core::{Linter, LinterConfig};
use miette::{IntoDiagnostic, Result};
use tracing::{info, warn};

use crate::cli::OutputFormat;
use crate::fix::{FixSummary, fix_file, output_fix_summary};
use crate::output::{FileReport, output_results};

pub fn run_check(
    config_path: Option<&Path>,
    files: &[PathBuf],
    format: OutputFormat,
    fix: bool,
    dry_run: bool,
    timings: bool,
) -> Result<bool> {
    let mut config = if let Some(path) = config_path {
        LinterConfig::from_file(path).into_diagnostic()?
    } else {
        find_config()?
    };

    // Override timings from CLI
    if timings {
        config.timings = true;
    }

    let linter = Linter::new(&config).into_diagnostic()?;
    let mut reports = Vec::with_capacity(files.len());
    let mut summary = FixSummary::default();

    for path in files {
        let content = fs::read_to_string(path)
            .map_err(|e| miette::miette!("Failed to read {}: {}", path.display(), e))?;

        let result = if fix {
            fix_file(&linter, path, &content, dry_run, &mut summary)?
        } else {
            linter.lint_text(&content).into_diagnostic()?
        };

        reports.push(FileReport::new(path.clone(), result));
    }

    let has_errors = output_results(&reports, format, config.timings)?;

    if fix && format == OutputFormat::Text {
        output_fix_summary(&summary, dry_run);
    }

    info!(
        files = reports.len(),
        issues = reports.iter().map(|r| r.result.diagnostics.len()).sum::<usize>(),
        "check finished"
    );

    Ok(has_errors)
}

fn find_config() -> Result<LinterConfig> {
    if let Some(path) = LinterConfig::discover(".") {
        info!("Using config: {}", path.display());
        return LinterConfig::from_file(&path).into_diagnostic();
    }

    warn!("No config file found, no rules are enabled");
    Ok(LinterConfig::new())
}
