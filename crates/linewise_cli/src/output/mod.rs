//! Output formatting module

mod json;
mod text;

use std::path::PathBuf;

use linewise_core::LintResult;
use miette::Result;

use crate::cli::OutputFormat;

/// Lint result of one file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub result: LintResult,
}

impl FileReport {
    pub fn new(path: PathBuf, result: LintResult) -> Self {
        Self { path, result }
    }
}

/// Prints the reports and returns whether any error-severity diagnostic remains.
pub fn output_results(reports: &[FileReport], format: OutputFormat, timings: bool) -> Result<bool> {
    let has_errors = reports.iter().any(|r| r.result.has_errors());

    match format {
        OutputFormat::Json => json::output_json(reports)?,
        OutputFormat::Text => text::output_text(reports, timings),
    }

    Ok(has_errors)
}
