//! JSON output formatter

use miette::{IntoDiagnostic, Result};

use super::FileReport;

pub fn output_json(reports: &[FileReport]) -> Result<()> {
    println!("{}", render_json(reports)?);
    Ok(())
}

fn render_json(reports: &[FileReport]) -> Result<String> {
    let output: Vec<_> = reports
        .iter()
        .map(|r| {
            serde_json::json!({
                "path": r.path.display().to_string(),
                "diagnostics": r.result.diagnostics,
            })
        })
        .collect();

    serde_json::to_string_pretty(&output).into_diagnostic()
}
