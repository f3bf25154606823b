//! Rules command implementation

use linewise_core::RuleCatalog;
use miette::{IntoDiagnostic, Result};

pub fn run_rules() -> Result<()> {
    let catalog = RuleCatalog::builtin().into_diagnostic()?;

    println!("Available rules:");
    for meta in catalog.metas() {
        let fixable = if meta.fixable { " (fixable)" } else { "" };
        println!(
            "  {}{}: {}",
            meta.id,
            fixable,
            meta.description.as_deref().unwrap_or("")
        );
    }

    Ok(())
}
