//! no-tabs rule: Disallow tab characters.
//!
//! Reports every maximal run of horizontal tabs as one violation. Tabs are
//! not auto-fixable because the intended indent width is unknown.
//!
//! # Configuration
//!
//! | Option | Type | Default | Description |
//! |--------|------|---------|-------------|
//! | allowIndentationTabs | boolean | false | Allow tab runs inside leading indentation |
//!
//! # Example
//!
//! ```json
//! {
//!   "rules": {
//!     "no-tabs": { "allowIndentationTabs": true }
//!   }
//! }
//! ```

use std::ops::Range;

use linewise_ast::Location;
use linewise_rule::{
    Report, Rule, RuleContext, RuleDefinition, RuleError, RuleMeta, parse_options,
};
use serde::Deserialize;

pub const RULE_ID: &str = "no-tabs";

const UNEXPECTED_TAB: &str = "unexpectedTab";

/// Configuration for the no-tabs rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NoTabsOptions {
    /// Allow tab runs preceded only by whitespace.
    #[serde(default)]
    pub allow_indentation_tabs: bool,
}

/// Configured no-tabs rule.
#[derive(Debug, Clone, Default)]
pub struct NoTabs {
    options: NoTabsOptions,
}

impl NoTabs {
    pub fn new(options: NoTabsOptions) -> Self {
        Self { options }
    }
}

/// Returns the rule definition.
pub fn definition() -> RuleDefinition {
    let meta = RuleMeta::new(RULE_ID)
        .with_description("Disallow all tabs")
        .with_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "allowIndentationTabs": { "type": "boolean", "default": false }
            },
            "additionalProperties": false
        }))
        .with_message(UNEXPECTED_TAB, "Unexpected tab character.", &[]);

    RuleDefinition::new(meta, build)
}

fn build(options: serde_json::Value) -> Result<Box<dyn Rule>, RuleError> {
    Ok(Box::new(NoTabs::new(parse_options(options)?)))
}

impl Rule for NoTabs {
    fn check(&self, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        let source = ctx.source();

        for ((line_number, line), info) in source.lines().zip(source.line_infos()) {
            for run in tab_runs(line) {
                // Everything before the run is leading whitespace.
                if self.options.allow_indentation_tabs && run.start <= info.indent_bytes {
                    continue;
                }

                let loc = Location::on_line(line_number, run.start, run.end);
                ctx.report(Report::new(UNEXPECTED_TAB, loc))?;
            }
        }

        Ok(())
    }
}

/// Byte ranges of the maximal runs of `\t` in a line.
fn tab_runs(line: &str) -> Vec<Range<u32>> {
    let mut runs = Vec::new();
    let mut run_start: Option<usize> = None;

    for (idx, byte) in line.bytes().enumerate() {
        match (byte == b'\t', run_start) {
            (true, None) => run_start = Some(idx),
            (false, Some(start)) => {
                runs.push(start as u32..idx as u32);
                run_start = None;
            }
            _ => {}
        }
    }

    if let Some(start) = run_start {
        runs.push(start as u32..line.len() as u32);
    }

    runs
}
