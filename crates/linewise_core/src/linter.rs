//! Core linter engine.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::debug;

use linewise_ast::{ExcludedRegions, SourceText};
use linewise_rule::{Diagnostic, RuleContext};

use crate::fixer::apply_fixes_to_content;
use crate::registry::{ConfiguredRule, RuleCatalog};
use crate::{FixCoordinator, FixOutcome, LintResult, LinterConfig, LinterError};

/// Diagnostics and elapsed time of one rule over one text.
struct RuleScan {
    rule_id: String,
    diagnostics: Vec<Diagnostic>,
    elapsed: Duration,
}

/// The core linter engine.
///
/// Holds the configured rules and runs them over texts. Construction fails
/// on any configuration problem, so a built linter never rejects options
/// mid-scan.
#[derive(Debug)]
pub struct Linter {
    /// Rules enabled by the configuration, in id order.
    rules: Vec<ConfiguredRule>,
    /// Maximum scan and fix passes in `fix_text`.
    max_fix_passes: usize,
    /// Whether to record per-rule durations.
    timings: bool,
}

impl Linter {
    /// Creates a new linter over the built-in rules.
    pub fn new(config: &LinterConfig) -> Result<Self, LinterError> {
        let catalog = RuleCatalog::builtin()?;
        Self::with_catalog(&catalog, config)
    }

    /// Creates a new linter over the rules of `catalog`.
    pub fn with_catalog(
        catalog: &RuleCatalog,
        config: &LinterConfig,
    ) -> Result<Self, LinterError> {
        if config.max_fix_passes == 0 {
            return Err(LinterError::config("maxFixPasses must be at least 1"));
        }

        let rules = catalog.configure(config)?;
        debug!("Linter configured with {} rules", rules.len());

        Ok(Self {
            rules,
            max_fix_passes: config.max_fix_passes,
            timings: config.timings,
        })
    }

    /// Ids of the enabled rules.
    pub fn rule_ids(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.id())
    }

    /// Scans `text` with every enabled rule.
    ///
    /// Diagnostics are ordered by position, then by rule id. A rule that
    /// reports an unresolvable location or fix fails the whole call with
    /// [`LinterError::Rule`].
    pub fn lint_text(&self, text: &str) -> Result<LintResult, LinterError> {
        let source = SourceText::new(text)?;
        let excluded = ExcludedRegions::template_literals(&source)?;

        let scans = self
            .rules
            .par_iter()
            .map(|configured| Self::scan_rule(configured, &source, &excluded))
            .collect::<Result<Vec<_>, _>>()?;

        let mut diagnostics = Vec::new();
        let mut timings = HashMap::new();

        for scan in scans {
            if self.timings {
                timings.insert(scan.rule_id, scan.elapsed);
            }
            diagnostics.extend(scan.diagnostics);
        }

        diagnostics.sort_by(|a, b| {
            (a.span.start, a.span.end, &a.rule_id).cmp(&(b.span.start, b.span.end, &b.rule_id))
        });

        Ok(LintResult {
            diagnostics,
            timings,
        })
    }

    fn scan_rule(
        configured: &ConfiguredRule,
        source: &SourceText<'_>,
        excluded: &ExcludedRegions,
    ) -> Result<RuleScan, LinterError> {
        let start = Instant::now();
        let mut ctx = RuleContext::new(
            source,
            excluded,
            configured.id(),
            configured.messages(),
            configured.severity(),
        );

        configured
            .rule()
            .check(&mut ctx)
            .map_err(|e| LinterError::rule(configured.id(), e))?;

        let diagnostics = ctx.into_diagnostics();
        let elapsed = start.elapsed();
        debug!(
            rule = configured.id(),
            diagnostics = diagnostics.len(),
            ?elapsed,
            "rule scan finished"
        );

        Ok(RuleScan {
            rule_id: configured.id().to_string(),
            diagnostics,
            elapsed,
        })
    }

    /// Repeats scan and fix passes until the text settles, the pass cap is
    /// reached or a cycle is detected, then reports what is left.
    pub fn fix_text(&self, text: &str) -> Result<FixOutcome, LinterError> {
        let coordinator = FixCoordinator::new(self.max_fix_passes);
        let mut output = text.to_string();
        let mut passes = 0;
        let mut fixes_applied = 0;

        let status = coordinator.apply_fixes_iterative(
            &mut output,
            |current: &str| -> Result<Option<String>, LinterError> {
                let scan = self.lint_text(current)?;
                let result = apply_fixes_to_content(current, &scan.diagnostics)?;

                if !result.modified && result.deferred == 0 {
                    return Ok(None);
                }

                passes += 1;
                fixes_applied += result.fixes_applied;
                debug!(
                    pass = passes,
                    applied = result.fixes_applied,
                    deferred = result.deferred,
                    "fix pass applied"
                );
                Ok(Some(result.fixed_content))
            },
        )?;

        let remaining = self.lint_text(&output)?;
        let modified = output != text;

        Ok(FixOutcome {
            output,
            modified,
            passes,
            fixes_applied,
            status,
            remaining,
        })
    }
}
