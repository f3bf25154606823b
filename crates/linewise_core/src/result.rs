//! Lint and fix result types.

use std::collections::HashMap;
use std::time::Duration;

use linewise_rule::{Diagnostic, Severity};

use crate::FixResult;

/// Result of linting a single text.
#[derive(Debug, Clone, Default)]
pub struct LintResult {
    /// Diagnostics ordered by position.
    pub diagnostics: Vec<Diagnostic>,

    /// Per-rule scan durations; empty unless timings are enabled.
    pub timings: HashMap<String, Duration>,
}

impl LintResult {
    /// Creates a new lint result.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            diagnostics,
            timings: HashMap::new(),
        }
    }

    /// Returns true if any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Number of diagnostics with error severity.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Number of diagnostics with warning severity.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Number of diagnostics that carry a fix.
    pub fn fixable_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_fixable()).count()
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Result of fixing a single text.
#[derive(Debug, Clone)]
pub struct FixOutcome {
    /// The text after the last applied pass.
    pub output: String,
    /// Whether `output` differs from the input.
    pub modified: bool,
    /// Number of passes that rewrote the text.
    pub passes: usize,
    /// Total number of fixes applied across passes.
    pub fixes_applied: usize,
    /// How the fix run ended.
    pub status: FixResult,
    /// Violations left in `output`.
    pub remaining: LintResult,
}
