//! Per-scan reporting context handed to rules.

use linewise_ast::{ExcludedRegions, Location, SourceText};
use tracing::trace;

use crate::diagnostic::{Diagnostic, Fix, Severity};
use crate::error::RuleError;
use crate::message::{MessageArgs, MessageCatalog};

/// A violation a rule wants to report.
#[derive(Debug, Clone)]
pub struct Report {
    message_id: String,
    loc: Location,
    args: MessageArgs,
    fix: Option<Fix>,
}

impl Report {
    /// Creates a report for the message `message_id` at `loc`.
    pub fn new(message_id: impl Into<String>, loc: Location) -> Self {
        Self {
            message_id: message_id.into(),
            loc,
            args: MessageArgs::new(),
            fix: None,
        }
    }

    /// Adds a message argument.
    pub fn arg(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.args.insert(name.into(), value.to_string());
        self
    }

    /// Attaches a fix.
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }
}

/// Everything a rule sees during one scan, plus the diagnostics it collects.
///
/// The context never mutates the source; reporting only appends to the
/// diagnostic list of the current pass.
pub struct RuleContext<'a> {
    source: &'a SourceText<'a>,
    excluded: &'a ExcludedRegions,
    rule_id: &'a str,
    messages: &'a MessageCatalog,
    severity: Severity,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> RuleContext<'a> {
    /// Creates a context for one rule over one source text.
    pub fn new(
        source: &'a SourceText<'a>,
        excluded: &'a ExcludedRegions,
        rule_id: &'a str,
        messages: &'a MessageCatalog,
        severity: Severity,
    ) -> Self {
        Self {
            source,
            excluded,
            rule_id,
            messages,
            severity,
            diagnostics: Vec::new(),
        }
    }

    /// The source being scanned.
    pub fn source(&self) -> &'a SourceText<'a> {
        self.source
    }

    /// Lines that must not be judged as blank.
    pub fn excluded_regions(&self) -> &'a ExcludedRegions {
        self.excluded
    }

    /// The id of the rule this context belongs to.
    pub fn rule_id(&self) -> &'a str {
        self.rule_id
    }

    /// Renders and records a diagnostic.
    ///
    /// Fails if the message is unknown, its arguments do not match the
    /// declaration, the location does not resolve, or the fix range lies
    /// outside the text.
    pub fn report(&mut self, report: Report) -> Result<(), RuleError> {
        let message = self.messages.render(&report.message_id, &report.args)?;
        let span = self.source.span_of(report.loc)?;

        if let Some(fix) = &report.fix {
            self.source
                .check_span(fix.span)
                .map_err(|source| RuleError::InvalidFix {
                    span: fix.span,
                    source,
                })?;
        }

        trace!(
            rule = self.rule_id,
            message_id = %report.message_id,
            start = span.start,
            end = span.end,
            "reported"
        );

        let mut diagnostic = Diagnostic::new(
            self.rule_id,
            report.message_id,
            message,
            span,
            report.loc,
        )
        .with_severity(self.severity);
        diagnostic.fix = report.fix;

        self.diagnostics.push(diagnostic);
        Ok(())
    }

    /// Diagnostics reported so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consumes the context, returning its diagnostics.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
