//! Integration tests for linters built from a hand-assembled rule catalog.
//!
//! The built-in rules never propose overlapping fixes, so these rules do:
//! each one rewrites the first occurrence of a pattern.

use linewise_ast::{Location, Span};
use linewise_core::{
    FixResult, Linter, LinterConfig, LinterError, RuleCatalog, RuleOption,
    apply_fixes_to_content,
};
use linewise_rule::{Fix, Report, Rule, RuleContext, RuleDefinition, RuleError, RuleMeta};
use pretty_assertions::assert_eq;

/// Rewrites the first occurrence of `pattern` with `replacement`.
struct Rewrite {
    pattern: &'static str,
    replacement: &'static str,
}

impl Rule for Rewrite {
    fn check(&self, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        let source = ctx.source();
        let Some(found) = source.text().find(self.pattern) else {
            return Ok(());
        };

        let start = found as u32;
        let end = start + self.pattern.len() as u32;
        let loc = Location::new(source.position_of(start)?, source.position_of(end)?);

        ctx.report(
            Report::new("rewrite", loc).with_fix(Fix::new(Span::new(start, end), self.replacement)),
        )
    }
}

/// Appends a `!` to every text it sees, so it never settles.
struct AppendBang;

impl Rule for AppendBang {
    fn check(&self, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        let source = ctx.source();
        let end = source.position_of(source.len())?;
        let fix = Fix::insert(source.len(), "!");

        ctx.report(Report::new("rewrite", Location::new(end, end)).with_fix(fix))
    }
}

/// Reports on a line that does not exist.
struct MissingLine;

impl Rule for MissingLine {
    fn check(&self, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        ctx.report(Report::new("rewrite", Location::on_line(99, 0, 1)))
    }
}

fn definition(id: &str, factory: linewise_rule::RuleFactory) -> RuleDefinition {
    let meta = RuleMeta::new(id)
        .with_fixable(true)
        .with_message("rewrite", "Text can be rewritten.", &[]);
    RuleDefinition::new(meta, factory)
}

fn squash_pairs(_: serde_json::Value) -> Result<Box<dyn Rule>, RuleError> {
    Ok(Box::new(Rewrite {
        pattern: "aa",
        replacement: "a",
    }))
}

fn drop_leading_a(_: serde_json::Value) -> Result<Box<dyn Rule>, RuleError> {
    Ok(Box::new(Rewrite {
        pattern: "ab",
        replacement: "b",
    }))
}

fn keep_x(_: serde_json::Value) -> Result<Box<dyn Rule>, RuleError> {
    Ok(Box::new(Rewrite {
        pattern: "x",
        replacement: "x",
    }))
}

fn upper_x(_: serde_json::Value) -> Result<Box<dyn Rule>, RuleError> {
    Ok(Box::new(Rewrite {
        pattern: "x",
        replacement: "X",
    }))
}

fn append_bang(_: serde_json::Value) -> Result<Box<dyn Rule>, RuleError> {
    Ok(Box::new(AppendBang))
}

fn missing_line(_: serde_json::Value) -> Result<Box<dyn Rule>, RuleError> {
    Ok(Box::new(MissingLine))
}

/// Builds a linter enabling every rule of `definitions`.
fn linter_with(definitions: Vec<RuleDefinition>, mut config: LinterConfig) -> Linter {
    let mut catalog = RuleCatalog::new();
    for definition in definitions {
        config = config.with_rule(definition.id().to_string(), RuleOption::Enabled(true));
        catalog.register(definition).expect("rule registers");
    }
    Linter::with_catalog(&catalog, &config).expect("Failed to create linter")
}

#[test]
fn overlapping_fix_is_deferred_then_applied() {
    let linter = linter_with(
        vec![
            definition("squash-pairs", squash_pairs),
            definition("drop-leading-a", drop_leading_a),
        ],
        LinterConfig::new(),
    );

    let first_scan = linter.lint_text("aab").unwrap();
    assert_eq!(first_scan.diagnostics.len(), 2);
    let first_pass = apply_fixes_to_content("aab", &first_scan.diagnostics).unwrap();
    assert_eq!(first_pass.fixes_applied, 1);
    assert_eq!(first_pass.deferred, 1);
    assert_eq!(first_pass.fixed_content, "ab");

    let outcome = linter.fix_text("aab").unwrap();

    assert_eq!(outcome.output, "b");
    assert_eq!(outcome.passes, 2);
    assert_eq!(outcome.fixes_applied, 2);
    assert_eq!(outcome.status, FixResult::Converged { iterations: 3 });
    assert!(outcome.remaining.diagnostics.is_empty());
}

#[test]
fn pass_cap_stops_fixing_and_reports_the_rest() {
    let config = LinterConfig::from_json(r#"{ "maxFixPasses": 3 }"#).unwrap();
    let linter = linter_with(vec![definition("append-bang", append_bang)], config);

    let outcome = linter.fix_text("go").unwrap();

    assert_eq!(outcome.output, "go!!!");
    assert!(outcome.modified);
    assert_eq!(outcome.passes, 3);
    assert_eq!(outcome.status, FixResult::MaxIterationsReached { iterations: 3 });
    assert_eq!(outcome.remaining.diagnostics.len(), 1);
    assert!(outcome.remaining.has_errors());
}

#[test]
fn identity_fix_with_waiting_fix_is_not_converged() {
    let linter = linter_with(
        vec![definition("keep-x", keep_x), definition("upper-x", upper_x)],
        LinterConfig::new(),
    );

    let outcome = linter.fix_text("x\n").unwrap();

    assert!(!outcome.status.is_converged());
    assert_eq!(outcome.status, FixResult::CycleDetected { cycle_length: 1 });
    assert_eq!(outcome.output, "x\n");
    assert!(!outcome.modified);
    assert_eq!(outcome.remaining.diagnostics.len(), 2);
}

#[test]
fn unresolvable_location_names_the_rule() {
    let linter = linter_with(
        vec![
            definition("missing-line", missing_line),
            definition("squash-pairs", squash_pairs),
        ],
        LinterConfig::new(),
    );

    let err = linter.lint_text("aa\n").unwrap_err();

    match err {
        LinterError::Rule { rule_id, source } => {
            assert_eq!(rule_id, "missing-line");
            assert!(matches!(source, RuleError::Location(_)));
        }
        other => panic!("expected a rule error, got {other:?}"),
    }
}
