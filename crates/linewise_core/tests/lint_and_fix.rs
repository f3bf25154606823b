//! Integration tests for linting and fixing whole texts.
//!
//! These tests drive the public `Linter` API end to end: configuration,
//! parallel rule scans, fix application and convergence.

use linewise_core::{FixResult, Linter, LinterConfig, LinterError, Severity};
use rstest::rstest;

fn linter(json: &str) -> Linter {
    let config = LinterConfig::from_json(json).expect("valid config");
    Linter::new(&config).expect("Failed to create linter")
}

fn both_rules() -> Linter {
    linter(
        r#"{ "rules": {
            "no-tabs": true,
            "no-multiple-empty-lines": { "max": 1, "maxBOF": 0, "maxEOF": 0 }
        } }"#,
    )
}

mod no_tabs {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    #[case::no_tabs("let a = 1;\n", 0)]
    #[case::one_run("\tlet a = 1;\n", 1)]
    #[case::runs_on_many_lines("\ta\n\t\tb\nc\t\td\t\n", 4)]
    fn counts_maximal_runs(#[case] text: &str, #[case] expected: usize) {
        let result = linter(r#"{ "rules": { "no-tabs": true } }"#)
            .lint_text(text)
            .unwrap();

        assert_eq!(result.diagnostics.len(), expected);
    }

    #[test]
    fn indentation_runs_drop_out_when_allowed() {
        let text = "\ta\n\t\tb\nc\t\td\t\n";
        let result = linter(r#"{ "rules": { "no-tabs": { "allowIndentationTabs": true } } }"#)
            .lint_text(text)
            .unwrap();

        let columns: Vec<_> = result
            .diagnostics
            .iter()
            .map(|d| (d.loc.start.line, d.loc.start.column))
            .collect();
        assert_eq!(columns, vec![(3, 1), (3, 4)]);
    }

    #[test]
    fn tab_after_content_is_reported() {
        let result = linter(r#"{ "rules": { "no-tabs": { "allowIndentationTabs": true } } }"#)
            .lint_text("x\tfoo\n")
            .unwrap();

        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].message, "Unexpected tab character.");
    }
}

mod no_multiple_empty_lines {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn collapses_interior_run() {
        let linter = linter(r#"{ "rules": { "no-multiple-empty-lines": { "max": 1 } } }"#);
        let text = "a\n\n\n\n\nb\n";

        let result = linter.lint_text(text).unwrap();
        assert_eq!(result.diagnostics.len(), 1);

        let outcome = linter.fix_text(text).unwrap();
        assert_eq!(outcome.output, "a\n\nb\n");
        assert!(outcome.remaining.diagnostics.is_empty());
    }

    #[test]
    fn judges_each_end_separately() {
        let linter = linter(
            r#"{ "rules": { "no-multiple-empty-lines": { "max": 5, "maxBOF": 0, "maxEOF": 1 } } }"#,
        );
        let text = format!("\n\n\nfoo();\n{}bar();\n\n\n", "\n".repeat(6));

        let result = linter.lint_text(&text).unwrap();
        let ids: Vec<_> = result
            .diagnostics
            .iter()
            .map(|d| d.message_id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec!["blankBeginningOfFile", "consecutiveBlank", "blankEndOfFile"]
        );

        let outcome = linter.fix_text(&text).unwrap();
        assert_eq!(
            outcome.output,
            format!("foo();\n{}bar();\n\n", "\n".repeat(5))
        );
    }

    #[test]
    fn template_literal_body_is_never_blank() {
        let linter = linter(r#"{ "rules": { "no-multiple-empty-lines": { "max": 0 } } }"#);
        let text = "const sql = `\nSELECT 1\n\n\nFROM t\n`;\n";

        assert!(linter.lint_text(text).unwrap().diagnostics.is_empty());
    }

    #[test]
    fn substitution_body_is_checked() {
        let linter = linter(r#"{ "rules": { "no-multiple-empty-lines": { "max": 0 } } }"#);
        let text = "const s = `${\n\nvalue\n}`;\n";

        let result = linter.lint_text(text).unwrap();
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].loc.start.line, 2);
    }
}

mod fixing {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clean_text_is_left_alone() {
        let linter = both_rules();
        let text = "fn main() {\n    let a = 1;\n\n    let b = 2;\n}\n";

        assert!(linter.lint_text(text).unwrap().diagnostics.is_empty());

        let outcome = linter.fix_text(text).unwrap();
        assert!(!outcome.modified);
        assert_eq!(outcome.output, text);
        assert_eq!(outcome.passes, 0);
        assert_eq!(outcome.status, FixResult::Converged { iterations: 1 });
    }

    #[test]
    fn fixes_every_run_and_keeps_tabs() {
        let linter = both_rules();
        let text = "\n\n\tfoo\n\n\n\nbar\n\n\n";

        let outcome = linter.fix_text(text).unwrap();

        assert_eq!(outcome.output, "\tfoo\n\nbar\n");
        assert!(outcome.modified);
        assert!(outcome.status.is_converged());
        assert_eq!(outcome.fixes_applied, 3);

        let remaining: Vec<_> = outcome
            .remaining
            .diagnostics
            .iter()
            .map(|d| d.rule_id.as_str())
            .collect();
        assert_eq!(remaining, vec!["no-tabs"]);
    }

    #[test]
    fn fixed_output_rescans_clean_for_fixable_rules() {
        let linter = linter(
            r#"{ "rules": { "no-multiple-empty-lines": { "max": 2, "maxBOF": 1, "maxEOF": 0 } } }"#,
        );
        let text = "\n\n\n\na\n\n\n\n\n\nb\n\n\n\nc\n\n";

        let outcome = linter.fix_text(text).unwrap();

        assert_eq!(outcome.output, "\na\n\n\nb\n\n\nc\n");
        assert!(linter.lint_text(&outcome.output).unwrap().diagnostics.is_empty());
    }

    #[test]
    fn crlf_line_endings_are_respected() {
        let linter = linter(r#"{ "rules": { "no-multiple-empty-lines": { "max": 1 } } }"#);

        let outcome = linter.fix_text("a\r\n\r\n\r\n\r\nb\r\n").unwrap();
        assert_eq!(outcome.output, "a\r\n\r\nb\r\n");
    }
}

mod configuration {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn severity_is_carried_to_diagnostics() {
        let linter = linter(r#"{ "rules": { "no-tabs": ["warning", {}] } }"#);
        let result = linter.lint_text("\tx\n").unwrap();

        assert_eq!(result.diagnostics[0].severity, Severity::Warning);
        assert!(!result.has_errors());
    }

    #[rstest]
    #[case::missing_max(r#"{ "rules": { "no-multiple-empty-lines": {} } }"#)]
    #[case::unknown_key(r#"{ "rules": { "no-multiple-empty-lines": { "max": 1, "min": 0 } } }"#)]
    #[case::unknown_rule(r#"{ "rules": { "no-trailing-spaces": true } }"#)]
    fn invalid_rule_configuration_fails_before_scanning(#[case] json: &str) {
        let config = LinterConfig::from_json(json).unwrap();

        assert!(matches!(Linter::new(&config), Err(LinterError::Config(_))));
    }
}
