//! Text output formatter

use std::collections::HashMap;
use std::fmt::Write as _;
use std::time::Duration;

use super::FileReport;

pub fn output_text(reports: &[FileReport], timings: bool) {
    print!("{}", render_text(reports));

    if timings {
        print!("{}", render_timings(reports));
    }
}

/// One `path:line:column severity [rule] message` line per diagnostic,
/// followed by a summary. Columns are printed 1-based.
fn render_text(reports: &[FileReport]) -> String {
    let mut out = String::new();

    for report in reports {
        for diag in &report.result.diagnostics {
            let _ = writeln!(
                out,
                "{}:{}:{} {} [{}] {}",
                report.path.display(),
                diag.loc.start.line,
                diag.loc.start.column + 1,
                diag.severity.as_str(),
                diag.rule_id,
                diag.message
            );
        }
    }

    let total_files = reports.len();
    let total_issues: usize = reports.iter().map(|r| r.result.diagnostics.len()).sum();
    let fixable: usize = reports.iter().map(|r| r.result.fixable_count()).sum();

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Checked {} files, found {} issues ({} fixable)",
        total_files, total_issues, fixable
    );

    out
}

fn render_timings(reports: &[FileReport]) -> String {
    let mut out = String::new();
    let mut total_duration = Duration::new(0, 0);
    let mut rule_timings: HashMap<&str, Duration> = HashMap::new();

    for report in reports {
        for (rule, duration) in &report.result.timings {
            *rule_timings.entry(rule.as_str()).or_default() += *duration;
            total_duration += *duration;
        }
    }

    if rule_timings.is_empty() {
        return out;
    }

    let _ = writeln!(out, "\nPerformance Timings:");
    let _ = writeln!(out, "{:<30} | {:<15} | {:<10}", "Rule", "Duration", "%");
    let _ = writeln!(out, "{:-<30}-+-{:-<15}-+-{:-<10}", "", "", "");

    let mut sorted_timings: Vec<_> = rule_timings.into_iter().collect();
    sorted_timings.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    for (rule, duration) in sorted_timings {
        let percentage = if total_duration.as_secs_f64() > 0.0 {
            (duration.as_secs_f64() / total_duration.as_secs_f64()) * 100.0
        } else {
            0.0
        };
        let _ = writeln!(
            out,
            "{:<30} | {:<15?} | {:<10.1}%",
            rule, duration, percentage
        );
    }
    let _ = writeln!(out, "{:-<30}-+-{:-<15}-+-{:-<10}", "", "", "");
    let _ = writeln!(out, "{:<30} | {:<15?}", "Total", total_duration);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use linewise_core::{LintResult, Linter, LinterConfig};
    use std::path::PathBuf;

    fn lint(text: &str) -> LintResult {
        let config = LinterConfig::from_json(
            r#"{ "rules": {
                "no-tabs": "warning",
                "no-multiple-empty-lines": { "max": 1 }
            } }"#,
        )
        .unwrap();
        Linter::new(&config).unwrap().lint_text(text).unwrap()
    }

    #[test]
    fn renders_one_line_per_diagnostic() {
        let reports = vec![
            FileReport::new(PathBuf::from("src/a.js"), lint("a\n\n\n\nb\n")),
            FileReport::new(PathBuf::from("src/b.js"), lint("x\tfoo\n")),
            FileReport::new(PathBuf::from("src/c.js"), lint("ok\n")),
        ];

        insta::assert_snapshot!(render_text(&reports), @r"
        src/a.js:3:1 error [no-multiple-empty-lines] More than 1 blank line not allowed.
        src/b.js:1:2 warning [no-tabs] Unexpected tab character.

        Checked 3 files, found 2 issues (1 fixable)
        ");
    }

    #[test]
    fn timings_table_is_sorted_by_duration() {
        let mut slow = LintResult::new(vec![]);
        slow.timings.insert("no-tabs".to_string(), Duration::from_millis(3));
        slow.timings
            .insert("no-multiple-empty-lines".to_string(), Duration::from_millis(1));
        let reports = vec![FileReport::new(PathBuf::from("a.js"), slow)];

        let table = render_timings(&reports);
        let tabs = table.find("no-tabs").unwrap();
        let blank = table.find("no-multiple-empty-lines").unwrap();

        assert!(tabs < blank);
        assert!(table.contains("Total"));
    }

    #[test]
    fn no_timings_no_table() {
        let reports = vec![FileReport::new(PathBuf::from("a.js"), LintResult::new(vec![]))];
        assert!(render_timings(&reports).is_empty());
    }
}
