//! Auto-fix functionality for applying diagnostic fixes.

use tracing::{debug, warn};

use linewise_rule::{Diagnostic, Fix};

use crate::LinterError;

/// Result of applying one pass of fixes to a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixerResult {
    /// Number of fixes applied.
    pub fixes_applied: usize,
    /// Number of fixes left for a later pass because they conflict with an
    /// applied one.
    pub deferred: usize,
    /// The fixed content.
    pub fixed_content: String,
    /// Whether the content was modified.
    pub modified: bool,
}

impl FixerResult {
    /// Creates a new fixer result.
    pub fn new(
        fixes_applied: usize,
        deferred: usize,
        fixed_content: String,
        original: &str,
    ) -> Self {
        let modified = fixed_content != original;
        Self {
            fixes_applied,
            deferred,
            fixed_content,
            modified,
        }
    }

    /// Creates a result indicating no changes were made.
    pub fn unchanged(content: String) -> Self {
        Self {
            fixes_applied: 0,
            deferred: 0,
            fixed_content: content,
            modified: false,
        }
    }
}

/// Applies the non-conflicting fixes of `diagnostics` to `content`.
///
/// Fixes are ordered by `(start, end)` and accepted greedily; a fix that
/// starts at or before the end of the last accepted one is deferred. The
/// accepted fixes are spliced in one left-to-right pass over the original
/// text, so every span refers to `content` as given.
pub fn apply_fixes_to_content(
    content: &str,
    diagnostics: &[Diagnostic],
) -> Result<FixerResult, LinterError> {
    let mut fixes: Vec<&Fix> = diagnostics.iter().filter_map(|d| d.fix.as_ref()).collect();

    if fixes.is_empty() {
        return Ok(FixerResult::unchanged(content.to_string()));
    }

    for fix in &fixes {
        validate_fix(content, fix)?;
    }

    fixes.sort_by_key(|fix| (fix.span.start, fix.span.end));
    let total = fixes.len();
    let accepted = filter_conflicting_fixes(fixes);
    let deferred = total - accepted.len();

    let mut result = String::with_capacity(content.len());
    let mut cursor = 0usize;

    for fix in &accepted {
        let range = fix.span.range();
        debug!(
            "Applying fix: replace [{}..{}] with {:?}",
            range.start, range.end, fix.text
        );

        result.push_str(&content[cursor..range.start]);
        result.push_str(&fix.text);
        cursor = range.end;
    }
    result.push_str(&content[cursor..]);

    Ok(FixerResult::new(accepted.len(), deferred, result, content))
}

fn validate_fix(content: &str, fix: &Fix) -> Result<(), LinterError> {
    let start = fix.span.start as usize;
    let end = fix.span.end as usize;

    if start > end || end > content.len() {
        return Err(LinterError::invalid_fix(format!(
            "span {}..{} does not fit text of length {}",
            start,
            end,
            content.len()
        )));
    }
    if !content.is_char_boundary(start) || !content.is_char_boundary(end) {
        return Err(LinterError::invalid_fix(format!(
            "span {}..{} splits a character",
            start, end
        )));
    }

    Ok(())
}

/// Keeps the fixes that do not conflict with an earlier accepted fix.
///
/// **Note:** `fixes` must be sorted by `(start, end)` ascending. Touching
/// fixes conflict, so two insertions at one offset never race.
pub(crate) fn filter_conflicting_fixes(fixes: Vec<&Fix>) -> Vec<&Fix> {
    #[cfg(debug_assertions)]
    {
        for window in fixes.windows(2) {
            debug_assert!(
                (window[0].span.start, window[0].span.end)
                    <= (window[1].span.start, window[1].span.end),
                "Fixes must be sorted by (start, end) for filter_conflicting_fixes"
            );
        }
    }

    let mut result: Vec<&Fix> = Vec::with_capacity(fixes.len());

    for fix in fixes {
        let conflicts = result
            .last()
            .is_some_and(|last| fix.span.start <= last.span.end);

        if conflicts {
            warn!(
                "Deferring conflicting fix at [{}, {}]",
                fix.span.start, fix.span.end
            );
        } else {
            result.push(fix);
        }
    }

    result
}
