//! Template literal island scanning.
//!
//! Finds the raw text parts ("quasis") of JavaScript-style template literals
//! without parsing the surrounding language. Comments and quoted strings are
//! skipped so that backticks inside them are not mistaken for templates, and
//! `${ ... }` substitutions are followed with brace counting, including
//! templates nested inside substitutions. Regular expression literals are
//! not recognized.

use crate::span::Span;

#[derive(Debug, Clone, Copy)]
enum Mode {
    Code,
    Template { quasi_start: usize },
}

/// Returns the byte span of every template quasi in `text`, in source order.
///
/// A quasi runs from its opening delimiter (a backtick, or the `}` closing a
/// substitution) through its closing delimiter (a backtick, or `${`). An
/// unterminated template extends to the end of the text.
pub fn template_literal_spans(text: &str) -> Vec<Span> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut mode = Mode::Code;
    // Brace depth of the code enclosing each open substitution.
    let mut outer_depths: Vec<u32> = Vec::new();
    let mut depth = 0u32;
    let mut idx = 0usize;

    while idx < bytes.len() {
        match mode {
            Mode::Template { quasi_start } => match bytes[idx] {
                b'\\' => idx += 2,
                b'`' => {
                    spans.push(quasi_span(quasi_start, idx + 1));
                    mode = Mode::Code;
                    idx += 1;
                }
                b'$' if bytes.get(idx + 1) == Some(&b'{') => {
                    spans.push(quasi_span(quasi_start, idx + 2));
                    outer_depths.push(depth);
                    depth = 0;
                    mode = Mode::Code;
                    idx += 2;
                }
                _ => idx += 1,
            },
            Mode::Code => {
                if let Some(next) = skip_line_comment(bytes, idx)
                    .or_else(|| skip_block_comment(bytes, idx))
                    .or_else(|| skip_quoted_string(bytes, idx))
                {
                    idx = next;
                    continue;
                }

                match bytes[idx] {
                    b'`' => mode = Mode::Template { quasi_start: idx },
                    b'{' => depth += 1,
                    b'}' if depth > 0 => depth -= 1,
                    b'}' => {
                        if let Some(outer) = outer_depths.pop() {
                            depth = outer;
                            mode = Mode::Template { quasi_start: idx };
                        }
                    }
                    _ => {}
                }
                idx += 1;
            }
        }
    }

    if let Mode::Template { quasi_start } = mode {
        spans.push(quasi_span(quasi_start, bytes.len()));
    }

    spans
}

fn quasi_span(start: usize, end: usize) -> Span {
    Span::new(start as u32, end as u32)
}

fn skip_line_comment(bytes: &[u8], idx: usize) -> Option<usize> {
    if !(bytes.get(idx) == Some(&b'/') && bytes.get(idx + 1) == Some(&b'/')) {
        return None;
    }

    let mut cursor = idx + 2;

    while cursor < bytes.len() && !matches!(bytes[cursor], b'\n' | b'\r') {
        cursor += 1;
    }

    Some(cursor)
}

fn skip_block_comment(bytes: &[u8], idx: usize) -> Option<usize> {
    if !(bytes.get(idx) == Some(&b'/') && bytes.get(idx + 1) == Some(&b'*')) {
        return None;
    }

    let mut cursor = idx + 2;

    while cursor + 1 < bytes.len() {
        if bytes[cursor] == b'*' && bytes[cursor + 1] == b'/' {
            return Some(cursor + 2);
        }
        cursor += 1;
    }

    Some(bytes.len())
}

/// Skips a `'` or `"` string. Such strings cannot span lines, so an
/// unterminated one ends at the line break.
fn skip_quoted_string(bytes: &[u8], idx: usize) -> Option<usize> {
    let quote = *bytes.get(idx)?;
    if quote != b'\'' && quote != b'"' {
        return None;
    }

    let mut cursor = idx + 1;

    while cursor < bytes.len() {
        match bytes[cursor] {
            b'\\' => cursor += 2,
            b'\n' | b'\r' => return Some(cursor),
            ch if ch == quote => return Some(cursor + 1),
            _ => cursor += 1,
        }
    }

    Some(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn quasis(text: &str) -> Vec<&str> {
        template_literal_spans(text)
            .into_iter()
            .map(|span| &text[span.range()])
            .collect()
    }

    #[test]
    fn test_plain_template() {
        assert_eq!(quasis("let a = `x\n\ny`;"), vec!["`x\n\ny`"]);
    }

    #[test]
    fn test_no_templates() {
        assert!(template_literal_spans("let a = 'b';\nlet c = \"d\";\n").is_empty());
    }

    #[test]
    fn test_substitutions_split_quasis() {
        assert_eq!(
            quasis("`a${b}c${d}e`"),
            vec!["`a${", "}c${", "}e`"]
        );
    }

    #[test]
    fn test_object_literal_inside_substitution() {
        assert_eq!(quasis("`a${ {k: 1}.k }b`"), vec!["`a${", "}b`"]);
    }

    #[test]
    fn test_nested_template() {
        assert_eq!(
            quasis("`outer ${`inner`} end`"),
            vec!["`outer ${", "`inner`", "} end`"]
        );
    }

    #[test]
    fn test_escaped_backtick() {
        assert_eq!(quasis(r"`a\`b`"), vec![r"`a\`b`"]);
    }

    #[test]
    fn test_backticks_in_comments_and_strings_are_ignored() {
        let text = "// `not\n/* `not */\nlet s = '`';\nlet t = \"`\";\nlet u = `yes`;\n";

        assert_eq!(quasis(text), vec!["`yes`"]);
    }

    #[test]
    fn test_unterminated_template_runs_to_end() {
        assert_eq!(quasis("x = `abc\n\n"), vec!["`abc\n\n"]);
    }

    #[test]
    fn test_stray_closing_brace_outside_template() {
        assert_eq!(quasis("}\n`a`"), vec!["`a`"]);
    }
}
