//! # linewise_rules
//!
//! Built-in rules shipped with Linewise.
//!
//! | Rule | Fixable | Description |
//! |------|---------|-------------|
//! | [`no-tabs`](no_tabs) | no | Disallow tab characters |
//! | [`no-multiple-empty-lines`](no_multiple_empty_lines) | yes | Limit consecutive blank lines |

pub mod no_multiple_empty_lines;
pub mod no_tabs;

use linewise_rule::RuleDefinition;

/// Definitions of every built-in rule, in registration order.
pub fn builtin_rules() -> Vec<RuleDefinition> {
    vec![no_tabs::definition(), no_multiple_empty_lines::definition()]
}
