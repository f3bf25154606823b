//! Linter error types.

use linewise_ast::SourceError;
use linewise_rule::RuleError;
use thiserror::Error;

/// Errors that can occur while configuring the linter or processing a text.
#[derive(Debug, Error)]
pub enum LinterError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A rule failed while scanning.
    #[error("Rule '{rule_id}' failed: {source}")]
    Rule {
        rule_id: String,
        #[source]
        source: RuleError,
    },

    /// The input text could not be decomposed.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// A fix lies outside the text it is applied to.
    #[error("Invalid fix: {0}")]
    InvalidFix(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LinterError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Wraps a rule failure with the id of the failing rule.
    pub fn rule(rule_id: impl Into<String>, source: RuleError) -> Self {
        Self::Rule {
            rule_id: rule_id.into(),
            source,
        }
    }

    /// Creates an invalid fix error.
    pub fn invalid_fix(message: impl Into<String>) -> Self {
        Self::InvalidFix(message.into())
    }
}
