//! Rule error types.

use linewise_ast::{SourceError, Span};
use thiserror::Error;

/// Errors raised while registering, configuring or running a rule.
///
/// Apart from [`RuleError::InvalidOptions`], every variant points at a defect
/// in the rule itself.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The rule computed a location that does not resolve in the source.
    #[error("Invalid location: {0}")]
    Location(#[from] SourceError),

    /// The rule proposed a fix outside the source text.
    #[error("Invalid fix range {}..{}: {source}", .span.start, .span.end)]
    InvalidFix {
        span: Span,
        #[source]
        source: SourceError,
    },

    /// The rule reported a message id it never declared.
    #[error("Unknown message id '{0}'")]
    UnknownMessage(String),

    /// The same message id was declared twice.
    #[error("Duplicate message id '{0}'")]
    DuplicateMessage(String),

    /// A message template is malformed or disagrees with its declared parameters.
    #[error("Invalid message template '{message_id}': {reason}")]
    InvalidTemplate { message_id: String, reason: String },

    /// A report did not supply a declared message argument.
    #[error("Message '{message_id}' is missing argument '{name}'")]
    MissingArgument { message_id: String, name: String },

    /// A report supplied an argument the message does not declare.
    #[error("Message '{message_id}' does not declare argument '{name}'")]
    UnexpectedArgument { message_id: String, name: String },

    /// Rule options failed validation.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

impl RuleError {
    /// Creates an invalid template error.
    pub fn invalid_template(message_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            message_id: message_id.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid options error.
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions(message.into())
    }
}
