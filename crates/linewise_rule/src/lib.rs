//! # linewise_rule
//!
//! Rule interface for Linewise.
//!
//! A rule is described by a [`RuleDefinition`]: its [`RuleMeta`] (id, option
//! schema, message templates) and a factory that turns validated options into
//! a configured [`Rule`]. During a scan the rule reports violations through a
//! [`RuleContext`], which renders messages and checks every location and fix
//! against the source before producing a [`Diagnostic`].

mod context;
mod diagnostic;
mod error;
mod message;
mod meta;
mod rule;

pub use context::{Report, RuleContext};
pub use diagnostic::{Diagnostic, Fix, Severity};
pub use error::RuleError;
pub use message::{MessageArgs, MessageCatalog, MessageSpec, MessageTemplate};
pub use meta::RuleMeta;
pub use rule::{Rule, RuleDefinition, RuleFactory, parse_options};
