//! Rule trait and rule definitions.

use serde::de::DeserializeOwned;

use crate::context::RuleContext;
use crate::error::RuleError;
use crate::meta::RuleMeta;

/// A configured rule, ready to scan.
///
/// A scan must depend only on the context it is given, so configured rules
/// can run in any order or in parallel.
pub trait Rule: Send + Sync {
    /// Scans the context's source and reports violations through it.
    fn check(&self, ctx: &mut RuleContext<'_>) -> Result<(), RuleError>;
}

/// Builds a configured rule from options that already passed schema validation.
pub type RuleFactory = fn(serde_json::Value) -> Result<Box<dyn Rule>, RuleError>;

/// A registrable rule: metadata plus a factory for configured instances.
#[derive(Debug, Clone)]
pub struct RuleDefinition {
    meta: RuleMeta,
    factory: RuleFactory,
}

impl RuleDefinition {
    /// Creates a new definition.
    pub fn new(meta: RuleMeta, factory: RuleFactory) -> Self {
        Self { meta, factory }
    }

    /// The rule's metadata.
    pub fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    /// The rule's id.
    pub fn id(&self) -> &str {
        &self.meta.id
    }

    /// Builds a configured instance.
    pub fn build(&self, options: serde_json::Value) -> Result<Box<dyn Rule>, RuleError> {
        (self.factory)(options)
    }
}

/// Deserializes rule options into the rule's typed configuration.
pub fn parse_options<T: DeserializeOwned>(options: serde_json::Value) -> Result<T, RuleError> {
    serde_json::from_value(options).map_err(|e| RuleError::invalid_options(e.to_string()))
}
