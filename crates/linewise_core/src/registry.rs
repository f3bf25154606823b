//! Rule catalog: registered rule definitions and their configuration.

use std::collections::BTreeMap;

use jsonschema::Validator;
use tracing::debug;

use linewise_rule::{MessageCatalog, Rule, RuleDefinition, RuleMeta, Severity};

use crate::{LinterConfig, LinterError};

/// A registered rule with its compiled messages and options schema.
struct RegisteredRule {
    definition: RuleDefinition,
    messages: MessageCatalog,
    schema: Validator,
}

/// A rule ready to scan, built from validated options.
pub struct ConfiguredRule {
    id: String,
    severity: Severity,
    messages: MessageCatalog,
    rule: Box<dyn Rule>,
}

impl ConfiguredRule {
    /// The rule id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Severity attached to every diagnostic of this rule.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Compiled message templates.
    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    /// The configured rule instance.
    pub fn rule(&self) -> &dyn Rule {
        self.rule.as_ref()
    }
}

impl std::fmt::Debug for ConfiguredRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfiguredRule")
            .field("id", &self.id)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}

/// Registry of rule definitions keyed by id.
#[derive(Default)]
pub struct RuleCatalog {
    rules: BTreeMap<String, RegisteredRule>,
}

impl RuleCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding every built-in rule.
    pub fn builtin() -> Result<Self, LinterError> {
        let mut catalog = Self::new();
        for definition in linewise_rules::builtin_rules() {
            catalog.register(definition)?;
        }
        Ok(catalog)
    }

    /// Registers a rule definition.
    ///
    /// Fails on a duplicate id, a malformed message declaration or an options
    /// schema that does not compile.
    pub fn register(&mut self, definition: RuleDefinition) -> Result<(), LinterError> {
        let id = definition.id().to_string();
        if self.rules.contains_key(&id) {
            return Err(LinterError::config(format!(
                "Rule '{id}' is already registered"
            )));
        }

        let messages = MessageCatalog::compile(&definition.meta().messages)
            .map_err(|e| LinterError::rule(&id, e))?;
        let schema = Validator::new(&definition.meta().schema).map_err(|e| {
            LinterError::config(format!("Invalid options schema for rule '{id}': {e}"))
        })?;

        debug!(rule = %id, "registered rule");
        self.rules.insert(
            id,
            RegisteredRule {
                definition,
                messages,
                schema,
            },
        );
        Ok(())
    }

    /// Returns true if a rule with this id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.rules.contains_key(id)
    }

    /// Metadata of every registered rule, in id order.
    pub fn metas(&self) -> impl Iterator<Item = &RuleMeta> {
        self.rules.values().map(|r| r.definition.meta())
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rule is registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Builds the rules enabled in `config`, in id order.
    ///
    /// Every configured id must be registered, and the options of every
    /// enabled rule must satisfy its schema.
    pub fn configure(&self, config: &LinterConfig) -> Result<Vec<ConfiguredRule>, LinterError> {
        if let Some(id) = config.rules.keys().find(|id| !self.contains(id)) {
            return Err(LinterError::config(format!("Unknown rule '{id}'")));
        }

        let enabled = config.enabled_rules();
        debug!(
            enabled = enabled.len(),
            disabled = config.rules.len() - enabled.len(),
            "configuring rules"
        );

        let mut configured = Vec::with_capacity(enabled.len());
        for (id, option) in enabled {
            let registered = self
                .rules
                .get(id)
                .ok_or_else(|| LinterError::config(format!("Unknown rule '{id}'")))?;

            let severity = option.severity()?;
            let options = option.options();

            if let Err(e) = registered.schema.validate(&options) {
                return Err(LinterError::config(format!(
                    "Invalid options for rule '{id}': {} at {}",
                    e,
                    e.instance_path()
                )));
            }

            let rule = registered.definition.build(options).map_err(|e| {
                LinterError::config(format!("Invalid options for rule '{id}': {e}"))
            })?;

            debug!(rule = %id, severity = severity.as_str(), "configured rule");
            configured.push(ConfiguredRule {
                id: id.to_string(),
                severity,
                messages: registered.messages.clone(),
                rule,
            });
        }

        Ok(configured)
    }
}
