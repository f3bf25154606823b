//! Rule metadata.

use serde::Serialize;

use crate::message::MessageSpec;

/// Static description of a rule: identity, option schema and messages.
#[derive(Debug, Clone, Serialize)]
pub struct RuleMeta {
    /// Unique rule identifier (e.g., "no-tabs").
    pub id: String,

    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether this rule can provide auto-fixes.
    pub fixable: bool,

    /// JSON Schema for rule options.
    ///
    /// Options are always an object; a rule enabled without options is
    /// validated as `{}`.
    pub schema: serde_json::Value,

    /// Messages the rule can emit.
    pub messages: Vec<MessageSpec>,
}

impl RuleMeta {
    /// Creates metadata for a rule that accepts no options.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: None,
            fixable: false,
            schema: serde_json::json!({
                "type": "object",
                "additionalProperties": false
            }),
            messages: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets whether the rule is fixable.
    pub fn with_fixable(mut self, fixable: bool) -> Self {
        self.fixable = fixable;
        self
    }

    /// Sets the options schema.
    pub fn with_schema(mut self, schema: serde_json::Value) -> Self {
        self.schema = schema;
        self
    }

    /// Declares a message.
    pub fn with_message(
        mut self,
        id: impl Into<String>,
        template: impl Into<String>,
        params: &[&str],
    ) -> Self {
        self.messages.push(MessageSpec::new(id, template, params));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_builder() {
        let meta = RuleMeta::new("no-tabs")
            .with_description("Disallow tab characters")
            .with_message("unexpectedTab", "Unexpected tab character.", &[]);

        assert_eq!(meta.id, "no-tabs");
        assert_eq!(meta.description.as_deref(), Some("Disallow tab characters"));
        assert!(!meta.fixable);
        assert_eq!(meta.messages.len(), 1);
        assert_eq!(meta.schema["additionalProperties"], false);
    }

    #[test]
    fn test_meta_serialization() {
        let meta = RuleMeta::new("r").with_fixable(true);
        let json = serde_json::to_value(&meta).unwrap();

        assert_eq!(json["id"], "r");
        assert_eq!(json["fixable"], true);
        assert!(json.get("description").is_none());
    }
}
