//! Linter configuration.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};

use linewise_rule::Severity;

use crate::LinterError;

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Result<Validator, String>> = OnceLock::new();

/// Configuration file names looked up by [`LinterConfig::discover`], in order.
pub const CONFIG_FILES: &[&str] = &[".linewise.jsonc", ".linewise.json"];

/// Default cap on scan and fix passes.
pub const DEFAULT_MAX_FIX_PASSES: usize = 10;

/// Configuration for the linter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LinterConfig {
    /// Rule configuration keyed by rule id.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleOption>,

    /// Maximum number of scan and fix passes.
    #[serde(default = "default_max_fix_passes")]
    pub max_fix_passes: usize,

    /// Whether to record per-rule scan durations.
    #[serde(default)]
    pub timings: bool,
}

fn default_max_fix_passes() -> usize {
    DEFAULT_MAX_FIX_PASSES
}

/// Configuration for a single rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RuleOption {
    /// Rule is enabled/disabled (boolean).
    Enabled(bool),
    /// Rule is enabled with severity string ("error", "warning", "info", "off").
    Severity(String),
    /// Rule is enabled with severity and options: `["warning", { ... }]`.
    SeverityWithOptions(String, serde_json::Map<String, serde_json::Value>),
    /// Rule is enabled with specific options object.
    Options(serde_json::Map<String, serde_json::Value>),
}

impl RuleOption {
    /// Returns whether the rule is enabled.
    pub fn is_enabled(&self) -> bool {
        match self {
            RuleOption::Enabled(enabled) => *enabled,
            RuleOption::Severity(s) | RuleOption::SeverityWithOptions(s, _) => s != "off",
            RuleOption::Options(_) => true,
        }
    }

    /// Severity of an enabled rule.
    pub fn severity(&self) -> Result<Severity, LinterError> {
        match self {
            RuleOption::Severity(s) | RuleOption::SeverityWithOptions(s, _) => parse_severity(s),
            RuleOption::Enabled(_) | RuleOption::Options(_) => Ok(Severity::default()),
        }
    }

    /// Gets the rule options as a JSON object; `{}` when none are given.
    pub fn options(&self) -> serde_json::Value {
        match self {
            RuleOption::Enabled(_) | RuleOption::Severity(_) => {
                serde_json::Value::Object(serde_json::Map::new())
            }
            RuleOption::SeverityWithOptions(_, options) | RuleOption::Options(options) => {
                serde_json::Value::Object(options.clone())
            }
        }
    }
}

fn parse_severity(value: &str) -> Result<Severity, LinterError> {
    match value {
        "error" => Ok(Severity::Error),
        "warning" => Ok(Severity::Warning),
        "info" => Ok(Severity::Info),
        other => Err(LinterError::config(format!(
            "Invalid severity '{other}', expected error, warning or info"
        ))),
    }
}

impl LinterConfig {
    /// Creates a new empty configuration.
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
            max_fix_passes: DEFAULT_MAX_FIX_PASSES,
            timings: false,
        }
    }

    /// Adds or replaces the configuration of one rule.
    pub fn with_rule(mut self, rule_id: impl Into<String>, option: RuleOption) -> Self {
        self.rules.insert(rule_id.into(), option);
        self
    }

    /// Loads configuration from a file.
    ///
    /// Files ending in `.jsonc` may contain comments and trailing commas.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LinterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LinterError::config(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        if path.extension().is_some_and(|ext| ext == "jsonc") {
            Self::from_jsonc(&content)
        } else {
            Self::from_json(&content)
        }
    }

    /// Finds the first configuration file in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| dir.as_ref().join(name))
            .find(|path| path.is_file())
    }

    /// Parses configuration from JSON string with schema validation.
    pub fn from_json(json: &str) -> Result<Self, LinterError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| LinterError::config(format!("Invalid JSON: {}", e)))?;

        Self::from_value(value)
    }

    /// Parses configuration from a JSON-with-comments string.
    pub fn from_jsonc(jsonc: &str) -> Result<Self, LinterError> {
        let value = jsonc_parser::parse_to_serde_value(jsonc, &ParseOptions::default())
            .map_err(|e| LinterError::config(format!("Invalid JSONC: {}", e)))?
            .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));

        Self::from_value(value)
    }

    fn from_value(value: serde_json::Value) -> Result<Self, LinterError> {
        let schema = config_schema()?;

        if let Err(e) = schema.validate(&value) {
            let error_msg = format!("{} at {}", e, e.instance_path());
            return Err(LinterError::config(format!(
                "Config validation failed: {}",
                error_msg
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| LinterError::config(format!("Invalid config: {}", e)))
    }

    /// Returns enabled rules in id order.
    pub fn enabled_rules(&self) -> Vec<(&str, &RuleOption)> {
        self.rules
            .iter()
            .filter(|(_, option)| option.is_enabled())
            .map(|(id, option)| (id.as_str(), option))
            .collect()
    }
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn config_schema() -> Result<&'static Validator, LinterError> {
    CONFIG_SCHEMA
        .get_or_init(|| {
            let schema_json: serde_json::Value = serde_json::from_str(SCHEMA_JSON)
                .map_err(|e| format!("Invalid embedded config schema: {}", e))?;
            Validator::new(&schema_json)
                .map_err(|e| format!("Invalid config schema compilation: {}", e))
        })
        .as_ref()
        .map_err(|e| LinterError::Internal(e.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_config_new() {
        let config = LinterConfig::new();
        assert!(config.rules.is_empty());
        assert_eq!(config.max_fix_passes, 10);
        assert!(!config.timings);
        assert_eq!(config, LinterConfig::default());
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "rules": {
                "no-tabs": true,
                "no-multiple-empty-lines": { "max": 2 }
            }
        }"#;

        let config = LinterConfig::from_json(json).unwrap();
        assert_eq!(config.rules.len(), 2);
        assert_eq!(
            config.rules["no-multiple-empty-lines"].options(),
            serde_json::json!({ "max": 2 })
        );
    }

    #[test]
    fn test_config_from_jsonc() {
        let jsonc = r#"{
            // tabs are fine in indentation
            "rules": {
                "no-tabs": { "allowIndentationTabs": true },
            },
            "timings": true,
        }"#;

        let config = LinterConfig::from_jsonc(jsonc).unwrap();
        assert!(config.timings);
        assert_eq!(
            config.rules["no-tabs"],
            RuleOption::Options(
                serde_json::json!({ "allowIndentationTabs": true })
                    .as_object()
                    .unwrap()
                    .clone()
            )
        );
    }

    #[test]
    fn test_empty_jsonc_is_default() {
        assert_eq!(LinterConfig::from_jsonc("").unwrap(), LinterConfig::new());
    }

    #[test]
    fn test_severity_with_options() {
        let json = r#"{ "rules": { "no-multiple-empty-lines": ["warning", { "max": 1 }] } }"#;

        let config = LinterConfig::from_json(json).unwrap();
        let option = &config.rules["no-multiple-empty-lines"];

        assert!(option.is_enabled());
        assert_eq!(option.severity().unwrap(), Severity::Warning);
        assert_eq!(option.options(), serde_json::json!({ "max": 1 }));
    }

    #[rstest]
    #[case::enabled(RuleOption::Enabled(true), true)]
    #[case::disabled(RuleOption::Enabled(false), false)]
    #[case::off(RuleOption::Severity("off".to_string()), false)]
    #[case::error(RuleOption::Severity("error".to_string()), true)]
    #[case::off_with_options(
        RuleOption::SeverityWithOptions("off".to_string(), serde_json::Map::new()),
        false
    )]
    #[case::options(RuleOption::Options(serde_json::Map::new()), true)]
    fn test_rule_option_enabled(#[case] option: RuleOption, #[case] expected: bool) {
        assert_eq!(option.is_enabled(), expected);
    }

    #[test]
    fn test_rule_option_defaults() {
        let enabled = RuleOption::Enabled(true);

        assert_eq!(enabled.severity().unwrap(), Severity::Error);
        assert_eq!(enabled.options(), serde_json::json!({}));
        assert!(RuleOption::Severity("fatal".to_string()).severity().is_err());
    }

    #[test]
    fn test_enabled_rules_in_id_order() {
        let config = LinterConfig::new()
            .with_rule("no-tabs", RuleOption::Enabled(true))
            .with_rule("disabled-rule", RuleOption::Enabled(false))
            .with_rule("no-multiple-empty-lines", RuleOption::Severity("info".to_string()));

        let ids: Vec<&str> = config.enabled_rules().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["no-multiple-empty-lines", "no-tabs"]);
    }

    #[test]
    fn test_from_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linewise.jsonc");
        std::fs::write(&path, "{ /* c */ \"maxFixPasses\": 3 }").unwrap();

        let config = LinterConfig::from_file(&path).unwrap();
        assert_eq!(config.max_fix_passes, 3);

        let missing = LinterConfig::from_file(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(LinterError::Config(_))));
    }

    #[test]
    fn test_discover_prefers_jsonc() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(LinterConfig::discover(dir.path()), None);

        std::fs::write(dir.path().join(".linewise.json"), "{}").unwrap();
        std::fs::write(dir.path().join(".linewise.jsonc"), "{}").unwrap();

        assert_eq!(
            LinterConfig::discover(dir.path()),
            Some(dir.path().join(".linewise.jsonc"))
        );
    }

    #[rstest]
    #[case::unknown_property(r#"{ "ruless": {} }"#)]
    #[case::type_mismatch(r#"{ "timings": "yes" }"#)]
    #[case::invalid_severity(r#"{ "rules": { "no-tabs": "fatal" } }"#)]
    #[case::zero_passes(r#"{ "maxFixPasses": 0 }"#)]
    #[case::array_too_long(r#"{ "rules": { "no-tabs": ["error", {}, {}] } }"#)]
    fn test_config_validation_errors(#[case] json: &str) {
        let result = LinterConfig::from_json(json);
        assert!(result.is_err(), "Expected error for JSON: {}", json);
        let err = result.unwrap_err();
        assert!(
            err.to_string().contains("Config validation failed"),
            "Error message '{}' should mention validation",
            err
        );
    }

    #[test]
    fn test_invalid_json() {
        let err = LinterConfig::from_json("{ rules").unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
    }
}
