//! Message templates with `{{name}}` placeholders.
//!
//! Rules declare their messages as [`MessageSpec`]s. Declarations are compiled
//! into a [`MessageCatalog`] when the rule is registered, so a template that
//! references an undeclared parameter is rejected before any text is scanned.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::RuleError;

/// Arguments substituted into a message template, keyed by parameter name.
pub type MessageArgs = BTreeMap<String, String>;

/// Declaration of a message a rule can emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageSpec {
    /// Identifier the rule reports with (e.g. "unexpectedTab").
    pub id: String,
    /// Template text.
    pub template: String,
    /// Parameters the template expects.
    pub params: Vec<String>,
}

impl MessageSpec {
    /// Creates a new message declaration.
    pub fn new(id: impl Into<String>, template: impl Into<String>, params: &[&str]) -> Self {
        Self {
            id: id.into(),
            template: template.into(),
            params: params.iter().map(|p| (*p).to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Text(String),
    Param(String),
}

/// A parsed template whose placeholders match its declared parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    id: String,
    pieces: Vec<Piece>,
    params: BTreeSet<String>,
}

impl MessageTemplate {
    /// Parses a declaration and checks it against its parameter list.
    pub fn compile(spec: &MessageSpec) -> Result<Self, RuleError> {
        let pieces = parse_template(&spec.id, &spec.template)?;

        let declared: BTreeSet<String> = spec.params.iter().cloned().collect();
        if declared.len() != spec.params.len() {
            return Err(RuleError::invalid_template(
                &spec.id,
                "parameter declared more than once",
            ));
        }

        let used: BTreeSet<String> = pieces
            .iter()
            .filter_map(|piece| match piece {
                Piece::Param(name) => Some(name.clone()),
                Piece::Text(_) => None,
            })
            .collect();

        if let Some(name) = used.difference(&declared).next() {
            return Err(RuleError::invalid_template(
                &spec.id,
                format!("placeholder '{{{{{}}}}}' is not a declared parameter", name),
            ));
        }
        if let Some(name) = declared.difference(&used).next() {
            return Err(RuleError::invalid_template(
                &spec.id,
                format!("parameter '{}' is never used", name),
            ));
        }

        Ok(Self {
            id: spec.id.clone(),
            pieces,
            params: declared,
        })
    }

    /// The message id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Renders the template. Arguments must match the declared parameters exactly.
    pub fn render(&self, args: &MessageArgs) -> Result<String, RuleError> {
        if let Some(name) = self.params.iter().find(|name| !args.contains_key(*name)) {
            return Err(RuleError::MissingArgument {
                message_id: self.id.clone(),
                name: name.clone(),
            });
        }
        if let Some(name) = args.keys().find(|name| !self.params.contains(*name)) {
            return Err(RuleError::UnexpectedArgument {
                message_id: self.id.clone(),
                name: name.clone(),
            });
        }

        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Param(name) => out.push_str(&args[name]),
            }
        }
        Ok(out)
    }
}

fn parse_template(id: &str, template: &str) -> Result<Vec<Piece>, RuleError> {
    let mut pieces = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        if open > 0 {
            pieces.push(Piece::Text(rest[..open].to_string()));
        }

        let after = &rest[open + 2..];
        let close = after
            .find("}}")
            .ok_or_else(|| RuleError::invalid_template(id, "unterminated '{{'"))?;
        let name = after[..close].trim();

        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(RuleError::invalid_template(
                id,
                format!("invalid placeholder name '{}'", name),
            ));
        }

        pieces.push(Piece::Param(name.to_string()));
        rest = &after[close + 2..];
    }

    if !rest.is_empty() {
        pieces.push(Piece::Text(rest.to_string()));
    }

    Ok(pieces)
}

/// Compiled messages of one rule, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    templates: BTreeMap<String, MessageTemplate>,
}

impl MessageCatalog {
    /// Compiles every declaration, rejecting duplicates and bad templates.
    pub fn compile(specs: &[MessageSpec]) -> Result<Self, RuleError> {
        let mut templates = BTreeMap::new();

        for spec in specs {
            let template = MessageTemplate::compile(spec)?;
            if templates.insert(spec.id.clone(), template).is_some() {
                return Err(RuleError::DuplicateMessage(spec.id.clone()));
            }
        }

        Ok(Self { templates })
    }

    /// Looks up a template.
    pub fn get(&self, id: &str) -> Option<&MessageTemplate> {
        self.templates.get(id)
    }

    /// Renders the message `id` with `args`.
    pub fn render(&self, id: &str, args: &MessageArgs) -> Result<String, RuleError> {
        self.get(id)
            .ok_or_else(|| RuleError::UnknownMessage(id.to_string()))?
            .render(args)
    }

    /// Declared message ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}
