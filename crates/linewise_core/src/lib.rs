//! # linewise_core
//!
//! Core lint and autofix engine for Linewise.
//!
//! This crate provides:
//! - Configuration loading and validation
//! - The rule catalog
//! - The `Linter` orchestrator, running rules in parallel
//! - Fix application and convergence
//!
//! ## Example
//!
//! ```rust
//! use linewise_core::{Linter, LinterConfig};
//!
//! let config = LinterConfig::from_json(
//!     r#"{ "rules": { "no-multiple-empty-lines": { "max": 1 } } }"#,
//! )?;
//! let linter = Linter::new(&config)?;
//!
//! let result = linter.lint_text("a\n\n\n\nb\n")?;
//! assert_eq!(result.diagnostics.len(), 1);
//!
//! let outcome = linter.fix_text("a\n\n\n\nb\n")?;
//! assert_eq!(outcome.output, "a\n\nb\n");
//! # Ok::<(), linewise_core::LinterError>(())
//! ```

mod config;
mod error;
mod fix;
mod fixer;
mod linter;
mod registry;
mod result;

pub use config::{CONFIG_FILES, DEFAULT_MAX_FIX_PASSES, LinterConfig, RuleOption};
pub use error::LinterError;
pub use fix::{FixCoordinator, FixResult};
pub use fixer::{FixerResult, apply_fixes_to_content};
pub use linter::Linter;
pub use registry::{ConfiguredRule, RuleCatalog};
pub use result::{FixOutcome, LintResult};

pub use linewise_rule::{Diagnostic, Fix, RuleMeta, Severity};
