//! Fix convergence: repeat scan and fix passes until the text settles.

use blake3::Hash;
use tracing::{debug, warn};

use crate::config::DEFAULT_MAX_FIX_PASSES;

/// How an iterative fix run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixResult {
    /// A pass produced no change.
    Converged { iterations: usize },
    /// The pass cap was hit while fixes were still being applied.
    MaxIterationsReached { iterations: usize },
    /// A pass reproduced an earlier text.
    CycleDetected { cycle_length: usize },
}

impl FixResult {
    /// Returns true if the text reached a fixed point.
    pub fn is_converged(&self) -> bool {
        matches!(self, FixResult::Converged { .. })
    }
}

/// Drives repeated fix passes, bounded by a pass cap and a cycle detector.
#[derive(Debug, Clone)]
pub struct FixCoordinator {
    max_iterations: usize,
}

impl FixCoordinator {
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Calls `apply_fix` until it reports no change, the cap is reached or
    /// a previously seen text comes back.
    ///
    /// `apply_fix` returns the rewritten text, or `None` when nothing applies.
    pub fn apply_fixes_iterative<F, E>(
        &self,
        content: &mut String,
        mut apply_fix: F,
    ) -> Result<FixResult, E>
    where
        F: FnMut(&str) -> Result<Option<String>, E>,
    {
        let mut history: Vec<Hash> = vec![self.hash_content(content)];
        let mut iterations = 0;

        while iterations < self.max_iterations {
            iterations += 1;

            let Some(fixed) = apply_fix(content)? else {
                debug!(iterations, "fixes converged");
                return Ok(FixResult::Converged { iterations });
            };

            *content = fixed;
            let current_hash = self.hash_content(content);

            if let Some(prev_idx) = history.iter().position(|h| *h == current_hash) {
                let cycle_length = history.len() - prev_idx;
                warn!(cycle_length, "fix cycle detected, stopping");
                return Ok(FixResult::CycleDetected { cycle_length });
            }
            history.push(current_hash);
        }

        warn!(iterations, "fix pass limit reached");
        Ok(FixResult::MaxIterationsReached { iterations })
    }

    fn hash_content(&self, content: &str) -> Hash {
        blake3::hash(content.as_bytes())
    }
}

impl Default for FixCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FIX_PASSES)
    }
}
