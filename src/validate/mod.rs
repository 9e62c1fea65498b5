//! Structural consistency validation.
//!
//! Certifies that a tree built by a front-end decomposes its source text
//! faithfully: ranges nest, every token belongs to exactly one node on each
//! level, and the tokens and comments of every node lay back out into the
//! exact source slice that node covers.
//!
//! ## Modes
//!
//! - [`ValidationMode::FailFast`]: the first violation is returned as
//!   [`TreeError::StructuralViolation`]. Used by front-end test suites.
//! - [`ValidationMode::CollectAndLog`]: the first violation of each
//!   [`ViolationKind`] is logged with `tracing::warn!` and returned; later
//!   ones of the same kind are dropped. Used when checking production input.
//!
//! ## Usage
//!
//! ```ignore
//! use gentree::validate::{ValidationMode, Validator, ValidatorConfig};
//!
//! let validator = Validator::new(ValidatorConfig::default());
//! validator.check("Foo.kt", source, &tree)?;
//! ```

mod checker;
mod reconstruct;
mod violation;

use std::collections::BTreeSet;

use parking_lot::Mutex;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::error::TreeError;
use crate::tree::Tree;

use checker::Checker;

pub use reconstruct::{TextDifference, compare, normalize, reconstruct, source_slice};
pub use violation::{Violation, ViolationKind};

/// Synthetic end-of-file token text that ANTLR-style front-ends attach
/// past the last line.
pub const EOF_TOKEN: &str = "<EOF>";

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMode {
    #[default]
    FailFast,
    CollectAndLog,
}

/// Validator settings, loadable from a JSON settings document:
///
/// ```json
/// {"mode": "collect-and-log", "allowedMisplacedTokens": ["<EOF>", "<INDENT>"]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidatorConfig {
    pub mode: ValidationMode,
    /// Token texts exempt from range containment and text reconstruction.
    pub allowed_misplaced_tokens: BTreeSet<String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            mode: ValidationMode::default(),
            allowed_misplaced_tokens: BTreeSet::from([EOF_TOKEN.to_string()]),
        }
    }
}

impl ValidatorConfig {
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn allow_misplaced_token(mut self, text: impl Into<String>) -> Self {
        self.allowed_misplaced_tokens.insert(text.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// Validator
// ============================================================================

/// One file to validate.
#[derive(Debug, Clone, Copy)]
pub struct SourceTree<'a> {
    pub path: &'a str,
    pub source: &'a str,
    pub tree: &'a Tree,
}

/// Checks trees against their source text.
///
/// In collect-and-log mode the set of already reported kinds lives as long
/// as the validator, so one validator shared across files logs each kind
/// once per run.
#[derive(Debug, Default)]
pub struct Validator {
    config: ValidatorConfig,
    reported: Mutex<FxHashSet<ViolationKind>>,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            config,
            reported: Mutex::new(FxHashSet::default()),
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate `tree` against `source`, the full text of the file at `path`.
    ///
    /// Fail-fast mode returns the first violation as an error and an empty
    /// list otherwise. Collect-and-log mode never fails; it returns the
    /// violations it logged.
    pub fn check(
        &self,
        path: &str,
        source: &str,
        tree: &Tree,
    ) -> Result<Vec<Violation>, TreeError> {
        let checker = Checker::new(path, source, &self.config.allowed_misplaced_tokens);
        let mut retained = Vec::new();
        match self.config.mode {
            ValidationMode::FailFast => {
                checker.run(tree, &mut |violation| Err(TreeError::structural(violation)))?;
            }
            ValidationMode::CollectAndLog => {
                checker.run(tree, &mut |violation| {
                    if self.reported.lock().insert(violation.kind) {
                        tracing::warn!(
                            file = %violation.file,
                            line = violation.position.line,
                            column = violation.position.column,
                            kind = ?violation.kind,
                            "{}",
                            violation.message
                        );
                        retained.push(violation);
                    }
                    Ok(())
                })?;
            }
        }
        Ok(retained)
    }

    /// Validate independent files in parallel.
    pub fn check_all(&self, files: &[SourceTree<'_>]) -> Result<Vec<Violation>, TreeError> {
        let per_file = files
            .par_iter()
            .map(|file| self.check(file.path, file.source, file.tree))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(per_file.into_iter().flatten().collect())
    }

    /// Forget which kinds were already logged.
    pub fn reset(&self) {
        self.reported.lock().clear();
    }
}
