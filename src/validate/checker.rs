//! The recursive structural checks.
//!
//! Every node is visited top-down. For each one the checker verifies its
//! range, its tokens, how its tokens split between itself and its children,
//! and that its tokens and comments lay out back into the source text.

use std::collections::BTreeSet;

use rustc_hash::{FxHashMap, FxHashSet};

use super::reconstruct::{TextDifference, compare, reconstruct, source_slice};
use super::violation::{Violation, ViolationKind};
use crate::base::{TextPointer, TextRange, Token, TokenKind};
use crate::error::TreeError;
use crate::tree::{Tree, TreeKind};

/// Receives each violation; returning an error stops the walk.
pub(super) type Report<'r> = dyn FnMut(Violation) -> Result<(), TreeError> + 'r;

pub(super) struct Checker<'a> {
    file: &'a str,
    lines: Vec<&'a str>,
    allowed: &'a BTreeSet<String>,
}

impl<'a> Checker<'a> {
    pub(super) fn new(file: &'a str, source: &'a str, allowed: &'a BTreeSet<String>) -> Self {
        Self {
            file,
            lines: source.lines().collect(),
            allowed,
        }
    }

    pub(super) fn run(&self, root: &Tree, report: &mut Report<'_>) -> Result<(), TreeError> {
        self.check_node(root, true, report)
    }

    fn check_node(
        &self,
        tree: &Tree,
        is_root: bool,
        report: &mut Report<'_>,
    ) -> Result<(), TreeError> {
        let kind = tree.kind();
        let range = tree.text_range();
        let tokens = tree.meta_data().tokens();

        if !is_well_formed(range, is_root) {
            report(self.violation(
                ViolationKind::RangeMalformed,
                range.start,
                format!("Invalid range {range} for {kind}"),
            ))?;
        }

        if !is_root && tokens.is_empty() {
            report(self.violation(
                ViolationKind::MissingTokens,
                range.start,
                format!("{kind} has no tokens"),
            ))?;
        }

        for token in tokens {
            if !range.contains(&token.range) && !self.is_allowed(token) {
                report(self.violation(
                    ViolationKind::TokenOutsideRange,
                    token.range.start,
                    format!(
                        "Token '{}' at {} is outside {kind} range {range}",
                        token.text, token.range
                    ),
                ))?;
            }
        }

        let children = tree.children();
        for child in &children {
            let child_range = child.text_range();
            if !range.contains(&child_range) {
                report(self.violation(
                    ViolationKind::ChildOutsideParent,
                    child_range.start,
                    format!(
                        "{} range {child_range} is outside {kind} range {range}",
                        child.kind()
                    ),
                ))?;
            }
        }

        let residual = self.check_partition(tree, &children, report)?;
        self.check_residual(kind, &residual, report)?;
        self.check_text(tree, report)?;

        for child in children {
            self.check_node(child, false, report)?;
        }
        Ok(())
    }

    /// Splits the parent's tokens between its children and returns the
    /// ones no child owns, in source order.
    fn check_partition<'t>(
        &self,
        parent: &'t Tree,
        children: &[&'t Tree],
        report: &mut Report<'_>,
    ) -> Result<Vec<&'t Token>, TreeError> {
        let parent_tokens: FxHashSet<&Token> = parent.meta_data().tokens().iter().collect();
        let mut owners: FxHashMap<&Token, &Tree> = FxHashMap::default();

        for &child in children {
            for token in child.meta_data().tokens() {
                if !parent_tokens.contains(token) {
                    report(self.violation(
                        ViolationKind::TokenNotInParent,
                        token.range.start,
                        format!(
                            "Token '{}' of {} is missing from parent {}",
                            token.text,
                            child.kind(),
                            parent.kind()
                        ),
                    ))?;
                }
                if let Some(previous) = owners.insert(token, child) {
                    report(self.violation(
                        ViolationKind::TokenSharedBySiblings,
                        token.range.start,
                        format!(
                            "Token '{}' is shared by {} and {}",
                            token.text,
                            previous.kind(),
                            child.kind()
                        ),
                    ))?;
                }
            }
        }

        Ok(parent
            .meta_data()
            .tokens()
            .iter()
            .filter(|token| !owners.contains_key(token))
            .collect())
    }

    fn check_residual(
        &self,
        kind: TreeKind,
        residual: &[&Token],
        report: &mut Report<'_>,
    ) -> Result<(), TreeError> {
        if kind == TreeKind::Native || kind == TreeKind::PlaceHolder || kind.is_literal() {
            return Ok(());
        }
        for token in residual {
            if kind == TreeKind::Identifier {
                if matches!(token.kind, TokenKind::Keyword | TokenKind::StringLiteral) {
                    report(self.violation(
                        ViolationKind::UnexpectedIdentifierToken,
                        token.range.start,
                        format!("Identifier contains {} token '{}'", token.kind, token.text),
                    ))?;
                }
            } else if is_unexpected_direct_token(token) && !self.is_allowed(token) {
                report(self.violation(
                    ViolationKind::UnexpectedDirectToken,
                    token.range.start,
                    format!("{kind} directly owns token '{}'", token.text),
                ))?;
            }
        }
        Ok(())
    }

    fn check_text(&self, tree: &Tree, report: &mut Report<'_>) -> Result<(), TreeError> {
        let meta = tree.meta_data();
        let range = meta.text_range();
        let tokens: Vec<Token> = meta
            .tokens()
            .iter()
            .filter(|token| !self.is_allowed(token))
            .cloned()
            .collect();
        let actual = reconstruct(range, &tokens, meta.comments());
        let expected = source_slice(&self.lines, range);

        match compare(&actual, &expected, range.start.line) {
            None => Ok(()),
            Some(TextDifference::Line {
                line,
                actual,
                expected,
            }) => report(self.violation(
                ViolationKind::TextMismatch,
                TextPointer::new(line, 0),
                format!(
                    "Unexpected text in {}:\n  actual:   '{actual}'\n  expected: '{expected}'",
                    tree.kind()
                ),
            )),
            Some(TextDifference::LineCount { actual, expected }) => report(self.violation(
                ViolationKind::LineCountMismatch,
                range.start,
                format!(
                    "{} reconstructs to {actual} lines instead of {expected}",
                    tree.kind()
                ),
            )),
        }
    }

    fn is_allowed(&self, token: &Token) -> bool {
        self.allowed.contains(token.text())
    }

    fn violation(&self, kind: ViolationKind, position: TextPointer, message: String) -> Violation {
        Violation {
            kind,
            message,
            file: self.file.to_string(),
            position,
        }
    }
}

fn is_well_formed(range: TextRange, is_root: bool) -> bool {
    range.start.line >= 1
        && range.end.line >= 1
        && range.start <= range.end
        && (is_root || !range.is_empty())
}

/// String literals, and text that reads like a name, belong in a child node.
fn is_unexpected_direct_token(token: &Token) -> bool {
    match token.kind {
        TokenKind::StringLiteral => true,
        TokenKind::Keyword => false,
        TokenKind::Other => is_identifier_like(token.text()),
    }
}

pub(super) fn is_identifier_like(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first == '_' || unicode_ident::is_xid_start(first) => {
            chars.all(unicode_ident::is_xid_continue)
        }
        _ => false,
    }
}
