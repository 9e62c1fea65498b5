//! Structural violations reported by the validator.

use std::fmt;

use crate::base::TextPointer;

/// Which invariant a [`Violation`] breaks. Collect-and-log mode keeps one
/// violation per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViolationKind {
    /// Line below 1, start after end, or an empty non-root range.
    RangeMalformed,
    /// A non-root node owns no token.
    MissingTokens,
    /// A token lies outside its node's range.
    TokenOutsideRange,
    /// A child's range leaks out of its parent's.
    ChildOutsideParent,
    /// A child owns a token its parent does not list.
    TokenNotInParent,
    /// Two siblings own the same token.
    TokenSharedBySiblings,
    /// A directly owned token that should belong to a child node.
    UnexpectedDirectToken,
    /// An identifier made of a keyword or string-literal token.
    UnexpectedIdentifierToken,
    /// A reconstructed line differs from the source.
    TextMismatch,
    /// Reconstructed text and source differ in line count.
    LineCountMismatch,
}

/// One broken invariant, located in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
    pub file: String,
    pub position: TextPointer,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.file, self.position, self.message)
    }
}
