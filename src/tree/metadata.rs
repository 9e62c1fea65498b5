//! Per-node metadata and the per-file provider that slices it out.
//!
//! A front-end hands over one sorted token list and one sorted comment list
//! per file. Every node's [`TreeMetaData`] is a window onto those shared
//! lists, so building metadata for a sub-range never copies tokens.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Deref, Range};
use std::sync::Arc;

use crate::base::{Annotation, Comment, TextRange, Token};
use crate::error::TreeError;

/// A contiguous window onto a shared, immutable list.
#[derive(Clone)]
pub struct Slice<T> {
    items: Arc<[T]>,
    span: Range<usize>,
}

impl<T> Slice<T> {
    fn window(items: Arc<[T]>, span: Range<usize>) -> Self {
        Self { items, span }
    }

    fn owned(items: Vec<T>) -> Self {
        let len = items.len();
        Self {
            items: items.into(),
            span: 0..len,
        }
    }
}

impl<T> Deref for Slice<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items[self.span.clone()]
    }
}

impl<T: fmt::Debug> fmt::Debug for Slice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Slice<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for Slice<T> {}

/// Range, tokens, comments and annotations of one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeMetaData {
    range: TextRange,
    tokens: Slice<Token>,
    comments: Slice<Comment>,
    annotations: Vec<Annotation>,
}

impl TreeMetaData {
    /// Metadata built from explicit lists, bypassing a provider.
    pub fn new(
        range: TextRange,
        tokens: Vec<Token>,
        comments: Vec<Comment>,
        annotations: Vec<Annotation>,
    ) -> Self {
        Self {
            range,
            tokens: Slice::owned(tokens),
            comments: Slice::owned(comments),
            annotations,
        }
    }

    pub fn text_range(&self) -> TextRange {
        self.range
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Lines spanned by at least one token of this node.
    pub fn lines_of_code(&self) -> BTreeSet<u32> {
        self.tokens
            .iter()
            .flat_map(|token| token.range.start.line..=token.range.end.line)
            .collect()
    }
}

/// Resolves metadata for any sub-range of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaDataProvider {
    tokens: Arc<[Token]>,
    comments: Arc<[Comment]>,
    annotations: Arc<[Annotation]>,
}

impl MetaDataProvider {
    /// Takes ownership of the file's lists, sorting each by start position.
    pub fn new(
        mut tokens: Vec<Token>,
        mut comments: Vec<Comment>,
        mut annotations: Vec<Annotation>,
    ) -> Self {
        tokens.sort_by_key(|t| t.range.start);
        comments.sort_by_key(|c| c.range.start);
        annotations.sort_by_key(|a| a.range.start);
        Self {
            tokens: tokens.into(),
            comments: comments.into(),
            annotations: annotations.into(),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Metadata whose tokens, comments and annotations are the entries
    /// contained in `range`.
    pub fn meta_data(&self, range: TextRange) -> TreeMetaData {
        let tokens = contained_span(&self.tokens, range, |t| t.range);
        let comments = contained_span(&self.comments, range, |c| c.range);
        let annotations = contained_span(&self.annotations, range, |a| a.range);
        TreeMetaData {
            range,
            tokens: Slice::window(self.tokens.clone(), tokens),
            comments: Slice::window(self.comments.clone(), comments),
            annotations: self.annotations[annotations].to_vec(),
        }
    }

    /// The token whose range is exactly `range`.
    pub fn first_token(&self, range: TextRange) -> Result<&Token, TreeError> {
        let first = self.tokens.partition_point(|t| t.range.start < range.start);
        self.tokens[first..]
            .iter()
            .take_while(|t| t.range.start == range.start)
            .find(|t| t.range == range)
            .ok_or_else(|| TreeError::unresolved(format!("no token at {range}")))
    }
}

/// Index span of the run of `items` (sorted by start) contained in `range`.
fn contained_span<T>(
    items: &[T],
    range: TextRange,
    range_of: impl Fn(&T) -> TextRange,
) -> Range<usize> {
    let first = items.partition_point(|item| range_of(item).start < range.start);
    let len = items[first..]
        .iter()
        .take_while(|item| range.contains(&range_of(item)))
        .count();
    first..first + len
}
