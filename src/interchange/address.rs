//! Range addresses: the compact string form of a [`TextRange`].
//!
//! `"startLine:startCol:endLine:endCol"`, with `endLine` left blank when it
//! equals `startLine`. A node or token is located purely by the coordinates
//! it already carries, so addresses need no side table and stay stable
//! across independent serializations of the same tree.

use crate::base::{TextPointer, TextRange, Token};
use crate::error::TreeError;
use crate::tree::{Expected, Tree};

/// Format a range as an address.
pub fn format(range: TextRange) -> String {
    let TextRange { start, end } = range;
    if start.line == end.line {
        format!("{}:{}::{}", start.line, start.column, end.column)
    } else {
        format!("{}:{}:{}:{}", start.line, start.column, end.line, end.column)
    }
}

/// Parse an address back into a range.
pub fn parse(address: &str) -> Result<TextRange, TreeError> {
    let fields: Vec<&str> = address.split(':').collect();
    let [start_line, start_col, end_line, end_col] = fields.as_slice() else {
        return Err(TreeError::malformed(
            address,
            format!("expected 4 fields, found {}", fields.len()),
        ));
    };
    let start_line = number(address, start_line)?;
    let start_col = number(address, start_col)?;
    let end_line = if end_line.is_empty() {
        start_line
    } else {
        number(address, end_line)?
    };
    let end_col = number(address, end_col)?;
    Ok(TextRange::new(
        TextPointer::new(start_line, start_col),
        TextPointer::new(end_line, end_col),
    ))
}

fn number(address: &str, field: &str) -> Result<u32, TreeError> {
    field
        .parse()
        .map_err(|_| TreeError::malformed(address, format!("'{field}' is not a number")))
}

/// Address of a token.
pub fn token_reference(token: &Token) -> String {
    format(token.range)
}

/// Address of a node's own range.
pub fn tree_reference(tree: &Tree) -> String {
    format(tree.text_range())
}

/// Find the node at `reference` among `parent` and its descendants.
///
/// A `None` reference resolves to `None`; an address no node of the
/// `expected` kind occupies is an error.
pub fn resolve_nullable_tree<'t>(
    parent: &'t Tree,
    reference: Option<&str>,
    expected: Expected,
) -> Result<Option<&'t Tree>, TreeError> {
    let Some(reference) = reference else {
        return Ok(None);
    };
    let range = parse(reference)?;
    parent
        .find_descendant(range, expected)
        .map(Some)
        .ok_or_else(|| {
            TreeError::unresolved(format!(
                "no {expected} at '{reference}' under {}",
                parent.kind()
            ))
        })
}
