//! Source text reconstruction from coordinates.
//!
//! Tokens and comments carry their own line/column, so laying their text
//! out in start order, with the line breaks and indentation implied by each
//! item's coordinates, must reproduce the source a node covers.

use crate::base::{Comment, TextPointer, TextRange, Token};

/// Lay out `tokens` and `comments` that fall inside `range`.
///
/// The first line is padded from column 0, so the result lines up with
/// [`source_slice`] of the same range.
pub fn reconstruct(range: TextRange, tokens: &[Token], comments: &[Comment]) -> String {
    let mut items: Vec<(TextRange, &str)> = tokens
        .iter()
        .map(|token| (token.range, token.text()))
        .chain(comments.iter().map(|comment| (comment.range, &*comment.text)))
        .filter(|(item, _)| range.contains(item))
        .collect();
    items.sort_by_key(|(item, _)| item.start);

    let mut out = String::new();
    let mut cursor = TextPointer::new(range.start.line, 0);
    for (item, text) in items {
        if item.start.line > cursor.line {
            for _ in cursor.line..item.start.line {
                out.push('\n');
            }
            cursor = TextPointer::new(item.start.line, 0);
        }
        for _ in cursor.column..item.start.column {
            out.push(' ');
        }
        out.push_str(text);
        cursor = item.end;
    }
    out
}

/// The source text of `range`, with everything before the start column
/// on the first line replaced by spaces. Columns past a line's end clamp.
pub fn source_slice(lines: &[&str], range: TextRange) -> String {
    let first = range.start.line.max(1) as usize;
    let last = (range.end.line as usize).min(lines.len());
    let mut out = String::new();
    for number in first..=last {
        let line = lines[number - 1];
        let start = if number == first {
            range.start.column as usize
        } else {
            0
        };
        let end = if number == range.end.line as usize {
            range.end.column as usize
        } else {
            usize::MAX
        };
        if number > first {
            out.push('\n');
        }
        out.extend(std::iter::repeat_n(' ', start));
        out.extend(line.chars().skip(start).take(end.saturating_sub(start)));
    }
    out
}

/// Tabs become single spaces, trailing whitespace and trailing blank lines
/// are dropped.
pub fn normalize(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text
        .split('\n')
        .map(|line| line.replace('\t', " ").trim_end().to_string())
        .collect();
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

/// Where reconstructed text first differs from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextDifference {
    LineCount {
        actual: usize,
        expected: usize,
    },
    Line {
        line: u32,
        actual: String,
        expected: String,
    },
}

/// Compare normalised `actual` against normalised `expected`; `first_line`
/// is the source line number of the first line of both.
pub fn compare(actual: &str, expected: &str, first_line: u32) -> Option<TextDifference> {
    let actual = normalize(actual);
    let expected = normalize(expected);
    if let Some((offset, (actual, expected))) = actual
        .iter()
        .zip(&expected)
        .enumerate()
        .find(|(_, (actual, expected))| actual != expected)
    {
        return Some(TextDifference::Line {
            line: first_line + offset as u32,
            actual: actual.clone(),
            expected: expected.clone(),
        });
    }
    (actual.len() != expected.len()).then(|| TextDifference::LineCount {
        actual: actual.len(),
        expected: expected.len(),
    })
}
