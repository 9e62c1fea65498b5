/// Position tracking for tree nodes, tokens and comments.
///
/// Lines are 1-based and columns are 0-based, counted in `char`s. These are
/// the coordinates front-ends attach to every node, and the coordinates the
/// range-address codec writes to the wire.
use std::fmt;

/// A position in source code (line ≥ 1, 0-based column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextPointer {
    pub line: u32,
    pub column: u32,
}

/// A span between two pointers, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextRange {
    pub start: TextPointer,
    pub end: TextPointer,
}

impl TextPointer {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for TextPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl TextRange {
    pub fn new(start: TextPointer, end: TextPointer) -> Self {
        Self { start, end }
    }

    /// Create a range from line/column coordinates
    pub fn from_coords(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start: TextPointer::new(start_line, start_col),
            end: TextPointer::new(end_line, end_col),
        }
    }

    /// Check if a pointer falls within this range (both ends inclusive).
    pub fn contains_pointer(&self, pointer: TextPointer) -> bool {
        self.start <= pointer && pointer <= self.end
    }

    /// Check if `other` lies entirely inside this range.
    pub fn contains(&self, other: &TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// A range is empty when it starts where it ends.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The smallest range covering both `self` and `other`.
    pub fn merge(&self, other: &TextRange) -> TextRange {
        TextRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
