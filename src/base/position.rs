//! Row/column positions for tree nodes
//!
//! Rows and columns are 0-indexed and columns count bytes, so a point can
//! be turned back into an offset without knowing the encoding of the line.

/// A position in source code (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Point {
    pub row: usize,
    pub column: usize,
}

/// A span between two points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Point,
    pub end: Point,
}

impl Point {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl Span {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Check if a point falls within this span (both ends inclusive)
    pub fn contains(&self, point: Point) -> bool {
        self.start <= point && point <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
