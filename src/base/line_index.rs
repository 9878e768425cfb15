use text_size::TextSize;

use super::Point;

/// Maps byte offsets to row/column points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Offset of the first byte of every line after the first
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let line_starts = text
            .match_indices('\n')
            .map(|(i, _)| TextSize::new(i as u32 + 1))
            .collect();
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Number of lines; an empty text has one
    pub fn line_count(&self) -> usize {
        self.line_starts.len() + 1
    }

    /// The point at `offset`, clamped to the end of the text
    pub fn point(&self, offset: TextSize) -> Point {
        let offset = offset.min(self.len);
        let row = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = match row {
            0 => TextSize::new(0),
            _ => self.line_starts[row - 1],
        };
        Point::new(row, u32::from(offset - line_start) as usize)
    }

    /// The offset of `point`, if it lies inside the text
    pub fn offset(&self, point: Point) -> Option<TextSize> {
        let line_start = match point.row {
            0 => TextSize::new(0),
            row => *self.line_starts.get(row - 1)?,
        };
        let line_end = self
            .line_starts
            .get(point.row)
            .map_or(self.len, |&next| next - TextSize::new(1));
        let offset = line_start + TextSize::new(u32::try_from(point.column).ok()?);
        (offset <= line_end).then_some(offset)
    }
}
