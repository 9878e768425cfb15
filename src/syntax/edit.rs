//! Text edits in the form `reparse` consumes.

use std::ops::Range;

/// A single replacement in a source text
///
/// Bytes `start_byte..old_end_byte` of the old text were replaced by bytes
/// `start_byte..new_end_byte` of the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edit {
    pub start_byte: usize,
    pub old_end_byte: usize,
    pub new_end_byte: usize,
}

impl Edit {
    pub fn new(start_byte: usize, old_end_byte: usize, new_end_byte: usize) -> Self {
        Self {
            start_byte,
            old_end_byte,
            new_end_byte,
        }
    }

    /// Insert `len` bytes at `at`
    pub fn insert(at: usize, len: usize) -> Self {
        Self::new(at, at, at + len)
    }

    /// Delete the bytes in `range`
    pub fn delete(range: Range<usize>) -> Self {
        Self::new(range.start, range.end, range.start)
    }

    /// Replace the bytes in `range` with `len` new bytes
    pub fn replace(range: Range<usize>, len: usize) -> Self {
        Self::new(range.start, range.end, range.start + len)
    }

    /// The smallest edit turning `old` into `new`
    pub fn between(old: &str, new: &str) -> Self {
        let prefix = common_prefix(old, new);
        let suffix = common_suffix(&old[prefix..], &new[prefix..]);
        Self::new(prefix, old.len() - suffix, new.len() - suffix)
    }

    /// Change in length, in bytes
    pub fn delta(&self) -> i64 {
        self.new_end_byte as i64 - self.old_end_byte as i64
    }

    /// Bytes removed from the old text
    pub fn old_range(&self) -> Range<usize> {
        self.start_byte..self.old_end_byte
    }

    /// Bytes inserted into the new text
    pub fn new_range(&self) -> Range<usize> {
        self.start_byte..self.new_end_byte
    }

    /// Apply the edit to `old`, with `inserted` as the replacement bytes
    ///
    /// Returns `None` when the edit does not fit `old` or `inserted`.
    pub fn apply(&self, old: &str, inserted: &str) -> Option<String> {
        if self.start_byte > self.old_end_byte
            || self.start_byte > self.new_end_byte
            || self.new_end_byte - self.start_byte != inserted.len()
        {
            return None;
        }
        let head = old.get(..self.start_byte)?;
        let tail = old.get(self.old_end_byte..)?;
        let mut text = String::with_capacity(head.len() + inserted.len() + tail.len());
        text.push_str(head);
        text.push_str(inserted);
        text.push_str(tail);
        Some(text)
    }

    /// Whether this edit describes how `old` became `new`
    ///
    /// Every offset must be in bounds and on a char boundary, and the bytes
    /// outside the edited range must be the same in both texts.
    pub fn is_consistent(&self, old: &str, new: &str) -> bool {
        if self.start_byte > self.old_end_byte || self.start_byte > self.new_end_byte {
            return false;
        }
        let (Some(old_head), Some(old_tail)) = (old.get(..self.start_byte), old.get(self.old_end_byte..))
        else {
            return false;
        };
        let (Some(new_head), Some(new_tail)) = (new.get(..self.start_byte), new.get(self.new_end_byte..))
        else {
            return false;
        };
        old_head == new_head && old_tail == new_tail
    }
}

fn common_prefix(a: &str, b: &str) -> usize {
    let mut len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    while !a.is_char_boundary(len) || !b.is_char_boundary(len) {
        len -= 1;
    }
    len
}

fn common_suffix(a: &str, b: &str) -> usize {
    let mut len = a
        .bytes()
        .rev()
        .zip(b.bytes().rev())
        .take_while(|(x, y)| x == y)
        .count();
    while !a.is_char_boundary(a.len() - len) || !b.is_char_boundary(b.len() - len) {
        len -= 1;
    }
    len
}
