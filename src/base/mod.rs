//! Foundation types for locating things in source text.
//!
//! - [`Point`], [`Span`] - row/column positions, as reported for nodes
//! - [`LineIndex`] - byte offset to row/column conversion
//!
//! This module has NO dependencies on other arkts modules.

mod line_index;
mod position;

pub use line_index::LineIndex;
pub use position::{Point, Span};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
