//! # arkts-syntax
//!
//! Error-tolerant, incremental concrete syntax trees for ArkTS, the
//! TypeScript dialect with declarative UI used by ArkUI.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! syntax    → Tree / Node view, S-expressions, Edit
//!   ↓
//! parser    → Logos lexer, grammar table, conflict table, engine, recovery,
//!             incremental reparse, typed AST
//!   ↓
//! base      → Primitives (Point, Span, LineIndex, TextRange)
//! ```
//!
//! ## Usage
//!
//! ```
//! let tree = arkts::parse("@Component\nstruct Hello {\n  build() {\n    Text('hi')\n  }\n}\n");
//! assert!(!tree.has_error());
//! assert_eq!(tree.root_node().named_child(0).unwrap().type_name(), "component_declaration");
//!
//! let text = "@Component\nstruct Hello {\n  build() {\n    Text('hey')\n  }\n}\n";
//! let edit = arkts::Edit::replace(48..50, 3);
//! let tree = arkts::reparse(&tree, text, &edit);
//! assert!(tree.structurally_eq(&arkts::parse(text)));
//! ```

use rayon::prelude::*;
use tracing::debug_span;

// ============================================================================
// MODULES (dependency order: base → parser → syntax)
// ============================================================================

/// Foundation types: Point, Span, LineIndex, TextRange
pub mod base;

/// Parser: Logos lexer, grammar and conflict tables, parsing engine
pub mod parser;

/// Syntax: Tree and Node, S-expression rendering, edits
pub mod syntax;

// Re-export foundation types
pub use base::{LineIndex, Point, Span, TextRange, TextSize};

// Re-export the parser surface
pub use parser::{ErrorCode, ParseContext, ParseError, SyntaxError, SyntaxKind};

// Re-export trees
pub use syntax::{Edit, Node, Tree};

use parser::incremental::{self, Previous};

/// Knobs for a single parse or reparse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Rule evaluations allowed before the call is abandoned
    pub step_budget: Option<usize>,
    /// Take over unaffected items of the previous tree on reparse
    pub reuse: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            step_budget: None,
            reuse: true,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step_budget(mut self, steps: usize) -> Self {
        self.step_budget = Some(steps);
        self
    }

    pub fn with_reuse(mut self, reuse: bool) -> Self {
        self.reuse = reuse;
        self
    }
}

/// Parse `text` into a tree
///
/// Malformed input yields `ERROR` and `MISSING` nodes rather than a failure.
///
/// # Panics
///
/// When `text` is longer than `u32::MAX` bytes; use [`parse_with`] to get
/// [`ParseError::InputTooLarge`] instead.
pub fn parse(text: &str) -> Tree {
    match parse_with(text, &ParseOptions::default()) {
        Ok(tree) => tree,
        Err(error @ ParseError::InputTooLarge { .. }) => panic!("{error}"),
        // without a budget the engine never abandons a parse
        Err(ParseError::BudgetExhausted { .. }) => unreachable!("unbudgeted parse was abandoned"),
    }
}

/// Parse `text` under `options`
///
/// Fails when the step budget runs out or `text` is longer than `u32::MAX`
/// bytes; no partial tree is returned.
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Tree, ParseError> {
    let _span = debug_span!("parse", len = text.len()).entered();
    let output = incremental::parse(text, options.step_budget)?;
    Ok(Tree::new(text, output))
}

/// Parse `text`, the result of applying `edit` to the text of `previous`
///
/// The tree is the one [`parse`] would give for `text`. An edit that does
/// not describe how the old text became `text` is ignored and `text` is
/// parsed from scratch.
///
/// # Panics
///
/// When `text` is longer than `u32::MAX` bytes, as [`parse`] does.
pub fn reparse(previous: &Tree, text: &str, edit: &Edit) -> Tree {
    match reparse_with(previous, text, edit, &ParseOptions::default()) {
        Ok(tree) => tree,
        Err(error @ ParseError::InputTooLarge { .. }) => panic!("{error}"),
        Err(ParseError::BudgetExhausted { .. }) => unreachable!("unbudgeted reparse was abandoned"),
    }
}

/// [`reparse`] under `options`
pub fn reparse_with(
    previous: &Tree,
    text: &str,
    edit: &Edit,
    options: &ParseOptions,
) -> Result<Tree, ParseError> {
    let _span = debug_span!(
        "reparse",
        len = text.len(),
        start = edit.start_byte,
        delta = edit.delta()
    )
    .entered();
    let output = if options.reuse {
        let old = Previous {
            text: previous.text(),
            lexemes: previous.lexemes(),
            records: previous.records(),
        };
        incremental::reparse(&old, text, edit, options.step_budget)?
    } else {
        incremental::parse(text, options.step_budget)?
    };
    Ok(Tree::new(text, output))
}

/// Parse independent sources in parallel
pub fn parse_batch(texts: &[&str]) -> Vec<Tree> {
    texts.par_iter().map(|text| parse(text)).collect()
}
