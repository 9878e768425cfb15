//! Rowan-based error-tolerant parser for ArkTS
//!
//! This module turns source text into a lossless CST using:
//! - **logos** for lexing
//! - **rowan** for the green tree
//!
//! Every byte of the input, whitespace and comments included, ends up as a
//! token of the tree, so the root's text is always the source text.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Engine over the Grammar table → GreenNode tree
//!     ↓              (conflicts resolved by the precedence table,
//!     ↓               unparsable spans wrapped by recovery)
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! AST layer → Typed wrappers over SyntaxNode
//! ```
//!
//! ## Incremental Reparsing
//!
//! When text changes, we:
//! 1. Keep the tokens in front of the edit and relex until the stream
//!    lines up with the old one
//! 2. Reparse, taking over body items the edit could not have affected
//! 3. Share their green nodes with the old tree

pub mod ast;
pub(crate) mod engine;
pub mod errors;
pub mod grammar;
pub(crate) mod incremental;
pub mod lexer;
pub mod precedence;
mod recovery;
mod syntax_kind;

pub use ast::AstNode;
pub use errors::{ErrorCode, GrammarError, ParseContext, ParseError, RelatedInfo, SyntaxError};
pub use lexer::{Lexeme, Lexer, Token, string_parts, tokenize};
pub use syntax_kind::{ArkTSLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
