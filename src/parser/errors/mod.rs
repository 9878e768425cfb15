//! Parser error handling module
//!
//! This module provides error handling for the ArkTS parser:
//! - Categorized error codes (lexical, structural, ambiguity exhaustion)
//! - Context-aware error messages naming the body an error occurred in
//! - Related span tracking (e.g., "opened here" for unclosed braces)
//! - `ParseError` for calls abandoned under a caller-imposed budget

mod codes;
mod context;
mod error;
mod parse_error;

pub use codes::ErrorCode;
pub use context::ParseContext;
pub use error::{RelatedInfo, SyntaxError, format_context_error};
pub(crate) use error::shift_range;
pub use parse_error::{GrammarError, ParseError};
