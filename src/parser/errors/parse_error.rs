//! Errors that end a call instead of being recorded in the tree.

use thiserror::Error;

/// A parse abandoned before completion
///
/// Returned by the fallible entry points; no partial tree exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The rule-evaluation budget ran out.
    #[error("parse abandoned after exhausting its budget of {limit} steps")]
    BudgetExhausted { limit: usize },

    /// The text is longer than 32-bit tree offsets can address.
    #[error("input of {len} bytes is longer than the 4 GiB a tree can address")]
    InputTooLarge { len: usize },
}

/// Errors found while compiling a grammar table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// A rule references a name with no production.
    #[error("rule `{from}` references undefined rule `{name}`")]
    UndefinedRule { name: &'static str, from: &'static str },

    /// Two productions share a name.
    #[error("rule `{0}` is defined more than once")]
    DuplicateRule(&'static str),

    /// A rule the engine depends on is absent.
    #[error("missing required rule `{0}`")]
    MissingRule(&'static str),
}
