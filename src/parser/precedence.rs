//! Operator precedence and structural conflict resolution
//!
//! Two tables live here. The operator ladder drives precedence climbing in
//! the engine; every binary operator groups left, and a higher level always
//! binds first. The conflict table lists the places where several
//! productions may match the same input, each with the rule that decides
//! between the surviving hypotheses.

use crate::parser::grammar::{BUILTIN_COMPONENTS, Terminal};
use crate::parser::lexer::Token;
use crate::parser::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Assoc {
    Left,
    Right,
}

/// A precedence level with its associativity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Precedence {
    pub level: u8,
    pub assoc: Assoc,
}

impl Precedence {
    pub const fn new(level: u8, assoc: Assoc) -> Self {
        Self { level, assoc }
    }
}

/// Precedence levels, low to high
pub mod level {
    pub const ASSIGNMENT: u8 = 1;
    pub const CONDITIONAL: u8 = 2;
    pub const LOGICAL_OR: u8 = 10;
    pub const LOGICAL_AND: u8 = 11;
    pub const BITWISE_OR: u8 = 12;
    pub const BITWISE_XOR: u8 = 13;
    pub const BITWISE_AND: u8 = 14;
    pub const EQUALITY: u8 = 15;
    pub const RELATIONAL: u8 = 16;
    pub const SHIFT: u8 = 17;
    pub const ADDITIVE: u8 = 18;
    pub const MULTIPLICATIVE: u8 = 19;
    pub const EXPONENT: u8 = 20;
    pub const UNARY: u8 = 21;
    pub const NEW: u8 = 21;
    pub const UPDATE: u8 = 22;
    /// Call, member access and subscript
    pub const POSTFIX: u8 = 23;
}

/// How an embedded expression is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operand {
    /// Operators below this level end the expression
    pub min_level: u8,
    /// Whether `(` after an operand starts a call
    pub calls: bool,
    /// Replace the `expression` wrapper by its only child
    pub unwrap: bool,
}

impl Operand {
    pub const FULL: Operand = Operand::at(0);

    /// `identifier` or `a.b.c` without calls, as used after `new` and `$`
    pub const MEMBER_PATH: Operand = Operand {
        min_level: level::POSTFIX,
        calls: false,
        unwrap: true,
    };

    pub const fn at(min_level: u8) -> Operand {
        Operand {
            min_level,
            calls: true,
            unwrap: false,
        }
    }
}

pub struct BinaryOperator {
    pub token: Terminal,
    pub precedence: Precedence,
}

const fn left(token: Terminal, level: u8) -> BinaryOperator {
    BinaryOperator {
        token,
        precedence: Precedence::new(level, Assoc::Left),
    }
}

use SyntaxKind::*;
use Terminal::{Kind, Word};

/// The binary operator ladder
///
/// `**` is declared left-associative like the rest of the ladder.
pub static BINARY_OPERATORS: &[BinaryOperator] = &[
    left(Kind(PIPE_PIPE), level::LOGICAL_OR),
    left(Kind(AMP_AMP), level::LOGICAL_AND),
    left(Kind(PIPE), level::BITWISE_OR),
    left(Kind(CARET), level::BITWISE_XOR),
    left(Kind(AMP), level::BITWISE_AND),
    left(Kind(EQ_EQ), level::EQUALITY),
    left(Kind(BANG_EQ), level::EQUALITY),
    left(Kind(EQ_EQ_EQ), level::EQUALITY),
    left(Kind(BANG_EQ_EQ), level::EQUALITY),
    left(Kind(LT), level::RELATIONAL),
    left(Kind(LT_EQ), level::RELATIONAL),
    left(Kind(GT), level::RELATIONAL),
    left(Kind(GT_EQ), level::RELATIONAL),
    left(Word("instanceof"), level::RELATIONAL),
    left(Word("in"), level::RELATIONAL),
    left(Kind(LT_LT), level::SHIFT),
    left(Kind(GT_GT), level::SHIFT),
    left(Kind(GT_GT_GT), level::SHIFT),
    left(Kind(PLUS), level::ADDITIVE),
    left(Kind(MINUS), level::ADDITIVE),
    left(Kind(STAR), level::MULTIPLICATIVE),
    left(Kind(SLASH), level::MULTIPLICATIVE),
    left(Kind(PERCENT), level::MULTIPLICATIVE),
    left(Kind(STAR_STAR), level::EXPONENT),
];

pub const ASSIGNMENT_OPERATORS: &[SyntaxKind] = &[
    EQ, PLUS_EQ, MINUS_EQ, STAR_EQ, STAR_STAR_EQ, SLASH_EQ, PERCENT_EQ, AMP_EQ, PIPE_EQ, CARET_EQ,
    LT_LT_EQ, GT_GT_EQ, GT_GT_GT_EQ,
];

/// Find the binary operator a token spells, with the kind to emit for it
pub fn binary_operator(
    kind: SyntaxKind,
    text: &str,
) -> Option<(&'static BinaryOperator, SyntaxKind)> {
    BINARY_OPERATORS
        .iter()
        .find_map(|op| op.token.matches(kind, text).map(|emitted| (op, emitted)))
}

pub fn is_assignment_operator(kind: SyntaxKind) -> bool {
    ASSIGNMENT_OPERATORS.contains(&kind)
}

// =============================================================================
// Conflict groups
// =============================================================================

/// Places in the grammar where several productions can match the same input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictGroup {
    DecoratorOrExpression,
    ModifierChainOrMember,
    UiElementOrExpression,
    BlockOrObject,
    DecoratedBody,
    BuildOrMethod,
    ConstructorOrMethod,
    ParametersOrObject,
}

/// How a conflict group picks among its surviving hypotheses
pub enum Disambiguation {
    /// Fewest loose errors, then longest span, then fewest errors, then
    /// declaration order
    Longest,
    /// The first listed kind that matched at all wins
    Prefer(&'static [SyntaxKind]),
    /// A named predicate picks a candidate; `None` falls back to `Longest`
    Predicate(fn(&Lookahead<'_>, &[Candidate]) -> Option<usize>),
}

pub struct Conflict {
    pub name: &'static str,
    pub members: &'static [SyntaxKind],
    pub rule: Disambiguation,
}

static CONFLICTS: [Conflict; 8] = [
    Conflict {
        name: "decorator_or_expression",
        members: &[DECORATOR, AT_EXPRESSION],
        rule: Disambiguation::Predicate(decorator_position),
    },
    Conflict {
        name: "modifier_chain_or_member",
        members: &[MODIFIER_CHAIN_EXPRESSION, MEMBER_EXPRESSION],
        rule: Disambiguation::Predicate(greedy_modifier_chain),
    },
    Conflict {
        name: "ui_element_or_expression",
        members: &[ARKTS_UI_ELEMENT, UI_COMPONENT, EXPRESSION_STATEMENT, CALL_EXPRESSION],
        rule: Disambiguation::Predicate(ui_element_priority),
    },
    Conflict {
        name: "block_or_object",
        members: &[BLOCK_STATEMENT, OBJECT_LITERAL],
        rule: Disambiguation::Prefer(&[BLOCK_STATEMENT]),
    },
    Conflict {
        name: "decorated_body",
        members: &[EXTEND_FUNCTION_BODY, BUILD_BODY, BLOCK_STATEMENT],
        rule: Disambiguation::Predicate(decorated_body),
    },
    Conflict {
        name: "build_or_method",
        members: &[BUILD_METHOD, METHOD_DECLARATION],
        rule: Disambiguation::Prefer(&[BUILD_METHOD]),
    },
    Conflict {
        name: "constructor_or_method",
        members: &[CONSTRUCTOR_DECLARATION, METHOD_DECLARATION],
        rule: Disambiguation::Prefer(&[CONSTRUCTOR_DECLARATION]),
    },
    Conflict {
        name: "parameters_or_object",
        members: &[COMPONENT_PARAMETERS, OBJECT_LITERAL],
        rule: Disambiguation::Prefer(&[COMPONENT_PARAMETERS]),
    },
];

impl ConflictGroup {
    pub fn conflict(self) -> &'static Conflict {
        &CONFLICTS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.conflict().name
    }
}

/// All declared conflict groups
pub fn conflicts() -> &'static [Conflict] {
    &CONFLICTS
}

/// One surviving hypothesis of a conflict group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Node kind of the alternative that produced it
    pub kind: Option<SyntaxKind>,
    /// Token index just past its span
    pub end: usize,
    pub errors: usize,
    /// How many of `errors` were recovered inside bodies that closed
    pub contained: usize,
}

impl Candidate {
    pub fn loose(&self) -> usize {
        self.errors.saturating_sub(self.contained)
    }

    fn rank(&self) -> (usize, std::cmp::Reverse<usize>, usize) {
        (self.loose(), std::cmp::Reverse(self.end), self.errors)
    }
}

/// Read-only window over the significant tokens for predicates
pub struct Lookahead<'a> {
    tokens: &'a [Token<'a>],
    origin: usize,
    pos: usize,
}

impl<'a> Lookahead<'a> {
    pub fn new(tokens: &'a [Token<'a>], origin: usize, pos: usize) -> Self {
        Self { tokens, origin, pos }
    }

    /// Token index where the conflict is being decided
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Token index where the enclosing production started
    pub fn origin(&self) -> usize {
        self.origin
    }

    pub fn kind(&self, index: usize) -> Option<SyntaxKind> {
        self.tokens.get(index).map(|t| t.kind)
    }

    pub fn text(&self, index: usize) -> Option<&'a str> {
        self.tokens.get(index).map(|t| t.text)
    }
}

/// Index of the best candidate under the `Longest` ordering
pub fn longest(candidates: &[Candidate]) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .min_by_key(|(i, c)| (c.rank(), *i))
        .map(|(i, _)| i)
}

/// Index of the best candidate of one kind
pub fn best_of(candidates: &[Candidate], kind: SyntaxKind) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| c.kind == Some(kind))
        .min_by_key(|(i, c)| (c.rank(), *i))
        .map(|(i, _)| i)
}

/// Rule 1: a leading `@` in declaration position belongs to a declaration
fn decorator_position(la: &Lookahead<'_>, candidates: &[Candidate]) -> Option<usize> {
    if la.kind(la.pos()) != Some(AT) {
        return None;
    }
    candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| !matches!(c.kind, Some(STATEMENT | EXPRESSION_STATEMENT)))
        .min_by_key(|(i, c)| (c.rank(), *i))
        .map(|(i, _)| i)
}

/// Rule 2: modifiers after a UI component are taken greedily; with none,
/// the bare component wins.
fn greedy_modifier_chain(_: &Lookahead<'_>, candidates: &[Candidate]) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .min_by_key(|(i, c)| {
            (c.rank(), c.kind != Some(UI_COMPONENT), *i)
        })
        .map(|(i, _)| i)
}

/// Rule 3: inside UI bodies, control flow first, then UI elements.
///
/// A UI element loses to an expression statement only when the callee is
/// not a built-in component and the expression statement consumes more
/// (a `;`, an operator, a member access after the call).
fn ui_element_priority(la: &Lookahead<'_>, candidates: &[Candidate]) -> Option<usize> {
    if let Some(flow) = best_of(candidates, UI_CONTROL_FLOW) {
        return Some(flow);
    }
    let ui = best_of(candidates, ARKTS_UI_ELEMENT);
    let statement = best_of(candidates, EXPRESSION_STATEMENT);
    match (ui, statement) {
        (Some(ui), Some(statement)) => {
            let builtin = la
                .text(la.pos())
                .is_some_and(|callee| BUILTIN_COMPONENTS.contains(&callee));
            let followed_by_block = la.kind(candidates[ui].end) == Some(L_BRACE);
            if builtin || followed_by_block || candidates[statement].end <= candidates[ui].end {
                Some(ui)
            } else {
                Some(statement)
            }
        }
        (Some(only), None) | (None, Some(only)) => Some(only),
        (None, None) => None,
    }
}

const EXTEND_DECORATORS: &[&str] = &["Extend", "AnimatableExtend", "Styles"];
const BUILDER_DECORATORS: &[&str] = &["Builder"];

/// Rule 4: the body of a decorated function or method
///
/// `@Extend`-style decorators with a body starting in `.` take an
/// `extend_function_body`; `@Builder` takes a `build_body`; everything else
/// is an ordinary block.
fn decorated_body(la: &Lookahead<'_>, candidates: &[Candidate]) -> Option<usize> {
    let has_decorator = |names: &[&str]| {
        (la.origin()..la.pos()).any(|i| {
            la.kind(i) == Some(AT) && la.text(i + 1).is_some_and(|name| names.contains(&name))
        })
    };

    if has_decorator(EXTEND_DECORATORS) && la.kind(la.pos() + 1) == Some(DOT) {
        if let Some(extend) = best_of(candidates, EXTEND_FUNCTION_BODY) {
            return Some(extend);
        }
    }
    if has_decorator(BUILDER_DECORATORS) {
        if let Some(build) = best_of(candidates, BUILD_BODY) {
            return Some(build);
        }
    }
    best_of(candidates, BLOCK_STATEMENT)
}
