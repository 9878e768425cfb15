//! Grammar table for ArkTS
//!
//! The grammar is plain data: every nonterminal is a named [`Production`]
//! whose body is a [`Rule`] tree (sequence, choice, optional, repetition,
//! precedence, field). The table is compiled once per process into a
//! [`Grammar`] indexed by rule name, after which it is only ever read.
//!
//! The productions are split by area:
//! - `declarations` - source file, imports/exports, structs, classes, interfaces, enums, functions
//! - `components` - build bodies, UI components, modifier chains, UI control flow
//! - `statements` - statements and blocks
//! - `expressions` - primaries and the expression forms built around them
//! - `types` - type annotations

mod components;
mod declarations;
mod expressions;
mod statements;
mod types;

use std::sync::LazyLock;

use indexmap::IndexMap;

use crate::parser::errors::{GrammarError, ParseContext};
use crate::parser::precedence::{Assoc, ConflictGroup, Operand, Precedence};
use crate::parser::SyntaxKind;

pub use components::BUILTIN_COMPONENTS;

/// Index of a production in the compiled table
pub type RuleId = usize;

/// Name of the start production
pub const START: &str = "source_file";
/// Name of the hidden production holding every expression primary
pub const PRIMARY: &str = "_primary_expression";
/// Name of the hidden production holding a parenthesised argument list
pub const ARGUMENTS: &str = "_arguments";
/// Name of the production the `as` operator parses its type with
pub const TYPE_ANNOTATION: &str = "type_annotation";

/// Identifier spellings that never match [`Terminal::Identifier`]
pub const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "let", "new", "null", "return", "switch", "throw", "true", "try",
    "typeof", "var", "void", "while", "with",
];

pub fn is_reserved(text: &str) -> bool {
    RESERVED_WORDS.contains(&text)
}

/// A terminal symbol: matched against one significant token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// A token of exactly this kind
    Kind(SyntaxKind),
    /// An identifier spelled exactly so, emitted as an anonymous keyword
    Word(&'static str),
    /// An identifier spelled exactly so, emitted with the given named kind
    Literal(&'static str, SyntaxKind),
    /// Any identifier that is not a reserved word
    Identifier,
    /// Any identifier spelling, reserved words included
    Name,
}

impl Terminal {
    /// The kind to emit if a token of `kind` spelled `text` matches
    pub fn matches(&self, kind: SyntaxKind, text: &str) -> Option<SyntaxKind> {
        match *self {
            Terminal::Kind(expected) => (kind == expected).then_some(kind),
            Terminal::Word(word) => {
                (kind == SyntaxKind::IDENT && text == word).then_some(SyntaxKind::KEYWORD)
            }
            Terminal::Literal(word, emit) => (kind == SyntaxKind::IDENT && text == word).then_some(emit),
            Terminal::Identifier => {
                (kind == SyntaxKind::IDENT && !is_reserved(text)).then_some(SyntaxKind::IDENT)
            }
            Terminal::Name => (kind == SyntaxKind::IDENT).then_some(SyntaxKind::IDENT),
        }
    }
}

/// A recovering repetition
///
/// Items are parsed until the closing token (or end of input when there is
/// none). A position where no item parses is skipped by error recovery.
#[derive(Debug, Clone)]
pub struct Body {
    pub open: Option<SyntaxKind>,
    pub item: Box<Rule>,
    pub close: Option<SyntaxKind>,
    pub context: ParseContext,
}

/// One production alternative
#[derive(Debug, Clone)]
pub enum Rule {
    Token(Terminal),
    /// Reference by name; rewritten to `Call` when the table is compiled
    Ref(&'static str),
    Call(RuleId),
    Seq(Vec<Rule>),
    /// Ordered choice; equal spans go to the earlier alternative
    Choice(Vec<Rule>),
    /// Choice whose alternatives form a declared conflict group
    Conflict(ConflictGroup, Vec<Rule>),
    Optional(Box<Rule>),
    Repeat(Box<Rule>),
    Repeat1(Box<Rule>),
    Field(SyntaxKind, Box<Rule>),
    Prec(Precedence, Box<Rule>),
    /// An expression parsed by precedence climbing
    Expression(Operand),
    Body(Body),
}

/// A named nonterminal
#[derive(Debug, Clone)]
pub struct Production {
    pub name: &'static str,
    /// Node kind to wrap matches in; `None` for hidden productions
    pub kind: Option<SyntaxKind>,
    pub rule: Rule,
}

/// The compiled, read-only grammar table
#[derive(Debug)]
pub struct Grammar {
    productions: Vec<Production>,
    index: IndexMap<&'static str, RuleId>,
    start: RuleId,
    primary: RuleId,
    arguments: RuleId,
    type_annotation: RuleId,
}

static GRAMMAR: LazyLock<Grammar> = LazyLock::new(|| {
    Grammar::compile(arkts_productions())
        .unwrap_or_else(|error| panic!("built-in ArkTS grammar is invalid: {error}"))
});

impl Grammar {
    /// The ArkTS grammar, compiled on first use
    pub fn arkts() -> &'static Grammar {
        &GRAMMAR
    }

    /// Resolve every `Ref` and index the productions by name
    pub fn compile(productions: Vec<Production>) -> Result<Grammar, GrammarError> {
        let mut index = IndexMap::with_capacity(productions.len());
        for (id, production) in productions.iter().enumerate() {
            if index.insert(production.name, id).is_some() {
                return Err(GrammarError::DuplicateRule(production.name));
            }
        }

        let mut compiled = Vec::with_capacity(productions.len());
        for production in productions {
            let rule = resolve(production.rule, &index, production.name)?;
            compiled.push(Production { rule, ..production });
        }

        let lookup = |name: &'static str| {
            index.get(name).copied().ok_or(GrammarError::MissingRule(name))
        };
        let start = lookup(START)?;
        let primary = lookup(PRIMARY)?;
        let arguments = lookup(ARGUMENTS)?;
        let type_annotation = lookup(TYPE_ANNOTATION)?;

        Ok(Grammar {
            productions: compiled,
            index,
            start,
            primary,
            arguments,
            type_annotation,
        })
    }

    pub fn production(&self, id: RuleId) -> &Production {
        &self.productions[id]
    }

    /// Look up a production by name
    pub fn rule(&self, name: &str) -> Option<&Production> {
        self.index.get(name).map(|&id| &self.productions[id])
    }

    pub fn id(&self, name: &str) -> Option<RuleId> {
        self.index.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.productions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }

    pub fn start(&self) -> RuleId {
        self.start
    }

    pub fn primary(&self) -> RuleId {
        self.primary
    }

    pub fn arguments(&self) -> RuleId {
        self.arguments
    }

    pub fn type_annotation(&self) -> RuleId {
        self.type_annotation
    }

    /// Node kind an alternative produces at its top, if it is a single symbol
    pub fn kind_of(&self, rule: &Rule) -> Option<SyntaxKind> {
        match rule {
            Rule::Call(id) => self.productions[*id].kind,
            Rule::Token(Terminal::Kind(kind)) => Some(*kind),
            Rule::Token(Terminal::Word(_)) => Some(SyntaxKind::KEYWORD),
            Rule::Token(Terminal::Literal(_, kind)) => Some(*kind),
            Rule::Token(Terminal::Identifier | Terminal::Name) => Some(SyntaxKind::IDENT),
            Rule::Field(_, inner) | Rule::Prec(_, inner) => self.kind_of(inner),
            _ => None,
        }
    }

    /// Names of all productions, in definition order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.index.keys().copied()
    }
}

fn resolve(
    rule: Rule,
    index: &IndexMap<&'static str, RuleId>,
    from: &'static str,
) -> Result<Rule, GrammarError> {
    let all = |rules: Vec<Rule>| -> Result<Vec<Rule>, GrammarError> {
        rules.into_iter().map(|r| resolve(r, index, from)).collect()
    };
    let boxed = |rule: Box<Rule>| -> Result<Box<Rule>, GrammarError> {
        Ok(Box::new(resolve(*rule, index, from)?))
    };

    Ok(match rule {
        Rule::Ref(name) => match index.get(name) {
            Some(&id) => Rule::Call(id),
            None => return Err(GrammarError::UndefinedRule { name, from }),
        },
        Rule::Seq(rules) => Rule::Seq(all(rules)?),
        Rule::Choice(rules) => Rule::Choice(all(rules)?),
        Rule::Conflict(group, rules) => Rule::Conflict(group, all(rules)?),
        Rule::Optional(rule) => Rule::Optional(boxed(rule)?),
        Rule::Repeat(rule) => Rule::Repeat(boxed(rule)?),
        Rule::Repeat1(rule) => Rule::Repeat1(boxed(rule)?),
        Rule::Field(kind, rule) => Rule::Field(kind, boxed(rule)?),
        Rule::Prec(prec, rule) => Rule::Prec(prec, boxed(rule)?),
        Rule::Body(body) => Rule::Body(Body {
            item: boxed(body.item)?,
            ..body
        }),
        rule @ (Rule::Token(_) | Rule::Call(_) | Rule::Expression(_)) => rule,
    })
}

/// Every ArkTS production, uncompiled
pub fn arkts_productions() -> Vec<Production> {
    let mut p = Productions::default();
    declarations::define(&mut p);
    components::define(&mut p);
    statements::define(&mut p);
    expressions::define(&mut p);
    types::define(&mut p);
    p.list
}

/// Collects productions while the grammar modules define them
#[derive(Default)]
pub struct Productions {
    list: Vec<Production>,
}

impl Productions {
    /// A production that wraps its matches in a node of `kind`
    pub fn node(&mut self, name: &'static str, kind: SyntaxKind, rule: Rule) {
        self.list.push(Production {
            name,
            kind: Some(kind),
            rule,
        });
    }

    /// A production whose matches are spliced into the caller
    pub fn hidden(&mut self, name: &'static str, rule: Rule) {
        self.list.push(Production {
            name,
            kind: None,
            rule,
        });
    }
}

// =============================================================================
// Rule construction helpers
// =============================================================================

pub fn t(kind: SyntaxKind) -> Rule {
    Rule::Token(Terminal::Kind(kind))
}

pub fn kw(word: &'static str) -> Rule {
    Rule::Token(Terminal::Word(word))
}

pub fn lit(word: &'static str, kind: SyntaxKind) -> Rule {
    Rule::Token(Terminal::Literal(word, kind))
}

pub fn ident() -> Rule {
    Rule::Token(Terminal::Identifier)
}

pub fn name() -> Rule {
    Rule::Token(Terminal::Name)
}

pub fn r(name: &'static str) -> Rule {
    Rule::Ref(name)
}

pub fn seq<const N: usize>(rules: [Rule; N]) -> Rule {
    Rule::Seq(rules.into())
}

pub fn choice<const N: usize>(rules: [Rule; N]) -> Rule {
    Rule::Choice(rules.into())
}

pub fn conflict<const N: usize>(group: ConflictGroup, rules: [Rule; N]) -> Rule {
    Rule::Conflict(group, rules.into())
}

pub fn words(words: &[&'static str]) -> Rule {
    Rule::Choice(words.iter().map(|&w| kw(w)).collect())
}

pub fn opt(rule: Rule) -> Rule {
    Rule::Optional(Box::new(rule))
}

pub fn rep(rule: Rule) -> Rule {
    Rule::Repeat(Box::new(rule))
}

pub fn rep1(rule: Rule) -> Rule {
    Rule::Repeat1(Box::new(rule))
}

pub fn field(kind: SyntaxKind, rule: Rule) -> Rule {
    Rule::Field(kind, Box::new(rule))
}

pub fn prec(level: u8, rule: Rule) -> Rule {
    Rule::Prec(Precedence::new(level, Assoc::Left), Box::new(rule))
}

pub fn prec_right(level: u8, rule: Rule) -> Rule {
    Rule::Prec(Precedence::new(level, Assoc::Right), Box::new(rule))
}

/// `rule (',' rule)*`
pub fn comma_sep1(rule: Rule) -> Rule {
    seq([rule.clone(), rep(seq([t(SyntaxKind::COMMA), rule]))])
}

/// Optional comma-separated list
pub fn comma_sep(rule: Rule) -> Rule {
    opt(comma_sep1(rule))
}

/// Comma-separated list that may end with a trailing comma
pub fn comma_list(rule: Rule) -> Rule {
    opt(seq([comma_sep1(rule), opt(t(SyntaxKind::COMMA))]))
}

pub fn expr() -> Rule {
    Rule::Expression(Operand::FULL)
}

pub fn operand(operand: Operand) -> Rule {
    Rule::Expression(operand)
}

/// A brace-delimited recovering body
pub fn braced(item: Rule, context: ParseContext) -> Rule {
    Rule::Body(Body {
        open: Some(SyntaxKind::L_BRACE),
        item: Box::new(item),
        close: Some(SyntaxKind::R_BRACE),
        context,
    })
}

/// A recovering repetition running to end of input
pub fn items(item: Rule, context: ParseContext) -> Rule {
    Rule::Body(Body {
        open: None,
        item: Box::new(item),
        close: None,
        context,
    })
}
