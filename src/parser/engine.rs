//! Parsing engine
//!
//! A memoising interpreter over the grammar table. A rule evaluated at a
//! token position yields a set of hypotheses, at most one per end position:
//! hypotheses that end at the same place are merged as soon as they meet,
//! keeping the one with fewer errors, then higher precedence, then the one
//! declared first. Errors recovered inside a body that found its closing
//! token are contained; only the rest count against a longer reading. Production results are memoised per position, so forked
//! alternatives share all the work below them.
//!
//! Conflict groups collapse their hypotheses to a single survivor using the
//! table in [`precedence`](crate::parser::precedence). Expressions are
//! parsed by precedence climbing around the primaries the grammar lists.
//!
//! Hypotheses carry green pieces without trivia. Trivia is attached when a
//! node is built: the run of whitespace and comments in front of a token
//! goes into the innermost node holding both that token and the one before.

use std::cmp::Reverse;
use std::ops::Range;
use std::rc::Rc;

use rowan::{GreenNode, GreenToken, NodeOrToken, TextRange, TextSize};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::parser::SyntaxKind::{self, *};
use crate::parser::errors::{ParseContext, ParseError, SyntaxError, shift_range};
use crate::parser::grammar::{Grammar, Rule, RuleId, Terminal};
use crate::parser::lexer::{Lexeme, Token, string_parts};
use crate::parser::precedence::{
    Candidate, ConflictGroup, Disambiguation, Lookahead, Operand, best_of, binary_operator,
    is_assignment_operator, level, longest,
};

pub(crate) type GreenElement = NodeOrToken<GreenNode, GreenToken>;

/// Open brackets around a token past which no production starts there
pub(crate) const MAX_NESTING: usize = 256;

/// Stack left when a production or expression moves to a fresh segment
const STACK_RED_ZONE: usize = 256 * 1024;
const STACK_GROW_SIZE: usize = 8 * 1024 * 1024;

/// One element of a hypothesis, tagged with the significant token it
/// starts at (`None` when it is zero-width).
#[derive(Debug, Clone)]
pub(crate) struct Piece {
    pub(crate) first: Option<usize>,
    pub(crate) element: GreenElement,
}

/// A body item as it was parsed, kept for reuse by a later reparse
#[derive(Debug, Clone)]
pub(crate) struct ItemRecord {
    pub(crate) context: ParseContext,
    /// From the start of the first token to the end of the last
    pub(crate) range: TextRange,
    /// End of the furthest token examined while parsing the item
    pub(crate) reach: TextSize,
    /// Number of significant tokens the item spans
    pub(crate) tokens: usize,
    /// Pieces with `first` relative to the item's first token
    pub(crate) pieces: Vec<(Option<usize>, GreenElement)>,
    pub(crate) errors: Vec<SyntaxError>,
    /// How many of `errors` sit inside closed bodies
    pub(crate) contained: usize,
    /// Records of the bodies inside the item
    pub(crate) nested: Vec<ItemRecord>,
}

impl ItemRecord {
    /// The same record `delta` bytes further on
    pub(crate) fn shifted(&self, delta: i64) -> ItemRecord {
        ItemRecord {
            context: self.context,
            range: shift_range(self.range, delta),
            reach: shift_range(TextRange::empty(self.reach), delta).start(),
            tokens: self.tokens,
            pieces: self.pieces.clone(),
            errors: self.errors.iter().map(|e| e.shifted(delta)).collect(),
            contained: self.contained,
            nested: self.nested.iter().map(|r| r.shifted(delta)).collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(super) struct Hyp {
    pub(super) end: usize,
    pub(super) pieces: Vec<Piece>,
    pub(super) errors: Vec<SyntaxError>,
    /// Leading share of `errors` recovered inside bodies that closed
    pub(super) contained: usize,
    pub(super) prec: u8,
    pub(super) records: Vec<ItemRecord>,
}

impl Hyp {
    pub(super) fn empty(pos: usize) -> Self {
        Hyp {
            end: pos,
            ..Hyp::default()
        }
    }

    fn then(&self, tail: Hyp) -> Hyp {
        let mut joined = self.clone();
        joined.append(tail);
        joined
    }

    /// Errors not confined to a closed body
    pub(super) fn loose(&self) -> usize {
        self.errors.len().saturating_sub(self.contained)
    }

    pub(super) fn append(&mut self, tail: Hyp) {
        self.end = tail.end;
        self.pieces.extend(tail.pieces);
        self.contained += tail.contained;
        self.errors.extend(tail.errors);
        self.records.extend(tail.records);
        self.prec = self.prec.max(tail.prec);
    }

    pub(super) fn push(&mut self, piece: Piece, end: usize) {
        self.pieces.push(piece);
        self.end = end;
    }

    fn absorb(&mut self, other: &Hyp) {
        self.contained += other.contained;
        self.errors.extend(other.errors.iter().cloned());
        self.records.extend(other.records.iter().cloned());
    }
}

/// Merge hypotheses that end at the same position
///
/// The result is ordered by end, longest first. Of several hypotheses with
/// one end the survivor has the fewest loose errors, then the fewest
/// errors, then the highest precedence, then came first.
fn settle(mut hyps: Vec<Hyp>) -> Vec<Hyp> {
    hyps.sort_by_key(|h| (Reverse(h.end), h.loose(), h.errors.len(), Reverse(h.prec)));
    hyps.dedup_by_key(|h| h.end);
    hyps
}

/// Pick one hypothesis: fewest loose errors, then longest, then fewest
/// errors, then precedence
///
/// A declaration whose body recovered an error and still closed outranks
/// a shorter clean reading of its first few tokens.
pub(super) fn choose(hyps: &[Hyp]) -> Option<usize> {
    hyps.iter()
        .enumerate()
        .min_by_key(|(i, h)| {
            (h.loose(), Reverse(h.end), h.errors.len(), Reverse(h.prec), *i)
        })
        .map(|(i, _)| i)
}

fn element_kind(element: &GreenElement) -> SyntaxKind {
    match element {
        NodeOrToken::Node(node) => node.kind().into(),
        NodeOrToken::Token(token) => token.kind().into(),
    }
}

#[derive(Debug, Clone)]
struct Memo {
    hyps: Rc<[Hyp]>,
    reach: usize,
}

/// Result of a completed parse
pub(crate) struct Output {
    pub(crate) green: GreenNode,
    pub(crate) errors: Vec<SyntaxError>,
    pub(crate) records: Vec<ItemRecord>,
    /// Every token of the input, trivia included
    pub(crate) lexemes: Vec<Lexeme>,
    pub(crate) reused: usize,
}

pub(crate) struct Engine<'a> {
    pub(super) grammar: &'static Grammar,
    source_len: TextSize,
    all: Vec<Token<'a>>,
    /// Significant tokens only
    pub(super) tokens: Vec<Token<'a>>,
    /// Indices into `all` of the trivia in front of each significant token;
    /// the last entry is the trivia after the final one.
    trivia: Vec<Range<usize>>,
    /// Brackets left open in front of each significant token
    pub(super) nesting: Vec<usize>,
    memo: FxHashMap<(RuleId, usize), Option<Memo>>,
    expressions: FxHashMap<(usize, Operand), Option<Memo>>,
    /// Furthest significant token index examined by the current evaluation
    pub(super) reach: usize,
    /// Token index where the innermost production call started
    origin: usize,
    steps: usize,
    budget: Option<usize>,
    pub(super) aborted: bool,
    pub(super) reuse: FxHashMap<(ParseContext, TextSize), ItemRecord>,
    pub(super) reused: usize,
}

impl<'a> Engine<'a> {
    pub(crate) fn new(source: &'a str, all: Vec<Token<'a>>, budget: Option<usize>) -> Self {
        let mut tokens = Vec::with_capacity(all.len());
        let mut trivia = Vec::with_capacity(all.len() + 1);
        let mut run = 0;
        for (i, token) in all.iter().enumerate() {
            if !token.kind.is_trivia() {
                trivia.push(run..i);
                tokens.push(token.clone());
                run = i + 1;
            }
        }
        trivia.push(run..all.len());
        let nesting = nesting(&tokens);

        Engine {
            grammar: Grammar::arkts(),
            source_len: TextSize::of(source),
            all,
            tokens,
            trivia,
            nesting,
            memo: FxHashMap::default(),
            expressions: FxHashMap::default(),
            reach: 0,
            origin: 0,
            steps: 0,
            budget,
            aborted: false,
            reuse: FxHashMap::default(),
            reused: 0,
        }
    }

    /// Offer previously parsed body items for reuse
    pub(crate) fn with_reuse(mut self, items: FxHashMap<(ParseContext, TextSize), ItemRecord>) -> Self {
        self.reuse = items;
        self
    }

    /// Parse the whole input into a `source_file` tree
    pub(crate) fn run(mut self) -> Result<Output, ParseError> {
        let grammar = self.grammar;
        let start = grammar.production(grammar.start());
        let mut hyps = self.eval(&start.rule, 0);
        if self.aborted {
            return Err(ParseError::BudgetExhausted {
                limit: self.budget.unwrap_or(self.steps),
            });
        }
        let hyp = match choose(&hyps) {
            Some(best) => hyps.swap_remove(best),
            None => Hyp::empty(0),
        };

        let last = self.tokens.len();
        let mut children: Vec<GreenElement> = self.trivia_before(0).collect();
        for piece in hyp.pieces {
            if let Some(first) = piece.first {
                if first > 0 {
                    children.extend(self.trivia_before(first));
                }
            }
            children.push(piece.element);
        }
        if last > 0 {
            children.extend(self.trivia_before(last));
        }
        let green = GreenNode::new(SOURCE_FILE.into(), children);

        let mut errors = hyp.errors;
        errors.sort_by_key(|e| (e.range.start(), e.range.end()));

        debug!(
            tokens = self.tokens.len(),
            memo = self.memo.len() + self.expressions.len(),
            steps = self.steps,
            errors = errors.len(),
            reused = self.reused,
            "parsed source file"
        );

        Ok(Output {
            green,
            errors,
            records: hyp.records,
            lexemes: self.all.iter().map(Token::lexeme).collect(),
            reused: self.reused,
        })
    }

    // =========================================================================
    // Tokens and pieces
    // =========================================================================

    /// Kind and text of the significant token at `pos`, recording the read
    pub(super) fn peek(&mut self, pos: usize) -> Option<(SyntaxKind, &'a str)> {
        self.reach = self.reach.max(pos);
        self.tokens.get(pos).map(|t| (t.kind, t.text))
    }

    /// The significant token at `pos`, emitted as `kind`
    ///
    /// String literals become nodes so their escape sequences are visible.
    pub(super) fn token(&self, pos: usize, kind: SyntaxKind) -> Piece {
        let text = self.tokens[pos].text;
        let element: GreenElement = if kind == STRING {
            let parts = string_parts(text)
                .into_iter()
                .map(|(part, text)| NodeOrToken::Token(GreenToken::new(part.into(), text)));
            GreenNode::new(STRING.into(), parts).into()
        } else {
            GreenToken::new(kind.into(), text).into()
        };
        Piece {
            first: Some(pos),
            element,
        }
    }

    fn trivia_before(&self, pos: usize) -> impl Iterator<Item = GreenElement> + '_ {
        self.trivia[pos]
            .clone()
            .map(|i| GreenToken::new(self.all[i].kind.into(), self.all[i].text).into())
    }

    /// Build a node from pieces, restoring the trivia between them
    pub(super) fn build(&self, kind: SyntaxKind, pieces: Vec<Piece>) -> Piece {
        let first = pieces.iter().find_map(|p| p.first);
        let mut children = Vec::with_capacity(pieces.len());
        for piece in pieces {
            if let Some(start) = piece.first {
                if Some(start) != first {
                    children.extend(self.trivia_before(start));
                }
            }
            children.push(piece.element);
        }
        Piece {
            first,
            element: GreenNode::new(kind.into(), children).into(),
        }
    }

    /// Whether `pos` sits inside more than [`MAX_NESTING`] open brackets
    pub(super) fn too_deep(&self, pos: usize) -> bool {
        self.nesting.get(pos).is_some_and(|&depth| depth > MAX_NESTING)
    }

    /// Byte offset just past the token at `reach`
    pub(super) fn reach_offset(&self, reach: usize) -> TextSize {
        self.tokens.get(reach).map_or(self.source_len, |t| t.end())
    }

    /// Token index of a byte reach recorded by an earlier parse
    pub(super) fn reach_index(&self, reach: TextSize) -> usize {
        if reach >= self.source_len {
            return self.tokens.len();
        }
        self.tokens.partition_point(|t| t.end() < reach)
    }

    fn tick(&mut self) -> bool {
        if self.aborted {
            return false;
        }
        self.steps += 1;
        if let Some(limit) = self.budget {
            if self.steps > limit {
                self.aborted = true;
                return false;
            }
        }
        true
    }

    // =========================================================================
    // Rules
    // =========================================================================

    pub(super) fn eval(&mut self, rule: &'static Rule, pos: usize) -> Vec<Hyp> {
        if !self.tick() {
            return Vec::new();
        }
        match rule {
            Rule::Token(terminal) => self.terminal(terminal, pos).into_iter().collect(),
            // resolved to `Call` when the grammar was compiled
            Rule::Ref(_) => Vec::new(),
            Rule::Call(id) => self.call(*id, pos).to_vec(),
            Rule::Seq(rules) => self.sequence(rules, pos),
            Rule::Choice(alternatives) => {
                let hyps = alternatives
                    .iter()
                    .flat_map(|alternative| self.eval(alternative, pos))
                    .collect();
                settle(hyps)
            }
            Rule::Conflict(group, alternatives) => self.conflict(*group, alternatives, pos),
            Rule::Optional(inner) => {
                let mut hyps = self.eval(inner, pos);
                hyps.push(Hyp::empty(pos));
                settle(hyps)
            }
            Rule::Repeat(inner) => self.repeat(inner, pos, false),
            Rule::Repeat1(inner) => self.repeat(inner, pos, true),
            Rule::Field(kind, inner) => self
                .eval(inner, pos)
                .into_iter()
                .map(|hyp| self.field(*kind, hyp))
                .collect(),
            Rule::Prec(precedence, inner) => self
                .eval(inner, pos)
                .into_iter()
                .map(|mut hyp| {
                    hyp.prec = hyp.prec.max(precedence.level);
                    hyp
                })
                .collect(),
            Rule::Expression(operand) => self.expression(*operand, pos).into_iter().collect(),
            Rule::Body(body) => self.body(body, pos).into_iter().collect(),
        }
    }

    fn terminal(&mut self, terminal: &Terminal, pos: usize) -> Option<Hyp> {
        let (kind, text) = self.peek(pos)?;
        let emitted = terminal.matches(kind, text)?;
        let mut hyp = Hyp::empty(pos);
        hyp.push(self.token(pos, emitted), pos + 1);
        Some(hyp)
    }

    /// Evaluate a production, memoised per position
    ///
    /// A production that re-enters itself at the same position without
    /// consuming anything fails on the inner call, and none starts past
    /// [`MAX_NESTING`] brackets.
    fn call(&mut self, id: RuleId, pos: usize) -> Rc<[Hyp]> {
        if self.too_deep(pos) {
            return Rc::from(Vec::new());
        }
        let key = (id, pos);
        if let Some(entry) = self.memo.get(&key) {
            let Some(memo) = entry else {
                return Rc::from(Vec::new());
            };
            let memo = memo.clone();
            self.reach = self.reach.max(memo.reach);
            return memo.hyps;
        }
        self.memo.insert(key, None);

        let saved_reach = std::mem::replace(&mut self.reach, pos);
        let saved_origin = std::mem::replace(&mut self.origin, pos);

        let grammar = self.grammar;
        let production = grammar.production(id);
        let hyps = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.eval(&production.rule, pos)
        });
        let hyps: Vec<Hyp> = match production.kind {
            Some(kind) => {
                let prec = match &production.rule {
                    Rule::Prec(precedence, _) => precedence.level,
                    _ => 0,
                };
                hyps.into_iter()
                    .map(|hyp| self.node(kind, prec, hyp))
                    .collect()
            }
            None => hyps,
        };

        let reach = self.reach;
        self.reach = saved_reach.max(reach);
        self.origin = saved_origin;

        let hyps: Rc<[Hyp]> = Rc::from(hyps);
        if self.aborted {
            self.memo.remove(&key);
        } else {
            self.memo.insert(
                key,
                Some(Memo {
                    hyps: Rc::clone(&hyps),
                    reach,
                }),
            );
        }
        hyps
    }

    fn node(&self, kind: SyntaxKind, prec: u8, mut hyp: Hyp) -> Hyp {
        let pieces = std::mem::take(&mut hyp.pieces);
        hyp.pieces.push(self.build(kind, pieces));
        hyp.prec = prec;
        hyp
    }

    fn field(&self, kind: SyntaxKind, mut hyp: Hyp) -> Hyp {
        if hyp.pieces.is_empty() {
            return hyp;
        }
        let pieces = std::mem::take(&mut hyp.pieces);
        hyp.pieces.push(self.build(kind, pieces));
        hyp
    }

    fn sequence(&mut self, rules: &'static [Rule], pos: usize) -> Vec<Hyp> {
        let mut hyps = vec![Hyp::empty(pos)];
        for rule in rules {
            let mut next = Vec::new();
            for hyp in &hyps {
                for tail in self.eval(rule, hyp.end) {
                    next.push(hyp.then(tail));
                }
            }
            hyps = settle(next);
            if hyps.is_empty() {
                break;
            }
        }
        hyps
    }

    fn repeat(&mut self, item: &'static Rule, pos: usize, at_least_one: bool) -> Vec<Hyp> {
        let mut results = Vec::new();
        if !at_least_one {
            results.push(Hyp::empty(pos));
        }
        let mut seen = FxHashSet::default();
        seen.insert(pos);

        let mut frontier = vec![Hyp::empty(pos)];
        while !frontier.is_empty() {
            let mut next = Vec::new();
            for hyp in &frontier {
                for tail in self.eval(item, hyp.end) {
                    if tail.end > hyp.end {
                        next.push(hyp.then(tail));
                    }
                }
            }
            let mut next = settle(next);
            next.retain(|hyp| seen.insert(hyp.end));
            results.extend(next.iter().cloned());
            frontier = next;
        }
        settle(results)
    }

    /// Evaluate every alternative of a conflict group and keep one survivor
    fn conflict(&mut self, group: ConflictGroup, alternatives: &'static [Rule], pos: usize) -> Vec<Hyp> {
        let mut hyps = Vec::new();
        let mut candidates = Vec::new();
        for alternative in alternatives {
            let kind = self.grammar.kind_of(alternative);
            for hyp in self.eval(alternative, pos) {
                candidates.push(Candidate {
                    kind,
                    end: hyp.end,
                    errors: hyp.errors.len(),
                    contained: hyp.contained,
                });
                hyps.push(hyp);
            }
        }
        if hyps.is_empty() {
            return hyps;
        }

        let picked = match &group.conflict().rule {
            Disambiguation::Longest => longest(&candidates),
            Disambiguation::Prefer(kinds) => kinds
                .iter()
                .find_map(|&kind| best_of(&candidates, kind))
                .or_else(|| longest(&candidates)),
            Disambiguation::Predicate(predicate) => {
                // the predicate may look at the token after any candidate
                let furthest = candidates.iter().map(|c| c.end).max().unwrap_or(pos);
                self.reach = self.reach.max(furthest);
                let lookahead = Lookahead::new(&self.tokens, self.origin, pos);
                predicate(&lookahead, &candidates).or_else(|| longest(&candidates))
            }
        };

        match picked {
            Some(index) if index < hyps.len() => vec![hyps.swap_remove(index)],
            _ => Vec::new(),
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Parse an expression by precedence climbing, memoised per position
    pub(super) fn expression(&mut self, operand: Operand, pos: usize) -> Option<Hyp> {
        let key = (pos, operand);
        if let Some(entry) = self.expressions.get(&key) {
            let Some(memo) = entry else {
                return None;
            };
            let (reach, hyp) = (memo.reach, memo.hyps.first().cloned());
            self.reach = self.reach.max(reach);
            return hyp;
        }
        self.expressions.insert(key, None);

        let saved_reach = std::mem::replace(&mut self.reach, pos);
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.climb(operand, pos)
        });
        let reach = self.reach;
        self.reach = saved_reach.max(reach);

        if self.aborted {
            self.expressions.remove(&key);
        } else {
            let hyps: Rc<[Hyp]> = result.iter().cloned().collect();
            self.expressions.insert(key, Some(Memo { hyps, reach }));
        }
        result
    }

    fn climb(&mut self, operand: Operand, pos: usize) -> Option<Hyp> {
        let primaries = self.call(self.grammar.primary(), pos);
        let mut current = primaries.get(choose(&primaries)?)?.clone();
        current.prec = 0;

        let min = operand.min_level;
        loop {
            let at = current.end;
            let Some((kind, text)) = self.peek(at) else {
                break;
            };
            let next = match kind {
                DOT if level::POSTFIX >= min => self.member(&current, at),
                L_BRACKET if level::POSTFIX >= min => self.subscript(&current, at),
                L_PAREN if operand.calls && level::POSTFIX >= min => self.call_expression(&current, at),
                PLUS_PLUS | MINUS_MINUS if level::UPDATE >= min => {
                    let pieces = vec![
                        self.field_of(ARGUMENT_FIELD, self.wrap(&current)),
                        self.field_of(OPERATOR_FIELD, self.token(at, kind)),
                    ];
                    Some(self.combine(UPDATE_EXPRESSION, pieces, at + 1, &[&current]))
                }
                QUESTION if level::CONDITIONAL >= min => self.conditional(&current, at),
                _ if is_assignment_operator(kind) => {
                    if level::ASSIGNMENT >= min && assignable(&current) {
                        self.assignment(&current, at, kind)
                    } else {
                        None
                    }
                }
                _ if Terminal::Word("as").matches(kind, text).is_some() => {
                    if level::RELATIONAL >= min {
                        self.as_expression(&current, at)
                    } else {
                        None
                    }
                }
                _ => match binary_operator(kind, text) {
                    Some((op, emitted)) if op.precedence.level >= min => {
                        self.binary(&current, at, op.precedence.level, emitted)
                    }
                    _ => None,
                },
            };
            match next {
                Some(hyp) => current = hyp,
                None => break,
            }
        }

        if operand.unwrap {
            Some(current)
        } else {
            let mut wrapped = current.clone();
            wrapped.pieces = vec![self.wrap(&current)];
            Some(wrapped)
        }
    }

    /// `expression` node around an operand
    fn wrap(&self, operand: &Hyp) -> Piece {
        self.build(EXPRESSION, operand.pieces.clone())
    }

    fn field_of(&self, kind: SyntaxKind, piece: Piece) -> Piece {
        self.build(kind, vec![piece])
    }

    fn fielded(&self, kind: SyntaxKind, hyp: &Hyp) -> Piece {
        self.build(kind, hyp.pieces.clone())
    }

    /// A compound expression ending at `end`, carrying the errors and
    /// records of the operands it was built from
    fn combine(&self, kind: SyntaxKind, pieces: Vec<Piece>, end: usize, parts: &[&Hyp]) -> Hyp {
        let mut hyp = Hyp::empty(end);
        hyp.pieces.push(self.build(kind, pieces));
        for part in parts {
            hyp.absorb(part);
        }
        hyp
    }

    fn member(&mut self, object: &Hyp, at: usize) -> Option<Hyp> {
        let (kind, _) = self.peek(at + 1)?;
        if kind != IDENT {
            return None;
        }
        let pieces = vec![
            self.field_of(OBJECT_FIELD, self.wrap(object)),
            self.token(at, DOT),
            self.field_of(PROPERTY_FIELD, self.token(at + 1, IDENT)),
        ];
        Some(self.combine(MEMBER_EXPRESSION, pieces, at + 2, &[object]))
    }

    fn subscript(&mut self, object: &Hyp, at: usize) -> Option<Hyp> {
        let index = self.expression(Operand::FULL, at + 1)?;
        let (kind, _) = self.peek(index.end)?;
        if kind != R_BRACKET {
            return None;
        }
        let pieces = vec![
            self.field_of(OBJECT_FIELD, self.wrap(object)),
            self.token(at, L_BRACKET),
            self.fielded(INDEX_FIELD, &index),
            self.token(index.end, R_BRACKET),
        ];
        Some(self.combine(SUBSCRIPT_EXPRESSION, pieces, index.end + 1, &[object, &index]))
    }

    fn call_expression(&mut self, function: &Hyp, at: usize) -> Option<Hyp> {
        let hyps = self.call(self.grammar.arguments(), at);
        let arguments = hyps.get(choose(&hyps)?)?;
        let mut pieces = vec![self.field_of(FUNCTION_FIELD, self.wrap(function))];
        pieces.extend(arguments.pieces.iter().cloned());
        Some(self.combine(CALL_EXPRESSION, pieces, arguments.end, &[function, arguments]))
    }

    fn binary(&mut self, left: &Hyp, at: usize, precedence: u8, emitted: SyntaxKind) -> Option<Hyp> {
        let right = self.expression(Operand::at(precedence + 1), at + 1)?;
        let pieces = vec![
            self.field_of(LEFT_FIELD, self.wrap(left)),
            self.field_of(OPERATOR_FIELD, self.token(at, emitted)),
            self.fielded(RIGHT_FIELD, &right),
        ];
        Some(self.combine(BINARY_EXPRESSION, pieces, right.end, &[left, &right]))
    }

    fn as_expression(&mut self, value: &Hyp, at: usize) -> Option<Hyp> {
        let hyps = self.call(self.grammar.type_annotation(), at + 1);
        let ty = hyps.get(choose(&hyps)?)?;
        let pieces = vec![
            self.wrap(value),
            self.token(at, KEYWORD),
            self.fielded(TYPE_FIELD, ty),
        ];
        Some(self.combine(AS_EXPRESSION, pieces, ty.end, &[value, ty]))
    }

    fn conditional(&mut self, condition: &Hyp, at: usize) -> Option<Hyp> {
        let consequence = self.expression(Operand::at(level::ASSIGNMENT), at + 1)?;
        let (kind, _) = self.peek(consequence.end)?;
        if kind != COLON {
            return None;
        }
        let alternative = self.expression(Operand::at(level::CONDITIONAL), consequence.end + 1)?;
        let pieces = vec![
            self.field_of(CONDITION_FIELD, self.wrap(condition)),
            self.token(at, QUESTION),
            self.fielded(CONSEQUENCE_FIELD, &consequence),
            self.token(consequence.end, COLON),
            self.fielded(ALTERNATIVE_FIELD, &alternative),
        ];
        Some(self.combine(
            CONDITIONAL_EXPRESSION,
            pieces,
            alternative.end,
            &[condition, &consequence, &alternative],
        ))
    }

    fn assignment(&mut self, target: &Hyp, at: usize, operator: SyntaxKind) -> Option<Hyp> {
        let value = self.expression(Operand::at(level::ASSIGNMENT), at + 1)?;
        let pieces = vec![
            self.fielded(LEFT_FIELD, target),
            self.field_of(OPERATOR_FIELD, self.token(at, operator)),
            self.fielded(RIGHT_FIELD, &value),
        ];
        Some(self.combine(ASSIGNMENT_EXPRESSION, pieces, value.end, &[target, &value]))
    }
}

/// Depth of unclosed `(`, `[`, `{` and `${` in front of each token
fn nesting(tokens: &[Token<'_>]) -> Vec<usize> {
    let mut depth = 0usize;
    tokens
        .iter()
        .map(|token| {
            let before = depth;
            match token.kind {
                L_PAREN | L_BRACKET | L_BRACE | DOLLAR_L_BRACE => depth += 1,
                R_PAREN | R_BRACKET | R_BRACE => depth = depth.saturating_sub(1),
                _ => {}
            }
            before
        })
        .collect()
}

/// Only identifiers, member accesses and subscripts can be assigned to
fn assignable(target: &Hyp) -> bool {
    match target.pieces.as_slice() {
        [piece] => matches!(
            element_kind(&piece.element),
            IDENT | MEMBER_EXPRESSION | SUBSCRIPT_EXPRESSION
        ),
        _ => false,
    }
}
