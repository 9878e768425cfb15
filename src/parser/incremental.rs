//! Incremental reparse
//!
//! A reparse keeps the token stream of the old text up to a restart point
//! before the edit, relexes from there until the new tokens line up with
//! the old ones again, and splices the remaining old tokens in shifted by
//! the edit's delta. The engine then runs over the new tokens with the old
//! body items on offer: an item is taken verbatim when it starts at the
//! same offset in the same kind of body and nothing it looked at was
//! touched by the edit.
//!
//! The tree produced is the one a full parse of the new text would give.

use rowan::TextSize;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::parser::SyntaxKind::*;
use crate::parser::engine::{Engine, ItemRecord, Output};
use crate::parser::errors::{ParseContext, ParseError, shift_range};
use crate::parser::lexer::{Lexeme, Lexer, Modes, Token, tokenize};
use crate::syntax::Edit;

/// Bytes kept untouched between the restart point and the edit
///
/// No token's longest match looks further ahead than this (`>>>=`).
const LOOKAHEAD: u32 = 3;

/// What a reparse needs from the previous parse
pub(crate) struct Previous<'p> {
    pub(crate) text: &'p str,
    pub(crate) lexemes: &'p [Lexeme],
    pub(crate) records: &'p [ItemRecord],
}

/// Parse `text` from scratch
pub(crate) fn parse(text: &str, budget: Option<usize>) -> Result<Output, ParseError> {
    addressable(text.len())?;
    Engine::new(text, tokenize(text), budget).run()
}

/// Tree offsets are `u32`
fn addressable(len: usize) -> Result<(), ParseError> {
    if u32::try_from(len).is_ok() {
        Ok(())
    } else {
        Err(ParseError::InputTooLarge { len })
    }
}

/// Parse `text`, the result of applying `edit` to `previous.text`
pub(crate) fn reparse(
    previous: &Previous<'_>,
    text: &str,
    edit: &Edit,
    budget: Option<usize>,
) -> Result<Output, ParseError> {
    if !edit.is_consistent(previous.text, text) || addressable(text.len()).is_err() {
        warn!(
            start = edit.start_byte,
            old_end = edit.old_end_byte,
            new_end = edit.new_end_byte,
            old_len = previous.text.len(),
            new_len = text.len(),
            "edit does not match the texts, parsing from scratch"
        );
        return parse(text, budget);
    }

    let delta = edit.delta();
    let start = TextSize::new(edit.start_byte as u32);
    let new_end = TextSize::new(edit.new_end_byte as u32);
    let lexemes = previous.lexemes;
    let top_level = top_level_before(lexemes);

    let keep = restart_index(lexemes, &top_level, start);
    let restart = lexemes.get(keep).map_or(TextSize::new(0), |l| l.range.start());

    let mut tokens: Vec<Token<'_>> = lexemes[..keep].iter().map(|l| l.token(text)).collect();
    let mut lexer = Lexer::starting_at(text, restart);
    let mut converged = None;
    loop {
        let position = lexer.position();
        if position >= new_end && lexer.modes().is_top_level() {
            if let Some(j) = old_lexeme_at(lexemes, &top_level, position, delta) {
                converged = Some(j);
                break;
            }
        }
        match lexer.next() {
            Some(token) => tokens.push(token),
            None => break,
        }
    }

    let mut convergence = None;
    if let Some(j) = converged {
        convergence = Some(lexemes[j].range.start());
        tokens.extend(lexemes[j..].iter().map(|l| shifted(l, delta).token(text)));
    }

    let mut reuse = FxHashMap::default();
    collect_reusable(previous.records, restart, convergence, delta, &mut reuse);
    let offered = reuse.len();

    let output = Engine::new(text, tokens, budget).with_reuse(reuse).run()?;
    debug!(
        restart = u32::from(restart),
        convergence = convergence.map(u32::from),
        offered,
        reused = output.reused,
        "reparsed after edit"
    );
    Ok(output)
}

/// For each old lexeme, whether the scanner was outside any template
/// literal just before it
fn top_level_before(lexemes: &[Lexeme]) -> Vec<bool> {
    let mut modes = Modes::default();
    lexemes
        .iter()
        .map(|lexeme| {
            let top = modes.is_top_level();
            modes.advance(lexeme.kind);
            top
        })
        .collect()
}

/// Index of the old lexeme to relex from
///
/// It starts at least [`LOOKAHEAD`] bytes before the edit, outside any
/// template, and after no lexical error. Index 0 always qualifies.
fn restart_index(lexemes: &[Lexeme], top_level: &[bool], edit_start: TextSize) -> usize {
    let limit = edit_start - edit_start.min(TextSize::new(LOOKAHEAD));
    let mut best = 0;
    for (i, lexeme) in lexemes.iter().enumerate() {
        if lexeme.range.start() > limit {
            break;
        }
        if top_level[i] {
            best = i;
        }
        if lexeme.kind == ERROR || opens_comment(lexemes, i) {
            break;
        }
    }
    best
}

/// `/` immediately followed by `*`: an unterminated block comment
fn opens_comment(lexemes: &[Lexeme], i: usize) -> bool {
    lexemes[i].kind == SLASH
        && lexemes
            .get(i + 1)
            .is_some_and(|next| next.kind == STAR && next.range.start() == lexemes[i].range.end())
}

/// The old lexeme that starts where new offset `position` maps back to,
/// if the old scanner was at the top level there
fn old_lexeme_at(lexemes: &[Lexeme], top_level: &[bool], position: TextSize, delta: i64) -> Option<usize> {
    let old = i64::from(u32::from(position)) - delta;
    let old = TextSize::new(u32::try_from(old).ok()?);
    let j = lexemes
        .binary_search_by_key(&old, |l| l.range.start())
        .ok()?;
    top_level[j].then_some(j)
}

fn shifted(lexeme: &Lexeme, delta: i64) -> Lexeme {
    Lexeme {
        kind: lexeme.kind,
        range: shift_range(lexeme.range, delta),
    }
}

/// Gather the old items that may be reused, keyed by context and new start
///
/// Items that looked at nothing past `restart` keep their offsets; items
/// starting at or after `convergence` move by `delta`.
fn collect_reusable(
    records: &[ItemRecord],
    restart: TextSize,
    convergence: Option<TextSize>,
    delta: i64,
    reuse: &mut FxHashMap<(ParseContext, TextSize), ItemRecord>,
) {
    for record in records {
        if record.reach <= restart {
            reuse.insert((record.context, record.range.start()), record.clone());
        } else if convergence.is_some_and(|c| record.range.start() >= c) {
            let moved = record.shifted(delta);
            reuse.insert((moved.context, moved.range.start()), moved);
        }
        collect_reusable(&record.nested, restart, convergence, delta, reuse);
    }
}
