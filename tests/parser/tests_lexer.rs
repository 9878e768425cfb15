//! Lexer properties over arbitrary input

#![allow(clippy::unwrap_used)]

use arkts::parser::{Lexer, SyntaxKind, tokenize};
use arkts::TextSize;
use proptest::prelude::*;

use crate::helpers::source_fixtures::WELL_FORMED;

proptest! {
    #[test]
    fn test_tokens_cover_input(input in "\\PC{0,64}") {
        let tokens = tokenize(&input);
        let joined: String = tokens.iter().map(|t| t.text).collect();
        prop_assert_eq!(joined, input.clone());
        let mut offset = TextSize::new(0);
        for token in &tokens {
            prop_assert_eq!(token.offset, offset);
            prop_assert!(!token.text.is_empty());
            offset = token.end();
        }
    }

    #[test]
    fn test_restart_at_token_boundary(
        index in 0usize..WELL_FORMED.len(),
        pick in any::<prop::sample::Index>(),
    ) {
        let source = WELL_FORMED[index];
        let full = tokenize(source);
        // restart only where no template literal is open
        let mut modes = arkts::parser::lexer::Modes::default();
        let mut boundaries = Vec::new();
        for (i, token) in full.iter().enumerate() {
            if modes.is_top_level() {
                boundaries.push(i);
            }
            modes.advance(token.kind);
        }
        let start = boundaries[pick.index(boundaries.len())];
        let restarted: Vec<_> = Lexer::starting_at(source, full[start].offset).collect();
        prop_assert_eq!(&restarted[..], &full[start..]);
    }
}

#[test]
fn test_fixtures_lex_without_errors() {
    for source in WELL_FORMED {
        assert!(
            tokenize(source).iter().all(|t| t.kind != SyntaxKind::ERROR),
            "lexical error in:\n{source}"
        );
    }
}

#[test]
fn test_contextual_keywords_are_identifiers() {
    let tokens = tokenize("struct build Component State");
    assert!(
        tokens
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .all(|t| t.kind == SyntaxKind::IDENT)
    );
}
