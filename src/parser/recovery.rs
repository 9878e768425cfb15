//! Error recovery for recovering bodies
//!
//! Every brace-delimited body in the grammar, and the top level of a file,
//! is a list of items parsed one at a time. Where no item parses, the
//! tokens are skipped up to a synchronisation point and wrapped in an
//! `ERROR` node; a body left open at end of input gets a zero-width
//! `MISSING` closer. Either way a diagnostic is recorded, and parsing
//! carries on with the next item.

use rowan::{GreenNode, GreenToken, TextRange};
use tracing::trace;

use crate::parser::SyntaxKind::{self, *};
use crate::parser::engine::{Engine, Hyp, ItemRecord, MAX_NESTING, Piece, choose};
use crate::parser::errors::{ErrorCode, ParseContext, RelatedInfo, SyntaxError};
use crate::parser::grammar::Body;

impl ParseContext {
    /// Whether a token starts a fresh item, ending a skipped span
    fn synchronises_on(&self, kind: SyntaxKind, text: &str) -> bool {
        self.recovery_tokens().contains(&kind)
            || (kind == IDENT && self.recovery_words().contains(&text))
    }
}

impl<'a> Engine<'a> {
    /// Parse a recovering body starting at `pos`
    ///
    /// Fails only when the opening token is absent; everything after it is
    /// accepted, with recovered spans marked in the tree.
    pub(super) fn body(&mut self, body: &'static Body, pos: usize) -> Option<Hyp> {
        let mut hyp = Hyp::empty(pos);
        let mut at = pos;
        if let Some(open) = body.open {
            let (kind, _) = self.peek(at)?;
            if kind != open {
                return None;
            }
            hyp.push(self.token(at, open), at + 1);
            at += 1;
        }

        while !self.aborted {
            let Some((kind, _)) = self.peek(at) else {
                if let Some(close) = body.close {
                    let (piece, error) = self.missing(close, body.context, pos);
                    hyp.pieces.push(piece);
                    hyp.errors.push(error);
                }
                break;
            };
            if Some(kind) == body.close {
                hyp.push(self.token(at, kind), at + 1);
                hyp.contained = hyp.errors.len();
                break;
            }

            if let Some(item) = self.reused_item(body.context, at) {
                at = item.end;
                hyp.append(item);
                continue;
            }

            let saved = std::mem::replace(&mut self.reach, at);
            let mut items = self.eval(&body.item, at);
            items.retain(|item| item.end > at);
            let item_reach = self.reach;
            self.reach = saved.max(item_reach);

            match choose(&items) {
                Some(best) => {
                    let mut item = items.swap_remove(best);
                    let record = self.record(body.context, at, item_reach, &mut item);
                    at = item.end;
                    hyp.append(item);
                    hyp.records.push(record);
                }
                None => {
                    let (end, piece, error) = self.skip(body, at, item_reach);
                    at = end;
                    hyp.push(piece, end);
                    hyp.errors.push(error);
                }
            }
        }
        hyp.prec = 0;
        Some(hyp)
    }

    fn record(&self, context: ParseContext, at: usize, reach: usize, item: &mut Hyp) -> ItemRecord {
        let start = self.tokens[at].offset;
        let end = self.tokens[item.end - 1].end();
        ItemRecord {
            context,
            range: TextRange::new(start, end),
            reach: self.reach_offset(reach),
            tokens: item.end - at,
            pieces: item
                .pieces
                .iter()
                .map(|piece| (piece.first.map(|first| first - at), piece.element.clone()))
                .collect(),
            errors: item.errors.clone(),
            contained: item.contained,
            nested: std::mem::take(&mut item.records),
        }
    }

    /// An item from the previous tree at the same context and offset
    fn reused_item(&mut self, context: ParseContext, at: usize) -> Option<Hyp> {
        if self.reuse.is_empty() {
            return None;
        }
        let offset = self.tokens.get(at)?.offset;
        let record = self.reuse.get(&(context, offset))?.clone();
        let end = at + record.tokens;
        if self.tokens.get(end - 1)?.end() != record.range.end() {
            return None;
        }

        let reach = self.reach_index(record.reach);
        self.reach = self.reach.max(reach);
        self.reused += 1;

        let mut hyp = Hyp::empty(end);
        hyp.pieces = record
            .pieces
            .iter()
            .map(|(first, element)| Piece {
                first: first.map(|first| first + at),
                element: element.clone(),
            })
            .collect();
        hyp.errors = record.errors.clone();
        hyp.contained = record.contained;
        hyp.records.push(record);
        Some(hyp)
    }

    /// Skip from `at` to the next synchronisation point
    ///
    /// At least one token is consumed. Brace groups are skipped whole. The
    /// skip ends after a `;`, after a closing brace that belongs to nothing,
    /// or before the body's closing token or a token that starts a new item.
    fn skip(&mut self, body: &Body, at: usize, item_reach: usize) -> (usize, Piece, SyntaxError) {
        let mut end = at;
        let mut depth = 0usize;
        let mut pieces = Vec::new();
        while let Some((kind, text)) = self.peek(end) {
            if end > at
                && depth == 0
                && (Some(kind) == body.close || body.context.synchronises_on(kind, text))
            {
                break;
            }
            pieces.push(self.token(end, kind));
            end += 1;
            match kind {
                L_BRACE => depth += 1,
                R_BRACE if depth > 0 => depth -= 1,
                R_BRACE => break,
                SEMICOLON if depth == 0 => break,
                _ => {}
            }
        }

        let range = TextRange::new(self.tokens[at].offset, self.tokens[end - 1].end());
        let code = self.classify(at, end, item_reach);
        let error = self.describe(code, body.context, at, end, range);
        trace!(
            context = ?body.context,
            start = u32::from(range.start()),
            tokens = end - at,
            code = %code,
            "skipped unparsable tokens"
        );
        (end, self.build(ERROR, pieces), error)
    }

    /// Diagnostic code for the skipped tokens `at..end`
    fn classify(&self, at: usize, end: usize, item_reach: usize) -> ErrorCode {
        if (at..end).any(|i| self.too_deep(i)) {
            return ErrorCode::E0206;
        }
        let first = &self.tokens[at];
        match first.kind {
            ERROR if matches!(first.text, "\"" | "'") => return ErrorCode::E0102,
            ERROR => return ErrorCode::E0101,
            SLASH if self.tokens.get(at + 1).is_some_and(|next| {
                next.kind == STAR && next.offset == first.end()
            }) =>
            {
                return ErrorCode::E0103;
            }
            BACKTICK => return ErrorCode::E0104,
            R_BRACE | R_PAREN | R_BRACKET => return ErrorCode::E0205,
            _ => {}
        }
        if let Some((code, _)) = self.unclosed(at, end) {
            return code;
        }
        if item_reach > at {
            ErrorCode::E0301
        } else {
            ErrorCode::E0201
        }
    }

    /// The first `(` or `[` in `at..end` left open, with its code
    fn unclosed(&self, at: usize, end: usize) -> Option<(ErrorCode, usize)> {
        let mut open = Vec::new();
        for (i, token) in self.tokens[at..end].iter().enumerate() {
            match token.kind {
                L_PAREN | L_BRACKET => open.push((token.kind, at + i)),
                R_PAREN | R_BRACKET => {
                    open.pop();
                }
                _ => {}
            }
        }
        open.first().map(|&(kind, index)| {
            let code = if kind == L_PAREN {
                ErrorCode::E0203
            } else {
                ErrorCode::E0204
            };
            (code, index)
        })
    }

    fn describe(
        &self,
        code: ErrorCode,
        context: ParseContext,
        at: usize,
        end: usize,
        range: TextRange,
    ) -> SyntaxError {
        let found = self.tokens[at].text;
        match code {
            ErrorCode::E0203 | ErrorCode::E0204 => {
                let (_, index) = self.unclosed(at, end).unwrap_or((code, at));
                let opened = self.tokens[index].range();
                SyntaxError::new(
                    format!("{} {}", code.default_message(), context.description()),
                    range,
                    code,
                )
                .with_related(RelatedInfo::new("opened here", opened))
            }
            code if code.is_lexical() => {
                SyntaxError::new(format!("{} `{}`", code.default_message(), found), range, code)
            }
            ErrorCode::E0206 => SyntaxError::new(
                format!("{} {}", code.default_message(), context.description()),
                range,
                code,
            )
            .with_hint(format!("brackets nest at most {MAX_NESTING} deep")),
            ErrorCode::E0205 => SyntaxError::new(
                format!("{} `{}` {}", code.default_message(), found, context.description()),
                range,
                code,
            ),
            _ => crate::parser::errors::format_context_error(
                &format!("`{found}`"),
                context,
                code,
                range,
            ),
        }
    }

    /// A zero-width closer for a body still open at end of input
    fn missing(&self, close: SyntaxKind, context: ParseContext, open: usize) -> (Piece, SyntaxError) {
        let token = GreenToken::new(close.into(), "");
        let piece = Piece {
            first: None,
            element: GreenNode::new(MISSING.into(), [token.into()]).into(),
        };
        let code = match close {
            R_PAREN => ErrorCode::E0203,
            R_BRACKET => ErrorCode::E0204,
            _ => ErrorCode::E0202,
        };
        let eof = self.reach_offset(self.tokens.len());
        let error = SyntaxError::at_offset(
            format!("missing `{}` {}", close.name(), context.description()),
            eof,
            code,
        )
        .with_hint(format!("add `{}` to close it", close.name()))
        .with_related(RelatedInfo::new("opened here", self.tokens[open].range()));
        (piece, error)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ErrorCode;
    use crate::parser::engine::{Engine, MAX_NESTING};
    use crate::parser::lexer::tokenize;
    use crate::parser::{SyntaxKind, SyntaxNode};

    fn parse(source: &str) -> (SyntaxNode, Vec<crate::parser::SyntaxError>) {
        let output = Engine::new(source, tokenize(source), None).run().unwrap();
        (SyntaxNode::new_root(output.green), output.errors)
    }

    fn count(root: &SyntaxNode, kind: SyntaxKind) -> usize {
        root.descendants().filter(|n| n.kind() == kind).count()
    }

    #[test]
    fn test_skip_stops_after_semicolon() {
        let (root, errors) = parse(") ; let a = 1");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::E0205);
        let error = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::ERROR)
            .unwrap();
        assert_eq!(error.text().to_string(), ") ;");
        assert_eq!(count(&root, SyntaxKind::VARIABLE_DECLARATION), 1);
    }

    #[test]
    fn test_skip_stops_before_sync_word() {
        let (root, errors) = parse("= = struct A {}");
        assert_eq!(errors.len(), 1);
        assert_eq!(count(&root, SyntaxKind::COMPONENT_DECLARATION), 1);
    }

    #[test]
    fn test_missing_brace_at_end_of_input() {
        let (root, errors) = parse("function f() {\n  let a = 1\n");
        assert_eq!(count(&root, SyntaxKind::MISSING), 1);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::E0202);
        assert!(errors[0].has_related());
        assert_eq!(root.text().to_string(), "function f() {\n  let a = 1\n");
    }

    #[test]
    fn test_deep_nesting_is_skipped() {
        let depth = MAX_NESTING + 40;
        let source = format!("let a = {}1{}\nlet b = 2", "(".repeat(depth), ")".repeat(depth));
        let (root, errors) = parse(&source);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::E0206);
        assert!(errors[0].hint.is_some());
        assert_eq!(count(&root, SyntaxKind::VARIABLE_DECLARATION), 2);
        let error = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::ERROR)
            .unwrap();
        assert!(error.text().to_string().starts_with("= (("));
        assert_eq!(root.text().to_string(), source);
    }

    #[test]
    fn test_invalid_character_is_lexical() {
        let (_, errors) = parse("let a = 1\n#\nlet b = 2");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::E0101);
    }

    #[test]
    fn test_unclosed_call_in_build_body() {
        let source = "struct A { build() { Text('Hello' } }";
        let (root, errors) = parse(source);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::E0203);
        assert_eq!(count(&root, SyntaxKind::COMPONENT_DECLARATION), 1);
        assert_eq!(count(&root, SyntaxKind::BUILD_METHOD), 1);
        assert_eq!(count(&root, SyntaxKind::EXPRESSION_STATEMENT), 0);

        let error = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::ERROR)
            .unwrap();
        assert_eq!(error.text().to_string(), "Text('Hello'");
        assert_eq!(error.parent().unwrap().kind(), SyntaxKind::BUILD_BODY);
        assert_eq!(root.text().to_string(), source);
    }

    #[test]
    fn test_closed_body_contains_its_errors() {
        let source = "class C { foo() { let a = (1 } }";
        let (root, errors) = parse(source);
        assert_eq!(errors.len(), 1);
        assert_eq!(count(&root, SyntaxKind::CLASS_DECLARATION), 1);
        assert_eq!(count(&root, SyntaxKind::METHOD_DECLARATION), 1);
        assert_eq!(count(&root, SyntaxKind::PROPERTY_DECLARATION), 0);

        let error = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::ERROR)
            .unwrap();
        assert!(error.ancestors().any(|n| n.kind() == SyntaxKind::METHOD_DECLARATION));
        assert_eq!(error.parent().unwrap().kind(), SyntaxKind::BLOCK_STATEMENT);
    }

    #[test]
    fn test_interface_member_error_stays_in_body() {
        let source = "interface I { a: number; b: }";
        let (root, errors) = parse(source);
        assert_eq!(errors.len(), 1);
        assert_eq!(count(&root, SyntaxKind::INTERFACE_DECLARATION), 1);
        assert_eq!(count(&root, SyntaxKind::TYPE_MEMBER), 1);

        let error = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::ERROR)
            .unwrap();
        assert_eq!(error.text().to_string(), "b:");
        assert_eq!(error.parent().unwrap().kind(), SyntaxKind::OBJECT_TYPE);
    }
}
