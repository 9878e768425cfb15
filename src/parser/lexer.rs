//! Logos-based lexer for ArkTS
//!
//! Two logos token sets are used: one for ordinary code and one for the
//! inside of template literals. A small mode stack switches between them,
//! so `${ ... }` substitutions re-enter code mode and may nest further
//! templates. The lexer can start at any byte offset in code mode, which
//! incremental reparsing relies on.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::{TextRange, TextSize};

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }

    pub fn end(&self) -> TextSize {
        self.offset + TextSize::of(self.text)
    }

    pub fn lexeme(&self) -> Lexeme {
        Lexeme {
            kind: self.kind,
            range: self.range(),
        }
    }
}

/// A token detached from its text, as kept by a tree for later reparses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme {
    pub kind: SyntaxKind,
    pub range: TextRange,
}

impl Lexeme {
    /// The token this lexeme describes in `text`
    pub fn token<'a>(&self, text: &'a str) -> Token<'a> {
        Token {
            kind: self.kind,
            text: &text[self.range],
            offset: self.range.start(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Template,
    /// Inside `${ ... }`, with the number of unclosed `{` seen so far
    Substitution(u32),
}

/// Scanner mode stack
///
/// Transitions depend only on token kinds, so the same state machine can be
/// replayed over an already-lexed token stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modes {
    stack: Vec<Mode>,
}

impl Modes {
    /// True outside of any template literal
    pub fn is_top_level(&self) -> bool {
        self.stack.is_empty()
    }

    fn in_template(&self) -> bool {
        matches!(self.stack.last(), Some(Mode::Template))
    }

    /// Apply the mode transition caused by a token of `kind`
    pub fn advance(&mut self, kind: SyntaxKind) {
        match (self.stack.last_mut(), kind) {
            (Some(Mode::Template), SyntaxKind::BACKTICK) => {
                self.stack.pop();
            }
            (Some(Mode::Template), SyntaxKind::DOLLAR_L_BRACE) => {
                self.stack.push(Mode::Substitution(0));
            }
            (Some(Mode::Template), _) => {}
            (_, SyntaxKind::BACKTICK) => self.stack.push(Mode::Template),
            (Some(Mode::Substitution(depth)), SyntaxKind::L_BRACE) => *depth += 1,
            (Some(Mode::Substitution(depth)), SyntaxKind::R_BRACE) => {
                if *depth == 0 {
                    self.stack.pop();
                } else {
                    *depth -= 1;
                }
            }
            _ => {}
        }
    }
}

/// Lexer wrapping the logos-generated tokenizers
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    modes: Modes,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::starting_at(input, TextSize::new(0))
    }

    /// Start scanning at `offset`, in code mode
    ///
    /// `offset` must be a char boundary of `input`.
    pub fn starting_at(input: &'a str, offset: TextSize) -> Self {
        Self {
            input,
            pos: usize::from(offset).min(input.len()),
            modes: Modes::default(),
        }
    }

    /// Current byte position
    pub fn position(&self) -> TextSize {
        text_size(self.pos)
    }

    pub fn modes(&self) -> &Modes {
        &self.modes
    }

    /// Hook for the `_arkts_ui_block` external token.
    ///
    /// The grammar declares the token but attaches no behaviour to it, so the
    /// hook never produces anything.
    // TODO: define what `_arkts_ui_block` should match once a grammar revision specifies it.
    fn scan_external(&mut self) -> Option<Token<'a>> {
        None
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }
        if !self.modes.in_template() {
            if let Some(token) = self.scan_external() {
                return Some(token);
            }
        }

        let rest = &self.input[self.pos..];
        let (kind, len) = if self.modes.in_template() {
            lex_one::<TemplateToken>(rest)
        } else {
            lex_one::<CodeToken>(rest)
        };

        let text = &rest[..len];
        let offset = text_size(self.pos);
        self.pos += len;
        self.modes.advance(kind);

        Some(Token { kind, text, offset })
    }
}

/// Lex a single token at the start of `rest`
///
/// A position where no token matches yields a one-character `ERROR` token.
fn lex_one<'s, T>(rest: &'s str) -> (SyntaxKind, usize)
where
    T: Logos<'s, Source = str, Extras = ()> + Into<SyntaxKind>,
{
    let mut lexer = T::lexer(rest);
    match lexer.next() {
        Some(Ok(token)) if lexer.span().end > 0 => (token.into(), lexer.span().end),
        _ => {
            let width = rest.chars().next().map_or(1, char::len_utf8);
            (SyntaxKind::ERROR, width)
        }
    }
}

/// Offsets past `u32::MAX` saturate; trees never span that much text
fn text_size(pos: usize) -> TextSize {
    TextSize::try_from(pos).unwrap_or(TextSize::new(u32::MAX))
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Split a `STRING` token into its quotes, plain runs and escape sequences
///
/// The pieces cover `text` exactly. Text that is not a quoted literal comes
/// back as a single fragment.
pub fn string_parts(text: &str) -> Vec<(SyntaxKind, &str)> {
    let bytes = text.as_bytes();
    let quoted = bytes.len() >= 2
        && matches!(bytes[0], b'"' | b'\'')
        && bytes[bytes.len() - 1] == bytes[0];
    if !quoted {
        return vec![(SyntaxKind::STRING_FRAGMENT, text)];
    }

    let end = text.len() - 1;
    let mut parts = vec![(SyntaxKind::QUOTE, &text[..1])];
    let mut run = 1;
    let mut i = 1;
    while i < end {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        if run < i {
            parts.push((SyntaxKind::STRING_FRAGMENT, &text[run..i]));
        }
        let len = (1 + escape_len(&bytes[i + 1..end])).min(end - i);
        parts.push((SyntaxKind::ESCAPE_SEQUENCE, &text[i..i + len]));
        i += len;
        run = i;
    }
    if run < end {
        parts.push((SyntaxKind::STRING_FRAGMENT, &text[run..end]));
    }
    parts.push((SyntaxKind::QUOTE, &text[end..]));
    parts
}

/// Length of an escape after its backslash: up to three digits,
/// `x` plus two hex digits, `u` plus four, or one character
fn escape_len(rest: &[u8]) -> usize {
    match rest.first() {
        None => 0,
        Some(b'x') => 3,
        Some(b'u') => 5,
        Some(b'0'..=b'9') => rest.iter().take(3).take_while(|b| b.is_ascii_digit()).count(),
        Some(_) => 1,
    }
}

/// Logos token enum for code mode - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum CodeToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[\s\u{FEFF}]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    // Stops at the first `*/`
    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    // No leading `$`: it lexes as DOLLAR so `$count` and `$r(...)` reach
    // state_binding_expression and resource_expression.
    #[regex(r"[A-Za-z_][A-Za-z0-9_$]*")]
    Ident,

    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\]|\\(["'\\bfnrtv]|[0-9]{1,3}|x[0-9a-fA-F]{2}|u[0-9a-fA-F]{4}))*""#)]
    #[regex(r#"'([^'\\]|\\(["'\\bfnrtv]|[0-9]{1,3}|x[0-9a-fA-F]{2}|u[0-9a-fA-F]{4}))*'"#)]
    String,

    // =========================================================================
    // PUNCTUATION (logos picks the longest match)
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token(",")]
    Comma,
    #[token("?")]
    Question,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("===")]
    EqEqEq,
    #[token("!=")]
    BangEq,
    #[token("!==")]
    BangEqEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token(">>>")]
    GtGtGt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("**=")]
    StarStarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("<<=")]
    LtLtEq,
    #[token(">>=")]
    GtGtEq,
    #[token(">>>=")]
    GtGtGtEq,
    #[token("=>")]
    FatArrow,
    #[token("@")]
    At,
    #[token("$")]
    Dollar,
    #[token("`")]
    Backtick,
}

impl From<CodeToken> for SyntaxKind {
    fn from(token: CodeToken) -> Self {
        use CodeToken::*;
        match token {
            Whitespace => SyntaxKind::WHITESPACE,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,
            Ident => SyntaxKind::IDENT,
            Number => SyntaxKind::NUMBER,
            String => SyntaxKind::STRING,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            Dot => SyntaxKind::DOT,
            Ellipsis => SyntaxKind::ELLIPSIS,
            Comma => SyntaxKind::COMMA,
            Question => SyntaxKind::QUESTION,
            Eq => SyntaxKind::EQ,
            EqEq => SyntaxKind::EQ_EQ,
            EqEqEq => SyntaxKind::EQ_EQ_EQ,
            BangEq => SyntaxKind::BANG_EQ,
            BangEqEq => SyntaxKind::BANG_EQ_EQ,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            LtEq => SyntaxKind::LT_EQ,
            GtEq => SyntaxKind::GT_EQ,
            LtLt => SyntaxKind::LT_LT,
            GtGt => SyntaxKind::GT_GT,
            GtGtGt => SyntaxKind::GT_GT_GT,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            StarStar => SyntaxKind::STAR_STAR,
            Slash => SyntaxKind::SLASH,
            Percent => SyntaxKind::PERCENT,
            PlusPlus => SyntaxKind::PLUS_PLUS,
            MinusMinus => SyntaxKind::MINUS_MINUS,
            Amp => SyntaxKind::AMP,
            Pipe => SyntaxKind::PIPE,
            Caret => SyntaxKind::CARET,
            Tilde => SyntaxKind::TILDE,
            Bang => SyntaxKind::BANG,
            AmpAmp => SyntaxKind::AMP_AMP,
            PipePipe => SyntaxKind::PIPE_PIPE,
            PlusEq => SyntaxKind::PLUS_EQ,
            MinusEq => SyntaxKind::MINUS_EQ,
            StarEq => SyntaxKind::STAR_EQ,
            StarStarEq => SyntaxKind::STAR_STAR_EQ,
            SlashEq => SyntaxKind::SLASH_EQ,
            PercentEq => SyntaxKind::PERCENT_EQ,
            AmpEq => SyntaxKind::AMP_EQ,
            PipeEq => SyntaxKind::PIPE_EQ,
            CaretEq => SyntaxKind::CARET_EQ,
            LtLtEq => SyntaxKind::LT_LT_EQ,
            GtGtEq => SyntaxKind::GT_GT_EQ,
            GtGtGtEq => SyntaxKind::GT_GT_GT_EQ,
            FatArrow => SyntaxKind::FAT_ARROW,
            At => SyntaxKind::AT,
            Dollar => SyntaxKind::DOLLAR,
            Backtick => SyntaxKind::BACKTICK,
        }
    }
}

/// Logos token enum for the inside of a template literal
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum TemplateToken {
    #[regex(r"[^`$\\]+")]
    #[regex(r"\\(.|\n)")]
    #[token("$")]
    Chars,

    #[token("${")]
    SubstitutionStart,

    #[token("`")]
    Backtick,
}

impl From<TemplateToken> for SyntaxKind {
    fn from(token: TemplateToken) -> Self {
        match token {
            TemplateToken::Chars => SyntaxKind::TEMPLATE_CHARS,
            TemplateToken::SubstitutionStart => SyntaxKind::DOLLAR_L_BRACE,
            TemplateToken::Backtick => SyntaxKind::BACKTICK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        Lexer::new(input)
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_lex_struct_header() {
        let tokens: Vec<_> = Lexer::new("@Component struct Index {").collect();
        assert_eq!(tokens.len(), 7);
        assert_eq!(tokens[0].kind, SyntaxKind::AT);
        assert_eq!(tokens[1].kind, SyntaxKind::IDENT);
        assert_eq!(tokens[1].text, "Component");
        assert_eq!(tokens[2].kind, SyntaxKind::WHITESPACE);
        assert_eq!(tokens[3].kind, SyntaxKind::IDENT);
        assert_eq!(tokens[6].kind, SyntaxKind::L_BRACE);
    }

    #[test]
    fn test_lex_comments() {
        let tokens: Vec<_> = Lexer::new("// line\n/* a ** b */x/* c */").collect();
        assert_eq!(tokens[0].kind, SyntaxKind::LINE_COMMENT);
        assert_eq!(tokens[1].kind, SyntaxKind::WHITESPACE);
        assert_eq!(tokens[2].kind, SyntaxKind::BLOCK_COMMENT);
        assert_eq!(tokens[2].text, "/* a ** b */");
        assert_eq!(tokens[3].kind, SyntaxKind::IDENT);
        assert_eq!(tokens[4].kind, SyntaxKind::BLOCK_COMMENT);
    }

    #[test]
    fn test_lex_strings_and_escapes() {
        let tokens = tokenize(r#"'it\'s' "a\x41\u0041\101""#);
        assert_eq!(tokens[0].kind, SyntaxKind::STRING);
        assert_eq!(tokens[0].text, r"'it\'s'");
        assert_eq!(tokens[2].kind, SyntaxKind::STRING);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_offsets_saturate() {
        assert_eq!(text_size(7), TextSize::new(7));
        assert_eq!(text_size(u32::MAX as usize + 5), TextSize::new(u32::MAX));
    }

    #[test]
    fn test_string_parts() {
        use SyntaxKind::*;
        let parts = string_parts(r#""a\x41A\101b\n""#);
        assert_eq!(
            parts,
            [
                (QUOTE, "\""),
                (STRING_FRAGMENT, "a"),
                (ESCAPE_SEQUENCE, r"\x41"),
                (STRING_FRAGMENT, "A"),
                (ESCAPE_SEQUENCE, r"\101"),
                (STRING_FRAGMENT, "b"),
                (ESCAPE_SEQUENCE, r"\n"),
                (QUOTE, "\""),
            ]
        );
        assert_eq!(string_parts("''"), [(QUOTE, "'"), (QUOTE, "'")]);
        assert_eq!(string_parts(r"'\''")[1], (ESCAPE_SEQUENCE, r"\'"));
        let joined: String = string_parts("'héllo'").iter().map(|(_, t)| *t).collect();
        assert_eq!(joined, "'héllo'");
    }

    #[test]
    fn test_lex_unterminated_string_is_error() {
        let tokens = tokenize("'abc");
        assert_eq!(tokens[0].kind, SyntaxKind::ERROR);
        assert_eq!(tokens[0].text, "'");
        assert_eq!(tokens[1].kind, SyntaxKind::IDENT);
    }

    #[test]
    fn test_lex_numbers() {
        assert_eq!(
            kinds("1 2.5 3e10 4.0E-2"),
            vec![SyntaxKind::NUMBER; 4]
        );
    }

    #[test]
    fn test_lex_longest_punctuation() {
        assert_eq!(
            kinds(">>>= => ... === **"),
            vec![
                SyntaxKind::GT_GT_GT_EQ,
                SyntaxKind::FAT_ARROW,
                SyntaxKind::ELLIPSIS,
                SyntaxKind::EQ_EQ_EQ,
                SyntaxKind::STAR_STAR,
            ]
        );
    }

    #[test]
    fn test_dollar_continues_identifier() {
        assert_eq!(kinds("a$b"), vec![SyntaxKind::IDENT]);
        assert_eq!(kinds("$a$b"), vec![SyntaxKind::DOLLAR, SyntaxKind::IDENT]);
    }

    #[test]
    fn test_lex_dollar_is_separate() {
        assert_eq!(
            kinds("$count $r('x')"),
            vec![
                SyntaxKind::DOLLAR,
                SyntaxKind::IDENT,
                SyntaxKind::DOLLAR,
                SyntaxKind::IDENT,
                SyntaxKind::L_PAREN,
                SyntaxKind::STRING,
                SyntaxKind::R_PAREN,
            ]
        );
    }

    #[test]
    fn test_lex_template_with_nested_substitution() {
        let tokens = tokenize("`a ${ {b: `c${d}`} } $e\\``");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds[0], SyntaxKind::BACKTICK);
        assert_eq!(kinds[1], SyntaxKind::TEMPLATE_CHARS);
        assert_eq!(kinds[2], SyntaxKind::DOLLAR_L_BRACE);
        assert!(kinds.contains(&SyntaxKind::COLON));
        assert_eq!(*kinds.last().unwrap(), SyntaxKind::BACKTICK);
        let texts: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, "`a ${ {b: `c${d}`} } $e\\``");
    }

    #[test]
    fn test_lex_invalid_character() {
        let tokens = tokenize("a # b");
        assert_eq!(tokens[2].kind, SyntaxKind::ERROR);
        assert_eq!(tokens[2].text, "#");
    }

    #[test]
    fn test_lex_multibyte_invalid_character() {
        let tokens = tokenize("é");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, SyntaxKind::ERROR);
        assert_eq!(tokens[0].text, "é");
    }

    #[test]
    fn test_restart_at_offset() {
        let source = "let a = 1; let b = 2;";
        let tokens: Vec<_> = Lexer::starting_at(source, TextSize::new(11)).collect();
        assert_eq!(tokens[0].text, "let");
        assert_eq!(tokens[0].offset, TextSize::new(11));
        assert_eq!(tokens.last().unwrap().end(), TextSize::of(source));
    }

    #[test]
    fn test_modes_replay() {
        let mut modes = Modes::default();
        for token in tokenize("`x${ y }z`") {
            modes.advance(token.kind);
            if token.kind == SyntaxKind::IDENT {
                assert!(!modes.is_top_level());
            }
        }
        assert!(modes.is_top_level());
    }
}
