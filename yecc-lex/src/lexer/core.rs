//! The top-level state machine: `next_token` itself. Every other module
//! under [`super`] supplies one piece of the dispatch this file
//! orchestrates; this is the only place that walks the full "skip
//! whitespace, frame directives, dispatch on the first byte" algorithm.

use yecc_util::diagnostic::DiagnosticKind;
use yecc_util::{Position, Span};

use crate::context::Warning;
use crate::token::{Token, TokenKind};

use super::{Lexer, PpKind};

impl<'a> Lexer<'a> {
    /// Produces the next token. Always succeeds; EOF is a token
    /// (`TokenKind::Eof`), never an error.
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace_and_comments();

            if self.at_line_start {
                if let Some(tok) = self.try_lex_directive_hash() {
                    return tok;
                }
            }

            if self.in_directive && self.peek_byte() == Some(b'\n') {
                self.consume_byte();
                self.in_directive = false;
                self.at_line_start = true;
                continue;
            }

            break;
        }

        let start = self.stream.position();

        if self.peek_byte().is_none() {
            return Token::new(TokenKind::Eof, Span::point(start));
        }

        if self.in_directive && self.expect_header_name {
            if let Some(tok) = self.try_lex_header_name(start) {
                self.at_line_start = false;
                return tok;
            }
        }

        let tok = self.dispatch(start);
        self.at_line_start = false;
        tok
    }

    /// At the start of a line, a `#` (or, when trigraphs/digraphs are
    /// enabled, a `%:` digraph — `??=` is already folded to `#` by the
    /// translation phases) opens a directive.
    fn try_lex_directive_hash(&mut self) -> Option<Token> {
        let start = self.stream.position();
        let window = crate::phases::peek_translated(&mut self.stream, self.ctx, 2);
        let b0 = window.first().map(|t| t.byte);
        let b1 = window.get(1).map(|t| t.byte);

        let is_hash = b0 == Some(b'#');
        let is_digraph_hash = self.ctx.enable_trigraphs && b0 == Some(b'%') && b1 == Some(b':');

        if !is_hash && !is_digraph_hash {
            return None;
        }

        self.consume_byte();
        if is_digraph_hash {
            self.consume_byte();
            self.emit_masked_warning(Warning::Trigraphs, DiagnosticKind::ExtensionUsage, Span::new(start, start), "digraph used");
        }

        self.in_directive = true;
        self.at_line_start = false;
        self.pp_kind = PpKind::None;
        self.expect_header_name = false;

        let span = Span::new(start, self.stream.position());
        Some(Token::new(TokenKind::PpHash, span))
    }

    /// Dispatch on the first (translated) byte. Literal-prefix checks run
    /// before the identifier check since `u`, `U`, and `L` are themselves
    /// valid identifier-start bytes; only a prefix actually followed by a
    /// quote diverts into a literal.
    fn dispatch(&mut self, start: Position) -> Token {
        let byte = self.peek_byte().expect("caller checked for EOF");

        if byte.is_ascii_digit() || (byte == b'.' && self.second_byte_is_digit()) {
            return self.lex_number(start);
        }

        if self.peek_literal_prefix(b'"') {
            return self.lex_string_literal(start);
        }

        if self.peek_literal_prefix(b'\'') {
            return self.lex_char_literal(start);
        }

        if byte >= 0x80
            || byte == b'_'
            || byte.is_ascii_alphabetic()
            || (byte == b'$' && self.ctx.gnu_extensions)
            || self.starts_with_ucn_escape()
        {
            return self.lex_identifier(start);
        }

        self.lex_punctuator(start)
    }

    fn second_byte_is_digit(&mut self) -> bool {
        let window = crate::phases::peek_translated(&mut self.stream, self.ctx, 2);
        window.get(1).map(|t| t.byte.is_ascii_digit()).unwrap_or(false)
    }

    /// True if the current position starts a `u8"`/`u"`/`U"`/`L"`/`"` (or
    /// the `'` equivalents) literal prefix.
    fn peek_literal_prefix(&mut self, quote: u8) -> bool {
        let window = crate::phases::peek_translated(&mut self.stream, self.ctx, 3);
        let bytes: Vec<u8> = window.iter().map(|t| t.byte).collect();
        if bytes.first() == Some(&quote) {
            return true;
        }
        if bytes.len() >= 2 && matches!(bytes[0], b'u' | b'U' | b'L') && bytes[1] == quote {
            return true;
        }
        bytes.len() >= 3 && bytes[0] == b'u' && bytes[1] == b'8' && bytes[2] == quote
    }

    /// An identifier may open with a universal character name (the
    /// accumulation loop in `identifier.rs` accepts `\uHHHH`/`\UHHHHHHHH`
    /// at any position, including the first).
    fn starts_with_ucn_escape(&mut self) -> bool {
        let window = crate::phases::peek_translated(&mut self.stream, self.ctx, 2);
        window.first().map(|t| t.byte) == Some(b'\\') && matches!(window.get(1).map(|t| t.byte), Some(b'u') | Some(b'U'))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.is_eof() {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Context, LangStd, WideCharWidth};
    use crate::stream::Stream;
    use crate::token::{Keyword, Punctuator, StringValue, TokenFlags, TokenValue};
    use yecc_util::span::FileId;
    use yecc_util::{Diagnostics, Interner};

    fn lex_all(src: &[u8], ctx: &Context) -> Vec<Token> {
        let stream = Stream::from_bytes(src.to_vec(), FileId(0));
        let mut interner = Interner::new();
        let mut diagnostics = Diagnostics::new(false);
        let mut lexer = Lexer::new(stream, ctx, &mut interner, &mut diagnostics);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token();
            let is_eof = tok.is_eof();
            out.push(tok);
            if is_eof {
                break;
            }
        }
        out
    }

    fn lex_all_with_interner(src: &[u8], ctx: &Context) -> (Vec<Token>, Interner) {
        let stream = Stream::from_bytes(src.to_vec(), FileId(0));
        let mut interner = Interner::new();
        let mut diagnostics = Diagnostics::new(false);
        let mut out = Vec::new();
        {
            let mut lexer = Lexer::new(stream, ctx, &mut interner, &mut diagnostics);
            loop {
                let tok = lexer.next_token();
                let is_eof = tok.is_eof();
                out.push(tok);
                if is_eof {
                    break;
                }
            }
        }
        (out, interner)
    }

    #[test]
    fn bom_plus_keywords() {
        let ctx = Context::new(LangStd::C23);
        let mut src = vec![0xEF, 0xBB, 0xBF];
        src.extend_from_slice(b"int x;\n");
        let toks = lex_all(&src, &ctx);
        let kinds: Vec<&TokenKind> = toks.iter().map(|t| &t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                &TokenKind::Keyword(Keyword::Int),
                &TokenKind::Identifier,
                &TokenKind::Punctuator(Punctuator::Semicolon),
                &TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn directive_and_header_name() {
        let ctx = Context::new(LangStd::C23).gnu(true).trigraphs(true);
        let (toks, interner) = lex_all_with_interner(b"#   include <stdio.h>\n", &ctx);
        assert_eq!(toks.len(), 4);
        assert_eq!(toks[0].kind, TokenKind::PpHash);
        assert!(matches!(toks[1].kind, TokenKind::PpDirective(crate::token::PpDirective::Include)));
        assert_eq!(toks[2].kind, TokenKind::HeaderName);
        if let TokenValue::Symbol(sym) = toks[2].value {
            assert_eq!(interner.resolve(sym), "stdio.h");
        } else {
            panic!("expected symbol value");
        }
        assert!(toks[3].is_eof());
    }

    #[test]
    fn digraph_hash_include() {
        let ctx = Context::new(LangStd::C23).trigraphs(true);
        let (toks, interner) = lex_all_with_interner(b"%:include <x>\n", &ctx);
        assert_eq!(toks[0].kind, TokenKind::PpHash);
        assert!(matches!(toks[1].kind, TokenKind::PpDirective(crate::token::PpDirective::Include)));
        assert_eq!(toks[2].kind, TokenKind::HeaderName);
        if let TokenValue::Symbol(sym) = toks[2].value {
            assert_eq!(interner.resolve(sym), "x");
        } else {
            panic!("expected symbol value");
        }
    }

    #[test]
    fn integer_bases_and_separators() {
        let ctx = Context::new(LangStd::C23).gnu(true);
        let toks = lex_all(b"0 7 0123 0xFF 0b1011 1'234'567 1_2_3", &ctx);
        let expected = [
            (0u64, crate::token::IntegerBase::Decimal),
            (7, crate::token::IntegerBase::Decimal),
            (83, crate::token::IntegerBase::Octal),
            (255, crate::token::IntegerBase::Hex),
            (11, crate::token::IntegerBase::Binary),
            (1234567, crate::token::IntegerBase::Decimal),
            (123, crate::token::IntegerBase::Decimal),
        ];
        for (tok, (value, base)) in toks.iter().zip(expected.iter()) {
            match &tok.value {
                TokenValue::Integer { unsigned, base: b, .. } => {
                    assert_eq!(unsigned, value);
                    assert_eq!(b, base);
                }
                other => panic!("expected integer, got {other:?}"),
            }
        }
        assert!(toks.last().unwrap().is_eof());
    }

    #[test]
    fn string_promotion_to_wide() {
        let ctx = Context::new(LangStd::C23).wchar_bits(WideCharWidth::Bits32);
        let toks = lex_all(br#""A" u8"B" u"C" U"D" L"E""#, &ctx);
        assert_eq!(toks.len(), 2);
        let tok = &toks[0];
        assert_eq!(tok.kind, TokenKind::StringLiteral);
        assert!(tok.flags.contains(TokenFlags::ENC_WIDE));
        match &tok.value {
            TokenValue::String(StringValue::Utf32(units)) => {
                assert_eq!(units, &vec![0x41, 0x42, 0x43, 0x44, 0x45, 0]);
            }
            other => panic!("expected Utf32, got {other:?}"),
        }
    }

    #[test]
    fn multichar_plain_literal_packs_big_endian() {
        let ctx = Context::default();
        let toks = lex_all(b"'ABC'", &ctx);
        match &toks[0].value {
            TokenValue::Character(v) => {
                let expected = (('A' as u32) << 16) | (('B' as u32) << 8) | 'C' as u32;
                assert_eq!(*v, expected);
            }
            other => panic!("expected character, got {other:?}"),
        }
    }

    #[test]
    fn block_comments_do_not_nest() {
        let ctx = Context::default();
        // The inner `/*` is just text; the first `*/` encountered closes
        // the outer comment, swallowing `x = 1; /* ... ` with it.
        let toks = lex_all(b"/* unterminated\nx = 1; /* ... */ y;\n", &ctx);
        let kinds: Vec<&TokenKind> = toks.iter().map(|t| &t.kind).collect();
        assert_eq!(
            kinds,
            vec![&TokenKind::Identifier, &TokenKind::Punctuator(Punctuator::Semicolon), &TokenKind::Eof]
        );
    }

    #[test]
    fn truly_unterminated_comment_recovers() {
        let ctx = Context::default();
        let toks = lex_all(b"/* never closes\nx = 1; y;\n", &ctx);
        let kinds: Vec<&TokenKind> = toks.iter().map(|t| &t.kind).collect();
        assert_eq!(kinds, vec![&TokenKind::Eof]);
        assert!(toks[0].is_eof());
    }

    #[test]
    fn line_splice_fuses_identifier_pieces() {
        let ctx = Context::default();
        let (toks, interner) = lex_all_with_interner(b"foo\\\nbar\\\n_baz", &ctx);
        assert_eq!(toks.len(), 2);
        if let TokenValue::Symbol(sym) = toks[0].value {
            assert_eq!(interner.resolve(sym), "foobar_baz");
        } else {
            panic!("expected symbol value");
        }
    }

    #[test]
    fn forward_progress_bounded() {
        let ctx = Context::default();
        let src = b"@@@ int x = 1;";
        let stream = Stream::from_bytes(src.to_vec(), FileId(0));
        let mut interner = Interner::new();
        let mut diagnostics = Diagnostics::new(false);
        let mut lexer = Lexer::new(stream, &ctx, &mut interner, &mut diagnostics);
        let mut count = 0;
        loop {
            let tok = lexer.next_token();
            count += 1;
            assert!(count <= 2 * src.len() + 1);
            if tok.is_eof() {
                break;
            }
        }
    }

    #[test]
    fn position_monotonicity_holds() {
        let ctx = Context::default();
        let toks = lex_all(b"int x = 1 + 2;\n", &ctx);
        for pair in toks.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.loc.end.offset <= b.loc.start.offset);
            if !a.is_error() {
                assert!(b.is_eof() || b.loc.start.offset > a.loc.start.offset);
            }
        }
    }

    #[test]
    fn span_well_formed_for_every_token() {
        let ctx = Context::default();
        let toks = lex_all(b"\"hi\" 42 x + / * -> <<=", &ctx);
        for tok in &toks {
            assert!(tok.loc.start.offset <= tok.loc.end.offset);
        }
    }

    #[test]
    fn directive_end_resets_state_for_next_line() {
        let ctx = Context::new(LangStd::C23);
        let toks = lex_all(b"#define X 1\nint y;\n", &ctx);
        assert!(matches!(toks[0].kind, TokenKind::PpHash));
        assert!(matches!(toks[1].kind, TokenKind::PpDirective(crate::token::PpDirective::Define)));
        // `X` and `1` lex as ordinary directive-body tokens.
        assert_eq!(toks[2].kind, TokenKind::Identifier);
        assert!(matches!(toks[3].value, TokenValue::Integer { .. }));
        // After the directive's newline, a fresh `#`-at-line-start check
        // applies again and ordinary code resumes.
        assert_eq!(toks[4].kind, TokenKind::Keyword(Keyword::Int));
        assert_eq!(toks[5].kind, TokenKind::Identifier);
        assert_eq!(toks[6].kind, TokenKind::Punctuator(Punctuator::Semicolon));
        assert!(toks[7].is_eof());
    }

    #[test]
    fn quoted_header_name_for_import() {
        let ctx = Context::new(LangStd::C23).gnu(true);
        let (toks, interner) = lex_all_with_interner(b"#import \"foo.h\"\n", &ctx);
        assert_eq!(toks[2].kind, TokenKind::HeaderName);
        if let TokenValue::Symbol(sym) = toks[2].value {
            assert_eq!(interner.resolve(sym), "foo.h");
        } else {
            panic!("expected symbol value");
        }
    }

    #[test]
    fn eof_on_empty_input() {
        let ctx = Context::default();
        let toks = lex_all(b"", &ctx);
        assert_eq!(toks.len(), 1);
        assert!(toks[0].is_eof());
        assert!(toks[0].loc.is_empty());
    }

    #[test]
    fn hex_float_literal() {
        let ctx = Context::default();
        let toks = lex_all(b"0x1.8p3", &ctx);
        match &toks[0].value {
            TokenValue::Float { value, style, .. } => {
                assert_eq!(*style, crate::token::FloatStyle::Hex);
                assert!((*value - 12.0).abs() < 1e-9);
            }
            other => panic!("expected float, got {other:?}"),
        }
    }

    #[test]
    fn gnu_dollar_identifier() {
        let ctx = Context::default().gnu(true);
        let (toks, interner) = lex_all_with_interner(b"$foo", &ctx);
        if let TokenValue::Symbol(sym) = toks[0].value {
            assert_eq!(interner.resolve(sym), "$foo");
        } else {
            panic!("expected symbol value");
        }
    }

    // ------------------------------------------------------------------
    // Property-based tests (§8 testable properties)
    // ------------------------------------------------------------------

    #[test]
    fn property_forward_progress_bounded() {
        use proptest::prelude::*;

        proptest!(|(src in ".{0,200}")| {
            let bytes = src.as_bytes();
            let ctx = Context::default();
            let stream = Stream::from_bytes(bytes.to_vec(), FileId(0));
            let mut interner = Interner::new();
            let mut diagnostics = Diagnostics::new(false);
            let mut lexer = Lexer::new(stream, &ctx, &mut interner, &mut diagnostics);
            let mut count = 0;
            loop {
                let tok = lexer.next_token();
                count += 1;
                prop_assert!(count <= 2 * bytes.len() + 1);
                if tok.is_eof() {
                    break;
                }
            }
        });
    }

    #[test]
    fn property_position_monotonicity_holds() {
        use proptest::prelude::*;

        proptest!(|(src in "[a-zA-Z0-9_ \t+\\-*/;(){}\\n]{0,200}")| {
            let ctx = Context::default();
            let toks = lex_all(src.as_bytes(), &ctx);
            for pair in toks.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(a.loc.end.offset <= b.loc.start.offset);
                if !a.is_error() {
                    prop_assert!(b.is_eof() || b.loc.start.offset > a.loc.start.offset);
                }
            }
        });
    }

    #[test]
    fn property_span_well_formed_for_every_token() {
        use proptest::prelude::*;

        proptest!(|(src in "[a-zA-Z0-9_ \t+\\-*/;(){}\\n\"']{0,200}")| {
            let ctx = Context::default();
            let toks = lex_all(src.as_bytes(), &ctx);
            for tok in &toks {
                prop_assert!(tok.loc.start.offset <= tok.loc.end.offset);
            }
        });
    }
}
