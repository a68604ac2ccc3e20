//! String, character, and header-name literal lexing.

use yecc_util::diagnostic::{DiagnosticBuilder, DiagnosticKind};
use yecc_util::{Position, Span};

use crate::char_lit::{self, CharDiagnostic};
use crate::context::Warning;
use crate::string_lit::{self, StringDiagnostic};
use crate::token::{Token, TokenKind, TokenValue};

use super::{Lexer, PpKind};

impl<'a> Lexer<'a> {
    /// Lexes a (possibly concatenated) string literal. Adjacent literals
    /// are joined by optional whitespace/comments only;
    /// the lookahead past the first piece is speculative, so position is
    /// saved and restored if concatenation doesn't continue.
    pub(super) fn lex_string_literal(&mut self, start: Position) -> Token {
        let mut pieces = Vec::new();
        let first = string_lit::try_decode_piece(&mut self.stream, self.ctx).expect("caller verified a string prefix");
        pieces.push(first);

        loop {
            let save = self.stream.position().offset;
            self.skip_whitespace_and_comments();
            match string_lit::try_decode_piece(&mut self.stream, self.ctx) {
                Some(piece) => pieces.push(piece),
                None => {
                    self.stream.seek(save);
                    break;
                }
            }
        }

        let (value, encoding, diagnostics) = string_lit::finish(pieces, self.ctx);
        let span = Span::new(start, self.stream.position());
        for d in diagnostics {
            self.report_string_diagnostic(d, span);
        }

        Token::new(TokenKind::StringLiteral, span)
            .with_flags(encoding.flag())
            .with_value(TokenValue::String(value))
    }

    /// Lexes a single character literal.
    pub(super) fn lex_char_literal(&mut self, start: Position) -> Token {
        let lit = char_lit::try_decode(&mut self.stream, self.ctx).expect("caller verified a char prefix");
        let span = Span::new(start, self.stream.position());
        for d in lit.diagnostics {
            self.report_char_diagnostic(d, span);
        }
        Token::new(TokenKind::CharacterConstant, span)
            .with_flags(lit.encoding.flag())
            .with_value(TokenValue::Character(lit.value))
    }

    /// Attempts to lex a header-name token, only valid right after a
    /// directive keyword that wants one (`expect_header_name`). Returns
    /// `None` without consuming if the
    /// next byte doesn't open a header-name form for the current
    /// directive.
    pub(super) fn try_lex_header_name(&mut self, start: Position) -> Option<Token> {
        if !self.expect_header_name {
            return None;
        }
        self.expect_header_name = false;

        match self.peek_byte() {
            Some(b'<') if matches!(self.pp_kind, PpKind::Include | PpKind::IncludeNext | PpKind::Embed) => {
                Some(self.lex_header_name(start, b'>'))
            }
            Some(b'"')
                if matches!(
                    self.pp_kind,
                    PpKind::Include | PpKind::IncludeNext | PpKind::Import | PpKind::Embed
                ) =>
            {
                Some(self.lex_header_name(start, b'"'))
            }
            _ => None,
        }
    }

    fn lex_header_name(&mut self, start: Position, terminator: u8) -> Token {
        self.consume_byte();
        let mut name = String::new();
        loop {
            match self.peek_byte() {
                Some(b) if b == terminator => {
                    self.consume_byte();
                    break;
                }
                Some(b'\n') | None => {
                    let span = Span::new(start, self.stream.position());
                    self.emit_error(DiagnosticKind::MalformedLiteral, span, "unterminated header name");
                    self.recover();
                    return self.error_token(start, "unterminated header name");
                }
                Some(b) => {
                    self.consume_byte();
                    name.push(b as char);
                }
            }
        }
        let span = Span::new(start, self.stream.position());
        let sym = self.interner.intern(&name);
        Token::new(TokenKind::HeaderName, span).with_value(TokenValue::Symbol(sym))
    }

    pub(super) fn report_string_diagnostic(&mut self, diag: StringDiagnostic, span: Span) {
        match diag {
            StringDiagnostic::UnterminatedLiteral => {
                self.emit_error(DiagnosticKind::MalformedLiteral, span, "missing terminating \" character");
            }
            StringDiagnostic::InvalidByteInPlainLiteral => {
                self.emit_error(DiagnosticKind::MalformedEncoding, span, "invalid byte in plain string literal");
            }
            StringDiagnostic::UcnInPlainLiteral => {
                self.emit_error(DiagnosticKind::MalformedEncoding, span, "universal character name in an 8-bit string literal");
            }
            StringDiagnostic::Escape(e) => self.report_escape_diagnostic(e, span),
            StringDiagnostic::InvalidUtf8Sequence => {
                self.emit_error(DiagnosticKind::MalformedEncoding, span, "invalid UTF-8 sequence in string literal");
            }
            StringDiagnostic::InvalidScalarReplaced => {
                self.emit_masked_warning(
                    Warning::StringWidthPromotion,
                    DiagnosticKind::MalformedEncoding,
                    span,
                    "invalid code point replaced with U+FFFD",
                );
            }
            StringDiagnostic::Utf8PrefixNeedsExtension => {
                self.pedantic_warning(span, "'u8' string literals require C23 or a GNU extension");
            }
            StringDiagnostic::WidthPromotion => {
                if self.ctx.warning_enabled(Warning::StringWidthPromotion) {
                    self.emit_masked_warning(
                        Warning::StringWidthPromotion,
                        DiagnosticKind::ExtensionUsage,
                        span,
                        "concatenated string literal widened to its widest constituent encoding",
                    );
                    // Attaches to the warning just reported; rendered
                    // without repeating its header (see `diag_context`).
                    DiagnosticBuilder::note("a narrower-encoded literal in this concatenation was widened")
                        .span(span)
                        .emit(self.diagnostics);
                }
            }
            StringDiagnostic::WideOutOfRange => {
                self.emit_masked_warning(Warning::IntegerOverflow, DiagnosticKind::MalformedLiteral, span, "wide character out of range");
            }
        }
    }

    pub(super) fn report_char_diagnostic(&mut self, diag: CharDiagnostic, span: Span) {
        match diag {
            CharDiagnostic::UnterminatedLiteral => {
                self.emit_error(DiagnosticKind::MalformedLiteral, span, "missing terminating ' character");
            }
            CharDiagnostic::EmptyLiteral => {
                self.emit_error(DiagnosticKind::MalformedLiteral, span, "empty character constant");
            }
            CharDiagnostic::MultiCharChar => {
                self.emit_masked_warning(Warning::MultiCharChar, DiagnosticKind::MalformedLiteral, span, "multi-character character constant");
            }
            CharDiagnostic::UcnForbiddenInPlain => {
                self.emit_error(DiagnosticKind::MalformedEncoding, span, "universal character name in an 8-bit character constant");
            }
            CharDiagnostic::InvalidByteInPlainLiteral => {
                self.emit_error(DiagnosticKind::MalformedEncoding, span, "invalid byte in plain character constant");
            }
            CharDiagnostic::InvalidUtf8Sequence => {
                self.emit_error(DiagnosticKind::MalformedEncoding, span, "invalid UTF-8 sequence in character constant");
            }
            CharDiagnostic::Escape(e) => self.report_escape_diagnostic(e, span),
            CharDiagnostic::Utf8PrefixNeedsExtension => {
                self.pedantic_warning(span, "'u8' character literals require C23 or a GNU extension");
            }
            CharDiagnostic::WideOutOfRange => {
                self.emit_masked_warning(Warning::IntegerOverflow, DiagnosticKind::MalformedLiteral, span, "wide character out of range");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Context, LangStd};
    use crate::stream::Stream;
    use yecc_util::span::FileId;
    use yecc_util::{Diagnostics, Interner};

    fn lex_first(src: &[u8], ctx: &Context) -> (Token, Diagnostics) {
        let stream = Stream::from_bytes(src.to_vec(), FileId(0));
        let mut interner = Interner::new();
        let mut diagnostics = Diagnostics::new(false);
        let tok;
        {
            let mut lexer = Lexer::new(stream, ctx, &mut interner, &mut diagnostics);
            tok = lexer.next_token();
        }
        (tok, diagnostics)
    }

    #[test]
    fn plain_string_literal() {
        let ctx = Context::default();
        let (tok, diagnostics) = lex_first(br#""hello""#, &ctx);
        assert_eq!(tok.kind, TokenKind::StringLiteral);
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn unterminated_string_reports_error() {
        let ctx = Context::default();
        let (_, diagnostics) = lex_first(b"\"hello\n", &ctx);
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn unterminated_char_reports_error() {
        let ctx = Context::default();
        let (_, diagnostics) = lex_first(b"'a\n", &ctx);
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn header_name_only_recognized_when_expected() {
        let ctx = Context::new(LangStd::C23);
        let stream = Stream::from_bytes(b"<stdio.h>".to_vec(), FileId(0));
        let mut interner = Interner::new();
        let mut diagnostics = Diagnostics::new(false);
        let mut lexer = Lexer::new(stream, &ctx, &mut interner, &mut diagnostics);
        lexer.expect_header_name = true;
        lexer.pp_kind = PpKind::Include;
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::HeaderName);
    }
}
