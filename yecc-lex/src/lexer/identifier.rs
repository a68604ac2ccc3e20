//! Identifier and keyword-spelling lexing.

use yecc_util::diagnostic::DiagnosticKind;
use yecc_util::{Position, Span};

use crate::escape::EscapeDiagnostic;
use crate::keyword::{self, Kind};
use crate::token::{Token, TokenKind, TokenValue};
use crate::unicode::{decode_utf8, is_ascii_id_continue, is_ascii_id_start};

use super::{Lexer, PpKind};

impl<'a> Lexer<'a> {
    /// Accumulates an identifier spelling starting at the current position,
    /// then classifies it as a keyword, preprocessor directive keyword, or
    /// plain identifier. All three outcomes carry the interned spelling
    /// as their [`TokenValue::Symbol`].
    pub(super) fn lex_identifier(&mut self, start: Position) -> Token {
        let mut spelling = String::new();
        let mut first = true;

        loop {
            let Some(byte) = self.peek_byte() else { break };

            if byte == b'\\' {
                // Only a UCN escape (`\u`/`\U`) continues an identifier;
                // anything else is punctuation the lexer handles next.
                let window = crate::phases::peek_translated(&mut self.stream, self.ctx, 2);
                let second = window.get(1).map(|t| t.byte);
                if second != Some(b'u') && second != Some(b'U') {
                    break;
                }
                self.consume_byte();
                let r = crate::escape::parse_escape(&mut self.stream, self.ctx);
                if let Some(d) = r.diagnostic {
                    self.report_escape_diagnostic(d, Span::new(start, self.stream.position()));
                }
                if !self.ctx.std_at_least(crate::context::LangStd::C99) {
                    self.pedantic_warning(
                        Span::new(start, self.stream.position()),
                        "universal character names in identifiers require C99 or later",
                    );
                }
                match char::from_u32(r.scalar) {
                    Some(c) => spelling.push(c),
                    None => spelling.push('\u{FFFD}'),
                }
                first = false;
                continue;
            }

            if byte == b'$' && self.ctx.gnu_extensions {
                self.consume_byte();
                spelling.push('$');
                first = false;
                continue;
            }

            if byte < 0x80 {
                let continues = if first { is_ascii_id_start(byte) } else { is_ascii_id_continue(byte) };
                if !continues {
                    break;
                }
                self.consume_byte();
                spelling.push(byte as char);
                first = false;
                continue;
            }

            // Non-ASCII byte: decode a UTF-8 scalar and accept it as an
            // identifier-continue character.
            let window = crate::phases::peek_translated(&mut self.stream, self.ctx, 4);
            let raw: Vec<u8> = window.iter().map(|t| t.byte).collect();
            match decode_utf8(&raw) {
                Some((cp, len)) => {
                    let span = Span::new(start, self.stream.position());
                    if !self.ctx.gnu_extensions {
                        self.pedantic_warning(span, "UTF-8 in an identifier is a GNU extension");
                    }
                    for _ in 0..len {
                        self.consume_byte();
                    }
                    match char::from_u32(cp) {
                        Some(c) => spelling.push(c),
                        None => spelling.push('\u{FFFD}'),
                    }
                }
                None => {
                    if first {
                        self.consume_byte();
                        let span = Span::new(start, self.stream.position());
                        self.emit_error(DiagnosticKind::MalformedEncoding, span, "invalid UTF-8 in identifier");
                        return self.error_token(start, "invalid UTF-8 in identifier");
                    }
                    // Stop here; the bad byte is skipped so the next
                    // `next_token` call doesn't loop on it forever.
                    self.consume_byte();
                    let span = Span::new(start, self.stream.position());
                    self.emit_error(DiagnosticKind::MalformedEncoding, span, "invalid UTF-8 after identifier");
                    break;
                }
            }
            first = false;
        }

        let end = self.stream.position();
        let span = Span::new(start, end);
        let sym = self.interner.intern(&spelling);

        let entry = keyword::classify(&spelling, self.in_directive);
        let kind = match entry.map(|e| e.kind) {
            Some(Kind::Keyword(kw)) => TokenKind::Keyword(kw),
            Some(Kind::Directive(d)) => {
                if d.wants_header_name() {
                    self.pp_kind = directive_pp_kind(d);
                    self.expect_header_name = true;
                }
                TokenKind::PpDirective(d)
            }
            None => TokenKind::Identifier,
        };

        if let Some(entry) = entry {
            for diag in keyword::keyword_diagnostics(entry, self.ctx) {
                self.report_keyword_diagnostic(diag, &spelling, span);
            }
        }

        Token::new(kind, span).with_value(TokenValue::Symbol(sym))
    }

    pub(super) fn report_escape_diagnostic(&mut self, diag: EscapeDiagnostic, span: Span) {
        match diag {
            EscapeDiagnostic::UnknownEscape(b) => {
                self.emit_error(DiagnosticKind::MalformedLiteral, span, format!("unknown escape sequence '\\{}'", b as char));
            }
            EscapeDiagnostic::HexEscapeNoDigits => {
                self.emit_error(DiagnosticKind::MalformedLiteral, span, "\\x used with no following hex digits");
            }
            EscapeDiagnostic::OctalOutOfRange => {
                self.emit_masked_warning(
                    crate::context::Warning::IntegerOverflow,
                    DiagnosticKind::MalformedLiteral,
                    span,
                    "octal escape sequence out of range",
                );
            }
            EscapeDiagnostic::GnuEscape => {
                self.pedantic_warning(span, "'\\e' is a GNU extension");
            }
            EscapeDiagnostic::SurrogateUcn => {
                self.emit_error(DiagnosticKind::MalformedLiteral, span, "universal character name refers to a surrogate");
            }
            EscapeDiagnostic::TruncatedAtEof => {
                self.emit_error(DiagnosticKind::MalformedLiteral, span, "universal character name truncated at end of file");
            }
        }
    }
}

fn directive_pp_kind(d: crate::token::PpDirective) -> PpKind {
    use crate::token::PpDirective::*;
    match d {
        Include => PpKind::Include,
        IncludeNext => PpKind::IncludeNext,
        Import => PpKind::Import,
        Embed => PpKind::Embed,
        _ => PpKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::stream::Stream;
    use crate::token::Keyword;
    use yecc_util::span::FileId;
    use yecc_util::{Diagnostics, Interner};

    fn lex_first(src: &[u8], ctx: &Context) -> (Token, Interner, Diagnostics) {
        let stream = Stream::from_bytes(src.to_vec(), FileId(0));
        let mut interner = Interner::new();
        let mut diagnostics = Diagnostics::new(false);
        let tok;
        {
            let mut lexer = Lexer::new(stream, ctx, &mut interner, &mut diagnostics);
            tok = lexer.next_token();
        }
        (tok, interner, diagnostics)
    }

    #[test]
    fn plain_identifier() {
        let ctx = Context::default();
        let (tok, interner, _) = lex_first(b"foo_bar123", &ctx);
        assert_eq!(tok.kind, TokenKind::Identifier);
        if let TokenValue::Symbol(sym) = tok.value {
            assert_eq!(interner.resolve(sym), "foo_bar123");
        } else {
            panic!("expected symbol value");
        }
    }

    #[test]
    fn spelling_classifies_as_keyword() {
        let ctx = Context::default();
        let (tok, _, _) = lex_first(b"return", &ctx);
        assert_eq!(tok.kind, TokenKind::Keyword(Keyword::Return));
    }

    #[test]
    fn dollar_sign_requires_gnu_extensions() {
        let ctx = Context::default().gnu(true);
        let (tok, interner, _) = lex_first(b"$foo", &ctx);
        assert_eq!(tok.kind, TokenKind::Identifier);
        if let TokenValue::Symbol(sym) = tok.value {
            assert_eq!(interner.resolve(sym), "$foo");
        } else {
            panic!("expected symbol value");
        }
    }

    #[test]
    fn dollar_sign_without_gnu_is_not_identifier_continue() {
        let ctx = Context::default();
        let (tok, interner, _) = lex_first(b"foo$bar", &ctx);
        assert_eq!(tok.kind, TokenKind::Identifier);
        if let TokenValue::Symbol(sym) = tok.value {
            assert_eq!(interner.resolve(sym), "foo");
        } else {
            panic!("expected symbol value");
        }
    }

    #[test]
    fn ucn_escape_extends_identifier() {
        let ctx = Context::default();
        let (tok, interner, diagnostics) = lex_first(b"foo\\u00e9", &ctx);
        assert_eq!(tok.kind, TokenKind::Identifier);
        if let TokenValue::Symbol(sym) = tok.value {
            assert_eq!(interner.resolve(sym), "foo\u{e9}");
        } else {
            panic!("expected symbol value");
        }
        assert!(!diagnostics.has_errors());
    }
}
