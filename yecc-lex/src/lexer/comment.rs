//! Whitespace and comment skipping. Runs ahead of every token, including
//! inside directives (where only the newline that ends the directive is
//! treated specially, by [`super::core`]).

use yecc_util::diagnostic::DiagnosticKind;
use yecc_util::Span;

use crate::context::LangStd;

use super::Lexer;

fn is_horizontal_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | 0x0B | 0x0C)
}

impl<'a> Lexer<'a> {
    /// Skips horizontal whitespace, newlines (outside a directive), and
    /// `//`/`/* */` comments.
    pub(super) fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek_byte() {
                Some(b) if is_horizontal_ws(b) => {
                    self.consume_byte();
                }
                Some(b'\n') if !self.in_directive => {
                    self.consume_byte();
                    self.at_line_start = true;
                }
                Some(b'/') => {
                    let window = crate::phases::peek_translated(&mut self.stream, self.ctx, 2);
                    match window.get(1).map(|t| t.byte) {
                        Some(b'/') => self.skip_line_comment(),
                        Some(b'*') => self.skip_block_comment(),
                        _ => break,
                    }
                }
                _ => break,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        let start = self.stream.position();
        self.consume_byte();
        self.consume_byte();
        if !(self.ctx.std_at_least(LangStd::C99) || self.ctx.gnu_extensions) {
            self.pedantic_warning(Span::new(start, start), "// comments are a C99 / GNU extension");
        }
        loop {
            match self.peek_byte() {
                Some(b'\n') | None => break,
                Some(_) => {
                    self.consume_byte();
                }
            }
        }
    }

    /// Skips a `/* ... */` comment. An unterminated comment emits an error
    /// and hands off to `recover()`; it produces no token of its own, so
    /// the caller's surrounding skip loop simply has nothing left to skip.
    fn skip_block_comment(&mut self) {
        let start = self.stream.position();
        self.consume_byte();
        self.consume_byte();
        loop {
            match self.peek_byte() {
                None => {
                    let span = Span::new(start, self.stream.position());
                    self.emit_error(DiagnosticKind::MalformedLiteral, span, "unterminated comment");
                    self.recover();
                    return;
                }
                Some(b'*') => {
                    let window = crate::phases::peek_translated(&mut self.stream, self.ctx, 2);
                    if window.get(1).map(|t| t.byte) == Some(b'/') {
                        self.consume_byte();
                        self.consume_byte();
                        return;
                    }
                    self.consume_byte();
                }
                Some(_) => {
                    self.consume_byte();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::stream::Stream;
    use crate::token::{Token, TokenKind};
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

    #[test]
    fn line_comment_stops_at_newline() {
        let ctx = Context::new(LangStd::C99);
        let toks = lex_all(b"// comment here\nx;\n", &ctx);
        let kinds: Vec<&TokenKind> = toks.iter().map(|t| &t.kind).collect();
        assert_eq!(kinds[0], &TokenKind::Identifier);
    }

    #[test]
    fn line_comment_requires_c99_or_gnu() {
        let ctx = Context::new(LangStd::C89).pedantic(true);
        let stream = Stream::from_bytes(b"// comment\nx;\n".to_vec(), FileId(0));
        let mut interner = Interner::new();
        let mut diagnostics = Diagnostics::new(false);
        let mut lexer = Lexer::new(stream, &ctx, &mut interner, &mut diagnostics);
        let _ = lexer.next_token();
        assert_eq!(diagnostics.warning_count(), 1);
    }

    #[test]
    fn block_comment_consumes_to_closing_marker() {
        let ctx = Context::default();
        let toks = lex_all(b"/* a /* looking nested */ x;\n", &ctx);
        let kinds: Vec<&TokenKind> = toks.iter().map(|t| &t.kind).collect();
        assert_eq!(kinds[0], &TokenKind::Identifier);
    }

    #[test]
    fn horizontal_whitespace_is_skipped() {
        let ctx = Context::default();
        let toks = lex_all(b"   \t\t x;\n", &ctx);
        assert_eq!(toks[0].kind, TokenKind::Identifier);
    }
}
