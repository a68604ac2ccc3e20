//! Punctuator and digraph lexing.

use yecc_util::diagnostic::DiagnosticKind;
use yecc_util::{Position, Span};

use crate::context::Warning;
use crate::punctuator::{match_punctuator, PunctMatch};
use crate::token::{Token, TokenKind};

use super::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes one punctuator, `#`, or `##` at the current position, handling
    /// digraph translation and the "digraphs disabled" fallback. Every
    /// non-identifier, non-literal byte eventually reaches this as the
    /// final step of `dispatch`.
    pub(super) fn lex_punctuator(&mut self, start: Position) -> Token {
        let window = crate::phases::peek_translated(&mut self.stream, self.ctx, 4);
        let bytes: Vec<u8> = window.iter().map(|t| t.byte).collect();

        match match_punctuator(&bytes, self.ctx.enable_trigraphs) {
            PunctMatch::Punctuator(p, len) => {
                if self.ctx.enable_trigraphs && crate::punctuator::is_digraph_spelling(&bytes[..len]) {
                    self.emit_masked_warning(
                        Warning::Trigraphs,
                        DiagnosticKind::ExtensionUsage,
                        Span::new(start, start),
                        "digraph used",
                    );
                }
                for _ in 0..len {
                    self.consume_byte();
                }
                let span = Span::new(start, self.stream.position());
                Token::new(TokenKind::Punctuator(p), span)
            }
            PunctMatch::Hash(len) => {
                for _ in 0..len {
                    self.consume_byte();
                }
                let span = Span::new(start, self.stream.position());
                Token::new(TokenKind::PpHash, span)
            }
            PunctMatch::HashHash(len) => {
                for _ in 0..len {
                    self.consume_byte();
                }
                let span = Span::new(start, self.stream.position());
                Token::new(TokenKind::PpHashHash, span)
            }
            PunctMatch::DigraphIgnored(len) => {
                self.emit_masked_warning(
                    Warning::Trigraphs,
                    DiagnosticKind::ExtensionUsage,
                    Span::new(start, start),
                    "digraph spelling seen but trigraphs/digraphs are disabled",
                );
                // Every digraph spelling's first byte is itself a valid
                // single-byte punctuator, so retrying just that byte is safe.
                let _ = len;
                match match_punctuator(&bytes[..1], false) {
                    PunctMatch::Punctuator(p, _) => {
                        self.consume_byte();
                        let span = Span::new(start, self.stream.position());
                        Token::new(TokenKind::Punctuator(p), span)
                    }
                    PunctMatch::Hash(_) => {
                        self.consume_byte();
                        let span = Span::new(start, self.stream.position());
                        Token::new(TokenKind::PpHash, span)
                    }
                    _ => unreachable!("every digraph spelling starts with a valid single-byte punctuator"),
                }
            }
            PunctMatch::None => {
                self.consume_byte();
                let span = Span::new(start, self.stream.position());
                self.emit_error(
                    DiagnosticKind::MalformedLiteral,
                    span,
                    format!("unexpected character '{}'", bytes.first().copied().unwrap_or(b'?') as char),
                );
                self.error_token(start, "unexpected character")
            }
        }
    }
}
