//! The core lexer: the byte stream, translation phases, keyword table,
//! and literal decoders composed into `next_token`. This module only
//! orchestrates; the actual decode work lives in the sibling modules it
//! calls into.

mod comment;
mod core;
mod diagnostics;
mod identifier;
mod number;
mod operator;
mod string;

use yecc_util::{Diagnostics, Interner, Position, Span};

use crate::context::Context;
use crate::stream::Stream;
use crate::token::{Token, TokenKind, TokenValue};

/// Which header-name form (if any) the directive currently being lexed
/// expects next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PpKind {
    None,
    Include,
    IncludeNext,
    Import,
    Embed,
    Other,
}

/// Lexer state: the translated byte stream, a reference to the compiler
/// context, the string interner and diagnostics sink it feeds, and the
/// small amount of directive-tracking state that carries across
/// `next_token` calls.
pub struct Lexer<'a> {
    stream: Stream,
    ctx: &'a Context,
    interner: &'a mut Interner,
    diagnostics: &'a mut Diagnostics,
    at_line_start: bool,
    in_directive: bool,
    pp_kind: PpKind,
    expect_header_name: bool,
}

impl<'a> Lexer<'a> {
    /// Builds a lexer over `stream`, starting in the initial state: at the
    /// start of a line, outside any directive, with no pending
    /// header-name expectation.
    pub fn new(stream: Stream, ctx: &'a Context, interner: &'a mut Interner, diagnostics: &'a mut Diagnostics) -> Self {
        Self {
            stream,
            ctx,
            interner,
            diagnostics,
            at_line_start: true,
            in_directive: false,
            pp_kind: PpKind::None,
            expect_header_name: false,
        }
    }

    /// Releases the underlying stream's buffer. Idempotent, mirroring
    /// `Stream::close`.
    pub fn destroy(&mut self) {
        self.stream.close();
    }

    fn peek_byte(&mut self) -> Option<u8> {
        crate::phases::peek_one_translated(&mut self.stream, self.ctx).map(|t| t.byte)
    }

    fn consume_byte(&mut self) -> Option<u8> {
        crate::phases::next_translated(&mut self.stream, self.ctx).map(|t| t.byte)
    }

    /// Skips forward to the next newline or `;` and resets directive
    /// state. Called after any unrecoverable literal/comment/header-name
    /// error to bound the size of the resulting error token and
    /// guarantee forward progress.
    fn recover(&mut self) {
        loop {
            match self.peek_byte() {
                Some(b'\n') | Some(b';') | None => break,
                Some(_) => {
                    self.consume_byte();
                }
            }
        }
        self.at_line_start = true;
        self.in_directive = false;
    }

    fn error_token(&mut self, start: Position, message: &str) -> Token {
        let end = self.stream.position();
        let span = Span::new(start, end);
        let sym = self.interner.intern(message);
        Token::new(TokenKind::Error, span).with_value(TokenValue::Error(sym))
    }
}
