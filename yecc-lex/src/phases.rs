//! Translation phases: line splicing and trigraph translation, overlaid
//! transparently on the byte stream and applied on every consuming read
//! the lexer performs.
//!
//! Rather than sprinkling splice/trigraph handling into every call site in
//! the core lexer, every read goes through [`next_translated`], which
//! applies both transformations and hands back a single logical byte (or
//! `None` at EOF). [`peek_translated`] materializes a fixed-length
//! translated lookahead without changing the stream's position, by saving
//! the offset and seeking back.

use crate::context::Context;
use crate::stream::Stream;

/// `??x` -> single-byte replacement table.
const TRIGRAPHS: &[(u8, u8)] = &[
    (b'=', b'#'),
    (b'/', b'\\'),
    (b'\'', b'^'),
    (b'(', b'['),
    (b')', b']'),
    (b'!', b'|'),
    (b'<', b'{'),
    (b'>', b'}'),
    (b'-', b'~'),
];

/// Records that a trigraph pattern was observed at the position a
/// [`Translated`] byte came from, so the lexer can emit the `trigraphs`
/// diagnostic without the phases layer owning a diagnostics sink itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrigraphNote {
    /// The third byte of the `??x` pattern.
    pub pattern: u8,
    /// Whether the trigraph was translated (`enable_trigraphs` was set) or
    /// merely observed and left untranslated.
    pub applied: bool,
}

/// One logical byte after translation, plus an optional note when it came
/// from (or was blocked from coming from) trigraph translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Translated {
    pub byte: u8,
    pub trigraph: Option<TrigraphNote>,
}

/// Elides a `\` immediately followed by `\n` or `\r\n` at the stream's
/// current position. Returns `true` if a splice was consumed.
fn try_splice(stream: &mut Stream) -> bool {
    if stream.peek() != b'\\' as i32 {
        return false;
    }
    let save = stream.position().offset;
    stream.next();
    if try_splice_newline(stream) {
        true
    } else {
        stream.seek(save);
        false
    }
}

/// Consumes a bare `\n` or `\r\n` at the current position, with no leading
/// backslash required. Used both by [`try_splice`] and by the backslash a
/// translated `??/` produces, which re-enters this same splice logic.
fn try_splice_newline(stream: &mut Stream) -> bool {
    if stream.peek() == b'\n' as i32 {
        stream.next();
        return true;
    }
    if stream.peek() == b'\r' as i32 {
        let save = stream.position().offset;
        stream.next();
        if stream.peek() == b'\n' as i32 {
            stream.next();
            return true;
        }
        stream.seek(save);
    }
    false
}

fn collapse_splices(stream: &mut Stream) {
    while try_splice(stream) {}
}

/// Reads the next translated byte, applying line splicing (collapsed
/// greedily, including splices exposed by a just-produced trigraph
/// backslash) and trigraph translation. Returns `None` at EOF.
pub fn next_translated(stream: &mut Stream, ctx: &Context) -> Option<Translated> {
    loop {
        collapse_splices(stream);
        if stream.eof() {
            return None;
        }
        if stream.peek() == b'?' as i32 && stream.peek_at(1) == b'?' as i32 {
            let third = stream.peek_at(2);
            if let Some(&(_, repl)) = TRIGRAPHS.iter().find(|&&(pat, _)| pat as i32 == third) {
                if ctx.enable_trigraphs {
                    stream.next();
                    stream.next();
                    stream.next();
                    let note = TrigraphNote {
                        pattern: third as u8,
                        applied: true,
                    };
                    if repl == b'\\' && try_splice_newline(stream) {
                        continue;
                    }
                    return Some(Translated {
                        byte: repl,
                        trigraph: Some(note),
                    });
                } else {
                    let note = TrigraphNote {
                        pattern: third as u8,
                        applied: false,
                    };
                    let byte = stream.next() as u8;
                    return Some(Translated {
                        byte,
                        trigraph: Some(note),
                    });
                }
            }
        }
        let byte = stream.next() as u8;
        return Some(Translated {
            byte,
            trigraph: None,
        });
    }
}

/// Peeks up to `n` translated bytes without advancing the stream's logical
/// position.
pub fn peek_translated(stream: &mut Stream, ctx: &Context, n: usize) -> Vec<Translated> {
    let save = stream.position().offset;
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        match next_translated(stream, ctx) {
            Some(t) => out.push(t),
            None => break,
        }
    }
    stream.seek(save);
    out
}

/// Peeks a single translated byte without advancing.
pub fn peek_one_translated(stream: &mut Stream, ctx: &Context) -> Option<Translated> {
    peek_translated(stream, ctx, 1).into_iter().next()
}
