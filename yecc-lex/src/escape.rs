//! Escape-sequence parsing shared by string and character literal
//! decoding. Operates directly on the translated byte stream since
//! escapes (e.g. `\x` with a variable run of hex digits) must consume a
//! variable number of bytes.

use crate::context::Context;
use crate::phases;
use crate::stream::Stream;
use crate::unicode::{hex_digit_value, REPLACEMENT_CHAR};

/// Why an escape sequence's scalar needed a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscapeDiagnostic {
    UnknownEscape(u8),
    HexEscapeNoDigits,
    OctalOutOfRange,
    /// `\e`, a GNU extension for 0x1B.
    GnuEscape,
    SurrogateUcn,
    TruncatedAtEof,
}

pub struct EscapeResult {
    pub scalar: u32,
    pub diagnostic: Option<EscapeDiagnostic>,
    /// Whether this was a `\u`/`\U` universal-character-name escape, as
    /// opposed to any other escape form. String/char literal decoding needs
    /// this to apply the plain-literal masking rule.
    pub is_ucn: bool,
}

fn simple(scalar: u32) -> EscapeResult {
    EscapeResult {
        scalar,
        diagnostic: None,
        is_ucn: false,
    }
}

/// Parses one escape sequence assuming the introducing `\` has already
/// been consumed. Always consumes at least one more byte unless already at
/// EOF, guaranteeing forward progress.
pub fn parse_escape(stream: &mut Stream, ctx: &Context) -> EscapeResult {
    let Some(t) = phases::next_translated(stream, ctx) else {
        return EscapeResult {
            scalar: REPLACEMENT_CHAR,
            diagnostic: Some(EscapeDiagnostic::TruncatedAtEof),
            is_ucn: false,
        };
    };
    match t.byte {
        b'a' => simple(0x07),
        b'b' => simple(0x08),
        b'f' => simple(0x0C),
        b'n' => simple(0x0A),
        b'r' => simple(0x0D),
        b't' => simple(0x09),
        b'v' => simple(0x0B),
        b'\\' => simple(0x5C),
        b'\'' => simple(0x27),
        b'"' => simple(0x22),
        b'?' => simple(0x3F),
        b'e' => EscapeResult {
            scalar: 0x1B,
            diagnostic: Some(EscapeDiagnostic::GnuEscape),
            is_ucn: false,
        },
        b'0'..=b'7' => {
            let mut value = (t.byte - b'0') as u32;
            for _ in 0..2 {
                match phases::peek_one_translated(stream, ctx) {
                    Some(p) if (b'0'..=b'7').contains(&p.byte) => {
                        phases::next_translated(stream, ctx);
                        value = value * 8 + (p.byte - b'0') as u32;
                    }
                    _ => break,
                }
            }
            EscapeResult {
                scalar: value,
                diagnostic: if value > 0xFF {
                    Some(EscapeDiagnostic::OctalOutOfRange)
                } else {
                    None
                },
                is_ucn: false,
            }
        }
        b'x' => {
            let mut value: u32 = 0;
            let mut count = 0u32;
            loop {
                match phases::peek_one_translated(stream, ctx) {
                    Some(p) if hex_digit_value(p.byte).is_some() => {
                        phases::next_translated(stream, ctx);
                        value = value.wrapping_mul(16).wrapping_add(hex_digit_value(p.byte).unwrap());
                        count += 1;
                    }
                    _ => break,
                }
            }
            if count == 0 {
                EscapeResult {
                    scalar: REPLACEMENT_CHAR,
                    diagnostic: Some(EscapeDiagnostic::HexEscapeNoDigits),
                    is_ucn: false,
                }
            } else {
                simple(value)
            }
        }
        b'u' | b'U' => {
            let digits = if t.byte == b'u' { 4 } else { 8 };
            let mut value: u32 = 0;
            let mut count = 0;
            for _ in 0..digits {
                match phases::peek_one_translated(stream, ctx) {
                    Some(p) if hex_digit_value(p.byte).is_some() => {
                        phases::next_translated(stream, ctx);
                        value = value * 16 + hex_digit_value(p.byte).unwrap();
                        count += 1;
                    }
                    _ => break,
                }
            }
            if (0xD800..=0xDFFF).contains(&value) {
                return EscapeResult {
                    scalar: REPLACEMENT_CHAR,
                    diagnostic: Some(EscapeDiagnostic::SurrogateUcn),
                    is_ucn: true,
                };
            }
            if count < digits {
                return EscapeResult {
                    scalar: REPLACEMENT_CHAR,
                    diagnostic: Some(EscapeDiagnostic::TruncatedAtEof),
                    is_ucn: true,
                };
            }
            EscapeResult {
                scalar: value,
                diagnostic: None,
                is_ucn: true,
            }
        }
        other => EscapeResult {
            scalar: REPLACEMENT_CHAR,
            diagnostic: Some(EscapeDiagnostic::UnknownEscape(other)),
            is_ucn: false,
        },
    }
}
