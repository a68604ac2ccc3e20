//! String literal decoding: prefix recognition, per-encoding body decode,
//! adjacent literal concatenation with cross-prefix width promotion, and
//! final unit encoding.

use crate::context::{Context, LangStd, WideCharWidth};
use crate::escape::{parse_escape, EscapeDiagnostic};
use crate::phases;
use crate::stream::Stream;
use crate::token::{EncodingKind, StringValue};
use crate::unicode::{decode_utf8, encode_utf16, encode_utf8, is_valid_scalar, REPLACEMENT_CHAR};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StringDiagnostic {
    UnterminatedLiteral,
    InvalidByteInPlainLiteral,
    UcnInPlainLiteral,
    Escape(EscapeDiagnostic),
    InvalidUtf8Sequence,
    InvalidScalarReplaced,
    Utf8PrefixNeedsExtension,
    WidthPromotion,
    WideOutOfRange,
}

/// One piece of a (possibly concatenated) string literal: its own prefix
/// encoding and the code points decoded from its body, before any
/// cross-piece promotion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringPiece {
    pub encoding: EncodingKind,
    pub scalars: Vec<u32>,
    pub diagnostics: Vec<StringDiagnostic>,
}

/// Recognizes a string-literal prefix (`u8"`, `u"`, `U"`, `L"`, or bare
/// `"`) at the current translated position and, if one matches, consumes
/// the prefix and opening quote and decodes the body up to the closing
/// quote. Returns `None` (without consuming anything) if no string-literal
/// prefix is present, so callers can use it to test for adjacent-literal
/// concatenation.
pub fn try_decode_piece(stream: &mut Stream, ctx: &Context) -> Option<StringPiece> {
    let window = phases::peek_translated(stream, ctx, 3);
    let bytes: Vec<u8> = window.iter().map(|t| t.byte).collect();

    let (encoding, prefix_len, mut diagnostics) = if bytes.starts_with(b"u8\"") {
        let mut diags = Vec::new();
        if !(ctx.std_at_least(LangStd::C23) || ctx.gnu_extensions) {
            diags.push(StringDiagnostic::Utf8PrefixNeedsExtension);
        }
        (EncodingKind::Utf8, 3, diags)
    } else if bytes.starts_with(b"u\"") {
        (EncodingKind::Utf16, 2, Vec::new())
    } else if bytes.starts_with(b"U\"") {
        (EncodingKind::Utf32, 2, Vec::new())
    } else if bytes.starts_with(b"L\"") {
        (EncodingKind::Wide, 2, Vec::new())
    } else if bytes.starts_with(b"\"") {
        (EncodingKind::Plain, 1, Vec::new())
    } else {
        return None;
    };

    for _ in 0..prefix_len {
        phases::next_translated(stream, ctx);
    }

    let mut scalars = Vec::new();
    decode_body(stream, ctx, encoding, &mut scalars, &mut diagnostics);

    Some(StringPiece {
        encoding,
        scalars,
        diagnostics,
    })
}

/// Decodes bytes up to (and consuming) an unescaped closing `"`, appending
/// decoded code points to `scalars`. A raw newline or EOF before the
/// closing quote is an unterminated-literal error; the partially decoded
/// content is still returned so recovery can proceed.
fn decode_body(
    stream: &mut Stream,
    ctx: &Context,
    encoding: EncodingKind,
    scalars: &mut Vec<u32>,
    diagnostics: &mut Vec<StringDiagnostic>,
) {
    loop {
        let Some(t) = phases::peek_one_translated(stream, ctx) else {
            diagnostics.push(StringDiagnostic::UnterminatedLiteral);
            return;
        };
        if t.byte == b'"' {
            phases::next_translated(stream, ctx);
            return;
        }
        if t.byte == b'\n' {
            diagnostics.push(StringDiagnostic::UnterminatedLiteral);
            return;
        }
        if t.byte == b'\\' {
            phases::next_translated(stream, ctx);
            let r = parse_escape(stream, ctx);
            if let Some(d) = r.diagnostic {
                diagnostics.push(StringDiagnostic::Escape(d));
            }
            if encoding == EncodingKind::Plain {
                if r.is_ucn {
                    diagnostics.push(StringDiagnostic::UcnInPlainLiteral);
                }
                // §4.7.6: escape scalars are masked to a byte only for
                // plain (non-prefixed) literals; wider encodings keep the
                // full scalar for downstream range/surrogate validation.
                scalars.push(r.scalar & 0xFF);
            } else {
                scalars.push(r.scalar);
            }
            continue;
        }
        if t.byte >= 0x80 {
            if encoding == EncodingKind::Plain {
                phases::next_translated(stream, ctx);
                diagnostics.push(StringDiagnostic::InvalidByteInPlainLiteral);
                scalars.push(b'?' as u32);
            } else {
                let window = phases::peek_translated(stream, ctx, 4);
                let raw: Vec<u8> = window.iter().map(|t| t.byte).collect();
                match decode_utf8(&raw) {
                    Some((cp, len)) => {
                        for _ in 0..len {
                            phases::next_translated(stream, ctx);
                        }
                        scalars.push(cp);
                    }
                    None => {
                        phases::next_translated(stream, ctx);
                        diagnostics.push(StringDiagnostic::InvalidUtf8Sequence);
                        scalars.push(REPLACEMENT_CHAR);
                    }
                }
            }
            continue;
        }
        phases::next_translated(stream, ctx);
        scalars.push(t.byte as u32);
    }
}

/// Cross-prefix promotion rule: pick the highest-ranked encoding present.
/// Rank and unit width are both nondecreasing over
/// `Plain < Utf8 < Utf16 < Utf32 < Wide`, so the highest-ranked input also
/// has the widest unit and the "never narrow below the widest input"
/// clause is automatically satisfied.
fn choose_encoding(pieces: &[StringPiece]) -> EncodingKind {
    pieces
        .iter()
        .map(|p| p.encoding)
        .max()
        .unwrap_or(EncodingKind::Plain)
}

/// Concatenates decoded pieces, promotes to their combined encoding, and
/// encodes the result into its final unit buffer with a NUL terminator.
pub fn finish(pieces: Vec<StringPiece>, ctx: &Context) -> (StringValue, EncodingKind, Vec<StringDiagnostic>) {
    let chosen = choose_encoding(&pieces);
    let mut diagnostics = Vec::new();
    let mut scalars = Vec::new();
    for p in pieces {
        if p.encoding != chosen && p.encoding.unit_width() < chosen.unit_width() {
            diagnostics.push(StringDiagnostic::WidthPromotion);
        }
        diagnostics.extend(p.diagnostics);
        scalars.extend(p.scalars);
    }
    let value = encode_final(chosen, &scalars, ctx, &mut diagnostics);
    (value, chosen, diagnostics)
}

fn encode_final(
    encoding: EncodingKind,
    scalars: &[u32],
    ctx: &Context,
    diagnostics: &mut Vec<StringDiagnostic>,
) -> StringValue {
    match encoding {
        EncodingKind::Plain => {
            let mut bytes: Vec<u8> = scalars.iter().map(|&cp| (cp & 0xFF) as u8).collect();
            bytes.push(0);
            StringValue::Bytes(bytes)
        }
        EncodingKind::Utf8 => {
            let mut bytes = Vec::new();
            for &cp in scalars {
                let safe = if cp > 0x10FFFF || !is_valid_scalar(cp) {
                    diagnostics.push(StringDiagnostic::InvalidScalarReplaced);
                    REPLACEMENT_CHAR
                } else {
                    cp
                };
                encode_utf8(safe, &mut bytes);
            }
            bytes.push(0);
            StringValue::Bytes(bytes)
        }
        EncodingKind::Utf16 => {
            let mut units = Vec::new();
            for &cp in scalars {
                encode_utf16(cp, &mut units);
            }
            units.push(0);
            StringValue::Utf16(units)
        }
        EncodingKind::Utf32 => {
            let units: Vec<u32> = scalars
                .iter()
                .map(|&cp| {
                    if is_valid_scalar(cp) {
                        cp
                    } else {
                        diagnostics.push(StringDiagnostic::InvalidScalarReplaced);
                        REPLACEMENT_CHAR
                    }
                })
                .chain(std::iter::once(0))
                .collect();
            StringValue::Utf32(units)
        }
        EncodingKind::Wide => encode_wide(scalars, ctx.wchar_bits, diagnostics),
    }
}

fn encode_wide(scalars: &[u32], width: WideCharWidth, diagnostics: &mut Vec<StringDiagnostic>) -> StringValue {
    let max = width.max_value();
    match width {
        WideCharWidth::Bits8 => {
            let mut bytes = Vec::with_capacity(scalars.len() + 1);
            for &cp in scalars {
                if cp <= max {
                    bytes.push(cp as u8);
                } else {
                    diagnostics.push(StringDiagnostic::WideOutOfRange);
                    bytes.push((REPLACEMENT_CHAR & 0xFF) as u8);
                }
            }
            bytes.push(0);
            StringValue::Bytes(bytes)
        }
        WideCharWidth::Bits16 => {
            let mut units = Vec::new();
            for &cp in scalars {
                if cp <= max {
                    encode_utf16(cp, &mut units);
                } else {
                    diagnostics.push(StringDiagnostic::WideOutOfRange);
                    units.push(REPLACEMENT_CHAR as u16);
                }
            }
            units.push(0);
            StringValue::Utf16(units)
        }
        WideCharWidth::Bits32 => {
            let mut units = Vec::with_capacity(scalars.len() + 1);
            for &cp in scalars {
                if cp <= max && is_valid_scalar(cp) {
                    units.push(cp);
                } else {
                    diagnostics.push(StringDiagnostic::WideOutOfRange);
                    units.push(REPLACEMENT_CHAR);
                }
            }
            units.push(0);
            StringValue::Utf32(units)
        }
    }
}
