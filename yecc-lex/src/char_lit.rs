//! Character literal decoding: prefix recognition, body decode shared
//! with string literals, multi-character packing, and range-checked
//! final scalar.

use crate::context::{Context, LangStd, WideCharWidth};
use crate::escape::{parse_escape, EscapeDiagnostic};
use crate::phases;
use crate::stream::Stream;
use crate::token::EncodingKind;
use crate::unicode::{decode_utf8, REPLACEMENT_CHAR};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharDiagnostic {
    UnterminatedLiteral,
    EmptyLiteral,
    MultiCharChar,
    UcnForbiddenInPlain,
    InvalidByteInPlainLiteral,
    InvalidUtf8Sequence,
    Escape(EscapeDiagnostic),
    Utf8PrefixNeedsExtension,
    WideOutOfRange,
}

pub struct CharLiteral {
    pub encoding: EncodingKind,
    /// The packed scalar value stored on the token.
    pub value: u32,
    pub diagnostics: Vec<CharDiagnostic>,
}

/// Recognizes a character-literal prefix (`u8'`, `u'`, `U'`, `L'`, or bare
/// `'`), decodes its body, and packs it to the final scalar. Returns `None`
/// without consuming anything if no character-literal prefix matches.
pub fn try_decode(stream: &mut Stream, ctx: &Context) -> Option<CharLiteral> {
    let window = phases::peek_translated(stream, ctx, 3);
    let bytes: Vec<u8> = window.iter().map(|t| t.byte).collect();

    let (encoding, prefix_len, mut diagnostics) = if bytes.starts_with(b"u8'") {
        let mut diags = Vec::new();
        if !(ctx.std_at_least(LangStd::C23) || ctx.gnu_extensions) {
            diags.push(CharDiagnostic::Utf8PrefixNeedsExtension);
        }
        (EncodingKind::Utf8, 3, diags)
    } else if bytes.starts_with(b"u'") {
        (EncodingKind::Utf16, 2, Vec::new())
    } else if bytes.starts_with(b"U'") {
        (EncodingKind::Utf32, 2, Vec::new())
    } else if bytes.starts_with(b"L'") {
        (EncodingKind::Wide, 2, Vec::new())
    } else if bytes.starts_with(b"'") {
        (EncodingKind::Plain, 1, Vec::new())
    } else {
        return None;
    };

    for _ in 0..prefix_len {
        phases::next_translated(stream, ctx);
    }

    let mut scalars = Vec::new();
    let plain_like = matches!(encoding, EncodingKind::Plain | EncodingKind::Utf8);
    decode_body(stream, ctx, encoding, plain_like, &mut scalars, &mut diagnostics);

    if scalars.is_empty() {
        diagnostics.push(CharDiagnostic::EmptyLiteral);
    } else if scalars.len() > 1 {
        diagnostics.push(CharDiagnostic::MultiCharChar);
    }

    let value = pack(&scalars, encoding, ctx.wchar_bits);

    Some(CharLiteral {
        encoding,
        value,
        diagnostics,
    })
}

/// Decodes bytes up to (and consuming) a closing `'`. A raw newline or EOF
/// first is an unterminated-literal error. `\u`/`\U` escapes are forbidden
/// in plain/`u8` literals but are still consumed for recovery: the escape
/// is parsed either way, only the diagnostic differs.
fn decode_body(
    stream: &mut Stream,
    ctx: &Context,
    encoding: EncodingKind,
    plain_like: bool,
    scalars: &mut Vec<u32>,
    diagnostics: &mut Vec<CharDiagnostic>,
) {
    loop {
        let Some(t) = phases::peek_one_translated(stream, ctx) else {
            diagnostics.push(CharDiagnostic::UnterminatedLiteral);
            return;
        };
        if t.byte == b'\'' {
            phases::next_translated(stream, ctx);
            return;
        }
        if t.byte == b'\n' {
            diagnostics.push(CharDiagnostic::UnterminatedLiteral);
            return;
        }
        if t.byte == b'\\' {
            phases::next_translated(stream, ctx);
            let r = parse_escape(stream, ctx);
            if let Some(d) = r.diagnostic {
                diagnostics.push(CharDiagnostic::Escape(d));
            }
            if plain_like && r.is_ucn {
                diagnostics.push(CharDiagnostic::UcnForbiddenInPlain);
                scalars.push(r.scalar & 0xFF);
            } else {
                scalars.push(r.scalar);
            }
            continue;
        }
        if t.byte >= 0x80 {
            if encoding == EncodingKind::Plain {
                phases::next_translated(stream, ctx);
                diagnostics.push(CharDiagnostic::InvalidByteInPlainLiteral);
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
                        diagnostics.push(CharDiagnostic::InvalidUtf8Sequence);
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

/// Packs one or more decoded scalars into the token's final scalar value:
/// single characters pass through unchanged (after range-checking);
/// multiple characters pack big-endian into the unit width of the
/// literal's encoding.
fn pack(scalars: &[u32], encoding: EncodingKind, wchar_bits: WideCharWidth) -> u32 {
    if scalars.is_empty() {
        return 0;
    }
    if scalars.len() == 1 {
        return range_check(scalars[0], encoding, wchar_bits);
    }
    let unit_bits = match encoding {
        EncodingKind::Plain | EncodingKind::Utf8 => 8,
        EncodingKind::Utf16 => 16,
        EncodingKind::Utf32 => 32,
        EncodingKind::Wide => wchar_bits.bits(),
    };
    if unit_bits >= 32 {
        // A 32-bit unit already fills the scalar; nothing left to pack
        // another character into, so the last one wins.
        return *scalars.last().unwrap();
    }
    let mask = (1u32 << unit_bits) - 1;
    let mut packed: u32 = 0;
    for &cp in scalars {
        packed = packed.wrapping_shl(unit_bits).wrapping_add(cp & mask);
    }
    packed
}

fn range_check(cp: u32, encoding: EncodingKind, wchar_bits: WideCharWidth) -> u32 {
    match encoding {
        EncodingKind::Plain => cp & 0xFF,
        EncodingKind::Utf8 | EncodingKind::Utf16 | EncodingKind::Utf32 => cp,
        EncodingKind::Wide => {
            if cp <= wchar_bits.max_value() {
                cp
            } else {
                REPLACEMENT_CHAR & wchar_bits.max_value()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yecc_util::span::FileId;

    fn decode(src: &[u8], ctx: &Context) -> CharLiteral {
        let mut s = Stream::from_bytes(src.to_vec(), FileId(0));
        try_decode(&mut s, ctx).expect("prefix should match")
    }

    #[test]
    fn plain_single_char() {
        let ctx = Context::default();
        let lit = decode(b"'a'", &ctx);
        assert_eq!(lit.value, b'a' as u32);
        assert!(lit.diagnostics.is_empty());
    }

    #[test]
    fn empty_literal_is_an_error() {
        let ctx = Context::default();
        let lit = decode(b"''", &ctx);
        assert!(lit.diagnostics.contains(&CharDiagnostic::EmptyLiteral));
    }

    #[test]
    fn multichar_literal_packs_big_endian_and_warns() {
        let ctx = Context::default();
        let lit = decode(b"'ab'", &ctx);
        assert_eq!(lit.value, ((b'a' as u32) << 8) | b'b' as u32);
        assert!(lit.diagnostics.contains(&CharDiagnostic::MultiCharChar));
    }

    #[test]
    fn escape_sequence_decodes() {
        let ctx = Context::default();
        let lit = decode(br"'\n'", &ctx);
        assert_eq!(lit.value, 0x0A);
    }

    #[test]
    fn ucn_escape_forbidden_in_plain_but_recovers() {
        let ctx = Context::default();
        let lit = decode(b"'\\u00e9'", &ctx);
        assert!(lit.diagnostics.contains(&CharDiagnostic::UcnForbiddenInPlain));
        assert_eq!(lit.value, 0xE9 & 0xFF);
    }

    #[test]
    fn wide_prefix_accepts_ucn_escape_without_forbidding() {
        let ctx = Context::default();
        let lit = decode(b"U'\\u00e9'", &ctx);
        assert!(!lit.diagnostics.contains(&CharDiagnostic::UcnForbiddenInPlain));
        assert_eq!(lit.value, 0xE9);
    }

    #[test]
    fn plain_high_byte_is_replaced_with_question_mark() {
        let ctx = Context::default();
        let lit = decode(&[b'\'', 0xC3, 0xA9, b'\''], &ctx);
        assert!(lit.diagnostics.contains(&CharDiagnostic::InvalidByteInPlainLiteral));
        assert!(lit.diagnostics.contains(&CharDiagnostic::MultiCharChar));
    }

    #[test]
    fn unterminated_at_newline() {
        let ctx = Context::default();
        let lit = decode(b"'a\n", &ctx);
        assert!(lit.diagnostics.contains(&CharDiagnostic::UnterminatedLiteral));
    }

    #[test]
    fn utf8_prefix_needs_extension_pre_c23() {
        let ctx = Context::new(LangStd::C11);
        let lit = decode(b"u8'x'", &ctx);
        assert!(lit.diagnostics.contains(&CharDiagnostic::Utf8PrefixNeedsExtension));
    }

    #[test]
    fn no_prefix_returns_none() {
        let mut s = Stream::from_bytes(b"abc".to_vec(), FileId(0));
        let ctx = Context::default();
        assert!(try_decode(&mut s, &ctx).is_none());
    }
}
