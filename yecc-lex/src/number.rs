//! Numeric literal decoding: digit-separator stripping/validation,
//! integer and floating suffix classification, and locale-neutral
//! integer/float conversion (including hex floats, which `str::parse`
//! does not support).

use crate::context::{Context, LangStd};
use crate::token::{FloatSuffix, TokenFlags};
use crate::unicode::hex_digit_value;

/// True if every digit-separator byte (`'` or `_`) in `text` sits strictly
/// between two digit-class bytes — a separator may appear between two
/// digits only, never leading, trailing, or doubled.
pub fn separators_well_placed(text: &str) -> bool {
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'\'' && b != b'_' {
            continue;
        }
        let prev_ok = i > 0 && hex_digit_value(bytes[i - 1]).is_some();
        let next_ok = i + 1 < bytes.len() && hex_digit_value(bytes[i + 1]).is_some();
        if !prev_ok || !next_ok {
            return false;
        }
    }
    true
}

/// Removes digit-separator bytes, leaving the bare digit text for
/// conversion.
pub fn strip_separators(text: &str) -> String {
    text.chars().filter(|&c| c != '\'' && c != '_').collect()
}

/// Parses an unsigned integer in `base` from separator-free `text`.
/// Returns `None` on overflow or a non-digit byte (callers validate digit
/// well-formedness before calling this).
pub fn parse_unsigned_radix(text: &str, base: u32) -> Option<u64> {
    if text.is_empty() {
        return None;
    }
    u64::from_str_radix(text, base).ok()
}

/// Integer suffix: zero or one `u`/`U`, and zero, one, or two of `l`/`L`
/// (the two, if present, must be the same case).
pub fn parse_integer_suffix(suffix: &str) -> Option<TokenFlags> {
    let mut flags = TokenFlags::empty();
    let mut chars = suffix.chars().peekable();
    let mut seen_u = false;
    let mut long_chars: Vec<char> = Vec::new();

    while let Some(c) = chars.next() {
        match c {
            'u' | 'U' => {
                if seen_u {
                    return None;
                }
                seen_u = true;
                flags = flags.with(TokenFlags::UNSIGNED);
            }
            'l' | 'L' => {
                long_chars.push(c);
                if long_chars.len() > 2 {
                    return None;
                }
            }
            _ => return None,
        }
    }

    match long_chars.as_slice() {
        [] => {}
        [_] => flags = flags.with(TokenFlags::LONG),
        [a, b] if a == b => flags = flags.with(TokenFlags::LONG).with(TokenFlags::LONG_LONG),
        _ => return None, // mixed case "lL"/"Ll"
    }

    Some(flags)
}

/// Floating suffix classification. Returns the suffix tag together with
/// whether it requires GNU extensions or a minimum standard (for the
/// lexer to turn into an extension diagnostic).
pub fn classify_float_suffix(suffix: &str) -> Option<(FloatSuffix, FloatSuffixRequirement)> {
    use FloatSuffixRequirement::*;
    let (tag, req) = match suffix {
        "" => (FloatSuffix::None, None_),
        "f" | "F" => (FloatSuffix::F, None_),
        "l" | "L" => (FloatSuffix::L, None_),
        "f16" | "F16" => (FloatSuffix::F16, Gnu),
        "f32" | "F32" => (FloatSuffix::F32, Gnu),
        "f64" | "F64" => (FloatSuffix::F64, Gnu),
        "f128" | "F128" => (FloatSuffix::F128, Gnu),
        "f32x" | "F32x" | "F32X" => (FloatSuffix::F32x, Gnu),
        "f64x" | "F64x" | "F64X" => (FloatSuffix::F64x, Gnu),
        "f128x" | "F128x" | "F128X" => (FloatSuffix::F128x, Gnu),
        "df" | "DF" => (FloatSuffix::Df, StdOrGnu(LangStd::C23)),
        "dd" | "DD" => (FloatSuffix::Dd, StdOrGnu(LangStd::C23)),
        "dl" | "DL" => (FloatSuffix::Dl, StdOrGnu(LangStd::C23)),
        _ => return None,
    };
    Some((tag, req))
}

/// Whether a float suffix needs GNU extensions, a minimum standard (or
/// GNU), or nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatSuffixRequirement {
    None_,
    Gnu,
    StdOrGnu(LangStd),
}

impl FloatSuffixRequirement {
    /// Whether `ctx` satisfies this requirement without needing a
    /// diagnostic.
    pub fn satisfied(self, ctx: &Context) -> bool {
        match self {
            FloatSuffixRequirement::None_ => true,
            FloatSuffixRequirement::Gnu => ctx.gnu_extensions,
            FloatSuffixRequirement::StdOrGnu(std) => ctx.std_at_least(std) || ctx.gnu_extensions,
        }
    }
}

/// Parses a decimal float (`3.14`, `1e10`, `.5e-3`) from separator-free
/// text. Locale-neutral: Rust's `f64::from_str` always uses `.` as the
/// decimal point regardless of the host locale.
pub fn parse_decimal_float(text: &str) -> Option<f64> {
    text.parse::<f64>().ok()
}

/// Parses a hexadecimal float mantissa (`1A.3F` — no `0x` prefix, no `p`
/// exponent) and a decimal exponent string (digits with optional sign, no
/// `p`). `str::parse` has no hex-float support, so this accumulates the
/// value digit by digit.
pub fn parse_hex_float(mantissa: &str, exponent: &str) -> Option<f64> {
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut value = 0f64;
    for b in int_part.bytes() {
        let d = hex_digit_value(b)?;
        value = value * 16.0 + d as f64;
    }
    let mut scale = 1f64 / 16.0;
    for b in frac_part.bytes() {
        let d = hex_digit_value(b)?;
        value += d as f64 * scale;
        scale /= 16.0;
    }

    let exp: i32 = exponent.parse().ok()?;
    Some(value * 2f64.powi(exp))
}
