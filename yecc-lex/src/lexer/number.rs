//! Numeric literal lexing: base/float detection, digit-run scanning, and
//! dispatch into [`crate::number`]'s conversion helpers.

use yecc_util::diagnostic::DiagnosticKind;
use yecc_util::{Position, Span};

use crate::context::{LangStd, Warning};
use crate::number::{
    classify_float_suffix, parse_decimal_float, parse_hex_float, parse_integer_suffix, parse_unsigned_radix,
    separators_well_placed, strip_separators, FloatSuffixRequirement,
};
use crate::token::{FloatStyle, FloatSuffix, IntegerBase, Token, TokenFlags, TokenKind, TokenValue};
use crate::unicode::hex_digit_value;

use super::Lexer;

fn is_dec_digit_or_sep(b: u8) -> bool {
    b.is_ascii_digit() || b == b'\'' || b == b'_'
}

fn is_hex_digit_or_sep(b: u8) -> bool {
    hex_digit_value(b).is_some() || b == b'\'' || b == b'_'
}

fn is_suffix_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

impl<'a> Lexer<'a> {
    /// `'` digit separators are C23; `_` digit separators are a GNU
    /// extension. Neither dialect accepts the other's separator, unlike
    /// the well-placedness check above which applies regardless of dialect.
    fn check_separator_dialect(&mut self, int_text: &str, frac_text: Option<&str>, start: Position) {
        let has_tick = int_text.contains('\'') || frac_text.is_some_and(|f| f.contains('\''));
        let has_underscore = int_text.contains('_') || frac_text.is_some_and(|f| f.contains('_'));
        if has_tick && !self.ctx.std_at_least(LangStd::C23) {
            let span = Span::new(start, self.stream.position());
            self.pedantic_warning(span, "digit separator ''' requires C23");
        }
        if has_underscore && !self.ctx.gnu_extensions {
            let span = Span::new(start, self.stream.position());
            self.pedantic_warning(span, "digit separator '_' is a GNU extension");
        }
    }

    fn scan_run(&mut self, pred: impl Fn(u8) -> bool) -> String {
        let mut out = String::new();
        while let Some(b) = self.peek_byte() {
            if !pred(b) {
                break;
            }
            self.consume_byte();
            out.push(b as char);
        }
        out
    }

    fn starts_with_translated(&mut self, spelling: &[u8]) -> bool {
        let window = crate::phases::peek_translated(&mut self.stream, self.ctx, spelling.len());
        window.len() == spelling.len() && window.iter().zip(spelling).all(|(t, &b)| t.byte.eq_ignore_ascii_case(&b))
    }

    /// Lexes an integer or floating constant.
    pub(super) fn lex_number(&mut self, start: Position) -> Token {
        if self.starts_with_translated(b"0x") {
            return self.lex_hex_number(start);
        }
        if (self.ctx.std_at_least(LangStd::C23) || self.ctx.gnu_extensions) && self.starts_with_translated(b"0b") {
            return self.lex_binary_number(start);
        }
        self.lex_decimal_or_octal_number(start)
    }

    fn lex_hex_number(&mut self, start: Position) -> Token {
        self.consume_byte();
        self.consume_byte();

        let int_text = self.scan_run(is_hex_digit_or_sep);
        let mut frac_text = None;
        if self.peek_byte() == Some(b'.') {
            self.consume_byte();
            frac_text = Some(self.scan_run(is_hex_digit_or_sep));
        }

        let mut is_float = false;
        let mut exp_text = String::new();
        if matches!(self.peek_byte(), Some(b'p') | Some(b'P')) {
            is_float = true;
            self.consume_byte();
            if matches!(self.peek_byte(), Some(b'+') | Some(b'-')) {
                exp_text.push(self.consume_byte().unwrap() as char);
            }
            let digits = self.scan_run(|b| b.is_ascii_digit());
            if digits.is_empty() {
                let span = Span::new(start, self.stream.position());
                self.emit_error(DiagnosticKind::MalformedLiteral, span, "hexadecimal floating constant missing exponent digits");
            }
            exp_text.push_str(&digits);
        } else if frac_text.is_some() {
            is_float = true;
            let span = Span::new(start, self.stream.position());
            self.emit_error(
                DiagnosticKind::MalformedLiteral,
                span,
                "hexadecimal floating constant requires a 'p' exponent",
            );
        }

        if !separators_well_placed(&int_text) || frac_text.as_deref().is_some_and(|f| !separators_well_placed(f)) {
            let span = Span::new(start, self.stream.position());
            self.emit_error(DiagnosticKind::MalformedLiteral, span, "misplaced digit separator");
        }
        self.check_separator_dialect(&int_text, frac_text.as_deref(), start);

        let suffix_text = self.scan_run(is_suffix_byte);
        let end = self.stream.position();
        let span = Span::new(start, end);

        if is_float {
            let mantissa = format!("{}.{}", strip_separators(&int_text), strip_separators(frac_text.as_deref().unwrap_or("")));
            let exponent = if exp_text.is_empty() { "0".to_string() } else { exp_text };
            self.finish_float(span, &mantissa, &exponent, FloatStyle::Hex, &suffix_text)
        } else {
            self.finish_integer(span, &strip_separators(&int_text), 16, IntegerBase::Hex, &suffix_text)
        }
    }

    fn lex_binary_number(&mut self, start: Position) -> Token {
        self.consume_byte();
        self.consume_byte();
        let text = self.scan_run(is_dec_digit_or_sep);
        if !separators_well_placed(&text) {
            let span = Span::new(start, self.stream.position());
            self.emit_error(DiagnosticKind::MalformedLiteral, span, "misplaced digit separator");
        }
        self.check_separator_dialect(&text, None, start);
        let stripped = strip_separators(&text);
        if stripped.bytes().any(|b| b != b'0' && b != b'1') {
            let span = Span::new(start, self.stream.position());
            self.emit_error(DiagnosticKind::MalformedLiteral, span, "invalid digit in binary constant");
        }
        let suffix_text = self.scan_run(is_suffix_byte);
        let span = Span::new(start, self.stream.position());
        self.finish_integer(span, &stripped, 2, IntegerBase::Binary, &suffix_text)
    }

    fn lex_decimal_or_octal_number(&mut self, start: Position) -> Token {
        let int_text = self.scan_run(is_dec_digit_or_sep);

        let mut frac_text = None;
        if self.peek_byte() == Some(b'.') {
            self.consume_byte();
            frac_text = Some(self.scan_run(is_dec_digit_or_sep));
        }

        let mut exp_text = None;
        if matches!(self.peek_byte(), Some(b'e') | Some(b'E')) {
            self.consume_byte();
            let mut text = String::new();
            if matches!(self.peek_byte(), Some(b'+') | Some(b'-')) {
                text.push(self.consume_byte().unwrap() as char);
            }
            let digits = self.scan_run(|b| b.is_ascii_digit());
            if digits.is_empty() {
                let span = Span::new(start, self.stream.position());
                self.emit_error(DiagnosticKind::MalformedLiteral, span, "exponent has no digits");
            }
            text.push_str(&digits);
            exp_text = Some(text);
        }

        let is_float = frac_text.is_some() || exp_text.is_some();

        if !separators_well_placed(&int_text) || frac_text.as_deref().is_some_and(|f| !separators_well_placed(f)) {
            let span = Span::new(start, self.stream.position());
            self.emit_error(DiagnosticKind::MalformedLiteral, span, "misplaced digit separator");
        }
        self.check_separator_dialect(&int_text, frac_text.as_deref(), start);

        let suffix_text = self.scan_run(is_suffix_byte);
        let end = self.stream.position();
        let span = Span::new(start, end);

        if is_float {
            let mantissa = format!("{}.{}", strip_separators(&int_text), strip_separators(frac_text.as_deref().unwrap_or("")));
            let mut text = mantissa;
            if let Some(exp) = exp_text {
                text.push('e');
                text.push_str(&exp);
            }
            self.finish_decimal_float(span, &text, &suffix_text)
        } else {
            let stripped = strip_separators(&int_text);
            let (base, radix) = if stripped.len() > 1 && stripped.starts_with('0') {
                (IntegerBase::Octal, 8)
            } else {
                (IntegerBase::Decimal, 10)
            };
            if base == IntegerBase::Octal && stripped.bytes().any(|b| b == b'8' || b == b'9') {
                self.emit_error(DiagnosticKind::MalformedLiteral, span, "invalid digit in octal constant");
            }
            self.finish_integer(span, &stripped, radix, base, &suffix_text)
        }
    }

    fn split_imaginary_suffix<'s>(&mut self, suffix_text: &'s str, span: Span) -> &'s str {
        let Some(last) = suffix_text.bytes().last() else {
            return suffix_text;
        };
        if !matches!(last, b'i' | b'I' | b'j' | b'J') {
            return suffix_text;
        }
        if self.ctx.std_at_least(LangStd::C23) {
            self.emit_error(DiagnosticKind::RemovedFeature, span, "imaginary constants were removed in C23");
        } else {
            self.pedantic_warning(span, "imaginary constants are a GNU extension");
        }
        &suffix_text[..suffix_text.len() - 1]
    }

    fn finish_integer(&mut self, span: Span, digits: &str, radix: u32, base: IntegerBase, suffix_text: &str) -> Token {
        let suffix_text = self.split_imaginary_suffix(suffix_text, span);
        let flags = match parse_integer_suffix(suffix_text) {
            Some(f) => f,
            None => {
                self.emit_error(DiagnosticKind::MalformedLiteral, span, "invalid suffix on integer constant");
                TokenFlags::empty()
            }
        };

        let unsigned = match parse_unsigned_radix(digits, radix) {
            Some(v) => v,
            None => {
                self.emit_masked_warning(Warning::IntegerOverflow, DiagnosticKind::MalformedLiteral, span, "integer constant is too large for its type");
                u64::MAX
            }
        };
        let signed = unsigned as i64;

        Token::new(TokenKind::IntegerConstant, span)
            .with_flags(flags)
            .with_value(TokenValue::Integer { signed, unsigned, base })
    }

    fn finish_decimal_float(&mut self, span: Span, text: &str, suffix_text: &str) -> Token {
        let value = match parse_decimal_float(text) {
            Some(v) => v,
            None => {
                self.emit_masked_warning(Warning::FloatRange, DiagnosticKind::MalformedLiteral, span, "floating constant out of range");
                0.0
            }
        };
        self.finish_float_token(span, value, FloatStyle::Decimal, suffix_text)
    }

    fn finish_float(&mut self, span: Span, mantissa: &str, exponent: &str, style: FloatStyle, suffix_text: &str) -> Token {
        let value = match style {
            FloatStyle::Decimal => parse_decimal_float(&format!("{}e{}", mantissa, exponent)),
            FloatStyle::Hex => parse_hex_float(mantissa, exponent),
        };
        let value = match value {
            Some(v) => v,
            None => {
                self.emit_masked_warning(Warning::FloatRange, DiagnosticKind::MalformedLiteral, span, "floating constant out of range");
                0.0
            }
        };
        self.finish_float_token(span, value, style, suffix_text)
    }

    fn finish_float_token(&mut self, span: Span, value: f64, style: FloatStyle, suffix_text: &str) -> Token {
        let suffix_text = self.split_imaginary_suffix(suffix_text, span);
        let (suffix, req) = match classify_float_suffix(suffix_text) {
            Some(pair) => pair,
            None => {
                self.emit_error(DiagnosticKind::MalformedLiteral, span, "invalid suffix on floating constant");
                (FloatSuffix::None, FloatSuffixRequirement::None_)
            }
        };
        if !req.satisfied(self.ctx) {
            self.pedantic_warning(span, "this floating suffix requires GNU extensions or a newer standard");
        }
        Token::new(TokenKind::FloatingConstant, span).with_value(TokenValue::Float { value, style, suffix })
    }
}
