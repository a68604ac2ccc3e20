//! The token data model: token kinds, the value union carried by literal
//! tokens, and the flag bitset recording suffix/encoding metadata.

use yecc_util::{Span, Symbol};

/// Preprocessor directive-keyword kinds. These are only produced when
/// [`crate::lexer::Lexer`] is inside a directive (`in_directive ==
/// true`); the same spelling outside a directive classifies as
/// [`TokenKind::Identifier`] unless it also has a non-preprocessor entry
/// in the keyword table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PpDirective {
    Include,
    IncludeNext,
    Define,
    Undef,
    If,
    Ifdef,
    Ifndef,
    Elif,
    Else,
    Endif,
    Error,
    Warning,
    Line,
    Pragma,
    Import,
    Embed,
    ElifDef,
    ElifNDef,
    HasInclude,
    HasCAttribute,
    VaOpt,
    Ident,
    Sccs,
    Assert,
    Unassert,
    UnderscoreAssert,
    UnderscoreAssertAny,
    Defined,
}

impl PpDirective {
    /// Whether this directive opens header-name mode for its next token.
    pub const fn wants_header_name(self) -> bool {
        matches!(
            self,
            PpDirective::Include | PpDirective::IncludeNext | PpDirective::Import | PpDirective::Embed
        )
    }
}

/// Language keyword kinds, one per C/GNU keyword concept. Old-form
/// (`_Bool`) and new-form (`bool`) spellings of the same concept map to the
/// same variant; the keyword table records which spelling was actually
/// used for diagnostic purposes, not the token kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    Auto,
    Break,
    Case,
    Char,
    Const,
    Continue,
    Default,
    Do,
    Double,
    Else,
    Enum,
    Extern,
    Float,
    For,
    Goto,
    If,
    Inline,
    Int,
    Long,
    Register,
    Restrict,
    Return,
    Short,
    Signed,
    Sizeof,
    Static,
    Struct,
    Switch,
    Typedef,
    Union,
    Unsigned,
    Void,
    Volatile,
    While,
    Bool,
    Complex,
    Imaginary,
    Alignas,
    Alignof,
    Atomic,
    Generic,
    Noreturn,
    StaticAssert,
    ThreadLocal,
    True,
    False,
    Nullptr,
    Typeof,
    TypeofUnqual,
    Constexpr,
    Asm,
    Attribute,
    Extension,
}

/// Punctuator kinds, maximal-munch over the punctuator table. `#` and
/// `##` are excluded here: every appearance of either spelling is
/// classified as [`TokenKind::PpHash`]/[`TokenKind::PpHashHash`] instead,
/// since both are only ever meaningful to the preprocessor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Punctuator {
    LShiftAssign,  // <<=
    RShiftAssign,  // >>=
    Ellipsis,      // ...
    LShift,        // <<
    RShift,        // >>
    AmpAmp,        // &&
    PipePipe,      // ||
    Arrow,         // ->
    PlusPlus,      // ++
    MinusMinus,    // --
    PlusAssign,    // +=
    MinusAssign,   // -=
    StarAssign,    // *=
    SlashAssign,   // /=
    PercentAssign, // %=
    AmpAssign,     // &=
    CaretAssign,   // ^=
    PipeAssign,    // |=
    LessEqual,     // <=
    GreaterEqual,  // >=
    EqEq,          // ==
    NotEq,         // !=
    Question,
    Colon,
    Semicolon,
    Comma,
    Dot,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Less,
    Greater,
    Assign,
    Bang,
    Tilde,
    Caret,
    Amp,
    Pipe,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
}

/// The token's syntactic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Error,
    Identifier,
    IntegerConstant,
    FloatingConstant,
    CharacterConstant,
    StringLiteral,
    HeaderName,
    Punctuator(Punctuator),
    PpHash,
    PpHashHash,
    Keyword(Keyword),
    PpDirective(PpDirective),
}

/// `flags` bitset: integer suffix presence and string/char encoding kind.
/// Exactly one encoding bit is set on a string or character token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenFlags(u16);

impl TokenFlags {
    pub const UNSIGNED: TokenFlags = TokenFlags(1 << 0);
    pub const LONG: TokenFlags = TokenFlags(1 << 1);
    pub const LONG_LONG: TokenFlags = TokenFlags(1 << 2);
    pub const ENC_PLAIN: TokenFlags = TokenFlags(1 << 3);
    pub const ENC_UTF8: TokenFlags = TokenFlags(1 << 4);
    pub const ENC_UTF16: TokenFlags = TokenFlags(1 << 5);
    pub const ENC_UTF32: TokenFlags = TokenFlags(1 << 6);
    pub const ENC_WIDE: TokenFlags = TokenFlags(1 << 7);

    pub const fn empty() -> Self {
        TokenFlags(0)
    }

    pub fn with(mut self, other: TokenFlags) -> Self {
        self.0 |= other.0;
        self
    }

    pub fn contains(&self, other: TokenFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Numeric base tag recorded on an integer constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntegerBase {
    None,
    Decimal,
    Hex,
    Octal,
    Binary,
}

/// Float literal style: decimal (`1.5e3`) or hexadecimal (`0x1.8p3`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatStyle {
    Decimal,
    Hex,
}

/// Floating-point literal suffix tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatSuffix {
    None,
    F,
    L,
    F16,
    F32,
    F64,
    F128,
    F32x,
    F64x,
    F128x,
    Df,
    Dd,
    Dl,
}

/// The string/char-literal encoding kind, ranked `Plain < Utf8 < Utf16 <
/// Utf32 < Wide` for cross-prefix concatenation promotion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EncodingKind {
    Plain,
    Utf8,
    Utf16,
    Utf32,
    Wide,
}

impl EncodingKind {
    pub const fn flag(self) -> TokenFlags {
        match self {
            EncodingKind::Plain => TokenFlags::ENC_PLAIN,
            EncodingKind::Utf8 => TokenFlags::ENC_UTF8,
            EncodingKind::Utf16 => TokenFlags::ENC_UTF16,
            EncodingKind::Utf32 => TokenFlags::ENC_UTF32,
            EncodingKind::Wide => TokenFlags::ENC_WIDE,
        }
    }

    /// Minimum code-unit width this encoding can natively hold without
    /// widening (used by the promotion-commutativity rule).
    pub const fn unit_width(self) -> u32 {
        match self {
            EncodingKind::Plain | EncodingKind::Utf8 => 8,
            EncodingKind::Utf16 => 16,
            EncodingKind::Utf32 | EncodingKind::Wide => 32,
        }
    }
}

/// A decoded string-literal payload: one owning buffer per unit width,
/// NUL-terminated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StringValue {
    /// Plain and UTF-8 literals share an 8-bit unit representation.
    Bytes(Vec<u8>),
    Utf16(Vec<u16>),
    Utf32(Vec<u32>),
}

impl StringValue {
    /// Length of the decoded content, in units, excluding the terminator.
    pub fn content_len(&self) -> usize {
        match self {
            StringValue::Bytes(v) => v.len().saturating_sub(1),
            StringValue::Utf16(v) => v.len().saturating_sub(1),
            StringValue::Utf32(v) => v.len().saturating_sub(1),
        }
    }
}

/// The sum-over-kinds token payload.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenValue {
    None,
    Integer { signed: i64, unsigned: u64, base: IntegerBase },
    Float { value: f64, style: FloatStyle, suffix: FloatSuffix },
    Symbol(Symbol),
    String(StringValue),
    Character(u32),
    Error(Symbol),
}

/// A single classified token.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub loc: Span,
    pub flags: TokenFlags,
    pub value: TokenValue,
}

impl Token {
    pub fn new(kind: TokenKind, loc: Span) -> Self {
        Self {
            kind,
            loc,
            flags: TokenFlags::empty(),
            value: TokenValue::None,
        }
    }

    pub fn with_flags(mut self, flags: TokenFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_value(mut self, value: TokenValue) -> Self {
        self.value = value;
        self
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, TokenKind::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yecc_util::span::{FileId, Position};

    fn span() -> Span {
        Span::point(Position::new(FileId(0), 1, 1, 0))
    }

    #[test]
    fn flags_are_a_bitset() {
        let f = TokenFlags::UNSIGNED.with(TokenFlags::LONG);
        assert!(f.contains(TokenFlags::UNSIGNED));
        assert!(f.contains(TokenFlags::LONG));
        assert!(!f.contains(TokenFlags::LONG_LONG));
    }

    #[test]
    fn encoding_rank_orders_plain_below_wide() {
        assert!(EncodingKind::Plain < EncodingKind::Utf8);
        assert!(EncodingKind::Utf8 < EncodingKind::Utf16);
        assert!(EncodingKind::Utf16 < EncodingKind::Utf32);
        assert!(EncodingKind::Utf32 < EncodingKind::Wide);
    }

    #[test]
    fn eof_token_has_no_payload() {
        let t = Token::new(TokenKind::Eof, span());
        assert!(t.is_eof());
        assert_eq!(t.value, TokenValue::None);
    }

    #[test]
    fn directive_keyword_marks_header_name_directives() {
        assert!(PpDirective::Include.wants_header_name());
        assert!(PpDirective::IncludeNext.wants_header_name());
        assert!(PpDirective::Import.wants_header_name());
        assert!(PpDirective::Embed.wants_header_name());
        assert!(!PpDirective::Define.wants_header_name());
    }

    #[test]
    fn string_value_content_len_excludes_terminator() {
        let v = StringValue::Bytes(vec![b'a', b'b', 0]);
        assert_eq!(v.content_len(), 2);
    }
}
