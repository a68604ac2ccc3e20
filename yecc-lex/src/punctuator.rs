//! Punctuator maximal munch and digraph translation.

use crate::token::Punctuator;

/// One punctuator spelling (1-3 ASCII bytes) mapped to its kind. Ordered
/// longest-first so a linear scan implements maximal munch directly.
const PUNCTUATORS: &[(&str, Punctuator)] = &[
    ("<<=", Punctuator::LShiftAssign),
    (">>=", Punctuator::RShiftAssign),
    ("...", Punctuator::Ellipsis),
    ("<<", Punctuator::LShift),
    (">>", Punctuator::RShift),
    ("&&", Punctuator::AmpAmp),
    ("||", Punctuator::PipePipe),
    ("->", Punctuator::Arrow),
    ("++", Punctuator::PlusPlus),
    ("--", Punctuator::MinusMinus),
    ("+=", Punctuator::PlusAssign),
    ("-=", Punctuator::MinusAssign),
    ("*=", Punctuator::StarAssign),
    ("/=", Punctuator::SlashAssign),
    ("%=", Punctuator::PercentAssign),
    ("&=", Punctuator::AmpAssign),
    ("^=", Punctuator::CaretAssign),
    ("|=", Punctuator::PipeAssign),
    ("<=", Punctuator::LessEqual),
    (">=", Punctuator::GreaterEqual),
    ("==", Punctuator::EqEq),
    ("!=", Punctuator::NotEq),
    ("?", Punctuator::Question),
    (":", Punctuator::Colon),
    (";", Punctuator::Semicolon),
    (",", Punctuator::Comma),
    (".", Punctuator::Dot),
    ("+", Punctuator::Plus),
    ("-", Punctuator::Minus),
    ("*", Punctuator::Star),
    ("/", Punctuator::Slash),
    ("%", Punctuator::Percent),
    ("<", Punctuator::Less),
    (">", Punctuator::Greater),
    ("=", Punctuator::Assign),
    ("!", Punctuator::Bang),
    ("~", Punctuator::Tilde),
    ("^", Punctuator::Caret),
    ("&", Punctuator::Amp),
    ("|", Punctuator::Pipe),
    ("(", Punctuator::LParen),
    (")", Punctuator::RParen),
    ("[", Punctuator::LBracket),
    ("]", Punctuator::RBracket),
    ("{", Punctuator::LBrace),
    ("}", Punctuator::RBrace),
];

/// Digraph spellings and what they stand in for, gated on
/// `enable_trigraphs`. `%:%:` is listed before `%:` so a prefix-ordered
/// scan still finds the longer match first.
const DIGRAPHS: &[(&str, DigraphTarget)] = &[
    ("%:%:", DigraphTarget::HashHash),
    ("<:", DigraphTarget::Bracket(Punctuator::LBracket)),
    (":>", DigraphTarget::Bracket(Punctuator::RBracket)),
    ("<%", DigraphTarget::Bracket(Punctuator::LBrace)),
    ("%>", DigraphTarget::Bracket(Punctuator::RBrace)),
    ("%:", DigraphTarget::Hash),
];

/// What a digraph spelling stands in for. `#`/`##` are not [`Punctuator`]
/// variants (they classify as `PpHash`/`PpHashHash` instead), so they
/// need their own target shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigraphTarget {
    Bracket(Punctuator),
    Hash,
    HashHash,
}

/// Outcome of matching punctuation at the current (translated) position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PunctMatch {
    Punctuator(Punctuator, usize),
    Hash(usize),
    HashHash(usize),
    /// A digraph pattern was recognized but trigraphs/digraphs are
    /// disabled; `len` bytes should be skipped and single-byte
    /// punctuators retried from the next byte.
    DigraphIgnored(usize),
    None,
}

/// True if `bytes` begins with one of the recognized digraph spellings.
/// Used by the lexer to decide whether a translated punctuator warrants the
/// "digraph used" diagnostic, since [`PunctMatch::Punctuator`] does not
/// itself distinguish a digraph translation from a direct spelling.
pub fn is_digraph_spelling(bytes: &[u8]) -> bool {
    DIGRAPHS.iter().any(|&(spelling, _)| bytes.starts_with(spelling.as_bytes()))
}

/// Matches punctuation in `bytes` (already translated) starting at index 0.
/// `digraphs_enabled` gates both digraph recognition and trigraphs, since
/// the same `enable_trigraphs` context flag covers the full digraph set.
pub fn match_punctuator(bytes: &[u8], digraphs_enabled: bool) -> PunctMatch {
    if let Some(&(spelling, target)) = DIGRAPHS
        .iter()
        .find(|&&(spelling, _)| bytes.starts_with(spelling.as_bytes()))
    {
        if digraphs_enabled {
            return match target {
                DigraphTarget::Bracket(p) => PunctMatch::Punctuator(p, spelling.len()),
                DigraphTarget::Hash => PunctMatch::Hash(spelling.len()),
                DigraphTarget::HashHash => PunctMatch::HashHash(spelling.len()),
            };
        } else {
            return PunctMatch::DigraphIgnored(spelling.len());
        }
    }
    if bytes.starts_with(b"##") {
        return PunctMatch::HashHash(2);
    }
    if bytes.starts_with(b"#") {
        return PunctMatch::Hash(1);
    }
    for &(spelling, kind) in PUNCTUATORS {
        if bytes.starts_with(spelling.as_bytes()) {
            return PunctMatch::Punctuator(kind, spelling.len());
        }
    }
    PunctMatch::None
}
