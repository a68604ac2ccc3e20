//! The lexical analyzer: a file-backed byte stream, the overlaid
//! translation phases (line splicing, trigraphs), a keyword/directive
//! table, literal decoders, and the core lexer tying them together into
//! `Token` production.
//!
//! `Lexer` is the crate's entry point; everything else is a supporting
//! piece it composes. Each piece is independently testable against
//! synthetic byte slices via [`Stream::from_bytes`], which is why so many
//! of the internal modules are `pub`: the core lexer is thin glue over
//! them, not where most of the logic lives.

pub mod char_lit;
pub mod context;
pub mod escape;
pub mod keyword;
pub mod lexer;
pub mod number;
pub mod phases;
pub mod punctuator;
pub mod stream;
pub mod string_lit;
pub mod token;
pub mod unicode;

pub use context::{Context, FloatMode, LangStd, Warning, WarningMask, WideCharWidth};
pub use lexer::{Lexer, PpKind};
pub use stream::{OpenError, Stream};
pub use token::{
    EncodingKind, FloatStyle, FloatSuffix, IntegerBase, Keyword, PpDirective, Punctuator, StringValue, Token,
    TokenFlags, TokenKind, TokenValue,
};
