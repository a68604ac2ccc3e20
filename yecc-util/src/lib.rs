//! Shared utilities for the yecc lexer: string interning, diagnostics
//! rendering, and source position/span tracking.
//!
//! These three concerns are grouped into one crate because every other
//! yecc crate depends on all of them together, never on just one in
//! isolation.

pub mod diagnostic;
pub mod error;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, Diagnostics, Level};
pub use span::{FileId, Position, SourceMap, Span};
pub use symbol::{Interner, Symbol};
