//! Source positions and spans.
//!
//! A [`Position`] names a single byte in a source file by filename, 1-based
//! line/column, and 0-based byte offset. A [`Span`] is an ordered pair of
//! positions; `end` marks the byte after the last byte of the token.

mod source_map;

pub use source_map::{SourceFile, SourceMap};

/// Identifies a source file registered with a [`SourceMap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(pub u32);

impl FileId {
    pub const DUMMY: FileId = FileId(u32::MAX);
}

impl Default for FileId {
    fn default() -> Self {
        FileId::DUMMY
    }
}

/// A single location in a source file.
///
/// Lines and columns are 1-based; `offset` is a 0-based byte count into the
/// untranslated source (the translation phases in [`crate`]'s sibling crate
/// operate logically above this coordinate system, not inside it).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub file: FileId,
    pub line: u32,
    pub column: u32,
    pub offset: usize,
}

impl Position {
    pub const DUMMY: Position = Position {
        file: FileId::DUMMY,
        line: 0,
        column: 0,
        offset: 0,
    };

    pub const fn new(file: FileId, line: u32, column: u32, offset: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset,
        }
    }
}

/// An ordered pair of positions delimiting a token or diagnostic range.
///
/// Invariant: `start.offset <= end.offset`; if both positions are on the
/// same line, `start.column <= end.column`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub const DUMMY: Span = Span {
        start: Position::DUMMY,
        end: Position::DUMMY,
    };

    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(start.offset <= end.offset);
        Self { start, end }
    }

    /// A zero-width span at a single position.
    pub fn point(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    /// Merge two spans into one covering both (and anything between them).
    pub fn merge(&self, other: Span) -> Span {
        let start = if self.start.offset <= other.start.offset {
            self.start
        } else {
            other.start
        };
        let end = if self.end.offset >= other.end.offset {
            self.end
        } else {
            other.end
        };
        Span { start, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: u32, col: u32, off: usize) -> Position {
        Position::new(FileId(0), line, col, off)
    }

    #[test]
    fn point_is_empty() {
        let s = Span::point(pos(1, 1, 0));
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn new_preserves_bounds() {
        let s = Span::new(pos(1, 1, 0), pos(1, 4, 3));
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn merge_takes_widest_bounds() {
        let a = Span::new(pos(1, 1, 0), pos(1, 4, 3));
        let b = Span::new(pos(1, 3, 2), pos(1, 8, 7));
        let m = a.merge(b);
        assert_eq!(m.start.offset, 0);
        assert_eq!(m.end.offset, 7);
    }

    #[test]
    fn dummy_span_is_empty() {
        assert!(Span::DUMMY.is_empty());
    }
}
