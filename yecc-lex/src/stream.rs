//! The byte stream: a buffered, file-backed reader with peek/next/unget,
//! absolute seek, line/column tracking, and a small lookahead window.
//!
//! Implementation choice, recorded in DESIGN.md: rather than a rolling
//! fixed-size buffer, `Stream` reads the whole file into memory once, up
//! front. C translation units are small enough in practice that this
//! trades a bounded amount of memory for a `seek` that is always exact —
//! line/column after a seek is recomputed by walking the buffer from its
//! start, which is by construction identical to what sequential reads
//! from the origin would have produced.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use yecc_util::span::{FileId, Position};

/// Sentinel returned by [`Stream::peek`]/[`Stream::next`] at end of file.
/// Distinguishable from any real byte value (`0..=255`).
pub const EOF: i32 = -1;

/// Lower bound on unget pushback depth.
const UNGET_DEPTH: usize = 8;

/// The three leading bytes of a UTF-8 byte-order mark.
const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

#[derive(Debug, Error)]
pub enum OpenError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Clone, Copy, Debug)]
struct Mark {
    line: u32,
    column: u32,
}

/// A buffered, file-backed byte stream with bounded unget.
pub struct Stream {
    file: FileId,
    data: Vec<u8>,
    offset: usize,
    line: u32,
    column: u32,
    pushback: Vec<Mark>,
}

impl Stream {
    /// Opens `path`, strips a leading BOM if present, and primes state at
    /// the first real byte.
    pub fn open(path: impl AsRef<Path>, file: FileId) -> Result<Self, OpenError> {
        let path_ref = path.as_ref();
        let data = fs::read(path_ref).map_err(|source| OpenError::Io {
            path: path_ref.to_path_buf(),
            source,
        })?;
        let mut stream = Self {
            file,
            data,
            offset: 0,
            line: 1,
            column: 1,
            pushback: Vec::with_capacity(UNGET_DEPTH),
        };
        stream.strip_bom();
        Ok(stream)
    }

    /// Builds a stream directly from in-memory bytes (used by tests and by
    /// callers that already have source text, e.g. macro-expanded text).
    pub fn from_bytes(data: Vec<u8>, file: FileId) -> Self {
        let mut stream = Self {
            file,
            data,
            offset: 0,
            line: 1,
            column: 1,
            pushback: Vec::with_capacity(UNGET_DEPTH),
        };
        stream.strip_bom();
        stream
    }

    fn strip_bom(&mut self) {
        if self.data.starts_with(&BOM) {
            self.offset = 3;
            // The first real byte's `next()` call bumps this to column 1.
            self.column = 0;
        }
    }

    /// Releases the buffer. Idempotent.
    pub fn close(&mut self) {
        self.data.clear();
        self.data.shrink_to_fit();
        self.offset = 0;
        self.pushback.clear();
    }

    fn byte_at(&self, offset: usize) -> i32 {
        self.data.get(offset).map(|&b| b as i32).unwrap_or(EOF)
    }

    /// Returns the byte at the current offset without advancing.
    pub fn peek(&self) -> i32 {
        self.byte_at(self.offset)
    }

    /// Returns the byte `ahead` positions past the current offset without
    /// advancing. `peek_at(0)` is equivalent to [`Stream::peek`].
    pub fn peek_at(&self, ahead: usize) -> i32 {
        self.byte_at(self.offset + ahead)
    }

    /// Consumes one byte, updating line/column.
    pub fn next(&mut self) -> i32 {
        let b = self.byte_at(self.offset);
        if b == EOF {
            return EOF;
        }
        self.pushback.push(Mark {
            line: self.line,
            column: self.column,
        });
        if self.pushback.len() > UNGET_DEPTH {
            self.pushback.remove(0);
        }
        self.offset += 1;
        if b as u8 == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        b
    }

    /// Steps one byte back, restoring the previous line/column exactly.
    /// Bounded to the last [`UNGET_DEPTH`] consumed bytes; fails at offset
    /// 0 (and whenever the pushback history has been exhausted).
    pub fn unget(&mut self) -> bool {
        if self.offset == 0 {
            return false;
        }
        match self.pushback.pop() {
            Some(mark) => {
                self.offset -= 1;
                self.line = mark.line;
                self.column = mark.column;
                true
            }
            None => false,
        }
    }

    /// Absolute seek. Clears pushback; line/column are recomputed by
    /// walking from the start of the buffer, matching what sequential
    /// reads from the origin would have produced.
    pub fn seek(&mut self, offset: usize) -> bool {
        if offset > self.data.len() {
            return false;
        }
        self.offset = offset;
        self.pushback.clear();
        let (line, column) = self.recompute_line_col(offset);
        self.line = line;
        self.column = column;
        true
    }

    fn recompute_line_col(&self, offset: usize) -> (u32, u32) {
        let mut line = 1u32;
        let mut column = 1u32;
        let bom_skip = if self.data.starts_with(&BOM) { 3 } else { 0 };
        for &b in &self.data[bom_skip..offset] {
            if b == b'\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        (line, column)
    }

    pub fn position(&self) -> Position {
        Position::new(self.file, self.line, self.column, self.offset)
    }

    pub fn eof(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Returns `[b-2, b-1, b, b+1, b+2]`, zero-padded at out-of-range
    /// indices. Never changes the current position.
    pub fn blob(&self) -> [u8; 5] {
        let at = |delta: isize| -> u8 {
            let pos = self.offset as isize + delta;
            if pos < 0 {
                return 0;
            }
            self.data.get(pos as usize).copied().unwrap_or(0)
        };
        [at(-2), at(-1), at(0), at(1), at(2)]
    }
}
