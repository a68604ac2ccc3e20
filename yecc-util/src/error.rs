//! Core error types for yecc-util.

use thiserror::Error;

/// Error type for source map operations.
#[derive(Debug, Error)]
pub enum SourceMapError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("invalid span: start {start} > end {end}")]
    InvalidSpan { start: usize, end: usize },

    #[error("span out of bounds: file has {file_len} bytes, span is {span_start}..{span_end}")]
    SpanOutOfBounds {
        file_len: usize,
        span_start: usize,
        span_end: usize,
    },

    #[error("invalid line number: {line} (file has {max_lines} lines)")]
    InvalidLineNumber { line: usize, max_lines: usize },
}

/// Result type alias for source map operations.
pub type SourceMapResult<T> = std::result::Result<T, SourceMapError>;
