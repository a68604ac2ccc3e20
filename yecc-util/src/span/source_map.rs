//! Maps [`FileId`]s to loaded source text, and resolves byte offsets to
//! line/column pairs for diagnostic rendering.

use super::FileId;
use crate::error::{SourceMapError, SourceMapResult};

/// A single loaded source file: its name, full content, and a precomputed
/// index of line-start offsets used for binary-search line lookup.
pub struct SourceFile {
    name: String,
    content: String,
    line_starts: Vec<usize>,
}

impl SourceFile {
    fn new(name: String, content: String) -> Self {
        let line_starts = compute_line_starts(&content);
        Self {
            name,
            content,
            line_starts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// 1-based line number, 0-based byte offset -> (line, column), both 1-based.
    pub fn offset_to_line_col(&self, offset: usize) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let line_start = self.line_starts[line_idx];
        let column = self.content[line_start..offset].chars().count() + 1;
        (line_idx as u32 + 1, column as u32)
    }

    /// The text of 1-based line `line`, without its trailing newline.
    pub fn line_text(&self, line: u32) -> Option<&str> {
        let idx = line.checked_sub(1)? as usize;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .copied()
            .unwrap_or(self.content.len());
        Some(self.content[start..end].trim_end_matches(['\n', '\r']))
    }
}

fn compute_line_starts(content: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, b) in content.bytes().enumerate() {
        if b == b'\n' {
            starts.push(i + 1);
        }
    }
    starts
}

/// Owns every [`SourceFile`] registered during a compilation.
#[derive(Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Registers a file's contents and returns its stable [`FileId`].
    pub fn add_file(&mut self, name: impl Into<String>, content: impl Into<String>) -> FileId {
        self.files.push(SourceFile::new(name.into(), content.into()));
        FileId((self.files.len() - 1) as u32)
    }

    pub fn get(&self, id: FileId) -> SourceMapResult<&SourceFile> {
        self.files
            .get(id.0 as usize)
            .ok_or_else(|| SourceMapError::FileNotFound(format!("{:?}", id)))
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_offsets() {
        let mut sm = SourceMap::new();
        let id = sm.add_file("a.c", "int x;");
        let f = sm.get(id).unwrap();
        assert_eq!(f.offset_to_line_col(0), (1, 1));
        assert_eq!(f.offset_to_line_col(4), (1, 5));
    }

    #[test]
    fn multiline_offsets() {
        let mut sm = SourceMap::new();
        let id = sm.add_file("a.c", "int x;\nint y;\n");
        let f = sm.get(id).unwrap();
        assert_eq!(f.offset_to_line_col(7), (2, 1));
        assert_eq!(f.line_text(1), Some("int x;"));
        assert_eq!(f.line_text(2), Some("int y;"));
        assert_eq!(f.line_count(), 3);
    }

    #[test]
    fn empty_file() {
        let mut sm = SourceMap::new();
        let id = sm.add_file("empty.c", "");
        let f = sm.get(id).unwrap();
        assert_eq!(f.offset_to_line_col(0), (1, 1));
    }

    #[test]
    fn missing_file_errors() {
        let sm = SourceMap::new();
        assert!(sm.get(FileId(0)).is_err());
    }
}
