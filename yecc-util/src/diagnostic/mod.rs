//! Diagnostics: formatting and collecting error/warning/note/info messages
//! with a source excerpt and caret span, as described for the lexer's
//! diagnostics sink.
//!
//! ```
//! use yecc_util::diagnostic::{Diagnostics, DiagnosticBuilder};
//! use yecc_util::span::SourceMap;
//!
//! let mut source_map = SourceMap::new();
//! let file = source_map.add_file("a.c", "int x;\n");
//! let mut sink = Diagnostics::new(false);
//! DiagnosticBuilder::error("unexpected character '@'")
//!     .span(yecc_util::span::Span::point(yecc_util::span::Position::new(file, 1, 1, 0)))
//!     .emit(&mut sink);
//! assert!(sink.has_errors());
//! ```

mod builder;
mod codes;
mod level;

pub use builder::{Diagnostic, DiagnosticBuilder};
pub use codes::DiagnosticKind;
pub use level::Level;

use crate::span::SourceMap;

/// Decides whether ANSI color is applied to rendered diagnostics.
///
/// Mirrors the rule in the lexer's diagnostics sink: color is enabled when
/// the output is a terminal, `NO_COLOR` is unset, and `CLICOLOR_FORCE` (if
/// set) is not empty.
pub fn color_enabled(is_tty: bool) -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Some(force) = std::env::var_os("CLICOLOR_FORCE") {
        if !force.is_empty() {
            return true;
        }
    }
    is_tty
}

const RESET: &str = "\x1b[0m";

/// Renders the annotated source excerpt for `diag` — the numbered source
/// line(s) and caret ruler, with the leveled message appended on the first
/// line — without the `"yecc: file:line:col\n"` header
/// [`format_diagnostic`] prints. Used for a note attached to a preceding
/// diagnostic, where the header line has already been printed once and
/// repeating it would just be noise.
pub fn diag_context(source_map: &SourceMap, diag: &Diagnostic, color: bool) -> String {
    let mut out = String::new();
    let start = diag.span.start;
    let end = diag.span.end;

    let first_line = start.line;
    let last_line = end.line.max(first_line);

    for line in first_line..=last_line {
        let text = source_map
            .get(start.file)
            .ok()
            .and_then(|f| f.line_text(line))
            .unwrap_or("");

        out.push_str(&format!("  {} | {}\n", line, text));

        let line_start_col = if line == first_line { start.column } else { 1 };
        let line_end_col = if line == last_line {
            end.column.max(line_start_col + 1)
        } else {
            (text.chars().count() as u32 + 1).max(line_start_col + 1)
        };

        let pad: String = std::iter::repeat(' ')
            .take(line_start_col.saturating_sub(1) as usize)
            .collect();
        let width = (line_end_col - line_start_col).max(1) as usize;
        let mut arrow = String::from("^");
        if width > 1 {
            arrow.extend(std::iter::repeat('-').take(width - 2));
            arrow.push('>');
        }

        out.push_str("    | ");
        out.push_str(&pad);
        if color {
            out.push_str(diag.level.color_code());
            out.push_str(&arrow);
            out.push_str(RESET);
        } else {
            out.push_str(&arrow);
        }

        if line == first_line {
            out.push(' ');
            out.push_str(diag.level.label());
            out.push_str(": ");
            out.push_str(&diag.message);
        }
        out.push('\n');
    }

    out
}

/// Renders a single diagnostic against a [`SourceMap`], producing the
/// `"yecc: file:line:col\n"` header followed by [`diag_context`]'s
/// annotated excerpt.
pub fn format_diagnostic(source_map: &SourceMap, diag: &Diagnostic, color: bool) -> String {
    let start = diag.span.start;

    let file_name = source_map
        .get(start.file)
        .map(|f| f.name().to_string())
        .unwrap_or_else(|_| "<unknown>".to_string());

    let mut out = format!("yecc: {}:{}:{}\n", file_name, start.line, start.column);
    out.push_str(&diag_context(source_map, diag, color));
    out
}

/// Collects diagnostics emitted during lexing and renders them as produced.
///
/// Holds no file handles; a sink is cheap to create per compilation (see the
/// design note against a single process-wide diagnostics singleton).
pub struct Diagnostics {
    color: bool,
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
}

impl Diagnostics {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            diagnostics: Vec::new(),
            error_count: 0,
            warning_count: 0,
        }
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.level {
            Level::Error => self.error_count += 1,
            Level::Warning => self.warning_count += 1,
            _ => {}
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Render every collected diagnostic against `source_map`, in emission
    /// order. A [`Level::Note`] immediately following another diagnostic is
    /// treated as attached to it: it renders with [`diag_context`] alone,
    /// skipping the header line the preceding diagnostic already printed.
    pub fn render_all(&self, source_map: &SourceMap) -> String {
        let mut out = String::new();
        let mut prev_was_diagnostic = false;
        for diag in &self.diagnostics {
            if diag.level == Level::Note && prev_was_diagnostic {
                out.push_str(&diag_context(source_map, diag, self.color));
            } else {
                out.push_str(&format_diagnostic(source_map, diag, self.color));
            }
            prev_was_diagnostic = true;
        }
        out
    }
}
