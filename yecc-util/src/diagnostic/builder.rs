//! [`Diagnostic`] and its fluent [`DiagnosticBuilder`].

use super::{DiagnosticKind, Level};
use crate::span::Span;

/// A single diagnostic message with severity and source location.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
    pub kind: Option<DiagnosticKind>,
}

impl Diagnostic {
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            message: message.into(),
            span,
            kind: None,
        }
    }

    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, message, span)
    }

    pub fn note(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Note, message, span)
    }

    pub fn info(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Info, message, span)
    }

    pub fn with_kind(mut self, kind: DiagnosticKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Fluent constructor for [`Diagnostic`].
pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    span: Span,
    kind: Option<DiagnosticKind>,
}

impl DiagnosticBuilder {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            span: Span::DUMMY,
            kind: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn note(message: impl Into<String>) -> Self {
        Self::new(Level::Note, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn kind(mut self, kind: DiagnosticKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn build(self) -> Diagnostic {
        Diagnostic {
            level: self.level,
            message: self.message,
            span: self.span,
            kind: self.kind,
        }
    }

    /// Build and hand the diagnostic to a sink in one step.
    pub fn emit(self, sink: &mut super::Diagnostics) {
        sink.report(self.build());
    }
}
