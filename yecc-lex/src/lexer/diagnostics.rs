//! Diagnostic emission helpers shared by the lexing modules. Centralizes
//! the masking/escalation rules for warnings, so each lexing routine just
//! names *what* happened rather than re-deriving whether it's enabled,
//! pedantic-only, or promoted to error.

use yecc_util::diagnostic::{DiagnosticBuilder, DiagnosticKind};
use yecc_util::Span;

use crate::context::Warning;
use crate::keyword::KeywordDiagnostic;

use super::Lexer;

impl<'a> Lexer<'a> {
    /// Unconditional diagnostic: errors don't halt lexing and aren't
    /// maskable.
    pub(super) fn emit_error(&mut self, kind: DiagnosticKind, span: Span, message: impl Into<String>) {
        DiagnosticBuilder::error(message).span(span).kind(kind).emit(self.diagnostics);
    }

    /// A warning gated by its [`Warning`] category mask, escalated to an
    /// error if the category is in `warning_error_mask` or
    /// `warnings_as_errors` is set.
    pub(super) fn emit_masked_warning(&mut self, w: Warning, kind: DiagnosticKind, span: Span, message: impl Into<String>) {
        if !self.ctx.warning_enabled(w) {
            return;
        }
        let level_is_error = self.ctx.warning_as_error(w);
        let message = message.into();
        let builder = if level_is_error {
            DiagnosticBuilder::error(message)
        } else {
            DiagnosticBuilder::warning(message)
        };
        builder.span(span).kind(kind).emit(self.diagnostics);
    }

    /// A pure-extension-usage diagnostic that only fires under `-pedantic`,
    /// per `Context::pedantic`'s documented effect.
    pub(super) fn pedantic_warning(&mut self, span: Span, message: impl Into<String>) {
        if !self.ctx.pedantic {
            return;
        }
        self.emit_masked_warning(Warning::Pedantic, DiagnosticKind::ExtensionUsage, span, message);
    }

    /// Reports the diagnostics [`crate::keyword::keyword_diagnostics`]
    /// returns for a classified spelling.
    pub(super) fn report_keyword_diagnostic(&mut self, diag: KeywordDiagnostic, spelling: &str, span: Span) {
        match diag {
            KeywordDiagnostic::GnuOnlyExtension => {
                self.pedantic_warning(span, format!("'{}' is a GNU extension", spelling));
            }
            KeywordDiagnostic::MinStdExtension(std) => {
                self.pedantic_warning(span, format!("'{}' requires {:?} or a GNU extension", spelling, std));
            }
            KeywordDiagnostic::DeprecatedOldForm => {
                self.emit_masked_warning(
                    Warning::Pedantic,
                    DiagnosticKind::DeprecatedUsage,
                    span,
                    format!("'{}' is deprecated in C23", spelling),
                );
            }
            KeywordDiagnostic::NewFormExtension => {
                self.pedantic_warning(span, format!("'{}' is a C23 extension", spelling));
            }
            KeywordDiagnostic::RemovedInC23 => {
                self.emit_error(
                    DiagnosticKind::RemovedFeature,
                    span,
                    format!("'{}' was removed in C23", spelling),
                );
            }
        }
    }
}
