//! Diagnostic kind tags.
//!
//! Every diagnostic the lexer emits falls into one of a small number of
//! language-neutral kinds. The kind does not affect rendering; it lets a
//! caller filter or count diagnostics by category without parsing messages.

use std::fmt;

/// The origin category of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Bad int/float/suffix, unterminated string/char/header.
    MalformedLiteral,
    /// Invalid UTF-8 in an identifier or literal.
    MalformedEncoding,
    /// Feature needs a newer standard, GNU extensions, or pedantic mode.
    ExtensionUsage,
    /// C23 deprecation of an older spelling.
    DeprecatedUsage,
    /// C23-removed keyword or feature used under a standard that removed it.
    RemovedFeature,
    /// An internally-impossible state was reached; surfaced rather than panicking.
    InternalInvariantBroken,
    /// File open/seek/read failure.
    IoFailure,
}

impl DiagnosticKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::MalformedLiteral => "malformed-literal",
            DiagnosticKind::MalformedEncoding => "malformed-encoding",
            DiagnosticKind::ExtensionUsage => "extension-usage",
            DiagnosticKind::DeprecatedUsage => "deprecated-usage",
            DiagnosticKind::RemovedFeature => "removed-feature",
            DiagnosticKind::InternalInvariantBroken => "internal-invariant-broken",
            DiagnosticKind::IoFailure => "io-failure",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_as_str() {
        assert_eq!(
            format!("{}", DiagnosticKind::MalformedLiteral),
            "malformed-literal"
        );
        assert_eq!(format!("{}", DiagnosticKind::IoFailure), "io-failure");
    }
}
