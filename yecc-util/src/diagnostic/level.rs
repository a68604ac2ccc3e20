//! Diagnostic severity levels.

use std::fmt;

/// Diagnostic severity, in the four levels the lexer's sink distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Error,
    Warning,
    Note,
    Info,
}

impl Level {
    pub const fn is_error(&self) -> bool {
        matches!(self, Level::Error)
    }

    pub const fn is_warning(&self) -> bool {
        matches!(self, Level::Warning)
    }

    /// The leveled word the diagnostics sink appends to the message line.
    pub const fn label(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Note => "note",
            Level::Info => "info",
        }
    }

    /// ANSI SGR color code used when color is enabled.
    pub const fn color_code(&self) -> &'static str {
        match self {
            Level::Error => "\x1b[1;31m",
            Level::Warning => "\x1b[1;33m",
            Level::Note => "\x1b[1;36m",
            Level::Info => "\x1b[1;32m",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn labels() {
        assert_eq!(Level::Error.label(), "error");
        assert_eq!(Level::Warning.label(), "warning");
        assert_eq!(Level::Note.label(), "note");
        assert_eq!(Level::Info.label(), "info");
    }

    #[test]
    fn display_matches_label() {
        assert_eq!(format!("{}", Level::Error), "error");
    }

    #[test]
    fn predicates() {
        assert!(Level::Error.is_error());
        assert!(!Level::Warning.is_error());
        assert!(Level::Warning.is_warning());
    }

    #[test]
    fn ordering() {
        assert!(Level::Error < Level::Warning);
        assert!(Level::Warning < Level::Note);
        assert!(Level::Note < Level::Info);
    }

    #[test]
    fn hashable_and_distinct() {
        let set: HashSet<Level> = [Level::Error, Level::Error, Level::Warning]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }
}
