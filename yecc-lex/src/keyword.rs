//! Keyword / directive table: a static table classifying spellings into
//! token kinds, gated by minimum standard, GNU-only status, spelling
//! form, and C23 deprecation/removal status.

use crate::context::{Context, LangStd};
use crate::token::{Keyword, PpDirective};

/// Whether a keyword's spelling is the pre-C23 underscored form, the
/// post-C23 bare form, or has only ever had one form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpellingForm {
    Neutral,
    OldForm,
    NewForm,
}

/// A keyword's fate under C23.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum C23Status {
    None,
    Deprecated,
    Removed,
}

/// What a table entry classifies its spelling as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Keyword(Keyword),
    Directive(PpDirective),
}

/// One row of the keyword/directive table.
#[derive(Clone, Copy, Debug)]
pub struct Entry {
    pub spelling: &'static str,
    pub kind: Kind,
    pub is_preprocessor: bool,
    pub min_std: Option<LangStd>,
    pub gnu_only: bool,
    pub spelling_form: SpellingForm,
    pub c23_status: C23Status,
}

const fn kw(
    spelling: &'static str,
    keyword: Keyword,
    min_std: Option<LangStd>,
    gnu_only: bool,
    spelling_form: SpellingForm,
    c23_status: C23Status,
) -> Entry {
    Entry {
        spelling,
        kind: Kind::Keyword(keyword),
        is_preprocessor: false,
        min_std,
        gnu_only,
        spelling_form,
        c23_status,
    }
}

const fn pp(spelling: &'static str, directive: PpDirective, min_std: Option<LangStd>, gnu_only: bool) -> Entry {
    Entry {
        spelling,
        kind: Kind::Directive(directive),
        is_preprocessor: true,
        min_std,
        gnu_only,
        spelling_form: SpellingForm::Neutral,
        c23_status: C23Status::None,
    }
}

use C23Status::{Deprecated, None as NoC23Status, Removed};
use SpellingForm::{NewForm, Neutral, OldForm};

/// The full keyword/directive table. Order matters only in that the first
/// matching `(spelling, is_preprocessor)` pair wins; since every spelling
/// maps to at most one entry per context here, ordering is otherwise
/// immaterial.
pub static KEYWORDS: &[Entry] = &[
    // Core C89 language keywords.
    kw("auto", Keyword::Auto, None, false, Neutral, NoC23Status),
    kw("break", Keyword::Break, None, false, Neutral, NoC23Status),
    kw("case", Keyword::Case, None, false, Neutral, NoC23Status),
    kw("char", Keyword::Char, None, false, Neutral, NoC23Status),
    kw("const", Keyword::Const, None, false, Neutral, NoC23Status),
    kw("continue", Keyword::Continue, None, false, Neutral, NoC23Status),
    kw("default", Keyword::Default, None, false, Neutral, NoC23Status),
    kw("do", Keyword::Do, None, false, Neutral, NoC23Status),
    kw("double", Keyword::Double, None, false, Neutral, NoC23Status),
    kw("else", Keyword::Else, None, false, Neutral, NoC23Status),
    kw("enum", Keyword::Enum, None, false, Neutral, NoC23Status),
    kw("extern", Keyword::Extern, None, false, Neutral, NoC23Status),
    kw("float", Keyword::Float, None, false, Neutral, NoC23Status),
    kw("for", Keyword::For, None, false, Neutral, NoC23Status),
    kw("goto", Keyword::Goto, None, false, Neutral, NoC23Status),
    kw("if", Keyword::If, None, false, Neutral, NoC23Status),
    kw("int", Keyword::Int, None, false, Neutral, NoC23Status),
    kw("long", Keyword::Long, None, false, Neutral, NoC23Status),
    kw("register", Keyword::Register, None, false, Neutral, NoC23Status),
    kw("return", Keyword::Return, None, false, Neutral, NoC23Status),
    kw("short", Keyword::Short, None, false, Neutral, NoC23Status),
    kw("signed", Keyword::Signed, None, false, Neutral, NoC23Status),
    kw("sizeof", Keyword::Sizeof, None, false, Neutral, NoC23Status),
    kw("static", Keyword::Static, None, false, Neutral, NoC23Status),
    kw("struct", Keyword::Struct, None, false, Neutral, NoC23Status),
    kw("switch", Keyword::Switch, None, false, Neutral, NoC23Status),
    kw("typedef", Keyword::Typedef, None, false, Neutral, NoC23Status),
    kw("union", Keyword::Union, None, false, Neutral, NoC23Status),
    kw("unsigned", Keyword::Unsigned, None, false, Neutral, NoC23Status),
    kw("void", Keyword::Void, None, false, Neutral, NoC23Status),
    kw("volatile", Keyword::Volatile, None, false, Neutral, NoC23Status),
    kw("while", Keyword::While, None, false, Neutral, NoC23Status),
    // C99 additions.
    kw("inline", Keyword::Inline, Some(LangStd::C99), false, Neutral, NoC23Status),
    kw("restrict", Keyword::Restrict, Some(LangStd::C99), false, Neutral, NoC23Status),
    kw("_Bool", Keyword::Bool, Some(LangStd::C99), false, OldForm, NoC23Status),
    kw("_Complex", Keyword::Complex, Some(LangStd::C99), false, Neutral, NoC23Status),
    kw("_Imaginary", Keyword::Imaginary, Some(LangStd::C99), false, Neutral, Removed),
    // C11 additions.
    kw("_Alignas", Keyword::Alignas, Some(LangStd::C11), false, OldForm, NoC23Status),
    kw("_Alignof", Keyword::Alignof, Some(LangStd::C11), false, OldForm, NoC23Status),
    kw("_Atomic", Keyword::Atomic, Some(LangStd::C11), false, Neutral, NoC23Status),
    kw("_Generic", Keyword::Generic, Some(LangStd::C11), false, Neutral, NoC23Status),
    kw("_Noreturn", Keyword::Noreturn, Some(LangStd::C11), false, OldForm, Deprecated),
    kw("_Static_assert", Keyword::StaticAssert, Some(LangStd::C11), false, OldForm, NoC23Status),
    kw("_Thread_local", Keyword::ThreadLocal, Some(LangStd::C11), false, OldForm, NoC23Status),
    // C23 additions / new-form spellings.
    kw("bool", Keyword::Bool, Some(LangStd::C23), false, NewForm, NoC23Status),
    kw("alignas", Keyword::Alignas, Some(LangStd::C23), false, NewForm, NoC23Status),
    kw("alignof", Keyword::Alignof, Some(LangStd::C23), false, NewForm, NoC23Status),
    kw("static_assert", Keyword::StaticAssert, Some(LangStd::C23), false, NewForm, NoC23Status),
    kw("thread_local", Keyword::ThreadLocal, Some(LangStd::C23), false, NewForm, NoC23Status),
    kw("true", Keyword::True, Some(LangStd::C23), false, Neutral, NoC23Status),
    kw("false", Keyword::False, Some(LangStd::C23), false, Neutral, NoC23Status),
    kw("nullptr", Keyword::Nullptr, Some(LangStd::C23), false, Neutral, NoC23Status),
    kw("typeof", Keyword::Typeof, Some(LangStd::C23), false, Neutral, NoC23Status),
    kw("typeof_unqual", Keyword::TypeofUnqual, Some(LangStd::C23), false, Neutral, NoC23Status),
    kw("constexpr", Keyword::Constexpr, Some(LangStd::C23), false, Neutral, NoC23Status),
    // GNU extensions and spelling aliases.
    kw("asm", Keyword::Asm, None, true, Neutral, NoC23Status),
    kw("__asm__", Keyword::Asm, None, true, Neutral, NoC23Status),
    kw("__attribute__", Keyword::Attribute, None, true, Neutral, NoC23Status),
    kw("__extension__", Keyword::Extension, None, true, Neutral, NoC23Status),
    kw("__typeof__", Keyword::Typeof, None, true, Neutral, NoC23Status),
    kw("__inline__", Keyword::Inline, None, true, Neutral, NoC23Status),
    kw("__inline", Keyword::Inline, None, true, Neutral, NoC23Status),
    kw("__const__", Keyword::Const, None, true, Neutral, NoC23Status),
    kw("__volatile__", Keyword::Volatile, None, true, Neutral, NoC23Status),
    kw("__signed__", Keyword::Signed, None, true, Neutral, NoC23Status),
    kw("__restrict__", Keyword::Restrict, None, true, Neutral, NoC23Status),
    // Preprocessor directive keywords.
    pp("include", PpDirective::Include, None, false),
    pp("include_next", PpDirective::IncludeNext, None, true),
    pp("define", PpDirective::Define, None, false),
    pp("undef", PpDirective::Undef, None, false),
    pp("if", PpDirective::If, None, false),
    pp("ifdef", PpDirective::Ifdef, None, false),
    pp("ifndef", PpDirective::Ifndef, None, false),
    pp("elif", PpDirective::Elif, None, false),
    pp("else", PpDirective::Else, None, false),
    pp("endif", PpDirective::Endif, None, false),
    pp("error", PpDirective::Error, None, false),
    pp("warning", PpDirective::Warning, Some(LangStd::C23), false),
    pp("line", PpDirective::Line, None, false),
    pp("pragma", PpDirective::Pragma, None, false),
    pp("import", PpDirective::Import, None, true),
    pp("embed", PpDirective::Embed, Some(LangStd::C23), false),
    pp("elifdef", PpDirective::ElifDef, Some(LangStd::C23), false),
    pp("elifndef", PpDirective::ElifNDef, Some(LangStd::C23), false),
    pp("__has_include", PpDirective::HasInclude, Some(LangStd::C23), false),
    pp("__has_c_attribute", PpDirective::HasCAttribute, Some(LangStd::C23), false),
    pp("__VA_OPT__", PpDirective::VaOpt, Some(LangStd::C23), false),
    pp("ident", PpDirective::Ident, None, true),
    pp("sccs", PpDirective::Sccs, None, true),
    pp("assert", PpDirective::Assert, None, true),
    pp("unassert", PpDirective::Unassert, None, true),
    pp("__assert", PpDirective::UnderscoreAssert, None, true),
    pp("__assert_any", PpDirective::UnderscoreAssertAny, None, true),
    pp("defined", PpDirective::Defined, None, false),
];

/// Classifies `spelling` under context `in_directive`: picks the first
/// entry whose `is_preprocessor` matches; failing that, if
/// `in_directive` is true, falls back to a wrong-context entry (a language
/// keyword used inside a directive, e.g. `sizeof` in `#if`); otherwise
/// (a preprocessor-only spelling like `defined` outside any directive)
/// returns `None`, meaning the spelling classifies as a plain identifier.
pub fn classify(spelling: &str, in_directive: bool) -> Option<&'static Entry> {
    let mut other: Option<&'static Entry> = None;
    for entry in KEYWORDS {
        if entry.spelling != spelling {
            continue;
        }
        if entry.is_preprocessor == in_directive {
            return Some(entry);
        }
        if other.is_none() {
            other = Some(entry);
        }
    }
    if in_directive {
        other
    } else {
        None
    }
}

/// The diagnostic-policy outcomes for a classified keyword's use, in the
/// priority order the lexer should emit them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeywordDiagnostic {
    GnuOnlyExtension,
    MinStdExtension(LangStd),
    DeprecatedOldForm,
    NewFormExtension,
    RemovedInC23,
}

/// Every diagnostic-policy condition that applies to `entry` under `ctx`.
pub fn keyword_diagnostics(entry: &Entry, ctx: &Context) -> Vec<KeywordDiagnostic> {
    let mut out = Vec::new();
    if entry.gnu_only && !ctx.gnu_extensions {
        out.push(KeywordDiagnostic::GnuOnlyExtension);
    }
    if let Some(min) = entry.min_std {
        if !ctx.std_at_least(min) && !ctx.gnu_extensions {
            out.push(KeywordDiagnostic::MinStdExtension(min));
        }
    }
    if entry.spelling_form == SpellingForm::OldForm && ctx.std_at_least(LangStd::C23) {
        out.push(KeywordDiagnostic::DeprecatedOldForm);
    }
    if entry.spelling_form == SpellingForm::NewForm && !ctx.std_at_least(LangStd::C23) {
        out.push(KeywordDiagnostic::NewFormExtension);
    }
    if entry.c23_status == C23Status::Removed && ctx.std_at_least(LangStd::C23) {
        out.push(KeywordDiagnostic::RemovedInC23);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;

    #[test]
    fn language_keyword_classifies_outside_directive() {
        let entry = classify("while", false).unwrap();
        assert_eq!(entry.kind, Kind::Keyword(Keyword::While));
    }

    #[test]
    fn defined_is_identifier_outside_directive() {
        assert!(classify("defined", false).is_none());
    }

    #[test]
    fn defined_classifies_inside_directive() {
        let entry = classify("defined", true).unwrap();
        assert_eq!(entry.kind, Kind::Directive(PpDirective::Defined));
    }

    #[test]
    fn if_picks_directive_entry_in_directive_context() {
        let entry = classify("if", true).unwrap();
        assert_eq!(entry.kind, Kind::Directive(PpDirective::If));
    }

    #[test]
    fn if_picks_keyword_entry_outside_directive() {
        let entry = classify("if", false).unwrap();
        assert_eq!(entry.kind, Kind::Keyword(Keyword::If));
    }

    #[test]
    fn language_keyword_degrades_to_wrong_context_fallback_in_directive() {
        // "sizeof" has no pp entry; used inside a directive it still
        // classifies as the language keyword rather than an identifier.
        let entry = classify("sizeof", true).unwrap();
        assert_eq!(entry.kind, Kind::Keyword(Keyword::Sizeof));
    }

    #[test]
    fn unknown_spelling_is_none() {
        assert!(classify("frobnicate", false).is_none());
        assert!(classify("frobnicate", true).is_none());
    }

    #[test]
    fn gnu_only_keyword_warns_outside_gnu_mode() {
        let entry = classify("__attribute__", false).unwrap();
        let ctx = Context::new(LangStd::C17);
        let diags = keyword_diagnostics(entry, &ctx);
        assert!(diags.contains(&KeywordDiagnostic::GnuOnlyExtension));
    }

    #[test]
    fn gnu_only_keyword_silent_in_gnu_mode() {
        let entry = classify("asm", false).unwrap();
        let ctx = Context::new(LangStd::C17).gnu(true);
        let diags = keyword_diagnostics(entry, &ctx);
        assert!(!diags.contains(&KeywordDiagnostic::GnuOnlyExtension));
    }

    #[test]
    fn old_form_deprecated_at_c23() {
        let entry = classify("_Bool", false).unwrap();
        let ctx = Context::new(LangStd::C23);
        let diags = keyword_diagnostics(entry, &ctx);
        assert!(diags.contains(&KeywordDiagnostic::DeprecatedOldForm));
    }

    #[test]
    fn new_form_is_extension_before_c23() {
        let entry = classify("bool", false).unwrap();
        let ctx = Context::new(LangStd::C17);
        let diags = keyword_diagnostics(entry, &ctx);
        assert!(diags.contains(&KeywordDiagnostic::NewFormExtension));
    }

    #[test]
    fn min_std_not_satisfied_warns_without_gnu() {
        let entry = classify("inline", false).unwrap();
        let ctx = Context::new(LangStd::C89);
        let diags = keyword_diagnostics(entry, &ctx);
        assert!(diags.contains(&KeywordDiagnostic::MinStdExtension(LangStd::C99)));
    }

    #[test]
    fn min_std_satisfied_by_gnu_even_pre_standard() {
        let entry = classify("inline", false).unwrap();
        let ctx = Context::new(LangStd::C89).gnu(true);
        let diags = keyword_diagnostics(entry, &ctx);
        assert!(!diags.iter().any(|d| matches!(d, KeywordDiagnostic::MinStdExtension(_))));
    }

    #[test]
    fn removed_feature_errors_at_c23() {
        let entry = classify("_Imaginary", false).unwrap();
        let ctx = Context::new(LangStd::C23);
        let diags = keyword_diagnostics(entry, &ctx);
        assert!(diags.contains(&KeywordDiagnostic::RemovedInC23));
    }

    #[test]
    fn every_entry_has_unique_spelling_per_context() {
        use std::collections::HashSet;
        let mut seen = HashSet::new();
        for e in KEYWORDS {
            assert!(seen.insert((e.spelling, e.is_preprocessor)), "duplicate entry for {}", e.spelling);
        }
    }
}
