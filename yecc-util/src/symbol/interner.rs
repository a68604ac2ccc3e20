//! The interner backing [`Symbol`](super::Symbol).
//!
//! Storage is an [`indexmap::IndexSet`]: insertion order is preserved and
//! never reshuffled by further inserts, so a [`Symbol`](super::Symbol)'s
//! index into the set is stable for the interner's whole lifetime — the
//! append-only, reference-stable arena the lexer's data model requires,
//! without needing unsafe code or a `'static` leak.

use super::Symbol;
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

/// Snapshot of interner statistics for profiling.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InternerStats {
    pub count: usize,
    pub capacity: usize,
}

impl InternerStats {
    pub fn load_factor(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.count as f64 / self.capacity as f64
        }
    }
}

/// An append-only string interner, owned by a single compilation.
pub struct Interner {
    strings: IndexSet<Box<str>, FxBuildHasher>,
}

impl Interner {
    pub fn new() -> Self {
        Self {
            strings: IndexSet::with_hasher(FxBuildHasher::default()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            strings: IndexSet::with_capacity_and_hasher(capacity, FxBuildHasher::default()),
        }
    }

    /// Interns `s`, returning its stable [`Symbol`]. Interning the same
    /// bytes twice returns the same symbol.
    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(idx) = self.strings.get_index_of(s) {
            return Symbol(idx as u32);
        }
        let (idx, inserted) = self.strings.insert_full(s.into());
        debug_assert!(inserted);
        Symbol(idx as u32)
    }

    /// Resolves a symbol back to its string.
    ///
    /// # Panics
    ///
    /// Panics if `symbol` was not produced by this interner.
    pub fn resolve(&self, symbol: Symbol) -> &str {
        self.strings
            .get_index(symbol.0 as usize)
            .expect("symbol not produced by this interner")
            .as_ref()
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn stats(&self) -> InternerStats {
        InternerStats {
            count: self.strings.len(),
            capacity: self.strings.capacity(),
        }
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_string_same_symbol() {
        let mut i = Interner::new();
        let a = i.intern("hello");
        let b = i.intern("hello");
        assert_eq!(a, b);
    }

    #[test]
    fn different_strings_different_symbols() {
        let mut i = Interner::new();
        let a = i.intern("hello");
        let b = i.intern("world");
        assert_ne!(a, b);
    }

    #[test]
    fn resolve_round_trips() {
        let mut i = Interner::new();
        let sym = i.intern("identifier_42");
        assert_eq!(i.resolve(sym), "identifier_42");
    }

    #[test]
    fn indices_stable_across_inserts() {
        let mut i = Interner::new();
        let first = i.intern("a");
        i.intern("b");
        i.intern("c");
        assert_eq!(i.resolve(first), "a");
        assert_eq!(first.as_u32(), 0);
    }

    #[test]
    fn empty_string() {
        let mut i = Interner::new();
        let sym = i.intern("");
        assert_eq!(i.resolve(sym), "");
    }

    #[test]
    fn unicode_strings() {
        let mut i = Interner::new();
        for s in ["你好", "世界", "🦀", "こんにちは", "Привет"] {
            let sym = i.intern(s);
            assert_eq!(i.resolve(sym), s);
        }
    }

    #[test]
    fn long_string() {
        let mut i = Interner::new();
        let long = "a".repeat(10_000);
        let sym = i.intern(&long);
        assert_eq!(i.resolve(sym), long.as_str());
    }

    #[test]
    fn stats_reflect_count() {
        let mut i = Interner::new();
        i.intern("a");
        i.intern("b");
        i.intern("a");
        let stats = i.stats();
        assert_eq!(stats.count, 2);
        assert!(stats.capacity >= stats.count);
        assert!(stats.load_factor() > 0.0 && stats.load_factor() <= 1.0);
    }

    #[test]
    fn many_strings_stress() {
        let mut i = Interner::new();
        let mut symbols = Vec::new();
        for n in 0..1000 {
            symbols.push(i.intern(&format!("sym_{n}")));
        }
        for (n, sym) in symbols.iter().enumerate() {
            assert_eq!(i.resolve(*sym), format!("sym_{n}"));
        }
    }
}
