//! String interner for identifiers and qualified names.
//!
//! One lock guards one table: the erasure core interns a modest number of
//! member and class names, and lookups dominate.

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

struct InternTable {
    map: FxHashMap<&'static str, Name>,
    strings: Vec<&'static str>,
}

impl InternTable {
    fn with_empty() -> Self {
        let mut table = InternTable {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        };
        table.map.insert("", Name::EMPTY);
        table.strings.push("");
        table
    }
}

/// Thread-safe string interner.
///
/// Interned strings live for the rest of the process, so [`lookup`](Self::lookup)
/// hands out `&'static str` without holding the lock.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

/// Interner shared between the type system and the lowering passes.
pub type SharedInterner = Arc<StringInterner>;

impl StringInterner {
    /// Create an interner holding only the empty string.
    pub fn new() -> Self {
        StringInterner {
            table: RwLock::new(InternTable::with_empty()),
        }
    }

    /// Create a shareable interner.
    pub fn shared() -> SharedInterner {
        Arc::new(Self::new())
    }

    /// Intern a string, returning its [`Name`].
    ///
    /// # Panics
    /// Panics once more than `u32::MAX` distinct strings are interned.
    pub fn intern(&self, s: &str) -> Name {
        if let Some(&name) = self.table.read().map.get(s) {
            return name;
        }

        let mut guard = self.table.write();
        if let Some(&name) = guard.map.get(s) {
            return name;
        }

        let Ok(raw) = u32::try_from(guard.strings.len()) else {
            panic!("string interner overflow: {} strings", guard.strings.len());
        };
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let name = Name::from_raw(raw);
        guard.map.insert(leaked, name);
        guard.strings.push(leaked);
        name
    }

    /// Look up an already-interned string without inserting it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.table.read().map.get(s).copied()
    }

    /// Resolve a [`Name`] to its text.
    ///
    /// Unknown names resolve to the empty string.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("")
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Always false: the empty string is pre-interned.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
