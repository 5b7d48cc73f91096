//! Name table shared by the type registry and the lowering passes.
//!
//! Types and members are declared once while metadata loads and looked up
//! many times afterwards, often from several threads at once, so lookups
//! take a read lock and only first-time interning takes the write lock.

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Member and type names every enumerable probe asks for.
const PRELUDE: &[&str] = &[
    "GetEnumerator",
    "Current",
    "MoveNext",
    "Dispose",
    "Reset",
    "enumerable",
    "enumerator",
    "System",
    "System.Collections",
    "System.Collections.Generic",
    "Object",
    "ValueType",
    "IDisposable",
    "IEnumerable",
    "IEnumerator",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    #[error("name table is full ({count} names)")]
    TableFull { count: usize },
}

#[derive(Default)]
struct Table {
    slots: FxHashMap<&'static str, Name>,
    texts: Vec<&'static str>,
}

impl Table {
    fn insert(&mut self, text: &str) -> Result<Name, InternError> {
        if let Some(&name) = self.slots.get(text) {
            return Ok(name);
        }
        let count = self.texts.len();
        let index = u32::try_from(count)
            .ok()
            .filter(|&index| index <= Name::MAX_INDEX)
            .ok_or(InternError::TableFull { count })?;
        // Names live for the whole process; the registry never forgets a type.
        let text: &'static str = Box::leak(text.to_owned().into_boxed_str());
        let name = Name::from_index(index);
        self.texts.push(text);
        self.slots.insert(text, name);
        Ok(name)
    }
}

/// Deduplicating table of names.
pub struct StringInterner {
    table: RwLock<Table>,
}

impl StringInterner {
    /// An interner holding the empty name and the enumerable-pattern prelude.
    pub fn new() -> Self {
        let mut table = Table::default();
        for text in std::iter::once("").chain(PRELUDE.iter().copied()) {
            // The prelude is far below the table limit.
            let _ = table.insert(text);
        }
        StringInterner {
            table: RwLock::new(table),
        }
    }

    pub fn try_intern(&self, text: &str) -> Result<Name, InternError> {
        if let Some(&name) = self.table.read().slots.get(text) {
            return Ok(name);
        }
        self.table.write().insert(text)
    }

    /// Intern `text`.
    ///
    /// # Panics
    /// Panics once `u32::MAX` distinct names exist.
    pub fn intern(&self, text: &str) -> Name {
        self.try_intern(text).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Text of `name`.
    ///
    /// # Panics
    /// Panics if `name` came from a different interner with more entries.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table.read().texts[name.index()]
    }

    /// Number of distinct names, the empty name included.
    pub fn len(&self) -> usize {
        self.table.read().texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Anything that can turn a [`Name`] back into text.
pub trait StringLookup {
    fn lookup(&self, name: Name) -> &str;
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &str {
        StringInterner::lookup(self, name)
    }
}

/// Reference-counted handle to one [`StringInterner`].
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &StringInterner {
        &self.0
    }
}

impl StringLookup for SharedInterner {
    fn lookup(&self, name: Name) -> &str {
        self.0.lookup(name)
    }
}
