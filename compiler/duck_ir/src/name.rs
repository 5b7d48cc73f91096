//! Interned identifiers for type, member and local names.

use std::fmt;

/// An identifier interned by [`StringInterner`](crate::StringInterner).
///
/// Indexes the interner's string table. Two names from the same interner are
/// equal exactly when their text is.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// The empty string, present in every interner at slot 0.
    pub const EMPTY: Name = Name(0);

    /// Largest slot an interner hands out.
    pub const MAX_INDEX: u32 = u32::MAX - 1;

    #[inline]
    pub(crate) const fn from_index(index: u32) -> Self {
        Name(index)
    }

    /// Slot of this name in its interner's table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name#{}", self.0)
    }
}
