//! Handles into the type registry.
//!
//! `TypeId` and `MemberId` are plain indices; the entries they point at live
//! in `duck_types::TypeRegistry`. Keeping the handles here lets the
//! expression IR name types and members without depending on the registry.

use std::fmt;

/// Handle of a registered type.
///
/// # Pre-registered Types
/// The registry registers the well-known types first, in this order, so
/// their handles are compile-time constants.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    pub const VOID: TypeId = TypeId(0);
    pub const BOOL: TypeId = TypeId(1);
    pub const INT: TypeId = TypeId(2);
    pub const STRING: TypeId = TypeId(3);
    pub const OBJECT: TypeId = TypeId(4);
    /// `System.ValueType`, the base of every struct.
    pub const VALUE_TYPE: TypeId = TypeId(5);
    /// `System.IDisposable`.
    pub const DISPOSABLE: TypeId = TypeId(6);
    /// `System.Collections.IEnumerator`.
    pub const ENUMERATOR: TypeId = TypeId(7);
    /// `System.Collections.IEnumerable`.
    pub const ENUMERABLE: TypeId = TypeId(8);
    /// `System.Collections.Generic.IEnumerator<T>` (open definition).
    pub const GENERIC_ENUMERATOR: TypeId = TypeId(9);
    /// `System.Collections.Generic.IEnumerable<T>` (open definition).
    pub const GENERIC_ENUMERABLE: TypeId = TypeId(10);

    /// Number of pre-registered types.
    pub const WELL_KNOWN_COUNT: u32 = 11;

    /// Create from a raw index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        TypeId(index)
    }

    /// Get the index into the registry.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this handle is one of the pre-registered types.
    #[inline]
    pub const fn is_well_known(self) -> bool {
        self.0 < Self::WELL_KNOWN_COUNT
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TypeId::VOID => write!(f, "TypeId::VOID"),
            TypeId::BOOL => write!(f, "TypeId::BOOL"),
            TypeId::INT => write!(f, "TypeId::INT"),
            TypeId::STRING => write!(f, "TypeId::STRING"),
            TypeId::OBJECT => write!(f, "TypeId::OBJECT"),
            TypeId::DISPOSABLE => write!(f, "TypeId::DISPOSABLE"),
            _ => write!(f, "TypeId({})", self.0),
        }
    }
}

/// Handle of a registered method or property.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct MemberId(u32);

impl MemberId {
    /// Create from a raw index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        MemberId(index)
    }

    /// Get the index into the registry.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemberId({})", self.0)
    }
}
