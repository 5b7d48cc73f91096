//! Type and member metadata flags.
//!
//! Flags are fixed when a type or member is registered, so every query the
//! resolver makes ("is this static?", "is this a stack-only type?") is a
//! bit test.

use bitflags::bitflags;

bitflags! {
    /// Facts about a registered type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TypeFlags: u16 {
        /// Copied by value (structs and primitives).
        const VALUE_TYPE = 1 << 0;
        /// Stack-only value type: cannot be boxed, cannot convert to an interface.
        const BY_REF_LIKE = 1 << 1;
        /// Interface contract.
        const INTERFACE = 1 << 2;
        /// Built-in primitive (`void`, `bool`, `int`, `string`, `object`).
        const PRIMITIVE = 1 << 3;
        /// Open generic definition (`Enumerable<>`).
        const GENERIC_DEFINITION = 1 << 4;
        /// Instantiation of a generic definition (`Enumerable<int>`).
        const GENERIC_INSTANCE = 1 << 5;
        /// Generic type parameter (`T`).
        const GENERIC_PARAM = 1 << 6;
        /// Cannot be instantiated directly.
        const ABSTRACT = 1 << 7;
    }
}

bitflags! {
    /// Facts about a registered method or property.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct MemberFlags: u8 {
        /// Part of the type's public surface.
        const PUBLIC = 1 << 0;
        /// Belongs to the type, not to instances.
        const STATIC = 1 << 1;
        /// Explicit interface implementation: reachable only through the interface.
        const EXPLICIT = 1 << 2;
        /// Property has a readable getter.
        const HAS_GETTER = 1 << 3;
    }
}

impl TypeFlags {
    /// Flags a generic instantiation inherits from its definition.
    pub fn for_instance(self) -> Self {
        (self - TypeFlags::GENERIC_DEFINITION) | TypeFlags::GENERIC_INSTANCE
    }
}

impl MemberFlags {
    /// Whether the member is visible on the public instance surface.
    #[inline]
    pub fn is_public_instance(self) -> bool {
        self.contains(MemberFlags::PUBLIC)
            && !self.intersects(MemberFlags::STATIC | MemberFlags::EXPLICIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_flags_drop_definition_bit() {
        let def = TypeFlags::VALUE_TYPE | TypeFlags::GENERIC_DEFINITION;
        let inst = def.for_instance();
        assert!(inst.contains(TypeFlags::VALUE_TYPE | TypeFlags::GENERIC_INSTANCE));
        assert!(!inst.contains(TypeFlags::GENERIC_DEFINITION));
    }

    #[test]
    fn static_and_explicit_members_are_not_public_instance() {
        assert!(MemberFlags::PUBLIC.is_public_instance());
        assert!(!(MemberFlags::PUBLIC | MemberFlags::STATIC).is_public_instance());
        assert!(!(MemberFlags::PUBLIC | MemberFlags::EXPLICIT).is_public_instance());
        assert!(!MemberFlags::empty().is_public_instance());
    }
}
