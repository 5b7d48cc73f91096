//! Public instance member resolution.
//!
//! Lookup order for a class or struct: the type itself, then each base
//! class, most derived first. For an interface: the interface, then its
//! inherited interfaces breadth-first. The first match wins, so an override
//! or a hiding member on a derived type beats the base declaration.
//!
//! Only `PUBLIC`, non-`STATIC`, non-`EXPLICIT` members are candidates.
//! Method parameter lists must match exactly; there are no conversions.

use duck_ir::{MemberId, Name, TypeId};
use smallvec::SmallVec;

use crate::registry::{MemberEntry, MemberKind, TypeRegistry};

impl TypeRegistry {
    /// Types searched for members of `ty`, in priority order.
    fn lookup_scopes(&self, ty: TypeId) -> SmallVec<[TypeId; 8]> {
        if self.is_interface(ty) {
            let mut scopes = SmallVec::new();
            scopes.push(ty);
            scopes.extend(self.all_interfaces(ty));
            scopes
        } else {
            self.base_chain(ty).collect()
        }
    }

    fn find_public(&self, ty: TypeId, matches: impl Fn(&MemberEntry) -> bool) -> Option<MemberId> {
        self.lookup_scopes(ty).into_iter().find_map(|scope| {
            self.members_of(scope).iter().copied().find(|&member| {
                let entry = self.member(member);
                entry.flags.is_public_instance() && matches(entry)
            })
        })
    }

    /// Find a public instance method by name and exact parameter list.
    pub fn find_public_method(&self, ty: TypeId, name: Name, params: &[TypeId]) -> Option<MemberId> {
        self.find_public(ty, |entry| {
            entry.name == name
                && matches!(&entry.kind, MemberKind::Method { params: p, .. } if p.as_slice() == params)
        })
    }

    /// Find a readable public instance property by name.
    pub fn find_public_property(&self, ty: TypeId, name: Name) -> Option<MemberId> {
        self.find_public(ty, |entry| {
            entry.name == name && entry.is_property() && entry.flags.contains(crate::MemberFlags::HAS_GETTER)
        })
    }

    /// The member that runs when `member` is invoked on an instance of `runtime_ty`.
    ///
    /// For an interface member: an implementation mapped to it on the runtime
    /// type or its bases (explicit or declared), else the public member with
    /// the same name and signature. For a class member: the most derived
    /// public member with the same name and signature.
    pub fn find_implementation(&self, runtime_ty: TypeId, member: MemberId) -> Option<MemberId> {
        let target = self.member(member);

        if self.is_interface(target.declaring_type) {
            let mapped = self.base_chain(runtime_ty).find_map(|scope| {
                self.members_of(scope)
                    .iter()
                    .copied()
                    .find(|&candidate| self.member(candidate).implements == Some(member))
            });
            if mapped.is_some() {
                return mapped;
            }
        }

        match &target.kind {
            MemberKind::Method { params, .. } => self.find_public_method(runtime_ty, target.name, params),
            MemberKind::Property { .. } => self.find_public_property(runtime_ty, target.name),
        }
    }

    /// Return type of a method, or type of a property.
    #[inline]
    pub fn value_type_of(&self, member: MemberId) -> TypeId {
        self.member(member).value_type()
    }

    /// Type that declares `member`.
    #[inline]
    pub fn declaring_type(&self, member: MemberId) -> TypeId {
        self.member(member).declaring_type
    }
}
