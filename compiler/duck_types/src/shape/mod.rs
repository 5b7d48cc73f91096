//! Enumerable-shape detection.
//!
//! A type is enumerable when it exposes a parameterless `GetEnumerator()`
//! whose return type exposes a readable `Current` and a parameterless
//! `bool MoveNext()`. The members may be declared on the types themselves
//! (no interface needed) or reached through the enumerable interfaces,
//! including explicit implementations that public lookup cannot see.
//!
//! Detection never fails with an error: it returns `false` together with
//! whatever it found, so callers can report exactly which member is missing.

use duck_ir::{MemberId, TypeId};

use crate::disposal::by_ref_like_dispose;
use crate::registry::TypeRegistry;

/// Order in which the enumerable interfaces are probed for `GetEnumerator`
/// when the type has no public one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum InterfaceOrder {
    /// `IEnumerable<T>` before `IEnumerable`.
    #[default]
    GenericFirst,
    /// `IEnumerable` before `IEnumerable<T>`.
    NonGenericFirst,
}

/// What to do when a type implements several `IEnumerable<T>` instantiations
/// and declares no public `GetEnumerator`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AmbiguityPolicy {
    /// Use the first instantiation in interface declaration order.
    #[default]
    FirstDeclared,
    /// Treat the generic contract as unusable; only `IEnumerable` may match.
    Reject,
}

/// Tie-break configuration for the detector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DetectPolicy {
    pub interface_order: InterfaceOrder,
    pub ambiguity: AmbiguityPolicy,
}

/// What was found on an enumerator type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct EnumeratorInfo {
    pub enumerator_type: Option<TypeId>,
    pub current: Option<MemberId>,
    pub move_next: Option<MemberId>,
    /// Only resolved once `Current` and `MoveNext` were both found.
    pub dispose: Option<MemberId>,
    /// Type of `Current`.
    pub item_type: Option<TypeId>,
}

/// What was found on an enumerable type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct EnumerableInfo {
    /// Type declaring the resolved `GetEnumerator` (an interface when it was
    /// reached through one).
    pub enumerable_type: Option<TypeId>,
    pub get_enumerator: Option<MemberId>,
    pub enumerator: EnumeratorInfo,
}

impl EnumerableInfo {
    #[inline]
    pub fn enumerator_type(&self) -> Option<TypeId> {
        self.enumerator.enumerator_type
    }

    #[inline]
    pub fn item_type(&self) -> Option<TypeId> {
        self.enumerator.item_type
    }
}

/// Structural detector over a registry.
#[derive(Copy, Clone, Debug)]
pub struct ShapeDetector<'r> {
    registry: &'r TypeRegistry,
    policy: DetectPolicy,
}

impl<'r> ShapeDetector<'r> {
    /// Detector with the default policy.
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self::with_policy(registry, DetectPolicy::default())
    }

    pub fn with_policy(registry: &'r TypeRegistry, policy: DetectPolicy) -> Self {
        ShapeDetector { registry, policy }
    }

    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    pub fn policy(&self) -> DetectPolicy {
        self.policy
    }

    /// Whether `ty` can be enumerated with `foreach`.
    ///
    /// The descriptor is always returned; on failure it holds the members
    /// that were found before the missing one.
    #[tracing::instrument(level = "debug", skip_all, fields(ty = ?ty))]
    pub fn is_enumerable(&self, ty: TypeId) -> (bool, EnumerableInfo) {
        let registry = self.registry;
        let mut info = EnumerableInfo::default();

        let Some(get_enumerator) = self.find_get_enumerator(ty) else {
            tracing::debug!("no GetEnumerator");
            return (false, info);
        };
        let enumerator_type = registry.value_type_of(get_enumerator);
        info.enumerable_type = Some(registry.declaring_type(get_enumerator));
        info.get_enumerator = Some(get_enumerator);

        let (found, enumerator) = self.is_enumerator(enumerator_type);
        info.enumerator = enumerator;
        (found, info)
    }

    /// Whether `ty` exposes `Current` and `MoveNext` (an enumerator shape).
    #[tracing::instrument(level = "debug", skip_all, fields(ty = ?ty))]
    pub fn is_enumerator(&self, ty: TypeId) -> (bool, EnumeratorInfo) {
        let registry = self.registry;
        let mut info = EnumeratorInfo {
            enumerator_type: Some(ty),
            ..EnumeratorInfo::default()
        };

        info.current = self.find_current(ty);
        info.item_type = info.current.map(|current| registry.value_type_of(current));
        info.move_next = self.find_move_next(ty);

        if info.current.is_none() || info.move_next.is_none() {
            tracing::debug!(
                current = info.current.is_some(),
                move_next = info.move_next.is_some(),
                "incomplete enumerator"
            );
            return (false, info);
        }

        info.dispose = self.find_dispose(ty);
        (true, info)
    }

    fn find_get_enumerator(&self, ty: TypeId) -> Option<MemberId> {
        let registry = self.registry;
        let name = registry.well_known().get_enumerator;
        if let Some(direct) = registry.find_public_method(ty, name, &[]) {
            return Some(direct);
        }

        let (first, second) = match self.policy.interface_order {
            InterfaceOrder::GenericFirst => (TypeId::GENERIC_ENUMERABLE, TypeId::ENUMERABLE),
            InterfaceOrder::NonGenericFirst => (TypeId::ENUMERABLE, TypeId::GENERIC_ENUMERABLE),
        };
        self.contract_member(ty, first)
            .or_else(|| self.contract_member(ty, second))
            .and_then(|contract| registry.find_public_method(contract, name, &[]))
    }

    fn find_current(&self, ty: TypeId) -> Option<MemberId> {
        let registry = self.registry;
        let name = registry.well_known().current;
        registry.find_public_property(ty, name).or_else(|| {
            self.contract_member(ty, TypeId::GENERIC_ENUMERATOR)
                .or_else(|| self.contract_member(ty, TypeId::ENUMERATOR))
                .and_then(|contract| registry.find_public_property(contract, name))
        })
    }

    fn find_move_next(&self, ty: TypeId) -> Option<MemberId> {
        let registry = self.registry;
        let name = registry.well_known().move_next;
        registry
            .find_public_method(ty, name, &[])
            .filter(|&member| registry.value_type_of(member) == TypeId::BOOL)
            .or_else(|| {
                self.contract_member(ty, TypeId::ENUMERATOR)
                    .and_then(|contract| registry.find_public_method(contract, name, &[]))
            })
    }

    fn find_dispose(&self, ty: TypeId) -> Option<MemberId> {
        let registry = self.registry;
        let name = registry.well_known().dispose;

        if registry.is_by_ref_like(ty) {
            return by_ref_like_dispose(registry, ty);
        }

        if !registry.is_assignable_to(ty, TypeId::DISPOSABLE) {
            return None;
        }
        registry
            .find_public_method(ty, name, &[])
            .or_else(|| registry.find_public_method(TypeId::DISPOSABLE, name, &[]))
    }

    /// The interface `ty` implements for the contract `definition`
    /// (a generic definition or a plain interface), per the ambiguity policy.
    fn contract_member(&self, ty: TypeId, definition: TypeId) -> Option<TypeId> {
        let registry = self.registry;
        if !registry.entry(definition).generic_params.is_empty() {
            let instances = registry.instantiations_of(ty, definition);
            return match (instances.as_slice(), self.policy.ambiguity) {
                ([], _) => None,
                ([single], _) => Some(*single),
                ([first, ..], AmbiguityPolicy::FirstDeclared) => {
                    tracing::debug!(count = instances.len(), "several instantiations, taking the first declared");
                    Some(*first)
                }
                (_, AmbiguityPolicy::Reject) => {
                    tracing::debug!(count = instances.len(), "several instantiations, rejected");
                    None
                }
            };
        }
        (ty == definition || registry.implements(ty, definition)).then_some(definition)
    }
}
