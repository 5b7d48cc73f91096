//! Disposal classification for `using` over an enumerator.

use duck_ir::{MemberId, TypeId};

use crate::registry::TypeRegistry;

/// How the `finally` of a `using` disposes its resource.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DisposalStrategy {
    /// Value type convertible to `IDisposable`: `((IDisposable)x).Dispose()`.
    ValueType,
    /// Reference type convertible to `IDisposable`: null-guarded interface call.
    ReferenceType,
    /// Stack-only type with a public `Dispose()`: direct call, never boxed.
    ByRefLike { dispose: MemberId },
    /// No disposal contract; `using` over it is an error.
    NotDisposable,
}

impl DisposalStrategy {
    #[inline]
    pub fn is_disposable(self) -> bool {
        !matches!(self, DisposalStrategy::NotDisposable)
    }

    /// Whether disposal goes through a conversion to `IDisposable`.
    #[inline]
    pub fn converts_to_interface(self) -> bool {
        matches!(self, DisposalStrategy::ValueType | DisposalStrategy::ReferenceType)
    }
}

/// Classify how a `using` over a value of type `ty` disposes it.
///
/// Stack-only types are checked first: they cannot convert to an interface,
/// so only a public parameterless `Dispose()` declared on them counts.
#[tracing::instrument(level = "debug", skip_all, fields(ty = %registry.display_name(ty)))]
pub fn classify_disposal(registry: &TypeRegistry, ty: TypeId) -> DisposalStrategy {
    let strategy = if registry.is_by_ref_like(ty) {
        by_ref_like_dispose(registry, ty)
            .map_or(DisposalStrategy::NotDisposable, |dispose| DisposalStrategy::ByRefLike { dispose })
    } else if registry.is_assignable_to(ty, TypeId::DISPOSABLE) {
        if registry.is_value_type(ty) {
            DisposalStrategy::ValueType
        } else {
            DisposalStrategy::ReferenceType
        }
    } else {
        DisposalStrategy::NotDisposable
    };

    tracing::debug!(?strategy, "classified");
    strategy
}

/// Public parameterless `Dispose()` declared on a stack-only type.
pub(crate) fn by_ref_like_dispose(registry: &TypeRegistry, ty: TypeId) -> Option<MemberId> {
    let name = registry.well_known().dispose;
    registry.members_of(ty).iter().copied().find(|&member| {
        let entry = registry.member(member);
        entry.name == name && entry.is_method() && entry.params().is_empty() && entry.flags.is_public_instance()
    })
}

#[cfg(test)]
mod tests;
