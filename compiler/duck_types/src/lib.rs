//! Duck Types - type metadata and structural enumerable analysis.
//!
//! - [`TypeRegistry`]: the loaded type metadata every query runs against
//! - Member resolution: `find_public_method`, `find_public_property`,
//!   `find_implementation` (implemented on the registry)
//! - [`ShapeDetector`]: does a type expose `GetEnumerator` / `Current` /
//!   `MoveNext` (and optionally `Dispose`), directly or through the
//!   enumerable interfaces
//! - [`classify_disposal`]: how a `using` over an enumerator must dispose it
//!
//! Analysis takes `&TypeRegistry` and never mutates it, so any number of
//! threads may query the same registry.

mod disposal;
mod flags;
mod registry;
mod resolve;
mod shape;

#[cfg(test)]
mod test_data;

pub use disposal::{classify_disposal, DisposalStrategy};
pub use flags::{MemberFlags, TypeFlags};
pub use registry::{
    BaseChain, MemberEntry, MemberKind, MethodDecl, PropertyDecl, TypeDecl, TypeEntry, TypeKind,
    TypeList, TypeRegistry, WellKnownNames,
};
pub use shape::{AmbiguityPolicy, DetectPolicy, EnumerableInfo, EnumeratorInfo, InterfaceOrder, ShapeDetector};

#[cfg(test)]
mod thread_safety {
    use super::TypeRegistry;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn registry_is_send_and_sync() {
        assert_send_sync::<TypeRegistry>();
    }
}
