use pretty_assertions::assert_eq;

use super::*;
use crate::test_data::Fixtures;
use crate::{MethodDecl, TypeDecl};

#[test]
fn classifies_each_enumerator_shape() {
    let f = Fixtures::new();
    let r = &f.registry;

    assert_eq!(classify_disposal(r, f.value_enumerator), DisposalStrategy::NotDisposable);
    assert_eq!(classify_disposal(r, f.disposable_value_enumerator), DisposalStrategy::ValueType);
    assert_eq!(classify_disposal(r, f.reference_enumerator), DisposalStrategy::NotDisposable);
    assert_eq!(
        classify_disposal(r, f.disposable_reference_enumerator),
        DisposalStrategy::ReferenceType
    );
    assert_eq!(classify_disposal(r, f.by_ref_like_enumerator), DisposalStrategy::NotDisposable);

    let strategy = classify_disposal(r, f.disposable_by_ref_like_enumerator);
    let DisposalStrategy::ByRefLike { dispose } = strategy else {
        panic!("expected by-ref-like disposal, got {strategy:?}");
    };
    assert_eq!(r.declaring_type(dispose), f.disposable_by_ref_like_enumerator);
    assert!(!strategy.converts_to_interface());
}

#[test]
fn stack_only_types_never_use_the_interface() {
    let f = Fixtures::new();
    assert_eq!(
        classify_disposal(&f.registry, f.by_ref_like_with_interface),
        DisposalStrategy::NotDisposable
    );
}

#[test]
fn interface_types_are_reference_disposable() {
    let f = Fixtures::new();
    let r = &f.registry;
    let (_, info) = crate::ShapeDetector::new(r).is_enumerable(f.explicit_enumerable_int);
    let enumerator = info.enumerator_type().unwrap_or_else(|| panic!("no enumerator"));

    assert_eq!(classify_disposal(r, enumerator), DisposalStrategy::ReferenceType);
    assert_eq!(classify_disposal(r, TypeId::ENUMERATOR), DisposalStrategy::NotDisposable);
}

#[test]
fn disposability_is_inherited_through_the_base_chain() {
    let mut r = TypeRegistry::new();
    let base = r.declare(TypeDecl::class("Resource"));
    r.add_interface(base, TypeId::DISPOSABLE);
    r.add_method(base, MethodDecl::new("Dispose", TypeId::VOID));
    let derived = r.declare(TypeDecl::class("DerivedResource"));
    r.set_base(derived, base);

    let strategy = classify_disposal(&r, derived);
    assert_eq!(strategy, DisposalStrategy::ReferenceType);
    assert!(strategy.is_disposable());
    assert!(strategy.converts_to_interface());
}

#[test]
fn private_dispose_does_not_count_on_stack_only_types() {
    let mut r = TypeRegistry::new();
    let span_enumerator = r.declare(TypeDecl::by_ref_like("SpanEnumerator"));
    r.add_method(span_enumerator, MethodDecl::new("Dispose", TypeId::VOID).private());
    r.add_method(
        span_enumerator,
        MethodDecl::new("Dispose", TypeId::VOID).params(&[TypeId::BOOL]),
    );

    assert_eq!(classify_disposal(&r, span_enumerator), DisposalStrategy::NotDisposable);
}
