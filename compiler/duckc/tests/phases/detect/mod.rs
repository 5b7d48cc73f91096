//! Shape detection over the fixture corpus.

use duck_types::{classify_disposal, DisposalStrategy, ShapeDetector};
use duckc::corpus::{Corpus, FixtureKind};
use pretty_assertions::assert_eq;
use rayon::prelude::*;

#[test]
fn enumerator_members_are_declared_on_the_enumerator() {
    let corpus = Corpus::new();
    let registry = corpus.registry();
    let detector = ShapeDetector::new(registry);

    for fixture in corpus.fixtures() {
        let (found, info) = detector.is_enumerable(fixture.enumerable);
        assert!(found);
        let get_enumerator = info.get_enumerator.unwrap();
        assert_eq!(registry.member(get_enumerator).declaring_type, fixture.enumerable);
        assert_eq!(info.enumerable_type, Some(fixture.enumerable));
        for member in [info.enumerator.current, info.enumerator.move_next] {
            assert_eq!(registry.member(member.unwrap()).declaring_type, fixture.enumerator);
        }
    }
}

#[test]
fn by_ref_like_enumerators_never_convert_to_idisposable() {
    let corpus = Corpus::new();
    let registry = corpus.registry();

    for kind in [FixtureKind::ByRefLike, FixtureKind::DisposableByRefLike] {
        let enumerator = corpus.fixture(kind).enumerator;
        assert!(registry.is_by_ref_like(enumerator));
        assert!(!registry.is_assignable_to(enumerator, duck_ir::TypeId::DISPOSABLE));
    }
    let DisposalStrategy::ByRefLike { dispose } =
        classify_disposal(registry, corpus.fixture(FixtureKind::DisposableByRefLike).enumerator)
    else {
        panic!("expected a direct Dispose()");
    };
    assert_eq!(registry.lookup(registry.member(dispose).name), "Dispose");
}

#[test]
fn concurrent_detection_agrees() {
    let corpus = Corpus::new();
    let fixture = corpus.fixture(FixtureKind::DisposableValueType);
    let expected = ShapeDetector::new(corpus.registry()).is_enumerable(fixture.enumerable);

    let results: Vec<_> = (0..64)
        .into_par_iter()
        .map(|_| ShapeDetector::new(corpus.registry()).is_enumerable(fixture.enumerable))
        .collect();
    assert!(results.iter().all(|result| *result == expected));
}
