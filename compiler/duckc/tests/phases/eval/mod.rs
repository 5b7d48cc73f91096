//! Running the lowered sums.

use duck_types::DetectPolicy;
use duckc::corpus::{Corpus, FixtureKind};
use duckc::pipeline::{run_sum, SumRun};
use duckc::DriverError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::SOURCES;

const DISPOSABLE: [FixtureKind; 3] = [
    FixtureKind::DisposableValueType,
    FixtureKind::DisposableReferenceType,
    FixtureKind::DisposableByRefLike,
];

#[test]
fn sums_match_and_dispose_once() {
    let corpus = Corpus::new();
    for kind in DISPOSABLE {
        for source in SOURCES {
            let run = run_sum(&corpus, kind, source, DetectPolicy::default()).unwrap();
            assert_eq!(
                run,
                SumRun {
                    sum: source.iter().sum(),
                    disposals: 1
                },
                "{kind} over {source:?}"
            );
        }
    }
}

#[test]
fn five_elements_sum_to_fifteen() {
    let corpus = Corpus::new();
    let run = run_sum(&corpus, FixtureKind::DisposableValueType, &[1, 2, 3, 4, 5], DetectPolicy::default()).unwrap();
    assert_eq!(run.sum, 15);
}

#[test]
fn not_disposable_fixtures_never_run() {
    let corpus = Corpus::new();
    for kind in [FixtureKind::ValueType, FixtureKind::ByRefLike] {
        for source in SOURCES {
            let error = run_sum(&corpus, kind, source, DetectPolicy::default()).unwrap_err();
            assert!(matches!(error, DriverError::Lower(_)), "{kind}: {error}");
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sum_round_trips(
        source in prop::collection::vec(-1_000i64..1_000, 0..32),
        index in 0usize..3,
    ) {
        let corpus = Corpus::new();
        let run = run_sum(&corpus, DISPOSABLE[index], &source, DetectPolicy::default()).unwrap();
        prop_assert_eq!(run.sum, source.iter().sum::<i64>());
        prop_assert_eq!(run.disposals, 1);
    }
}
