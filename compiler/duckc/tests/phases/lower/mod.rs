//! `foreach` lowering of the fixture sums, checked through the renderer.

use duck_lower::LowerError;
use duck_types::{DetectPolicy, InterfaceOrder};
use duckc::corpus::{Corpus, FixtureKind};
use duckc::pipeline::lower_sum;
use pretty_assertions::assert_eq;

use crate::common::{lower_error, render};

const LOOP: &str = "var enumerator = enumerable.GetEnumerator();
var sum = 0;
try
{
    while (true)
    {
        if (enumerator.MoveNext())
        {
            sum += enumerator.Current;
        }
        else
        {
            break;
        }
    }
}
";

#[test]
fn disposable_value_type_boxes_into_idisposable() {
    let corpus = Corpus::new();
    let expected = format!(
        "{LOOP}finally
{{
    ((IDisposable)enumerator).Dispose();
}}

return sum;"
    );
    assert_eq!(render(&corpus, FixtureKind::DisposableValueType), expected);
}

#[test]
fn disposable_reference_type_checks_for_null() {
    let corpus = Corpus::new();
    let expected = format!(
        "{LOOP}finally
{{
    if (enumerator != null)
    {{
        ((IDisposable)enumerator).Dispose();
    }}
}}

return sum;"
    );
    assert_eq!(render(&corpus, FixtureKind::DisposableReferenceType), expected);
}

#[test]
fn disposable_by_ref_like_calls_dispose_directly() {
    let corpus = Corpus::new();
    let expected = format!(
        "{LOOP}finally
{{
    enumerator.Dispose();
}}

return sum;"
    );
    assert_eq!(render(&corpus, FixtureKind::DisposableByRefLike), expected);
}

#[test]
fn not_disposable_value_type_is_rejected() {
    let corpus = Corpus::new();
    assert_eq!(
        lower_error(&corpus, FixtureKind::ValueType),
        "'ValueTypeEnumerator`1': type used in a using statement must be implicitly convertible to 'System.IDisposable'"
    );
}

#[test]
fn not_disposable_by_ref_like_is_rejected() {
    let corpus = Corpus::new();
    assert_eq!(
        lower_error(&corpus, FixtureKind::ByRefLike),
        "'ByRefLikeEnumerator`1': type used in a using statement must be implicitly convertible to 'System.IDisposable'"
    );
}

#[test]
fn errors_carry_codes_and_notes() {
    let corpus = Corpus::new();
    let error = lower_sum(
        corpus.registry(),
        corpus.fixture(FixtureKind::ValueType).enumerable,
        DetectPolicy::default(),
    )
    .unwrap_err();
    let diagnostic = error.to_diagnostic();

    assert_eq!(diagnostic.code, duck_diagnostic::ErrorCode::E2001);
    assert!(diagnostic.is_error());
    assert!(diagnostic.to_string().starts_with("error[E2001]: 'ValueTypeEnumerator`1'"));
}

#[test]
fn non_enumerables_are_reported_by_name() {
    let corpus = Corpus::new();
    let error = lower_sum(corpus.registry(), duck_ir::TypeId::INT, DetectPolicy::default()).unwrap_err();

    assert_eq!(
        error,
        LowerError::NotEnumerable {
            type_name: "int".to_string()
        }
    );
}

#[test]
fn interface_order_does_not_affect_direct_members() {
    let corpus = Corpus::new();
    let policy = DetectPolicy {
        interface_order: InterfaceOrder::NonGenericFirst,
        ..DetectPolicy::default()
    };
    let registry = corpus.registry();
    let enumerable = corpus.fixture(FixtureKind::DisposableValueType).enumerable;

    let default = lower_sum(registry, enumerable, DetectPolicy::default()).unwrap();
    let reordered = lower_sum(registry, enumerable, policy).unwrap();
    assert_eq!(
        default.render(registry, duck_fmt::FormatConfig::default()),
        reordered.render(registry, duck_fmt::FormatConfig::default())
    );
}
