//! Driver commands.
//!
//! Each command returns its report as a `String` so `main` only decides
//! where it goes and which exit code to use.

mod options;

use std::fmt::Write as _;

use duck_diagnostic::ErrorCode;
use duck_types::{classify_disposal, DisposalStrategy, ShapeDetector, TypeRegistry};
use duck_ir::MemberId;
use rayon::prelude::*;

use crate::corpus::{Corpus, Fixture, FixtureKind};
use crate::error::DriverError;
use crate::pipeline::{lower_sum, run_sum};

pub use options::{parse_policy, DriverOptions};

/// Shape and disposal report for the given fixtures, in order.
///
/// Detection runs on the rayon pool; the registry is shared read-only.
pub fn inspect(corpus: &Corpus, kinds: &[FixtureKind], options: &DriverOptions) -> String {
    let reports: Vec<String> = kinds
        .par_iter()
        .map(|&kind| inspect_fixture(corpus, corpus.fixture(kind), options))
        .collect();
    reports.join("\n")
}

fn inspect_fixture(corpus: &Corpus, fixture: Fixture, options: &DriverOptions) -> String {
    let registry = corpus.registry();
    let (found, info) = ShapeDetector::with_policy(registry, options.policy).is_enumerable(fixture.enumerable);

    let mut out = String::new();
    let verdict = if found { "enumerable" } else { "not enumerable" };
    let _ = writeln!(out, "{} ({}): {verdict}", registry.display_name(fixture.enumerable), fixture.kind);
    let _ = writeln!(out, "  GetEnumerator: {}", describe(registry, info.get_enumerator));
    let _ = writeln!(out, "  Current:       {}", describe(registry, info.enumerator.current));
    let _ = writeln!(out, "  MoveNext:      {}", describe(registry, info.enumerator.move_next));
    let _ = writeln!(out, "  Dispose:       {}", describe(registry, info.enumerator.dispose));
    if let Some(enumerator) = info.enumerator_type() {
        let disposal = match classify_disposal(registry, enumerator) {
            DisposalStrategy::ValueType => "through IDisposable (value type)",
            DisposalStrategy::ReferenceType => "through IDisposable, null-guarded",
            DisposalStrategy::ByRefLike { .. } => "direct Dispose() call (stack-only type)",
            DisposalStrategy::NotDisposable => "not disposable",
        };
        let _ = writeln!(out, "  disposal:      {disposal}");
    }
    out
}

/// `Type.Member` of a resolved member, or `-`.
fn describe(registry: &TypeRegistry, member: Option<MemberId>) -> String {
    member.map_or_else(
        || "-".to_string(),
        |member| {
            let entry = registry.member(member);
            format!(
                "{}.{}: {}",
                registry.display_name(entry.declaring_type),
                registry.lookup(entry.name),
                registry.display_name(entry.value_type())
            )
        },
    )
}

/// Rendered lowering of the sum over `kind`.
pub fn lower(corpus: &Corpus, kind: FixtureKind, options: &DriverOptions) -> Result<String, DriverError> {
    let registry = corpus.registry();
    let program = lower_sum(registry, corpus.fixture(kind).enumerable, options.policy)?;
    Ok(program.render(registry, options.format))
}

/// Result of running the sum over `source`.
pub fn run(corpus: &Corpus, kind: FixtureKind, source: &[i64], options: &DriverOptions) -> Result<String, DriverError> {
    let outcome = run_sum(corpus, kind, source, options.policy)?;
    Ok(format!(
        "sum = {}\nenumerator disposed {} time(s)",
        outcome.sum, outcome.disposals
    ))
}

/// One-line description of an error code, or `None` when it is unknown.
pub fn explain(code: &str) -> Option<String> {
    let code = code.parse::<ErrorCode>().ok()?;
    Some(format!("{code}: {}", code.description()))
}
