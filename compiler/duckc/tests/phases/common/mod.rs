//! Shared helpers for phase tests.

use duck_fmt::FormatConfig;
use duck_types::DetectPolicy;
use duckc::corpus::{Corpus, FixtureKind};
use duckc::pipeline::lower_sum;

/// The element arrays every run test is repeated with.
pub const SOURCES: [&[i64]; 3] = [&[], &[1], &[1, 2, 3, 4, 5]];

/// Render the sum lowering over `kind`, panicking on lowering errors.
pub fn render(corpus: &Corpus, kind: FixtureKind) -> String {
    let registry = corpus.registry();
    lower_sum(registry, corpus.fixture(kind).enumerable, DetectPolicy::default())
        .unwrap_or_else(|e| panic!("{kind}: {e}"))
        .render(registry, FormatConfig::default())
}

/// Message of the lowering error for `kind`, panicking if lowering succeeds.
pub fn lower_error(corpus: &Corpus, kind: FixtureKind) -> String {
    lower_sum(corpus.registry(), corpus.fixture(kind).enumerable, DetectPolicy::default())
        .err()
        .unwrap_or_else(|| panic!("{kind}: expected lowering to fail"))
        .to_string()
}
