//! The sum program: lower, render and run
//! `var sum = 0; foreach (var item in enumerable) sum += item; return sum;`.

use duck_eval::{Heap, Interpreter};
use duck_fmt::{format_lambda_body, FormatConfig};
use duck_ir::{ExprArena, ExprId, TypeId};
use duck_lower::{Builder, ForEachPlan, LowerError};
use duck_types::{DetectPolicy, TypeRegistry};

use crate::corpus::{Corpus, FixtureKind};
use crate::error::DriverError;

/// A lowered `int (enumerable) => sum` lambda and the arena that holds it.
#[derive(Debug)]
pub struct SumProgram {
    pub arena: ExprArena,
    pub root: ExprId,
}

impl SumProgram {
    pub fn render(&self, registry: &TypeRegistry, config: FormatConfig) -> String {
        format_lambda_body(&self.arena, registry, self.root, config)
    }
}

/// Lower the sum over an enumerable of `enumerable_type`.
pub fn lower_sum(registry: &TypeRegistry, enumerable_type: TypeId, policy: DetectPolicy) -> Result<SumProgram, LowerError> {
    let mut arena = ExprArena::new();
    let mut b = Builder::new(&mut arena, registry).with_policy(policy);

    let enumerable = b.parameter("enumerable", enumerable_type);
    let sum = b.variable("sum", TypeId::INT);
    let zero = b.int(0);
    let init = b.assign(sum, zero);
    let plan = ForEachPlan {
        locals: vec![sum],
        preamble: vec![init],
        result: Some(sum),
    };
    let body = b.lower_foreach(enumerable, plan, |b, binding| {
        let current = binding.current(b);
        b.add_assign(sum, current)
    })?;
    let root = b.lambda(&[enumerable], body);

    Ok(SumProgram { arena, root })
}

/// Outcome of running the sum program once.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SumRun {
    pub sum: i64,
    /// Times the enumerator was disposed.
    pub disposals: i64,
}

/// Lower and run the sum over a fresh fixture enumerable holding `source`.
pub fn run_sum(corpus: &Corpus, kind: FixtureKind, source: &[i64], policy: DetectPolicy) -> Result<SumRun, DriverError> {
    let registry = corpus.registry();
    let program = lower_sum(registry, corpus.fixture(kind).enumerable, policy)?;

    let mut heap = Heap::new();
    let enumerable = corpus.new_enumerable(&mut heap, kind, source);
    let sum = Interpreter::new(&program.arena, registry, corpus.natives(), &mut heap)
        .invoke(program.root, &[duck_eval::Value::Object(enumerable)])?
        .as_int()?;
    let disposals = corpus.disposals(&heap, enumerable)?;

    tracing::debug!(fixture = %kind, sum, disposals, "ran sum");
    Ok(SumRun { sum, disposals })
}
