//! `foreach` lowering over a structurally detected enumerable.
//!
//! ```text
//! {
//!     var enumerator = enumerable.GetEnumerator();
//!     <preamble>
//!     try
//!     {
//!         while (true)
//!         {
//!             if (enumerator.MoveNext()) { <body> } else { break; }
//!         }
//!     }
//!     finally { <dispose enumerator> }
//!     <result>
//! }
//! ```
//!
//! The enumerable's shape and the enumerator's disposal are both checked
//! before any node is added, so a failed lowering leaves nothing behind.

use duck_ir::{ExprId, MemberId, TypeId};
use duck_types::{classify_disposal, DisposalStrategy, ShapeDetector};

use crate::error::MissingMember;
use crate::{Builder, LowerError};

/// What the loop body can see of the current iteration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LoopBinding {
    /// The `enumerator` variable.
    pub enumerator: ExprId,
    /// The `Current` property to read the element through.
    pub current: MemberId,
    /// Type of `Current`.
    pub item_type: TypeId,
}

impl LoopBinding {
    /// `enumerator.Current`.
    pub fn current(&self, builder: &mut Builder<'_>) -> ExprId {
        builder.property(self.enumerator, self.current)
    }
}

/// Statements the caller places around the loop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ForEachPlan {
    /// Extra block-scoped variables, declared after `enumerator`.
    pub locals: Vec<ExprId>,
    /// Statements between `GetEnumerator()` and the `try`.
    pub preamble: Vec<ExprId>,
    /// Value of the whole block, after the `try`.
    pub result: Option<ExprId>,
}

impl Builder<'_> {
    /// Lower `foreach (var item in enumerable) body`.
    ///
    /// `enumerable` must be a bound variable or parameter. `body` is called
    /// once, after the shape and disposal checks passed, to build the
    /// per-element statement.
    #[tracing::instrument(level = "debug", skip_all, fields(ty = %self.registry().display_name(self.ty(enumerable))))]
    pub fn lower_foreach<F>(&mut self, enumerable: ExprId, plan: ForEachPlan, body: F) -> Result<ExprId, LowerError>
    where
        F: FnOnce(&mut Self, LoopBinding) -> ExprId,
    {
        let registry = self.registry();
        let enumerable_type = self.ty(enumerable);

        let (found, info) = ShapeDetector::with_policy(registry, self.policy()).is_enumerable(enumerable_type);
        let (Some(get_enumerator), Some(enumerator_type)) = (info.get_enumerator, info.enumerator_type()) else {
            return Err(LowerError::NotEnumerable {
                type_name: registry.display_name(enumerable_type),
            });
        };
        let (true, Some(current), Some(move_next)) = (found, info.enumerator.current, info.enumerator.move_next) else {
            let missing = if info.enumerator.current.is_none() {
                MissingMember::Current
            } else {
                MissingMember::MoveNext
            };
            return Err(LowerError::InvalidEnumerator {
                type_name: registry.display_name(enumerable_type),
                enumerator_name: registry.display_name(enumerator_type),
                missing,
            });
        };

        let strategy = classify_disposal(registry, enumerator_type);
        if strategy == DisposalStrategy::NotDisposable {
            return Err(LowerError::NotDisposable {
                type_name: registry.metadata_name(enumerator_type),
            });
        }

        let enumerator = self.variable("enumerator", enumerator_type);
        let acquire = self.call(enumerable, get_enumerator, &[]);
        let init = self.assign(enumerator, acquire);

        let binding = LoopBinding {
            enumerator,
            current,
            item_type: registry.value_type_of(current),
        };
        let step = body(self, binding);
        let has_next = self.call(enumerator, move_next, &[]);
        let looped = self.while_loop(has_next, step);
        let dispose = self.dispose(enumerator, strategy).ok_or_else(|| LowerError::NotDisposable {
            type_name: registry.metadata_name(enumerator_type),
        })?;
        let guarded = self.try_finally(looped, dispose);

        let mut variables = Vec::with_capacity(1 + plan.locals.len());
        variables.push(enumerator);
        variables.extend(plan.locals);

        let mut statements = Vec::with_capacity(3 + plan.preamble.len());
        statements.push(init);
        statements.extend(plan.preamble);
        statements.push(guarded);
        statements.extend(plan.result);

        tracing::debug!(?strategy, "lowered foreach");
        Ok(self.block(&variables, &statements))
    }
}
