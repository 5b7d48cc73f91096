//! `using` lowering.
//!
//! `using (resource) body` becomes `try { body } finally { dispose }`, where
//! the dispose statement depends on how the resource's type is disposed:
//!
//! ```text
//! value type      ((IDisposable)resource).Dispose();
//! reference type  if (resource != null) { ((IDisposable)resource).Dispose(); }
//! stack-only      resource.Dispose();
//! ```
//!
//! Value types are never null, so they skip the guard. Stack-only types cannot
//! be converted to an interface, so their own `Dispose()` is called directly.

use duck_ir::{ExprId, TypeId};
use duck_types::{classify_disposal, DisposalStrategy};

use crate::{Builder, LowerError};

impl Builder<'_> {
    /// Wrap `body` so `variable` is disposed when it exits.
    ///
    /// `variable` must be a bound variable or parameter; its type decides the
    /// disposal. Fails without adding any node when the type has no disposal
    /// contract.
    pub fn using(&mut self, variable: ExprId, body: ExprId) -> Result<ExprId, LowerError> {
        debug_assert!(self.arena().kind(variable).is_binding(), "using over a non-variable");
        let ty = self.ty(variable);
        let strategy = classify_disposal(self.registry(), ty);
        let dispose = self.dispose(variable, strategy).ok_or_else(|| LowerError::NotDisposable {
            type_name: self.registry().metadata_name(ty),
        })?;
        Ok(self.try_finally(body, dispose))
    }

    /// The dispose statement for `variable` under `strategy`;
    /// `None` for `NotDisposable`.
    pub(crate) fn dispose(&mut self, variable: ExprId, strategy: DisposalStrategy) -> Option<ExprId> {
        let statement = match strategy {
            DisposalStrategy::ValueType => self.interface_dispose(variable),
            DisposalStrategy::ReferenceType => {
                let ty = self.ty(variable);
                let null = self.null(ty);
                let not_null = self.not_equal(variable, null);
                let call = self.interface_dispose(variable);
                self.if_then(not_null, call)
            }
            DisposalStrategy::ByRefLike { dispose } => self.call(variable, dispose, &[]),
            DisposalStrategy::NotDisposable => return None,
        };
        tracing::trace!(?strategy, "built dispose statement");
        Some(statement)
    }

    /// `((IDisposable)variable).Dispose()`.
    fn interface_dispose(&mut self, variable: ExprId) -> ExprId {
        let dispose = self.registry().dispose_method();
        let receiver = self.convert(variable, TypeId::DISPOSABLE);
        self.call(receiver, dispose, &[])
    }
}
