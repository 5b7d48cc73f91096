//! Variable storage for the interpreter.
//!
//! Uses a scope stack (not cloning). Bindings are keyed by the `ExprId` of
//! the `Parameter` or `Variable` node that declares them, so two locals
//! with the same name in nested blocks never collide.

use duck_ir::ExprId;
use rustc_hash::FxHashMap;

use crate::value::Value;

/// Bindings of one block or lambda.
#[derive(Clone, Debug, Default)]
struct Scope {
    /// `None` until the variable's first assignment.
    bindings: FxHashMap<ExprId, Option<Value>>,
}

/// Why a lookup or assignment failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BindingError {
    /// Declared but never assigned.
    Unassigned,
    /// Not declared in any enclosing scope.
    Undeclared,
}

#[derive(Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope::default()],
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    #[inline]
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Pop the innermost scope; the outermost one is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    fn current(&mut self) -> &mut Scope {
        if self.scopes.is_empty() {
            self.scopes.push(Scope::default());
        }
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// Declare an unassigned variable in the current scope.
    pub fn declare(&mut self, binding: ExprId) {
        self.current().bindings.insert(binding, None);
    }

    /// Declare and assign in the current scope.
    pub fn define(&mut self, binding: ExprId, value: Value) {
        self.current().bindings.insert(binding, Some(value));
    }

    pub fn lookup(&self, binding: ExprId) -> Result<Value, BindingError> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.bindings.get(&binding))
            .ok_or(BindingError::Undeclared)?
            .ok_or(BindingError::Unassigned)
    }

    pub fn assign(&mut self, binding: ExprId, value: Value) -> Result<(), BindingError> {
        let slot = self
            .scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.bindings.get_mut(&binding))
            .ok_or(BindingError::Undeclared)?;
        *slot = Some(value);
        Ok(())
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
