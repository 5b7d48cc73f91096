//! Typed node construction over an `ExprArena`.
//!
//! Every constructor computes the node's result type from the registry
//! (a call has its method's return type, a property read its property
//! type), so callers only name types where the IR cannot infer them:
//! declarations, conversions and `null`.

use duck_ir::{Constant, ExprArena, ExprId, ExprKind, LabelId, MemberId, Name, TypeId};
use duck_types::{DetectPolicy, TypeRegistry};

/// Builds expression trees into an arena, reading member types from a registry.
pub struct Builder<'a> {
    arena: &'a mut ExprArena,
    registry: &'a TypeRegistry,
    policy: DetectPolicy,
}

impl<'a> Builder<'a> {
    pub fn new(arena: &'a mut ExprArena, registry: &'a TypeRegistry) -> Self {
        Builder {
            arena,
            registry,
            policy: DetectPolicy::default(),
        }
    }

    /// Use `policy` when `lower_foreach` detects the enumerable shape.
    #[must_use]
    pub fn with_policy(mut self, policy: DetectPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    pub fn policy(&self) -> DetectPolicy {
        self.policy
    }

    pub fn arena(&self) -> &ExprArena {
        self.arena
    }

    /// Result type of a node already in the arena.
    #[inline]
    pub fn ty(&self, id: ExprId) -> TypeId {
        self.arena.ty(id)
    }

    fn push(&mut self, kind: ExprKind, ty: TypeId) -> ExprId {
        self.arena.push(kind, ty)
    }

    fn list(&mut self, ids: &[ExprId]) -> duck_ir::ExprRange {
        self.arena.push_expr_list(ids)
    }

    // Bindings

    pub fn parameter(&mut self, name: &str, ty: TypeId) -> ExprId {
        let name = self.registry.intern(name);
        self.push(ExprKind::Parameter { name }, ty)
    }

    /// Declare a local; it is scoped by the `block` that lists it.
    pub fn variable(&mut self, name: &str, ty: TypeId) -> ExprId {
        let name = self.registry.intern(name);
        self.variable_named(name, ty)
    }

    pub fn variable_named(&mut self, name: Name, ty: TypeId) -> ExprId {
        self.push(ExprKind::Variable { name }, ty)
    }

    // Literals

    pub fn int(&mut self, value: i64) -> ExprId {
        self.push(ExprKind::Constant(Constant::Int(value)), TypeId::INT)
    }

    pub fn bool(&mut self, value: bool) -> ExprId {
        self.push(ExprKind::Constant(Constant::Bool(value)), TypeId::BOOL)
    }

    /// `null` typed as `ty`.
    pub fn null(&mut self, ty: TypeId) -> ExprId {
        self.push(ExprKind::Constant(Constant::Null), ty)
    }

    // Assignment

    pub fn assign(&mut self, target: ExprId, value: ExprId) -> ExprId {
        debug_assert!(self.arena.kind(target).is_binding(), "assignment target must be a binding");
        let ty = self.ty(target);
        self.push(ExprKind::Assign { target, value }, ty)
    }

    pub fn add_assign(&mut self, target: ExprId, value: ExprId) -> ExprId {
        debug_assert!(self.arena.kind(target).is_binding(), "assignment target must be a binding");
        let ty = self.ty(target);
        self.push(ExprKind::AddAssign { target, value }, ty)
    }

    // Member access

    pub fn call(&mut self, receiver: ExprId, method: MemberId, args: &[ExprId]) -> ExprId {
        let entry = self.registry.member(method);
        debug_assert!(entry.is_method(), "{method:?} is not a method");
        debug_assert_eq!(entry.params().len(), args.len(), "argument count mismatch");
        let ty = entry.value_type();
        let args = self.list(args);
        self.push(
            ExprKind::Call {
                receiver,
                method,
                args,
            },
            ty,
        )
    }

    pub fn property(&mut self, receiver: ExprId, property: MemberId) -> ExprId {
        let entry = self.registry.member(property);
        debug_assert!(entry.is_property(), "{property:?} is not a property");
        let ty = entry.value_type();
        self.push(ExprKind::Property { receiver, property }, ty)
    }

    /// Convert `operand` to `ty` (boxing or interface cast).
    pub fn convert(&mut self, operand: ExprId, ty: TypeId) -> ExprId {
        self.push(ExprKind::Convert { operand }, ty)
    }

    pub fn not_equal(&mut self, left: ExprId, right: ExprId) -> ExprId {
        self.push(ExprKind::NotEqual { left, right }, TypeId::BOOL)
    }

    // Control flow

    /// Block scoping `variables`; its value (and type) is that of the last statement.
    pub fn block(&mut self, variables: &[ExprId], statements: &[ExprId]) -> ExprId {
        debug_assert!(
            variables.iter().all(|&v| matches!(self.arena.kind(v), ExprKind::Variable { .. })),
            "block variables must be Variable nodes"
        );
        let ty = statements.last().map_or(TypeId::VOID, |&last| self.ty(last));
        let variables = self.list(variables);
        let statements = self.list(statements);
        self.push(
            ExprKind::Block {
                variables,
                statements,
            },
            ty,
        )
    }

    pub fn if_then(&mut self, condition: ExprId, then_branch: ExprId) -> ExprId {
        self.push(
            ExprKind::IfThen {
                condition,
                then_branch,
            },
            TypeId::VOID,
        )
    }

    pub fn if_then_else(&mut self, condition: ExprId, then_branch: ExprId, else_branch: ExprId) -> ExprId {
        self.push(
            ExprKind::IfThenElse {
                condition,
                then_branch,
                else_branch,
            },
            TypeId::VOID,
        )
    }

    pub fn fresh_label(&mut self) -> LabelId {
        self.arena.fresh_label()
    }

    /// Infinite loop exited through `break_(break_label)`.
    pub fn loop_(&mut self, body: ExprId, break_label: LabelId) -> ExprId {
        self.push(ExprKind::Loop { body, break_label }, TypeId::VOID)
    }

    pub fn break_(&mut self, label: LabelId) -> ExprId {
        self.push(ExprKind::Break { label }, TypeId::VOID)
    }

    pub fn try_finally(&mut self, body: ExprId, finally: ExprId) -> ExprId {
        let ty = self.ty(body);
        self.push(ExprKind::TryFinally { body, finally }, ty)
    }

    /// Lambda over `parameters`; typed by what its body yields.
    pub fn lambda(&mut self, parameters: &[ExprId], body: ExprId) -> ExprId {
        debug_assert!(
            parameters.iter().all(|&p| matches!(self.arena.kind(p), ExprKind::Parameter { .. })),
            "lambda parameters must be Parameter nodes"
        );
        let ty = self.ty(body);
        let parameters = self.list(parameters);
        self.push(ExprKind::Lambda { parameters, body }, ty)
    }

    /// `while (condition) body`, as a loop whose body breaks when the
    /// condition is false:
    ///
    /// ```text
    /// while (true)
    /// {
    ///     if (condition) { body } else { break; }
    /// }
    /// ```
    pub fn while_loop(&mut self, condition: ExprId, body: ExprId) -> ExprId {
        debug_assert_eq!(self.ty(condition), TypeId::BOOL, "loop condition must be bool");
        let label = self.fresh_label();
        let exit = self.break_(label);
        let step = self.if_then_else(condition, body, exit);
        self.loop_(step, label)
    }
}

#[cfg(test)]
mod tests;
