//! The tree-walking interpreter.

use duck_ir::{Constant, ExprArena, ExprId, ExprKind, LabelId, MemberId};
use duck_types::TypeRegistry;
use smallvec::SmallVec;

use crate::environment::{BindingError, Environment};
use crate::error::{EvalError, EvalResult};
use crate::heap::Heap;
use crate::natives::NativeMethods;
use crate::value::Value;

/// Non-local exit from an expression.
#[derive(Debug)]
enum ControlAction {
    /// A `Break` travelling to the `Loop` that owns its label.
    Break(LabelId),
    Error(EvalError),
}

impl From<EvalError> for ControlAction {
    fn from(error: EvalError) -> Self {
        ControlAction::Error(error)
    }
}

impl ControlAction {
    /// A break that escaped every loop is an error at the top level.
    fn into_error(self) -> EvalError {
        match self {
            ControlAction::Break(_) => EvalError::InvalidBreak,
            ControlAction::Error(error) => error,
        }
    }
}

type Flow<T> = Result<T, ControlAction>;

/// Evaluates expression trees from one arena against one heap.
pub struct Interpreter<'a> {
    arena: &'a ExprArena,
    registry: &'a TypeRegistry,
    natives: &'a NativeMethods,
    heap: &'a mut Heap,
    env: Environment,
}

impl<'a> Interpreter<'a> {
    pub fn new(
        arena: &'a ExprArena,
        registry: &'a TypeRegistry,
        natives: &'a NativeMethods,
        heap: &'a mut Heap,
    ) -> Self {
        Interpreter {
            arena,
            registry,
            natives,
            heap,
            env: Environment::new(),
        }
    }

    pub fn heap(&self) -> &Heap {
        &*self.heap
    }

    pub fn heap_mut(&mut self) -> &mut Heap {
        &mut *self.heap
    }

    /// Call a lambda with `args` bound to its parameters, in order.
    #[tracing::instrument(level = "debug", skip_all, fields(lambda = ?lambda, args = args.len()))]
    pub fn invoke(&mut self, lambda: ExprId, args: &[Value]) -> EvalResult<Value> {
        let arena = self.arena;
        let ExprKind::Lambda { parameters, body } = *arena.kind(lambda) else {
            return Err(EvalError::InvalidHandle(format!("{lambda:?} is not a lambda")));
        };
        let parameters = arena.get_expr_list(parameters);
        if parameters.len() != args.len() {
            return Err(EvalError::ArgumentCount {
                expected: parameters.len(),
                found: args.len(),
            });
        }

        let result = self.scoped(|this| {
            for (&parameter, &arg) in parameters.iter().zip(args) {
                this.env.define(parameter, arg);
            }
            this.eval_expr(body)
        });
        let result = result.map_err(ControlAction::into_error);
        tracing::debug!(?result, "lambda returned");
        result
    }

    /// Evaluate a single expression in the current scope.
    pub fn eval(&mut self, id: ExprId) -> EvalResult<Value> {
        self.eval_expr(id).map_err(ControlAction::into_error)
    }

    fn scoped<T>(&mut self, f: impl FnOnce(&mut Self) -> Flow<T>) -> Flow<T> {
        self.env.push_scope();
        let result = f(self);
        self.env.pop_scope();
        result
    }

    fn eval_expr(&mut self, id: ExprId) -> Flow<Value> {
        let arena = self.arena;
        match *arena.kind(id) {
            ExprKind::Parameter { .. } | ExprKind::Variable { .. } => Ok(self.read(id)?),
            ExprKind::Constant(Constant::Int(n)) => Ok(Value::Int(n)),
            ExprKind::Constant(Constant::Bool(b)) => Ok(Value::Bool(b)),
            ExprKind::Constant(Constant::Null) => Ok(Value::Null),
            ExprKind::Assign { target, value } => {
                let value = self.eval_expr(value)?;
                self.write(target, value)?;
                Ok(value)
            }
            ExprKind::AddAssign { target, value } => {
                let increment = self.eval_expr(value)?.as_int()?;
                let sum = Value::Int(self.read(target)?.as_int()?.wrapping_add(increment));
                self.write(target, sum)?;
                Ok(sum)
            }
            ExprKind::Call {
                receiver,
                method,
                args,
            } => {
                let receiver = self.eval_expr(receiver)?;
                let mut values: SmallVec<[Value; 4]> = SmallVec::new();
                for &arg in arena.get_expr_list(args) {
                    values.push(self.eval_expr(arg)?);
                }
                Ok(self.call_member(receiver, method, &values)?)
            }
            ExprKind::Property { receiver, property } => {
                let receiver = self.eval_expr(receiver)?;
                Ok(self.call_member(receiver, property, &[])?)
            }
            ExprKind::Convert { operand } => self.eval_expr(operand),
            ExprKind::NotEqual { left, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                Ok(Value::Bool(left != right))
            }
            ExprKind::Block {
                variables,
                statements,
            } => self.scoped(|this| {
                for &variable in arena.get_expr_list(variables) {
                    this.env.declare(variable);
                }
                let mut last = Value::Void;
                for &statement in arena.get_expr_list(statements) {
                    last = this.eval_expr(statement)?;
                }
                Ok(last)
            }),
            ExprKind::IfThen {
                condition,
                then_branch,
            } => {
                if self.eval_expr(condition)?.as_bool()? {
                    self.eval_expr(then_branch)?;
                }
                Ok(Value::Void)
            }
            ExprKind::IfThenElse {
                condition,
                then_branch,
                else_branch,
            } => {
                let branch = if self.eval_expr(condition)?.as_bool()? {
                    then_branch
                } else {
                    else_branch
                };
                self.eval_expr(branch)?;
                Ok(Value::Void)
            }
            ExprKind::Loop { body, break_label } => loop {
                match self.eval_expr(body) {
                    Ok(_) => {}
                    Err(ControlAction::Break(label)) if label == break_label => return Ok(Value::Void),
                    Err(other) => return Err(other),
                }
            },
            ExprKind::Break { label } => Err(ControlAction::Break(label)),
            ExprKind::TryFinally { body, finally } => {
                let result = self.eval_expr(body);
                self.eval_expr(finally)?;
                result
            }
            ExprKind::Lambda { .. } => Err(EvalError::TypeMismatch {
                expected: "value",
                found: "lambda",
            }
            .into()),
        }
    }

    fn read(&self, binding: ExprId) -> EvalResult<Value> {
        self.env.lookup(binding).map_err(|e| self.binding_error(binding, e))
    }

    fn write(&mut self, binding: ExprId, value: Value) -> EvalResult<()> {
        self.env.assign(binding, value).map_err(|e| self.binding_error(binding, e))
    }

    #[cold]
    fn binding_error(&self, binding: ExprId, error: BindingError) -> EvalError {
        let name = match *self.arena.kind(binding) {
            ExprKind::Parameter { name } | ExprKind::Variable { name } => self.registry.lookup(name).to_string(),
            _ => format!("{binding:?}"),
        };
        match error {
            BindingError::Unassigned => EvalError::Unassigned(name),
            BindingError::Undeclared => EvalError::InvalidHandle(format!("'{name}' is not in scope")),
        }
    }

    /// Run the body of `member` for `receiver`, dispatching on its runtime type.
    fn call_member(&mut self, receiver: Value, member: MemberId, args: &[Value]) -> EvalResult<Value> {
        if receiver.is_null() {
            return Err(EvalError::NullReference(self.member_name(member)));
        }
        let target = match self.heap.runtime_type(receiver) {
            Some(runtime_ty) => self.registry.find_implementation(runtime_ty, member).unwrap_or(member),
            None => member,
        };
        if target != member {
            tracing::trace!(
                member = %self.member_name(member),
                target = %self.member_name(target),
                "dispatched"
            );
        }

        let natives = self.natives;
        let body = natives
            .get(target)
            .ok_or_else(|| EvalError::NoNativeBody(self.member_name(target)))?;
        body(&mut *self.heap, receiver, args)
    }

    fn member_name(&self, member: MemberId) -> String {
        let entry = self.registry.member(member);
        format!(
            "{}.{}",
            self.registry.display_name(entry.declaring_type),
            self.registry.lookup(entry.name)
        )
    }
}
