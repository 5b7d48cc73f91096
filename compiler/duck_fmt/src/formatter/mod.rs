//! Statement and expression rendering.
//!
//! Statements are written line by line to an [`Emitter`]; expressions are
//! rendered to strings and embedded in those lines. Control flow always
//! takes braces on their own lines, and a blank line follows every
//! multi-line statement that is not the last of its list.

use duck_ir::{Constant, ExprArena, ExprId, ExprKind, ExprRange, TypeId};
use duck_types::TypeRegistry;
use rustc_hash::FxHashSet;

use crate::emitter::{Emitter, StringEmitter};

/// Renders an expression tree through an emitter.
pub struct Formatter<'a, E: Emitter> {
    arena: &'a ExprArena,
    registry: &'a TypeRegistry,
    emitter: E,
    level: usize,
    /// Block variables whose first assignment still has to introduce them with `var`.
    undeclared: FxHashSet<ExprId>,
}

impl<'a, E: Emitter> Formatter<'a, E> {
    pub fn new(arena: &'a ExprArena, registry: &'a TypeRegistry, emitter: E) -> Self {
        Formatter {
            arena,
            registry,
            emitter,
            level: 0,
            undeclared: FxHashSet::default(),
        }
    }

    /// Consume the formatter, returning its emitter.
    pub fn finish(self) -> E {
        self.emitter
    }

    /// Render a lambda's body (or `root` itself when it is not a lambda),
    /// ending in `return <value>;` when the body yields a value.
    pub fn lambda_body(&mut self, root: ExprId) {
        let body = match *self.arena.kind(root) {
            ExprKind::Lambda { body, .. } => body,
            _ => root,
        };
        let yields = self.arena.ty(body) != TypeId::VOID;
        match *self.arena.kind(body) {
            ExprKind::Block {
                variables,
                statements,
            } => self.block_statements(variables, statements, yields),
            _ if yields && self.is_expression(body) => self.return_statement(body),
            _ => self.statement(body),
        }
    }

    /// Render one statement at the current indentation.
    pub fn statement(&mut self, id: ExprId) {
        let kind = *self.arena.kind(id);
        match kind {
            ExprKind::Block {
                variables,
                statements,
            } => self.block_statements(variables, statements, false),
            ExprKind::IfThen {
                condition,
                then_branch,
            } => {
                let header = format!("if ({})", self.expr(condition));
                self.line(&header);
                self.braced(then_branch);
            }
            ExprKind::IfThenElse {
                condition,
                then_branch,
                else_branch,
            } => {
                let header = format!("if ({})", self.expr(condition));
                self.line(&header);
                self.braced(then_branch);
                self.line("else");
                self.braced(else_branch);
            }
            ExprKind::Loop { body, .. } => {
                self.line("while (true)");
                self.braced(body);
            }
            ExprKind::Break { .. } => self.line("break;"),
            ExprKind::TryFinally { body, finally } => {
                self.line("try");
                self.braced(body);
                self.line("finally");
                self.braced(finally);
            }
            ExprKind::Assign { target, value } if self.undeclared.remove(&target) => {
                let text = format!("var {} = {};", self.expr(target), self.expr(value));
                self.line(&text);
            }
            _ => {
                let text = format!("{};", self.expr(id));
                self.line(&text);
            }
        }
    }

    fn block_statements(&mut self, variables: ExprRange, statements: ExprRange, yields: bool) {
        let arena = self.arena;
        let statements = arena.get_expr_list(statements);
        self.declare_variables(arena.get_expr_list(variables), statements);

        for (i, &statement) in statements.iter().enumerate() {
            let last = i + 1 == statements.len();
            if last && yields && self.is_expression(statement) {
                self.return_statement(statement);
            } else {
                self.statement(statement);
            }
            if !last && self.is_multi_line(statement) {
                self.emitter.emit_newline();
            }
        }
    }

    /// Variables assigned directly in their block are introduced by `var` at
    /// that assignment; the rest get a typed declaration up front.
    fn declare_variables(&mut self, variables: &[ExprId], statements: &[ExprId]) {
        for &variable in variables {
            let assigned = statements.iter().any(|&statement| {
                matches!(*self.arena.kind(statement), ExprKind::Assign { target, .. } if target == variable)
            });
            if assigned {
                self.undeclared.insert(variable);
            } else {
                let declaration = format!(
                    "{} {};",
                    self.registry.display_name(self.arena.ty(variable)),
                    self.expr(variable)
                );
                self.line(&declaration);
            }
        }
    }

    fn return_statement(&mut self, value: ExprId) {
        let text = format!("return {};", self.expr(value));
        self.line(&text);
    }

    fn braced(&mut self, body: ExprId) {
        self.line("{");
        self.level += 1;
        self.statement(body);
        self.level -= 1;
        self.line("}");
    }

    fn line(&mut self, text: &str) {
        self.emitter.emit_indent(self.level);
        self.emitter.emit(text);
        self.emitter.emit_newline();
    }

    fn is_expression(&self, id: ExprId) -> bool {
        matches!(
            self.arena.kind(id),
            ExprKind::Parameter { .. }
                | ExprKind::Variable { .. }
                | ExprKind::Constant(_)
                | ExprKind::Assign { .. }
                | ExprKind::AddAssign { .. }
                | ExprKind::Call { .. }
                | ExprKind::Property { .. }
                | ExprKind::Convert { .. }
                | ExprKind::NotEqual { .. }
                | ExprKind::Lambda { .. }
        )
    }

    fn is_multi_line(&self, id: ExprId) -> bool {
        matches!(
            self.arena.kind(id),
            ExprKind::Block { .. }
                | ExprKind::IfThen { .. }
                | ExprKind::IfThenElse { .. }
                | ExprKind::Loop { .. }
                | ExprKind::TryFinally { .. }
        )
    }

    // Expressions

    /// Render an expression on a single line.
    pub fn expr(&self, id: ExprId) -> String {
        let registry = self.registry;
        match *self.arena.kind(id) {
            ExprKind::Parameter { name } | ExprKind::Variable { name } => registry.lookup(name).to_string(),
            ExprKind::Constant(Constant::Int(value)) => value.to_string(),
            ExprKind::Constant(Constant::Bool(value)) => value.to_string(),
            ExprKind::Constant(Constant::Null) => "null".to_string(),
            ExprKind::Assign { target, value } => format!("{} = {}", self.expr(target), self.expr(value)),
            ExprKind::AddAssign { target, value } => format!("{} += {}", self.expr(target), self.expr(value)),
            ExprKind::Call {
                receiver,
                method,
                args,
            } => {
                let args: Vec<String> = self.arena.get_expr_list(args).iter().map(|&arg| self.expr(arg)).collect();
                format!(
                    "{}.{}({})",
                    self.operand(receiver),
                    registry.lookup(registry.member(method).name),
                    args.join(", ")
                )
            }
            ExprKind::Property { receiver, property } => format!(
                "{}.{}",
                self.operand(receiver),
                registry.lookup(registry.member(property).name)
            ),
            ExprKind::Convert { operand } => format!(
                "({}){}",
                registry.display_name(self.arena.ty(id)),
                self.operand(operand)
            ),
            ExprKind::NotEqual { left, right } => format!("{} != {}", self.expr(left), self.expr(right)),
            ExprKind::Lambda { parameters, body } => {
                let parameters: Vec<String> = self
                    .arena
                    .get_expr_list(parameters)
                    .iter()
                    .map(|&parameter| self.expr(parameter))
                    .collect();
                format!("({}) => {}", parameters.join(", "), self.expr(body))
            }
            ExprKind::Block { .. }
            | ExprKind::IfThen { .. }
            | ExprKind::IfThenElse { .. }
            | ExprKind::Loop { .. }
            | ExprKind::Break { .. }
            | ExprKind::TryFinally { .. } => self.inline_statement(id),
        }
    }

    /// An expression in receiver or cast-operand position, parenthesized
    /// unless it is atomic.
    fn operand(&self, id: ExprId) -> String {
        let text = self.expr(id);
        match self.arena.kind(id) {
            ExprKind::Parameter { .. }
            | ExprKind::Variable { .. }
            | ExprKind::Constant(_)
            | ExprKind::Call { .. }
            | ExprKind::Property { .. } => text,
            _ => format!("({text})"),
        }
    }

    /// A statement in expression position, braced on one line.
    fn inline_statement(&self, id: ExprId) -> String {
        let mut nested = Formatter::new(self.arena, self.registry, StringEmitter::with_indent_size(0));
        nested.statement(id);
        let text = nested.finish().output();
        let body: Vec<&str> = text.lines().map(str::trim).filter(|line| !line.is_empty()).collect();
        format!("{{ {} }}", body.join(" "))
    }
}
