use duck_ir::{ExprArena, ExprKind, TypeId};
use duck_types::{MethodDecl, PropertyDecl, TypeDecl, TypeRegistry};
use pretty_assertions::assert_eq;

use super::Builder;

#[test]
fn member_access_takes_member_types() {
    let mut registry = TypeRegistry::new();
    let counter = registry.declare(TypeDecl::class("Counter"));
    let next = registry.add_method(counter, MethodDecl::new("Next", TypeId::BOOL));
    let value = registry.add_property(counter, PropertyDecl::new("Value", TypeId::INT));

    let mut arena = ExprArena::new();
    let mut b = Builder::new(&mut arena, &registry);
    let receiver = b.parameter("counter", counter);
    let call = b.call(receiver, next, &[]);
    let read = b.property(receiver, value);

    assert_eq!(b.ty(receiver), counter);
    assert_eq!(b.ty(call), TypeId::BOOL);
    assert_eq!(b.ty(read), TypeId::INT);
}

#[test]
fn block_yields_its_last_statement() {
    let registry = TypeRegistry::new();
    let mut arena = ExprArena::new();
    let mut b = Builder::new(&mut arena, &registry);

    let sum = b.variable("sum", TypeId::INT);
    let zero = b.int(0);
    let init = b.assign(sum, zero);
    let block = b.block(&[sum], &[init, sum]);
    let empty = b.block(&[], &[]);

    assert_eq!(b.ty(block), TypeId::INT);
    assert_eq!(b.ty(empty), TypeId::VOID);

    let ExprKind::Block {
        variables,
        statements,
    } = *arena.kind(block)
    else {
        panic!("expected a block");
    };
    assert_eq!(arena.get_expr_list(variables), &[sum]);
    assert_eq!(arena.get_expr_list(statements), &[init, sum]);
}

#[test]
fn while_loop_breaks_on_false_condition() {
    let registry = TypeRegistry::new();
    let mut arena = ExprArena::new();
    let mut b = Builder::new(&mut arena, &registry);

    let flag = b.variable("flag", TypeId::BOOL);
    let body = b.bool(false);
    let stop = b.assign(flag, body);
    let looped = b.while_loop(flag, stop);

    let ExprKind::Loop { body, break_label } = *arena.kind(looped) else {
        panic!("expected a loop");
    };
    let ExprKind::IfThenElse {
        condition,
        then_branch,
        else_branch,
    } = *arena.kind(body)
    else {
        panic!("expected if/else inside the loop");
    };
    assert_eq!(condition, flag);
    assert_eq!(then_branch, stop);
    assert_eq!(*arena.kind(else_branch), ExprKind::Break { label: break_label });
}

#[test]
fn each_loop_gets_its_own_label() {
    let registry = TypeRegistry::new();
    let mut arena = ExprArena::new();
    let mut b = Builder::new(&mut arena, &registry);

    let condition = b.bool(true);
    let body = b.int(1);
    let outer = b.while_loop(condition, body);
    let inner = b.while_loop(condition, body);

    let label_of = |id| match *arena.kind(id) {
        ExprKind::Loop { break_label, .. } => break_label,
        ref other => panic!("expected a loop, got {other:?}"),
    };
    assert!(label_of(outer) != label_of(inner));
}
