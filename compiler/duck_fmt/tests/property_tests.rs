//! Property-based tests for the renderer.
//!
//! Generated trees are checked for layout invariants that hold for every
//! input: indentation is a multiple of the configured width, braces
//! balance, and there is never trailing whitespace.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    reason = "Proptest macros generate code with these patterns"
)]

use duck_fmt::{format_lambda_body, FormatConfig};
use duck_ir::{ExprArena, ExprId, TypeId};
use duck_lower::{Builder, ForEachPlan};
use duck_types::{MethodDecl, PropertyDecl, TypeDecl, TypeRegistry};
use proptest::prelude::*;

fn identifier_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-zA-Z0-9_]{0,11}")
        .expect("valid regex")
        .prop_filter("not a keyword", |s| {
            !matches!(s.as_str(), "if" | "do" | "var" | "int" | "bool" | "null" | "true" | "false")
        })
}

/// Which shape of enumerator the generated registry declares.
#[derive(Debug, Clone, Copy)]
enum Flavor {
    Struct,
    Class,
    StackOnly,
}

fn flavor_strategy() -> impl Strategy<Value = Flavor> {
    prop_oneof![Just(Flavor::Struct), Just(Flavor::Class), Just(Flavor::StackOnly)]
}

fn registry_for(flavor: Flavor) -> (TypeRegistry, TypeId) {
    let mut registry = TypeRegistry::new();
    let decl = match flavor {
        Flavor::Struct => TypeDecl::value_type("Enumerator"),
        Flavor::Class => TypeDecl::class("Enumerator"),
        Flavor::StackOnly => TypeDecl::by_ref_like("Enumerator"),
    };
    let enumerator = registry.declare(decl);
    registry.add_property(enumerator, PropertyDecl::new("Current", TypeId::INT));
    registry.add_method(enumerator, MethodDecl::new("MoveNext", TypeId::BOOL));
    if !matches!(flavor, Flavor::StackOnly) {
        registry.add_interface(enumerator, TypeId::DISPOSABLE);
    }
    registry.add_method(enumerator, MethodDecl::new("Dispose", TypeId::VOID));
    let numbers = registry.declare(TypeDecl::class("Numbers"));
    registry.add_method(numbers, MethodDecl::new("GetEnumerator", enumerator));
    (registry, numbers)
}

/// `foreach` summing into `accumulator`, with the body wrapped in `depth`
/// nested `if (flag)` statements.
fn nested_sum(
    arena: &mut ExprArena,
    registry: &TypeRegistry,
    numbers: TypeId,
    accumulator: &str,
    depth: usize,
) -> ExprId {
    let mut b = Builder::new(arena, registry);
    let enumerable = b.parameter("enumerable", numbers);
    let flag = b.parameter("flag", TypeId::BOOL);
    let sum = b.variable(accumulator, TypeId::INT);
    let zero = b.int(0);
    let init = b.assign(sum, zero);
    let plan = ForEachPlan {
        locals: vec![sum],
        preamble: vec![init],
        result: Some(sum),
    };
    let body = b
        .lower_foreach(enumerable, plan, |b, binding| {
            let current = binding.current(b);
            let mut statement = b.add_assign(sum, current);
            for _ in 0..depth {
                statement = b.if_then(flag, statement);
            }
            statement
        })
        .expect("enumerator shape is complete");
    b.lambda(&[enumerable, flag], body)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn indentation_follows_configured_width(
        flavor in flavor_strategy(),
        indent in 1usize..9,
        depth in 0usize..5,
    ) {
        let (registry, numbers) = registry_for(flavor);
        let mut arena = ExprArena::new();
        let root = nested_sum(&mut arena, &registry, numbers, "sum", depth);
        let text = format_lambda_body(&arena, &registry, root, FormatConfig::with_indent_size(indent));

        for line in text.lines() {
            let leading = line.len() - line.trim_start().len();
            prop_assert_eq!(leading % indent, 0, "misaligned line {:?}", line);
            prop_assert_eq!(line.trim_end(), line);
        }
        prop_assert!(!text.ends_with('\n'));
        prop_assert_eq!(text.matches('{').count(), text.matches('}').count());
    }

    #[test]
    fn accumulator_is_introduced_and_returned(
        flavor in flavor_strategy(),
        name in identifier_strategy(),
    ) {
        let (registry, numbers) = registry_for(flavor);
        let mut arena = ExprArena::new();
        let root = nested_sum(&mut arena, &registry, numbers, &name, 0);
        let text = format_lambda_body(&arena, &registry, root, FormatConfig::default());

        let lines: Vec<&str> = text.lines().collect();
        let declaration = format!("var {} = 0;", name);
        let ret = format!("return {};", name);
        prop_assert_eq!(lines[1], declaration.as_str());
        prop_assert_eq!(lines.last().copied(), Some(ret.as_str()));
    }

    #[test]
    fn nesting_depth_sets_the_deepest_indent(depth in 0usize..6) {
        let (registry, numbers) = registry_for(Flavor::Struct);
        let mut arena = ExprArena::new();
        let root = nested_sum(&mut arena, &registry, numbers, "sum", depth);
        let text = format_lambda_body(&arena, &registry, root, FormatConfig::with_indent_size(1));

        let deepest = text.lines().map(|line| line.len() - line.trim_start().len()).max();
        // try, while and if(MoveNext) each add a level before the body.
        prop_assert_eq!(deepest, Some(3 + depth));
    }
}
