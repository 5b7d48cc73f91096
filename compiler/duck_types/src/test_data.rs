//! Type fixtures shared by the unit tests of this crate.

use duck_ir::{MemberId, TypeId};

use crate::{MethodDecl, PropertyDecl, TypeDecl, TypeRegistry};

/// Registry populated with every fixture type.
pub(crate) struct Fixtures {
    pub registry: TypeRegistry,

    pub interface: TypeId,
    pub base: TypeId,
    pub base_method: MemberId,
    pub properties_and_methods: TypeId,
    pub method: MemberId,

    /// `Enumerable<int>` and its `Enumerator<int>`.
    pub enumerable_int: TypeId,
    pub enumerator_int: TypeId,
    pub explicit_enumerable: TypeId,
    /// `ExplicitEnumerable<int>`.
    pub explicit_enumerable_int: TypeId,
    pub range_enumerable: TypeId,
    pub range_enumerator: TypeId,

    pub missing_get_enumerator: TypeId,
    pub missing_current: TypeId,
    pub missing_current_enumerator: TypeId,
    /// `MissingMoveNextEnumerable<int>` and its enumerator.
    pub missing_move_next_int: TypeId,
    pub missing_move_next_enumerator_int: TypeId,

    /// Enumerator structs and classes over `int`, one per disposal shape.
    pub value_enumerator: TypeId,
    pub disposable_value_enumerator: TypeId,
    pub reference_enumerator: TypeId,
    pub disposable_reference_enumerator: TypeId,
    pub by_ref_like_enumerator: TypeId,
    pub disposable_by_ref_like_enumerator: TypeId,
    /// Declares `IDisposable` but, being stack-only, cannot convert to it.
    pub by_ref_like_with_interface: TypeId,

    /// Implements both `IEnumerable<int>` and `IEnumerable<string>`.
    pub dual_enumerable: TypeId,
}

impl Fixtures {
    pub fn new() -> Self {
        let mut registry = TypeRegistry::new();
        let r = &mut registry;

        // Members visible and invisible to public instance lookup.
        let interface = r.declare(TypeDecl::interface("IPropertiesAndMethods").in_namespace("TestData"));
        let explicit_property = r.add_property(interface, PropertyDecl::new("ExplicitProperty", TypeId::INT));
        let explicit_method = r.add_method(interface, MethodDecl::new("ExplicitMethod", TypeId::VOID));
        let explicit_method_2 = r.add_method(
            interface,
            MethodDecl::new("ExplicitMethod", TypeId::VOID).params(&[TypeId::INT, TypeId::STRING]),
        );

        let base = r.declare(TypeDecl::class("PropertiesAndMethodsBase").in_namespace("TestData"));
        r.add_property(base, PropertyDecl::new("InheritedProperty", TypeId::INT));
        r.add_method(base, MethodDecl::new("InheritedMethod", TypeId::VOID));
        r.add_method(
            base,
            MethodDecl::new("InheritedMethod", TypeId::VOID).params(&[TypeId::INT, TypeId::STRING]),
        );
        let base_method = r.add_method(base, MethodDecl::new("Method", TypeId::VOID));

        let properties_and_methods = r.declare(TypeDecl::class("PropertiesAndMethods").in_namespace("TestData"));
        r.set_base(properties_and_methods, base);
        r.add_interface(properties_and_methods, interface);
        r.add_property(properties_and_methods, PropertyDecl::new("Property", TypeId::INT));
        r.add_property(properties_and_methods, PropertyDecl::new("WriteOnly", TypeId::INT).write_only());
        r.add_property(
            properties_and_methods,
            PropertyDecl::new("ExplicitProperty", TypeId::INT).explicit(explicit_property),
        );
        r.add_property(properties_and_methods, PropertyDecl::new("StaticProperty", TypeId::INT).static_());
        let method = r.add_method(properties_and_methods, MethodDecl::new("Method", TypeId::VOID));
        r.add_method(
            properties_and_methods,
            MethodDecl::new("Method", TypeId::VOID).params(&[TypeId::INT, TypeId::STRING]),
        );
        r.add_method(
            properties_and_methods,
            MethodDecl::new("ExplicitMethod", TypeId::VOID).explicit(explicit_method),
        );
        r.add_method(
            properties_and_methods,
            MethodDecl::new("ExplicitMethod", TypeId::VOID)
                .params(&[TypeId::INT, TypeId::STRING])
                .explicit(explicit_method_2),
        );
        r.add_method(properties_and_methods, MethodDecl::new("StaticMethod", TypeId::VOID).static_());
        r.add_method(
            properties_and_methods,
            MethodDecl::new("StaticMethod", TypeId::VOID)
                .params(&[TypeId::INT, TypeId::STRING])
                .static_(),
        );
        r.add_method(properties_and_methods, MethodDecl::new("PrivateMethod", TypeId::VOID).private());

        // Enumerable<T> with a struct Enumerator<T>, no interfaces at all.
        let enumerator = r.declare(TypeDecl::value_type("Enumerator").in_namespace("TestData").generic(&["T"]));
        let t = r.generic_param(enumerator, 0);
        r.add_property(enumerator, PropertyDecl::new("Current", t));
        r.add_method(enumerator, MethodDecl::new("MoveNext", TypeId::BOOL));
        let enumerable = r.declare(TypeDecl::class("Enumerable").in_namespace("TestData").generic(&["T"]));
        let t = r.generic_param(enumerable, 0);
        let enumerator_of_t = r.instantiate(enumerator, &[t]);
        r.add_method(enumerable, MethodDecl::new("GetEnumerator", enumerator_of_t));
        let enumerable_int = r.instantiate(enumerable, &[TypeId::INT]);
        let enumerator_int = r.instantiate(enumerator, &[TypeId::INT]);

        // Only explicit IEnumerable.
        let ienumerable_get = r.members_of(TypeId::ENUMERABLE)[0];
        let explicit_enumerable = r.declare(TypeDecl::class("ExplicitEnumerable").in_namespace("TestData"));
        r.add_interface(explicit_enumerable, TypeId::ENUMERABLE);
        r.add_method(
            explicit_enumerable,
            MethodDecl::new("GetEnumerator", TypeId::ENUMERATOR).explicit(ienumerable_get),
        );

        // Only explicit IEnumerable<T> and IEnumerable.
        let explicit_generic = r.declare(
            TypeDecl::class("ExplicitEnumerable")
                .in_namespace("TestData")
                .generic(&["T"]),
        );
        let t = r.generic_param(explicit_generic, 0);
        let ienumerable_t = r.instantiate(TypeId::GENERIC_ENUMERABLE, &[t]);
        let ienumerator_t = r.instantiate(TypeId::GENERIC_ENUMERATOR, &[t]);
        r.add_interface(explicit_generic, ienumerable_t);
        let generic_get = r.members_of(ienumerable_t)[0];
        r.add_method(
            explicit_generic,
            MethodDecl::new("GetEnumerator", ienumerator_t).explicit(generic_get),
        );
        r.add_method(
            explicit_generic,
            MethodDecl::new("GetEnumerator", TypeId::ENUMERATOR).explicit(ienumerable_get),
        );
        let explicit_enumerable_int = r.instantiate(explicit_generic, &[TypeId::INT]);

        // Non-generic enumerable with a nested struct enumerator.
        let range_enumerable = r.declare(TypeDecl::class("RangeEnumerable").in_namespace("TestData"));
        let range_enumerator = r.declare(TypeDecl::value_type("Enumerator").nested_in(range_enumerable));
        r.add_property(range_enumerator, PropertyDecl::new("Current", TypeId::INT));
        r.add_method(range_enumerator, MethodDecl::new("MoveNext", TypeId::BOOL));
        r.add_method(range_enumerable, MethodDecl::new("GetEnumerator", range_enumerator));

        // Incomplete shapes.
        let missing_get_enumerator = r.declare(TypeDecl::class("MissingGetEnumeratorEnumerable").in_namespace("TestData"));

        let missing_current_enumerator = r.declare(TypeDecl::class("MissingCurrentEnumerator").in_namespace("TestData"));
        r.add_method(missing_current_enumerator, MethodDecl::new("MoveNext", TypeId::BOOL));
        let missing_current = r.declare(TypeDecl::class("MissingCurrentEnumerable").in_namespace("TestData"));
        r.add_method(missing_current, MethodDecl::new("GetEnumerator", missing_current_enumerator));

        let missing_move_next_enumerator = r.declare(
            TypeDecl::class("MissingMoveNextEnumerator")
                .in_namespace("TestData")
                .generic(&["T"]),
        );
        let t = r.generic_param(missing_move_next_enumerator, 0);
        r.add_property(missing_move_next_enumerator, PropertyDecl::new("Current", t));
        let missing_move_next = r.declare(
            TypeDecl::class("MissingMoveNextEnumerable")
                .in_namespace("TestData")
                .generic(&["T"]),
        );
        let t = r.generic_param(missing_move_next, 0);
        let enumerator_of_t = r.instantiate(missing_move_next_enumerator, &[t]);
        r.add_method(missing_move_next, MethodDecl::new("GetEnumerator", enumerator_of_t));
        let missing_move_next_int = r.instantiate(missing_move_next, &[TypeId::INT]);
        let missing_move_next_enumerator_int = r.instantiate(missing_move_next_enumerator, &[TypeId::INT]);

        // Disposal shapes.
        let value_enumerator = int_enumerator(r, TypeDecl::value_type("ValueTypeEnumerator"), false);
        let disposable_value_enumerator = int_enumerator(r, TypeDecl::value_type("DisposableValueTypeEnumerator"), true);
        let reference_enumerator = int_enumerator(r, TypeDecl::class("ReferenceTypeEnumerator"), false);
        let disposable_reference_enumerator =
            int_enumerator(r, TypeDecl::class("DisposableReferenceTypeEnumerator"), true);
        let by_ref_like_enumerator = int_enumerator(r, TypeDecl::by_ref_like("ByRefLikeEnumerator"), false);

        let disposable_by_ref_like_enumerator =
            int_enumerator(r, TypeDecl::by_ref_like("DisposableByRefLikeEnumerator"), false);
        r.add_method(disposable_by_ref_like_enumerator, MethodDecl::new("Dispose", TypeId::VOID));

        let by_ref_like_with_interface =
            int_enumerator(r, TypeDecl::by_ref_like("InterfaceByRefLikeEnumerator"), false);
        r.add_interface(by_ref_like_with_interface, TypeId::DISPOSABLE);

        // Two IEnumerable<T> instantiations, no direct GetEnumerator.
        let dual_enumerable = r.declare(TypeDecl::class("DualEnumerable").in_namespace("TestData"));
        let ienumerable_int = r.instantiate(TypeId::GENERIC_ENUMERABLE, &[TypeId::INT]);
        let ienumerable_string = r.instantiate(TypeId::GENERIC_ENUMERABLE, &[TypeId::STRING]);
        let ienumerator_int = r.instantiate(TypeId::GENERIC_ENUMERATOR, &[TypeId::INT]);
        let ienumerator_string = r.instantiate(TypeId::GENERIC_ENUMERATOR, &[TypeId::STRING]);
        r.add_interface(dual_enumerable, ienumerable_int);
        r.add_interface(dual_enumerable, ienumerable_string);
        let get_int = r.members_of(ienumerable_int)[0];
        let get_string = r.members_of(ienumerable_string)[0];
        r.add_method(
            dual_enumerable,
            MethodDecl::new("GetEnumerator", ienumerator_int).explicit(get_int),
        );
        r.add_method(
            dual_enumerable,
            MethodDecl::new("GetEnumerator", ienumerator_string).explicit(get_string),
        );
        r.add_method(
            dual_enumerable,
            MethodDecl::new("GetEnumerator", TypeId::ENUMERATOR).explicit(ienumerable_get),
        );

        Fixtures {
            registry,
            interface,
            base,
            base_method,
            properties_and_methods,
            method,
            enumerable_int,
            enumerator_int,
            explicit_enumerable,
            explicit_enumerable_int,
            range_enumerable,
            range_enumerator,
            missing_get_enumerator,
            missing_current,
            missing_current_enumerator,
            missing_move_next_int,
            missing_move_next_enumerator_int,
            value_enumerator,
            disposable_value_enumerator,
            reference_enumerator,
            disposable_reference_enumerator,
            by_ref_like_enumerator,
            disposable_by_ref_like_enumerator,
            by_ref_like_with_interface,
            dual_enumerable,
        }
    }
}

/// Declare an `int` enumerator (`Current: int`, `MoveNext(): bool`),
/// optionally implementing `IDisposable` with a public `Dispose()`.
fn int_enumerator(registry: &mut TypeRegistry, decl: TypeDecl<'_>, disposable: bool) -> TypeId {
    let ty = registry.declare(decl.in_namespace("TestData"));
    registry.add_property(ty, PropertyDecl::new("Current", TypeId::INT));
    registry.add_method(ty, MethodDecl::new("MoveNext", TypeId::BOOL));
    if disposable {
        let dispose = registry.members_of(TypeId::DISPOSABLE)[0];
        registry.add_interface(ty, TypeId::DISPOSABLE);
        registry.add_method(ty, MethodDecl::new("Dispose", TypeId::VOID).implements(dispose));
    }
    ty
}
