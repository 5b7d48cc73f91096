//! Fixture enumerables over `int` arrays.
//!
//! One generic `EnumerableWith<X>Enumerator<T>` per disposal flavour, each
//! returning an `<X>Enumerator<T>` from `GetEnumerator()`:
//!
//! | fixture                     | enumerator                  | disposal          |
//! |-----------------------------|-----------------------------|-------------------|
//! | `value-type`                | struct                      | none              |
//! | `disposable-value-type`     | struct, `IDisposable`       | boxed interface   |
//! | `disposable-reference-type` | class, `IDisposable`        | null-guarded call |
//! | `by-ref-like`               | `ref struct`                | none              |
//! | `disposable-by-ref-like`    | `ref struct`, `Dispose()`   | direct call       |
//!
//! Only the `int` instantiations get native bodies. At run time an
//! enumerable object holds `[items, disposals]` and its enumerators hold
//! `[items, index, owner]`; `Dispose()` bumps the owner's `disposals`.

use std::fmt;
use std::str::FromStr;

use duck_eval::{EvalResult, Heap, NativeMethods, ObjectRef, Value};
use duck_ir::{MemberId, TypeId};
use duck_types::{MethodDecl, PropertyDecl, TypeDecl, TypeRegistry};

const ITEMS: usize = 0;
const DISPOSALS: usize = 1;
const INDEX: usize = 1;
const OWNER: usize = 2;

/// Namespace of every fixture type.
pub const NAMESPACE: &str = "Duck.TestData";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FixtureKind {
    ValueType,
    DisposableValueType,
    DisposableReferenceType,
    ByRefLike,
    DisposableByRefLike,
}

impl FixtureKind {
    pub const ALL: [FixtureKind; 5] = [
        FixtureKind::ValueType,
        FixtureKind::DisposableValueType,
        FixtureKind::DisposableReferenceType,
        FixtureKind::ByRefLike,
        FixtureKind::DisposableByRefLike,
    ];

    /// Command-line spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            FixtureKind::ValueType => "value-type",
            FixtureKind::DisposableValueType => "disposable-value-type",
            FixtureKind::DisposableReferenceType => "disposable-reference-type",
            FixtureKind::ByRefLike => "by-ref-like",
            FixtureKind::DisposableByRefLike => "disposable-by-ref-like",
        }
    }

    /// Name of the enumerator definition (without arity).
    pub fn enumerator_name(self) -> &'static str {
        match self {
            FixtureKind::ValueType => "ValueTypeEnumerator",
            FixtureKind::DisposableValueType => "DisposableValueTypeEnumerator",
            FixtureKind::DisposableReferenceType => "DisposableReferenceTypeEnumerator",
            FixtureKind::ByRefLike => "ByRefLikeEnumerator",
            FixtureKind::DisposableByRefLike => "DisposableByRefLikeEnumerator",
        }
    }

    /// Name of the enumerable definition (without arity).
    pub fn enumerable_name(self) -> &'static str {
        match self {
            FixtureKind::ValueType => "EnumerableWithValueTypeEnumerator",
            FixtureKind::DisposableValueType => "EnumerableWithDisposableValueTypeEnumerator",
            FixtureKind::DisposableReferenceType => "EnumerableWithDisposableReferenceTypeEnumerator",
            FixtureKind::ByRefLike => "EnumerableWithByRefLikeEnumerator",
            FixtureKind::DisposableByRefLike => "EnumerableWithDisposableByRefLikeEnumerator",
        }
    }

    pub fn is_disposable(self) -> bool {
        matches!(
            self,
            FixtureKind::DisposableValueType | FixtureKind::DisposableReferenceType | FixtureKind::DisposableByRefLike
        )
    }

    fn enumerator_decl(self) -> TypeDecl<'static> {
        let name = self.enumerator_name();
        let decl = match self {
            FixtureKind::ValueType | FixtureKind::DisposableValueType => TypeDecl::value_type(name),
            FixtureKind::DisposableReferenceType => TypeDecl::class(name),
            FixtureKind::ByRefLike | FixtureKind::DisposableByRefLike => TypeDecl::by_ref_like(name),
        };
        decl.in_namespace(NAMESPACE).generic(&["T"])
    }
}

impl fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FixtureKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FixtureKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown fixture '{s}'"))
    }
}

/// The `int` instantiation of one fixture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Fixture {
    pub kind: FixtureKind,
    /// `EnumerableWith<X>Enumerator<int>`.
    pub enumerable: TypeId,
    /// `<X>Enumerator<int>`.
    pub enumerator: TypeId,
}

/// Registry, native bodies and fixture handles.
pub struct Corpus {
    registry: TypeRegistry,
    natives: NativeMethods,
    fixtures: Vec<Fixture>,
}

impl Corpus {
    pub fn new() -> Self {
        let mut registry = TypeRegistry::new();
        let mut natives = NativeMethods::new();
        let fixtures = FixtureKind::ALL
            .into_iter()
            .map(|kind| declare_fixture(&mut registry, &mut natives, kind))
            .collect();
        Corpus {
            registry,
            natives,
            fixtures,
        }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn natives(&self) -> &NativeMethods {
        &self.natives
    }

    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    pub fn fixture(&self, kind: FixtureKind) -> Fixture {
        let position = FixtureKind::ALL.iter().position(|&k| k == kind).unwrap_or_default();
        self.fixtures[position]
    }

    /// Allocate an enumerable over `source`.
    pub fn new_enumerable(&self, heap: &mut Heap, kind: FixtureKind, source: &[i64]) -> ObjectRef {
        let items = heap.alloc_array(source.iter().copied().map(Value::Int));
        heap.alloc_object(self.fixture(kind).enumerable, &[Value::Array(items), Value::Int(0)])
    }

    /// How many times enumerators of `enumerable` were disposed.
    pub fn disposals(&self, heap: &Heap, enumerable: ObjectRef) -> EvalResult<i64> {
        heap.field(enumerable, DISPOSALS)?.as_int()
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self::new()
    }
}

fn declare_fixture(registry: &mut TypeRegistry, natives: &mut NativeMethods, kind: FixtureKind) -> Fixture {
    let enumerator_def = registry.declare(kind.enumerator_decl());
    let item = registry.generic_param(enumerator_def, 0);
    if kind.is_disposable() && !matches!(kind, FixtureKind::DisposableByRefLike) {
        registry.add_interface(enumerator_def, TypeId::DISPOSABLE);
    }
    let current = registry.add_property(enumerator_def, PropertyDecl::new("Current", item));
    let move_next = registry.add_method(enumerator_def, MethodDecl::new("MoveNext", TypeId::BOOL));
    let dispose = kind
        .is_disposable()
        .then(|| registry.add_method(enumerator_def, MethodDecl::new("Dispose", TypeId::VOID)));

    let enumerable_def = registry.declare(
        TypeDecl::class(kind.enumerable_name())
            .in_namespace(NAMESPACE)
            .generic(&["T"]),
    );
    let param = registry.generic_param(enumerable_def, 0);
    let returned = registry.instantiate(enumerator_def, &[param]);
    let get_enumerator = registry.add_method(enumerable_def, MethodDecl::new("GetEnumerator", returned));

    let enumerable = registry.instantiate(enumerable_def, &[TypeId::INT]);
    let enumerator = registry.instantiate(enumerator_def, &[TypeId::INT]);

    let get_enumerator = instance_member(registry, enumerable, get_enumerator);
    natives.define(get_enumerator, move |heap, receiver, _| {
        let owner = receiver.as_object()?;
        let items = heap.field(owner, ITEMS)?;
        let state = [items, Value::Int(-1), Value::Object(owner)];
        Ok(Value::Object(heap.alloc_object(enumerator, &state)))
    });
    natives.define(instance_member(registry, enumerator, current), current_body);
    natives.define(instance_member(registry, enumerator, move_next), move_next_body);
    if let Some(dispose) = dispose {
        natives.define(instance_member(registry, enumerator, dispose), dispose_body);
    }

    tracing::debug!(fixture = %kind, ?enumerable, ?enumerator, "declared fixture");
    Fixture {
        kind,
        enumerable,
        enumerator,
    }
}

/// The member of `instance` instantiated from `definition_member`.
fn instance_member(registry: &TypeRegistry, instance: TypeId, definition_member: MemberId) -> MemberId {
    registry
        .members_of(instance)
        .iter()
        .copied()
        .find(|&member| registry.member(member).definition == Some(definition_member))
        .unwrap_or(definition_member)
}

fn current_body(heap: &mut Heap, receiver: Value, _: &[Value]) -> EvalResult<Value> {
    let state = receiver.as_object()?;
    let items = heap.field(state, ITEMS)?.as_array()?;
    let index = heap.field(state, INDEX)?.as_int()?;
    let item = usize::try_from(index)
        .ok()
        .and_then(|index| heap.array(items).ok()?.get(index).copied());
    item.ok_or_else(|| duck_eval::EvalError::InvalidHandle(format!("Current read at index {index}")))
}

fn move_next_body(heap: &mut Heap, receiver: Value, _: &[Value]) -> EvalResult<Value> {
    let state = receiver.as_object()?;
    let items = heap.field(state, ITEMS)?.as_array()?;
    let len = heap.array(items)?.len();
    let index = heap.field(state, INDEX)?.as_int()?;
    let next = index.saturating_add(1);
    let in_range = usize::try_from(next).is_ok_and(|next| next < len);
    if in_range {
        heap.set_field(state, INDEX, Value::Int(next))?;
    }
    Ok(Value::Bool(in_range))
}

fn dispose_body(heap: &mut Heap, receiver: Value, _: &[Value]) -> EvalResult<Value> {
    let state = receiver.as_object()?;
    let owner = heap.field(state, OWNER)?.as_object()?;
    let disposals = heap.field(owner, DISPOSALS)?.as_int()?;
    heap.set_field(owner, DISPOSALS, Value::Int(disposals + 1))?;
    Ok(Value::Void)
}
