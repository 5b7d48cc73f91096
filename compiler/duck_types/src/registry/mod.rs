//! Registry of loaded type metadata.
//!
//! The `TypeRegistry` is the introspection surface every analysis in this
//! crate runs against: it answers "what members does this type declare",
//! "what is its base", "which interfaces does it implement" and "can it be
//! converted to that interface".
//!
//! # Design
//!
//! - Types and members stored in flat `Vec`s, addressed by `TypeId`/`MemberId`
//! - Well-known types (`object`, `IDisposable`, the enumerable contracts)
//!   registered first at fixed handles
//! - Generic instantiation is eager and memoized: `instantiate(def, args)`
//!   copies the definition's base, interfaces and members with parameters
//!   substituted, so `Enumerable<int>.GetEnumerator` is declared on
//!   `Enumerable<int>` and returns `Enumerator<int>`
//! - Members added to a definition after it was instantiated are propagated
//!   to the existing instances
//!
//! Analysis code only ever borrows the registry immutably.

mod names;

use std::collections::VecDeque;

use duck_ir::{MemberId, Name, SharedInterner, TypeId};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::{smallvec, SmallVec};

use crate::flags::{MemberFlags, TypeFlags};

/// Inline list of types (parameter lists, generic arguments).
pub type TypeList = SmallVec<[TypeId; 4]>;

/// What kind of type an entry describes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Primitive,
    Class,
    Struct,
    Interface,
    /// Generic parameter `position` of `owner`.
    GenericParam { owner: TypeId, position: u16 },
}

/// A registered type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeEntry {
    /// Simple name, without arity suffix or generic arguments.
    pub name: Name,
    /// Namespace (`Name::EMPTY` when none).
    pub namespace: Name,
    pub kind: TypeKind,
    pub flags: TypeFlags,
    /// Base class; `None` for `object`, interfaces and generic parameters.
    pub base: Option<TypeId>,
    /// Directly implemented (or, for interfaces, inherited) interfaces.
    pub interfaces: Vec<TypeId>,
    /// Members declared on this type, in declaration order.
    pub members: Vec<MemberId>,
    /// Parameters of a generic definition.
    pub generic_params: TypeList,
    /// Definition this type instantiates.
    pub generic_definition: Option<TypeId>,
    /// Arguments of a generic instantiation.
    pub type_args: TypeList,
    /// Enclosing type of a nested type.
    pub declaring_type: Option<TypeId>,
}

/// Shape of a member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberKind {
    Method { params: TypeList, returns: TypeId },
    Property { ty: TypeId },
}

/// A registered method or property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberEntry {
    pub name: Name,
    pub declaring_type: TypeId,
    pub flags: MemberFlags,
    pub kind: MemberKind,
    /// Interface member this member implements (explicitly or by mapping).
    pub implements: Option<MemberId>,
    /// Member of the generic definition this one was instantiated from.
    pub definition: Option<MemberId>,
}

impl MemberEntry {
    #[inline]
    pub fn is_method(&self) -> bool {
        matches!(self.kind, MemberKind::Method { .. })
    }

    #[inline]
    pub fn is_property(&self) -> bool {
        matches!(self.kind, MemberKind::Property { .. })
    }

    /// Parameter types (empty for properties).
    pub fn params(&self) -> &[TypeId] {
        match &self.kind {
            MemberKind::Method { params, .. } => params,
            MemberKind::Property { .. } => &[],
        }
    }

    /// Return type of a method, or type of a property.
    pub fn value_type(&self) -> TypeId {
        match self.kind {
            MemberKind::Method { returns, .. } => returns,
            MemberKind::Property { ty } => ty,
        }
    }
}

/// Interned names of the members the enumerable pattern is built from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WellKnownNames {
    pub get_enumerator: Name,
    pub current: Name,
    pub move_next: Name,
    pub dispose: Name,
    pub reset: Name,
}

impl WellKnownNames {
    fn new(interner: &SharedInterner) -> Self {
        Self {
            get_enumerator: interner.intern("GetEnumerator"),
            current: interner.intern("Current"),
            move_next: interner.intern("MoveNext"),
            dispose: interner.intern("Dispose"),
            reset: interner.intern("Reset"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum DeclKind {
    Class,
    Struct,
    ByRefLike,
    Interface,
}

/// Declaration of a new type.
#[derive(Clone, Debug)]
pub struct TypeDecl<'a> {
    name: &'a str,
    namespace: &'a str,
    kind: DeclKind,
    generic_params: &'a [&'a str],
    declaring_type: Option<TypeId>,
    is_abstract: bool,
}

impl<'a> TypeDecl<'a> {
    fn new(name: &'a str, kind: DeclKind) -> Self {
        Self {
            name,
            namespace: "",
            kind,
            generic_params: &[],
            declaring_type: None,
            is_abstract: false,
        }
    }

    /// Reference type deriving from `object`.
    pub fn class(name: &'a str) -> Self {
        Self::new(name, DeclKind::Class)
    }

    /// Value type deriving from `System.ValueType`.
    pub fn value_type(name: &'a str) -> Self {
        Self::new(name, DeclKind::Struct)
    }

    /// Stack-only value type.
    pub fn by_ref_like(name: &'a str) -> Self {
        Self::new(name, DeclKind::ByRefLike)
    }

    pub fn interface(name: &'a str) -> Self {
        Self::new(name, DeclKind::Interface)
    }

    #[must_use]
    pub fn in_namespace(mut self, namespace: &'a str) -> Self {
        self.namespace = namespace;
        self
    }

    /// Make this a generic definition with the given parameter names.
    #[must_use]
    pub fn generic(mut self, params: &'a [&'a str]) -> Self {
        self.generic_params = params;
        self
    }

    #[must_use]
    pub fn nested_in(mut self, outer: TypeId) -> Self {
        self.declaring_type = Some(outer);
        self
    }

    #[must_use]
    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self
    }
}

/// Declaration of a method.
#[derive(Clone, Debug)]
pub struct MethodDecl<'a> {
    name: &'a str,
    params: TypeList,
    returns: TypeId,
    flags: MemberFlags,
    implements: Option<MemberId>,
}

impl<'a> MethodDecl<'a> {
    /// Public instance method.
    pub fn new(name: &'a str, returns: TypeId) -> Self {
        Self {
            name,
            params: TypeList::new(),
            returns,
            flags: MemberFlags::PUBLIC,
            implements: None,
        }
    }

    #[must_use]
    pub fn params(mut self, params: &[TypeId]) -> Self {
        self.params = TypeList::from_slice(params);
        self
    }

    #[must_use]
    pub fn static_(mut self) -> Self {
        self.flags |= MemberFlags::STATIC;
        self
    }

    #[must_use]
    pub fn private(mut self) -> Self {
        self.flags -= MemberFlags::PUBLIC;
        self
    }

    /// Explicit implementation of `interface_member`: not public, only
    /// reachable through the interface.
    #[must_use]
    pub fn explicit(mut self, interface_member: MemberId) -> Self {
        self.flags = MemberFlags::EXPLICIT;
        self.implements = Some(interface_member);
        self
    }

    /// Public member that implicitly implements `interface_member`.
    #[must_use]
    pub fn implements(mut self, interface_member: MemberId) -> Self {
        self.implements = Some(interface_member);
        self
    }
}

/// Declaration of a property.
#[derive(Clone, Debug)]
pub struct PropertyDecl<'a> {
    name: &'a str,
    ty: TypeId,
    flags: MemberFlags,
    implements: Option<MemberId>,
}

impl<'a> PropertyDecl<'a> {
    /// Public readable instance property.
    pub fn new(name: &'a str, ty: TypeId) -> Self {
        Self {
            name,
            ty,
            flags: MemberFlags::PUBLIC | MemberFlags::HAS_GETTER,
            implements: None,
        }
    }

    #[must_use]
    pub fn static_(mut self) -> Self {
        self.flags |= MemberFlags::STATIC;
        self
    }

    #[must_use]
    pub fn write_only(mut self) -> Self {
        self.flags -= MemberFlags::HAS_GETTER;
        self
    }

    #[must_use]
    pub fn explicit(mut self, interface_member: MemberId) -> Self {
        self.flags = MemberFlags::EXPLICIT | MemberFlags::HAS_GETTER;
        self.implements = Some(interface_member);
        self
    }

    #[must_use]
    pub fn implements(mut self, interface_member: MemberId) -> Self {
        self.implements = Some(interface_member);
        self
    }
}

/// Parameter → argument pairs of one instantiation.
type Substitution = SmallVec<[(TypeId, TypeId); 4]>;

/// Registry of types and their members.
#[derive(Clone)]
pub struct TypeRegistry {
    interner: SharedInterner,
    names: WellKnownNames,
    types: Vec<TypeEntry>,
    members: Vec<MemberEntry>,
    /// (definition, args) → instantiation.
    instantiations: FxHashMap<(TypeId, TypeList), TypeId>,
    /// definition → its instantiations, for member propagation.
    instances: FxHashMap<TypeId, Vec<TypeId>>,
}

impl TypeRegistry {
    /// Create a registry holding only the well-known types.
    pub fn new() -> Self {
        Self::with_interner(SharedInterner::new())
    }

    /// Create a registry that interns names into `interner`.
    pub fn with_interner(interner: SharedInterner) -> Self {
        let names = WellKnownNames::new(&interner);
        let mut registry = Self {
            interner,
            names,
            types: Vec::with_capacity(64),
            members: Vec::with_capacity(128),
            instantiations: FxHashMap::default(),
            instances: FxHashMap::default(),
        };
        registry.register_well_known();
        registry
    }

    // === Names ===

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn well_known(&self) -> &WellKnownNames {
        &self.names
    }

    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    #[inline]
    pub fn lookup(&self, name: Name) -> &str {
        self.interner.lookup(name)
    }

    // === Registration ===

    fn push_type(&mut self, entry: TypeEntry) -> TypeId {
        let index = u32::try_from(self.types.len())
            .unwrap_or_else(|_| panic!("too many types: {} exceeds u32::MAX", self.types.len()));
        self.types.push(entry);
        TypeId::new(index)
    }

    fn push_member(&mut self, entry: MemberEntry) -> MemberId {
        let index = u32::try_from(self.members.len())
            .unwrap_or_else(|_| panic!("too many members: {} exceeds u32::MAX", self.members.len()));
        self.members.push(entry);
        MemberId::new(index)
    }

    fn bare_entry(&self, name: &str, namespace: &str, kind: TypeKind, flags: TypeFlags) -> TypeEntry {
        TypeEntry {
            name: self.intern(name),
            namespace: self.intern(namespace),
            kind,
            flags,
            base: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            generic_params: TypeList::new(),
            generic_definition: None,
            type_args: TypeList::new(),
            declaring_type: None,
        }
    }

    fn add_generic_params(&mut self, owner: TypeId, names: &[&str]) {
        for (position, name) in names.iter().enumerate() {
            let position = u16::try_from(position).unwrap_or(u16::MAX);
            let entry = self.bare_entry(
                name,
                "",
                TypeKind::GenericParam { owner, position },
                TypeFlags::GENERIC_PARAM,
            );
            let param = self.push_type(entry);
            self.types[owner.index()].generic_params.push(param);
        }
    }

    /// Register a new type.
    ///
    /// Classes derive from `object`, structs from `System.ValueType`;
    /// use [`set_base`](Self::set_base) to change the base class.
    pub fn declare(&mut self, decl: TypeDecl<'_>) -> TypeId {
        let (kind, mut flags, base) = match decl.kind {
            DeclKind::Class => (TypeKind::Class, TypeFlags::empty(), Some(TypeId::OBJECT)),
            DeclKind::Struct => (TypeKind::Struct, TypeFlags::VALUE_TYPE, Some(TypeId::VALUE_TYPE)),
            DeclKind::ByRefLike => (
                TypeKind::Struct,
                TypeFlags::VALUE_TYPE | TypeFlags::BY_REF_LIKE,
                Some(TypeId::VALUE_TYPE),
            ),
            DeclKind::Interface => (TypeKind::Interface, TypeFlags::INTERFACE, None),
        };
        if !decl.generic_params.is_empty() {
            flags |= TypeFlags::GENERIC_DEFINITION;
        }
        if decl.is_abstract {
            flags |= TypeFlags::ABSTRACT;
        }

        let mut entry = self.bare_entry(decl.name, decl.namespace, kind, flags);
        entry.base = base;
        entry.declaring_type = decl.declaring_type;
        let id = self.push_type(entry);
        self.add_generic_params(id, decl.generic_params);

        tracing::trace!(name = decl.name, ?id, ?flags, "declared type");
        id
    }

    /// Replace the base class of `ty`.
    pub fn set_base(&mut self, ty: TypeId, base: TypeId) {
        self.types[ty.index()].base = Some(base);
        for (instance, subst) in self.instances_with_substitution(ty) {
            let base = self.substitute(base, &subst);
            self.types[instance.index()].base = Some(base);
        }
    }

    /// Add an implemented (or, for interfaces, inherited) interface.
    pub fn add_interface(&mut self, ty: TypeId, interface: TypeId) {
        debug_assert!(self.is_interface(interface), "not an interface: {interface:?}");
        self.types[ty.index()].interfaces.push(interface);
        for (instance, subst) in self.instances_with_substitution(ty) {
            let interface = self.substitute(interface, &subst);
            self.types[instance.index()].interfaces.push(interface);
        }
    }

    /// Declare a method on `ty`.
    pub fn add_method(&mut self, ty: TypeId, decl: MethodDecl<'_>) -> MemberId {
        let entry = MemberEntry {
            name: self.intern(decl.name),
            declaring_type: ty,
            flags: decl.flags,
            kind: MemberKind::Method {
                params: decl.params,
                returns: decl.returns,
            },
            implements: decl.implements,
            definition: None,
        };
        self.add_member(ty, entry)
    }

    /// Declare a property on `ty`.
    pub fn add_property(&mut self, ty: TypeId, decl: PropertyDecl<'_>) -> MemberId {
        let entry = MemberEntry {
            name: self.intern(decl.name),
            declaring_type: ty,
            flags: decl.flags,
            kind: MemberKind::Property { ty: decl.ty },
            implements: decl.implements,
            definition: None,
        };
        self.add_member(ty, entry)
    }

    fn add_member(&mut self, ty: TypeId, entry: MemberEntry) -> MemberId {
        let member = self.push_member(entry);
        self.types[ty.index()].members.push(member);
        for (instance, subst) in self.instances_with_substitution(ty) {
            self.instantiate_member(instance, member, &subst);
        }
        member
    }

    // === Generic instantiation ===

    /// Instantiate a generic definition with concrete (or other open) arguments.
    ///
    /// Instantiating a definition with its own parameters yields the
    /// definition itself, matching how an open type names itself.
    pub fn instantiate(&mut self, definition: TypeId, args: &[TypeId]) -> TypeId {
        let def = &self.types[definition.index()];
        debug_assert!(
            def.flags.contains(TypeFlags::GENERIC_DEFINITION),
            "not a generic definition: {definition:?}"
        );
        debug_assert_eq!(def.generic_params.len(), args.len(), "generic arity mismatch");
        if def.generic_params.as_slice() == args {
            return definition;
        }

        let key = (definition, TypeList::from_slice(args));
        if let Some(&id) = self.instantiations.get(&key) {
            return id;
        }

        let entry = TypeEntry {
            name: def.name,
            namespace: def.namespace,
            kind: def.kind,
            flags: def.flags.for_instance(),
            base: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            generic_params: TypeList::new(),
            generic_definition: Some(definition),
            type_args: key.1.clone(),
            declaring_type: def.declaring_type,
        };
        let id = self.push_type(entry);
        // Registered before substituting so self-referential shapes terminate.
        self.instantiations.insert(key, id);
        self.instances.entry(definition).or_default().push(id);

        let subst = self.substitution(id);
        if let Some(base) = self.types[definition.index()].base {
            let base = self.substitute(base, &subst);
            self.types[id.index()].base = Some(base);
        }
        let interfaces = self.types[definition.index()].interfaces.clone();
        for interface in interfaces {
            let interface = self.substitute(interface, &subst);
            self.types[id.index()].interfaces.push(interface);
        }
        let members = self.types[definition.index()].members.clone();
        for member in members {
            self.instantiate_member(id, member, &subst);
        }

        tracing::trace!(?definition, ?args, ?id, "instantiated generic type");
        id
    }

    fn substitution(&self, instance: TypeId) -> Substitution {
        let entry = &self.types[instance.index()];
        let Some(definition) = entry.generic_definition else {
            return Substitution::new();
        };
        self.types[definition.index()]
            .generic_params
            .iter()
            .copied()
            .zip(entry.type_args.iter().copied())
            .collect()
    }

    fn instances_with_substitution(&self, definition: TypeId) -> Vec<(TypeId, Substitution)> {
        self.instances
            .get(&definition)
            .map(|instances| {
                instances
                    .iter()
                    .map(|&instance| (instance, self.substitution(instance)))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn substitute(&mut self, ty: TypeId, subst: &[(TypeId, TypeId)]) -> TypeId {
        if subst.is_empty() {
            return ty;
        }
        if let Some(&(_, arg)) = subst.iter().find(|(param, _)| *param == ty) {
            return arg;
        }
        let entry = &self.types[ty.index()];
        let Some(definition) = entry.generic_definition else {
            return ty;
        };
        let args = entry.type_args.clone();
        let substituted: TypeList = args.iter().map(|&arg| self.substitute(arg, subst)).collect();
        if substituted == args {
            ty
        } else {
            self.instantiate(definition, &substituted)
        }
    }

    fn instantiate_member(&mut self, instance: TypeId, member: MemberId, subst: &[(TypeId, TypeId)]) {
        let source = self.members[member.index()].clone();
        let kind = match source.kind {
            MemberKind::Method { params, returns } => MemberKind::Method {
                params: params.iter().map(|&p| self.substitute(p, subst)).collect(),
                returns: self.substitute(returns, subst),
            },
            MemberKind::Property { ty } => MemberKind::Property {
                ty: self.substitute(ty, subst),
            },
        };
        let implements = source
            .implements
            .map(|target| self.corresponding_member(target, subst));
        let id = self.push_member(MemberEntry {
            name: source.name,
            declaring_type: instance,
            flags: source.flags,
            kind,
            implements,
            definition: Some(source.definition.unwrap_or(member)),
        });
        self.types[instance.index()].members.push(id);
    }

    /// The member matching `member` on the substituted declaring type.
    fn corresponding_member(&mut self, member: MemberId, subst: &[(TypeId, TypeId)]) -> MemberId {
        let declaring = self.members[member.index()].declaring_type;
        let substituted = self.substitute(declaring, subst);
        if substituted == declaring {
            return member;
        }
        let origin = self.members[member.index()].definition.unwrap_or(member);
        let target = &self.types[substituted.index()];
        let definition = target.generic_definition.unwrap_or(substituted);
        self.types[definition.index()]
            .members
            .iter()
            .position(|&m| m == origin)
            .and_then(|position| target.members.get(position).copied())
            .unwrap_or(member)
    }

    // === Lookup ===

    /// Number of registered types (including generic parameters and instances).
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Get a type entry. Handles come from this registry, so this indexes directly.
    #[inline]
    pub fn entry(&self, ty: TypeId) -> &TypeEntry {
        &self.types[ty.index()]
    }

    /// Get a type entry, or `None` for a handle from another registry.
    #[inline]
    pub fn get(&self, ty: TypeId) -> Option<&TypeEntry> {
        self.types.get(ty.index())
    }

    #[inline]
    pub fn member(&self, member: MemberId) -> &MemberEntry {
        &self.members[member.index()]
    }

    #[inline]
    pub fn get_member(&self, member: MemberId) -> Option<&MemberEntry> {
        self.members.get(member.index())
    }

    /// Members declared directly on `ty`.
    #[inline]
    pub fn members_of(&self, ty: TypeId) -> &[MemberId] {
        &self.types[ty.index()].members
    }

    /// Parameters of a generic definition.
    #[inline]
    pub fn generic_params(&self, ty: TypeId) -> &[TypeId] {
        &self.types[ty.index()].generic_params
    }

    /// Generic parameter `position` of the definition `owner`.
    ///
    /// # Panics
    /// Panics if `owner` has fewer parameters.
    pub fn generic_param(&self, owner: TypeId, position: usize) -> TypeId {
        self.generic_params(owner)[position]
    }

    /// Simple name of a type.
    pub fn name_of(&self, ty: TypeId) -> &str {
        self.lookup(self.entry(ty).name)
    }

    /// `IDisposable.Dispose()`, registered with the well-known types.
    pub fn dispose_method(&self) -> MemberId {
        self.members_of(TypeId::DISPOSABLE)[0]
    }

    /// Look up a top-level type by simple name (first match in registration order).
    pub fn find_type(&self, name: &str) -> Option<TypeId> {
        let name = self.intern(name);
        self.types
            .iter()
            .position(|entry| {
                entry.name == name
                    && entry.generic_definition.is_none()
                    && !entry.flags.contains(TypeFlags::GENERIC_PARAM)
            })
            .and_then(|index| u32::try_from(index).ok())
            .map(TypeId::new)
    }

    // === Type facts ===

    #[inline]
    pub fn is_value_type(&self, ty: TypeId) -> bool {
        self.entry(ty).flags.contains(TypeFlags::VALUE_TYPE)
    }

    #[inline]
    pub fn is_by_ref_like(&self, ty: TypeId) -> bool {
        self.entry(ty).flags.contains(TypeFlags::BY_REF_LIKE)
    }

    #[inline]
    pub fn is_interface(&self, ty: TypeId) -> bool {
        self.entry(ty).flags.contains(TypeFlags::INTERFACE)
    }

    /// Whether `ty` is `definition` or one of its instantiations.
    pub fn is_instance_of(&self, ty: TypeId, definition: TypeId) -> bool {
        ty == definition || self.entry(ty).generic_definition == Some(definition)
    }

    /// `ty` followed by its base classes, most derived first.
    pub fn base_chain(&self, ty: TypeId) -> BaseChain<'_> {
        BaseChain {
            registry: self,
            next: Some(ty),
            remaining: self.types.len(),
        }
    }

    /// Every interface `ty` implements, transitively.
    ///
    /// Order: interfaces declared on `ty` and its bases (most derived first),
    /// then interfaces those inherit, breadth-first, without duplicates.
    /// For an interface, its inherited interfaces (not itself).
    pub fn all_interfaces(&self, ty: TypeId) -> Vec<TypeId> {
        let mut seen = FxHashSet::default();
        let mut result = Vec::new();
        let mut queue = VecDeque::new();

        let roots: SmallVec<[TypeId; 4]> = if self.is_interface(ty) {
            smallvec![ty]
        } else {
            self.base_chain(ty).collect()
        };
        for root in roots {
            for &interface in &self.entry(root).interfaces {
                if seen.insert(interface) {
                    queue.push_back(interface);
                }
            }
        }

        while let Some(interface) = queue.pop_front() {
            result.push(interface);
            for &inherited in &self.entry(interface).interfaces {
                if seen.insert(inherited) {
                    queue.push_back(inherited);
                }
            }
        }

        result
    }

    /// Whether `ty` implements `interface` (directly or through bases/inheritance).
    pub fn implements(&self, ty: TypeId, interface: TypeId) -> bool {
        self.all_interfaces(ty).contains(&interface)
    }

    /// Instantiations of the generic interface `definition` that `ty` is or implements.
    pub fn instantiations_of(&self, ty: TypeId, definition: TypeId) -> Vec<TypeId> {
        let mut found = Vec::new();
        if self.is_instance_of(ty, definition) {
            found.push(ty);
        }
        found.extend(
            self.all_interfaces(ty)
                .into_iter()
                .filter(|&interface| self.is_instance_of(interface, definition)),
        );
        found
    }

    /// Implicit reference/boxing convertibility of `ty` to `target`.
    ///
    /// Stack-only types never convert to interfaces (that would box them),
    /// even if they declare the interface.
    pub fn is_assignable_to(&self, ty: TypeId, target: TypeId) -> bool {
        if ty == target {
            return true;
        }
        if self.is_interface(target) {
            return !self.is_by_ref_like(ty) && self.implements(ty, target);
        }
        if target == TypeId::OBJECT {
            return !self.is_by_ref_like(ty) && !self.entry(ty).flags.contains(TypeFlags::GENERIC_PARAM);
        }
        self.base_chain(ty).any(|base| base == target)
    }

    // === Well-known types ===

    fn register_well_known(&mut self) {
        use TypeKind::{Class, Interface, Primitive};

        let primitive_value = TypeFlags::PRIMITIVE | TypeFlags::VALUE_TYPE;
        let generic_interface = TypeFlags::INTERFACE | TypeFlags::GENERIC_DEFINITION;
        let well_known: [(TypeId, &str, &str, TypeKind, TypeFlags, Option<TypeId>); 11] = [
            (TypeId::VOID, "Void", "System", Primitive, primitive_value, Some(TypeId::VALUE_TYPE)),
            (TypeId::BOOL, "Boolean", "System", Primitive, primitive_value, Some(TypeId::VALUE_TYPE)),
            (TypeId::INT, "Int32", "System", Primitive, primitive_value, Some(TypeId::VALUE_TYPE)),
            (TypeId::STRING, "String", "System", Primitive, TypeFlags::PRIMITIVE, Some(TypeId::OBJECT)),
            (TypeId::OBJECT, "Object", "System", Primitive, TypeFlags::PRIMITIVE, None),
            (TypeId::VALUE_TYPE, "ValueType", "System", Class, TypeFlags::ABSTRACT, Some(TypeId::OBJECT)),
            (TypeId::DISPOSABLE, "IDisposable", "System", Interface, TypeFlags::INTERFACE, None),
            (TypeId::ENUMERATOR, "IEnumerator", "System.Collections", Interface, TypeFlags::INTERFACE, None),
            (TypeId::ENUMERABLE, "IEnumerable", "System.Collections", Interface, TypeFlags::INTERFACE, None),
            (TypeId::GENERIC_ENUMERATOR, "IEnumerator", "System.Collections.Generic", Interface, generic_interface, None),
            (TypeId::GENERIC_ENUMERABLE, "IEnumerable", "System.Collections.Generic", Interface, generic_interface, None),
        ];
        for (expected, name, namespace, kind, flags, base) in well_known {
            let mut entry = self.bare_entry(name, namespace, kind, flags);
            entry.base = base;
            let id = self.push_type(entry);
            debug_assert_eq!(id, expected, "well-known type registered out of order");
        }
        self.add_generic_params(TypeId::GENERIC_ENUMERATOR, &["T"]);
        self.add_generic_params(TypeId::GENERIC_ENUMERABLE, &["T"]);

        self.add_method(TypeId::DISPOSABLE, MethodDecl::new("Dispose", TypeId::VOID));

        self.add_property(TypeId::ENUMERATOR, PropertyDecl::new("Current", TypeId::OBJECT));
        self.add_method(TypeId::ENUMERATOR, MethodDecl::new("MoveNext", TypeId::BOOL));
        self.add_method(TypeId::ENUMERATOR, MethodDecl::new("Reset", TypeId::VOID));

        self.add_method(
            TypeId::ENUMERABLE,
            MethodDecl::new("GetEnumerator", TypeId::ENUMERATOR),
        );

        let t = self.generic_params(TypeId::GENERIC_ENUMERATOR)[0];
        self.add_interface(TypeId::GENERIC_ENUMERATOR, TypeId::DISPOSABLE);
        self.add_interface(TypeId::GENERIC_ENUMERATOR, TypeId::ENUMERATOR);
        self.add_property(TypeId::GENERIC_ENUMERATOR, PropertyDecl::new("Current", t));

        let t = self.generic_params(TypeId::GENERIC_ENUMERABLE)[0];
        let enumerator_of_t = self.instantiate(TypeId::GENERIC_ENUMERATOR, &[t]);
        self.add_interface(TypeId::GENERIC_ENUMERABLE, TypeId::ENUMERABLE);
        self.add_method(
            TypeId::GENERIC_ENUMERABLE,
            MethodDecl::new("GetEnumerator", enumerator_of_t),
        );
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.types.len())
            .field("members", &self.members.len())
            .field("instantiations", &self.instantiations.len())
            .finish()
    }
}

/// Iterator over a type and its base classes.
pub struct BaseChain<'r> {
    registry: &'r TypeRegistry,
    next: Option<TypeId>,
    /// Bound on the walk, in case a base chain was registered with a cycle.
    remaining: usize,
}

impl Iterator for BaseChain<'_> {
    type Item = TypeId;

    fn next(&mut self) -> Option<TypeId> {
        let current = self.next?;
        if self.remaining == 0 {
            self.next = None;
            return None;
        }
        self.remaining -= 1;
        self.next = self.registry.entry(current).base;
        Some(current)
    }
}
