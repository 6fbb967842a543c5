//! The type system: pool, class table, member table and type variables.
//!
//! This is the collaborator the erasure core queries. It owns every
//! declaration; the AST refers to its entries through handles only.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use tern_ir::{ClassId, MemberId, Name, SharedInterner, StringInterner, TypeId};

use crate::class::{ClassDef, ClassFlags};
use crate::flags::TypeFlags;
use crate::kind::{PrimKind, SubstId, TypeKind, TypeVarId};
use crate::member::{MemberData, MemberFlags, MemberKey, MemberKind};
use crate::pool::{Pool, SubstBindings};

/// Who declares a type variable.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeVarOwner {
    Class(ClassId),
    Member(MemberId),
    /// Created for a generic method that has not been declared yet.
    Pending,
}

#[derive(Copy, Clone, Debug)]
pub struct TypeVarDef {
    pub name: Name,
    /// Upper bound; `core.Object` unless declared otherwise.
    pub bound: TypeId,
    pub owner: TypeVarOwner,
}

/// Classes and types every compilation refers to.
#[derive(Copy, Clone, Debug)]
pub struct WellKnown {
    pub object: ClassId,
    pub string: ClassId,
    pub object_ty: TypeId,
    pub string_ty: TypeId,
    pub char_array: TypeId,
}

pub struct TypeSystem {
    interner: SharedInterner,
    pool: Pool,
    classes: Vec<ClassDef>,
    class_names: FxHashMap<Name, ClassId>,
    members: Vec<MemberData>,
    member_map: FxHashMap<MemberKey, MemberId>,
    type_vars: Vec<TypeVarDef>,
    well_known: WellKnown,
}

impl TypeSystem {
    /// Create a type system with the core library installed.
    pub fn new() -> Self {
        Self::with_interner(StringInterner::shared())
    }

    pub fn with_interner(interner: SharedInterner) -> Self {
        let mut ts = TypeSystem {
            interner,
            pool: Pool::new(),
            classes: Vec::new(),
            class_names: FxHashMap::default(),
            members: Vec::new(),
            member_map: FxHashMap::default(),
            type_vars: Vec::new(),
            well_known: WellKnown {
                object: ClassId::NONE,
                string: ClassId::NONE,
                object_ty: TypeId::NONE,
                string_ty: TypeId::NONE,
                char_array: TypeId::NONE,
            },
        };
        crate::core_lib::install(&mut ts);
        ts
    }

    pub(crate) fn well_known_mut(&mut self) -> &mut WellKnown {
        &mut self.well_known
    }

    #[inline]
    pub fn well_known(&self) -> &WellKnown {
        &self.well_known
    }

    // Names

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    #[inline]
    pub fn name(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    // Types

    #[inline]
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    #[inline]
    pub fn kind(&self, ty: TypeId) -> TypeKind {
        self.pool.kind(ty)
    }

    #[inline]
    pub fn flags(&self, ty: TypeId) -> TypeFlags {
        self.pool.flags(ty)
    }

    #[inline]
    pub fn prim(&self, kind: PrimKind) -> TypeId {
        self.pool.prim(kind)
    }

    pub fn array(&mut self, elem: TypeId) -> TypeId {
        self.pool.array(elem)
    }

    pub fn class_type(&mut self, class: ClassId) -> TypeId {
        self.pool.class(class)
    }

    pub fn type_var_type(&mut self, var: TypeVarId) -> TypeId {
        self.pool.type_var(var)
    }

    /// Intern a substitution from unsorted bindings.
    pub fn make_subst(&mut self, bindings: impl IntoIterator<Item = (TypeVarId, TypeId)>) -> SubstId {
        self.pool.intern_subst(bindings.into_iter().collect())
    }

    /// Instantiate generic class `base` with `args`, one per declared type
    /// parameter, inside the enclosing-instance type `outer`.
    pub fn instantiate(&mut self, base: ClassId, args: &[TypeId], outer: Option<TypeId>) -> TypeId {
        debug_assert_eq!(
            args.len(),
            self.classes[base.index()].type_params.len(),
            "type argument count mismatch"
        );
        let bindings: SubstBindings = self.classes[base.index()]
            .type_params
            .iter()
            .copied()
            .zip(args.iter().copied())
            .collect();
        let subst = self.pool.intern_subst(bindings);
        self.pool
            .subst_class(base, subst, outer.unwrap_or(TypeId::NONE))
    }

    /// Least-upper-bound placeholder over `candidates`.
    pub fn lub_of(&mut self, candidates: &[TypeId]) -> TypeId {
        self.pool.lub_of(candidates)
    }

    pub(crate) fn pool_mut(&mut self) -> &mut Pool {
        &mut self.pool
    }

    /// Class a reference type is (an instantiation of), if any.
    pub fn class_of(&self, ty: TypeId) -> Option<ClassId> {
        match self.kind(ty) {
            TypeKind::Class(c) | TypeKind::Subst { base: c, .. } => Some(c),
            _ => None,
        }
    }

    #[inline]
    pub fn is_primitive(&self, ty: TypeId) -> bool {
        self.flags(ty).contains(TypeFlags::IS_PRIMITIVE)
    }

    #[inline]
    pub fn is_reference(&self, ty: TypeId) -> bool {
        self.flags(ty).contains(TypeFlags::IS_REFERENCE)
    }

    pub fn is_string(&self, ty: TypeId) -> bool {
        ty == self.well_known.string_ty
    }

    // Classes

    /// Declare a class or interface.
    ///
    /// Classes extend `core.Object` until told otherwise. Redeclaring a
    /// name shadows the earlier class in [`class_by_name`](Self::class_by_name).
    pub fn declare_class(&mut self, name: &str, flags: ClassFlags) -> ClassId {
        let name = self.intern(name);
        let Ok(raw) = u32::try_from(self.classes.len()) else {
            panic!("class table overflow");
        };
        let id = ClassId::from_raw(raw);
        let superclass = if flags.contains(ClassFlags::INTERFACE) || self.well_known.object.is_none() {
            None
        } else {
            Some(self.well_known.object_ty)
        };
        self.classes.push(ClassDef {
            name,
            flags,
            type_params: Vec::new(),
            outer: None,
            superclass,
            interfaces: Vec::new(),
            members: Vec::new(),
        });
        self.class_names.insert(name, id);
        tracing::trace!(class = self.name(name), ?id, "declared class");
        id
    }

    #[inline]
    pub fn class(&self, id: ClassId) -> &ClassDef {
        &self.classes[id.index()]
    }

    #[inline]
    pub fn class_mut(&mut self, id: ClassId) -> &mut ClassDef {
        &mut self.classes[id.index()]
    }

    pub fn class_by_name(&self, name: &str) -> Option<ClassId> {
        let name = self.interner.get(name)?;
        self.class_names.get(&name).copied()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn class_name(&self, id: ClassId) -> &'static str {
        self.name(self.classes[id.index()].name)
    }

    pub fn set_superclass(&mut self, class: ClassId, superclass: TypeId) {
        self.classes[class.index()].superclass = Some(superclass);
    }

    pub fn add_interface(&mut self, class: ClassId, iface: TypeId) {
        self.classes[class.index()].interfaces.push(iface);
    }

    /// Make `class` an inner class of the enclosing-instance type `outer`.
    pub fn set_outer(&mut self, class: ClassId, outer: TypeId) {
        let def = &mut self.classes[class.index()];
        def.outer = Some(outer);
        def.flags.insert(ClassFlags::INNER);
        def.flags.remove(ClassFlags::STATIC);
    }

    /// Declare a type parameter of `class`, bounded by `core.Object` unless
    /// `bound` is given.
    pub fn add_type_param(&mut self, class: ClassId, name: &str, bound: Option<TypeId>) -> TypeVarId {
        let var = self.push_type_var(name, bound, TypeVarOwner::Class(class));
        self.classes[class.index()].type_params.push(var);
        var
    }

    /// Create a type parameter for a generic method or constructor that is
    /// about to be declared.
    pub fn new_method_type_param(&mut self, name: &str, bound: Option<TypeId>) -> TypeVarId {
        self.push_type_var(name, bound, TypeVarOwner::Pending)
    }

    fn push_type_var(&mut self, name: &str, bound: Option<TypeId>, owner: TypeVarOwner) -> TypeVarId {
        let name = self.intern(name);
        let Ok(raw) = u32::try_from(self.type_vars.len()) else {
            panic!("type variable table overflow");
        };
        let bound = bound.unwrap_or(self.well_known.object_ty);
        self.type_vars.push(TypeVarDef { name, bound, owner });
        TypeVarId::from_raw(raw)
    }

    /// Replace the bound of `var`, for F-bounded parameters that mention
    /// themselves (`T extends Comparable<T>`).
    pub fn set_type_var_bound(&mut self, var: TypeVarId, bound: TypeId) {
        self.type_vars[var.index()].bound = bound;
    }

    #[inline]
    pub fn type_var(&self, var: TypeVarId) -> &TypeVarDef {
        &self.type_vars[var.index()]
    }

    pub fn type_var_count(&self) -> usize {
        self.type_vars.len()
    }

    /// Type parameters visible inside `class`: its own, then those of each
    /// enclosing instance type, innermost first.
    pub fn in_scope_type_params(&self, class: ClassId) -> Vec<TypeVarId> {
        let mut params = Vec::new();
        let mut current = Some(class);
        while let Some(c) = current {
            let def = &self.classes[c.index()];
            params.extend_from_slice(&def.type_params);
            current = def.outer.and_then(|outer| self.class_of(outer));
        }
        params
    }

    /// Whether members of `class` can mention type variables: the class or
    /// one of its enclosing instances is generic.
    pub fn is_generic_class(&self, class: ClassId) -> bool {
        let mut current = Some(class);
        while let Some(c) = current {
            let def = &self.classes[c.index()];
            if !def.type_params.is_empty() {
                return true;
            }
            current = def.outer.and_then(|outer| self.class_of(outer));
        }
        false
    }

    /// The substitution an instantiation applies to its members: its own
    /// bindings merged with those of its enclosing instance types.
    pub fn full_subst(&mut self, ty: TypeId) -> SubstId {
        let mut bindings = SubstBindings::new();
        let mut current = ty;
        while let TypeKind::Subst { subst, outer, .. } = self.kind(current) {
            for &(var, arg) in self.pool.subst(subst) {
                if !bindings.iter().any(|&(v, _)| v == var) {
                    bindings.push((var, arg));
                }
            }
            if outer.is_none() {
                break;
            }
            current = outer;
        }
        self.pool.intern_subst(bindings)
    }

    // Members

    /// Declare a member directly on `class`.
    ///
    /// The declaration's container is the raw class type. Declaring the same
    /// signature twice returns the existing member.
    pub fn declare_member(&mut self, class: ClassId, kind: MemberKind, flags: MemberFlags) -> MemberId {
        let container = self.pool.class(class);
        let key = MemberKey {
            kind,
            container,
            flags,
            instantiated_from: MemberId::NONE,
        };
        if let Some(&existing) = self.member_map.get(&key) {
            return existing;
        }
        let id = self.next_member_id();
        for &var in key.kind.type_params() {
            self.type_vars[var.index()].owner = TypeVarOwner::Member(id);
        }
        self.members.push(MemberData {
            kind: key.kind.clone(),
            container,
            flags,
            decl: id,
            origin: id,
            instantiated_from: MemberId::NONE,
        });
        self.member_map.insert(key, id);
        self.classes[class.index()].members.push(id);
        id
    }

    /// Intern an instance derived from `origin` with a new signature and
    /// container. Flags and the declaration link are inherited.
    pub fn derive_member(&mut self, origin: MemberId, kind: MemberKind, container: TypeId) -> MemberId {
        let source = &self.members[origin.index()];
        let decl = source.decl;
        let key = MemberKey {
            kind,
            container,
            flags: source.flags,
            instantiated_from: source.instantiated_from,
        };
        self.intern_member(key, decl, origin)
    }

    /// Instantiate a generic method or constructor with explicit or inferred
    /// type arguments, one per own type parameter.
    pub fn instantiate_method(&mut self, generic: MemberId, type_args: &[TypeId]) -> MemberId {
        let data = &self.members[generic.index()];
        debug_assert_eq!(data.kind.type_params().len(), type_args.len());
        let bindings: SubstBindings = data
            .kind
            .type_params()
            .iter()
            .copied()
            .zip(type_args.iter().copied())
            .collect();
        let (container, flags, decl) = (data.container, data.flags, data.decl);
        let kind = data.kind.clone();
        let subst = self.pool.intern_subst(bindings);
        let kind = self.subst_kind(&kind, subst).without_type_params();
        let key = MemberKey {
            kind,
            container,
            flags,
            instantiated_from: generic,
        };
        self.intern_member(key, decl, generic)
    }

    fn intern_member(&mut self, key: MemberKey, decl: MemberId, origin: MemberId) -> MemberId {
        if let Some(&existing) = self.member_map.get(&key) {
            return existing;
        }
        let id = self.next_member_id();
        self.members.push(MemberData {
            kind: key.kind.clone(),
            container: key.container,
            flags: key.flags,
            decl,
            origin,
            instantiated_from: key.instantiated_from,
        });
        self.member_map.insert(key, id);
        id
    }

    fn next_member_id(&self) -> MemberId {
        let Ok(raw) = u32::try_from(self.members.len()) else {
            panic!("member table overflow");
        };
        MemberId::from_raw(raw)
    }

    #[inline]
    pub fn member(&self, id: MemberId) -> &MemberData {
        &self.members[id.index()]
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// The generic form a member was instantiated from, or the member itself.
    pub fn generic_form(&self, id: MemberId) -> MemberId {
        let from = self.members[id.index()].instantiated_from;
        if from.is_some() {
            from
        } else {
            id
        }
    }

    /// Own type parameters of a member's generic form.
    pub fn own_type_params(&self, id: MemberId) -> SmallVec<[TypeVarId; 2]> {
        self.members[self.generic_form(id).index()]
            .kind
            .type_params()
            .iter()
            .copied()
            .collect()
    }
}

impl Default for TypeSystem {
    fn default() -> Self {
        Self::new()
    }
}
