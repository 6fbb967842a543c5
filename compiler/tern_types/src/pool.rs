//! Hash-consed type pool.
//!
//! Every [`TypeKind`] is interned exactly once; structurally equal types
//! share one [`TypeId`]. Substitutions and least-upper-bound candidate sets
//! are interned alongside so that `Subst` and `Lub` kinds stay `Copy`.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use tern_ir::{ClassId, TypeId};

use crate::flags::TypeFlags;
use crate::kind::{LubId, PrimKind, SubstId, TypeKind, TypeVarId};

/// Substitution bindings, sorted by type variable.
pub type SubstBindings = SmallVec<[(TypeVarId, TypeId); 4]>;

/// Lub candidates, sorted and deduplicated.
pub type LubCandidates = SmallVec<[TypeId; 4]>;

pub struct Pool {
    kinds: Vec<TypeKind>,
    flags: Vec<TypeFlags>,
    map: FxHashMap<TypeKind, TypeId>,
    substs: Vec<SubstBindings>,
    subst_map: FxHashMap<SubstBindings, SubstId>,
    lubs: Vec<LubCandidates>,
    lub_map: FxHashMap<LubCandidates, LubId>,
}

impl Pool {
    /// Create a pool with the primitive types, the null type and the empty
    /// substitution pre-interned at their fixed ids.
    pub fn new() -> Self {
        let mut pool = Pool {
            kinds: Vec::with_capacity(128),
            flags: Vec::with_capacity(128),
            map: FxHashMap::default(),
            substs: Vec::new(),
            subst_map: FxHashMap::default(),
            lubs: Vec::new(),
            lub_map: FxHashMap::default(),
        };
        for prim in PrimKind::ALL {
            let id = pool.intern(TypeKind::Prim(prim));
            debug_assert_eq!(id, prim.type_id());
        }
        let null = pool.intern(TypeKind::Null);
        debug_assert_eq!(null, TypeId::NULL);
        let empty = pool.intern_subst(SubstBindings::new());
        debug_assert_eq!(empty, SubstId::EMPTY);
        pool
    }

    /// Intern a type kind.
    pub fn intern(&mut self, kind: TypeKind) -> TypeId {
        if let Some(&id) = self.map.get(&kind) {
            return id;
        }
        let Ok(raw) = u32::try_from(self.kinds.len()) else {
            panic!("type pool overflow: {} types", self.kinds.len());
        };
        let id = TypeId::from_raw(raw);
        let flags = self.compute_flags(kind);
        self.kinds.push(kind);
        self.flags.push(flags);
        self.map.insert(kind, id);
        id
    }

    fn compute_flags(&self, kind: TypeKind) -> TypeFlags {
        match kind {
            TypeKind::Prim(_) => TypeFlags::IS_PRIMITIVE,
            TypeKind::Null | TypeKind::Class(_) => TypeFlags::IS_REFERENCE,
            TypeKind::Array(elem) => {
                TypeFlags::IS_REFERENCE
                    | TypeFlags::IS_ARRAY
                    | (self.flags(elem) & TypeFlags::PROPAGATED)
            }
            TypeKind::TypeVar(_) => TypeFlags::IS_REFERENCE | TypeFlags::HAS_TYPE_VAR,
            TypeKind::Subst { subst, outer, .. } => {
                let mut flags = TypeFlags::IS_REFERENCE | TypeFlags::HAS_SUBST;
                for &(_, arg) in self.subst(subst) {
                    flags |= self.flags(arg) & TypeFlags::PROPAGATED;
                }
                if outer.is_some() {
                    flags |= self.flags(outer) & TypeFlags::PROPAGATED;
                }
                flags
            }
            TypeKind::Lub(lub) => {
                let mut flags = TypeFlags::IS_REFERENCE | TypeFlags::HAS_LUB;
                for &candidate in self.lub(lub) {
                    flags |= self.flags(candidate) & TypeFlags::PROPAGATED;
                }
                flags
            }
        }
    }

    #[inline]
    pub fn kind(&self, id: TypeId) -> TypeKind {
        self.kinds[id.index()]
    }

    #[inline]
    pub fn flags(&self, id: TypeId) -> TypeFlags {
        self.flags[id.index()]
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    // Constructors

    #[inline]
    pub fn prim(&self, kind: PrimKind) -> TypeId {
        kind.type_id()
    }

    pub fn array(&mut self, elem: TypeId) -> TypeId {
        self.intern(TypeKind::Array(elem))
    }

    pub fn class(&mut self, class: ClassId) -> TypeId {
        self.intern(TypeKind::Class(class))
    }

    pub fn type_var(&mut self, var: TypeVarId) -> TypeId {
        self.intern(TypeKind::TypeVar(var))
    }

    pub fn subst_class(&mut self, base: ClassId, subst: SubstId, outer: TypeId) -> TypeId {
        self.intern(TypeKind::Subst { base, subst, outer })
    }

    /// Intern a lub placeholder over `candidates`.
    ///
    /// A single distinct candidate is returned as-is.
    pub fn lub_of(&mut self, candidates: &[TypeId]) -> TypeId {
        let mut sorted: LubCandidates = candidates.iter().copied().collect();
        sorted.sort_unstable();
        sorted.dedup();
        if let [only] = sorted.as_slice() {
            return *only;
        }
        let lub = self.intern_lub(sorted);
        self.intern(TypeKind::Lub(lub))
    }

    // Substitutions

    /// Intern a substitution. Bindings are sorted by variable; later
    /// duplicates of a variable are dropped.
    pub fn intern_subst(&mut self, mut bindings: SubstBindings) -> SubstId {
        bindings.sort_by_key(|&(var, _)| var);
        bindings.dedup_by_key(|&mut (var, _)| var);
        if let Some(&id) = self.subst_map.get(&bindings) {
            return id;
        }
        let Ok(raw) = u32::try_from(self.substs.len()) else {
            panic!("substitution table overflow");
        };
        let id = SubstId::from_raw(raw);
        self.substs.push(bindings.clone());
        self.subst_map.insert(bindings, id);
        id
    }

    #[inline]
    pub fn subst(&self, id: SubstId) -> &[(TypeVarId, TypeId)] {
        &self.substs[id.index()]
    }

    /// Replacement for `var` under `subst`, if bound.
    pub fn subst_lookup(&self, subst: SubstId, var: TypeVarId) -> Option<TypeId> {
        let bindings = self.subst(subst);
        bindings
            .binary_search_by_key(&var, |&(v, _)| v)
            .ok()
            .map(|i| bindings[i].1)
    }

    fn intern_lub(&mut self, candidates: LubCandidates) -> LubId {
        if let Some(&id) = self.lub_map.get(&candidates) {
            return id;
        }
        let Ok(raw) = u32::try_from(self.lubs.len()) else {
            panic!("lub table overflow");
        };
        let id = LubId::from_raw(raw);
        self.lubs.push(candidates.clone());
        self.lub_map.insert(candidates, id);
        id
    }

    #[inline]
    pub fn lub(&self, id: LubId) -> &[TypeId] {
        &self.lubs[id.index()]
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
