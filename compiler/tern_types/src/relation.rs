//! Subtyping, assignability and least upper bounds.
//!
//! Subtyping here is erased: two instantiations of one class relate the way
//! their raw classes do. That is all member lookup and lub resolution need
//! once the front end has accepted the program.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use tern_ir::{ClassId, TypeId};
use tern_stack::ensure_sufficient_stack;

use crate::kind::TypeKind;
use crate::TypeSystem;

impl TypeSystem {
    /// Direct supertypes of `ty`. Inherited types of an instantiation are
    /// substituted with its bindings.
    pub fn supertypes(&mut self, ty: TypeId) -> Vec<TypeId> {
        let object = self.well_known().object_ty;
        match self.kind(ty) {
            TypeKind::Prim(_) | TypeKind::Null => Vec::new(),
            TypeKind::Array(_) => vec![object],
            TypeKind::TypeVar(var) => vec![self.type_var(var).bound],
            TypeKind::Lub(lub) => self.pool().lub(lub).to_vec(),
            TypeKind::Class(class) => self.declared_supertypes(class),
            TypeKind::Subst { base, .. } => {
                let declared = self.declared_supertypes(base);
                let subst = self.full_subst(ty);
                declared
                    .into_iter()
                    .map(|t| self.subst_type(t, subst))
                    .collect()
            }
        }
    }

    fn declared_supertypes(&self, class: ClassId) -> Vec<TypeId> {
        let def = self.class(class);
        let mut supers: Vec<TypeId> = def.superclass.into_iter().collect();
        supers.extend_from_slice(&def.interfaces);
        if def.is_interface() && def.interfaces.is_empty() {
            supers.push(self.well_known().object_ty);
        }
        supers
    }

    /// `class` and every class or interface it extends, breadth-first,
    /// superclasses before interfaces at each level.
    pub fn class_closure(&self, class: ClassId) -> Vec<ClassId> {
        let mut order = vec![class];
        let mut seen: FxHashSet<ClassId> = FxHashSet::default();
        seen.insert(class);
        let mut next = 0;
        while next < order.len() {
            let current = order[next];
            next += 1;
            for sup in self.declared_supertypes(current) {
                if let Some(c) = self.class_of(sup) {
                    if seen.insert(c) {
                        order.push(c);
                    }
                }
            }
        }
        order
    }

    /// Classes the erasure of a reference type is a subtype of.
    fn erased_closure(&self, ty: TypeId) -> Vec<ClassId> {
        let erased = self.bound_erasure(ty);
        match self.kind(erased) {
            TypeKind::Class(c) | TypeKind::Subst { base: c, .. } => self.class_closure(c),
            _ => vec![self.well_known().object],
        }
    }

    pub fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        if sub == sup {
            return true;
        }
        ensure_sufficient_stack(|| match (self.kind(sub), self.kind(sup)) {
            (TypeKind::Prim(_), _) | (_, TypeKind::Prim(_)) => false,
            (TypeKind::Null, _) => true,
            (_, TypeKind::Null) => false,
            (TypeKind::Lub(lub), _) => self
                .pool()
                .lub(lub)
                .iter()
                .all(|&c| self.is_subtype(c, sup)),
            (_, TypeKind::Lub(lub)) => self
                .pool()
                .lub(lub)
                .iter()
                .any(|&c| self.is_subtype(sub, c)),
            (TypeKind::TypeVar(var), _) => self.is_subtype(self.type_var(var).bound, sup),
            (_, TypeKind::TypeVar(_)) => false,
            (TypeKind::Array(a), TypeKind::Array(b)) => {
                if self.is_reference(a) && self.is_reference(b) {
                    self.is_subtype(a, b)
                } else {
                    a == b
                }
            }
            (TypeKind::Array(_), _) => self.class_of(sup) == Some(self.well_known().object),
            (_, TypeKind::Array(_)) => false,
            (_, TypeKind::Class(c) | TypeKind::Subst { base: c, .. }) => {
                self.erased_closure(sub).contains(&c)
            }
        })
    }

    /// Assignment conversion: subtyping or primitive widening.
    pub fn is_assignable(&self, from: TypeId, to: TypeId) -> bool {
        match (self.kind(from), self.kind(to)) {
            (TypeKind::Prim(a), TypeKind::Prim(b)) => a.widens_to(b),
            _ => self.is_subtype(from, to),
        }
    }

    /// Join of a candidate set: the most specific erased type every
    /// candidate converts to.
    ///
    /// Null candidates are ignored. Among minimal common supertypes a class
    /// wins over an interface, and `core.Object` is the fallback.
    pub fn calculate_lub(&mut self, candidates: &[TypeId]) -> TypeId {
        let candidates: SmallVec<[TypeId; 4]> = candidates
            .iter()
            .copied()
            .filter(|&c| c != TypeId::NULL)
            .collect();
        let object = self.well_known().object_ty;
        let Some(&first) = candidates.first() else {
            return TypeId::NULL;
        };
        if candidates.iter().all(|&c| c == first) {
            return first;
        }

        if candidates.iter().all(|&c| self.is_primitive(c)) {
            return candidates
                .iter()
                .copied()
                .find(|&target| candidates.iter().all(|&c| self.is_assignable(c, target)))
                .unwrap_or(object);
        }

        let elems: Option<SmallVec<[TypeId; 4]>> = candidates
            .iter()
            .map(|&c| match self.kind(c) {
                TypeKind::Array(elem) => Some(elem),
                _ => None,
            })
            .collect();
        if let Some(elems) = elems {
            if elems.iter().all(|&e| self.is_reference(e)) {
                let elem = ensure_sufficient_stack(|| self.calculate_lub(&elems));
                return self.array(elem);
            }
            return object;
        }

        let closures: Vec<Vec<ClassId>> = candidates.iter().map(|&c| self.erased_closure(c)).collect();
        let common: Vec<ClassId> = closures[0]
            .iter()
            .copied()
            .filter(|c| closures[1..].iter().all(|closure| closure.contains(c)))
            .collect();
        let minimal: Vec<ClassId> = common
            .iter()
            .copied()
            .filter(|&c| {
                !common
                    .iter()
                    .any(|&d| d != c && self.class_closure(d).contains(&c))
            })
            .collect();
        let chosen = minimal
            .iter()
            .copied()
            .find(|&c| !self.class(c).is_interface())
            .or_else(|| minimal.first().copied());
        match chosen {
            Some(class) => self.class_type(class),
            None => object,
        }
    }

    /// Resolve a lub placeholder to its join; other types pass through.
    pub fn resolve_lub(&mut self, ty: TypeId) -> TypeId {
        match self.kind(ty) {
            TypeKind::Lub(lub) => {
                let candidates = self.pool().lub(lub).to_vec();
                self.calculate_lub(&candidates)
            }
            _ => ty,
        }
    }
}
