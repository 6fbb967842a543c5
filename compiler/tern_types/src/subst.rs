//! Substitution and bound erasure.

use tern_ir::{MemberId, TypeId};
use tern_stack::ensure_sufficient_stack;

use crate::kind::{SubstId, TypeKind};
use crate::member::MemberKind;
use crate::pool::{LubCandidates, SubstBindings};
use crate::TypeSystem;

impl TypeSystem {
    /// Apply `subst` to `ty`.
    ///
    /// Raw classes are left alone; nested instantiations have their own
    /// bindings and outer types substituted.
    pub fn subst_type(&mut self, ty: TypeId, subst: SubstId) -> TypeId {
        if subst == SubstId::EMPTY || self.flags(ty).is_erased() {
            return ty;
        }
        ensure_sufficient_stack(|| match self.kind(ty) {
            TypeKind::Prim(_) | TypeKind::Null | TypeKind::Class(_) => ty,
            TypeKind::TypeVar(var) => self.pool().subst_lookup(subst, var).unwrap_or(ty),
            TypeKind::Array(elem) => {
                let elem = self.subst_type(elem, subst);
                self.array(elem)
            }
            TypeKind::Subst {
                base,
                subst: inner,
                outer,
            } => {
                let bindings: SubstBindings = self.pool().subst(inner).iter().copied().collect();
                let mut replaced = SubstBindings::with_capacity(bindings.len());
                for (var, arg) in bindings {
                    replaced.push((var, self.subst_type(arg, subst)));
                }
                let inner = self.pool_mut().intern_subst(replaced);
                let outer = if outer.is_some() {
                    self.subst_type(outer, subst)
                } else {
                    outer
                };
                self.pool_mut().subst_class(base, inner, outer)
            }
            TypeKind::Lub(lub) => {
                let candidates: LubCandidates = self.pool().lub(lub).iter().copied().collect();
                let replaced: LubCandidates = candidates
                    .into_iter()
                    .map(|c| self.subst_type(c, subst))
                    .collect();
                self.lub_of(&replaced)
            }
        })
    }

    /// Apply `subst` to every type mentioned by a member signature.
    ///
    /// Own type parameters that `subst` binds are removed from the result.
    pub fn subst_kind(&mut self, kind: &MemberKind, subst: SubstId) -> MemberKind {
        if subst == SubstId::EMPTY {
            return kind.clone();
        }
        let mapped = kind.map_types(|t| self.subst_type(t, subst));
        mapped.retain_type_params(|v| self.pool().subst_lookup(subst, v).is_none())
    }

    /// The image of `member` under `subst`, seen from `container`.
    ///
    /// Works for every member kind; initializers only change container.
    pub fn subst_member(&mut self, member: MemberId, subst: SubstId, container: TypeId) -> MemberId {
        let kind = self.member(member).kind.clone();
        let kind = self.subst_kind(&kind, subst);
        if kind == self.member(member).kind && container == self.member(member).container {
            return member;
        }
        self.derive_member(member, kind, container)
    }

    /// The image of `member` as inherited by instantiation `container`.
    ///
    /// Raw containers see declarations unchanged.
    pub fn member_in(&mut self, member: MemberId, container: TypeId) -> MemberId {
        match self.kind(container) {
            TypeKind::Subst { .. } => {
                let subst = self.full_subst(container);
                self.subst_member(member, subst, container)
            }
            _ => member,
        }
    }

    /// Replace type variables by the bound erasure of their upper bound.
    ///
    /// Other kinds are returned unchanged; parameterized types and arrays
    /// are erased structurally by the canonicalizer.
    pub fn bound_erasure(&self, ty: TypeId) -> TypeId {
        let mut current = ty;
        // Bound chains are acyclic in well-typed input.
        for _ in 0..=self.type_var_count() {
            match self.kind(current) {
                TypeKind::TypeVar(var) => current = self.type_var(var).bound,
                _ => return current,
            }
        }
        self.well_known().object_ty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::ClassFlags;
    use crate::member::{MemberFlags, MemberKind};
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;

    #[test]
    fn subst_replaces_bound_vars_only() {
        let mut ts = TypeSystem::new();
        let c = ts.declare_class("p.Box", ClassFlags::empty());
        let t = ts.add_type_param(c, "T", None);
        let u = ts.add_type_param(c, "U", None);
        let t_ty = ts.type_var_type(t);
        let u_ty = ts.type_var_type(u);
        let string = ts.well_known().string_ty;
        let s = ts.make_subst([(t, string)]);

        assert_eq!(ts.subst_type(t_ty, s), string);
        assert_eq!(ts.subst_type(u_ty, s), u_ty);
        let arr = ts.array(t_ty);
        let expected = ts.array(string);
        assert_eq!(ts.subst_type(arr, s), expected);
        assert_eq!(ts.subst_type(TypeId::INT, s), TypeId::INT);
    }

    #[test]
    fn subst_descends_into_instantiations() {
        let mut ts = TypeSystem::new();
        let list = ts.declare_class("p.List", ClassFlags::INTERFACE);
        let e = ts.add_type_param(list, "E", None);
        let holder = ts.declare_class("p.Holder", ClassFlags::empty());
        let t = ts.add_type_param(holder, "T", None);
        let t_ty = ts.type_var_type(t);
        let list_of_t = ts.instantiate(list, &[t_ty], None);
        let string = ts.well_known().string_ty;
        let s = ts.make_subst([(t, string)]);

        let result = ts.subst_type(list_of_t, s);
        let expected = ts.instantiate(list, &[string], None);
        assert_eq!(result, expected);
        let TypeKind::Subst { subst, .. } = ts.kind(result) else {
            panic!("expected instantiation");
        };
        assert_eq!(ts.pool().subst_lookup(subst, e), Some(string));
    }

    #[test]
    fn subst_member_builds_image_with_back_reference() {
        let mut ts = TypeSystem::new();
        let c = ts.declare_class("p.Box", ClassFlags::empty());
        let t = ts.add_type_param(c, "T", None);
        let t_ty = ts.type_var_type(t);
        let get = ts.intern("get");
        let decl = ts.declare_member(
            c,
            MemberKind::Method { name: get, formals: smallvec![], ret: t_ty, type_params: smallvec![] },
            MemberFlags::empty(),
        );
        let string = ts.well_known().string_ty;
        let box_of_string = ts.instantiate(c, &[string], None);

        let image = ts.member_in(decl, box_of_string);
        assert_ne!(image, decl);
        let data = ts.member(image);
        assert_eq!(data.origin, decl);
        assert_eq!(data.decl, decl);
        assert_eq!(data.container, box_of_string);
        assert_eq!(
            data.kind,
            MemberKind::Method { name: get, formals: smallvec![], ret: string, type_params: smallvec![] }
        );
        assert_eq!(ts.member_in(decl, box_of_string), image);
    }

    #[test]
    fn bound_erasure_follows_bounds() {
        let mut ts = TypeSystem::new();
        let number = ts.declare_class("p.Number", ClassFlags::ABSTRACT);
        let number_ty = ts.class_type(number);
        let c = ts.declare_class("p.Pair", ClassFlags::empty());
        let a = ts.add_type_param(c, "A", Some(number_ty));
        let a_ty = ts.type_var_type(a);
        let b = ts.add_type_param(c, "B", Some(a_ty));
        let b_ty = ts.type_var_type(b);
        let unbounded = ts.add_type_param(c, "C", None);
        let unbounded_ty = ts.type_var_type(unbounded);

        assert_eq!(ts.bound_erasure(b_ty), number_ty);
        assert_eq!(ts.bound_erasure(unbounded_ty), ts.well_known().object_ty);
        assert_eq!(ts.bound_erasure(TypeId::INT), TypeId::INT);
    }
}
