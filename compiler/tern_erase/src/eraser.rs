//! Memo tables shared by type and member canonicalization.

use rustc_hash::FxHashMap;

use tern_ir::{ClassId, MemberId, TypeId};
use tern_types::{SubstId, TypeSystem};

/// Canonicalizer state: memo tables keyed on declaration identity.
///
/// Nothing in the [`TypeSystem`] is mutated to record canonical forms; a
/// class's canonical outer link lives in [`Eraser::canonical_outer`].
#[derive(Default, Debug)]
pub struct Eraser {
    pub(crate) types: FxHashMap<TypeId, TypeId>,
    pub(crate) members: FxHashMap<MemberId, MemberId>,
    outer_links: FxHashMap<ClassId, Option<TypeId>>,
    class_substs: FxHashMap<ClassId, Option<SubstId>>,
    member_substs: FxHashMap<MemberId, Option<SubstId>>,
}

impl Eraser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical enclosing-instance type of `class`, computed once.
    pub fn canonical_outer(&mut self, ts: &mut TypeSystem, class: ClassId) -> Option<TypeId> {
        if let Some(&cached) = self.outer_links.get(&class) {
            tracing::trace!(class = ts.class_name(class), "outer link cache hit");
            return cached;
        }
        let outer = ts.class(class).outer;
        let canonical = outer.map(|outer| self.canonicalize(ts, outer));
        if let (Some(from), Some(to)) = (outer, canonical) {
            if from != to {
                tracing::debug!(
                    class = ts.class_name(class),
                    from = %ts.display_name(from),
                    to = %ts.display_name(to),
                    "canonicalized outer link"
                );
            }
        }
        self.outer_links.insert(class, canonical);
        canonical
    }

    /// The substitution mapping every type parameter in scope of `class` to
    /// its erasure, or `None` when the class is not generic.
    pub fn class_erasure_subst(&mut self, ts: &mut TypeSystem, class: ClassId) -> Option<SubstId> {
        if let Some(&cached) = self.class_substs.get(&class) {
            return cached;
        }
        let subst = if ts.is_generic_class(class) {
            let params = ts.in_scope_type_params(class);
            Some(self.erasure_subst_of(ts, &params))
        } else {
            None
        };
        self.class_substs.insert(class, subst);
        subst
    }

    /// The substitution erasing a generic method's or constructor's own type
    /// parameters, or `None` when it has none.
    pub fn member_erasure_subst(&mut self, ts: &mut TypeSystem, member: MemberId) -> Option<SubstId> {
        if let Some(&cached) = self.member_substs.get(&member) {
            return cached;
        }
        let params = ts.member(member).kind.type_params().to_vec();
        let subst = if params.is_empty() {
            None
        } else {
            Some(self.erasure_subst_of(ts, &params))
        };
        self.member_substs.insert(member, subst);
        subst
    }

    fn erasure_subst_of(&mut self, ts: &mut TypeSystem, params: &[tern_types::TypeVarId]) -> SubstId {
        let mut bindings = Vec::with_capacity(params.len());
        for &var in params {
            let var_ty = ts.type_var_type(var);
            bindings.push((var, self.canonicalize(ts, var_ty)));
        }
        ts.make_subst(bindings)
    }

    /// Number of memoized type results.
    pub fn cached_types(&self) -> usize {
        self.types.len()
    }

    /// Number of memoized member results.
    pub fn cached_members(&self) -> usize {
        self.members.len()
    }
}
