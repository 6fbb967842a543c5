//! Type canonicalization.

use tern_ir::TypeId;
use tern_stack::ensure_sufficient_stack;
use tern_types::{TypeKind, TypeSystem};

use crate::Eraser;

impl Eraser {
    /// Erase `ty` to its runtime representation.
    ///
    /// The result contains only primitives, the null type, arrays and raw
    /// classes. Instantiations share their base class's representation and
    /// arrays erase element-wise. Canonical types map to themselves.
    #[tracing::instrument(level = "trace", skip_all, fields(ty = ty.raw()))]
    pub fn canonicalize(&mut self, ts: &mut TypeSystem, ty: TypeId) -> TypeId {
        if let Some(&cached) = self.types.get(&ty) {
            return cached;
        }
        let canonical = ensure_sufficient_stack(|| self.erase(ts, ty));
        self.types.insert(ty, canonical);
        self.types.insert(canonical, canonical);
        canonical
    }

    fn erase(&mut self, ts: &mut TypeSystem, ty: TypeId) -> TypeId {
        let mut erased = ts.bound_erasure(ty);
        if let TypeKind::Lub(_) = ts.kind(erased) {
            let joined = ts.resolve_lub(erased);
            tracing::trace!(
                lub = %ts.display_name(erased),
                joined = %ts.display_name(joined),
                "resolved lub"
            );
            erased = ts.bound_erasure(joined);
        }

        match ts.kind(erased) {
            TypeKind::Prim(_) | TypeKind::Null => erased,
            TypeKind::Subst { base, .. } => {
                // The enclosing instance may itself be generic.
                self.canonical_outer(ts, base);
                let raw = ts.class_type(base);
                self.canonicalize(ts, raw)
            }
            TypeKind::Array(elem) => {
                let elem = self.canonicalize(ts, elem);
                ts.array(elem)
            }
            TypeKind::Class(class) => {
                self.canonical_outer(ts, class);
                erased
            }
            // Bound erasure and lub resolution leave neither behind.
            TypeKind::TypeVar(_) | TypeKind::Lub(_) => ts.well_known().object_ty,
        }
    }
}
