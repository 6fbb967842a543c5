//! Human-readable type and member names.
//!
//! `display_name` on an erased type is the exact text the mangler embeds
//! in symbols, so its output for classes, arrays and primitives is ABI.

use std::fmt::Write;

use tern_ir::{MemberId, TypeId};
use tern_stack::ensure_sufficient_stack;

use crate::kind::TypeKind;
use crate::member::MemberKind;
use crate::TypeSystem;

impl TypeSystem {
    /// Display name of a type.
    ///
    /// Classes print their qualified name, arrays `elem[]`, primitives their
    /// keyword, instantiations `Base<A, B>`, type variables their name and
    /// lub placeholders `lub(A, B)`.
    pub fn display_name(&self, ty: TypeId) -> String {
        let mut out = String::with_capacity(32);
        self.write_type(&mut out, ty);
        out
    }

    fn write_type(&self, out: &mut String, ty: TypeId) {
        if ty.is_none() {
            out.push_str("<none>");
            return;
        }
        ensure_sufficient_stack(|| match self.kind(ty) {
            TypeKind::Prim(prim) => out.push_str(prim.keyword()),
            TypeKind::Null => out.push_str("null"),
            TypeKind::Array(elem) => {
                self.write_type(out, elem);
                out.push_str("[]");
            }
            TypeKind::Class(class) => out.push_str(self.class_name(class)),
            TypeKind::TypeVar(var) => out.push_str(self.name(self.type_var(var).name)),
            TypeKind::Subst { base, subst, .. } => {
                out.push_str(self.class_name(base));
                out.push('<');
                // Arguments in declaration order, not binding order.
                let params = &self.class(base).type_params;
                for (i, &param) in params.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    match self.pool().subst_lookup(subst, param) {
                        Some(arg) => self.write_type(out, arg),
                        None => out.push_str(self.name(self.type_var(param).name)),
                    }
                }
                out.push('>');
            }
            TypeKind::Lub(lub) => {
                out.push_str("lub(");
                for (i, &candidate) in self.pool().lub(lub).iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_type(out, candidate);
                }
                out.push(')');
            }
        });
    }

    /// `Container.name(formals)` for procedures, `Container.name` for
    /// fields, `Container.<clinit>` for initializers.
    pub fn member_display(&self, member: MemberId) -> String {
        let data = self.member(member);
        let mut out = self.display_name(data.container);
        match &data.kind {
            MemberKind::Method { name, formals, .. } => {
                let _ = write!(out, ".{}(", self.name(*name));
                self.write_list(&mut out, formals);
                out.push(')');
            }
            MemberKind::Constructor { formals, .. } => {
                out.push_str(".<init>(");
                self.write_list(&mut out, formals);
                out.push(')');
            }
            MemberKind::Field { name, .. } => {
                let _ = write!(out, ".{}", self.name(*name));
            }
            MemberKind::Initializer => out.push_str(".<clinit>"),
        }
        out
    }

    fn write_list(&self, out: &mut String, types: &[TypeId]) {
        for (i, &ty) in types.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_type(out, ty);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::class::ClassFlags;
    use crate::TypeSystem;
    use pretty_assertions::assert_eq;
    use tern_ir::TypeId;

    #[test]
    fn display_of_structural_types() {
        let mut ts = TypeSystem::new();
        let map = ts.declare_class("util.Map", ClassFlags::INTERFACE);
        let k = ts.add_type_param(map, "K", None);
        ts.add_type_param(map, "V", None);
        let k_ty = ts.type_var_type(k);
        let string = ts.well_known().string_ty;
        let ints = ts.array(TypeId::INT);
        let nested = ts.array(ints);
        let inst = ts.instantiate(map, &[string, nested], None);
        let object = ts.well_known().object_ty;

        assert_eq!(ts.display_name(TypeId::INT), "int");
        assert_eq!(ts.display_name(nested), "int[][]");
        assert_eq!(ts.display_name(k_ty), "K");
        assert_eq!(ts.display_name(inst), "util.Map<core.String, int[][]>");
        let lub = ts.lub_of(&[string, object]);
        assert_eq!(ts.display_name(lub), "lub(core.Object, core.String)");
        assert_eq!(ts.display_name(TypeId::NULL), "null");
    }

    #[test]
    fn display_of_core_members() {
        let mut ts = TypeSystem::new();
        let string = ts.well_known().string_ty;
        let concat = ts.find_method(string, "concat", &[string]).unwrap();
        assert_eq!(ts.member_display(concat), "core.String.concat(core.String)");
        let chars = ts.well_known().char_array;
        let ctor = ts.find_constructor(string, &[chars]).unwrap();
        assert_eq!(ts.member_display(ctor), "core.String.<init>(char[])");
    }
}
