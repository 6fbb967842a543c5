//! Symbol construction for procedures, static fields and class layout.

use std::fmt::Write as _;

use tern_ir::{MemberId, TypeId};
use tern_types::{MemberKind, PrimKind, TypeKind, TypeSystem};

use crate::{
    MangleError, ARRAY_CLASS_NAME, CONSTRUCTOR_MARKER, DV_MARKER, INIT_MARKER, ITABLE_MARKER,
    ITYPE_MARKER, IT_INIT_MARKER, MANGLE_PREFIX, SIZE_MARKER, STATIC_MARKER, VOID_ARGS,
};


/// Symbol mangler over a resolved [`TypeSystem`].
///
/// Stateless apart from the borrowed type system: the same input always
/// produces the same name.
#[derive(Clone, Copy)]
pub struct Mangler<'ts> {
    ts: &'ts TypeSystem,
}

impl<'ts> Mangler<'ts> {
    #[must_use]
    pub fn new(ts: &'ts TypeSystem) -> Self {
        Mangler { ts }
    }

    pub fn type_system(&self) -> &'ts TypeSystem {
        self.ts
    }

    /// Name of the class or interface `ty` as it appears in symbols.
    ///
    /// Arrays share the runtime's array class.
    pub fn class_name(&self, ty: TypeId) -> Result<&'ts str, MangleError> {
        match self.ts.kind(ty) {
            TypeKind::Class(class) => Ok(self.ts.class_name(class)),
            TypeKind::Array(_) => Ok(ARRAY_CLASS_NAME),
            _ => Err(MangleError::NotAClass { ty: self.ts.display_name(ty) }),
        }
    }

    /// Layout type name: `class.` or `interface.` followed by the class name.
    pub fn class_type_name(&self, ty: TypeId) -> Result<String, MangleError> {
        match self.ts.kind(ty) {
            TypeKind::Class(class) => {
                let def = self.ts.class(class);
                let prefix = if def.is_interface() { "interface." } else { "class." };
                Ok(format!("{prefix}{}", self.ts.class_name(class)))
            }
            TypeKind::Array(_) => Ok(ARRAY_CLASS_NAME.to_owned()),
            _ => Err(MangleError::NotAClass { ty: self.ts.display_name(ty) }),
        }
    }

    /// Dispatch-vector type name (`dv.`) or interface-table type name
    /// (`itable.`) depending on what `ty` is.
    pub fn table_type_name(&self, ty: TypeId) -> Result<String, MangleError> {
        let name = self.class_name(ty)?;
        let prefix = if self.is_interface(ty) { "itable." } else { "dv." };
        Ok(format!("{prefix}{name}"))
    }

    /// Mangled name of a method or constructor.
    ///
    /// The member's container and formals must already be canonical.
    #[tracing::instrument(level = "trace", skip_all, fields(member = member.raw()))]
    pub fn procedure(&self, member: MemberId) -> Result<String, MangleError> {
        let data = self.ts.member(member);
        let container = self.class_name(data.container)?;

        let mut result = String::with_capacity(64);
        result.push_str(MANGLE_PREFIX);
        push_length_prefixed(&mut result, container);
        match &data.kind {
            MemberKind::Method { name, formals, .. } => {
                result.push('_');
                push_length_prefixed(&mut result, self.ts.name(*name));
                self.push_arg_codes(&mut result, formals)?;
            }
            MemberKind::Constructor { formals, .. } => {
                result.push_str(CONSTRUCTOR_MARKER);
                self.push_arg_codes(&mut result, formals)?;
            }
            MemberKind::Field { .. } | MemberKind::Initializer => {
                return Err(MangleError::NotAProcedure { member: self.ts.member_display(member) });
            }
        }
        Ok(result)
    }

    /// Mangled name of a static field's storage.
    pub fn static_field(&self, member: MemberId) -> Result<String, MangleError> {
        let data = self.ts.member(member);
        let MemberKind::Field { name, .. } = data.kind else {
            return Err(MangleError::NotAStaticField { member: self.ts.member_display(member) });
        };
        if !data.is_static() {
            return Err(MangleError::NotAStaticField { member: self.ts.member_display(member) });
        }
        let class = self.class_type_name(data.container)?;
        Ok(format!("{MANGLE_PREFIX}{STATIC_MARKER}{class}_{}", self.ts.name(name)))
    }

    /// Symbol holding the instance size of `ty`.
    pub fn size(&self, ty: TypeId) -> Result<String, MangleError> {
        self.class_symbol(SIZE_MARKER, ty)
    }

    /// Symbol of the dispatch-vector instance of `ty`.
    pub fn dispatch_vector(&self, ty: TypeId) -> Result<String, MangleError> {
        self.class_symbol(DV_MARKER, ty)
    }

    /// Symbol of the interface table `class` keeps for `iface`.
    pub fn interface_table(&self, iface: TypeId, class: TypeId) -> Result<String, MangleError> {
        let iface_name = self.interface_name(iface)?;
        let class_name = self.class_name(class)?;

        let mut result = String::with_capacity(64);
        result.push_str(MANGLE_PREFIX);
        result.push_str(ITABLE_MARKER);
        push_length_prefixed(&mut result, iface_name);
        result.push('_');
        push_length_prefixed(&mut result, class_name);
        Ok(result)
    }

    /// Symbol of the class-initialization function of `ty`.
    pub fn class_init(&self, ty: TypeId) -> Result<String, MangleError> {
        self.class_symbol(INIT_MARKER, ty)
    }

    /// Symbol of the function that fills the interface tables of `ty`.
    pub fn interfaces_init(&self, ty: TypeId) -> Result<String, MangleError> {
        self.class_symbol(IT_INIT_MARKER, ty)
    }

    /// Symbol of the runtime descriptor of interface `iface`.
    pub fn interface_descriptor(&self, iface: TypeId) -> Result<String, MangleError> {
        let name = self.interface_name(iface)?;
        let mut result = String::with_capacity(64);
        result.push_str(MANGLE_PREFIX);
        result.push_str(ITYPE_MARKER);
        push_length_prefixed(&mut result, name);
        Ok(result)
    }

    fn class_symbol(&self, marker: &str, ty: TypeId) -> Result<String, MangleError> {
        let name = self.class_name(ty)?;
        let mut result = String::with_capacity(64);
        result.push_str(MANGLE_PREFIX);
        result.push_str(marker);
        push_length_prefixed(&mut result, name);
        Ok(result)
    }

    fn interface_name(&self, ty: TypeId) -> Result<&'ts str, MangleError> {
        match self.ts.kind(ty) {
            TypeKind::Class(class) if self.ts.class(class).is_interface() => Ok(self.ts.class_name(class)),
            _ => Err(MangleError::NotAnInterface { ty: self.ts.display_name(ty) }),
        }
    }

    /// Whether `ty` is an interface or an instantiation of one.
    pub fn is_interface(&self, ty: TypeId) -> bool {
        self.ts.class_of(ty).is_some_and(|class| self.ts.class(class).is_interface())
    }

    fn push_arg_codes(&self, out: &mut String, formals: &[TypeId]) -> Result<(), MangleError> {
        if formals.is_empty() {
            out.push_str(VOID_ARGS);
            return Ok(());
        }
        for &formal in formals {
            self.push_arg_code(out, formal)?;
        }
        Ok(())
    }

    fn push_arg_code(&self, out: &mut String, ty: TypeId) -> Result<(), MangleError> {
        match self.ts.kind(ty) {
            TypeKind::Array(elem) => {
                out.push_str("_a");
                self.push_arg_code(out, elem)
            }
            TypeKind::Class(class) => {
                out.push('_');
                push_length_prefixed(out, self.ts.class_name(class));
                Ok(())
            }
            TypeKind::Prim(PrimKind::Boolean) => {
                out.push_str("_b");
                Ok(())
            }
            TypeKind::Prim(PrimKind::Float) => {
                out.push_str("_f");
                Ok(())
            }
            TypeKind::Prim(PrimKind::Double) => {
                out.push_str("_d");
                Ok(())
            }
            TypeKind::Prim(prim) if prim.is_integral() => {
                let bits = prim.bit_width().unwrap_or_default();
                let _ = write!(out, "_i{bits}");
                Ok(())
            }
            _ => Err(MangleError::UnsupportedArgType { ty: self.ts.display_name(ty) }),
        }
    }
}

fn push_length_prefixed(out: &mut String, component: &str) {
    let _ = write!(out, "{}{component}", component.len());
}
