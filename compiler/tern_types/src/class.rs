//! Class and interface definitions.

use bitflags::bitflags;

use tern_ir::{MemberId, Name, TypeId};

use crate::kind::TypeVarId;

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ClassFlags: u8 {
        const INTERFACE = 1 << 0;
        const ABSTRACT = 1 << 1;
        const FINAL = 1 << 2;
        /// Static nested class: no enclosing instance.
        const STATIC = 1 << 3;
        /// Inner class: carries an enclosing instance of `outer`.
        const INNER = 1 << 4;
    }
}

/// A declared class or interface.
#[derive(Clone, Debug)]
pub struct ClassDef {
    /// Fully qualified name, enclosing classes included (`pkg.Outer.Inner`).
    pub name: Name,
    pub flags: ClassFlags,
    /// Declared type parameters, in declaration order.
    pub type_params: Vec<TypeVarId>,
    /// Enclosing-instance type for inner classes. May be generic.
    pub outer: Option<TypeId>,
    /// `None` for `core.Object` and for interfaces.
    pub superclass: Option<TypeId>,
    pub interfaces: Vec<TypeId>,
    /// Members declared directly on this class, in declaration order.
    pub members: Vec<MemberId>,
}

impl ClassDef {
    #[inline]
    pub fn is_interface(&self) -> bool {
        self.flags.contains(ClassFlags::INTERFACE)
    }

    #[inline]
    pub fn is_final(&self) -> bool {
        self.flags.contains(ClassFlags::FINAL)
    }
}
