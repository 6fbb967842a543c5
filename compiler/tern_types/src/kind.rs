//! Type kinds stored in the pool.

use std::fmt;

use tern_ir::{ClassId, TypeId};

macro_rules! define_index {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn from_raw(raw: u32) -> Self {
                $name(raw)
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

define_index!(
    /// Interned substitution: a sorted list of `(type variable, replacement)`.
    SubstId
);

define_index!(
    /// Declared type variable.
    TypeVarId
);

define_index!(
    /// Interned candidate set of a least-upper-bound placeholder.
    LubId
);

impl SubstId {
    /// The empty substitution, interned first by every pool.
    pub const EMPTY: SubstId = SubstId(0);
}

/// Primitive type kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PrimKind {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimKind {
    pub const ALL: [PrimKind; 9] = [
        PrimKind::Boolean,
        PrimKind::Byte,
        PrimKind::Short,
        PrimKind::Char,
        PrimKind::Int,
        PrimKind::Long,
        PrimKind::Float,
        PrimKind::Double,
        PrimKind::Void,
    ];

    /// Source keyword.
    pub const fn keyword(self) -> &'static str {
        match self {
            PrimKind::Boolean => "boolean",
            PrimKind::Byte => "byte",
            PrimKind::Short => "short",
            PrimKind::Char => "char",
            PrimKind::Int => "int",
            PrimKind::Long => "long",
            PrimKind::Float => "float",
            PrimKind::Double => "double",
            PrimKind::Void => "void",
        }
    }

    /// Width in bits of an integral kind.
    pub const fn bit_width(self) -> Option<u32> {
        match self {
            PrimKind::Byte => Some(8),
            PrimKind::Short | PrimKind::Char => Some(16),
            PrimKind::Int => Some(32),
            PrimKind::Long => Some(64),
            PrimKind::Boolean | PrimKind::Float | PrimKind::Double | PrimKind::Void => None,
        }
    }

    pub const fn is_integral(self) -> bool {
        self.bit_width().is_some()
    }

    pub const fn is_numeric(self) -> bool {
        !matches!(self, PrimKind::Boolean | PrimKind::Void)
    }

    /// Pre-interned pool id of this kind.
    pub const fn type_id(self) -> TypeId {
        match self {
            PrimKind::Boolean => TypeId::BOOLEAN,
            PrimKind::Byte => TypeId::BYTE,
            PrimKind::Short => TypeId::SHORT,
            PrimKind::Char => TypeId::CHAR,
            PrimKind::Int => TypeId::INT,
            PrimKind::Long => TypeId::LONG,
            PrimKind::Float => TypeId::FLOAT,
            PrimKind::Double => TypeId::DOUBLE,
            PrimKind::Void => TypeId::VOID,
        }
    }

    /// Primitive widening conversion (identity included).
    pub const fn widens_to(self, to: PrimKind) -> bool {
        use PrimKind::{Byte, Char, Double, Float, Int, Long, Short};
        if self as u8 == to as u8 {
            return true;
        }
        match self {
            Byte => matches!(to, Short | Int | Long | Float | Double),
            Short | Char => matches!(to, Int | Long | Float | Double),
            Int => matches!(to, Long | Float | Double),
            Long => matches!(to, Float | Double),
            Float => matches!(to, Double),
            _ => false,
        }
    }
}

/// Type kind: what a [`TypeId`] points at.
///
/// Only `Prim`, `Null`, `Array` and `Class` survive erasure.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Prim(PrimKind),
    /// Type of the `null` literal.
    Null,
    Array(TypeId),
    /// Non-parameterized class or interface: either non-generic or used raw.
    Class(ClassId),
    TypeVar(TypeVarId),
    /// Instantiation `base<args>` of a generic declaration.
    Subst {
        base: ClassId,
        subst: SubstId,
        /// Enclosing-instance type of an inner class, or `TypeId::NONE`.
        outer: TypeId,
    },
    /// Least upper bound placeholder from conditional or catch inference.
    Lub(LubId),
}

impl TypeKind {
    #[inline]
    pub const fn is_reference(self) -> bool {
        !matches!(self, TypeKind::Prim(_))
    }
}
