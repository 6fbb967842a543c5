//! Typed handles into the tables owned by the type system.
//!
//! The AST never stores a type, class or member by value. It stores one of
//! these 32-bit handles; `tern_types::TypeSystem` owns what they point at.

use std::fmt;

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Sentinel for "no such entity".
            pub const NONE: $name = $name(u32::MAX);

            /// Create from a raw index.
            #[inline]
            pub const fn from_raw(raw: u32) -> Self {
                $name(raw)
            }

            /// Get the raw index.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            /// Index into the owning table.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Whether this handle is something other than [`Self::NONE`].
            #[inline]
            pub const fn is_some(self) -> bool {
                self.0 != u32::MAX
            }

            /// Whether this handle is [`Self::NONE`].
            #[inline]
            pub const fn is_none(self) -> bool {
                self.0 == u32::MAX
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_some() {
                    write!(f, concat!(stringify!($name), "({})"), self.0)
                } else {
                    write!(f, concat!(stringify!($name), "::NONE"))
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::NONE
            }
        }
    };
}

define_handle!(
    /// Hash-consed type in the type pool.
    ///
    /// Structurally equal types share one id, so `==` is type identity.
    /// The primitive types and the null type are pre-interned at fixed
    /// indices.
    TypeId
);

define_handle!(
    /// Class or interface definition.
    ClassId
);

define_handle!(
    /// Hash-consed member instance: method, constructor, field or initializer.
    ///
    /// Two member instances with equal kind, container and flags share one id.
    MemberId
);

define_handle!(
    /// Local variable or formal parameter in the AST arena.
    LocalId
);

impl TypeId {
    pub const BOOLEAN: TypeId = TypeId(0);
    pub const BYTE: TypeId = TypeId(1);
    pub const SHORT: TypeId = TypeId(2);
    pub const CHAR: TypeId = TypeId(3);
    pub const INT: TypeId = TypeId(4);
    pub const LONG: TypeId = TypeId(5);
    pub const FLOAT: TypeId = TypeId(6);
    pub const DOUBLE: TypeId = TypeId(7);
    pub const VOID: TypeId = TypeId(8);
    /// Type of the `null` literal.
    pub const NULL: TypeId = TypeId(9);

    /// First index handed out for non-builtin types.
    pub const FIRST_DYNAMIC: u32 = 10;

    /// Whether this is one of the pre-interned primitive types (including `void`).
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 <= Self::VOID.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_none() {
        assert!(TypeId::NONE.is_none());
        assert!(MemberId::default().is_none());
        assert!(ClassId::from_raw(0).is_some());
    }

    #[test]
    fn primitive_range() {
        assert!(TypeId::BOOLEAN.is_primitive());
        assert!(TypeId::VOID.is_primitive());
        assert!(!TypeId::NULL.is_primitive());
        assert!(!TypeId::from_raw(TypeId::FIRST_DYNAMIC).is_primitive());
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", TypeId::INT), "TypeId(4)");
        assert_eq!(format!("{:?}", LocalId::NONE), "LocalId::NONE");
    }
}
