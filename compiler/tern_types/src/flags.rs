//! Pre-computed type flags.
//!
//! Computed once when a type is interned so that substitution and
//! erasure can skip types that cannot change.

use bitflags::bitflags;

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TypeFlags: u8 {
        /// Mentions a type variable somewhere inside.
        const HAS_TYPE_VAR = 1 << 0;
        /// Contains a parameterized instantiation.
        const HAS_SUBST = 1 << 1;
        /// Contains an unresolved least-upper-bound placeholder.
        const HAS_LUB = 1 << 2;

        const IS_PRIMITIVE = 1 << 4;
        const IS_REFERENCE = 1 << 5;
        const IS_ARRAY = 1 << 6;

        /// Flags that propagate from children to parents.
        const PROPAGATED = Self::HAS_TYPE_VAR.bits() | Self::HAS_SUBST.bits() | Self::HAS_LUB.bits();
    }
}

impl TypeFlags {
    /// Whether the type is already in erased form, structurally.
    ///
    /// Raw classes still need their outer link canonicalized.
    #[inline]
    pub const fn is_erased(self) -> bool {
        !self.intersects(Self::PROPAGATED)
    }
}
