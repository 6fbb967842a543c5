//! Member instances: methods, constructors, fields and initializers.

use bitflags::bitflags;
use smallvec::SmallVec;

use tern_ir::{MemberId, Name, TypeId};

use crate::kind::TypeVarId;

/// Formal parameter types.
pub type Formals = SmallVec<[TypeId; 4]>;

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct MemberFlags: u8 {
        const STATIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const FINAL = 1 << 2;
        const ABSTRACT = 1 << 3;
    }
}

/// Signature part of a member instance.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum MemberKind {
    Method {
        name: Name,
        formals: Formals,
        ret: TypeId,
        /// Own type parameters of a generic method.
        type_params: SmallVec<[TypeVarId; 2]>,
    },
    Constructor {
        formals: Formals,
        type_params: SmallVec<[TypeVarId; 2]>,
    },
    Field {
        name: Name,
        ty: TypeId,
    },
    Initializer,
}

impl MemberKind {
    /// Member name; constructors and initializers have none.
    pub fn name(&self) -> Option<Name> {
        match self {
            MemberKind::Method { name, .. } | MemberKind::Field { name, .. } => Some(*name),
            MemberKind::Constructor { .. } | MemberKind::Initializer => None,
        }
    }

    pub fn formals(&self) -> &[TypeId] {
        match self {
            MemberKind::Method { formals, .. } | MemberKind::Constructor { formals, .. } => formals,
            MemberKind::Field { .. } | MemberKind::Initializer => &[],
        }
    }

    pub fn type_params(&self) -> &[TypeVarId] {
        match self {
            MemberKind::Method { type_params, .. }
            | MemberKind::Constructor { type_params, .. } => type_params,
            MemberKind::Field { .. } | MemberKind::Initializer => &[],
        }
    }

    pub fn is_procedure(&self) -> bool {
        matches!(self, MemberKind::Method { .. } | MemberKind::Constructor { .. })
    }

    /// Rebuild the kind with every mentioned type passed through `f`.
    ///
    /// Own type parameters are kept unless `f` maps them away; callers that
    /// erase them drop the list with [`MemberKind::without_type_params`].
    #[must_use]
    pub fn map_types(&self, mut f: impl FnMut(TypeId) -> TypeId) -> MemberKind {
        match self {
            MemberKind::Method {
                name,
                formals,
                ret,
                type_params,
            } => MemberKind::Method {
                name: *name,
                formals: formals.iter().map(|&t| f(t)).collect(),
                ret: f(*ret),
                type_params: type_params.clone(),
            },
            MemberKind::Constructor {
                formals,
                type_params,
            } => MemberKind::Constructor {
                formals: formals.iter().map(|&t| f(t)).collect(),
                type_params: type_params.clone(),
            },
            MemberKind::Field { name, ty } => MemberKind::Field {
                name: *name,
                ty: f(*ty),
            },
            MemberKind::Initializer => MemberKind::Initializer,
        }
    }

    /// Same signature, no longer generic.
    #[must_use]
    pub fn without_type_params(mut self) -> MemberKind {
        match &mut self {
            MemberKind::Method { type_params, .. } | MemberKind::Constructor { type_params, .. } => {
                type_params.clear();
            }
            MemberKind::Field { .. } | MemberKind::Initializer => {}
        }
        self
    }

    /// Drop the own type parameters that `keep` rejects.
    #[must_use]
    pub(crate) fn retain_type_params(mut self, mut keep: impl FnMut(TypeVarId) -> bool) -> MemberKind {
        match &mut self {
            MemberKind::Method { type_params, .. } | MemberKind::Constructor { type_params, .. } => {
                type_params.retain(|v| keep(*v));
            }
            MemberKind::Field { .. } | MemberKind::Initializer => {}
        }
        self
    }
}

/// A member instance.
///
/// Instances are hash-consed on `(kind, container, flags, instantiated_from)`.
#[derive(Clone, Debug)]
pub struct MemberData {
    pub kind: MemberKind,
    /// Declaring container as seen by this instance: a raw class for
    /// declarations, an instantiation for substituted images.
    pub container: TypeId,
    pub flags: MemberFlags,
    /// The declared member this instance ultimately denotes.
    pub decl: MemberId,
    /// The instance this one was derived from; itself for declarations.
    pub origin: MemberId,
    /// Generic method this instance was produced from by type-argument
    /// inference, or `NONE`.
    pub instantiated_from: MemberId,
}

impl MemberData {
    #[inline]
    pub fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC)
    }

    #[inline]
    pub fn is_declaration(&self, id: MemberId) -> bool {
        self.decl == id
    }
}

#[derive(Clone, Eq, PartialEq, Hash)]
pub(crate) struct MemberKey {
    pub kind: MemberKind,
    pub container: TypeId,
    pub flags: MemberFlags,
    pub instantiated_from: MemberId,
}
