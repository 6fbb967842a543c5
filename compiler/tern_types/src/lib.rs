//! Tern type system.
//!
//! The resolved view of the program the erasure core works against:
//!
//! - [`Pool`]: hash-consed types, substitutions and lub candidate sets
//! - [`ClassDef`]: classes and interfaces with their type parameters,
//!   supertypes, enclosing-instance types and declared members
//! - [`MemberData`]: hash-consed member instances with declaration and
//!   origin back-references
//! - Operations the front end would normally provide: substitution,
//!   bound erasure, subtyping, least upper bounds and member lookup
//!
//! [`TypeSystem::new`] installs the core library (`core.Object`,
//! `core.String`), so every instance is ready to resolve the members the
//! lowering passes synthesize calls to.

mod class;
pub mod core_lib;
mod error;
mod flags;
mod format;
mod kind;
mod lookup;
mod member;
mod pool;
mod relation;
mod subst;
mod system;

pub use class::{ClassDef, ClassFlags};
pub use error::LookupError;
pub use flags::TypeFlags;
pub use kind::{LubId, PrimKind, SubstId, TypeKind, TypeVarId};
pub use member::{Formals, MemberData, MemberFlags, MemberKind};
pub use pool::{LubCandidates, Pool, SubstBindings};
pub use system::{TypeSystem, TypeVarDef, TypeVarOwner, WellKnown};
