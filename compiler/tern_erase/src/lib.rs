//! Erasure-consistent canonicalization.
//!
//! Two entry points on [`Eraser`]:
//!
//! - [`Eraser::canonicalize`] erases any type to primitives, arrays and raw
//!   classes. Total and idempotent.
//! - [`Eraser::canonicalize_member`] maps a member instance observed
//!   through any chain of instantiations back to its declaration, then
//!   erases its signature. Two observations of one declared member always
//!   produce the same [`MemberId`](tern_ir::MemberId), which is what makes
//!   mangling once per declaration sound.
//!
//! The eraser memoizes per declaration (canonical outer links, erasure
//! substitutions) and per input (types, members). It holds no reference to
//! the [`TypeSystem`](tern_types::TypeSystem); callers pass it in, and must
//! pass the same one for the eraser's lifetime.

mod eraser;
mod error;
mod members;
mod types;

#[cfg(test)]
mod test_fixtures;

pub use eraser::Eraser;
pub use error::CanonError;
