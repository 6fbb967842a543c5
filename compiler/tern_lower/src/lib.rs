//! Lowering passes over the typed AST.
//!
//! # Pipeline Position
//!
//! ```text
//! Type Check → **Desugar Strings** → Validate → Canonicalize → Mangle → Emit
//! ```
//!
//! - [`TypedBuilder`]: smart constructors for fully resolved, fully typed
//!   fragments. Synthesized code is indistinguishable from source-derived
//!   code to every later pass.
//! - [`rewrite_unit`]: bottom-up, in-place rewrite driver.
//! - [`desugar_strings`]: string literals become explicit `char[]`
//!   constructions; `+` on strings becomes `concat` calls.
//! - [`validate_unit`]: checks the desugared tree and that every member it
//!   references reconciles to a declaration.

mod builder;
mod error;
mod rewrite;
mod strings;
mod validate;

#[cfg(test)]
mod test_support;

pub use builder::TypedBuilder;
pub use error::LowerError;
pub use rewrite::{rewrite_unit, ExprRewriter};
pub use strings::{desugar_strings, StringConversion};
pub use validate::validate_unit;
