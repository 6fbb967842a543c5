//! Tern compiler driver.
//!
//! Runs the erasure core over one compilation unit at a time:
//!
//! ```text
//! desugar strings → validate → canonicalize → mangle
//! ```
//!
//! The result of [`Compiler::compile_unit`] is the set of names the unit
//! defines and references. Independently compiled units agree on these
//! names without sharing any state, because mangling depends only on the
//! canonical declaration.

mod abi;
mod driver;
mod error;
mod options;
mod tracing_setup;

pub use abi::core_unit;
pub use driver::{compile_unit, Compiler, UnitSymbols};
pub use error::CompileError;
pub use options::CompileOptions;
pub use tracing_setup::init_tracing;
