//! Lookup failures.
//!
//! Every lookup in this crate is issued by compiler passes on names they
//! chose themselves, so a failure is an internal error, never a diagnostic.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no field `{name}` in `{container}`")]
    NoField { container: String, name: String },

    #[error("no method `{name}({args})` in `{container}`")]
    NoMethod {
        container: String,
        name: String,
        args: String,
    },

    #[error("no constructor `{container}({args})`")]
    NoConstructor { container: String, args: String },

    #[error("ambiguous call `{name}({args})` in `{container}`: {candidates} candidates")]
    Ambiguous {
        container: String,
        name: String,
        args: String,
        candidates: usize,
    },

    #[error("`{ty}` has no members")]
    NotAReference { ty: String },

    #[error("no class named `{name}`")]
    NoClass { name: String },
}
