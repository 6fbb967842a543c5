use thiserror::Error;

use tern_erase::CanonError;
use tern_ir::Span;
use tern_types::LookupError;

/// Lowering failure.
///
/// Every input to the builder is chosen by a compiler pass, so each
/// variant is an internal error that aborts the compilation unit.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LowerError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Canon(#[from] CanonError),

    #[error("SSA temporary `{name}` needs an initializer")]
    SsaWithoutInit { name: String },

    #[error("{context} must be `boolean`, found `{ty}`")]
    NotBoolean { context: &'static str, ty: String },

    #[error("indexed expression has non-array type `{ty}`")]
    NotAnArray { ty: String },

    #[error("`{ty}` is not a reference type")]
    NotAReference { ty: String },

    #[error("`{ty}` cannot be instantiated")]
    NotInstantiable { ty: String },

    #[error("assignment target at {span:?} is not an lvalue")]
    NotAnLvalue { span: Span },

    #[error("string literal survived desugaring at {span:?}")]
    StringLiteralRemains { span: Span },

    #[error("string concatenation survived desugaring at {span:?}")]
    StringConcatRemains { span: Span },
}
