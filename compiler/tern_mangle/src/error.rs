use thiserror::Error;

/// Input the mangler cannot encode.
///
/// Every variant means an earlier pass handed over a non-canonical or
/// mis-kinded entity.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MangleError {
    #[error("type `{ty}` has no argument code")]
    UnsupportedArgType { ty: String },

    #[error("`{ty}` is not a class, interface or array type")]
    NotAClass { ty: String },

    #[error("`{ty}` is not an interface")]
    NotAnInterface { ty: String },

    #[error("`{member}` is not a method or constructor")]
    NotAProcedure { member: String },

    #[error("`{member}` is not a static field")]
    NotAStaticField { member: String },
}
