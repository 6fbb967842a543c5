use thiserror::Error;

use tern_erase::CanonError;
use tern_lower::LowerError;
use tern_mangle::MangleError;

/// Why a compilation unit was abandoned.
///
/// All variants are internal errors: the unit reached the core already
/// type-checked, so any failure here is a compiler bug.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("lowering failed: {0}")]
    Lower(#[from] LowerError),

    #[error("canonicalization failed: {0}")]
    Canon(#[from] CanonError),

    #[error("mangling failed: {0}")]
    Mangle(#[from] MangleError),
}

#[cfg(test)]
mod tests {
    use super::CompileError;
    use pretty_assertions::assert_eq;
    use tern_lower::LowerError;
    use tern_types::LookupError;

    #[test]
    fn lookup_failures_arrive_through_lowering() {
        let err: CompileError = LowerError::from(LookupError::NoClass { name: "app.Missing".to_owned() }).into();
        assert!(matches!(err, CompileError::Lower(LowerError::Lookup(_))));
        assert_eq!(err.to_string(), "lowering failed: no class named `app.Missing`");
    }
}
