use thiserror::Error;

/// Member reconciliation failure.
///
/// Raised when a member instance claims a container whose base declaration
/// declares nothing that substitutes to it. This means the front end built
/// an inconsistent tree; the compilation unit cannot continue.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CanonError {
    #[error("cannot reconcile `{member}` with any member declared by `{container}`")]
    Unreconcilable { member: String, container: String },
}
