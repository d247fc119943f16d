#[derive(thiserror::Error, Debug)]
pub enum InstantiateErrorKind {
    #[error("Constructor expects {expected} argument(s), got {actual}")]
    ArityMismatch { expected: usize, actual: usize },
    #[error("Argument {position} should be {expected}, got {actual}")]
    ArgumentType {
        position: usize,
        expected: &'static str,
        actual: &'static str,
    },
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}
