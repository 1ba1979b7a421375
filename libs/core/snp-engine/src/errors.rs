use thiserror::Error;

/// Failure modes of a pairwise analysis. All are non-retryable: retrying
/// with the same two SNP datasets will not change the outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnpEngineError {
    #[error("no records were parseable from the provided input")]
    MalformedInput,
    #[error("dataset has only {retained} retained record(s); at least 100 are required")]
    InsufficientData { retained: usize },
    #[error("only {common} SNP(s) overlap between the two users; at least 50 are required")]
    InsufficientOverlap { common: usize },
}
