/// Input validation failures raised by the derivation pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FairError {
    #[error("invalid range: max ({max}) is below min ({min})")]
    InvalidRange { min: i64, max: i64 },
    #[error("invalid precision {precision}: must be at most {max}")]
    InvalidPrecision { precision: u32, max: u32 },
    #[error("invalid hex character {character:?} at index {index}")]
    InvalidHex { index: usize, character: char },
    #[error("hex string too short: need {required} characters, got {actual}")]
    InsufficientLength { required: usize, actual: usize },
    #[error("weighted selection needs at least one option")]
    EmptyOptions,
    #[error("invalid weight: {0}")]
    InvalidWeight(String),
    #[error("decimal fraction could not be parsed: {0}")]
    InvalidFraction(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("entropy source failed: {0}")]
    Entropy(String),
    #[error("nonce space exhausted")]
    NonceExhausted,
}

/// Failures reported when auditing a recorded outcome.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VerifyError {
    #[error("outcome mismatch: recomputed {expected}, recorded {claimed}")]
    Mismatch { expected: String, claimed: String },
    #[error("recomputation failed: {0}")]
    Fair(#[from] FairError),
}
