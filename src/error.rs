use thiserror::Error;

/// Rejection of caller input to wordlist generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    #[error("at least one seed is required")]
    NoSeeds,

    #[error("too many seeds ({count}, maximum is {max})")]
    TooManySeeds { count: usize, max: usize },

    #[error("seed {index} is empty after trimming")]
    EmptySeed { index: usize },

    #[error("seed {index} is too long ({bytes} bytes, maximum is {max})")]
    SeedTooLong { index: usize, bytes: usize, max: usize },

    #[error("seed {index} has {chars} characters, longer than the maximum word length {max}")]
    SeedTooLongForBounds { index: usize, chars: usize, max: usize },

    #[error("seed {index} contains control characters")]
    ControlCharacter { index: usize },

    #[error("target size must be a positive integer")]
    NonPositiveTarget,

    #[error("target size too large ({target}, maximum is {max})")]
    TargetTooLarge { target: usize, max: usize },

    #[error("invalid length bounds: min {min}, max {max}")]
    InvalidLengthBounds { min: usize, max: usize },
}

/// Reasons a strength estimator could not produce an estimate.
///
/// Never surfaced to callers of [`crate::analyze_password`]; the analyzer
/// degrades to the entropy fallback instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimatorError {
    #[error("estimator unavailable")]
    Unavailable,

    #[error("estimator failed: {0}")]
    Failed(String),
}
