pub mod combiner;
pub mod config;
pub mod error;
pub mod estimator;
pub mod generator;
pub mod rules;
pub mod server;
pub mod strength;

pub use error::{EstimatorError, InvalidArgument};
pub use estimator::{Engine, EntropyEstimator, Estimator, PatternMatch, RawEstimate};
pub use generator::{generate_wordlist, GenerateOptions, Wordlist};
pub use strength::{analyze_password, Analyzer, EngineChoice, StrengthReport};
