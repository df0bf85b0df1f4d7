use crate::error::EstimatorError;
use crate::estimator::{
    Engine, EntropyEstimator, Estimator, MAX_SCORE, PatternMatch, RawEstimate,
};
use serde::Serialize;
use std::str::FromStr;
use std::sync::OnceLock;

pub const STRENGTH_LABELS: [&str; 5] = ["Very Weak", "Weak", "Moderate", "Strong", "Very Strong"];

pub const EMPTY_PASSWORD_SUGGESTION: &str = "Enter a password to analyze.";

/// Uniform result of one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrengthReport {
    pub engine: Engine,
    pub score: u8,
    pub strength: &'static str,
    pub entropy_bits: f64,
    pub crack_time: String,
    pub crack_time_seconds: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matched_patterns: Vec<PatternMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    /// Entropy estimate attached to reports from a primary estimator, for
    /// comparison.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_entropy_bits: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_crack_time: Option<String>,
}

impl StrengthReport {
    fn from_raw(engine: Engine, raw: RawEstimate, fallback_reason: Option<String>) -> Self {
        let score = raw.score.min(MAX_SCORE);
        Self {
            engine,
            score,
            strength: strength_label(score),
            entropy_bits: raw.entropy_bits.max(0.0),
            crack_time: raw.crack_time,
            crack_time_seconds: raw.crack_time_seconds,
            warning: raw.warning,
            suggestions: raw.suggestions,
            matched_patterns: raw.matched_patterns,
            fallback_reason,
            fallback_entropy_bits: None,
            fallback_crack_time: None,
        }
    }
}

pub fn strength_label(score: u8) -> &'static str {
    STRENGTH_LABELS[usize::from(score.min(MAX_SCORE))]
}

/// Runs the primary estimator and degrades to the entropy fallback when it
/// is absent or fails.
pub struct Analyzer {
    primary: Option<Box<dyn Estimator>>,
    fallback: EntropyEstimator,
}

impl Analyzer {
    pub fn new(primary: Box<dyn Estimator>) -> Self {
        Self {
            primary: Some(primary),
            fallback: EntropyEstimator::default(),
        }
    }

    pub fn entropy_only() -> Self {
        Self {
            primary: None,
            fallback: EntropyEstimator::default(),
        }
    }

    /// Personal words such as names or pets that the primary estimator
    /// should treat as easily guessed.
    #[cfg(feature = "zxcvbn")]
    pub fn with_user_inputs(user_inputs: Vec<String>) -> Self {
        Self::new(Box::new(crate::estimator::ZxcvbnEstimator::with_user_inputs(
            user_inputs,
        )))
    }

    #[cfg(not(feature = "zxcvbn"))]
    pub fn with_user_inputs(_user_inputs: Vec<String>) -> Self {
        Self::entropy_only()
    }

    /// Engine that produces reports for non-empty passwords when nothing fails.
    pub fn preferred_engine(&self) -> Engine {
        self.primary
            .as_ref()
            .map_or_else(|| self.fallback.engine(), |p| p.engine())
    }

    pub fn analyze(&self, password: &str) -> StrengthReport {
        if password.is_empty() {
            return self.empty_report();
        }

        let Some(primary) = &self.primary else {
            return self.fallback_report(password, EstimatorError::Unavailable);
        };

        match primary.estimate(password) {
            Ok(raw) => {
                let mut report = StrengthReport::from_raw(primary.engine(), raw, None);
                let entropy = self.fallback.measure(password);
                report.fallback_entropy_bits = Some(entropy.entropy_bits);
                report.fallback_crack_time = Some(entropy.crack_time);
                report
            }
            Err(e) => self.fallback_report(password, e),
        }
    }

    fn fallback_report(&self, password: &str, reason: EstimatorError) -> StrengthReport {
        StrengthReport::from_raw(
            self.fallback.engine(),
            self.fallback.measure(password),
            Some(reason.to_string()),
        )
    }

    fn empty_report(&self) -> StrengthReport {
        let mut report =
            StrengthReport::from_raw(self.fallback.engine(), self.fallback.measure(""), None);
        report.score = 0;
        report.strength = strength_label(0);
        report
            .suggestions
            .insert(0, EMPTY_PASSWORD_SUGGESTION.to_string());
        report
    }
}

impl Default for Analyzer {
    #[cfg(feature = "zxcvbn")]
    fn default() -> Self {
        Self::new(Box::new(crate::estimator::ZxcvbnEstimator::default()))
    }

    #[cfg(not(feature = "zxcvbn"))]
    fn default() -> Self {
        Self::entropy_only()
    }
}

/// Which estimator an [`Analyzer`] should lead with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineChoice {
    #[default]
    Auto,
    Entropy,
}

impl EngineChoice {
    pub fn analyzer(self, user_inputs: Vec<String>) -> Analyzer {
        match self {
            EngineChoice::Auto if user_inputs.is_empty() => Analyzer::default(),
            EngineChoice::Auto => Analyzer::with_user_inputs(user_inputs),
            EngineChoice::Entropy => Analyzer::entropy_only(),
        }
    }
}

impl FromStr for EngineChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(EngineChoice::Auto),
            "entropy" => Ok(EngineChoice::Entropy),
            other => Err(format!("unknown engine \"{}\"", other)),
        }
    }
}

static DEFAULT_ANALYZER: OnceLock<Analyzer> = OnceLock::new();

/// Analyzes `password` with the default engine. Never fails.
pub fn analyze_password(password: &str) -> StrengthReport {
    DEFAULT_ANALYZER
        .get_or_init(Analyzer::default)
        .analyze(password)
}
