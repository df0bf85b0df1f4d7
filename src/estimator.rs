//! Strength estimators behind one narrow trait.
//!
//! [`ZxcvbnEstimator`] wraps the `zxcvbn` crate when the `zxcvbn` feature is
//! enabled. [`EntropyEstimator`] is the local fallback and never fails.

use crate::error::EstimatorError;
use serde::Serialize;
use std::fmt;

pub const MAX_SCORE: u8 = 4;

pub const LOWERCASE_POOL: u32 = 26;
pub const UPPERCASE_POOL: u32 = 26;
pub const DIGIT_POOL: u32 = 10;
pub const SYMBOL_POOL: u32 = 32;

/// Upper bounds (exclusive) in bits for scores 0 through 3.
pub const SCORE_THRESHOLDS: [f64; 4] = [28.0, 36.0, 60.0, 128.0];

pub const MIN_RECOMMENDED_LENGTH: usize = 8;

const COMMON_PASSWORDS: &[&str] = &["password", "123456", "qwerty", "letmein"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Engine {
    Zxcvbn,
    EntropyFallback,
}

impl Engine {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Engine::Zxcvbn => "zxcvbn",
            Engine::EntropyFallback => "entropy_fallback",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One segment of the password an estimator recognized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternMatch {
    pub pattern: String,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary_name: Option<String>,
    pub l33t: bool,
}

/// Estimator output before normalization into a report.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEstimate {
    pub score: u8,
    pub entropy_bits: f64,
    pub crack_time_seconds: f64,
    pub crack_time: String,
    pub warning: Option<String>,
    pub suggestions: Vec<String>,
    pub matched_patterns: Vec<PatternMatch>,
}

pub trait Estimator: Send + Sync {
    fn engine(&self) -> Engine;

    fn estimate(&self, password: &str) -> Result<RawEstimate, EstimatorError>;
}

/// Character-class pool estimate: `chars × log2(pool)`.
#[derive(Debug, Clone, Copy)]
pub struct EntropyEstimator {
    pub guesses_per_second: f64,
}

impl EntropyEstimator {
    pub const STANDARD: Self = Self {
        guesses_per_second: 1e9,
    };
}

impl EntropyEstimator {
    pub fn measure(&self, password: &str) -> RawEstimate {
        let bits = entropy_bits(password);
        let seconds = (bits.exp2() / self.guesses_per_second).max(0.0);

        RawEstimate {
            score: score_for_bits(bits),
            entropy_bits: bits,
            crack_time_seconds: if seconds.is_finite() { seconds } else { f64::MAX },
            crack_time: human_duration(seconds),
            warning: None,
            suggestions: entropy_suggestions(password),
            matched_patterns: Vec::new(),
        }
    }
}

impl Default for EntropyEstimator {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl Estimator for EntropyEstimator {
    fn engine(&self) -> Engine {
        Engine::EntropyFallback
    }

    fn estimate(&self, password: &str) -> Result<RawEstimate, EstimatorError> {
        Ok(self.measure(password))
    }
}

/// Summed size of the character classes present in `password`.
///
/// Letters without case count toward the lowercase class.
pub fn charset_pool(password: &str) -> u32 {
    let mut lower = false;
    let mut upper = false;
    let mut digit = false;
    let mut symbol = false;

    for ch in password.chars() {
        if ch.is_uppercase() {
            upper = true;
        } else if ch.is_alphabetic() {
            lower = true;
        } else if ch.is_numeric() {
            digit = true;
        } else {
            symbol = true;
        }
    }

    [
        (lower, LOWERCASE_POOL),
        (upper, UPPERCASE_POOL),
        (digit, DIGIT_POOL),
        (symbol, SYMBOL_POOL),
    ]
    .into_iter()
    .filter(|(present, _)| *present)
    .map(|(_, size)| size)
    .sum()
}

/// Pool form of the estimate: `chars × log2(sum of present class sizes)`,
/// not `log2` of the number of distinct classes.
pub fn entropy_bits(password: &str) -> f64 {
    let pool = charset_pool(password);
    if pool == 0 {
        return 0.0;
    }
    password.chars().count() as f64 * f64::from(pool).log2()
}

pub fn score_for_bits(bits: f64) -> u8 {
    SCORE_THRESHOLDS
        .iter()
        .position(|&limit| bits < limit)
        .map_or(MAX_SCORE, |score| score as u8)
}

/// Renders a duration as at most two units, largest first.
pub fn human_duration(seconds: f64) -> String {
    const UNITS: [(&str, f64); 5] = [
        ("year", 365.0 * 24.0 * 3600.0),
        ("day", 24.0 * 3600.0),
        ("hour", 3600.0),
        ("minute", 60.0),
        ("second", 1.0),
    ];

    if !seconds.is_finite() {
        return "infinite".to_string();
    }
    if seconds < 1.0 {
        return "<1 second".to_string();
    }
    if seconds >= 100.0 * UNITS[0].1 {
        return "centuries".to_string();
    }

    let mut parts = Vec::with_capacity(2);
    let mut remaining = seconds;
    for (name, size) in UNITS {
        if remaining >= size {
            let count = (remaining / size).floor();
            remaining -= count * size;
            let plural = if count == 1.0 { "" } else { "s" };
            parts.push(format!("{} {}{}", count as u64, name, plural));
        }
        if parts.len() == 2 {
            break;
        }
    }

    parts.join(", ")
}

fn entropy_suggestions(password: &str) -> Vec<String> {
    let mut suggestions = Vec::new();
    let length = password.chars().count();

    if length < MIN_RECOMMENDED_LENGTH {
        suggestions.push(format!("Use at least {} characters.", MIN_RECOMMENDED_LENGTH));
    }
    if !password.chars().any(char::is_uppercase) {
        suggestions.push("Add uppercase letters.".to_string());
    }
    if !password.chars().any(char::is_lowercase) {
        suggestions.push("Add lowercase letters.".to_string());
    }
    if !password.chars().any(char::is_numeric) {
        suggestions.push("Add digits (0-9).".to_string());
    }
    if !password.chars().any(|c| !c.is_alphanumeric()) {
        suggestions.push("Add special characters (e.g. !@#$%).".to_string());
    }

    let lower = password.to_lowercase();
    if COMMON_PASSWORDS.contains(&lower.as_str()) || lower.contains("password") {
        suggestions.push("Avoid common passwords or obvious dictionary words.".to_string());
    }

    let repeated = lower
        .chars()
        .any(|ch| lower.chars().filter(|&c| c == ch).count() > length / 2);
    if length > 0 && repeated {
        suggestions.push("Avoid excessive repetition of the same character.".to_string());
    }

    suggestions
}

#[cfg(feature = "zxcvbn")]
pub use self::zxcvbn_engine::ZxcvbnEstimator;

#[cfg(feature = "zxcvbn")]
mod zxcvbn_engine {
    use super::{Engine, Estimator, PatternMatch, RawEstimate, human_duration};
    use crate::error::EstimatorError;
    use zxcvbn::matching::Match;
    use zxcvbn::matching::patterns::MatchPattern;

    /// Guess rate of the "offline, slow hash" scenario zxcvbn reports.
    const SLOW_HASH_GUESSES_PER_SECOND: f64 = 1e4;

    /// zxcvbn with optional personal words (names, pets) to penalize.
    #[derive(Debug, Clone, Default)]
    pub struct ZxcvbnEstimator {
        user_inputs: Vec<String>,
    }

    impl ZxcvbnEstimator {
        pub fn with_user_inputs(user_inputs: Vec<String>) -> Self {
            Self { user_inputs }
        }
    }

    impl Estimator for ZxcvbnEstimator {
        fn engine(&self) -> Engine {
            Engine::Zxcvbn
        }

        fn estimate(&self, password: &str) -> Result<RawEstimate, EstimatorError> {
            let inputs: Vec<&str> = self.user_inputs.iter().map(String::as_str).collect();
            let entropy = zxcvbn::zxcvbn(password, &inputs)
                .map_err(|e| EstimatorError::Failed(format!("{:?}", e)))?;

            let feedback = entropy.feedback().as_ref();
            let warning = feedback
                .and_then(|f| f.warning())
                .map(|w| w.to_string());
            let suggestions = feedback
                .map(|f| f.suggestions().iter().map(|s| s.to_string()).collect())
                .unwrap_or_default();

            let crack_time_seconds = entropy.guesses() as f64 / SLOW_HASH_GUESSES_PER_SECOND;

            Ok(RawEstimate {
                score: entropy.score(),
                entropy_bits: entropy.guesses_log10() * std::f64::consts::LOG2_10,
                crack_time_seconds,
                crack_time: human_duration(crack_time_seconds),
                warning,
                suggestions,
                matched_patterns: entropy.sequence().iter().map(pattern_match).collect(),
            })
        }
    }

    fn pattern_match(m: &Match) -> PatternMatch {
        let (pattern, dictionary) = match &m.pattern {
            MatchPattern::Dictionary(d) => ("dictionary", Some(d)),
            MatchPattern::Spatial(_) => ("spatial", None),
            MatchPattern::Repeat(_) => ("repeat", None),
            MatchPattern::Sequence(_) => ("sequence", None),
            MatchPattern::Regex(_) => ("regex", None),
            MatchPattern::Date(_) => ("date", None),
            MatchPattern::BruteForce => ("bruteforce", None),
        };

        PatternMatch {
            pattern: pattern.to_string(),
            token: m.token.clone(),
            dictionary_name: dictionary.map(|d| snake_case(&format!("{:?}", d.dictionary_name))),
            l33t: dictionary.is_some_and(|d| d.l33t),
        }
    }

    /// `EnglishWikipedia` → `english_wikipedia`.
    pub(super) fn snake_case(name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 4);
        for (i, ch) in name.chars().enumerate() {
            if ch.is_uppercase() {
                if i > 0 {
                    out.push('_');
                }
                out.extend(ch.to_lowercase());
            } else {
                out.push(ch);
            }
        }
        out
    }
}
