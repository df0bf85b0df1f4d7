use crate::combiner;
use crate::error::InvalidArgument;
use serde::Serialize;
use std::collections::HashSet;
use std::io::{self, Write};
use std::ops::RangeInclusive;
use unicode_normalization::UnicodeNormalization;

pub const DEFAULT_TARGET: usize = 1000;
pub const MAX_TARGET: usize = 1_000_000;

pub const MAX_SEEDS: usize = 64;
pub const MAX_SEED_BYTES: usize = 256;

pub const DEFAULT_MIN_LENGTH: usize = 3;
pub const DEFAULT_MAX_LENGTH: usize = 24;

const PREALLOC_LIMIT: usize = 4096;

/// Caller-tunable bounds for one generation call.
///
/// Lengths count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    pub target: Option<usize>,
    pub min_length: usize,
    pub max_length: usize,
}

impl GenerateOptions {
    pub const STANDARD: Self = Self {
        target: None,
        min_length: DEFAULT_MIN_LENGTH,
        max_length: DEFAULT_MAX_LENGTH,
    };

    pub fn with_target(target: usize) -> Self {
        Self {
            target: Some(target),
            ..Self::STANDARD
        }
    }

    pub fn resolved_target(&self) -> Result<usize, InvalidArgument> {
        match self.target {
            None => Ok(DEFAULT_TARGET),
            Some(0) => Err(InvalidArgument::NonPositiveTarget),
            Some(target) if target > MAX_TARGET => Err(InvalidArgument::TargetTooLarge {
                target,
                max: MAX_TARGET,
            }),
            Some(target) => Ok(target),
        }
    }

    pub fn length_bounds(&self) -> Result<RangeInclusive<usize>, InvalidArgument> {
        if self.min_length == 0 || self.min_length > self.max_length {
            return Err(InvalidArgument::InvalidLengthBounds {
                min: self.min_length,
                max: self.max_length,
            });
        }
        Ok(self.min_length..=self.max_length)
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Ordered, duplicate-free generation output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Wordlist(Vec<String>);

impl Wordlist {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.iter().any(|w| w == word)
    }

    /// Writes one entry per line, each terminated by `\n`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for word in &self.0 {
            writer.write_all(word.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }

    pub fn to_text(&self) -> String {
        let capacity = self.0.iter().map(|w| w.len() + 1).sum();
        let mut text = String::with_capacity(capacity);
        for word in &self.0 {
            text.push_str(word);
            text.push('\n');
        }
        text
    }
}

impl<'a> IntoIterator for &'a Wordlist {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Wordlist {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Trims, NFC-normalizes and checks one seed. `position` is 1-based.
pub fn normalize_seed(raw: &str, position: usize) -> Result<String, InvalidArgument> {
    let normalized: String = raw.trim().nfc().collect();

    if normalized.is_empty() {
        return Err(InvalidArgument::EmptySeed { index: position });
    }
    if normalized.chars().any(char::is_control) {
        return Err(InvalidArgument::ControlCharacter { index: position });
    }
    if normalized.len() > MAX_SEED_BYTES {
        return Err(InvalidArgument::SeedTooLong {
            index: position,
            bytes: normalized.len(),
            max: MAX_SEED_BYTES,
        });
    }

    Ok(normalized)
}

pub fn validate_seeds<S: AsRef<str>>(seeds: &[S]) -> Result<Vec<String>, InvalidArgument> {
    if seeds.is_empty() {
        return Err(InvalidArgument::NoSeeds);
    }
    if seeds.len() > MAX_SEEDS {
        return Err(InvalidArgument::TooManySeeds {
            count: seeds.len(),
            max: MAX_SEEDS,
        });
    }

    seeds
        .iter()
        .enumerate()
        .map(|(i, seed)| normalize_seed(seed.as_ref(), i + 1))
        .collect()
}

/// Nothing derived from a seed is shorter than the seed, so a seed above the
/// upper bound contributes no candidate at all.
fn check_seed_lengths(
    seeds: &[String],
    lengths: &RangeInclusive<usize>,
) -> Result<(), InvalidArgument> {
    let max = *lengths.end();
    for (i, seed) in seeds.iter().enumerate() {
        let chars = seed.chars().count();
        if chars > max {
            return Err(InvalidArgument::SeedTooLongForBounds {
                index: i + 1,
                chars,
                max,
            });
        }
    }
    Ok(())
}

/// Pulls candidates until `target` unique, length-bounded entries are
/// collected or the stream runs dry.
pub fn take_unique<I>(candidates: I, target: usize, lengths: &RangeInclusive<usize>) -> Wordlist
where
    I: IntoIterator<Item = String>,
{
    let mut candidates = candidates.into_iter();
    let mut seen = HashSet::new();
    let mut words = Vec::with_capacity(target.min(PREALLOC_LIMIT));

    while words.len() < target {
        let Some(candidate) = candidates.next() else {
            break;
        };

        if !lengths.contains(&candidate.chars().count()) {
            continue;
        }

        if seen.insert(candidate.clone()) {
            words.push(candidate);
        }
    }

    Wordlist(words)
}

pub fn generate_wordlist<S: AsRef<str>>(
    seeds: &[S],
    options: &GenerateOptions,
) -> Result<Wordlist, InvalidArgument> {
    let target = options.resolved_target()?;
    let lengths = options.length_bounds()?;
    let seeds = validate_seeds(seeds)?;
    check_seed_lengths(&seeds, &lengths)?;

    Ok(take_unique(combiner::candidates(&seeds), target, &lengths))
}
