//! Lazy candidate stream over a validated seed set.
//!
//! Order is rule-major: seeds verbatim, then each single rule across every
//! seed (case, leet, reversal, suffix, prefix), then plain pair
//! concatenations, then the composed pass. Nothing is
//! expanded until the consumer pulls it.

use crate::rules::{
    capitalize, case_variants, concatenations, concatenations_with, is_number, leetspeak,
    number_patterns, prefixed, reversed, suffixed, JOIN_SEPARATORS,
};

/// Unordered seed pairs `(i, j)` with `i < j`, by position.
fn pairs(seeds: &[String]) -> impl Iterator<Item = (&str, &str)> + '_ {
    seeds.iter().enumerate().flat_map(move |(i, first)| {
        seeds[i + 1..]
            .iter()
            .map(move |second| (first.as_str(), second.as_str()))
    })
}

pub fn candidates(seeds: &[String]) -> impl Iterator<Item = String> + '_ {
    let verbatim = seeds.iter().cloned();
    let cases = seeds.iter().flat_map(|seed| case_variants(seed));
    let leet = seeds.iter().flat_map(|seed| leetspeak(seed));
    let reversals = seeds.iter().flat_map(|seed| reversed(seed));
    let suffixes = seeds.iter().flat_map(|seed| suffixed(seed));
    let prefixes = seeds.iter().flat_map(|seed| prefixed(seed));
    let joined = pairs(seeds).flat_map(|(first, second)| concatenations(first, second));

    verbatim
        .chain(cases)
        .chain(leet)
        .chain(reversals)
        .chain(suffixes)
        .chain(prefixes)
        .chain(joined)
        .chain(composed(seeds))
}

/// Pairs of one word seed and one all-digit seed, word first.
fn word_number_pairs(seeds: &[String]) -> impl Iterator<Item = (&str, &str)> + '_ {
    pairs(seeds).filter_map(|(first, second)| match (is_number(first), is_number(second)) {
        (false, true) => Some((first, second)),
        (true, false) => Some((second, first)),
        _ => None,
    })
}

fn composed(seeds: &[String]) -> impl Iterator<Item = String> + '_ {
    let numbered =
        word_number_pairs(seeds).flat_map(|(word, number)| number_patterns(word, number));

    let suffixed_variants = seeds
        .iter()
        .flat_map(|seed| case_variants(seed).into_iter().chain(leetspeak(seed)))
        .flat_map(|variant| suffixed(&variant));

    let separated = JOIN_SEPARATORS.iter().flat_map(move |separator| {
        pairs(seeds)
            .flat_map(move |(first, second)| concatenations_with(first, second, separator))
    });

    let capitalized = pairs(seeds)
        .flat_map(|(first, second)| concatenations(&capitalize(first), &capitalize(second)));

    let suffixed_pairs = pairs(seeds)
        .flat_map(|(first, second)| concatenations(first, second))
        .flat_map(|joined| suffixed(&joined));

    numbered
        .chain(suffixed_variants)
        .chain(separated)
        .chain(capitalized)
        .chain(suffixed_pairs)
}
