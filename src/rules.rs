//! Mutation rules: pure functions from one seed to its derived variants.
//!
//! No rule returns its own input, and no rule calls another one. Combining
//! rules is the job of [`crate::combiner`].

use std::sync::OnceLock;

/// Single substitution choices, each applied across the whole word.
pub const LEET_MAP: &[(char, char)] = &[
    ('a', '4'),
    ('a', '@'),
    ('e', '3'),
    ('i', '1'),
    ('i', '!'),
    ('o', '0'),
    ('s', '5'),
    ('s', '$'),
    ('t', '7'),
];

pub const LEET_DIGITS: &[(char, char)] = &[
    ('a', '4'),
    ('e', '3'),
    ('i', '1'),
    ('o', '0'),
    ('s', '5'),
    ('t', '7'),
];

pub const LEET_SYMBOLS: &[(char, char)] = &[
    ('a', '@'),
    ('e', '3'),
    ('i', '!'),
    ('o', '0'),
    ('s', '$'),
    ('t', '7'),
];

/// Characters treated as word boundaries for title casing.
pub const WORD_SEPARATORS: &[char] = &[' ', '_', '-', '.'];

/// Joiners used between two seeds in the composed pass.
pub const JOIN_SEPARATORS: &[&str] = &["_", ".", "-"];

pub const MAX_DIGIT_RUN: usize = 4;
pub const SYMBOL_SUFFIXES: &[&str] = &["!", "!!", "?", "@", "#", "$", "*"];
pub const NUMBER_SUFFIXES: &[&str] = &["0", "00", "01", "69", "99", "007", "111"];
pub const FIRST_YEAR: u16 = 2020;
pub const LAST_YEAR: u16 = 2025;

/// Symbols put in front of a seed, and between a word and a number.
pub const PATTERN_SYMBOLS: &[&str] = &["!", "@", "#", "$", "_", "."];

static SUFFIXES: OnceLock<Vec<String>> = OnceLock::new();
static PREFIXES: OnceLock<Vec<String>> = OnceLock::new();

/// Ordered suffix table: digit runs, symbols, common numbers, then years.
pub fn suffix_table() -> &'static [String] {
    SUFFIXES.get_or_init(|| {
        let runs = (1..=MAX_DIGIT_RUN).map(|n| {
            (1..=n)
                .map(|d| char::from(b'0' + d as u8))
                .collect::<String>()
        });
        let fixed = SYMBOL_SUFFIXES
            .iter()
            .chain(NUMBER_SUFFIXES)
            .map(|s| s.to_string());
        let years = (FIRST_YEAR..=LAST_YEAR).map(|y| y.to_string());
        let short_years = (FIRST_YEAR..=LAST_YEAR).map(|y| format!("{:02}", y % 100));

        runs.chain(fixed).chain(years).chain(short_years).collect()
    })
}

/// Ordered prefix table: pattern symbols, then years.
pub fn prefix_table() -> &'static [String] {
    PREFIXES.get_or_init(|| {
        PATTERN_SYMBOLS
            .iter()
            .map(|s| s.to_string())
            .chain((FIRST_YEAR..=LAST_YEAR).map(|y| y.to_string()))
            .collect()
    })
}

fn push_new(out: &mut Vec<String>, variant: String, original: &str) {
    if variant != original && !out.contains(&variant) {
        out.push(variant);
    }
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut at_word_start = true;
    for ch in word.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        at_word_start = WORD_SEPARATORS.contains(&ch);
    }
    out
}

fn substitute(word: &str, table: &[(char, char)]) -> String {
    word.chars()
        .map(|ch| {
            table
                .iter()
                .find(|(from, _)| *from == ch)
                .map_or(ch, |&(_, to)| to)
        })
        .collect()
}

/// Lowercase, uppercase, capitalized and (for multi-word seeds) title case.
pub fn case_variants(seed: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(4);
    push_new(&mut out, seed.to_lowercase(), seed);
    push_new(&mut out, seed.to_uppercase(), seed);
    push_new(&mut out, capitalize(seed), seed);
    if seed.contains(WORD_SEPARATORS) {
        push_new(&mut out, title_case(seed), seed);
    }
    out
}

/// Whole-word substitutions over the lowercase form of `seed`.
///
/// Every entry of [`LEET_MAP`] yields at most one variant, followed by the
/// two full tables. Substitutions that change nothing are dropped.
pub fn leetspeak(seed: &str) -> Vec<String> {
    let lower = seed.to_lowercase();
    let mut out = Vec::new();

    let singles = LEET_MAP.iter().map(|pair| substitute(&lower, std::slice::from_ref(pair)));
    let tables = [LEET_DIGITS, LEET_SYMBOLS]
        .into_iter()
        .map(|table| substitute(&lower, table));

    for variant in singles.chain(tables) {
        if variant != lower {
            push_new(&mut out, variant, seed);
        }
    }
    out
}

pub fn suffixed(seed: &str) -> Vec<String> {
    suffix_table()
        .iter()
        .map(|suffix| format!("{seed}{suffix}"))
        .collect()
}

pub fn prefixed(seed: &str) -> Vec<String> {
    prefix_table()
        .iter()
        .map(|prefix| format!("{prefix}{seed}"))
        .collect()
}

/// The seed spelled backwards. Palindromes yield nothing.
pub fn reversed(seed: &str) -> Vec<String> {
    let backwards: String = seed.chars().rev().collect();
    if backwards == seed {
        Vec::new()
    } else {
        vec![backwards]
    }
}

pub(crate) fn is_number(seed: &str) -> bool {
    !seed.is_empty() && seed.chars().all(|ch| ch.is_ascii_digit())
}

/// `word<sym>number` and `<sym>word<number>` for every pattern symbol.
pub fn number_patterns(word: &str, number: &str) -> Vec<String> {
    PATTERN_SYMBOLS
        .iter()
        .flat_map(|sym| [format!("{word}{sym}{number}"), format!("{sym}{word}{number}")])
        .collect()
}

/// Both orders of two seeds joined by `separator`.
pub fn concatenations_with(first: &str, second: &str, separator: &str) -> [String; 2] {
    [
        format!("{first}{separator}{second}"),
        format!("{second}{separator}{first}"),
    ]
}

pub fn concatenations(first: &str, second: &str) -> [String; 2] {
    concatenations_with(first, second, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_variants_simple_word() {
        assert_eq!(case_variants("dog"), vec!["DOG", "Dog"]);
        assert_eq!(case_variants("Dog"), vec!["dog", "DOG"]);
        assert_eq!(case_variants("dOG"), vec!["dog", "DOG", "Dog"]);
    }

    #[test]
    fn test_case_variants_title_each_word() {
        let variants = case_variants("big red_dog");
        assert_eq!(
            variants,
            vec!["BIG RED_DOG", "Big red_dog", "Big Red_Dog"]
        );
    }

    #[test]
    fn test_rules_never_return_their_input() {
        let seeds = [
            "dog", "DOG", "Dog", "2020", "mr.smith", "ÄÖÜ", "d0g", "p4ss", "p@$$", "level",
            "a", "!", "1",
        ];
        let rules: [(&str, fn(&str) -> Vec<String>); 5] = [
            ("case_variants", case_variants),
            ("leetspeak", leetspeak),
            ("reversed", reversed),
            ("suffixed", suffixed),
            ("prefixed", prefixed),
        ];

        for seed in seeds {
            for (name, rule) in rules {
                assert!(
                    !rule(seed).iter().any(|v| v == seed),
                    "{} of \"{}\" contains the seed",
                    name,
                    seed
                );
            }
            for other in seeds {
                let joined = concatenations(seed, other);
                assert!(
                    !joined.iter().any(|v| v == seed || v == other),
                    "Concatenation of \"{}\" and \"{}\" returns an input",
                    seed,
                    other
                );
                let patterns = number_patterns(seed, other);
                assert!(!patterns.iter().any(|v| v == seed || v == other));
            }
        }
    }

    #[test]
    fn test_case_variants_digits_only() {
        assert!(case_variants("2020").is_empty());
    }

    #[test]
    fn test_capitalize_unicode() {
        assert_eq!(capitalize("éCOLE"), "École");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_leetspeak_password() {
        let variants = leetspeak("password");
        assert_eq!(
            variants,
            vec!["p4ssword", "p@ssword", "passw0rd", "pa55word", "pa$$word", "p455w0rd", "p@$$w0rd"]
        );
    }

    #[test]
    fn test_leetspeak_single_substitution_not_combinatorial() {
        let variants = leetspeak("assassin");
        assert!(variants.len() <= LEET_MAP.len() + 2);
        assert!(variants.contains(&"a55a55in".to_string()));
        assert!(!variants.contains(&"a5sa55in".to_string()));
    }

    #[test]
    fn test_leetspeak_uses_lowercase_form() {
        assert_eq!(leetspeak("DOG"), vec!["d0g"]);
    }

    #[test]
    fn test_leetspeak_no_mappable_letters() {
        assert!(leetspeak("pump").is_empty());
        assert!(leetspeak("2020").is_empty());
    }

    #[test]
    fn test_suffix_table_contents() {
        let table = suffix_table();

        assert_eq!(&table[..MAX_DIGIT_RUN], ["1", "12", "123", "1234"]);
        assert!(table.iter().any(|s| s == "!"));
        assert!(table.iter().any(|s| s == "2024"));
        assert!(table.iter().any(|s| s == "24"));
        assert_eq!(table.last().map(String::as_str), Some("25"));
    }

    #[test]
    fn test_suffix_table_no_duplicates() {
        use std::collections::HashSet;
        let table = suffix_table();
        let unique: HashSet<_> = table.iter().collect();
        assert_eq!(unique.len(), table.len(), "Suffix table contains duplicates");
        assert!(table.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn test_suffixed_preserves_order_and_case() {
        let variants = suffixed("Dog");
        assert_eq!(variants.len(), suffix_table().len());
        assert_eq!(variants[0], "Dog1");
        assert_eq!(variants[2], "Dog123");
        assert!(variants.contains(&"Dog2024".to_string()));
    }

    #[test]
    fn test_reversed() {
        assert_eq!(reversed("dog"), vec!["god"]);
        assert_eq!(reversed("2020"), vec!["0202"]);
        assert_eq!(reversed("Żółw"), vec!["wółŻ"]);
    }

    #[test]
    fn test_reversed_palindrome_is_empty() {
        assert!(reversed("level").is_empty());
        assert!(reversed("a").is_empty());
        assert!(reversed("1991").is_empty());
    }

    #[test]
    fn test_prefixed_symbols_then_years() {
        let variants = prefixed("dog");
        assert_eq!(variants.len(), prefix_table().len());
        assert_eq!(&variants[..2], ["!dog", "@dog"]);
        assert!(variants.contains(&"_dog".to_string()));
        assert_eq!(variants.last().map(String::as_str), Some("2025dog"));
    }

    #[test]
    fn test_number_patterns() {
        let patterns = number_patterns("alice", "1997");
        assert_eq!(patterns.len(), 2 * PATTERN_SYMBOLS.len());
        assert_eq!(&patterns[..2], ["alice!1997", "!alice1997"]);
        assert!(patterns.contains(&"alice_1997".to_string()));
    }

    #[test]
    fn test_is_number() {
        assert!(is_number("1997"));
        assert!(!is_number("dog1"));
        assert!(!is_number(""));
    }

    #[test]
    fn test_concatenations_both_orders() {
        assert_eq!(concatenations("dog", "2020"), ["dog2020", "2020dog"]);
        assert_eq!(
            concatenations_with("alice", "toby", "_"),
            ["alice_toby", "toby_alice"]
        );
    }
}
