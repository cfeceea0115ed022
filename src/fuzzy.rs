//! # Fuzzy Matching Module
//!
//! Pure string-similarity helpers behind the loose stages of the entity
//! resolver: edit distance, word splitting, word-level matching and
//! word-boundary-aware containment.

use crate::parser_config::ResolverConfig;

/// Levenshtein edit distance between two strings, counted in chars
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];
    for i in 1..=a.len() {
        current[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            current[j] = (previous[j] + 1)
                .min(current[j - 1] + 1)
                .min(previous[j - 1] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Largest whole-string distance accepted against a name of `name_len` chars
pub fn distance_threshold(name_len: usize, config: &ResolverConfig) -> f64 {
    (config.fuzzy_distance_floor as f64).max(config.fuzzy_distance_ratio * name_len as f64)
}

/// Lowercase words of a catalog name, split on whitespace and hyphens
pub fn name_words(name: &str, min_len: usize) -> Vec<String> {
    name.to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|word| word.chars().count() >= min_len)
        .map(str::to_string)
        .collect()
}

/// Lowercase words of a query, split on whitespace
pub fn query_words(query: &str, min_len: usize) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() >= min_len)
        .map(str::to_string)
        .collect()
}

/// Whether two single words refer to the same thing: one contains the other,
/// or they are within `max_word_distance` edits
pub fn words_match(a: &str, b: &str, config: &ResolverConfig) -> bool {
    a.contains(b) || b.contains(a) || levenshtein(a, b) <= config.max_word_distance
}

/// Number of query words matched by at least one name word
pub fn word_overlap(query_words: &[String], name_words: &[String], config: &ResolverConfig) -> usize {
    query_words
        .iter()
        .filter(|q| name_words.iter().any(|n| words_match(q, n, config)))
        .count()
}

/// Whether `matched` of `total` query words is enough to accept a name
pub fn overlap_accepted(matched: usize, total: usize, config: &ResolverConfig) -> bool {
    total > 0 && matched as f64 >= (config.word_overlap_ratio * total as f64).max(1.0)
}

/// `word` is `base` with a trailing `s` or `es`
pub fn is_plural_of(word: &str, base: &str) -> bool {
    word.strip_prefix(base)
        .map(|rest| rest == "s" || rest == "es")
        .unwrap_or(false)
}

/// Whether `phrase` occurs in `text` as whole words, allowing a plural
/// `s`/`es` right after it (`"bench presses"` contains `"bench press"`).
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    if phrase.is_empty() {
        return false;
    }
    text.match_indices(phrase).any(|(start, _)| {
        let before_ok = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let rest = &text[start + phrase.len()..];
        let rest = rest
            .strip_prefix("es")
            .filter(|r| ends_word(r))
            .or_else(|| rest.strip_prefix('s').filter(|r| ends_word(r)))
            .unwrap_or(rest);
        before_ok && ends_word(rest)
    })
}

fn ends_word(rest: &str) -> bool {
    rest.chars().next().map_or(true, |c| !c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("squat", "squats"), 1);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("deadlfit", "deadlift"), 2);
    }

    #[test]
    fn test_distance_threshold() {
        let config = ResolverConfig::default();
        assert_eq!(distance_threshold(5, &config), 3.0);
        assert_eq!(distance_threshold(20, &config), 8.0);
    }

    #[test]
    fn test_name_words_split_on_hyphens() {
        assert_eq!(name_words("T-Bar Row", 2), vec!["bar", "row"]);
        assert_eq!(name_words("Pull-Ups", 2), vec!["pull", "ups"]);
    }

    #[test]
    fn test_words_match() {
        let config = ResolverConfig::default();
        assert!(words_match("curl", "curl", &config));
        assert!(words_match("curls", "curl", &config));
        assert!(words_match("pres", "press", &config));
        assert!(words_match("ro", "row", &config));
        assert!(words_match("lunge", "lunges", &config));
        assert!(words_match("squta", "squat", &config));
        assert!(words_match("deadlfit", "deadlift", &config));
        assert!(!words_match("xyzzy", "squat", &config));
        assert!(!words_match("qwerty", "deadlift", &config));
    }

    #[test]
    fn test_word_overlap() {
        let config = ResolverConfig::default();
        let query = query_words("barbel rows", 2);
        let name = name_words("Barbell Row", 2);
        assert_eq!(word_overlap(&query, &name, &config), 2);
        assert!(overlap_accepted(2, 2, &config));
        assert!(overlap_accepted(1, 2, &config));
        assert!(!overlap_accepted(1, 3, &config));
        assert!(!overlap_accepted(0, 0, &config));
    }

    #[test]
    fn test_plural() {
        assert!(is_plural_of("curls", "curl"));
        assert!(is_plural_of("presses", "press"));
        assert!(!is_plural_of("curly", "curl"));
        assert!(!is_plural_of("curl", "curl"));
    }

    #[test]
    fn test_contains_phrase() {
        assert!(contains_phrase("flat bench press", "bench press"));
        assert!(contains_phrase("bench presses today", "bench press"));
        assert!(contains_phrase("squats", "squat"));
        assert!(!contains_phrase("crunches", "run"));
        assert!(!contains_phrase("squatty", "squat"));
        assert!(!contains_phrase("anything", ""));
    }
}
