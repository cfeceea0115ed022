//! # Set Parser Module
//!
//! Reads one workout fragment: the working weight, the list of sets and the
//! leftover text that names the exercise.
//!
//! Individual rep counts are tried first through an ordered cascade:
//!
//! - `set 1: 8, set 2: 6` (sorted by set number)
//! - `set 1 was 8, set 2 had 6`
//! - `1st set 8, 2nd set 6`
//! - `got 8, 7, 6 reps`
//! - `8-7-6` or `8/7/6`
//!
//! When none of those apply, a set count (`3 sets`, `3x10`) and a uniform rep
//! count (`x10`, `sets of 10`, `10 reps`, `each 10`) are combined.
//!
//! One weight applies to every set of a fragment, so pyramids written in a
//! single fragment lose their per-set weights.

use crate::fitness_model::{round_one_decimal, ExerciseSet};
use crate::parser_config::WorkoutParserConfig;
use crate::patterns::{
    BARE_WEIGHT_REGEX, COMMA_SEQUENCE_REGEX, CONNECTOR_REGEX, DASH_SEQUENCE_REGEX,
    EACH_REPS_REGEX, KG_WEIGHT_REGEX, LB_WEIGHT_REGEX, NAME_PUNCTUATION_REGEX,
    ORDINAL_SET_REGEX, ORDINAL_STRIP_REGEX, REP_COUNT_REGEX, SETS_BY_REPS_REGEX,
    SETS_OF_REGEX, SET_COLON_REGEX, SET_COUNT_REGEX, SET_FORM_STRIP_REGEX, SET_VERB_REGEX,
    STANDALONE_NUMBER_REGEX, STRAY_HYPHEN_REGEX, WHITESPACE_REGEX,
};
use log::{debug, warn};
use regex::{Captures, Regex};

/// Everything read from a single workout fragment
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentReading {
    /// Cleaned exercise-name text, possibly empty
    pub name: String,
    /// Weight in kilograms, 0 when none was given
    pub weight: f64,
    /// Parsed sets, possibly empty
    pub sets: Vec<ExerciseSet>,
}

/// Read weight, sets and name from one fragment
pub fn read_fragment(fragment: &str, config: &WorkoutParserConfig) -> FragmentReading {
    let weight = parse_weight(fragment, config.lb_to_kg).unwrap_or(0.0);
    let remainder = strip_weights(fragment);
    let sets = build_sets(&remainder, weight, config);
    let name = extract_exercise_name(&remainder);
    debug!(
        "Fragment '{}' -> name '{}', {} set(s) at {}kg",
        fragment.trim(),
        name,
        sets.len(),
        weight
    );
    FragmentReading { name, weight, sets }
}

/// Weight in kilograms; kilograms are preferred over pounds, and a bare
/// `at 60` / `@60` counts as kilograms unless followed by `reps`, `sets` or `x`.
pub fn parse_weight(text: &str, lb_to_kg: f64) -> Option<f64> {
    let number = |caps: &Captures| caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok());

    if let Some(kg) = KG_WEIGHT_REGEX.captures(text).as_ref().and_then(number) {
        return Some(kg);
    }
    if let Some(lb) = LB_WEIGHT_REGEX.captures(text).as_ref().and_then(number) {
        return Some(round_one_decimal(lb * lb_to_kg));
    }
    BARE_WEIGHT_REGEX
        .captures_iter(text)
        .filter(|caps| caps.get(2).is_none())
        .find_map(|caps| number(&caps))
}

/// The fragment with every weight mention (and its `on`/`at`/`@`) removed
pub fn strip_weights(text: &str) -> String {
    let text = KG_WEIGHT_REGEX.replace_all(text, " ");
    let text = LB_WEIGHT_REGEX.replace_all(&text, " ");
    BARE_WEIGHT_REGEX
        .replace_all(&text, |caps: &Captures| {
            if caps.get(2).is_some() {
                caps[0].to_string()
            } else {
                " ".to_string()
            }
        })
        .into_owned()
}

type RepMatcher = fn(&str) -> Option<Vec<u32>>;

const REP_MATCHERS: &[RepMatcher] = &[
    numbered_colon_sets,
    numbered_verb_sets,
    ordinal_sets,
    comma_sequence,
    dash_sequence,
];

/// Per-set rep counts from the first matcher in the cascade that finds any
pub fn extract_individual_reps(text: &str) -> Vec<u32> {
    REP_MATCHERS
        .iter()
        .find_map(|matcher| matcher(text))
        .unwrap_or_default()
}

fn non_empty(reps: Vec<u32>) -> Option<Vec<u32>> {
    let reps: Vec<u32> = reps.into_iter().filter(|&r| r > 0).collect();
    (!reps.is_empty()).then_some(reps)
}

/// `(set number, reps)` pairs ordered by set number
fn numbered_reps(regex: &Regex, text: &str) -> Option<Vec<u32>> {
    let mut pairs: Vec<(u32, u32)> = regex
        .captures_iter(text)
        .filter_map(|caps| Some((caps[1].parse().ok()?, caps[2].parse().ok()?)))
        .collect();
    pairs.sort_by_key(|&(set_number, _)| set_number);
    non_empty(pairs.into_iter().map(|(_, reps)| reps).collect())
}

fn numbered_colon_sets(text: &str) -> Option<Vec<u32>> {
    numbered_reps(&SET_COLON_REGEX, text)
}

fn numbered_verb_sets(text: &str) -> Option<Vec<u32>> {
    numbered_reps(&SET_VERB_REGEX, text)
}

fn ordinal_sets(text: &str) -> Option<Vec<u32>> {
    numbered_reps(&ORDINAL_SET_REGEX, text)
}

fn split_numbers(text: &str, separators: &[char]) -> Vec<u32> {
    text.split(separators)
        .filter_map(|n| n.trim().parse().ok())
        .collect()
}

fn comma_sequence(text: &str) -> Option<Vec<u32>> {
    let caps = COMMA_SEQUENCE_REGEX.captures(text)?;
    let numbers = split_numbers(&caps[1], &[',']);
    if numbers.len() < 2 {
        return None;
    }
    non_empty(numbers)
}

fn dash_sequence(text: &str) -> Option<Vec<u32>> {
    let found = DASH_SEQUENCE_REGEX.find(text)?;
    let numbers = split_numbers(found.as_str(), &['-', '/']);
    if !(2..=5).contains(&numbers.len()) {
        return None;
    }
    non_empty(numbers)
}

fn first_positive(regex: &Regex, text: &str, group: usize) -> Option<u32> {
    regex
        .captures(text)
        .and_then(|caps| caps.get(group)?.as_str().parse::<u32>().ok())
        .filter(|&n| n > 0)
}

/// Explicit set count: `N sets`, else the left side of `NxM`
pub fn parse_set_count(text: &str) -> Option<u32> {
    first_positive(&SET_COUNT_REGEX, text, 1).or_else(|| first_positive(&SETS_BY_REPS_REGEX, text, 1))
}

/// Uniform rep count: right side of `NxM`, `sets of N`, `N reps`, `each N`
pub fn parse_default_reps(text: &str) -> Option<u32> {
    first_positive(&SETS_BY_REPS_REGEX, text, 2)
        .or_else(|| first_positive(&SETS_OF_REGEX, text, 1))
        .or_else(|| first_positive(&REP_COUNT_REGEX, text, 1))
        .or_else(|| first_positive(&EACH_REPS_REGEX, text, 1))
}

/// Sets for a weight-free fragment; empty when nothing describes a set
pub fn build_sets(text: &str, weight: f64, config: &WorkoutParserConfig) -> Vec<ExerciseSet> {
    let max_sets = config.max_sets as usize;
    let mut reps = extract_individual_reps(text);
    if !reps.is_empty() {
        if reps.len() > max_sets {
            warn!("Truncating {} parsed sets to {max_sets}", reps.len());
            reps.truncate(max_sets);
        }
        return reps.into_iter().map(|r| ExerciseSet::new(r, weight)).collect();
    }

    let default_reps = parse_default_reps(text);
    match parse_set_count(text) {
        Some(count) => {
            let count = if count > config.max_sets {
                warn!("Clamping set count {count} to {}", config.max_sets);
                config.max_sets
            } else {
                count
            };
            let reps = default_reps.unwrap_or(config.default_reps);
            (0..count).map(|_| ExerciseSet::new(reps, weight)).collect()
        }
        None => default_reps
            .map(|reps| vec![ExerciseSet::new(reps, weight)])
            .unwrap_or_default(),
    }
}

/// Exercise-name text left after removing set, rep and filler tokens from a
/// weight-free fragment
pub fn extract_exercise_name(text: &str) -> String {
    let strippers: [&Regex; 9] = [
        &SET_FORM_STRIP_REGEX,
        &ORDINAL_STRIP_REGEX,
        &DASH_SEQUENCE_REGEX,
        &SET_COUNT_REGEX,
        &REP_COUNT_REGEX,
        &SETS_BY_REPS_REGEX,
        &CONNECTOR_REGEX,
        &STANDALONE_NUMBER_REGEX,
        &NAME_PUNCTUATION_REGEX,
    ];
    let mut name = text.to_string();
    for regex in strippers {
        name = regex.replace_all(&name, " ").into_owned();
    }
    let name = STRAY_HYPHEN_REGEX.replace_all(&name, " ");
    WHITESPACE_REGEX.replace_all(name.trim(), " ").into_owned()
}
