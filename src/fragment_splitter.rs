//! # Fragment Splitter Module
//!
//! Breaks one free-text log into the pieces parsed independently: one per
//! exercise on the workout path, one per food on the nutrition path.

use crate::patterns::{FOOD_SEPARATOR_REGEX, TRANSITION_REGEX};
use log::trace;

/// Split a workout description into exercise blocks.
///
/// Semicolons take precedence, then transition words (`then`, `also`,
/// `next`, `after that`, `afterwards`, `followed by`). Commas never split a
/// workout because they also separate sets of the same exercise.
pub fn split_workout(input: &str, min_len: usize) -> Vec<String> {
    let pieces: Vec<&str> = if input.contains(';') {
        input.split(';').collect()
    } else if TRANSITION_REGEX.is_match(input) {
        TRANSITION_REGEX.split(input).collect()
    } else {
        vec![input]
    };
    keep_fragments(pieces, min_len)
}

/// Split a meal description into food fragments on `,` `+` `&` `and`
/// `with` `plus`. The input is lowercased first.
pub fn split_foods(input: &str, min_len: usize) -> Vec<String> {
    let lowered = input.to_lowercase();
    keep_fragments(FOOD_SEPARATOR_REGEX.split(&lowered).collect(), min_len)
}

fn keep_fragments(pieces: Vec<&str>, min_len: usize) -> Vec<String> {
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| {
            let keep = piece.chars().count() >= min_len;
            if !keep && !piece.is_empty() {
                trace!("Dropping short fragment '{piece}'");
            }
            keep
        })
        .map(str::to_string)
        .collect()
}
