//! # Aggregation Module
//!
//! Combines per-fragment outcomes into final results and assigns confidence.

use crate::fitness_model::{
    round_one_decimal, Confidence, NutritionItem, NutritionResult, RawParsedExercise,
    WorkoutExerciseResult, WorkoutParseResult,
};

/// Confidence of a workout parse from the number of exercises produced and
/// how many of them are custom (unmatched) exercises
pub fn workout_confidence(exercises: usize, unmatched: usize) -> Confidence {
    if exercises == 0 {
        Confidence::Low
    } else if unmatched == 0 {
        Confidence::High
    } else if exercises > unmatched {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Confidence of a nutrition analysis from matched items and unmatched fragments
pub fn nutrition_confidence(items: usize, unmatched: usize) -> Confidence {
    if unmatched == 0 && items > 0 {
        Confidence::High
    } else if items > unmatched {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Assemble a workout result
pub fn aggregate_workout(
    exercises: Vec<WorkoutExerciseResult>,
    raw_parsed: Vec<RawParsedExercise>,
) -> WorkoutParseResult {
    let unmatched = raw_parsed.iter().filter(|raw| !raw.matched).count();
    WorkoutParseResult {
        confidence: workout_confidence(exercises.len(), unmatched),
        exercises,
        raw_parsed,
    }
}

/// Sum of one macro over the items, starting from `+0.0` so an empty meal
/// does not report `-0.0`
fn total_of(items: &[NutritionItem], macro_value: impl Fn(&NutritionItem) -> f64) -> f64 {
    round_one_decimal(items.iter().map(macro_value).fold(0.0, |total, value| total + value))
}

/// Assemble a nutrition result; totals are sums of the already rounded items.
/// Calories saturate at `u32::MAX`.
pub fn aggregate_nutrition(items: Vec<NutritionItem>, unmatched: usize) -> NutritionResult {
    let calories = items
        .iter()
        .map(|item| item.calories)
        .fold(0u32, u32::saturating_add);
    NutritionResult {
        calories,
        protein: total_of(&items, |item| item.protein),
        carbs: total_of(&items, |item| item.carbs),
        fat: total_of(&items, |item| item.fat),
        confidence: nutrition_confidence(items.len(), unmatched),
        items,
    }
}
