//! # External Response Module
//!
//! Decodes JSON produced by an alternative (model-backed) analyzer into the
//! same result types the rule-based parsers return. Responses may be wrapped
//! in a Markdown code fence and may omit fields; missing fields take the
//! same defaults as an empty parse.

use crate::catalog_errors::ResponseError;
use crate::fitness_model::{
    round_calories, round_one_decimal, Confidence, ExerciseSet, MacroValues, NutritionItem,
    NutritionResult, RawParsedExercise, WorkoutExerciseResult, WorkoutParseResult,
};
use crate::workout_parser::custom_exercise_id;
use log::{debug, warn};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ExternalWorkout {
    exercises: Vec<ExternalExercise>,
    confidence: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ExternalExercise {
    exercise_id: String,
    exercise_name: String,
    sets: Vec<ExternalSet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExternalSet {
    reps: f64,
    weight: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExternalNutrition {
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    items: Vec<ExternalItem>,
    confidence: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExternalItem {
    name: String,
    quantity: f64,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
}

/// Remove a leading ```` ``` ```` / ```` ```json ```` line and a trailing fence
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let text = match text.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            rest.strip_prefix('\n').unwrap_or(rest)
        }
        None => text,
    };
    text.strip_suffix("```").unwrap_or(text).trim()
}

fn parse_confidence(label: Option<&str>) -> Confidence {
    match label.map(|l| l.trim().to_lowercase()).as_deref() {
        Some("high") => Confidence::High,
        Some("medium") => Confidence::Medium,
        Some("low") | None => Confidence::Low,
        Some(other) => {
            warn!("Unknown confidence label '{other}', using low");
            Confidence::Low
        }
    }
}

fn whole_reps(reps: f64) -> u32 {
    if reps.is_finite() && reps > 0.0 {
        reps.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// Decode a workout response; `input` is recorded as every exercise's
/// original text
pub fn decode_workout_response(text: &str, input: &str) -> Result<WorkoutParseResult, ResponseError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(ResponseError::EmptyResponse);
    }
    let parsed: ExternalWorkout = serde_json::from_str(body)?;

    let mut exercises = Vec::new();
    let mut raw_parsed = Vec::new();
    for exercise in parsed.exercises {
        let name = exercise.exercise_name.trim().to_string();
        if name.is_empty() {
            debug!("Skipping external exercise without a name");
            continue;
        }
        let id = match exercise.exercise_id.trim() {
            "" => custom_exercise_id(&name),
            id => id.to_string(),
        };
        let sets: Vec<ExerciseSet> = exercise
            .sets
            .iter()
            .map(|set| ExerciseSet::new(whole_reps(set.reps), set.weight))
            .collect();
        raw_parsed.push(RawParsedExercise {
            exercise_name: name.clone(),
            sets: sets.clone(),
            matched: true,
            original_text: input.to_string(),
        });
        exercises.push(WorkoutExerciseResult::new(&id, &name).with_sets(sets));
    }

    Ok(WorkoutParseResult {
        exercises,
        confidence: parse_confidence(parsed.confidence.as_deref()),
        raw_parsed,
    })
}

/// Decode a nutrition response, rounding totals and item values
pub fn decode_nutrition_response(text: &str) -> Result<NutritionResult, ResponseError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(ResponseError::EmptyResponse);
    }
    let parsed: ExternalNutrition = serde_json::from_str(body)?;

    let items = parsed
        .items
        .iter()
        .map(|item| {
            NutritionItem::from_values(
                &item.name,
                item.quantity,
                &MacroValues::new(item.calories, item.protein, item.carbs, item.fat),
            )
        })
        .collect();

    Ok(NutritionResult {
        calories: round_calories(parsed.calories),
        protein: round_one_decimal(parsed.protein),
        carbs: round_one_decimal(parsed.carbs),
        fat: round_one_decimal(parsed.fat),
        items,
        confidence: parse_confidence(parsed.confidence.as_deref()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```\n[]\n```"), "[]");
        assert_eq!(strip_code_fence("  {}  "), "{}");
    }

    #[test]
    fn test_decode_workout_response() {
        let text = r#"```json
{
  "exercises": [
    {"exerciseId": "bench-press", "exerciseName": "Bench Press",
     "sets": [{"reps": 10, "weight": 60}, {"reps": 8, "weight": 62.5}]},
    {"exerciseName": "Sled Push", "sets": []}
  ],
  "confidence": "medium"
}
```"#;
        let result = decode_workout_response(text, "bench then sled").unwrap();
        assert_eq!(result.confidence, Confidence::Medium);
        assert_eq!(result.exercises.len(), 2);
        assert_eq!(result.exercises[0].sets[1], ExerciseSet::new(8, 62.5));
        assert_eq!(result.exercises[1].exercise_id, "custom-sled-push");
        assert_eq!(result.exercises[1].sets, vec![ExerciseSet::placeholder()]);
        assert!(result.raw_parsed.iter().all(|raw| raw.matched));
        assert!(result
            .raw_parsed
            .iter()
            .all(|raw| raw.original_text == "bench then sled"));
        assert!(result.raw_parsed[1].sets.is_empty());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let result = decode_workout_response("{}", "anything").unwrap();
        assert!(result.exercises.is_empty());
        assert_eq!(result.confidence, Confidence::Low);

        let result = decode_nutrition_response(r#"{"calories": 250.6}"#).unwrap();
        assert_eq!(result.calories, 251);
        assert!(result.items.is_empty());
        assert_eq!(result.confidence, Confidence::Low);
    }

    #[test]
    fn test_decode_nutrition_rounds_values() {
        let text = r#"{"calories": 412.4, "protein": 30.04, "carbs": 40.96, "fat": 12.25,
            "items": [{"name": "oatmeal", "quantity": 1, "calories": 150.5, "protein": 5.06,
                       "carbs": 27.0, "fat": 2.5}],
            "confidence": "High"}"#;
        let result = decode_nutrition_response(text).unwrap();
        assert_eq!(result.calories, 412);
        assert_eq!(result.protein, 30.0);
        assert_eq!(result.carbs, 41.0);
        assert_eq!(result.items[0].calories, 151);
        assert_eq!(result.items[0].protein, 5.1);
        assert_eq!(result.confidence, Confidence::High);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            decode_nutrition_response("```json\n```").unwrap_err(),
            ResponseError::EmptyResponse
        );
        assert!(matches!(
            decode_workout_response("not json", "x").unwrap_err(),
            ResponseError::InvalidJson(_)
        ));
    }
}
