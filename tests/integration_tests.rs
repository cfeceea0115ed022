//! # Integration Tests
//!
//! Wiring tests across modules: catalog files picked up through the
//! configuration, the analyzer trait, the JSON wire shape and decoding of
//! responses from an alternative analyzer.

use fitlog::analyzer::{FitnessLogAnalyzer, RuleBasedAnalyzer};
use fitlog::catalog_errors::{CatalogError, ResponseError};
use fitlog::external_response::{decode_nutrition_response, decode_workout_response};
use fitlog::fitness_model::{Confidence, ExerciseSet};
use fitlog::parser_config::{
    ParserConfig, ENV_DEFAULT_REPS, ENV_EXERCISE_ALIASES, ENV_EXERCISE_CATALOG, ENV_FOOD_ALIASES,
    ENV_FOOD_CATALOG,
};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const EXERCISES: &str = r#"[
    {"id": "zercher-squat", "name": "Zercher Squat", "muscle_group": "Quads", "category": "Compound"},
    {"id": "sled-push", "name": "Sled Push", "muscle_group": "Full Body", "category": "Cardio"}
]"#;

const EXERCISE_ALIASES: &str = r#"[["zerch", "zercher-squat"]]"#;

const FOODS: &str = r#"[
    {"key": "Protein Bar", "calories_per_serving": 200, "protein_per_serving": 20,
     "carbs_per_serving": 22, "fat_per_serving": 7, "serving_description": "1 bar"}
]"#;

const FOOD_ALIASES: &str = r#"[["bar", "protein bar"]]"#;

fn write_file(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

/// Configuration pointing at catalog files in a fresh temporary directory
fn config_with_catalogs(extra: &[(&str, &str)]) -> (TempDir, ParserConfig) {
    let dir = tempfile::tempdir().unwrap();
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert(
        ENV_EXERCISE_CATALOG.to_string(),
        write_file(dir.path(), "exercises.json", EXERCISES),
    );
    vars.insert(
        ENV_EXERCISE_ALIASES.to_string(),
        write_file(dir.path(), "exercise_aliases.json", EXERCISE_ALIASES),
    );
    vars.insert(
        ENV_FOOD_CATALOG.to_string(),
        write_file(dir.path(), "foods.json", FOODS),
    );
    vars.insert(
        ENV_FOOD_ALIASES.to_string(),
        write_file(dir.path(), "food_aliases.json", FOOD_ALIASES),
    );
    for (name, value) in extra {
        vars.insert(name.to_string(), value.to_string());
    }
    let config = ParserConfig::from_lookup(|name| vars.get(name).cloned());
    (dir, config)
}

#[test]
fn test_catalog_files_replace_builtin_catalogs() {
    let (_dir, config) = config_with_catalogs(&[]);
    let analyzer = RuleBasedAnalyzer::from_config(&config).unwrap();

    let workout = analyzer.parse_workout("zerch 5x5 at 60kg");
    assert_eq!(workout.exercises[0].exercise_id, "zercher-squat");
    assert_eq!(workout.exercises[0].sets, vec![ExerciseSet::new(5, 60.0); 5]);
    assert_eq!(workout.confidence, Confidence::High);

    // builtin names are unknown to the custom catalog
    let workout = analyzer.parse_workout("bench press 3x10");
    assert!(workout.exercises[0].is_custom());

    let meal = analyzer.analyze_nutrition("2 protein bars");
    assert_eq!(meal.items[0].name, "protein bar");
    assert_eq!(meal.calories, 400);
    assert_eq!(meal.protein, 40.0);
    assert_eq!(meal.confidence, Confidence::High);
}

#[test]
fn test_default_reps_override_reaches_the_parser() {
    let (_dir, config) = config_with_catalogs(&[(ENV_DEFAULT_REPS, "8")]);
    let analyzer = RuleBasedAnalyzer::from_config(&config).unwrap();

    let workout = analyzer.parse_workout("sled push 3 sets");
    assert_eq!(workout.exercises[0].exercise_id, "sled-push");
    assert_eq!(workout.exercises[0].sets, vec![ExerciseSet::new(8, 0.0); 3]);
}

#[test]
fn test_broken_catalog_files_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let entries = write_file(dir.path(), "exercises.json", EXERCISES);
    let dangling = write_file(dir.path(), "aliases.json", r#"[["ghost", "no-such-id"]]"#);
    let garbage = write_file(dir.path(), "garbage.json", "{ not json");

    let config = ParserConfig::from_lookup(|name| match name {
        ENV_EXERCISE_CATALOG => Some(entries.clone()),
        ENV_EXERCISE_ALIASES => Some(dangling.clone()),
        _ => None,
    });
    assert!(matches!(
        RuleBasedAnalyzer::from_config(&config),
        Err(CatalogError::UnknownAliasTarget { .. })
    ));

    let config = ParserConfig::from_lookup(|name| match name {
        ENV_FOOD_CATALOG => Some(garbage.clone()),
        _ => None,
    });
    assert!(matches!(
        RuleBasedAnalyzer::from_config(&config),
        Err(CatalogError::Parse(_))
    ));
}

#[test]
fn test_results_serialize_in_camel_case() {
    let analyzer = RuleBasedAnalyzer::default();

    let workout = analyzer.parse_workout("bench press 3x10 at 60kg");
    let json = serde_json::to_value(&workout).unwrap();
    assert_eq!(json["confidence"], "high");
    assert_eq!(json["exercises"][0]["exerciseId"], "bench-press");
    assert_eq!(json["exercises"][0]["exerciseName"], "Bench Press");
    assert_eq!(json["exercises"][0]["sets"][0]["reps"], 10);
    assert_eq!(json["exercises"][0]["sets"][0]["weight"], 60.0);
    assert_eq!(json["rawParsed"][0]["matched"], true);
    assert_eq!(json["rawParsed"][0]["originalText"], "bench press 3x10 at 60kg");

    let meal = analyzer.analyze_nutrition("1 banana");
    let json = serde_json::to_value(&meal).unwrap();
    assert_eq!(json["calories"], 105);
    assert_eq!(json["items"][0]["name"], "banana");
    assert_eq!(json["confidence"], "high");
}

#[test]
fn test_decoded_responses_match_rule_based_shape() {
    let response = r#"```json
{
  "exercises": [
    {"exerciseId": "bench-press", "exerciseName": "Bench Press",
     "sets": [{"reps": 10, "weight": 60}, {"reps": 8, "weight": 60}]},
    {"exerciseName": "Sled Drag", "sets": []}
  ],
  "confidence": "High"
}
```"#;
    let input = "bench 10 and 8 at 60 then sled drag";
    let decoded = decode_workout_response(response, input).unwrap();

    assert_eq!(decoded.confidence, Confidence::High);
    assert_eq!(decoded.exercises.len(), 2);
    assert_eq!(
        decoded.exercises[0].sets,
        vec![ExerciseSet::new(10, 60.0), ExerciseSet::new(8, 60.0)]
    );
    assert_eq!(decoded.exercises[1].exercise_id, "custom-sled-drag");
    assert_eq!(decoded.exercises[1].sets, vec![ExerciseSet::placeholder()]);
    assert!(decoded.raw_parsed.iter().all(|raw| raw.matched));
    assert_eq!(decoded.raw_parsed[1].original_text, input);

    let local = RuleBasedAnalyzer::default().parse_workout("bench press 3x10");
    let decoded_keys = serde_json::to_value(&decoded).unwrap();
    let local_keys = serde_json::to_value(&local).unwrap();
    assert_eq!(
        decoded_keys.as_object().unwrap().keys().collect::<Vec<_>>(),
        local_keys.as_object().unwrap().keys().collect::<Vec<_>>()
    );
}

#[test]
fn test_decoded_nutrition_keeps_response_totals() {
    let response = r#"{"calories": 412.6, "protein": 30.04, "carbs": 41, "fat": 12.26,
        "items": [{"name": "chicken wrap", "quantity": 1, "calories": 412.6,
                   "protein": 30.04, "carbs": 41, "fat": 12.26}],
        "confidence": "medium"}"#;
    let decoded = decode_nutrition_response(response).unwrap();

    assert_eq!(decoded.calories, 413);
    assert_eq!(decoded.protein, 30.0);
    assert_eq!(decoded.fat, 12.3);
    assert_eq!(decoded.items[0].name, "chicken wrap");
    assert_eq!(decoded.confidence, Confidence::Medium);

    assert!(matches!(
        decode_nutrition_response("```json\n```"),
        Err(ResponseError::EmptyResponse)
    ));
    assert!(matches!(
        decode_workout_response("sorry, I can't help", "x"),
        Err(ResponseError::InvalidJson(_))
    ));
}
