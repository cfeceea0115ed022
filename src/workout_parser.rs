//! # Workout Parser
//!
//! Turns a free-text workout description into structured exercises.
//!
//! The description is split into exercise blocks, each block yields a weight,
//! a list of sets and a name, and the name is resolved against the exercise
//! catalog. Unrecognized names become custom exercises instead of being
//! dropped, so the confidence tier is the only signal of a poor parse.
//!
//! ## Usage
//!
//! ```rust
//! use fitlog::fitness_model::Confidence;
//! use fitlog::workout_parser::parse_workout_description;
//!
//! let result = parse_workout_description("3 sets of bench press at 60kg, 10 reps each");
//!
//! assert_eq!(result.exercises[0].exercise_name, "Bench Press");
//! assert_eq!(result.exercises[0].sets.len(), 3);
//! assert_eq!(result.confidence, Confidence::High);
//! ```

use crate::aggregation::aggregate_workout;
use crate::catalog::ExerciseCatalog;
use crate::entity_resolver::EntityResolver;
use crate::fitness_model::{
    RawParsedExercise, WorkoutExerciseResult, WorkoutParseResult, CUSTOM_ID_PREFIX,
};
use crate::fragment_splitter::split_workout;
use crate::parser_config::WorkoutParserConfig;
use crate::set_parser::read_fragment;
use log::{debug, info};
use std::sync::LazyLock;

static DEFAULT_PARSER: LazyLock<WorkoutParser> = LazyLock::new(WorkoutParser::builtin);

/// Hint shown when nothing could be parsed
pub const EMPTY_WORKOUT_HINT: &str =
    "Couldn't parse any exercises. Try: '3 sets of bench press at 60kg, 10 reps each'";

/// Workout description parser bound to one exercise catalog
#[derive(Debug, Clone)]
pub struct WorkoutParser {
    catalog: ExerciseCatalog,
    resolver: EntityResolver,
    config: WorkoutParserConfig,
}

impl WorkoutParser {
    pub fn new(catalog: ExerciseCatalog, config: WorkoutParserConfig) -> Self {
        let resolver = EntityResolver::for_exercises(&catalog, config.resolver.clone());
        Self {
            catalog,
            resolver,
            config,
        }
    }

    /// Parser over the built-in catalog with default settings
    pub fn builtin() -> Self {
        Self::new(
            ExerciseCatalog::builtin().clone(),
            WorkoutParserConfig::default(),
        )
    }

    pub fn catalog(&self) -> &ExerciseCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &WorkoutParserConfig {
        &self.config
    }

    /// Parse a workout description; never fails
    pub fn parse(&self, input: &str) -> WorkoutParseResult {
        let input = input.trim();
        if input.chars().count() < self.config.min_fragment_len {
            debug!("Workout input too short to parse: '{input}'");
            return WorkoutParseResult::empty();
        }

        let mut exercises = Vec::new();
        let mut raw_parsed = Vec::new();
        for fragment in split_workout(input, self.config.min_fragment_len) {
            if let Some((exercise, raw)) = self.parse_fragment(&fragment) {
                exercises.push(exercise);
                raw_parsed.push(raw);
            }
        }

        let result = aggregate_workout(exercises, raw_parsed);
        info!(
            "Parsed workout: {} exercise(s), {} unmatched, {} confidence",
            result.exercises.len(),
            result.unmatched_count(),
            result.confidence
        );
        result
    }

    fn parse_fragment(&self, fragment: &str) -> Option<(WorkoutExerciseResult, RawParsedExercise)> {
        let reading = read_fragment(fragment, &self.config);
        if reading.name.chars().count() < self.config.min_exercise_name_len {
            debug!("No exercise name in fragment '{fragment}'");
            return None;
        }

        let (id, name, matched) = match self.resolver.resolve(&reading.name) {
            Some(found) => {
                let entry = &self.catalog.entries()[found.index];
                debug!("'{}' resolved to {} via {}", reading.name, entry.id, found.stage);
                (entry.id.clone(), entry.name.clone(), true)
            }
            None => {
                let name = title_case(&reading.name);
                if name.chars().count() < self.config.min_custom_name_len {
                    debug!("Dropping unmatched name '{name}': too short for a custom exercise");
                    return None;
                }
                debug!("'{}' not in catalog, adding custom exercise", reading.name);
                (custom_exercise_id(&name), name, false)
            }
        };

        let exercise = WorkoutExerciseResult::new(&id, &name).with_sets(reading.sets.clone());
        let raw = RawParsedExercise {
            exercise_name: name,
            sets: reading.sets,
            matched,
            original_text: fragment.to_string(),
        };
        Some((exercise, raw))
    }
}

/// Parse with the built-in catalog and default settings
pub fn parse_workout_description(input: &str) -> WorkoutParseResult {
    DEFAULT_PARSER.parse(input)
}

/// One line per exercise, or a usage hint when nothing parsed
pub fn format_parsed_workout(result: &WorkoutParseResult) -> String {
    if result.exercises.is_empty() {
        return EMPTY_WORKOUT_HINT.to_string();
    }
    result
        .exercises
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Capitalize the first letter of each space-separated word
pub fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// `custom-` followed by the lowercased, hyphen-joined name
pub fn custom_exercise_id(name: &str) -> String {
    format!(
        "{CUSTOM_ID_PREFIX}{}",
        name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
    )
}
