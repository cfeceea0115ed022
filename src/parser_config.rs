//! # Parser Configuration Module
//!
//! Tunable thresholds for the entity resolver and the two parsing pipelines,
//! plus the environment overrides read by [`ParserConfig::from_env`].

use crate::catalog::{ExerciseCatalog, FoodCatalog};
use crate::catalog_errors::CatalogError;
use log::{info, warn};
use std::path::PathBuf;

// Constants for resolver configuration
pub const MIN_QUERY_LEN: usize = 2;
pub const MIN_REVERSE_CONTAINMENT_LEN: usize = 3;
pub const MIN_WORD_LEN: usize = 2;
pub const MAX_WORD_DISTANCE: usize = 2;
pub const WORD_OVERLAP_RATIO: f64 = 0.5;
pub const FUZZY_DISTANCE_FLOOR: usize = 3;
pub const FUZZY_DISTANCE_RATIO: f64 = 0.4;
pub const MIN_QUALIFIER_LEN: usize = 4;

// Constants for the workout pipeline
pub const DEFAULT_REPS: u32 = crate::fitness_model::DEFAULT_REPS;
pub const LB_TO_KG: f64 = 0.453592;
pub const MIN_FRAGMENT_LEN: usize = 3;
pub const MIN_CUSTOM_NAME_LEN: usize = 3;
pub const MIN_EXERCISE_NAME_LEN: usize = 2;
pub const MAX_SETS: u32 = 100;

// Constants for the nutrition pipeline
pub const GRAMS_PER_OZ: f64 = 28.35;
pub const GRAMS_PER_TBSP: f64 = 15.0;
pub const GRAMS_PER_TSP: f64 = 5.0;

/// Words that describe how an exercise was performed rather than which one
pub const GYM_QUALIFIERS: &[&str] = &[
    "heavy", "light", "paused", "pause", "tempo", "slow", "fast", "wide", "narrow", "close",
    "grip", "weighted", "assisted", "single", "arm", "leg", "alternating", "standing", "seated",
    "strict", "warmup", "warm", "working", "drop", "superset", "failure", "total", "today",
    "morning", "evening", "workout", "session", "felt", "good", "easy", "hard",
];

// Environment variable names
pub const ENV_EXERCISE_CATALOG: &str = "FITLOG_EXERCISE_CATALOG";
pub const ENV_EXERCISE_ALIASES: &str = "FITLOG_EXERCISE_ALIASES";
pub const ENV_FOOD_CATALOG: &str = "FITLOG_FOOD_CATALOG";
pub const ENV_FOOD_ALIASES: &str = "FITLOG_FOOD_ALIASES";
pub const ENV_DEFAULT_REPS: &str = "FITLOG_DEFAULT_REPS";

/// Thresholds for the name resolution ladder
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Queries shorter than this never match
    pub min_query_len: usize,
    /// Minimum query length when the catalog key contains the query
    pub min_reverse_containment_len: usize,
    /// Query words shorter than this are ignored by word overlap
    pub min_word_len: usize,
    /// Largest edit distance at which two words still match
    pub max_word_distance: usize,
    /// Share of query words that must match a catalog name
    pub word_overlap_ratio: f64,
    /// Whole-string edit distance always accepted up to this value
    pub fuzzy_distance_floor: usize,
    /// Whole-string edit distance accepted up to this share of the name length
    pub fuzzy_distance_ratio: f64,
    /// Reject loose matches when the query carries an unknown word
    pub guard_unknown_qualifiers: bool,
    /// Unknown words shorter than this are tolerated by the guard
    pub min_qualifier_len: usize,
    /// Iterate catalog names longest first in the loose stages
    pub longest_name_first: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            min_query_len: MIN_QUERY_LEN,
            min_reverse_containment_len: MIN_REVERSE_CONTAINMENT_LEN,
            min_word_len: MIN_WORD_LEN,
            max_word_distance: MAX_WORD_DISTANCE,
            word_overlap_ratio: WORD_OVERLAP_RATIO,
            fuzzy_distance_floor: FUZZY_DISTANCE_FLOOR,
            fuzzy_distance_ratio: FUZZY_DISTANCE_RATIO,
            guard_unknown_qualifiers: false,
            min_qualifier_len: MIN_QUALIFIER_LEN,
            longest_name_first: false,
        }
    }
}

impl ResolverConfig {
    /// Resolver settings for exercise names
    pub fn for_exercises() -> Self {
        Self {
            guard_unknown_qualifiers: true,
            ..Self::default()
        }
    }

    /// Resolver settings for food names
    pub fn for_foods() -> Self {
        Self {
            longest_name_first: true,
            ..Self::default()
        }
    }
}

/// Settings for the workout pipeline
#[derive(Debug, Clone)]
pub struct WorkoutParserConfig {
    /// Reps used when a set count is given without reps
    pub default_reps: u32,
    /// Pounds to kilograms
    pub lb_to_kg: f64,
    /// Fragments shorter than this are skipped
    pub min_fragment_len: usize,
    /// Extracted names shorter than this are skipped
    pub min_exercise_name_len: usize,
    /// Unmatched names shorter than this are not turned into custom exercises
    pub min_custom_name_len: usize,
    /// Upper bound on sets produced from a single fragment
    pub max_sets: u32,
    pub resolver: ResolverConfig,
}

impl Default for WorkoutParserConfig {
    fn default() -> Self {
        Self {
            default_reps: DEFAULT_REPS,
            lb_to_kg: LB_TO_KG,
            min_fragment_len: MIN_FRAGMENT_LEN,
            min_exercise_name_len: MIN_EXERCISE_NAME_LEN,
            min_custom_name_len: MIN_CUSTOM_NAME_LEN,
            max_sets: MAX_SETS,
            resolver: ResolverConfig::for_exercises(),
        }
    }
}

/// Settings for the nutrition pipeline
#[derive(Debug, Clone)]
pub struct NutritionParserConfig {
    /// Fragments shorter than this are skipped
    pub min_fragment_len: usize,
    pub grams_per_oz: f64,
    pub grams_per_tbsp: f64,
    pub grams_per_tsp: f64,
    pub resolver: ResolverConfig,
}

impl Default for NutritionParserConfig {
    fn default() -> Self {
        Self {
            min_fragment_len: MIN_FRAGMENT_LEN,
            grams_per_oz: GRAMS_PER_OZ,
            grams_per_tbsp: GRAMS_PER_TBSP,
            grams_per_tsp: GRAMS_PER_TSP,
            resolver: ResolverConfig::for_foods(),
        }
    }
}

/// Full configuration: thresholds plus optional catalog file overrides
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    pub workout: WorkoutParserConfig,
    pub nutrition: NutritionParserConfig,
    /// JSON file replacing the built-in exercise list
    pub exercise_catalog_path: Option<PathBuf>,
    /// JSON file replacing the built-in exercise aliases
    pub exercise_aliases_path: Option<PathBuf>,
    /// JSON file replacing the built-in food list
    pub food_catalog_path: Option<PathBuf>,
    /// JSON file replacing the built-in food aliases
    pub food_aliases_path: Option<PathBuf>,
}

impl ParserConfig {
    /// Defaults overlaid with `FITLOG_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overlaid with values from `lookup`, keyed by variable name
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let path = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        };
        config.exercise_catalog_path = path(ENV_EXERCISE_CATALOG);
        config.exercise_aliases_path = path(ENV_EXERCISE_ALIASES);
        config.food_catalog_path = path(ENV_FOOD_CATALOG);
        config.food_aliases_path = path(ENV_FOOD_ALIASES);

        if let Some(raw) = lookup(ENV_DEFAULT_REPS) {
            match raw.trim().parse::<u32>() {
                Ok(reps) if reps > 0 => {
                    info!("Default reps overridden to {reps}");
                    config.workout.default_reps = reps;
                }
                _ => warn!("Ignoring invalid {ENV_DEFAULT_REPS} value: {raw:?}"),
            }
        }
        config
    }

    /// The exercise catalog this configuration points at
    pub fn load_exercise_catalog(&self) -> Result<ExerciseCatalog, CatalogError> {
        match &self.exercise_catalog_path {
            Some(entries) => {
                info!("Loading exercise catalog from {}", entries.display());
                ExerciseCatalog::from_files(entries, self.exercise_aliases_path.as_deref())
            }
            None => {
                if self.exercise_aliases_path.is_some() {
                    warn!("{ENV_EXERCISE_ALIASES} is ignored without {ENV_EXERCISE_CATALOG}");
                }
                Ok(ExerciseCatalog::builtin().clone())
            }
        }
    }

    /// The food catalog this configuration points at
    pub fn load_food_catalog(&self) -> Result<FoodCatalog, CatalogError> {
        match &self.food_catalog_path {
            Some(entries) => {
                info!("Loading food catalog from {}", entries.display());
                FoodCatalog::from_files(entries, self.food_aliases_path.as_deref())
            }
            None => {
                if self.food_aliases_path.is_some() {
                    warn!("{ENV_FOOD_ALIASES} is ignored without {ENV_FOOD_CATALOG}");
                }
                Ok(FoodCatalog::builtin().clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.workout.default_reps, 10);
        assert_eq!(config.workout.max_sets, 100);
        assert_eq!(config.workout.lb_to_kg, 0.453592);
        assert!(config.workout.resolver.guard_unknown_qualifiers);
        assert!(!config.nutrition.resolver.guard_unknown_qualifiers);
        assert!(config.nutrition.resolver.longest_name_first);
        assert_eq!(config.nutrition.grams_per_oz, 28.35);
        assert!(config.exercise_catalog_path.is_none());
    }

    #[test]
    fn test_lookup_overrides() {
        let config = ParserConfig::from_lookup(lookup_from(&[
            (ENV_DEFAULT_REPS, " 12 "),
            (ENV_FOOD_CATALOG, "/tmp/foods.json"),
            (ENV_EXERCISE_CATALOG, "   "),
        ]));
        assert_eq!(config.workout.default_reps, 12);
        assert_eq!(config.food_catalog_path, Some(PathBuf::from("/tmp/foods.json")));
        assert!(config.exercise_catalog_path.is_none());
    }

    #[test]
    fn test_invalid_default_reps_is_ignored() {
        for raw in ["zero", "0", "-3"] {
            let config = ParserConfig::from_lookup(lookup_from(&[(ENV_DEFAULT_REPS, raw)]));
            assert_eq!(config.workout.default_reps, DEFAULT_REPS);
        }
    }

    #[test]
    fn test_builtin_catalogs_without_overrides() {
        let config = ParserConfig::default();
        assert!(!config.load_exercise_catalog().unwrap().is_empty());
        assert!(!config.load_food_catalog().unwrap().is_empty());
    }

    #[test]
    fn test_missing_catalog_file_is_an_io_error() {
        let config = ParserConfig {
            exercise_catalog_path: Some(PathBuf::from("/definitely/not/here.json")),
            ..ParserConfig::default()
        };
        assert!(matches!(
            config.load_exercise_catalog(),
            Err(CatalogError::Io(_))
        ));
    }
}
