//! # Fitlog
//!
//! Rule-based parsing of free-text fitness logs. Workout descriptions become
//! exercises with sets and weights, meal descriptions become calorie and macro
//! estimates. Both entry points are pure and total: any input yields a result,
//! and a `low` confidence tier is the signal to fall back to manual entry.
//!
//! ```rust
//! use fitlog::{analyze_nutrition, parse_workout_description};
//!
//! let workout = parse_workout_description("squat set 1:8 reps, set 2:6 reps at 100kg");
//! assert_eq!(workout.exercises[0].exercise_name, "Squats");
//!
//! let meal = analyze_nutrition("1 banana");
//! assert_eq!(meal.calories, 105);
//! ```

pub mod aggregation;
pub mod analyzer;
pub mod catalog;
pub mod catalog_errors;
pub mod entity_resolver;
pub mod external_response;
pub mod fitness_model;
pub mod fragment_splitter;
pub mod fuzzy;
pub mod nutrition_analyzer;
pub mod nutrition_scaler;
pub mod parser_config;
pub mod patterns;
pub mod quantity;
pub mod set_parser;
pub mod workout_parser;

pub use analyzer::{FitnessLogAnalyzer, RuleBasedAnalyzer};
pub use fitness_model::{Confidence, NutritionResult, WorkoutParseResult};
pub use nutrition_analyzer::analyze_nutrition;
pub use workout_parser::{format_parsed_workout, parse_workout_description};
