//! # Analyzer Module
//!
//! The seam between callers and whatever turns log text into results. The
//! rule-based analyzer here is deterministic and offline; a model-backed
//! analyzer can implement the same trait by decoding its responses with
//! [`crate::external_response`].

use crate::catalog_errors::CatalogError;
use crate::fitness_model::{NutritionResult, WorkoutParseResult};
use crate::nutrition_analyzer::NutritionAnalyzer;
use crate::parser_config::ParserConfig;
use crate::workout_parser::WorkoutParser;

/// Something that can read workout and meal logs
pub trait FitnessLogAnalyzer {
    /// Short name used in logs
    fn name(&self) -> &str;

    fn parse_workout(&self, input: &str) -> WorkoutParseResult;

    fn analyze_nutrition(&self, input: &str) -> NutritionResult;
}

/// Catalog-driven analyzer built from the workout and nutrition parsers
#[derive(Debug, Clone)]
pub struct RuleBasedAnalyzer {
    workout: WorkoutParser,
    nutrition: NutritionAnalyzer,
}

impl RuleBasedAnalyzer {
    pub fn new(workout: WorkoutParser, nutrition: NutritionAnalyzer) -> Self {
        Self { workout, nutrition }
    }

    /// Build both parsers from a configuration, loading any catalog overrides
    pub fn from_config(config: &ParserConfig) -> Result<Self, CatalogError> {
        let workout = WorkoutParser::new(config.load_exercise_catalog()?, config.workout.clone());
        let nutrition =
            NutritionAnalyzer::new(config.load_food_catalog()?, config.nutrition.clone());
        Ok(Self::new(workout, nutrition))
    }

    pub fn workout_parser(&self) -> &WorkoutParser {
        &self.workout
    }

    pub fn nutrition_analyzer(&self) -> &NutritionAnalyzer {
        &self.nutrition
    }
}

impl Default for RuleBasedAnalyzer {
    fn default() -> Self {
        Self::new(WorkoutParser::builtin(), NutritionAnalyzer::builtin())
    }
}

impl FitnessLogAnalyzer for RuleBasedAnalyzer {
    fn name(&self) -> &str {
        "rule-based"
    }

    fn parse_workout(&self, input: &str) -> WorkoutParseResult {
        self.workout.parse(input)
    }

    fn analyze_nutrition(&self, input: &str) -> NutritionResult {
        self.nutrition.analyze(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness_model::Confidence;

    #[test]
    fn test_rule_based_analyzer_through_trait_object() {
        let analyzer: Box<dyn FitnessLogAnalyzer> = Box::new(RuleBasedAnalyzer::default());
        assert_eq!(analyzer.name(), "rule-based");
        assert_eq!(
            analyzer.parse_workout("bench press 3x10").confidence,
            Confidence::High
        );
        assert_eq!(analyzer.analyze_nutrition("1 banana").calories, 105);
    }

    #[test]
    fn test_from_default_config() {
        let analyzer = RuleBasedAnalyzer::from_config(&ParserConfig::default()).unwrap();
        assert_eq!(analyzer.workout_parser().config().default_reps, 10);
        assert!(!analyzer.nutrition_analyzer().catalog().is_empty());
    }
}
