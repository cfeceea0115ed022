//! # Fitness Log Data Model
//!
//! This module defines the data structures produced by the workout and
//! nutrition parsers. The field names serialize in camelCase so that the
//! rule-based analyzer and any alternative analyzer share one wire shape.
//!
//! ## Core Concepts
//!
//! - **ExerciseSet**: One performed set (reps and weight in kg)
//! - **WorkoutExerciseResult**: An exercise with its ordered sets
//! - **ParsedQuantity**: An amount and unit pulled out of a food fragment
//! - **NutritionItem**: One recognized food with its scaled macros
//! - **Confidence**: Derived tier telling the caller how much to trust a parse
//!
//! ## Usage
//!
//! ```rust
//! use fitlog::fitness_model::{ExerciseSet, WorkoutExerciseResult};
//!
//! let bench = WorkoutExerciseResult::new("bench-press", "Bench Press")
//!     .with_sets(vec![ExerciseSet::new(10, 60.0); 3]);
//!
//! assert_eq!(bench.sets.len(), 3);
//! assert!(!bench.is_custom());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default rep count used when a set carries no explicit reps
pub const DEFAULT_REPS: u32 = 10;

/// Confidence tier attached to every parse result
///
/// Always recomputed per parse, never stored as authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Every fragment resolved against the catalog
    High,
    /// More fragments resolved than not
    Medium,
    /// Nothing useful was recognized
    #[default]
    Low,
}

impl Confidence {
    /// Lowercase wire name of the tier
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }

    /// User-facing hint for the tier
    ///
    /// `Low` asks the user to fall back to manual entry.
    pub fn hint(&self) -> &'static str {
        match self {
            Confidence::High => "High confidence match",
            Confidence::Medium => "Partial match - review values",
            Confidence::Low => "Low confidence - consider manual entry",
        }
    }

    /// Whether the caller should offer a manual-entry fallback
    pub fn needs_manual_entry(&self) -> bool {
        matches!(self, Confidence::Low)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single performed set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    /// Repetitions, always at least 1
    pub reps: u32,
    /// Load in kilograms, 0 for bodyweight or unknown
    pub weight: f64,
}

impl ExerciseSet {
    /// Create a set, clamping reps to at least 1 and weight to at least 0
    pub fn new(reps: u32, weight: f64) -> Self {
        Self {
            reps: reps.max(1),
            weight: if weight.is_finite() { weight.max(0.0) } else { 0.0 },
        }
    }

    /// The set recorded when a fragment carried no set information at all
    pub fn placeholder() -> Self {
        Self::new(DEFAULT_REPS, 0.0)
    }
}

impl fmt::Display for ExerciseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}kg × {}", format_amount(self.weight), self.reps)
    }
}

/// An exercise recognized (or synthesized) from one workout fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExerciseResult {
    /// Catalog id, or `custom-<slug>` for synthesized exercises
    pub exercise_id: String,
    /// Display name
    pub exercise_name: String,
    /// Sets in the order they were written
    pub sets: Vec<ExerciseSet>,
}

impl WorkoutExerciseResult {
    /// Create an exercise with no sets yet
    pub fn new(exercise_id: &str, exercise_name: &str) -> Self {
        Self {
            exercise_id: exercise_id.to_string(),
            exercise_name: exercise_name.to_string(),
            sets: Vec::new(),
        }
    }

    /// Attach sets, substituting the placeholder set when none were parsed
    pub fn with_sets(mut self, sets: Vec<ExerciseSet>) -> Self {
        self.sets = if sets.is_empty() {
            vec![ExerciseSet::placeholder()]
        } else {
            sets
        };
        self
    }

    /// Whether this exercise was synthesized instead of found in the catalog
    pub fn is_custom(&self) -> bool {
        self.exercise_id.starts_with(CUSTOM_ID_PREFIX)
    }
}

/// Id prefix of exercises synthesized from unrecognized names
pub const CUSTOM_ID_PREFIX: &str = "custom-";

impl fmt::Display for WorkoutExerciseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.exercise_name)?;
        for (i, set) in self.sets.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "Set {}: {}", i + 1, set)?;
        }
        Ok(())
    }
}

/// Per-fragment trace of what the workout parser saw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawParsedExercise {
    /// Resolved or synthesized exercise name
    pub exercise_name: String,
    /// Sets as parsed, before any placeholder substitution (may be empty)
    pub sets: Vec<ExerciseSet>,
    /// Whether the name resolved against the catalog
    pub matched: bool,
    /// The fragment the exercise came from
    pub original_text: String,
}

/// Result of parsing a whole workout description
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutParseResult {
    /// Exercises in input order, each with at least one set
    pub exercises: Vec<WorkoutExerciseResult>,
    /// Overall confidence
    pub confidence: Confidence,
    /// Per-fragment trace, parallel to `exercises`
    #[serde(default)]
    pub raw_parsed: Vec<RawParsedExercise>,
}

impl WorkoutParseResult {
    /// An empty, low-confidence result
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of exercises resolved against the catalog
    pub fn matched_count(&self) -> usize {
        self.raw_parsed.iter().filter(|raw| raw.matched).count()
    }

    /// Number of exercises synthesized from unrecognized names
    pub fn unmatched_count(&self) -> usize {
        self.raw_parsed.iter().filter(|raw| !raw.matched).count()
    }
}

/// Units the nutrition quantity extractor recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityUnit {
    /// Catalog servings (the default)
    Serving,
    /// Grams (kilograms are converted)
    Grams,
    /// Milliliters (liters are converted)
    Ml,
    /// Ounces
    Oz,
    /// Cups
    Cup,
    /// Tablespoons
    Tbsp,
    /// Teaspoons
    Tsp,
}

impl QuantityUnit {
    /// Short suffix used in item names, empty for count-like units
    pub fn display_suffix(&self) -> &'static str {
        match self {
            QuantityUnit::Grams => "g",
            QuantityUnit::Ml => "ml",
            QuantityUnit::Oz => "oz",
            QuantityUnit::Serving | QuantityUnit::Cup | QuantityUnit::Tbsp | QuantityUnit::Tsp => {
                ""
            }
        }
    }

    /// Units scaled against per-100g data when the catalog has it
    pub fn uses_per_100g(&self) -> bool {
        matches!(self, QuantityUnit::Grams | QuantityUnit::Ml | QuantityUnit::Oz)
    }
}

/// An amount and unit extracted from a food fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuantity {
    /// Non-negative amount in `unit`
    pub amount: f64,
    /// Unit of `amount`
    pub unit: QuantityUnit,
    /// Unit text as the user typed it (`"serving"` when implicit)
    pub original_unit_text: String,
}

impl ParsedQuantity {
    /// Create a quantity, clamping negative or non-finite amounts to 0
    pub fn new(amount: f64, unit: QuantityUnit, original_unit_text: &str) -> Self {
        Self {
            amount: if amount.is_finite() { amount.max(0.0) } else { 0.0 },
            unit,
            original_unit_text: original_unit_text.to_string(),
        }
    }

    /// A serving-count quantity
    pub fn servings(amount: f64) -> Self {
        Self::new(amount, QuantityUnit::Serving, "serving")
    }
}

impl Default for ParsedQuantity {
    fn default() -> Self {
        Self::servings(1.0)
    }
}

impl fmt::Display for ParsedQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", format_amount(self.amount), self.original_unit_text)
    }
}

/// Calories and macros, unrounded
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MacroValues {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fat: f64,
}

impl MacroValues {
    /// Create a set of macro values
    pub fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
        }
    }

    /// Multiply every value by `multiplier`
    pub fn scaled(&self, multiplier: f64) -> Self {
        Self {
            calories: self.calories * multiplier,
            protein: self.protein * multiplier,
            carbs: self.carbs * multiplier,
            fat: self.fat * multiplier,
        }
    }
}

/// One recognized food, rounded for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionItem {
    /// Catalog key, with the explicit amount appended for g/ml/oz
    pub name: String,
    /// Amount in the parsed unit
    pub quantity: f64,
    /// Whole kcal
    pub calories: u32,
    /// Grams, one decimal
    pub protein: f64,
    /// Grams, one decimal
    pub carbs: f64,
    /// Grams, one decimal
    pub fat: f64,
}

impl NutritionItem {
    /// Build an item from unrounded values, applying display rounding
    pub fn from_values(name: &str, quantity: f64, values: &MacroValues) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            calories: round_calories(values.calories),
            protein: round_one_decimal(values.protein),
            carbs: round_one_decimal(values.carbs),
            fat: round_one_decimal(values.fat),
        }
    }
}

impl fmt::Display for NutritionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} kcal, {}g protein, {}g carbs, {}g fat",
            self.name,
            self.calories,
            format_amount(self.protein),
            format_amount(self.carbs),
            format_amount(self.fat)
        )
    }
}

/// Result of analyzing a meal description
///
/// Totals are always the sum of `items`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NutritionResult {
    /// Whole kcal
    pub calories: u32,
    /// Grams, one decimal
    pub protein: f64,
    /// Grams, one decimal
    pub carbs: f64,
    /// Grams, one decimal
    pub fat: f64,
    /// Recognized foods in input order
    pub items: Vec<NutritionItem>,
    /// Overall confidence
    pub confidence: Confidence,
}

impl NutritionResult {
    /// An empty, low-confidence result
    pub fn empty() -> Self {
        Self::default()
    }
}

impl fmt::Display for NutritionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Total: {} kcal, {}g protein, {}g carbs, {}g fat ({} confidence)",
            self.calories,
            format_amount(self.protein),
            format_amount(self.carbs),
            format_amount(self.fat),
            self.confidence
        )?;
        for item in &self.items {
            writeln!(f, "  • {}", item)?;
        }
        Ok(())
    }
}

/// Round kcal to a whole number
pub fn round_calories(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}

/// Round grams to one decimal place
pub fn round_one_decimal(value: f64) -> f64 {
    if value.is_finite() {
        (value * 10.0).round() / 10.0
    } else {
        0.0
    }
}

/// Format a number without a trailing `.0` for whole values
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
