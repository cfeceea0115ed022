//! # Nutrition Analyzer
//!
//! Estimates calories and macros for a free-text meal description.
//!
//! ## Usage
//!
//! ```rust
//! use fitlog::nutrition_analyzer::analyze_nutrition;
//!
//! let result = analyze_nutrition("100g chicken breast");
//!
//! assert_eq!(result.calories, 165);
//! assert_eq!(result.protein, 31.0);
//! ```

use crate::aggregation::aggregate_nutrition;
use crate::catalog::{FoodCatalog, FoodCatalogEntry};
use crate::entity_resolver::EntityResolver;
use crate::fitness_model::{format_amount, NutritionItem, NutritionResult, ParsedQuantity};
use crate::fragment_splitter::split_foods;
use crate::nutrition_scaler::scale_nutrition;
use crate::parser_config::NutritionParserConfig;
use crate::quantity::{clean_food_query, extract_quantity};
use log::{debug, info};
use std::sync::LazyLock;

static DEFAULT_ANALYZER: LazyLock<NutritionAnalyzer> = LazyLock::new(NutritionAnalyzer::builtin);

/// Meal description analyzer bound to one food catalog
#[derive(Debug, Clone)]
pub struct NutritionAnalyzer {
    catalog: FoodCatalog,
    resolver: EntityResolver,
    config: NutritionParserConfig,
}

impl NutritionAnalyzer {
    pub fn new(catalog: FoodCatalog, config: NutritionParserConfig) -> Self {
        let resolver = EntityResolver::for_foods(&catalog, config.resolver.clone());
        Self {
            catalog,
            resolver,
            config,
        }
    }

    /// Analyzer over the built-in catalog with default settings
    pub fn builtin() -> Self {
        Self::new(FoodCatalog::builtin().clone(), NutritionParserConfig::default())
    }

    pub fn catalog(&self) -> &FoodCatalog {
        &self.catalog
    }

    /// Analyze a meal description; never fails
    pub fn analyze(&self, input: &str) -> NutritionResult {
        let mut items = Vec::new();
        let mut unmatched = 0;
        for fragment in split_foods(input, self.config.min_fragment_len) {
            match self.analyze_fragment(&fragment) {
                Some(item) => items.push(item),
                None => {
                    debug!("No food match for '{fragment}'");
                    unmatched += 1;
                }
            }
        }

        let result = aggregate_nutrition(items, unmatched);
        info!(
            "Analyzed meal: {} item(s), {} unmatched, {} kcal, {} confidence",
            result.items.len(),
            unmatched,
            result.calories,
            result.confidence
        );
        result
    }

    fn analyze_fragment(&self, fragment: &str) -> Option<NutritionItem> {
        let quantity = extract_quantity(fragment);
        let food = self.find_food(fragment)?;
        let values = scale_nutrition(&quantity, food, &self.config);
        debug!("'{fragment}' -> {} × {quantity}", food.key);
        Some(NutritionItem::from_values(
            &item_name(food, &quantity),
            quantity.amount,
            &values,
        ))
    }

    /// Catalog entry for a food fragment, if any
    pub fn find_food(&self, fragment: &str) -> Option<&FoodCatalogEntry> {
        let query = clean_food_query(fragment);
        if query.is_empty() {
            return None;
        }
        self.resolver
            .resolve(&query)
            .and_then(|found| self.catalog.entries().get(found.index))
    }
}

/// Food key, with the amount appended for gram, milliliter and ounce quantities
fn item_name(food: &FoodCatalogEntry, quantity: &ParsedQuantity) -> String {
    let suffix = quantity.unit.display_suffix();
    if suffix.is_empty() {
        food.key.clone()
    } else {
        format!("{} ({}{})", food.key, format_amount(quantity.amount), suffix)
    }
}

/// Analyze with the built-in catalog and default settings
pub fn analyze_nutrition(input: &str) -> NutritionResult {
    DEFAULT_ANALYZER.analyze(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness_model::Confidence;

    fn small_catalog() -> FoodCatalog {
        FoodCatalog::from_json(
            r#"[
                {"key": "yogurt", "calories_per_serving": 150, "protein_per_serving": 8,
                 "carbs_per_serving": 11, "fat_per_serving": 8, "serving_description": "1 cup",
                 "per_100g": {"calories": 61, "protein": 3.5, "carbs": 4.7, "fat": 3.3}},
                {"key": "greek yogurt", "calories_per_serving": 100, "protein_per_serving": 17,
                 "carbs_per_serving": 6, "fat_per_serving": 0.7, "serving_description": "1 cup",
                 "per_100g": {"calories": 59, "protein": 10, "carbs": 3.6, "fat": 0.4}},
                {"key": "burger", "calories_per_serving": 540, "protein_per_serving": 25,
                 "carbs_per_serving": 40, "fat_per_serving": 30, "serving_description": "1 burger"}
            ]"#,
            r#"[["yoghurt", "yogurt"]]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_longer_keys_win() {
        let analyzer = NutritionAnalyzer::new(small_catalog(), NutritionParserConfig::default());
        let result = analyzer.analyze("200g greek yogurt");
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].name, "greek yogurt (200g)");
        assert_eq!(result.calories, 118);
        assert_eq!(result.protein, 20.0);
    }

    #[test]
    fn test_alias_lookup() {
        let analyzer = NutritionAnalyzer::new(small_catalog(), NutritionParserConfig::default());
        let food = analyzer.find_food("a bowl of yoghurt").unwrap();
        assert_eq!(food.key, "yogurt");
    }

    #[test]
    fn test_grams_without_per_100g_quirk() {
        let analyzer = NutritionAnalyzer::new(small_catalog(), NutritionParserConfig::default());
        let result = analyzer.analyze("200g burger");
        // 200g counts as two servings when only per-serving values exist
        assert_eq!(result.calories, 1080);
        assert_eq!(result.items[0].name, "burger (200g)");
    }

    #[test]
    fn test_unmatched_fragments_lower_confidence() {
        let analyzer = NutritionAnalyzer::new(small_catalog(), NutritionParserConfig::default());
        let result = analyzer.analyze("burger, yogurt and moon rocks");
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.confidence, Confidence::Medium);
        assert_eq!(result.calories, 690);
    }

    #[test]
    fn test_item_quantity_uses_parsed_amount() {
        let analyzer = NutritionAnalyzer::new(small_catalog(), NutritionParserConfig::default());
        let result = analyzer.analyze("2 burgers");
        assert_eq!(result.items[0].name, "burger");
        assert_eq!(result.items[0].quantity, 2.0);
        assert_eq!(result.calories, 1080);
    }
}
