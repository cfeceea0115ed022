//! # Nutrition Scaler Module
//!
//! Turns a parsed quantity and a matched food into absolute calories and
//! macros. Values are left unrounded; rounding happens per item when results
//! are aggregated.

use crate::catalog::FoodCatalogEntry;
use crate::fitness_model::{MacroValues, ParsedQuantity, QuantityUnit};
use crate::parser_config::NutritionParserConfig;

/// Which base values a multiplier applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleBasis {
    Per100g,
    PerServing,
}

/// A multiplier and the base values it scales
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaling {
    pub multiplier: f64,
    pub basis: ScaleBasis,
}

impl Scaling {
    fn per_100g(grams: f64) -> Self {
        Self {
            multiplier: grams / 100.0,
            basis: ScaleBasis::Per100g,
        }
    }

    fn servings(multiplier: f64) -> Self {
        Self {
            multiplier,
            basis: ScaleBasis::PerServing,
        }
    }
}

/// Pick the multiplier for `quantity` of `food`.
///
/// Grams and milliliters without per-100g data divide the amount by 100 and
/// apply it to the per-serving values, so `200g` of such a food counts as two
/// servings whatever the serving size is.
pub fn scaling_for(
    quantity: &ParsedQuantity,
    food: &FoodCatalogEntry,
    config: &NutritionParserConfig,
) -> Scaling {
    let amount = quantity.amount;
    let has_per_100g = food.per_100g.is_some();
    if quantity.unit.uses_per_100g() {
        return match (has_per_100g, quantity.unit) {
            (true, QuantityUnit::Oz) => Scaling::per_100g(amount * config.grams_per_oz),
            (true, _) => Scaling::per_100g(amount),
            (false, QuantityUnit::Oz) => Scaling::servings(amount),
            (false, _) => Scaling::servings(amount / 100.0),
        };
    }
    match quantity.unit {
        QuantityUnit::Tbsp | QuantityUnit::Tsp => {
            let (marker, grams_each) = if quantity.unit == QuantityUnit::Tbsp {
                ("tbsp", config.grams_per_tbsp)
            } else {
                ("tsp", config.grams_per_tsp)
            };
            if food.serving_description.to_lowercase().contains(marker) {
                Scaling::servings(amount)
            } else if has_per_100g {
                Scaling::per_100g(amount * grams_each)
            } else {
                Scaling::servings(amount)
            }
        }
        _ => Scaling::servings(amount),
    }
}

/// Absolute values for `quantity` of `food`
pub fn scale_nutrition(
    quantity: &ParsedQuantity,
    food: &FoodCatalogEntry,
    config: &NutritionParserConfig,
) -> MacroValues {
    let scaling = scaling_for(quantity, food, config);
    let base = match (scaling.basis, food.per_100g) {
        (ScaleBasis::Per100g, Some(per_100g)) => per_100g,
        _ => food.per_serving(),
    };
    base.scaled(scaling.multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(serving_description: &str, per_100g: Option<MacroValues>) -> FoodCatalogEntry {
        FoodCatalogEntry {
            key: "test food".to_string(),
            calories_per_serving: 200.0,
            protein_per_serving: 10.0,
            carbs_per_serving: 20.0,
            fat_per_serving: 8.0,
            serving_description: serving_description.to_string(),
            per_100g,
        }
    }

    fn per_100g() -> Option<MacroValues> {
        Some(MacroValues::new(400.0, 20.0, 40.0, 16.0))
    }

    fn scale(amount: f64, unit: QuantityUnit, food: &FoodCatalogEntry) -> MacroValues {
        let quantity = ParsedQuantity::new(amount, unit, "");
        scale_nutrition(&quantity, food, &NutritionParserConfig::default())
    }

    #[test]
    fn test_grams_use_per_100g() {
        let values = scale(150.0, QuantityUnit::Grams, &food("1 bar", per_100g()));
        assert_eq!(values, MacroValues::new(600.0, 30.0, 60.0, 24.0));
    }

    #[test]
    fn test_grams_without_per_100g_scale_servings() {
        let values = scale(150.0, QuantityUnit::Ml, &food("1 cup", None));
        assert_eq!(values, MacroValues::new(300.0, 15.0, 30.0, 12.0));
    }

    #[test]
    fn test_ounces() {
        let with_data = scale(2.0, QuantityUnit::Oz, &food("1 bar", per_100g()));
        assert!((with_data.calories - 226.8).abs() < 1e-9);
        let without = scale(2.0, QuantityUnit::Oz, &food("1 bar", None));
        assert_eq!(without.calories, 400.0);
    }

    #[test]
    fn test_cups_and_servings_multiply_servings() {
        let f = food("1 cup", per_100g());
        assert_eq!(scale(1.5, QuantityUnit::Cup, &f).calories, 300.0);
        assert_eq!(scale(3.0, QuantityUnit::Serving, &f).protein, 30.0);
    }

    #[test]
    fn test_spoons() {
        // serving already measured in tablespoons
        let spread = food("1 tbsp (16g)", per_100g());
        assert_eq!(scale(2.0, QuantityUnit::Tbsp, &spread).calories, 400.0);
        // grams approximation against per-100g values
        let oil = food("1 cup", per_100g());
        assert_eq!(scale(2.0, QuantityUnit::Tbsp, &oil).calories, 120.0);
        assert_eq!(scale(1.0, QuantityUnit::Tsp, &oil).calories, 20.0);
        // no per-100g data: treat as servings
        let sauce = food("1 packet", None);
        assert_eq!(scale(2.0, QuantityUnit::Tsp, &sauce).calories, 400.0);
    }

    #[test]
    fn test_doubling_grams_doubles_values() {
        let f = food("100g", per_100g());
        let one = scale(100.0, QuantityUnit::Grams, &f);
        let two = scale(200.0, QuantityUnit::Grams, &f);
        assert_eq!(one.scaled(2.0), two);
    }
}
