//! # Quantity Extraction Module
//!
//! Finds the amount and unit in a food fragment and strips quantities and
//! filler words so the remaining text can be matched against the food catalog.
//!
//! Units are tried in a fixed priority order (grams, ml, oz, cups, tbsp, tsp,
//! kilograms, liters) and the first one found anywhere in the fragment wins.
//! Without a unit, a leading number, fraction or `half` is a serving count;
//! without any number the quantity is one serving.

use crate::fitness_model::{ParsedQuantity, QuantityUnit};
use crate::patterns::{
    parse_amount, CUP_REGEX, DIGITS_REGEX, FOOD_STOP_WORD_REGEX, GRAMS_REGEX, KG_REGEX,
    LEADING_AMOUNT_REGEX, LEADING_HALF_REGEX, LITER_REGEX, ML_REGEX, OZ_REGEX,
    QUANTITY_STRIP_REGEX, TBSP_REGEX, TSP_REGEX, WHITESPACE_REGEX,
};
use regex::Regex;
use std::sync::LazyLock;

/// One entry of the unit cascade
struct UnitMatcher {
    regex: &'static Regex,
    unit: QuantityUnit,
    /// Applied to the amount, e.g. 1000 for kilograms to grams
    factor: f64,
}

static UNIT_MATCHERS: LazyLock<Vec<UnitMatcher>> = LazyLock::new(|| {
    vec![
        UnitMatcher { regex: &GRAMS_REGEX, unit: QuantityUnit::Grams, factor: 1.0 },
        UnitMatcher { regex: &ML_REGEX, unit: QuantityUnit::Ml, factor: 1.0 },
        UnitMatcher { regex: &OZ_REGEX, unit: QuantityUnit::Oz, factor: 1.0 },
        UnitMatcher { regex: &CUP_REGEX, unit: QuantityUnit::Cup, factor: 1.0 },
        UnitMatcher { regex: &TBSP_REGEX, unit: QuantityUnit::Tbsp, factor: 1.0 },
        UnitMatcher { regex: &TSP_REGEX, unit: QuantityUnit::Tsp, factor: 1.0 },
        UnitMatcher { regex: &KG_REGEX, unit: QuantityUnit::Grams, factor: 1000.0 },
        UnitMatcher { regex: &LITER_REGEX, unit: QuantityUnit::Ml, factor: 1000.0 },
    ]
});

impl UnitMatcher {
    fn extract(&self, text: &str) -> Option<ParsedQuantity> {
        let caps = self.regex.captures(text)?;
        let amount = parse_amount(caps.get(1)?.as_str())?;
        let unit_text = caps.get(2).map_or("", |m| m.as_str());
        Some(ParsedQuantity::new(amount * self.factor, self.unit, unit_text))
    }
}

/// Amount and unit of a food fragment; never fails
pub fn extract_quantity(fragment: &str) -> ParsedQuantity {
    let text = fragment.trim().to_lowercase();
    UNIT_MATCHERS
        .iter()
        .find_map(|matcher| matcher.extract(&text))
        .or_else(|| leading_servings(&text))
        .unwrap_or_default()
}

fn leading_servings(text: &str) -> Option<ParsedQuantity> {
    if let Some(caps) = LEADING_AMOUNT_REGEX.captures(text) {
        return parse_amount(&caps[1]).map(ParsedQuantity::servings);
    }
    if LEADING_HALF_REGEX.is_match(text) {
        return Some(ParsedQuantity::servings(0.5));
    }
    None
}

/// Food name left after removing quantities, a leading count and filler
/// words. Falls back to the digit-free fragment when nothing is left.
pub fn clean_food_query(fragment: &str) -> String {
    let lowered = fragment.trim().to_lowercase();
    let without_units = QUANTITY_STRIP_REGEX.replace_all(&lowered, " ");
    let without_count = LEADING_AMOUNT_REGEX.replace(without_units.trim(), "");
    let without_fillers = FOOD_STOP_WORD_REGEX.replace_all(&without_count, " ");
    let cleaned = collapse(&without_fillers);
    if !cleaned.is_empty() {
        return cleaned;
    }
    collapse(&DIGITS_REGEX.replace_all(&lowered, " "))
}

fn collapse(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text.trim(), " ").into_owned()
}
