//! # Patterns Module
//!
//! Every regular expression used by the splitters, extractors and name
//! cleaners, compiled once on first use.

use lazy_static::lazy_static;
use regex::Regex;

/// A number, a simple fraction (`1/2`) or a mixed fraction (`1 1/2`)
pub const AMOUNT: &str = r"(\d+\s+\d+/\d+|\d+/\d+|\d+(?:\.\d+)?)";

// Workout fragment separators
pub const TRANSITION_PATTERN: &str = r"(?i)\b(?:then|also|next|after that|afterwards|followed by)\b";

// Weights, with their optional `on`/`at`/`@` prefix
pub const KG_WEIGHT_PATTERN: &str =
    r"(?i)(?:\b(?:on|at)\s+|@\s*)?(\d+(?:\.\d+)?)\s*(?:kgs?|kilos?|kilograms?)\b";
pub const LB_WEIGHT_PATTERN: &str =
    r"(?i)(?:\b(?:on|at)\s+|@\s*)?(\d+(?:\.\d+)?)\s*(?:lbs?|pounds?)\b";
pub const BARE_WEIGHT_PATTERN: &str =
    r"(?i)(?:\b(?:all\s+)?(?:on|at)\s*|@\s*)(\d+(?:\.\d+)?)\b(\s*(?:reps?|sets?|x)\b)?";

// Individual rep sequences
pub const SET_COLON_PATTERN: &str = r"(?i)\bset\s*(\d+)\s*:\s*(\d+)\s*(?:reps?\b)?";
pub const SET_VERB_PATTERN: &str =
    r"(?i)\bset\s*(\d+)\s*(?:\b(?:was|had|did|got)\b|=)\s*(\d+)\s*(?:reps?\b)?";
pub const ORDINAL_SET_PATTERN: &str =
    r"(?i)\b(\d+)(?:st|nd|rd|th)\s*set\s*(?:\b(?:was|had|did|got)\b|:)?\s*(\d+)\s*(?:reps?\b)?";
pub const COMMA_SEQUENCE_PATTERN: &str =
    r"(?i)(?:\b(?:got|did|had)\s*)?\b(\d+(?:\s*,\s*\d+)+)\b\s*(?:reps?\b)?";
pub const DASH_SEQUENCE_PATTERN: &str = r"\b\d+(?:\s*[-/]\s*\d+){1,4}\b";

// Set count and default reps
pub const SET_COUNT_PATTERN: &str = r"(?i)\b(\d+)\s*sets?\b";
pub const SETS_BY_REPS_PATTERN: &str = r"(?i)\b(\d+)\s*[x×]\s*(\d+)\b";
pub const SETS_OF_PATTERN: &str = r"(?i)\bsets?\s*of\s*(\d+)\b";
pub const REP_COUNT_PATTERN: &str = r"(?i)\b(\d+)\s*(?:reps?|repetitions?)\b";
pub const EACH_REPS_PATTERN: &str = r"(?i)\b(?:each|all)\s*(\d+)\b";

// Exercise-name cleanup
pub const SET_FORM_STRIP_PATTERN: &str =
    r"(?i)\bset\s*\d+\s*(?:[:=]|\b(?:was|had|did|got)\b)?\s*\d+\s*(?:reps?\b)?";
pub const ORDINAL_STRIP_PATTERN: &str =
    r"(?i)\b\d+(?:st|nd|rd|th)\s*set\b(?:\s*(?:\b(?:was|had|did|got)\b|:)?\s*\d+\s*(?:reps?\b)?)?";
pub const CONNECTOR_PATTERN: &str =
    r"(?i)\b(?:of|with|for|each|per|had|was|did|got|every|all|sets?|reps?|repetitions?)\b";
pub const STANDALONE_NUMBER_PATTERN: &str = r"\b\d+(?:\.\d+)?\b";
pub const NAME_PUNCTUATION_PATTERN: &str = r"[,:;=@/×()]";
pub const STRAY_HYPHEN_PATTERN: &str = r"-+(?:\s|$)|(?:^|\s)-+";
pub const WHITESPACE_PATTERN: &str = r"\s+";

// Nutrition fragment separators
pub const FOOD_SEPARATOR_PATTERN: &str = r"(?i)\s*(?:,|\+|&|\band\b|\bwith\b|\bplus\b)\s*";

// Food quantity cleanup and leading counts
pub const QUANTITY_STRIP_PATTERN: &str = r"(?i)(?:\d+\s+\d+/\d+|\d+/\d+|\d+(?:\.\d+)?)\s*(?:g|grams?|gms?|ml|milliliters?|millilitres?|oz|ounces?|cups?|tbsps?|tablespoons?|tsps?|teaspoons?|kgs?|kilograms?|kilos?|l|liters?|litres?)\b";
pub const LEADING_AMOUNT_PATTERN: &str = r"^\s*(\d+\s+\d+/\d+|\d+/\d+|\d+(?:\.\d+)?)";
pub const LEADING_HALF_PATTERN: &str = r"(?i)^\s*(?:a\s+)?half\b";
pub const FOOD_STOP_WORD_PATTERN: &str = r"(?i)\b(?:of|worth|piece|pieces|slice|slices|serving|servings|portion|portions|bowl|bowls|plate|plates|some|a|an|the|half)\b";
pub const DIGITS_PATTERN: &str = r"\d+";

/// Builds a unit pattern: an amount, optional whitespace, then one of `units`
fn unit_pattern(units: &str) -> String {
    format!(r"(?i){AMOUNT}\s*({units})\b")
}

lazy_static! {
    pub static ref TRANSITION_REGEX: Regex =
        Regex::new(TRANSITION_PATTERN).expect("Transition pattern should be valid");
    pub static ref KG_WEIGHT_REGEX: Regex =
        Regex::new(KG_WEIGHT_PATTERN).expect("Kilogram pattern should be valid");
    pub static ref LB_WEIGHT_REGEX: Regex =
        Regex::new(LB_WEIGHT_PATTERN).expect("Pound pattern should be valid");
    pub static ref BARE_WEIGHT_REGEX: Regex =
        Regex::new(BARE_WEIGHT_PATTERN).expect("Bare weight pattern should be valid");

    pub static ref SET_COLON_REGEX: Regex =
        Regex::new(SET_COLON_PATTERN).expect("Set colon pattern should be valid");
    pub static ref SET_VERB_REGEX: Regex =
        Regex::new(SET_VERB_PATTERN).expect("Set verb pattern should be valid");
    pub static ref ORDINAL_SET_REGEX: Regex =
        Regex::new(ORDINAL_SET_PATTERN).expect("Ordinal set pattern should be valid");
    pub static ref COMMA_SEQUENCE_REGEX: Regex =
        Regex::new(COMMA_SEQUENCE_PATTERN).expect("Comma sequence pattern should be valid");
    pub static ref DASH_SEQUENCE_REGEX: Regex =
        Regex::new(DASH_SEQUENCE_PATTERN).expect("Dash sequence pattern should be valid");

    pub static ref SET_COUNT_REGEX: Regex =
        Regex::new(SET_COUNT_PATTERN).expect("Set count pattern should be valid");
    pub static ref SETS_BY_REPS_REGEX: Regex =
        Regex::new(SETS_BY_REPS_PATTERN).expect("Sets-by-reps pattern should be valid");
    pub static ref SETS_OF_REGEX: Regex =
        Regex::new(SETS_OF_PATTERN).expect("Sets-of pattern should be valid");
    pub static ref REP_COUNT_REGEX: Regex =
        Regex::new(REP_COUNT_PATTERN).expect("Rep count pattern should be valid");
    pub static ref EACH_REPS_REGEX: Regex =
        Regex::new(EACH_REPS_PATTERN).expect("Each-reps pattern should be valid");

    pub static ref SET_FORM_STRIP_REGEX: Regex =
        Regex::new(SET_FORM_STRIP_PATTERN).expect("Set form strip pattern should be valid");
    pub static ref ORDINAL_STRIP_REGEX: Regex =
        Regex::new(ORDINAL_STRIP_PATTERN).expect("Ordinal strip pattern should be valid");
    pub static ref CONNECTOR_REGEX: Regex =
        Regex::new(CONNECTOR_PATTERN).expect("Connector pattern should be valid");
    pub static ref STANDALONE_NUMBER_REGEX: Regex =
        Regex::new(STANDALONE_NUMBER_PATTERN).expect("Number pattern should be valid");
    pub static ref NAME_PUNCTUATION_REGEX: Regex =
        Regex::new(NAME_PUNCTUATION_PATTERN).expect("Punctuation pattern should be valid");
    pub static ref STRAY_HYPHEN_REGEX: Regex =
        Regex::new(STRAY_HYPHEN_PATTERN).expect("Hyphen pattern should be valid");
    pub static ref WHITESPACE_REGEX: Regex =
        Regex::new(WHITESPACE_PATTERN).expect("Whitespace pattern should be valid");

    pub static ref FOOD_SEPARATOR_REGEX: Regex =
        Regex::new(FOOD_SEPARATOR_PATTERN).expect("Food separator pattern should be valid");

    pub static ref GRAMS_REGEX: Regex =
        Regex::new(&unit_pattern("g|grams?|gms?")).expect("Grams pattern should be valid");
    pub static ref ML_REGEX: Regex =
        Regex::new(&unit_pattern("ml|milliliters?|millilitres?")).expect("Milliliter pattern should be valid");
    pub static ref OZ_REGEX: Regex =
        Regex::new(&unit_pattern("oz|ounces?")).expect("Ounce pattern should be valid");
    pub static ref CUP_REGEX: Regex =
        Regex::new(&unit_pattern("cups?")).expect("Cup pattern should be valid");
    pub static ref TBSP_REGEX: Regex =
        Regex::new(&unit_pattern("tbsps?|tablespoons?")).expect("Tablespoon pattern should be valid");
    pub static ref TSP_REGEX: Regex =
        Regex::new(&unit_pattern("tsps?|teaspoons?")).expect("Teaspoon pattern should be valid");
    pub static ref KG_REGEX: Regex =
        Regex::new(&unit_pattern("kgs?|kilograms?|kilos?")).expect("Kilogram pattern should be valid");
    pub static ref LITER_REGEX: Regex =
        Regex::new(&unit_pattern("l|liters?|litres?")).expect("Liter pattern should be valid");

    pub static ref QUANTITY_STRIP_REGEX: Regex =
        Regex::new(QUANTITY_STRIP_PATTERN).expect("Quantity strip pattern should be valid");
    pub static ref LEADING_AMOUNT_REGEX: Regex =
        Regex::new(LEADING_AMOUNT_PATTERN).expect("Leading amount pattern should be valid");
    pub static ref LEADING_HALF_REGEX: Regex =
        Regex::new(LEADING_HALF_PATTERN).expect("Leading half pattern should be valid");
    pub static ref FOOD_STOP_WORD_REGEX: Regex =
        Regex::new(FOOD_STOP_WORD_PATTERN).expect("Stop word pattern should be valid");
    pub static ref DIGITS_REGEX: Regex =
        Regex::new(DIGITS_PATTERN).expect("Digits pattern should be valid");
}

/// Parses an amount captured by [`AMOUNT`]: `"2"`, `"2.5"`, `"1/2"` or `"1 1/2"`
pub fn parse_amount(text: &str) -> Option<f64> {
    let text = text.trim();
    let mut parts = text.split_whitespace();
    let first = parts.next()?;
    match parts.next() {
        Some(fraction) => Some(first.parse::<f64>().ok()? + parse_fraction(fraction)?),
        None if first.contains('/') => parse_fraction(first),
        None => first.parse::<f64>().ok().filter(|value| value.is_finite()),
    }
}

fn parse_fraction(text: &str) -> Option<f64> {
    let (numerator, denominator) = text.split_once('/')?;
    let numerator: f64 = numerator.trim().parse().ok()?;
    let denominator: f64 = denominator.trim().parse().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}
