//! # Catalog Module
//!
//! Exercise and food reference data. The built-in catalogs are embedded at
//! compile time from `data/*.json` and parsed once on first use; custom
//! catalogs can be loaded from JSON strings or files with the same shape.
//!
//! Aliases are stored as `[alias, target]` pairs. Exercise aliases target an
//! exercise id, food aliases target a food key.

use crate::catalog_errors::CatalogError;
use crate::fitness_model::MacroValues;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

static EXERCISES_JSON: &str = include_str!("../data/exercises.json");
static EXERCISE_ALIASES_JSON: &str = include_str!("../data/exercise_aliases.json");
static FOODS_JSON: &str = include_str!("../data/foods.json");
static FOOD_ALIASES_JSON: &str = include_str!("../data/food_aliases.json");

static BUILTIN_EXERCISES: LazyLock<ExerciseCatalog> = LazyLock::new(|| {
    ExerciseCatalog::from_json(EXERCISES_JSON, EXERCISE_ALIASES_JSON)
        .expect("Built-in exercise catalog should be valid")
});

static BUILTIN_FOODS: LazyLock<FoodCatalog> = LazyLock::new(|| {
    FoodCatalog::from_json(FOODS_JSON, FOOD_ALIASES_JSON)
        .expect("Built-in food catalog should be valid")
});

/// A known exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseCatalogEntry {
    /// Stable slug, e.g. `"bench-press"`
    pub id: String,
    /// Display name, e.g. `"Bench Press"`
    pub name: String,
    /// Primary muscle group, e.g. `"Chest"`
    pub muscle_group: String,
    /// Movement category, e.g. `"Compound"`
    pub category: String,
}

/// A known food with per-serving values and optional per-100g values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodCatalogEntry {
    /// Lowercase lookup key, also used as the display name
    pub key: String,
    pub calories_per_serving: f64,
    pub protein_per_serving: f64,
    pub carbs_per_serving: f64,
    pub fat_per_serving: f64,
    /// Human description of one serving, e.g. `"1 tbsp (16g)"`
    pub serving_description: String,
    /// Values for 100 grams, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_100g: Option<MacroValues>,
}

impl FoodCatalogEntry {
    /// Slug derived from the key (`"chicken breast"` -> `"chicken-breast"`)
    pub fn id(&self) -> String {
        slug_from_key(&self.key)
    }

    /// Values for one serving
    pub fn per_serving(&self) -> MacroValues {
        MacroValues::new(
            self.calories_per_serving,
            self.protein_per_serving,
            self.carbs_per_serving,
            self.fat_per_serving,
        )
    }
}

/// An alternative spelling pointing at a catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogAlias {
    /// Lowercase alternative spelling
    pub alias: String,
    /// Exercise id or food key
    pub target: String,
}

impl CatalogAlias {
    pub fn new(alias: &str, target: &str) -> Self {
        Self {
            alias: alias.trim().to_lowercase(),
            target: target.trim().to_string(),
        }
    }
}

fn slug_from_key(key: &str) -> String {
    key.split_whitespace().collect::<Vec<_>>().join("-")
}

fn parse_aliases(aliases_json: &str) -> Result<Vec<CatalogAlias>, CatalogError> {
    let pairs: Vec<(String, String)> = serde_json::from_str(aliases_json)?;
    Ok(pairs
        .iter()
        .map(|(alias, target)| CatalogAlias::new(alias, target))
        .collect())
}

/// Checks uniqueness of `ids` and that every alias target is one of them
fn validate<'a>(
    what: &str,
    ids: impl Iterator<Item = &'a str>,
    aliases: &[CatalogAlias],
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateEntry(id.to_string()));
        }
    }
    if seen.is_empty() {
        return Err(CatalogError::Empty(what.to_string()));
    }
    if let Some(bad) = aliases.iter().find(|a| !seen.contains(a.target.as_str())) {
        return Err(CatalogError::UnknownAliasTarget {
            alias: bad.alias.clone(),
            target: bad.target.clone(),
        });
    }
    Ok(())
}

/// The exercise reference list plus its alias table
#[derive(Debug, Clone)]
pub struct ExerciseCatalog {
    entries: Vec<ExerciseCatalogEntry>,
    aliases: Vec<CatalogAlias>,
}

impl ExerciseCatalog {
    /// Build a catalog, rejecting duplicate ids and dangling aliases
    pub fn new(
        entries: Vec<ExerciseCatalogEntry>,
        aliases: Vec<CatalogAlias>,
    ) -> Result<Self, CatalogError> {
        validate(
            "exercises",
            entries.iter().map(|e| e.id.as_str()),
            &aliases,
        )?;
        debug!(
            "Exercise catalog loaded: {} entries, {} aliases",
            entries.len(),
            aliases.len()
        );
        Ok(Self { entries, aliases })
    }

    /// Parse entries and `[alias, id]` pairs from JSON text
    pub fn from_json(entries_json: &str, aliases_json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<ExerciseCatalogEntry> = serde_json::from_str(entries_json)?;
        Self::new(entries, parse_aliases(aliases_json)?)
    }

    /// Load a catalog from files; without an alias file the catalog has no aliases
    pub fn from_files(entries_path: &Path, aliases_path: Option<&Path>) -> Result<Self, CatalogError> {
        let entries_json = std::fs::read_to_string(entries_path)?;
        let aliases_json = match aliases_path {
            Some(path) => std::fs::read_to_string(path)?,
            None => "[]".to_string(),
        };
        Self::from_json(&entries_json, &aliases_json)
    }

    /// The catalog compiled into the crate
    pub fn builtin() -> &'static ExerciseCatalog {
        &BUILTIN_EXERCISES
    }

    pub fn entries(&self) -> &[ExerciseCatalogEntry] {
        &self.entries
    }

    pub fn aliases(&self) -> &[CatalogAlias] {
        &self.aliases
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an exercise by id
    pub fn get(&self, id: &str) -> Option<&ExerciseCatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// All exercises for a muscle group, compared case-insensitively
    pub fn by_muscle_group(&self, muscle_group: &str) -> Vec<&ExerciseCatalogEntry> {
        self.entries
            .iter()
            .filter(|e| e.muscle_group.eq_ignore_ascii_case(muscle_group.trim()))
            .collect()
    }
}

/// The food reference list plus its alias table
#[derive(Debug, Clone)]
pub struct FoodCatalog {
    entries: Vec<FoodCatalogEntry>,
    aliases: Vec<CatalogAlias>,
}

impl FoodCatalog {
    /// Build a catalog; keys are lowercased and must be unique
    pub fn new(
        mut entries: Vec<FoodCatalogEntry>,
        aliases: Vec<CatalogAlias>,
    ) -> Result<Self, CatalogError> {
        for entry in &mut entries {
            entry.key = entry.key.trim().to_lowercase();
        }
        let aliases: Vec<CatalogAlias> = aliases
            .into_iter()
            .map(|a| CatalogAlias::new(&a.alias, &a.target.to_lowercase()))
            .collect();
        validate("foods", entries.iter().map(|e| e.key.as_str()), &aliases)?;
        debug!(
            "Food catalog loaded: {} entries, {} aliases",
            entries.len(),
            aliases.len()
        );
        Ok(Self { entries, aliases })
    }

    /// Parse entries and `[alias, key]` pairs from JSON text
    pub fn from_json(entries_json: &str, aliases_json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<FoodCatalogEntry> = serde_json::from_str(entries_json)?;
        Self::new(entries, parse_aliases(aliases_json)?)
    }

    /// Load a catalog from files; without an alias file the catalog has no aliases
    pub fn from_files(entries_path: &Path, aliases_path: Option<&Path>) -> Result<Self, CatalogError> {
        let entries_json = std::fs::read_to_string(entries_path)?;
        let aliases_json = match aliases_path {
            Some(path) => std::fs::read_to_string(path)?,
            None => "[]".to_string(),
        };
        Self::from_json(&entries_json, &aliases_json)
    }

    /// The catalog compiled into the crate
    pub fn builtin() -> &'static FoodCatalog {
        &BUILTIN_FOODS
    }

    pub fn entries(&self) -> &[FoodCatalogEntry] {
        &self.entries
    }

    pub fn aliases(&self) -> &[CatalogAlias] {
        &self.aliases
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a food by its key
    pub fn get(&self, key: &str) -> Option<&FoodCatalogEntry> {
        let key = key.trim().to_lowercase();
        self.entries.iter().find(|e| e.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_exercise_catalog_loads() {
        let catalog = ExerciseCatalog::builtin();
        assert!(catalog.len() > 100);
        let bench = catalog.get("bench-press").unwrap();
        assert_eq!(bench.name, "Bench Press");
        assert_eq!(bench.muscle_group, "Chest");
        assert!(catalog
            .aliases()
            .iter()
            .any(|a| a.alias == "bench" && a.target == "bench-press"));
    }

    #[test]
    fn test_builtin_food_catalog_loads() {
        let catalog = FoodCatalog::builtin();
        assert!(catalog.len() > 150);
        let chicken = catalog.get("Chicken Breast").unwrap();
        assert_eq!(chicken.id(), "chicken-breast");
        let per_100g = chicken.per_100g.unwrap();
        assert_eq!(per_100g.calories, 165.0);
        assert_eq!(per_100g.protein, 31.0);

        let banana = catalog.get("banana").unwrap();
        assert_eq!(banana.per_serving().calories, 105.0);
    }

    #[test]
    fn test_by_muscle_group_is_case_insensitive() {
        let catalog = ExerciseCatalog::builtin();
        let chest = catalog.by_muscle_group("chest");
        assert!(!chest.is_empty());
        assert!(chest.iter().all(|e| e.muscle_group == "Chest"));
        assert!(catalog.by_muscle_group("elbows").is_empty());
    }

    #[test]
    fn test_dangling_alias_is_rejected() {
        let entries = r#"[{"id": "squats", "name": "Squats", "muscle_group": "Quads", "category": "Compound"}]"#;
        let aliases = r#"[["squat", "squats"], ["dl", "deadlift"]]"#;
        let err = ExerciseCatalog::from_json(entries, aliases).unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnknownAliasTarget {
                alias: "dl".to_string(),
                target: "deadlift".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_and_empty_catalogs_are_rejected() {
        let entries = r#"[
            {"id": "squats", "name": "Squats", "muscle_group": "Quads", "category": "Compound"},
            {"id": "squats", "name": "Back Squat", "muscle_group": "Quads", "category": "Compound"}
        ]"#;
        assert_eq!(
            ExerciseCatalog::from_json(entries, "[]").unwrap_err(),
            CatalogError::DuplicateEntry("squats".to_string())
        );
        assert!(matches!(
            FoodCatalog::from_json("[]", "[]").unwrap_err(),
            CatalogError::Empty(_)
        ));
    }

    #[test]
    fn test_food_keys_and_aliases_are_lowercased() {
        let entries = r#"[{"key": "Oat Milk", "calories_per_serving": 120, "protein_per_serving": 3,
            "carbs_per_serving": 16, "fat_per_serving": 5, "serving_description": "1 cup"}]"#;
        let aliases = r#"[["OATLY", "Oat Milk"]]"#;
        let catalog = FoodCatalog::from_json(entries, aliases).unwrap();
        assert_eq!(catalog.entries()[0].key, "oat milk");
        assert_eq!(catalog.aliases()[0], CatalogAlias::new("oatly", "oat milk"));
        assert!(catalog.entries()[0].per_100g.is_none());
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = FoodCatalog::from_json("{not json", "[]").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
